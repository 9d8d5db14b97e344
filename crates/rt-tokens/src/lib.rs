//! Tokenizer adapter and per-file token counting
//!
//! - [`EncoderRegistry`] resolves a model name to a tiktoken encoding,
//!   falling back through an alias table to `cl100k_base`
//! - [`count_file`] tokenizes one file under a size ceiling and never fails

pub mod counter;
pub mod encoder;

pub use counter::{DEFAULT_MAX_FILE_SIZE, FileCount, count_file};
pub use encoder::{BaseEncoding, DEFAULT_ENCODING, Encoder, EncoderRegistry};
