//! Core domain models for repo-tokens
//!
//! This crate contains:
//! - The tokenization result shared by the counter, the cache and the CLI
//! - File records and skip reasons
//! - Compact token-count formatting

pub mod error;
pub mod format;
pub mod result;

pub use error::{Error, Result};
pub use format::{format_tokens, group_thousands};
pub use result::{FileRecord, SkipCounts, SkipReason, TokenizationResult, UNKNOWN_EXTENSION};
