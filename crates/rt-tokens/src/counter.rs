//! Bounded per-file token counting

use std::path::Path;

use rt_core::SkipReason;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::Encoder;

/// Files above this size (1 MiB) are skipped rather than partially tokenized
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Token count for one file, with the reason it was skipped if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCount {
    pub tokens: u64,
    pub skipped: Option<SkipReason>,
}

impl FileCount {
    fn counted(tokens: usize) -> Self {
        Self {
            tokens: tokens as u64,
            skipped: None,
        }
    }

    fn skipped(reason: SkipReason) -> Self {
        Self {
            tokens: 0,
            skipped: Some(reason),
        }
    }
}

/// Count tokens in a single file. Never fails: I/O problems become `SkipReason::Error`.
pub async fn count_file(path: &Path, encoder: &Encoder, max_size: u64) -> FileCount {
    match try_count_file(path, encoder, max_size).await {
        Ok(count) => count,
        Err(e) => {
            debug!("Failed to count {}: {}", path.display(), e);
            FileCount::skipped(SkipReason::Error)
        }
    }
}

async fn try_count_file(
    path: &Path,
    encoder: &Encoder,
    max_size: u64,
) -> std::io::Result<FileCount> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > max_size {
        return Ok(FileCount::skipped(SkipReason::Large));
    }
    if size == 0 {
        return Ok(FileCount::skipped(SkipReason::Empty));
    }

    let file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::with_capacity(size as usize);
    file.take(max_size).read_to_end(&mut bytes).await?;

    let text = decode_text(&bytes);
    if text.is_empty() {
        return Ok(FileCount::skipped(SkipReason::Empty));
    }

    Ok(FileCount::counted(encoder.count(&text)))
}

/// UTF-8 decode that drops malformed sequences and folds `\r\n` / `\r` into `\n`
fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }

    if text.contains('\r') {
        text = text.replace("\r\n", "\n").replace('\r', "\n");
    }
    text
}
