use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Path '{0}' does not exist")]
    PathNotFound(String),

    #[error("Failed to load encoding {encoding}: {reason}")]
    EncoderUnavailable { encoding: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::PathNotFound("missing".to_string()).to_string(),
            "Path 'missing' does not exist"
        );
        let err = Error::EncoderUnavailable {
            encoding: "o200k_base".to_string(),
            reason: "download failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load encoding o200k_base: download failed"
        );
    }
}
