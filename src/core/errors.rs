use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The path could not be read or the bytes are not a decodable image.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The OCR engine could not be created or failed while recognizing.
    #[error("engine failure: {0}")]
    EngineFailure(String),

    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),
}

impl RecognitionError {
    pub(crate) fn invalid_input(context: &str, error: impl std::fmt::Display) -> Self {
        RecognitionError::InvalidInput(format!("{}: {}", context, error))
    }

    pub(crate) fn engine_failure(context: &str, error: &anyhow::Error) -> Self {
        RecognitionError::EngineFailure(format!("{}: {:#}", context, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_engine_failure_keeps_the_whole_context_chain() {
        let error = Err::<(), _>(anyhow::anyhow!("model file truncated"))
            .context("Failed to load text detection model")
            .unwrap_err();

        let failure = RecognitionError::engine_failure("Failed to create OCR engine", &error);

        assert_eq!(
            failure.to_string(),
            "engine failure: Failed to create OCR engine: Failed to load text detection model: model file truncated"
        );
    }

    #[test]
    fn test_timeout_message_mentions_duration() {
        let error = RecognitionError::Timeout(Duration::from_millis(250));

        assert_eq!(error.to_string(), "recognition timed out after 250ms");
    }
}
