use std::path::{Path, PathBuf};

/// Either a file on disk or an already encoded image (JPEG, PNG, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<&str> for RecognitionInput {
    fn from(path: &str) -> Self {
        RecognitionInput::Path(PathBuf::from(path))
    }
}

impl From<String> for RecognitionInput {
    fn from(path: String) -> Self {
        RecognitionInput::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for RecognitionInput {
    fn from(path: PathBuf) -> Self {
        RecognitionInput::Path(path)
    }
}

impl From<&Path> for RecognitionInput {
    fn from(path: &Path) -> Self {
        RecognitionInput::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for RecognitionInput {
    fn from(bytes: Vec<u8>) -> Self {
        RecognitionInput::Bytes(bytes)
    }
}

impl From<&[u8]> for RecognitionInput {
    fn from(bytes: &[u8]) -> Self {
        RecognitionInput::Bytes(bytes.to_vec())
    }
}
