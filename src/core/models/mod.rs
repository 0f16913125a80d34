mod engine_settings;
mod ocr;
mod recognition_input;
mod recognize_options;

pub use engine_settings::{EngineProvider, EngineSettings};
pub use ocr::{BoundingBox, DetectedText, DetectedWord, OcrResult, RecognitionResult};
pub use recognition_input::RecognitionInput;
pub use recognize_options::{Language, RecognizeOptions};
