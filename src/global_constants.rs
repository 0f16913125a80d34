pub const APPLICATION_DIR_NAME: &str = "ocr-recognize";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const LOG_TAG_RECOGNIZE: &str = "[RECOGNIZE]";

pub const ENV_PROVIDER: &str = "OCR_RECOGNIZE_PROVIDER";
pub const ENV_MODELS_DIR: &str = "OCR_RECOGNIZE_MODELS_DIR";

pub const DEFAULT_MODELS_DIR: &str = "models/ocrs";
pub const DETECTION_MODEL_FILE_NAME: &str = "text-detection.rten";
pub const RECOGNITION_MODEL_FILE_NAME: &str = "text-recognition.rten";

pub const DETECTION_MODEL_URL: &str =
    "https://huggingface.co/robertknight/ocrs/resolve/main/text-detection-ssfbcj81.rten";
pub const RECOGNITION_MODEL_URL: &str =
    "https://huggingface.co/robertknight/ocrs/resolve/main/text-rec-checkpoint-s52qdbqt.rten";

pub const ERROR_CONTEXT_READ_IMAGE: &str = "Failed to read image file";
pub const ERROR_CONTEXT_DECODE_IMAGE: &str = "Failed to decode image buffer";
pub const ERROR_CONTEXT_EMPTY_BUFFER: &str = "Image buffer is empty";
pub const ERROR_CONTEXT_CREATE_ENGINE: &str = "Failed to create OCR engine";
pub const ERROR_CONTEXT_RECOGNITION: &str = "Recognition failed";
