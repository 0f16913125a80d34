mod engine_factory;
mod ocrs_service;
mod tesseract_ocr_service;

pub use engine_factory::{build_ocr_service, resolve_provider};
pub use ocrs_service::OcrsService;
pub use tesseract_ocr_service::TesseractOcrService;
