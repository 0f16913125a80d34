mod recognition_facade;

pub(crate) use recognition_facade::with_timeout;
pub use recognition_facade::{load_image, RecognitionFacade};
