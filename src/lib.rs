//! Text recognition for images given as a file path or an encoded buffer.
//!
//! ```no_run
//! # async fn run() -> Result<(), ocr_recognize::RecognitionError> {
//! let from_path = ocr_recognize::recognize("test_ocr.jpg", None).await?;
//! let bytes = std::fs::read("test_ocr.jpg").unwrap();
//! let from_bytes = ocr_recognize::recognize(bytes, None).await?;
//! assert_eq!(from_path.text, from_bytes.text);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod core;
mod global_constants;


pub use crate::adapters::{build_ocr_service, OcrsService, TesseractOcrService};
pub use crate::core::errors::RecognitionError;
pub use crate::core::interfaces::adapters::OcrService;
pub use crate::core::models::{
    BoundingBox, DetectedText, DetectedWord, EngineProvider, EngineSettings, Language,
    OcrResult, RecognitionInput, RecognitionResult, RecognizeOptions,
};
pub use crate::core::orchestrators::{load_image, RecognitionFacade};

use tokio::time::Instant;

use crate::core::orchestrators::with_timeout;
use crate::global_constants::LOG_TAG_RECOGNIZE;

/// Recognizes text with the engine described by [`EngineSettings::load`].
///
/// The input is read and decoded before settings are loaded or an engine is
/// created, so a bad path or buffer is reported as
/// [`RecognitionError::InvalidInput`] even when the settings file is broken or
/// no engine is installed.
pub async fn recognize(
    input: impl Into<RecognitionInput>,
    options: Option<RecognizeOptions>,
) -> Result<RecognitionResult, RecognitionError> {
    recognize_with_settings(input, options, EngineSettings::load).await
}

/// Same as [`recognize`], with the settings supplied by `load_settings`.
///
/// A caller timeout covers the whole call. Without caller options the
/// settings timeout covers engine setup and recognition only.
pub async fn recognize_with_settings<L>(
    input: impl Into<RecognitionInput>,
    options: Option<RecognizeOptions>,
    load_settings: L,
) -> Result<RecognitionResult, RecognitionError>
where
    L: FnOnce() -> anyhow::Result<EngineSettings> + Send,
{
    let started = Instant::now();
    let caller_timeout = options.as_ref().and_then(|options| options.timeout);

    let image = with_timeout(caller_timeout, load_image(input.into())).await?;

    let settings = load_settings().map_err(|error| {
        RecognitionError::engine_failure("Failed to load engine settings", &error)
    })?;
    let options = options.unwrap_or_else(|| settings.default_options());

    log::info!("{} Recognize requested ({})", LOG_TAG_RECOGNIZE, settings.provider);

    let remaining = match caller_timeout {
        Some(limit) => Some(limit.saturating_sub(started.elapsed())),
        None => options.timeout,
    };

    with_timeout(remaining, async {
        let facade = RecognitionFacade::from_settings(&settings).await?;
        facade.recognize_image(&image, &options).await
    })
    .await
    .map_err(|error| match (error, caller_timeout) {
        (RecognitionError::Timeout(_), Some(limit)) => RecognitionError::Timeout(limit),
        (error, _) => error,
    })
}

/// Installs `env_logger` honouring `RUST_LOG`, defaulting to `info`.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
