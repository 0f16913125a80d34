use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;

use crate::adapters::build_ocr_service;
use crate::core::errors::RecognitionError;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{EngineSettings, RecognitionInput, RecognitionResult, RecognizeOptions};
use crate::global_constants::{
    ERROR_CONTEXT_CREATE_ENGINE, ERROR_CONTEXT_DECODE_IMAGE, ERROR_CONTEXT_EMPTY_BUFFER,
    ERROR_CONTEXT_READ_IMAGE, ERROR_CONTEXT_RECOGNITION, LOG_TAG_RECOGNIZE,
};

/// Turns a path or an encoded buffer into text through an [`OcrService`].
///
/// Holds no per-call state, so one facade can serve concurrent calls.
pub struct RecognitionFacade {
    ocr_service: Arc<dyn OcrService>,
    default_options: RecognizeOptions,
}

impl RecognitionFacade {
    pub fn new(ocr_service: Arc<dyn OcrService>, default_options: RecognizeOptions) -> Self {
        Self {
            ocr_service,
            default_options,
        }
    }

    pub async fn from_settings(settings: &EngineSettings) -> Result<Self, RecognitionError> {
        let ocr_service = build_ocr_service(settings)
            .await
            .map_err(|error| RecognitionError::engine_failure(ERROR_CONTEXT_CREATE_ENGINE, &error))?;

        Ok(Self::new(ocr_service, settings.default_options()))
    }

    pub fn engine_name(&self) -> &'static str {
        self.ocr_service.name()
    }

    pub fn default_options(&self) -> &RecognizeOptions {
        &self.default_options
    }

    pub async fn recognize(
        &self,
        input: impl Into<RecognitionInput>,
        options: Option<RecognizeOptions>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let input = input.into();
        let options = options.unwrap_or_else(|| self.default_options.clone());

        with_timeout(options.timeout, async {
            let image = load_image(input).await?;
            self.recognize_image(&image, &options).await
        })
        .await
    }

    pub async fn recognize_image(
        &self,
        image: &DynamicImage,
        options: &RecognizeOptions,
    ) -> Result<RecognitionResult, RecognitionError> {
        log::info!(
            "{} Recognizing {}x{} image with {}",
            LOG_TAG_RECOGNIZE,
            image.width(),
            image.height(),
            self.ocr_service.name()
        );

        let ocr_result = self
            .ocr_service
            .extract_text_from_image(image, options)
            .await
            .map_err(|error| RecognitionError::engine_failure(ERROR_CONTEXT_RECOGNITION, &error))?;

        let result = ocr_result.into_recognition_result(options.confidence_threshold);
        log::debug!(
            "{} Recognized {} characters, confidence {:.3}",
            LOG_TAG_RECOGNIZE,
            result.text.len(),
            result.confidence
        );

        Ok(result)
    }
}

/// Reads and decodes the input. A path is read into memory first so both
/// variants go through the same decoder.
pub async fn load_image(input: RecognitionInput) -> Result<DynamicImage, RecognitionError> {
    let bytes = match input {
        RecognitionInput::Path(path) => {
            log::debug!("{} Reading image file {:?}", LOG_TAG_RECOGNIZE, path);
            tokio::fs::read(&path).await.map_err(|error| {
                RecognitionError::invalid_input(
                    &format!("{} {:?}", ERROR_CONTEXT_READ_IMAGE, path),
                    error,
                )
            })?
        }
        RecognitionInput::Bytes(bytes) => bytes,
    };

    if bytes.is_empty() {
        return Err(RecognitionError::InvalidInput(
            ERROR_CONTEXT_EMPTY_BUFFER.to_string(),
        ));
    }

    log::debug!("{} Decoding {} bytes", LOG_TAG_RECOGNIZE, bytes.len());

    tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|error| {
            RecognitionError::EngineFailure(format!("Image decoder panicked: {}", error))
        })?
        .map_err(|error| RecognitionError::invalid_input(ERROR_CONTEXT_DECODE_IMAGE, error))
}

pub(crate) async fn with_timeout<T, F>(
    timeout: Option<Duration>,
    operation: F,
) -> Result<T, RecognitionError>
where
    F: Future<Output = Result<T, RecognitionError>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, operation).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("{} Recognition timed out after {:?}", LOG_TAG_RECOGNIZE, limit);
                Err(RecognitionError::Timeout(limit))
            }
        },
        None => operation.await,
    }
}
