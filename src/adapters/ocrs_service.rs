use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use rten_imageproc::BoundingRect;

use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{
    DetectedText, DetectedWord, EngineSettings, Language, OcrResult, RecognizeOptions,
};
use crate::global_constants;

pub struct OcrsService {
    engine: Arc<OcrEngine>,
}

impl OcrsService {
    pub async fn new(settings: &EngineSettings) -> Result<Self> {
        log::info!("[OCRS] Initializing OCRS service");
        log::debug!("[OCRS] Models directory: {:?}", settings.models_dir);

        let detection_model_path = settings.detection_model_path();
        let recognition_model_path = settings.recognition_model_path();

        if settings.download_missing_models {
            tokio::fs::create_dir_all(&settings.models_dir)
                .await
                .context("Failed to create models directory")?;
            Self::ensure_model_exists(&detection_model_path, global_constants::DETECTION_MODEL_URL)
                .await?;
            Self::ensure_model_exists(
                &recognition_model_path,
                global_constants::RECOGNITION_MODEL_URL,
            )
            .await?;
        }

        let engine = tokio::task::spawn_blocking(move || {
            Self::load_engine(&detection_model_path, &recognition_model_path)
        })
        .await
        .context("OCRS model loader panicked")??;

        log::info!("[OCRS] Service initialized successfully");
        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    fn load_engine(detection_model_path: &Path, recognition_model_path: &Path) -> Result<OcrEngine> {
        log::debug!("[OCRS] Loading models...");
        let detection_model = Model::load_file(detection_model_path)
            .with_context(|| format!("Failed to load text detection model {:?}", detection_model_path))?;
        let recognition_model = Model::load_file(recognition_model_path).with_context(|| {
            format!("Failed to load text recognition model {:?}", recognition_model_path)
        })?;

        OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .context("Failed to create OCR engine")
    }

    async fn ensure_model_exists(path: &Path, url: &str) -> Result<()> {
        if !path.exists() {
            log::info!("[OCRS] Downloading model from {} to {:?}", url, path);
            let response = reqwest::get(url)
                .await
                .and_then(|response| response.error_for_status())
                .context("Failed to download model")?;
            let bytes = response.bytes().await.context("Failed to get model bytes")?;
            tokio::fs::write(path, bytes)
                .await
                .context("Failed to write model file")?;
            log::info!("[OCRS] Model downloaded successfully");
        }
        Ok(())
    }

    fn recognize_blocking(engine: &OcrEngine, image: &DynamicImage) -> Result<OcrResult> {
        let rgb_image = image.to_rgb8();
        let ocr_input = engine.prepare_input(
            ImageSource::from_bytes(rgb_image.as_raw(), rgb_image.dimensions())
                .context("Failed to build OCR input image")?,
        )?;

        let word_rects = engine.detect_words(&ocr_input)?;
        let line_rects = engine.find_text_lines(&ocr_input, &word_rects);
        let line_texts = engine.recognize_text(&ocr_input, &line_rects)?;

        let mut detected_texts = Vec::new();

        for (i, line_opt) in line_texts.iter().enumerate() {
            let Some(line) = line_opt else {
                continue;
            };

            let text = line.to_string();
            if text.trim().is_empty() {
                continue;
            }

            let Some(words_in_line) = line_rects.get(i) else {
                continue;
            };
            let Some(first_word) = words_in_line.first() else {
                continue;
            };

            let mut bbox = first_word.bounding_rect();
            for word in words_in_line.iter().skip(1) {
                bbox = bbox.union(word.bounding_rect());
            }

            let detected_words = words_in_line
                .iter()
                .zip(text.split_whitespace())
                .map(|(word_rect, word_text)| {
                    let word_bbox = word_rect.bounding_rect();
                    DetectedWord::new(
                        word_text.to_string(),
                        word_bbox.left() as f32,
                        word_bbox.top() as f32,
                        word_bbox.width() as f32,
                        word_bbox.height() as f32,
                    )
                })
                .collect::<Vec<_>>();

            log::debug!(
                "[OCRS] Text block {}: '{}' at ({},{}) {}x{} with {} words",
                i,
                text,
                bbox.left(),
                bbox.top(),
                bbox.width(),
                bbox.height(),
                detected_words.len()
            );

            // ocrs does not report per-line confidence
            detected_texts.push(DetectedText::new(
                text,
                bbox.left() as f32,
                bbox.top() as f32,
                bbox.width() as f32,
                bbox.height() as f32,
                1.0,
                detected_words,
            ));
        }

        let full_text = detected_texts
            .iter()
            .map(|block| block.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(OcrResult {
            text_blocks: detected_texts,
            full_text,
        })
    }
}

#[async_trait]
impl OcrService for OcrsService {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    async fn extract_text_from_image(
        &self,
        image: &DynamicImage,
        options: &RecognizeOptions,
    ) -> Result<OcrResult> {
        log::info!("[OCRS] Starting text extraction");
        log::debug!("[OCRS] Image dimensions: {}x{}", image.width(), image.height());

        let languages = options.effective_languages();
        if languages.iter().any(|language| *language != Language::English) {
            log::warn!(
                "[OCRS] Models are trained on English text, requested languages {:?} may recognize poorly",
                languages
            );
        }

        let engine = Arc::clone(&self.engine);
        let owned_image = image.clone();
        let ocr_result =
            tokio::task::spawn_blocking(move || Self::recognize_blocking(&engine, &owned_image))
                .await
                .context("OCRS worker panicked")??;

        log::info!(
            "[OCRS] Extraction complete. Found {} text blocks",
            ocr_result.text_blocks.len()
        );

        Ok(ocr_result)
    }
}
