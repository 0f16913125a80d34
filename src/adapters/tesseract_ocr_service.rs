use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use rusty_tesseract::{Args, Image as TesseractImage};

use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{DetectedText, DetectedWord, OcrResult, RecognizeOptions};

const WORD_LEVEL: i32 = 5;

pub struct TesseractOcrService;

#[derive(Debug, Clone, PartialEq)]
struct TesseractWord {
    line_key: (i32, i32, i32, i32),
    text: String,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    confidence: f32,
}

impl TesseractWord {
    fn from_data(data: &rusty_tesseract::Data) -> Option<Self> {
        if data.level != WORD_LEVEL || data.conf < 0.0 || data.text.trim().is_empty() {
            return None;
        }

        Some(Self {
            line_key: (data.page_num, data.block_num, data.par_num, data.line_num),
            text: data.text.trim().to_string(),
            left: data.left as f32,
            top: data.top as f32,
            width: data.width as f32,
            height: data.height as f32,
            confidence: (data.conf / 100.0).clamp(0.0, 1.0),
        })
    }
}

impl TesseractOcrService {
    pub fn build() -> Result<Self> {
        log::info!("[TESSERACT_OCR] Initializing Tesseract OCR service");
        let version = rusty_tesseract::get_tesseract_version()
            .context("Tesseract is not installed or not on PATH")?;
        log::debug!("[TESSERACT_OCR] Found tesseract {}", version.trim());
        Ok(Self)
    }

    fn build_args(options: &RecognizeOptions) -> Args {
        let lang = options
            .effective_languages()
            .iter()
            .map(|language| language.tesseract_code())
            .collect::<Vec<_>>()
            .join("+");

        Args {
            lang,
            ..Args::default()
        }
    }

    fn group_words_into_lines(words: Vec<TesseractWord>) -> Vec<DetectedText> {
        let mut grouped: Vec<Vec<TesseractWord>> = Vec::new();

        for word in words {
            match grouped.last_mut() {
                Some(line) if line[0].line_key == word.line_key => line.push(word),
                _ => grouped.push(vec![word]),
            }
        }

        grouped
            .into_iter()
            .map(|line_words| {
                let left = line_words.iter().map(|w| w.left).fold(f32::MAX, f32::min);
                let top = line_words.iter().map(|w| w.top).fold(f32::MAX, f32::min);
                let right = line_words
                    .iter()
                    .map(|w| w.left + w.width)
                    .fold(f32::MIN, f32::max);
                let bottom = line_words
                    .iter()
                    .map(|w| w.top + w.height)
                    .fold(f32::MIN, f32::max);
                let confidence = line_words.iter().map(|w| w.confidence).sum::<f32>()
                    / line_words.len() as f32;
                let content = line_words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let words = line_words
                    .into_iter()
                    .map(|w| DetectedWord::new(w.text, w.left, w.top, w.width, w.height))
                    .collect();

                DetectedText::new(
                    content,
                    left,
                    top,
                    right - left,
                    bottom - top,
                    confidence,
                    words,
                )
            })
            .collect()
    }

    fn recognize_blocking(image: &DynamicImage, args: &Args) -> Result<OcrResult> {
        let tesseract_image = TesseractImage::from_dynamic_image(image)
            .context("Failed to create Tesseract image")?;

        let data_output = rusty_tesseract::image_to_data(&tesseract_image, args)
            .context("Failed to extract text from image")?;

        let words = data_output
            .data
            .iter()
            .filter_map(TesseractWord::from_data)
            .collect();
        let text_blocks = Self::group_words_into_lines(words);

        let full_text = if text_blocks.is_empty() {
            rusty_tesseract::image_to_string(&tesseract_image, args)
                .context("Failed to extract text from image")?
        } else {
            text_blocks
                .iter()
                .map(|block| block.content.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(OcrResult {
            text_blocks,
            full_text,
        })
    }
}

#[async_trait]
impl OcrService for TesseractOcrService {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn extract_text_from_image(
        &self,
        image: &DynamicImage,
        options: &RecognizeOptions,
    ) -> Result<OcrResult> {
        log::info!("[TESSERACT_OCR] Starting text extraction");
        log::debug!(
            "[TESSERACT_OCR] Image dimensions: {}x{}",
            image.width(),
            image.height()
        );

        let args = Self::build_args(options);
        log::debug!("[TESSERACT_OCR] Languages: {}", args.lang);

        let owned_image = image.clone();
        let ocr_result =
            tokio::task::spawn_blocking(move || Self::recognize_blocking(&owned_image, &args))
                .await
                .context("Tesseract worker panicked")??;

        log::info!(
            "[TESSERACT_OCR] Text extraction complete. Extracted {} characters in {} lines",
            ocr_result.full_text.len(),
            ocr_result.text_blocks.len()
        );
        log::debug!("[TESSERACT_OCR] Extracted text: {}", ocr_result.full_text);

        Ok(ocr_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Language;

    fn word(line: i32, text: &str, left: f32, confidence: f32) -> TesseractWord {
        TesseractWord {
            line_key: (1, 1, 1, line),
            text: text.to_string(),
            left,
            top: 10.0 * line as f32,
            width: 20.0,
            height: 8.0,
            confidence,
        }
    }

    #[test]
    fn test_build_args_joins_tesseract_language_codes() {
        let options = RecognizeOptions::default()
            .languages(vec![Language::Korean, Language::English]);

        let args = TesseractOcrService::build_args(&options);

        assert_eq!(args.lang, "kor+eng");
    }

    #[test]
    fn test_build_args_defaults_to_english_when_no_language_given() {
        let options = RecognizeOptions::default().languages(vec![]);

        assert_eq!(TesseractOcrService::build_args(&options).lang, "eng");
    }

    #[test]
    fn test_words_on_the_same_line_are_merged() {
        let lines = TesseractOcrService::group_words_into_lines(vec![
            word(1, "Hello", 0.0, 0.9),
            word(1, "World", 30.0, 0.7),
            word(2, "Again", 0.0, 0.5),
        ]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content, "Hello World");
        assert_eq!(lines[0].words.len(), 2);
        assert_eq!(lines[0].bounds.x, 0.0);
        assert_eq!(lines[0].bounds.width, 50.0);
        assert!((lines[0].confidence - 0.8).abs() < 1e-6);
        assert_eq!(lines[1].content, "Again");
        assert_eq!(lines[1].bounds.y, 20.0);
    }

    fn data_row(level: i32, line_num: i32, text: &str, conf: f32) -> rusty_tesseract::Data {
        rusty_tesseract::Data {
            level,
            page_num: 1,
            block_num: 1,
            par_num: 1,
            line_num,
            word_num: 1,
            left: 12,
            top: 34,
            width: 56,
            height: 18,
            conf,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_word_row_maps_to_word_with_scaled_confidence() {
        let mapped = TesseractWord::from_data(&data_row(5, 3, " Invoice ", 87.0)).unwrap();

        assert_eq!(mapped.line_key, (1, 1, 1, 3));
        assert_eq!(mapped.text, "Invoice");
        assert_eq!(mapped.left, 12.0);
        assert_eq!(mapped.top, 34.0);
        assert_eq!(mapped.width, 56.0);
        assert_eq!(mapped.height, 18.0);
        assert!((mapped.confidence - 0.87).abs() < 1e-6);
    }

    #[test]
    fn test_rows_above_word_level_are_skipped() {
        assert_eq!(TesseractWord::from_data(&data_row(4, 1, "Invoice", 87.0)), None);
        assert_eq!(TesseractWord::from_data(&data_row(1, 1, "", -1.0)), None);
    }

    #[test]
    fn test_rows_without_confidence_are_skipped() {
        assert_eq!(TesseractWord::from_data(&data_row(5, 1, "Invoice", -1.0)), None);
    }

    #[test]
    fn test_blank_word_rows_are_skipped() {
        assert_eq!(TesseractWord::from_data(&data_row(5, 1, "   ", 95.0)), None);
    }

    #[test]
    fn test_confidence_above_hundred_is_clamped() {
        let mapped = TesseractWord::from_data(&data_row(5, 1, "x", 140.0)).unwrap();

        assert_eq!(mapped.confidence, 1.0);
    }

    #[test]
    fn test_no_words_yields_no_lines() {
        assert!(TesseractOcrService::group_words_into_lines(vec![]).is_empty());
    }
}
