use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedWord {
    pub content: String,
    pub bounds: BoundingBox,
}

impl DetectedWord {
    pub fn new(content: String, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            content,
            bounds: BoundingBox {
                x,
                y,
                width,
                height,
            },
        }
    }
}

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedText {
    pub content: String,
    pub bounds: BoundingBox,
    /// Engine confidence normalized to `0.0..=1.0`.
    pub confidence: f32,
    pub words: Vec<DetectedWord>,
}

impl DetectedText {
    pub fn new(
        content: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        confidence: f32,
        words: Vec<DetectedWord>,
    ) -> Self {
        Self {
            content,
            bounds: BoundingBox {
                x,
                y,
                width,
                height,
            },
            confidence,
            words,
        }
    }
}

/// Raw output of an [`OcrService`](crate::core::interfaces::adapters::OcrService).
#[derive(Debug, Clone, Default)]
pub struct OcrResult {
    pub text_blocks: Vec<DetectedText>,
    pub full_text: String,
}

/// What a caller of `recognize` gets back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub text: String,
    pub confidence: f32,
    pub text_blocks: Vec<DetectedText>,
}

impl OcrResult {
    /// Drops blocks under `confidence_threshold` and rebuilds the text from
    /// what is left. Engines that report no blocks keep their full text.
    pub fn into_recognition_result(self, confidence_threshold: f32) -> RecognitionResult {
        if self.text_blocks.is_empty() {
            return RecognitionResult {
                text: self.full_text,
                confidence: 1.0,
                text_blocks: Vec::new(),
            };
        }

        let confidence_threshold = if confidence_threshold.is_nan() {
            0.0
        } else {
            confidence_threshold
        };

        let kept_blocks: Vec<DetectedText> = self
            .text_blocks
            .into_iter()
            .filter(|block| block.confidence >= confidence_threshold)
            .collect();

        let text = kept_blocks
            .iter()
            .map(|block| block.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let confidence = if kept_blocks.is_empty() {
            0.0
        } else {
            kept_blocks.iter().map(|block| block.confidence).sum::<f32>()
                / kept_blocks.len() as f32
        };

        RecognitionResult {
            text,
            confidence,
            text_blocks: kept_blocks,
        }
    }
}
