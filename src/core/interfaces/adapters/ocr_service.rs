use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

use crate::core::models::{OcrResult, RecognizeOptions};

#[async_trait]
pub trait OcrService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract_text_from_image(
        &self,
        image: &DynamicImage,
        options: &RecognizeOptions,
    ) -> Result<OcrResult>;
}
