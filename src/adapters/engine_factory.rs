use std::sync::Arc;

use anyhow::Result;

use crate::adapters::{OcrsService, TesseractOcrService};
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{EngineProvider, EngineSettings};

/// Resolves `Auto` to a concrete provider: ocrs when both model files are on
/// disk (or may be downloaded), Tesseract otherwise.
pub fn resolve_provider(settings: &EngineSettings) -> EngineProvider {
    match settings.provider {
        EngineProvider::Auto if settings.has_ocrs_models() || settings.download_missing_models => {
            EngineProvider::Ocrs
        }
        EngineProvider::Auto => EngineProvider::Tesseract,
        provider => provider,
    }
}

pub async fn build_ocr_service(settings: &EngineSettings) -> Result<Arc<dyn OcrService>> {
    let provider = resolve_provider(settings);
    log::info!(
        "[ENGINE_FACTORY] Building {} engine (configured: {})",
        provider,
        settings.provider
    );

    let service: Arc<dyn OcrService> = match provider {
        EngineProvider::Ocrs => Arc::new(OcrsService::new(settings).await?) as Arc<dyn OcrService>,
        EngineProvider::Tesseract | EngineProvider::Auto => {
            Arc::new(TesseractOcrService::build()?) as Arc<dyn OcrService>
        }
    };

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_without_models(provider: EngineProvider) -> EngineSettings {
        EngineSettings {
            provider,
            models_dir: std::env::temp_dir().join(format!("ocr-models-{}", uuid::Uuid::new_v4())),
            ..EngineSettings::default()
        }
    }

    #[test]
    fn test_auto_without_models_resolves_to_tesseract() {
        let settings = settings_without_models(EngineProvider::Auto);

        assert_eq!(resolve_provider(&settings), EngineProvider::Tesseract);
    }

    #[test]
    fn test_auto_with_model_download_resolves_to_ocrs() {
        let settings = EngineSettings {
            download_missing_models: true,
            ..settings_without_models(EngineProvider::Auto)
        };

        assert_eq!(resolve_provider(&settings), EngineProvider::Ocrs);
    }

    #[test]
    fn test_auto_with_models_on_disk_resolves_to_ocrs() {
        let settings = settings_without_models(EngineProvider::Auto);
        std::fs::create_dir_all(&settings.models_dir).unwrap();
        std::fs::write(settings.detection_model_path(), b"model").unwrap();
        std::fs::write(settings.recognition_model_path(), b"model").unwrap();

        let provider = resolve_provider(&settings);
        std::fs::remove_dir_all(&settings.models_dir).ok();

        assert_eq!(provider, EngineProvider::Ocrs);
    }

    #[test]
    fn test_explicit_provider_is_kept() {
        assert_eq!(
            resolve_provider(&settings_without_models(EngineProvider::Ocrs)),
            EngineProvider::Ocrs
        );
        assert_eq!(
            resolve_provider(&settings_without_models(EngineProvider::Tesseract)),
            EngineProvider::Tesseract
        );
    }

    #[tokio::test]
    async fn test_ocrs_without_models_fails_to_build() {
        let settings = settings_without_models(EngineProvider::Ocrs);

        assert!(build_ocr_service(&settings).await.is_err());
    }
}
