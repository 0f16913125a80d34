use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::models::{Language, RecognizeOptions};
use crate::global_constants;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EngineProvider {
    #[default]
    Auto,
    Tesseract,
    Ocrs,
}

impl EngineProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(EngineProvider::Auto),
            "tesseract" => Some(EngineProvider::Tesseract),
            "ocrs" => Some(EngineProvider::Ocrs),
            _ => None,
        }
    }
}

impl fmt::Display for EngineProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineProvider::Auto => write!(f, "Auto"),
            EngineProvider::Tesseract => write!(f, "Tesseract"),
            EngineProvider::Ocrs => write!(f, "Ocrs"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSettings {
    #[serde(default)]
    pub provider: EngineProvider,
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
    #[serde(default = "default_languages")]
    pub default_languages: Vec<String>,
    #[serde(default)]
    pub confidence_threshold: f32,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub download_missing_models: bool,
}

fn default_models_dir() -> PathBuf {
    PathBuf::from(global_constants::DEFAULT_MODELS_DIR)
}

fn default_languages() -> Vec<String> {
    vec![Language::English.code().to_string()]
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            provider: EngineProvider::default(),
            models_dir: default_models_dir(),
            default_languages: default_languages(),
            confidence_threshold: 0.0,
            timeout_seconds: None,
            download_missing_models: false,
        }
    }
}

impl EngineSettings {
    /// Reads the settings file from the user config directory, then applies
    /// environment overrides. A missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = match Self::get_settings_file_path() {
            Ok(settings_path) => Self::load_from_path(&settings_path)?,
            Err(error) => {
                log::warn!("[SETTINGS] {}, using defaults", error);
                Self::default()
            }
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn load_from_path(settings_path: &Path) -> anyhow::Result<Self> {
        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read settings {:?}", settings_path))?;
        let settings: EngineSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings {:?}", settings_path))?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Provider: {}", settings.provider);
        log::debug!("[SETTINGS] Models directory: {:?}", settings.models_dir);

        Ok(settings)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(global_constants::ENV_PROVIDER) {
            match EngineProvider::parse(&value) {
                Some(provider) => {
                    log::debug!("[SETTINGS] Provider overridden to {}", provider);
                    self.provider = provider;
                }
                None => log::warn!("[SETTINGS] Ignoring unknown provider '{}'", value),
            }
        }

        if let Some(value) = lookup(global_constants::ENV_MODELS_DIR) {
            self.models_dir = PathBuf::from(value);
        }
    }

    pub fn default_options(&self) -> RecognizeOptions {
        let options = RecognizeOptions::default()
            .language_codes(&self.default_languages)
            .confidence_threshold(self.confidence_threshold);

        match self.timeout_seconds {
            Some(seconds) => options.timeout(Duration::from_secs(seconds)),
            None => options,
        }
    }

    pub fn detection_model_path(&self) -> PathBuf {
        self.models_dir.join(global_constants::DETECTION_MODEL_FILE_NAME)
    }

    pub fn recognition_model_path(&self) -> PathBuf {
        self.models_dir.join(global_constants::RECOGNITION_MODEL_FILE_NAME)
    }

    pub fn has_ocrs_models(&self) -> bool {
        self.detection_model_path().exists() && self.recognition_model_path().exists()
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}
