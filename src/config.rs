//! Engine configuration
//!
//! Environment variables (all optional):
//! - `CROP_DATA_DIR` - base directory, default `data`
//! - `CROP_CORPUS_PATH` - historical CSV, default `$CROP_DATA_DIR/crop_yield.csv`
//! - `CROP_MODEL_DIR` - model artifacts, default `$CROP_DATA_DIR/models`
//! - `CROP_CATALOG_PATH` - JSON catalog override, built-in catalog when unset

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const CORPUS_FILE: &str = "crop_yield.csv";
pub const MODEL_SUBDIR: &str = "models";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub data_dir: PathBuf,
    pub corpus_path: PathBuf,
    pub model_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Default layout under `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            corpus_path: data_dir.join(CORPUS_FILE),
            model_dir: data_dir.join(MODEL_SUBDIR),
            catalog_path: None,
            data_dir,
        }
    }

    pub fn from_env() -> Self {
        let data_dir = env::var("CROP_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let mut config = Self::new(data_dir);

        if let Ok(path) = env::var("CROP_CORPUS_PATH") {
            config.corpus_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("CROP_MODEL_DIR") {
            config.model_dir = PathBuf::from(path);
        }
        config.catalog_path = env::var("CROP_CATALOG_PATH").ok().map(PathBuf::from);

        config
    }

    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
