//! Engine Context
//!
//! Everything loaded once at startup and shared read-only by all requests:
//! the insight table, the model bundle and the crop catalog.
//!
//! Initialization never fails. Each load failure degrades one capability:
//! - corpus → empty insight table (benchmarks fall back to defaults)
//! - models → fallback-only for the life of the context
//! - catalog override → built-in catalog

use crate::catalog::CropCatalog;
use crate::config::EngineConfig;
use crate::data::HistoricalCorpus;
use crate::insights::InsightTable;
use crate::models::ModelBundle;
use std::time::Instant;

pub struct EngineContext {
    insights: InsightTable,
    models: Option<ModelBundle>,
    catalog: CropCatalog,
}

impl EngineContext {
    /// Load corpus, models and catalog
    pub fn initialize(config: &EngineConfig) -> Self {
        let start = Instant::now();

        // STEP 1: Historical corpus → insights
        tracing::info!("Loading historical corpus from {}", config.corpus_path.display());
        let insights = match HistoricalCorpus::load(&config.corpus_path) {
            Ok(corpus) => {
                let t0 = Instant::now();
                let insights = InsightTable::from_corpus(&corpus);
                tracing::info!(
                    "Analyzed {} records into insights for {} crops in {:?}",
                    corpus.len(),
                    insights.len(),
                    t0.elapsed()
                );
                insights
            }
            Err(e) => {
                tracing::warn!("CorpusLoadError: {}; continuing with default benchmarks", e);
                InsightTable::empty()
            }
        };

        // STEP 2: Model artifacts
        tracing::info!("Loading model artifacts from {}", config.model_dir.display());
        let models = match ModelBundle::load(&config.model_dir) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                tracing::error!("ModelLoadError: {}; serving fallback recommendations only", e);
                None
            }
        };

        // STEP 3: Catalog
        let catalog = match &config.catalog_path {
            Some(path) => CropCatalog::load(path).unwrap_or_else(|e| {
                tracing::warn!("{:#}; using built-in crop catalog", e);
                CropCatalog::builtin()
            }),
            None => CropCatalog::builtin(),
        };

        tracing::info!(
            "Engine context ready in {:?} ({} crop insights, {} catalog profiles, models {})",
            start.elapsed(),
            insights.len(),
            catalog.len(),
            if models.is_some() { "loaded" } else { "unavailable" }
        );

        Self { insights, models, catalog }
    }

    /// Assemble from already-built parts
    pub fn from_parts(insights: InsightTable, models: Option<ModelBundle>, catalog: CropCatalog) -> Self {
        Self { insights, models, catalog }
    }

    pub fn insights(&self) -> &InsightTable {
        &self.insights
    }

    pub fn models(&self) -> Option<&ModelBundle> {
        self.models.as_ref()
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn is_fallback_only(&self) -> bool {
        self.models.is_none()
    }
}
