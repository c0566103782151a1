//! Historical Corpus Loading
//!
//! Reads the historical farm-record CSV with Polars and materializes it into
//! typed [`HistoricalRecord`]s. Loaded once at startup; immutable afterward.
//!
//! Expected columns (as produced by the yield survey export):
//! `Region, Soil_Type, Crop, Rainfall_mm, Temperature_Celsius, Fertilizer_Used,
//! Irrigation_Used, Weather_Condition, Days_to_Harvest, Yield_tons_per_hectare`

use crate::error::CorpusLoadError;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const COL_REGION: &str = "Region";
pub const COL_SOIL: &str = "Soil_Type";
pub const COL_CROP: &str = "Crop";
pub const COL_RAINFALL: &str = "Rainfall_mm";
pub const COL_TEMPERATURE: &str = "Temperature_Celsius";
pub const COL_FERTILIZER: &str = "Fertilizer_Used";
pub const COL_IRRIGATION: &str = "Irrigation_Used";
pub const COL_WEATHER: &str = "Weather_Condition";
pub const COL_HARVEST_DAYS: &str = "Days_to_Harvest";
pub const COL_YIELD: &str = "Yield_tons_per_hectare";

/// One historical farm observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub crop: String,
    pub region: String,
    pub soil_type: String,
    pub weather_condition: String,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub fertilizer_used: bool,
    pub irrigation_used: bool,
    pub yield_tons_per_ha: f64,
    pub days_to_harvest: f64,
}

/// The full historical record set
#[derive(Debug, Clone, Default)]
pub struct HistoricalCorpus {
    records: Vec<HistoricalRecord>,
}

impl HistoricalCorpus {
    /// Wrap already-materialized records
    pub fn from_records(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    /// Load the corpus CSV
    ///
    /// Rows with a missing or non-finite value in any column are dropped
    /// (and counted in the log); an unreadable file or a missing column is a
    /// [`CorpusLoadError`].
    pub fn load(path: &Path) -> Result<Self, CorpusLoadError> {
        let df = read_csv(path).map_err(|e| CorpusLoadError::Unreadable {
            path: path.display().to_string(),
            reason: format!("{:#}", e),
        })?;

        let corpus = Self::from_dataframe(&df)?;
        tracing::info!(
            "Loaded {} historical records from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Materialize records from an in-memory DataFrame
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, CorpusLoadError> {
        let crops = string_values(df, COL_CROP)?;
        let regions = string_values(df, COL_REGION)?;
        let soils = string_values(df, COL_SOIL)?;
        let weathers = string_values(df, COL_WEATHER)?;
        let rainfall = float_values(df, COL_RAINFALL)?;
        let temperature = float_values(df, COL_TEMPERATURE)?;
        let fertilizer = flag_values(df, COL_FERTILIZER)?;
        let irrigation = flag_values(df, COL_IRRIGATION)?;
        let yields = float_values(df, COL_YIELD)?;
        let harvest_days = float_values(df, COL_HARVEST_DAYS)?;

        let mut records = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for idx in 0..df.height() {
            let row = (|| {
                Some(HistoricalRecord {
                    crop: crops[idx].clone()?,
                    region: regions[idx].clone()?,
                    soil_type: soils[idx].clone()?,
                    weather_condition: weathers[idx].clone()?,
                    rainfall_mm: finite(rainfall[idx])?,
                    temperature_c: finite(temperature[idx])?,
                    fertilizer_used: fertilizer[idx]?,
                    irrigation_used: irrigation[idx]?,
                    yield_tons_per_ha: finite(yields[idx])?,
                    days_to_harvest: finite(harvest_days[idx])?,
                })
            })();

            match row {
                Some(record) if !record.crop.is_empty() => records.push(record),
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} incomplete historical records", dropped);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read the CSV eagerly, inferring the schema over the whole file
fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load corpus CSV: {}", path.display()))
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, CorpusLoadError> {
    df.column(name)
        .map_err(|_| CorpusLoadError::MissingColumn(name.to_string()))
}

fn invalid_column(name: &str, err: PolarsError) -> CorpusLoadError {
    CorpusLoadError::InvalidColumn {
        column: name.to_string(),
        reason: err.to_string(),
    }
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, CorpusLoadError> {
    let column = required_column(df, name)?
        .cast(&DataType::String)
        .map_err(|e| invalid_column(name, e))?;
    let values = column.str().map_err(|e| invalid_column(name, e))?;

    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, CorpusLoadError> {
    let column = required_column(df, name)?
        .cast(&DataType::Float64)
        .map_err(|e| invalid_column(name, e))?;
    let values = column.f64().map_err(|e| invalid_column(name, e))?;

    Ok(values.into_iter().collect())
}

/// Boolean columns arrive as native booleans, "True"/"False" strings, or 0/1.
/// Casting to String normalizes all three before parsing.
fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<Option<bool>>, CorpusLoadError> {
    Ok(string_values(df, name)?
        .into_iter()
        .map(|v| v.and_then(|s| parse_corpus_flag(&s)))
        .collect())
}

fn parse_corpus_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" | "yes" => Some(true),
        "false" | "0" | "0.0" | "no" => Some(false),
        _ => None,
    }
}
