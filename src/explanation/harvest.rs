//! Harvest timing labels

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Crop duration class by days to harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthStage {
    #[serde(rename = "Quick harvest crop")]
    Quick,
    #[serde(rename = "Short-term crop")]
    ShortTerm,
    #[serde(rename = "Medium-term crop")]
    MediumTerm,
    #[serde(rename = "Long-term crop")]
    LongTerm,
    #[serde(rename = "Extended season crop")]
    ExtendedSeason,
}

impl GrowthStage {
    /// Boundaries are inclusive upper limits: 30, 60, 90, 120
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 30 => GrowthStage::Quick,
            d if d <= 60 => GrowthStage::ShortTerm,
            d if d <= 90 => GrowthStage::MediumTerm,
            d if d <= 120 => GrowthStage::LongTerm,
            _ => GrowthStage::ExtendedSeason,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Quick => "Quick harvest crop",
            GrowthStage::ShortTerm => "Short-term crop",
            GrowthStage::MediumTerm => "Medium-term crop",
            GrowthStage::LongTerm => "Long-term crop",
            GrowthStage::ExtendedSeason => "Extended season crop",
        }
    }
}

/// "<MonthName> <Year>" of `today + days`, `None` if the date overflows
pub fn harvest_month(today: NaiveDate, days: i64) -> Option<String> {
    let date = if days >= 0 {
        today.checked_add_days(Days::new(days.unsigned_abs()))?
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    Some(date.format("%B %Y").to_string())
}
