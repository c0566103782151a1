//! Static Crop Catalog
//!
//! Read-only display metadata per crop (name, type, season, guidance, image),
//! keyed by lower-cased crop label. Unknown crops get a default profile.

use crate::utils::title_case;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_TYPE: &str = "Crop";
const DEFAULT_SEASON: &str = "Both seasons";
const DEFAULT_IMAGE: &str = "https://via.placeholder.com/200x150/22c55e/ffffff?text=🌱";
const DEFAULT_SEED: &str = "Contact local supplier";
const DEFAULT_FERTILIZER: &str = "NPK fertilizer";

/// Display metadata for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCropProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub crop_type: String,
    pub season: String,
    pub image: String,
    pub seed_required: String,
    pub fertilizer_needed: String,
}

impl StaticCropProfile {
    /// Profile for a crop the catalog does not list
    pub fn default_for(crop: &str) -> Self {
        Self {
            name: title_case(crop),
            crop_type: DEFAULT_TYPE.to_string(),
            season: DEFAULT_SEASON.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            seed_required: DEFAULT_SEED.to_string(),
            fertilizer_needed: DEFAULT_FERTILIZER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CropCatalog {
    profiles: FxHashMap<String, StaticCropProfile>,
}

impl CropCatalog {
    pub fn from_profiles(profiles: impl IntoIterator<Item = (String, StaticCropProfile)>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|(key, profile)| (key.to_lowercase(), profile))
                .collect(),
        }
    }

    /// Load a JSON object of `{ "<crop>": { ...profile... } }`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop catalog: {}", path.display()))?;
        let profiles: FxHashMap<String, StaticCropProfile> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse crop catalog: {}", path.display()))?;
        Ok(Self::from_profiles(profiles))
    }

    /// The six crops the service ships with
    pub fn builtin() -> Self {
        let grain = |name: &str, season: &str, image: &str, seed: &str, npk: &str| StaticCropProfile {
            name: name.to_string(),
            crop_type: "Grain".to_string(),
            season: season.to_string(),
            image: image.to_string(),
            seed_required: seed.to_string(),
            fertilizer_needed: npk.to_string(),
        };

        let profiles = vec![
            grain(
                "Rice",
                "Both seasons",
                "https://media.istockphoto.com/id/1183896276/photo/ripe-rice-and-beautiful-sky-in-daylight.jpg?s=612x612&w=0&k=20&c=W17eTu9E6egqK-5PDOBEARbf1zytAqg1AOl9RuuxQ4E=",
                "25-30 kg/ha",
                "NPK 14-14-14",
            ),
            grain(
                "Maize",
                "Both seasons",
                "https://images.unsplash.com/photo-1551754655-cd27e38d2076?w=200&h=150&fit=crop&crop=center",
                "20-25 kg/ha",
                "NPK 15-15-15",
            ),
            grain(
                "Wheat",
                "Maha",
                "https://images.unsplash.com/photo-1574323347407-f5e1ad6d020b?w=200&h=150&fit=crop&crop=center",
                "100-120 kg/ha",
                "NPK 18-18-18",
            ),
            grain(
                "Barley",
                "Both seasons",
                "https://images.unsplash.com/photo-1574323347407-f5e1ad6d020b?w=200&h=150&fit=crop&crop=center",
                "80-100 kg/ha",
                "NPK 16-16-16",
            ),
            StaticCropProfile {
                crop_type: "Cash Crop".to_string(),
                ..grain(
                    "Cotton",
                    "Both seasons",
                    "https://media.istockphoto.com/id/1282980437/photo/cotton-field-agriculture-concept-photo.jpg?s=612x612&w=0&k=20&c=mrHNwK-Rq78bJmBMG8hWOxn2w-gReb99v99HOYBJ14Q=",
                    "20-25 kg/ha",
                    "NPK 17-17-17",
                )
            },
            StaticCropProfile {
                crop_type: "Legume".to_string(),
                ..grain(
                    "Soybean",
                    "Both seasons",
                    "https://media.istockphoto.com/id/184878412/photo/soybean.jpg?s=612x612&w=0&k=20&c=y2ErWVIJEIZ2o_O2YGjfLHePuMLyRwf_5_felYaD-Qc=",
                    "60-80 kg/ha",
                    "NPK 20-20-20",
                )
            },
        ];

        Self::from_profiles(profiles.into_iter().map(|p| (p.name.clone(), p)))
    }

    pub fn get(&self, crop: &str) -> Option<&StaticCropProfile> {
        self.profiles.get(&crop.to_lowercase())
    }

    /// Catalog profile, or the default profile titled after `crop`
    pub fn profile_or_default(&self, crop: &str) -> StaticCropProfile {
        self.get(crop)
            .cloned()
            .unwrap_or_else(|| StaticCropProfile::default_for(crop))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let catalog = CropCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        let wheat = catalog.get("WHEAT").unwrap();
        assert_eq!(wheat.season, "Maha");
        assert_eq!(wheat.seed_required, "100-120 kg/ha");
        assert_eq!(catalog.get("cotton").unwrap().crop_type, "Cash Crop");
        assert_eq!(catalog.get("Soybean").unwrap().crop_type, "Legume");
    }

    #[test]
    fn test_default_profile_for_unknown_crop() {
        let profile = CropCatalog::builtin().profile_or_default("sweet potato");
        assert_eq!(profile.name, "Sweet Potato");
        assert_eq!(profile.crop_type, "Crop");
        assert_eq!(profile.season, "Both seasons");
        assert_eq!(profile.seed_required, "Contact local supplier");
        assert_eq!(profile.fertilizer_needed, "NPK fertilizer");
    }

    #[test]
    fn test_profile_json_keys() {
        let json = serde_json::to_value(CropCatalog::builtin().get("rice").unwrap()).unwrap();
        assert_eq!(json["type"], "Grain");
        assert_eq!(json["seedRequired"], "25-30 kg/ha");
        assert_eq!(json["fertilizerNeeded"], "NPK 14-14-14");
    }
}
