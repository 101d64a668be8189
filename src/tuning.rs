use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed reading the tuning file ({0})")]
    ReadError(#[from] std::io::Error),
    #[error("Failed parsing the tuning file ({0})")]
    ParseError(#[from] serde_json::Error),
}

/// Thresholds shared by the heuristic strategies. Any field missing from a
/// tuning file keeps its default.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Tuning {
    /// Completing is allowed once the day is strictly past this.
    pub complete_after_day: u8,

    /// Shadow-ranked seeding only happens once the day is strictly past this.
    pub seed_after_day: u8,

    /// Only plant while owning fewer seeds than this.
    pub max_seeds: usize,

    /// Only plant while owning fewer trees than this (sun-cycle only).
    pub max_trees_for_seeding: usize,

    /// Number of size 3 trees before completing early (sun-cycle only).
    pub large_trees_before_completing: usize,

    /// Size the sun-cycle strategy prefers to grow from.
    pub preferred_grow_size: u8,

    /// Late completions go ahead while the tree shadows fewer opponent trees
    /// than this.
    pub opp_shadow_tolerance: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            complete_after_day: 20,
            seed_after_day: 6,
            max_seeds: 1,
            max_trees_for_seeding: 6,
            large_trees_before_completing: 3,
            preferred_grow_size: 2,
            opp_shadow_tolerance: 3,
        }
    }
}

impl Tuning {
    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        info!("[TUNING] Loading tuning from {}", path.display());
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"complete_after_day": 18, "max_seeds": 2}"#).unwrap();
        assert_eq!(tuning.complete_after_day, 18);
        assert_eq!(tuning.max_seeds, 2);
        assert_eq!(tuning.seed_after_day, Tuning::default().seed_after_day);
        assert_eq!(tuning.opp_shadow_tolerance, 3);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Tuning::from_json("{"), Err(Error::ParseError(_))));
        assert!(matches!(Tuning::from_json(r#"{"max_seeds": -1}"#), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(Tuning::load("./does/not/exist.json"), Err(Error::ReadError(_))));
    }
}
