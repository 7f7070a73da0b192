//! Recyclable material kinds accepted at ecopoints.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kind of material an ecopoint can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Paper,
    Plastic,
    Glass,
    Metal,
    Electronic,
    Battery,
    CookingOil,
    Organic,
}

impl MaterialType {
    /// All material kinds in canonical order.
    pub const ALL: [MaterialType; 8] = [
        MaterialType::Paper,
        MaterialType::Plastic,
        MaterialType::Glass,
        MaterialType::Metal,
        MaterialType::Electronic,
        MaterialType::Battery,
        MaterialType::CookingOil,
        MaterialType::Organic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Paper => "paper",
            MaterialType::Plastic => "plastic",
            MaterialType::Glass => "glass",
            MaterialType::Metal => "metal",
            MaterialType::Electronic => "electronic",
            MaterialType::Battery => "battery",
            MaterialType::CookingOil => "cooking_oil",
            MaterialType::Organic => "organic",
        }
    }

    /// Portuguese display name.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Paper => "Papel",
            MaterialType::Plastic => "Plástico",
            MaterialType::Glass => "Vidro",
            MaterialType::Metal => "Metal",
            MaterialType::Electronic => "Eletrônicos",
            MaterialType::Battery => "Pilhas e baterias",
            MaterialType::CookingOil => "Óleo de cozinha",
            MaterialType::Organic => "Orgânico",
        }
    }

    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL.iter().map(MaterialType::as_str).collect()
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|material| material.as_str() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_accepted_materials(format!(
                    "unknown material '{}', expected one of {:?}",
                    s,
                    Self::valid_values()
                ))
            })
    }
}
