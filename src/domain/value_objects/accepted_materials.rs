//! The set of materials an ecopoint accepts.

use crate::domain::value_objects::MaterialType;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A non-empty, duplicate-free set of material kinds in canonical order.
///
/// Serialized as a comma-delimited list of wire names (`paper,plastic`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AcceptedMaterials(Vec<MaterialType>);

impl AcceptedMaterials {
    pub fn new(materials: impl IntoIterator<Item = MaterialType>) -> ValidationResult<Self> {
        let canonical: BTreeSet<MaterialType> = materials.into_iter().collect();
        if canonical.is_empty() {
            return Err(ValidationError::invalid_accepted_materials(
                "at least one material is required",
            ));
        }
        Ok(Self(canonical.into_iter().collect()))
    }

    pub fn from_string(value: &str) -> ValidationResult<Self> {
        let materials = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse::<MaterialType>)
            .collect::<ValidationResult<Vec<_>>>()?;
        Self::new(materials)
    }

    /// Every known material kind.
    pub fn all() -> Self {
        Self(MaterialType::ALL.to_vec())
    }

    pub fn materials(&self) -> &[MaterialType] {
        &self.0
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn accepts(&self, material: MaterialType) -> bool {
        self.0.contains(&material)
    }

    pub fn add_materials(&self, materials: impl IntoIterator<Item = MaterialType>) -> Self {
        let merged: BTreeSet<MaterialType> = self.0.iter().copied().chain(materials).collect();
        Self(merged.into_iter().collect())
    }

    /// Return a new set without the given materials. Fails if nothing would remain.
    pub fn remove_materials(
        &self,
        materials: impl IntoIterator<Item = MaterialType>,
    ) -> ValidationResult<Self> {
        let removed: BTreeSet<MaterialType> = materials.into_iter().collect();
        Self::new(self.0.iter().copied().filter(|m| !removed.contains(m)))
    }

    pub fn serialize(&self) -> String {
        self.0
            .iter()
            .map(MaterialType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn to_localized_string(&self) -> String {
        self.0
            .iter()
            .map(MaterialType::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AcceptedMaterials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

impl FromStr for AcceptedMaterials {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for AcceptedMaterials {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::from_string(&value)
    }
}

impl From<AcceptedMaterials> for String {
    fn from(materials: AcceptedMaterials) -> Self {
        materials.serialize()
    }
}
