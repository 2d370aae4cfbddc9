//! Material entries
//!
//! Every measurement reported for a calculation is a [`MaterialEntry`]. The combination of
//! material category and measured attribute is a closed set of seven cases, captured by
//! [`EntryKind`]; nothing else can be constructed.
//!
//! The form layer submits looser records ([`RawMaterialEntry`]) where the category and the
//! attribute are free text and numbers may be missing or malformed. These are classified
//! leniently: numbers are coerced with [`to_number_or_zero`] and records that do not name one
//! of the seven cases are dropped.

use crate::errors::{CemError, CemResult};
use crate::numeric::{finite_or_zero, to_number_or_zero, NumericInput};
use crate::species::Species;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of material an entry is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    /// Clinker leaving the kiln
    ProcessedMaterial,
    /// Kiln feed carrying CaO/MgO from non-carbonate sources
    RawMaterial,
    /// Kiln feed carrying Ca/Mg bound in silicates
    SilicateRawMaterial,
}

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::ProcessedMaterial => "processed_material",
            MaterialCategory::RawMaterial => "raw_material",
            MaterialCategory::SilicateRawMaterial => "silicate_raw_material",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = CemError;

    /// Only the exact category identifiers submitted by the data-entry form are recognised.
    fn from_str(s: &str) -> CemResult<Self> {
        match s {
            "processed_material" => Ok(MaterialCategory::ProcessedMaterial),
            "raw_material" => Ok(MaterialCategory::RawMaterial),
            "silicate_raw_material" => Ok(MaterialCategory::SilicateRawMaterial),
            _ => Err(CemError::UnknownCategory(s.to_string())),
        }
    }
}

/// Quantity measured on a clinker entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinkerAttribute {
    /// Clinker produced (the entry value is a mass, not a percentage)
    Production,
    /// CaO content, including free lime
    CaOContent,
    MgOContent,
}

/// Oxide measured on a raw-material entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OxideAttribute {
    CaOContent,
    MgOContent,
}

/// Element measured on a silicate raw-material entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SilicateAttribute {
    /// Ca content of Ca-silicate raw materials
    CaContent,
    /// Mg content of Mg-silicate raw materials
    MgContent,
}

/// Category and attribute of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "attribute", rename_all = "snake_case")]
pub enum EntryKind {
    ProcessedMaterial(ClinkerAttribute),
    RawMaterial(OxideAttribute),
    SilicateRawMaterial(SilicateAttribute),
}

impl EntryKind {
    pub fn category(&self) -> MaterialCategory {
        match self {
            EntryKind::ProcessedMaterial(_) => MaterialCategory::ProcessedMaterial,
            EntryKind::RawMaterial(_) => MaterialCategory::RawMaterial,
            EntryKind::SilicateRawMaterial(_) => MaterialCategory::SilicateRawMaterial,
        }
    }

    /// Species whose content the entry reports, or `None` for clinker production.
    pub fn species(&self) -> Option<Species> {
        match self {
            EntryKind::ProcessedMaterial(ClinkerAttribute::Production) => None,
            EntryKind::ProcessedMaterial(ClinkerAttribute::CaOContent)
            | EntryKind::RawMaterial(OxideAttribute::CaOContent) => Some(Species::CaO),
            EntryKind::ProcessedMaterial(ClinkerAttribute::MgOContent)
            | EntryKind::RawMaterial(OxideAttribute::MgOContent) => Some(Species::MgO),
            EntryKind::SilicateRawMaterial(SilicateAttribute::CaContent) => Some(Species::Ca),
            EntryKind::SilicateRawMaterial(SilicateAttribute::MgContent) => Some(Species::Mg),
        }
    }

    /// Whether the entry value is a percentage of `material_value`
    pub fn is_percentage(&self) -> bool {
        self.species().is_some()
    }

    /// Display label the data-entry form uses for this attribute.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            EntryKind::ProcessedMaterial(ClinkerAttribute::Production) => None,
            EntryKind::ProcessedMaterial(ClinkerAttribute::CaOContent) => {
                Some("CaO content (incl. free lime)")
            }
            EntryKind::ProcessedMaterial(ClinkerAttribute::MgOContent)
            | EntryKind::RawMaterial(OxideAttribute::MgOContent) => Some("MgO content"),
            EntryKind::RawMaterial(OxideAttribute::CaOContent) => Some("CaO content"),
            EntryKind::SilicateRawMaterial(SilicateAttribute::CaContent) => {
                Some("Ca content of Ca-Silicate raw materials")
            }
            EntryKind::SilicateRawMaterial(SilicateAttribute::MgContent) => {
                Some("Mg content of Mg-Silicate raw materials")
            }
        }
    }

    /// Resolve a category label and optional attribute label.
    ///
    /// Labels must match the data-entry form exactly (e.g. `"CaO content (incl. free lime)"`);
    /// no case or spelling variants are accepted. A clinker entry with a missing or empty
    /// attribute reports production.
    pub fn from_labels(category: &str, attribute: Option<&str>) -> CemResult<Self> {
        let category = category.parse::<MaterialCategory>()?;
        let label = attribute.filter(|label| !label.is_empty());

        let kind = match (category, label) {
            (MaterialCategory::ProcessedMaterial, None) => {
                EntryKind::ProcessedMaterial(ClinkerAttribute::Production)
            }
            (MaterialCategory::ProcessedMaterial, Some("CaO content (incl. free lime)")) => {
                EntryKind::ProcessedMaterial(ClinkerAttribute::CaOContent)
            }
            (MaterialCategory::ProcessedMaterial, Some("MgO content")) => {
                EntryKind::ProcessedMaterial(ClinkerAttribute::MgOContent)
            }
            (MaterialCategory::RawMaterial, Some("CaO content")) => {
                EntryKind::RawMaterial(OxideAttribute::CaOContent)
            }
            (MaterialCategory::RawMaterial, Some("MgO content")) => {
                EntryKind::RawMaterial(OxideAttribute::MgOContent)
            }
            (
                MaterialCategory::SilicateRawMaterial,
                Some("Ca content of Ca-Silicate raw materials"),
            ) => EntryKind::SilicateRawMaterial(SilicateAttribute::CaContent),
            (
                MaterialCategory::SilicateRawMaterial,
                Some("Mg content of Mg-Silicate raw materials"),
            ) => EntryKind::SilicateRawMaterial(SilicateAttribute::MgContent),
            _ => {
                return Err(CemError::UnsupportedAttribute {
                    category: category.to_string(),
                    attribute: attribute.map(str::to_string),
                })
            }
        };
        Ok(kind)
    }
}

/// A single measurement used by the emissions calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub kind: EntryKind,
    /// Clinker mass for production entries, otherwise a percentage of `material_value`
    /// unit: t or %
    pub value: f64,
    /// Mass of the batch the percentage applies to. Ignored for production entries.
    /// unit: t
    pub material_value: f64,
    /// Display label only
    #[serde(default)]
    pub name: String,
}

impl MaterialEntry {
    /// Create an entry, collapsing non-finite numbers to zero.
    pub fn new(kind: EntryKind, value: f64, material_value: f64, name: impl Into<String>) -> Self {
        Self {
            kind,
            value: finite_or_zero(value),
            material_value: finite_or_zero(material_value),
            name: name.into(),
        }
    }

    /// Clinker produced
    pub fn clinker_production(name: impl Into<String>, tonnes: f64) -> Self {
        Self::new(
            EntryKind::ProcessedMaterial(ClinkerAttribute::Production),
            tonnes,
            0.0,
            name,
        )
    }

    /// Oxide content of clinker
    pub fn clinker_content(
        name: impl Into<String>,
        oxide: OxideAttribute,
        percent: f64,
        clinker_tonnes: f64,
    ) -> Self {
        let attribute = match oxide {
            OxideAttribute::CaOContent => ClinkerAttribute::CaOContent,
            OxideAttribute::MgOContent => ClinkerAttribute::MgOContent,
        };
        Self::new(
            EntryKind::ProcessedMaterial(attribute),
            percent,
            clinker_tonnes,
            name,
        )
    }

    /// Non-carbonate oxide content of a raw material
    pub fn raw_material_content(
        name: impl Into<String>,
        oxide: OxideAttribute,
        percent: f64,
        material_tonnes: f64,
    ) -> Self {
        Self::new(EntryKind::RawMaterial(oxide), percent, material_tonnes, name)
    }

    /// Ca or Mg content of a silicate raw material
    pub fn silicate_content(
        name: impl Into<String>,
        element: SilicateAttribute,
        percent: f64,
        material_tonnes: f64,
    ) -> Self {
        Self::new(
            EntryKind::SilicateRawMaterial(element),
            percent,
            material_tonnes,
            name,
        )
    }

    /// Mass this entry adds to its accumulator.
    ///
    /// Production entries contribute `value` directly; every other entry contributes
    /// `value / 100 * material_value`.
    pub fn contribution(&self) -> f64 {
        if self.kind.is_percentage() {
            (self.value / 100.0) * self.material_value
        } else {
            self.value
        }
    }
}

/// A material entry as submitted by the data-entry form.
///
/// Categories and attributes are free text and numbers may be missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialEntry {
    #[serde(rename = "type", alias = "category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_value: Option<NumericInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RawMaterialEntry {
    /// Resolve the entry strictly, reporting unrecognised labels.
    pub fn try_classify(&self) -> CemResult<MaterialEntry> {
        let kind = EntryKind::from_labels(&self.category, self.attribute.as_deref())?;
        Ok(MaterialEntry::new(
            kind,
            to_number_or_zero(self.value.as_ref()),
            to_number_or_zero(self.material_value.as_ref()),
            self.name.clone().unwrap_or_default(),
        ))
    }

    /// Resolve the entry, dropping it if the labels are not recognised.
    pub fn classify(&self) -> Option<MaterialEntry> {
        match self.try_classify() {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Ignoring material entry {:?}: {}", self.name, e);
                None
            }
        }
    }
}

impl From<&MaterialEntry> for RawMaterialEntry {
    fn from(entry: &MaterialEntry) -> Self {
        let is_percentage = entry.kind.is_percentage();
        Self {
            category: entry.kind.category().to_string(),
            attribute: entry.kind.label().map(str::to_string),
            value: Some(NumericInput::Number(entry.value)),
            material_value: is_percentage.then_some(NumericInput::Number(entry.material_value)),
            name: (!entry.name.is_empty()).then(|| entry.name.clone()),
        }
    }
}
