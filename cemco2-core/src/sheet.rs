//! Material data-entry sheet
//!
//! The data-entry form collects three lists of rows: clinkers, raw materials and silicate raw
//! materials. Each row names a material batch, its mass and its oxide or element content.
//! [`MaterialSheet::to_entries`] expands the rows into the [`MaterialEntry`] values the
//! calculator consumes.
//!
//! Rows are only expanded once their mass has been filled in, and each content cell only
//! produces an entry once it has been filled in. Cells are kept exactly as typed so a
//! partially completed sheet can be stored and re-opened.

use crate::calculator::{calculate_cement_emissions, EmissionResult};
use crate::material::{MaterialEntry, OxideAttribute, SilicateAttribute};
use crate::numeric::{is_filled, to_number_or_zero, NumericInput};
use serde::{Deserialize, Serialize};

/// A clinker produced during the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinkerRow {
    #[serde(default)]
    pub name: String,
    /// Clinker produced
    /// unit: t
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NumericInput>,
    /// CaO content including free lime
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cao_content: Option<NumericInput>,
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgo_content: Option<NumericInput>,
}

/// A raw material containing CaO/MgO from non-carbonate sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialRow {
    #[serde(default)]
    pub name: String,
    /// unit: t
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NumericInput>,
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cao_content: Option<NumericInput>,
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgo_content: Option<NumericInput>,
}

/// A raw material containing Ca/Mg bound in silicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SilicateRow {
    #[serde(default)]
    pub name: String,
    /// unit: t
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<NumericInput>,
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_content: Option<NumericInput>,
    /// unit: %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mg_content: Option<NumericInput>,
}

/// Everything entered on the data-entry form for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialSheet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub processed_materials: Vec<ClinkerRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub raw_materials: Vec<RawMaterialRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub silicate_raw_materials: Vec<SilicateRow>,
}

impl MaterialSheet {
    /// A sheet with one empty row in each section, as presented for a new period.
    pub fn blank() -> Self {
        Self {
            processed_materials: vec![ClinkerRow::default()],
            raw_materials: vec![RawMaterialRow::default()],
            silicate_raw_materials: vec![SilicateRow::default()],
        }
    }

    /// Expand the rows into calculator entries.
    pub fn to_entries(&self) -> Vec<MaterialEntry> {
        let mut entries = Vec::new();

        for (index, row) in self.processed_materials.iter().enumerate() {
            if !is_filled(row.value.as_ref()) {
                continue;
            }
            let name = row_name(&row.name, "Clinker", index);
            let tonnes = to_number_or_zero(row.value.as_ref());

            entries.push(MaterialEntry::clinker_production(name.clone(), tonnes));
            for (oxide, content) in [
                (OxideAttribute::CaOContent, &row.cao_content),
                (OxideAttribute::MgOContent, &row.mgo_content),
            ] {
                if is_filled(content.as_ref()) {
                    entries.push(MaterialEntry::clinker_content(
                        name.clone(),
                        oxide,
                        to_number_or_zero(content.as_ref()),
                        tonnes,
                    ));
                }
            }
        }

        for (index, row) in self.raw_materials.iter().enumerate() {
            if !is_filled(row.value.as_ref()) {
                continue;
            }
            let name = row_name(&row.name, "Raw Material", index);
            let tonnes = to_number_or_zero(row.value.as_ref());

            for (oxide, content) in [
                (OxideAttribute::CaOContent, &row.cao_content),
                (OxideAttribute::MgOContent, &row.mgo_content),
            ] {
                if is_filled(content.as_ref()) {
                    entries.push(MaterialEntry::raw_material_content(
                        name.clone(),
                        oxide,
                        to_number_or_zero(content.as_ref()),
                        tonnes,
                    ));
                }
            }
        }

        for (index, row) in self.silicate_raw_materials.iter().enumerate() {
            if !is_filled(row.value.as_ref()) {
                continue;
            }
            let name = row_name(&row.name, "Silicate Material", index);
            let tonnes = to_number_or_zero(row.value.as_ref());

            for (element, content) in [
                (SilicateAttribute::CaContent, &row.ca_content),
                (SilicateAttribute::MgContent, &row.mg_content),
            ] {
                if is_filled(content.as_ref()) {
                    entries.push(MaterialEntry::silicate_content(
                        name.clone(),
                        element,
                        to_number_or_zero(content.as_ref()),
                        tonnes,
                    ));
                }
            }
        }

        entries
    }

    /// Calculate the emissions implied by the sheet.
    pub fn calculate(&self) -> EmissionResult {
        calculate_cement_emissions(&self.to_entries())
    }
}

/// Row name, or "`prefix` N" (1-based) when none was entered
fn row_name(name: &str, prefix: &str, index: usize) -> String {
    if name.is_empty() {
        format!("{} {}", prefix, index + 1)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{ClinkerAttribute, EntryKind};
    use is_close::is_close;

    fn clinker(name: &str, value: &str, cao: &str, mgo: &str) -> ClinkerRow {
        ClinkerRow {
            name: name.to_string(),
            value: Some(value.into()),
            cao_content: Some(cao.into()),
            mgo_content: Some(mgo.into()),
        }
    }

    #[test]
    fn test_blank_sheet_has_no_entries() {
        let sheet = MaterialSheet::blank();
        assert_eq!(sheet.processed_materials.len(), 1);
        assert_eq!(sheet.raw_materials.len(), 1);
        assert_eq!(sheet.silicate_raw_materials.len(), 1);
        assert!(sheet.to_entries().is_empty());
        assert_eq!(sheet.calculate(), EmissionResult::default());
    }

    #[test]
    fn test_clinker_row_expansion() {
        let sheet = MaterialSheet {
            processed_materials: vec![clinker("", "1000", "65", "")],
            ..Default::default()
        };
        let entries = sheet.to_entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            MaterialEntry::clinker_production("Clinker 1", 1000.0)
        );
        assert_eq!(
            entries[1].kind,
            EntryKind::ProcessedMaterial(ClinkerAttribute::CaOContent)
        );
        assert_eq!(entries[1].value, 65.0);
        assert_eq!(entries[1].material_value, 1000.0);
        assert_eq!(entries[1].name, "Clinker 1");
    }

    #[test]
    fn test_rows_without_mass_are_skipped() {
        let sheet = MaterialSheet {
            processed_materials: vec![clinker("Kiln 1", "", "65", "2")],
            raw_materials: vec![RawMaterialRow {
                name: "Ash".to_string(),
                value: None,
                cao_content: Some("5".into()),
                mgo_content: None,
            }],
            silicate_raw_materials: vec![SilicateRow {
                name: String::new(),
                value: Some(0.0.into()),
                ca_content: Some(10.0.into()),
                mg_content: None,
            }],
        };
        assert!(sheet.to_entries().is_empty());
    }

    #[test]
    fn test_typed_zero_still_counts_as_filled() {
        let sheet = MaterialSheet {
            processed_materials: vec![clinker("Kiln 1", "0", "65", "")],
            ..Default::default()
        };
        let entries = sheet.to_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, 0.0);
    }

    #[test]
    fn test_default_names_use_row_position() {
        let sheet = MaterialSheet {
            raw_materials: vec![
                RawMaterialRow {
                    name: "Fly ash".to_string(),
                    value: Some("100".into()),
                    cao_content: Some("4".into()),
                    mgo_content: None,
                },
                RawMaterialRow {
                    name: String::new(),
                    value: Some("200".into()),
                    cao_content: None,
                    mgo_content: Some("1".into()),
                },
            ],
            silicate_raw_materials: vec![SilicateRow {
                name: String::new(),
                value: Some("50".into()),
                ca_content: Some("10".into()),
                mg_content: Some("2".into()),
            }],
            ..Default::default()
        };
        let names: Vec<String> = sheet.to_entries().into_iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                "Fly ash",
                "Raw Material 2",
                "Silicate Material 1",
                "Silicate Material 1"
            ]
        );
    }

    #[test]
    fn test_full_sheet_calculation() {
        let sheet = MaterialSheet {
            processed_materials: vec![clinker("Kiln 1", "1000", "65", "1.5")],
            raw_materials: vec![RawMaterialRow {
                name: "Fly ash".to_string(),
                value: Some("200".into()),
                cao_content: Some("5".into()),
                mgo_content: None,
            }],
            silicate_raw_materials: vec![SilicateRow {
                name: "Slag".to_string(),
                value: Some("100".into()),
                ca_content: Some("abc".into()),
                mg_content: Some("2".into()),
            }],
        };
        let result = sheet.calculate();

        assert_eq!(result.total_clinker_production, 1000.0);
        assert!(is_close!(result.total_cao_amount_rm, 10.0));
        assert_eq!(result.total_ca_amount_silicate, 0.0);
        assert!(is_close!(result.total_mg_amount_silicate, 2.0));

        let expected = (650.0 / 56.0774 * 44.01 + 15.0 / 40.3044 * 44.01)
            - (10.0 / 56.0774 * 44.01)
            - (2.0 / 24.305 * 44.01);
        assert!(is_close!(result.corrected_direct_co2_emissions, expected));
    }

    #[test]
    fn test_sheet_json_shape() {
        let sheet: MaterialSheet = serde_json::from_str(
            r#"{
                "processedMaterials": [{"name": "", "value": "1000", "caoContent": "65", "mgoContent": ""}],
                "rawMaterials": [{"name": "", "value": "", "caoContent": "", "mgoContent": ""}],
                "silicateRawMaterials": [{"name": "", "value": "", "caContent": "", "mgContent": ""}]
            }"#,
        )
        .unwrap();
        assert_eq!(sheet.to_entries().len(), 2);
    }
}
