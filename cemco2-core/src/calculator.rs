//! Cement process-emissions calculator
//!
//! Computes direct CO2 emissions from calcination using the clinker-based output method,
//! corrected for CaO/MgO that did not originate from carbonates.
//!
//! # What This Calculation Does
//!
//! 1. Accumulates clinker production and the masses of CaO/MgO in clinker, of non-carbonate
//!    CaO/MgO in raw materials, and of Ca/Mg bound in silicate raw materials
//! 2. Converts every oxide/element mass to the CO2 mass it corresponds to
//! 3. Subtracts the two corrections from the uncorrected clinker emissions
//! 4. Normalises both emission figures by clinker production (calcination factors)
//!
//! # Outputs
//!
//! - `uncorrectedCo2Emissions` (t CO2)
//! - `correctionForNonCarbonateSource` (t CO2)
//! - `correctionForSilicateSource` (t CO2)
//! - `correctedDirectCo2Emissions` (t CO2)
//! - `uncorrectedCalcinationFactor` (t CO2 / t clinker)
//! - `correctedCalcinationFactor` (t CO2 / t clinker)
//!
//! Results are not clamped. Corrections larger than the clinker emissions produce negative
//! corrected emissions, and percentages outside `[0, 100]` are used as given.
//!
//! Calcination factors are always finite. With no clinker production, or when a total
//! overflows `f64` and the ratio has no finite value, the factor is reported as `0.0`.

use crate::material::{
    ClinkerAttribute, EntryKind, MaterialEntry, OxideAttribute, RawMaterialEntry,
    SilicateAttribute,
};
use crate::species::{co2_equivalent, Species};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Material totals accumulated from a set of entries.
///
/// Every field starts at zero and only ever has contributions added to it.
/// unit: t
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionTotals {
    /// Clinker produced
    pub total_clinker_production: f64,
    /// CaO (including free lime) contained in clinker
    pub total_cao_amount_clinker: f64,
    /// MgO contained in clinker
    pub total_mgo_amount_clinker: f64,
    /// CaO in raw materials from non-carbonate sources
    pub total_cao_amount_rm: f64,
    /// MgO in raw materials from non-carbonate sources
    pub total_mgo_amount_rm: f64,
    /// Ca bound in silicate raw materials
    pub total_ca_amount_silicate: f64,
    /// Mg bound in silicate raw materials
    pub total_mg_amount_silicate: f64,
}

/// Accumulator an entry is routed into
#[derive(Debug, Clone, Copy)]
enum Slot {
    ClinkerProduction = 0,
    CaoClinker,
    MgoClinker,
    CaoRawMaterial,
    MgoRawMaterial,
    CaSilicate,
    MgSilicate,
}

impl Slot {
    fn for_kind(kind: EntryKind) -> Self {
        match kind {
            EntryKind::ProcessedMaterial(ClinkerAttribute::Production) => Slot::ClinkerProduction,
            EntryKind::ProcessedMaterial(ClinkerAttribute::CaOContent) => Slot::CaoClinker,
            EntryKind::ProcessedMaterial(ClinkerAttribute::MgOContent) => Slot::MgoClinker,
            EntryKind::RawMaterial(OxideAttribute::CaOContent) => Slot::CaoRawMaterial,
            EntryKind::RawMaterial(OxideAttribute::MgOContent) => Slot::MgoRawMaterial,
            EntryKind::SilicateRawMaterial(SilicateAttribute::CaContent) => Slot::CaSilicate,
            EntryKind::SilicateRawMaterial(SilicateAttribute::MgContent) => Slot::MgSilicate,
        }
    }
}

impl EmissionTotals {
    /// Accumulate totals from `entries`.
    ///
    /// The contributions to each total are summed in a canonical order, so any permutation
    /// of the same entries gives bit-identical totals.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MaterialEntry>,
    {
        let mut contributions: [Vec<f64>; 7] = Default::default();

        for entry in entries {
            if entry.kind.is_percentage() && !(0.0..=100.0).contains(&entry.value) {
                warn!(
                    "Entry {:?} reports {}% {}, outside 0-100; using it as given",
                    entry.name,
                    entry.value,
                    entry.kind.species().map_or("", Species::symbol),
                );
            }
            let slot = Slot::for_kind(entry.kind);
            let contribution = entry.contribution();
            trace!("{:?} += {} ({:?})", slot, contribution, entry.name);
            contributions[slot as usize].push(contribution);
        }

        let [clinker, cao_clinker, mgo_clinker, cao_rm, mgo_rm, ca_silicate, mg_silicate] =
            contributions.map(ordered_sum);

        Self {
            total_clinker_production: clinker,
            total_cao_amount_clinker: cao_clinker,
            total_mgo_amount_clinker: mgo_clinker,
            total_cao_amount_rm: cao_rm,
            total_mgo_amount_rm: mgo_rm,
            total_ca_amount_silicate: ca_silicate,
            total_mg_amount_silicate: mg_silicate,
        }
    }
}

fn ordered_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |total, value| total + value)
}

/// Result of a cement process-emissions calculation.
///
/// Emissions are in t CO2, calcination factors in t CO2 / t clinker. The accumulated material
/// totals are carried alongside for traceability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    pub total_clinker_production: f64,
    pub total_cao_amount_clinker: f64,
    pub total_mgo_amount_clinker: f64,
    pub total_cao_amount_rm: f64,
    pub total_mgo_amount_rm: f64,
    pub total_ca_amount_silicate: f64,
    pub total_mg_amount_silicate: f64,

    /// CO2 implied by the CaO and MgO content of clinker
    pub uncorrected_co2_emissions: f64,
    /// CO2 attributable to CaO/MgO from non-carbonate raw materials
    pub correction_for_non_carbonate_source: f64,
    /// CO2 attributable to Ca/Mg from silicate raw materials
    pub correction_for_silicate_source: f64,
    /// Uncorrected emissions less both corrections
    pub corrected_direct_co2_emissions: f64,
    pub uncorrected_calcination_factor: f64,
    pub corrected_calcination_factor: f64,
}

impl EmissionResult {
    /// The material totals the result was derived from
    pub fn totals(&self) -> EmissionTotals {
        EmissionTotals {
            total_clinker_production: self.total_clinker_production,
            total_cao_amount_clinker: self.total_cao_amount_clinker,
            total_mgo_amount_clinker: self.total_mgo_amount_clinker,
            total_cao_amount_rm: self.total_cao_amount_rm,
            total_mgo_amount_rm: self.total_mgo_amount_rm,
            total_ca_amount_silicate: self.total_ca_amount_silicate,
            total_mg_amount_silicate: self.total_mg_amount_silicate,
        }
    }
}

/// Derive emissions and calcination factors from accumulated totals.
///
/// $$ E_{uncorr} = m_{CaO}^{cli} \frac{M_{CO_2}}{M_{CaO}} + m_{MgO}^{cli} \frac{M_{CO_2}}{M_{MgO}} $$
/// $$ C_{nc} = m_{CaO}^{rm} \frac{M_{CO_2}}{M_{CaO}} + m_{MgO}^{rm} \frac{M_{CO_2}}{M_{MgO}} $$
/// $$ C_{sil} = m_{Ca}^{sil} \frac{M_{CO_2}}{M_{Ca}} + m_{Mg}^{sil} \frac{M_{CO_2}}{M_{Mg}} $$
/// $$ E_{corr} = E_{uncorr} - C_{nc} - C_{sil} $$
///
/// Calcination factors divide each emission figure by clinker production, and are zero when
/// no clinker was produced.
pub fn calculate_process_emissions(totals: &EmissionTotals) -> EmissionResult {
    let uncorrected_co2_emissions = co2_equivalent(totals.total_cao_amount_clinker, Species::CaO)
        + co2_equivalent(totals.total_mgo_amount_clinker, Species::MgO);

    let correction_for_non_carbonate_source =
        co2_equivalent(totals.total_cao_amount_rm, Species::CaO)
            + co2_equivalent(totals.total_mgo_amount_rm, Species::MgO);

    let correction_for_silicate_source =
        co2_equivalent(totals.total_ca_amount_silicate, Species::Ca)
            + co2_equivalent(totals.total_mg_amount_silicate, Species::Mg);

    let corrected_direct_co2_emissions = uncorrected_co2_emissions
        - correction_for_non_carbonate_source
        - correction_for_silicate_source;

    let per_clinker = |emissions: f64| {
        let factor = emissions / totals.total_clinker_production;
        if totals.total_clinker_production == 0.0 || !factor.is_finite() {
            0.0
        } else {
            factor
        }
    };

    EmissionResult {
        total_clinker_production: totals.total_clinker_production,
        total_cao_amount_clinker: totals.total_cao_amount_clinker,
        total_mgo_amount_clinker: totals.total_mgo_amount_clinker,
        total_cao_amount_rm: totals.total_cao_amount_rm,
        total_mgo_amount_rm: totals.total_mgo_amount_rm,
        total_ca_amount_silicate: totals.total_ca_amount_silicate,
        total_mg_amount_silicate: totals.total_mg_amount_silicate,
        uncorrected_co2_emissions,
        correction_for_non_carbonate_source,
        correction_for_silicate_source,
        corrected_direct_co2_emissions,
        uncorrected_calcination_factor: per_clinker(uncorrected_co2_emissions),
        corrected_calcination_factor: per_clinker(corrected_direct_co2_emissions),
    }
}

/// Calculate cement process emissions for a set of material entries.
///
/// Never fails: an empty slice gives an all-zero result. The result depends only on the
/// multiset of entries, not on their order.
pub fn calculate_cement_emissions(entries: &[MaterialEntry]) -> EmissionResult {
    let totals = EmissionTotals::from_entries(entries);
    let result = calculate_process_emissions(&totals);
    debug!(
        "Calculated emissions from {} entries: corrected={} t CO2, factor={} t CO2/t clinker",
        entries.len(),
        result.corrected_direct_co2_emissions,
        result.corrected_calcination_factor
    );
    result
}

/// Calculate cement process emissions from entries as submitted by the data-entry form.
///
/// Malformed numbers count as zero and entries with unrecognised labels are ignored.
pub fn calculate_from_raw(entries: &[RawMaterialEntry]) -> EmissionResult {
    let classified: Vec<MaterialEntry> = entries
        .iter()
        .filter_map(RawMaterialEntry::classify)
        .collect();
    if classified.len() < entries.len() {
        debug!(
            "Ignored {} of {} submitted entries",
            entries.len() - classified.len(),
            entries.len()
        );
    }
    calculate_cement_emissions(&classified)
}
