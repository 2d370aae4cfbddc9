//! Cement process-emissions accounting
//!
//! Calculates direct CO2 emissions from calcination in clinker production, corrected for
//! calcium and magnesium that entered the kiln in non-carbonate or silicate form.
//!
//! # Module Organisation
//!
//! - `species`: molecular-weight table and stoichiometric conversions
//! - `numeric`: parse-or-zero coercion of user supplied numbers
//! - `material`: material entries and their category/attribute dispatch
//! - `calculator`: the emissions calculation
//! - `sheet`: the material data-entry sheet and its expansion into entries
//! - `submission`: monthly records and their TOML representation
//! - `format`: display formatting

pub mod calculator;
pub mod errors;
pub mod format;
pub mod material;
pub mod numeric;
#[cfg(feature = "python")]
pub mod python;
pub mod sheet;
pub mod species;
pub mod submission;

pub use calculator::{
    calculate_cement_emissions, calculate_from_raw, calculate_process_emissions, EmissionResult,
    EmissionTotals,
};
pub use material::{MaterialEntry, RawMaterialEntry};
