//! Python bindings for the emissions calculator.
//!
//! Entries are passed as a list of dicts in the same shape the data-entry form produces:
//!
//! ```python
//! from cemco2._lib.calculator import calculate_cement_emissions
//!
//! result = calculate_cement_emissions([
//!     {"type": "processed_material", "value": 1000},
//!     {"type": "processed_material", "value": 65, "materialValue": 1000,
//!      "attribute": "CaO content (incl. free lime)"},
//! ])
//! result["correctedCalcinationFactor"]
//! ```

use crate::calculator::calculate_from_raw;
use crate::errors::CemError;
use crate::format;
use crate::material::RawMaterialEntry;
use crate::numeric::{self, NumericInput};
use crate::species::{self, Species, MOLECULAR_WEIGHTS};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

impl From<CemError> for PyErr {
    fn from(e: CemError) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

/// Calculate cement process emissions from a list of entry dicts.
///
/// Malformed numbers count as zero and unrecognised entries are ignored. Raises
/// `ValueError` if `entries` is not a list of dicts.
#[pyfunction]
#[pyo3(name = "calculate_cement_emissions")]
fn py_calculate_cement_emissions<'py>(
    py: Python<'py>,
    entries: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyAny>> {
    let entries: Vec<RawMaterialEntry> =
        pythonize::depythonize(entries).map_err(|e| PyValueError::new_err(format!("{}", e)))?;
    let result = calculate_from_raw(&entries);
    pythonize::pythonize(py, &result).map_err(|e| PyValueError::new_err(format!("{}", e)))
}

/// Coerce any object to a float, treating anything unreadable as 0.0.
#[pyfunction]
#[pyo3(name = "to_number_or_zero")]
fn py_to_number_or_zero(value: &Bound<'_, PyAny>) -> f64 {
    let input = pythonize::depythonize::<Option<NumericInput>>(value)
        .ok()
        .flatten();
    numeric::to_number_or_zero(input.as_ref())
}

#[pyfunction]
#[pyo3(name = "format_number")]
fn py_format_number(num: f64) -> String {
    format::format_number(num)
}

/// Molar mass for a chemical symbol, or 0.0 if the symbol is unknown.
#[pyfunction]
#[pyo3(name = "molecular_weight")]
fn py_molecular_weight(symbol: &str) -> f64 {
    species::molecular_weight(symbol)
}

/// Molar mass for a chemical symbol. Raises `ValueError` if the symbol is unknown.
#[pyfunction]
#[pyo3(name = "molar_mass")]
fn py_molar_mass(symbol: &str) -> PyResult<f64> {
    Ok(symbol.parse::<Species>()?.molar_mass())
}

#[pymodule]
pub fn calculator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_calculate_cement_emissions, m)?)?;
    m.add_function(wrap_pyfunction!(py_to_number_or_zero, m)?)?;
    m.add_function(wrap_pyfunction!(py_format_number, m)?)?;
    m.add_function(wrap_pyfunction!(py_molecular_weight, m)?)?;
    m.add_function(wrap_pyfunction!(py_molar_mass, m)?)?;

    let weights: HashMap<&str, f64> = MOLECULAR_WEIGHTS
        .iter()
        .map(|(species, mass)| (species.symbol(), *mass))
        .collect();
    m.add("MOLECULAR_WEIGHTS", weights)?;
    Ok(())
}
