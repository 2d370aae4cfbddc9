//! Molecular weights of the species involved in calcination
//!
//! Calcination decomposes carbonates into oxides and CO2:
//!
//! $$ CaCO_3 \rightarrow CaO + CO_2 \qquad MgCO_3 \rightarrow MgO + CO_2 $$
//!
//! One mole of oxide (or of the metal it contains) corresponds to one mole of released CO2,
//! so a mass of species $X$ converts to CO2 by the molar-mass ratio $M_{CO_2} / M_X$.

use crate::errors::{CemError, CemResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chemical species with a tabulated molar mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Calcium oxide (lime)
    CaO,
    /// Magnesium oxide (periclase)
    MgO,
    /// Carbon dioxide
    CO2,
    /// Calcium
    Ca,
    /// Magnesium
    Mg,
}

/// Molar masses of every [`Species`]
/// unit: g/mol
pub const MOLECULAR_WEIGHTS: &[(Species, f64)] = &[
    (Species::CaO, 56.0774),
    (Species::MgO, 40.3044),
    (Species::CO2, 44.01),
    (Species::Ca, 40.078),
    (Species::Mg, 24.305),
];

impl Species {
    /// All species in table order.
    pub const ALL: [Species; 5] = [
        Species::CaO,
        Species::MgO,
        Species::CO2,
        Species::Ca,
        Species::Mg,
    ];

    /// Molar mass of the species
    /// unit: g/mol
    pub fn molar_mass(self) -> f64 {
        match self {
            Species::CaO => MOLECULAR_WEIGHTS[0].1,
            Species::MgO => MOLECULAR_WEIGHTS[1].1,
            Species::CO2 => MOLECULAR_WEIGHTS[2].1,
            Species::Ca => MOLECULAR_WEIGHTS[3].1,
            Species::Mg => MOLECULAR_WEIGHTS[4].1,
        }
    }

    /// Chemical symbol as written in the molecular-weight table
    pub const fn symbol(self) -> &'static str {
        match self {
            Species::CaO => "CaO",
            Species::MgO => "MgO",
            Species::CO2 => "CO2",
            Species::Ca => "Ca",
            Species::Mg => "Mg",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Species {
    type Err = CemError;

    fn from_str(s: &str) -> CemResult<Self> {
        Species::ALL
            .into_iter()
            .find(|species| species.symbol() == s.trim())
            .ok_or_else(|| CemError::UnknownSpecies(s.to_string()))
    }
}

/// Mass of CO2 released per unit mass of `species`.
///
/// $$ r_X = \frac{M_{CO_2}}{M_X} $$
pub fn co2_per_unit_mass(species: Species) -> f64 {
    Species::CO2.molar_mass() / species.molar_mass()
}

/// Convert a mass of `species` into the mass of CO2 it corresponds to.
///
/// Evaluated as $m / M_X \cdot M_{CO_2}$ (moles first, then CO2 mass) so results agree
/// bit-for-bit with existing emission reports.
pub fn co2_equivalent(mass: f64, species: Species) -> f64 {
    mass / species.molar_mass() * Species::CO2.molar_mass()
}

/// Look up a molar mass by chemical symbol.
///
/// Unknown symbols yield `0.0` rather than an error. Use [`Species::from_str`] when an
/// unknown symbol should be reported.
pub fn molecular_weight(symbol: &str) -> f64 {
    symbol
        .parse::<Species>()
        .map(Species::molar_mass)
        .unwrap_or(0.0)
}
