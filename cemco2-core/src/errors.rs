use thiserror::Error;

/// Error type for the strict parsing paths.
///
/// The emissions calculation itself never fails. These errors only surface when a caller
/// asks for a label, symbol or document to be interpreted strictly.
#[derive(Error, Debug)]
pub enum CemError {
    #[error("Unknown chemical species '{0}'. Expected one of CaO, MgO, CO2, Ca, Mg")]
    UnknownSpecies(String),
    #[error("Unknown material category '{0}'")]
    UnknownCategory(String),
    #[error("Attribute {attribute:?} is not measured for {category} entries")]
    UnsupportedAttribute {
        category: String,
        attribute: Option<String>,
    },
    #[error("Invalid month '{0}'. Expected a month name, abbreviation or number 1-12")]
    InvalidMonth(String),
    #[error("Could not read TOML document: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("Could not write TOML document: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Convenience type for `Result<T, CemError>`.
pub type CemResult<T> = Result<T, CemError>;
