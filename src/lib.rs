//! Cement process-emissions calculator
//!
//! Re-exports [`cemco2_core`] and, with the `python` feature, builds the `cemco2._lib`
//! extension module.

pub use cemco2_core::*;

#[cfg(feature = "python")]
mod python;
