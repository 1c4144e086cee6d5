//! Daily potential and reference evapotranspiration from standard
//! meteorological records.
//!
//! Building blocks live in [`meteo`], [`solar`], [`radiation`] and
//! [`resistance`]; the estimators in [`pet`] combine them over a
//! [`Weather`] record.

pub mod meteo;
pub mod model;
pub mod pet;
#[cfg(feature = "python")]
mod python;
pub mod radiation;
pub mod resistance;
pub mod solar;

pub use model::{DailySeries, Error, Requirement, Site, Variable, Weather};
pub use pet::{all_estimators, Estimator};

#[cfg(feature = "python")]
pyo3_stub_gen::define_stub_info_gatherer!(stub_info);
