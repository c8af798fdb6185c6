//! cfradial-check - CF/Radial 1.2 conformance checking library
//!
//! Checks that a radar or lidar dataset carries the dimensions, variables
//! and attributes the CF/Radial 1.2 convention requires, with the expected
//! types, shapes, units and values.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfradial_check::{CfRadialCore, CheckOptions};
//! use std::path::Path;
//!
//! let report = CfRadialCore::check_file(
//!     Path::new("cfrad.20230401_120000.cdl"),
//!     CheckOptions::default(),
//! ).unwrap();
//!
//! for diagnostic in &report.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! ```
//!
//! # Input
//!
//! Datasets are read from CDL, the text form printed by `ncdump`, or from a
//! JSON rendering of [`Dataset`]. With the `netcdf` feature, binary netCDF
//! files (classic, 64-bit offset, CDF5 and netCDF-4) are opened directly.
//! Datasets can also be assembled in code with the builder methods on
//! [`Dataset`] and [`Variable`].
//!
//! # Features
//!
//! - **Rule tables**: global attributes, dimensions and clause 4 variables
//! - **Cross-checks**: enumerated values, UTC timestamps, time units
//! - **Sub-conventions**: instrument, radar and lidar parameters, radar
//!   calibration, platform velocity, geometry correction

pub mod checker;
pub mod core;
pub mod dataset;
pub mod diagnostics;

// Re-export main types
pub use checker::{check_cfradial_compliance, ConformanceContext, SECTIONS};
pub use core::{CfRadialCore, CheckError, CheckOptions, CheckReport, CheckStats};
pub use dataset::{
    load_dataset, parse_dataset_str, AttrValue, AttributeSource, DataType, Dataset, LoadError,
    Variable, VariableData,
};
pub use diagnostics::{Category, Diagnostic, DiagnosticKind, Diagnostics};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AttrValue, AttributeSource, Category, CfRadialCore, CheckError, CheckOptions, CheckReport,
        CheckStats, DataType, Dataset, Diagnostic, DiagnosticKind, Variable,
    };
}
