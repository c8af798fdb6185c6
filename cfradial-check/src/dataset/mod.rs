pub mod cdl;
pub mod format_detector;
#[cfg(feature = "netcdf")]
pub mod netcdf_reader;
pub mod schema;

use thiserror::Error;

// Re-export for convenience
pub use cdl::{parse_cdl, CdlError, CdlParser};
pub use format_detector::{detect_format, load_dataset, parse_dataset_str, DatasetFormat};
#[cfg(feature = "netcdf")]
pub use netcdf_reader::{read_netcdf, NetcdfError};
pub use schema::*;

/// Failure to open a dataset. Loading either succeeds completely or no
/// conformance check runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CDL parse error: {0}")]
    Cdl(#[from] CdlError),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "netcdf")]
    #[error("netCDF read error: {0}")]
    Netcdf(#[from] NetcdfError),
    #[error(
        "binary netCDF input needs the `netcdf` feature; rebuild with it or convert the file to CDL with `ncdump`"
    )]
    NetcdfDisabled,
    #[error("binary netCDF content must be loaded from a file")]
    BinaryText,
    #[error("unrecognized dataset format (expected netCDF, CDL text or JSON)")]
    UnknownFormat,
}
