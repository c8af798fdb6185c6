//! Input format detection.
//!
//! Datasets arrive as binary netCDF, as CDL (the `ncdump` text form) or as
//! the JSON form of [`Dataset`]. The format is decided from the content,
//! never from the file extension.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::dataset::cdl::parse_cdl;
use crate::dataset::schema::Dataset;
use crate::dataset::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Classic, 64-bit offset, CDF5 or netCDF-4 (HDF5) binary.
    Netcdf,
    Cdl,
    Json,
}

const NETCDF_CLASSIC_MAGICS: [&[u8]; 3] = [b"CDF\x01", b"CDF\x02", b"CDF\x05"];
const HDF5_MAGIC: &[u8] = b"\x89HDF\r\n\x1a\n";

fn is_netcdf(content: &[u8]) -> bool {
    content.starts_with(HDF5_MAGIC)
        || NETCDF_CLASSIC_MAGICS
            .iter()
            .any(|magic| content.starts_with(magic))
}

/// Detect the format of raw file content.
pub fn detect_format(content: &[u8]) -> Result<DatasetFormat, LoadError> {
    if is_netcdf(content) {
        return Ok(DatasetFormat::Netcdf);
    }

    let text = String::from_utf8_lossy(content);
    let mut body = text.trim_start_matches('\u{feff}').trim_start();
    // leading `//` comment lines are valid CDL
    while body.starts_with("//") {
        body = body.find('\n').map_or("", |i| &body[i + 1..]).trim_start();
    }

    if body.starts_with('{') {
        Ok(DatasetFormat::Json)
    } else if body.starts_with("netcdf") {
        Ok(DatasetFormat::Cdl)
    } else {
        Err(LoadError::UnknownFormat)
    }
}

/// Parse dataset text in either text format.
pub fn parse_dataset_str(content: &str) -> Result<Dataset, LoadError> {
    let dataset = match detect_format(content.as_bytes())? {
        DatasetFormat::Netcdf => return Err(LoadError::BinaryText),
        DatasetFormat::Cdl => parse_cdl(content)?,
        DatasetFormat::Json => serde_json::from_str(content)?,
    };
    Ok(dataset)
}

/// Open a dataset file, detecting its format from the content.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let mut head = Vec::with_capacity(HDF5_MAGIC.len());
    File::open(path)?
        .take(HDF5_MAGIC.len() as u64)
        .read_to_end(&mut head)?;

    let (format, dataset) = if is_netcdf(&head) {
        (DatasetFormat::Netcdf, load_netcdf(path)?)
    } else {
        let content = std::fs::read(path)?;
        let format = detect_format(&content)?;
        let text = String::from_utf8(content).map_err(|_| LoadError::UnknownFormat)?;
        (format, parse_dataset_str(&text)?)
    };

    tracing::debug!(
        path = %path.display(),
        ?format,
        dimensions = dataset.dimensions.len(),
        variables = dataset.variables.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

#[cfg(feature = "netcdf")]
fn load_netcdf(path: &Path) -> Result<Dataset, LoadError> {
    Ok(crate::dataset::netcdf_reader::read_netcdf(path)?)
}

#[cfg(not(feature = "netcdf"))]
fn load_netcdf(_path: &Path) -> Result<Dataset, LoadError> {
    Err(LoadError::NetcdfDisabled)
}
