//! Binary netCDF input (classic, 64-bit offset, CDF5 and netCDF-4/HDF5)
//! through the `netcdf` crate.
//!
//! Only the root group is read. Character and string variables carry their
//! values, since the checker inspects them; numeric variables are loaded as
//! metadata only.

use std::collections::BTreeMap;
use std::path::Path;

use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;
use thiserror::Error;

use crate::dataset::schema::{AttrValue, DataType, Dataset, Variable, VariableData};

#[derive(Debug, Error)]
pub enum NetcdfError {
    #[error(transparent)]
    Library(#[from] netcdf::Error),
    #[error("variable '{0}' has a user-defined type")]
    UnsupportedType(String),
}

/// Open a netCDF file and copy its root group into a [`Dataset`].
pub fn read_netcdf(path: &Path) -> Result<Dataset, NetcdfError> {
    let file = netcdf::open(path)?;
    let mut dataset = Dataset::new();

    for dim in file.dimensions() {
        dataset.dimensions.insert(dim.name(), dim.len());
    }

    for attr in file.attributes() {
        let value = attr.value()?;
        if let Some(value) = convert_attribute(value) {
            dataset.attributes.insert(attr.name().to_string(), value);
        }
    }

    for nc_var in file.variables() {
        let name = nc_var.name();
        let dtype = data_type(&nc_var.vartype())
            .ok_or_else(|| NetcdfError::UnsupportedType(name.clone()))?;
        let mut var = Variable {
            name,
            dtype,
            dimensions: nc_var.dimensions().iter().map(|d| d.name()).collect(),
            attributes: BTreeMap::new(),
            data: None,
        };
        for attr in nc_var.attributes() {
            let value = attr.value()?;
            if let Some(value) = convert_attribute(value) {
                var.attributes.insert(attr.name().to_string(), value);
            }
        }
        var.data = match dtype {
            DataType::Char => Some(read_char_data(&nc_var)?),
            DataType::String => read_string_data(&nc_var)?,
            _ => None,
        };
        dataset.variables.push(var);
    }

    tracing::debug!(
        path = %path.display(),
        dimensions = dataset.dimensions.len(),
        variables = dataset.variables.len(),
        "read netCDF file"
    );
    Ok(dataset)
}

fn data_type(vartype: &NcVariableType) -> Option<DataType> {
    let dtype = match vartype {
        NcVariableType::Char => DataType::Char,
        NcVariableType::String => DataType::String,
        NcVariableType::Int(IntType::I8) => DataType::Byte,
        NcVariableType::Int(IntType::U8) => DataType::UByte,
        NcVariableType::Int(IntType::I16) => DataType::Short,
        NcVariableType::Int(IntType::U16) => DataType::UShort,
        NcVariableType::Int(IntType::I32) => DataType::Int,
        NcVariableType::Int(IntType::U32) => DataType::UInt,
        NcVariableType::Int(IntType::I64) => DataType::Int64,
        NcVariableType::Int(IntType::U64) => DataType::UInt64,
        NcVariableType::Float(FloatType::F32) => DataType::Float,
        NcVariableType::Float(FloatType::F64) => DataType::Double,
        _ => return None,
    };
    Some(dtype)
}

fn numbers<T: Into<f64>>(values: Vec<T>) -> Vec<f64> {
    values.into_iter().map(Into::into).collect()
}

/// Char attributes arrive as `Str`. Attribute types the model has no
/// counterpart for are dropped.
fn convert_attribute(value: AttributeValue) -> Option<AttrValue> {
    let (dtype, values): (DataType, Vec<f64>) = match value {
        AttributeValue::Str(s) => return Some(AttrValue::Text(s)),
        AttributeValue::Strs(parts) => return Some(AttrValue::Text(parts.join(" "))),
        AttributeValue::Schar(v) => (DataType::Byte, vec![v.into()]),
        AttributeValue::Schars(vs) => (DataType::Byte, numbers(vs)),
        AttributeValue::Uchar(v) => (DataType::UByte, vec![v.into()]),
        AttributeValue::Uchars(vs) => (DataType::UByte, numbers(vs)),
        AttributeValue::Short(v) => (DataType::Short, vec![v.into()]),
        AttributeValue::Shorts(vs) => (DataType::Short, numbers(vs)),
        AttributeValue::Ushort(v) => (DataType::UShort, vec![v.into()]),
        AttributeValue::Ushorts(vs) => (DataType::UShort, numbers(vs)),
        AttributeValue::Int(v) => (DataType::Int, vec![v.into()]),
        AttributeValue::Ints(vs) => (DataType::Int, numbers(vs)),
        AttributeValue::Uint(v) => (DataType::UInt, vec![v.into()]),
        AttributeValue::Uints(vs) => (DataType::UInt, numbers(vs)),
        AttributeValue::Longlong(v) => (DataType::Int64, vec![v as f64]),
        AttributeValue::Longlongs(vs) => {
            (DataType::Int64, vs.into_iter().map(|v| v as f64).collect())
        }
        AttributeValue::Ulonglong(v) => (DataType::UInt64, vec![v as f64]),
        AttributeValue::Ulonglongs(vs) => {
            (DataType::UInt64, vs.into_iter().map(|v| v as f64).collect())
        }
        AttributeValue::Float(v) => (DataType::Float, vec![v.into()]),
        AttributeValue::Floats(vs) => (DataType::Float, numbers(vs)),
        AttributeValue::Double(v) => (DataType::Double, vec![v]),
        AttributeValue::Doubles(values) => (DataType::Double, values),
        #[allow(unreachable_patterns)]
        other => {
            tracing::warn!(?other, "attribute type not supported; ignored");
            return None;
        }
    };
    Some(AttrValue::Numeric { dtype, values })
}

/// A 0-D or 1-D char variable becomes one buffer; anything wider is split
/// into rows along its last dimension.
fn read_char_data(var: &netcdf::Variable) -> Result<VariableData, NetcdfError> {
    let lens: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let bytes = if lens.contains(&0) {
        Vec::new()
    } else {
        var.get_raw_values(..)?
    };

    if lens.len() < 2 {
        return Ok(VariableData::Text(decode_chars(&bytes)));
    }
    let width = lens[lens.len() - 1];
    let row_count: usize = lens[..lens.len() - 1].iter().product();
    let rows = if width == 0 {
        vec![String::new(); row_count]
    } else {
        bytes.chunks(width).map(decode_chars).collect()
    };
    Ok(VariableData::Rows(rows))
}

/// Scalar and 1-D string variables are read one element at a time. Wider
/// string arrays are left without values.
fn read_string_data(var: &netcdf::Variable) -> Result<Option<VariableData>, NetcdfError> {
    let lens: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let data = match lens.as_slice() {
        [] => Some(VariableData::Text(var.get_string(..)?)),
        [len] => {
            let rows = (0..*len)
                .map(|i| var.get_string([i]))
                .collect::<Result<Vec<_>, _>>()?;
            Some(VariableData::Rows(rows))
        }
        _ => {
            tracing::warn!(variable = %var.name(), "multi-dimensional string values not read");
            None
        }
    };
    Ok(data)
}

fn decode_chars(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
