//! Binary netCDF loading. Runs with `--features netcdf`.
#![cfg(feature = "netcdf")]

use cfradial_check::prelude::*;
use cfradial_check::{load_dataset, VariableData};
use std::io::Write;

const NC_DIMENSION: u32 = 10;
const NC_VARIABLE: u32 = 11;
const NC_ATTRIBUTE: u32 = 12;
const NC_CHAR: u32 = 2;
const NC_INT: u32 = 4;
const NC_FLOAT: u32 = 5;

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn pad(buf: &mut Vec<u8>) {
    while buf.len() % 4 != 0 {
        buf.push(0);
    }
}

fn put_name(buf: &mut Vec<u8>, name: &str) {
    put_u32(buf, name.len() as u32);
    buf.extend_from_slice(name.as_bytes());
    pad(buf);
}

fn put_text_attribute(buf: &mut Vec<u8>, name: &str, value: &str) {
    put_name(buf, name);
    put_u32(buf, NC_CHAR);
    put_u32(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
    pad(buf);
}

/// Write a variable header and return the offset of its `begin` field.
fn put_variable(
    buf: &mut Vec<u8>,
    name: &str,
    dim_ids: &[u32],
    attributes: &[(&str, &str)],
    nc_type: u32,
    vsize: u32,
) -> usize {
    put_name(buf, name);
    put_u32(buf, dim_ids.len() as u32);
    for id in dim_ids {
        put_u32(buf, *id);
    }
    if attributes.is_empty() {
        put_u32(buf, 0);
        put_u32(buf, 0);
    } else {
        put_u32(buf, NC_ATTRIBUTE);
        put_u32(buf, attributes.len() as u32);
        for (attr_name, value) in attributes {
            put_text_attribute(buf, attr_name, value);
        }
    }
    put_u32(buf, nc_type);
    put_u32(buf, vsize);
    let begin = buf.len();
    put_u32(buf, 0);
    begin
}

/// A classic-format file with two dimensions, two global attributes, two
/// char variables and one float variable.
fn classic_file() -> Vec<u8> {
    let mut buf = b"CDF\x01".to_vec();
    put_u32(&mut buf, 0);

    put_u32(&mut buf, NC_DIMENSION);
    put_u32(&mut buf, 2);
    put_name(&mut buf, "sweep");
    put_u32(&mut buf, 2);
    put_name(&mut buf, "string_length");
    put_u32(&mut buf, 8);

    put_u32(&mut buf, NC_ATTRIBUTE);
    put_u32(&mut buf, 2);
    put_text_attribute(&mut buf, "Conventions", "CF/Radial");
    put_name(&mut buf, "scan_id");
    put_u32(&mut buf, NC_INT);
    put_u32(&mut buf, 1);
    put_u32(&mut buf, 7);

    put_u32(&mut buf, NC_VARIABLE);
    put_u32(&mut buf, 3);
    let begins = [
        put_variable(&mut buf, "platform_type", &[1], &[], NC_CHAR, 8),
        put_variable(&mut buf, "sweep_mode", &[0, 1], &[], NC_CHAR, 16),
        put_variable(
            &mut buf,
            "fixed_angle",
            &[0],
            &[("units", "degrees")],
            NC_FLOAT,
            8,
        ),
    ];

    let mut angles = 0.5f32.to_be_bytes().to_vec();
    angles.extend_from_slice(&1.5f32.to_be_bytes());
    let payloads: [&[u8]; 3] = [b"fixed\0\0\0", b"rhi\0\0\0\0\0sector\0\0", &angles];

    for (begin, payload) in begins.into_iter().zip(payloads) {
        let offset = buf.len() as u32;
        buf[begin..begin + 4].copy_from_slice(&offset.to_be_bytes());
        buf.extend_from_slice(payload);
    }
    buf
}

fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
    file.write_all(bytes).expect("Should write temp file");
    file
}

#[test]
fn test_load_classic_netcdf() {
    let file = write_temp(&classic_file());
    let dataset = load_dataset(file.path()).expect("Should read netCDF file");

    assert_eq!(dataset.dimension_len("sweep"), Some(2));
    assert_eq!(dataset.dimension_len("string_length"), Some(8));
    assert_eq!(dataset.text_attribute("Conventions"), Some("CF/Radial"));
    assert_eq!(
        dataset.attribute("scan_id"),
        Some(&AttrValue::scalar(DataType::Int, 7.0))
    );

    let names: Vec<&str> = dataset.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["platform_type", "sweep_mode", "fixed_angle"]);

    let platform_type = dataset.variable("platform_type").unwrap();
    assert_eq!(platform_type.dtype, DataType::Char);
    assert_eq!(platform_type.dimensions, vec!["string_length"]);
    assert_eq!(platform_type.char_value().unwrap(), "fixed");

    let sweep_mode = dataset.variable("sweep_mode").unwrap();
    assert!(matches!(sweep_mode.data, Some(VariableData::Rows(_))));
    assert_eq!(sweep_mode.char_rows().unwrap(), vec!["rhi", "sector"]);

    let fixed_angle = dataset.variable("fixed_angle").unwrap();
    assert_eq!(fixed_angle.dtype, DataType::Float);
    assert_eq!(fixed_angle.text_attribute("units"), Some("degrees"));
    assert!(fixed_angle.data.is_none());
}

#[test]
fn test_netcdf_char_values_are_checked() {
    let file = write_temp(&classic_file());
    let report = CfRadialCore::check_file(file.path(), CheckOptions::default())
        .expect("Should check netCDF file");

    // both char variables carry valid values
    assert!(report
        .diagnostics
        .iter()
        .all(|d| d.category != Category::Unchecked && d.category != Category::EnumViolation));
}

#[test]
fn test_empty_classic_netcdf_is_checked() {
    let mut bytes = b"CDF\x01".to_vec();
    bytes.resize(32, 0);
    let file = write_temp(&bytes);

    let report = CfRadialCore::check_file(file.path(), CheckOptions::default())
        .expect("Should open an empty netCDF file");
    assert!(report.has_errors());
    assert!(report.diagnostics.iter().any(|d| d.to_string()
        == "ERROR: (4.1) Required global attribute 'Conventions' missing."));
}
