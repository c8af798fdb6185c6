//! Clauses 3 and 4: the CF/Radial base conventions.

use crate::checker::common::{
    check_attribute_choice, check_char_choice, check_char_rows_choice, check_time_format,
    parse_utc_time, read_chars,
};
use crate::checker::standard::*;
use crate::checker::table::{AttributeRule, AttributeTable, VariableTable};
use crate::checker::ConformanceContext;
use crate::dataset::{AttributeSource, DataType, Dataset, Variable};
use crate::diagnostics::{Category, Diagnostics};

const TIME_UNITS_PREFIX: &str = "seconds since ";

/// 3: the Conventions attribute, when present, must name CF/Radial.
pub(crate) fn check_conventions(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let Some(conventions) = dataset.attribute("Conventions") else {
        return;
    };
    let names_cf_radial = conventions
        .as_text()
        .map_or(false, |c| c.contains("CF/Radial"));
    if !names_cf_radial {
        diag.error(
            "3",
            Category::ValueMismatch,
            "Convention attribute does not contain 'CF/Radial'",
        );
    }
}

pub(crate) fn check_global_attributes(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    AttributeTable::new("global attribute", "4.1")
        .with_rules(GLOBAL_ATTRIBUTES)
        .check(dataset, diag);

    for name in ["platform_is_mobile", "n_gates_vary"] {
        check_attribute_choice(diag, "4.1", dataset, "global attribute", name, BOOLEAN_VALUES);
    }
}

pub(crate) fn check_dimensions(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let section = "4.2";

    for name in REQUIRED_DIMENSIONS {
        if !dataset.has_dimension(name) {
            diag.error(
                section,
                Category::MissingRequired,
                format!("Required dimension '{}' missing.", name),
            );
        }
    }

    let has_n_points = dataset.has_dimension("n_points");
    if ctx.n_gates_vary && !has_n_points {
        diag.error(
            section,
            Category::MissingRequired,
            "Dimension 'n_points' is required and missing.",
        );
    }
    if !ctx.n_gates_vary && has_n_points {
        diag.error(
            section,
            Category::StructuralViolation,
            "Dimension 'n_points' must not be included.",
        );
    }

    if !dataset.has_dimension("frequency") {
        diag.note(section, "Optional dimension 'frequency' missing.");
    }
}

pub(crate) fn check_global_variables(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let section = "4.3";
    let text = "global variable";

    VariableTable::new(text, section)
        .with_rules(GLOBAL_VARIABLES)
        .check(dataset, diag);

    check_char_choice(diag, section, dataset, text, "platform_type", PLATFORM_TYPES);
    check_char_choice(diag, section, dataset, text, "instrument_type", INSTRUMENT_TYPES);
    check_char_choice(diag, section, dataset, text, "primary_axis", PRIMARY_AXES);

    for name in ["time_coverage_start", "time_coverage_end", "time_reference"] {
        check_time_format(diag, section, dataset, text, name);
    }
}

pub(crate) fn check_coordinate_variables(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("coordinate variable", "4.4")
        .with_rules(COORDINATE_VARIABLES)
        .check(dataset, diag);
}

pub(crate) fn check_time_attributes(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let Some(time) = dataset.variable("time") else {
        return;
    };
    AttributeTable::new("time attribute", "4.4.1")
        .with_rules(TIME_ATTRIBUTES)
        .check(time, diag);

    // a numeric units attribute is already reported as a type mismatch
    if let Some(units) = time.text_attribute("units") {
        check_time_units(dataset, units, diag);
    }
}

/// `units` must read `seconds since yyyy-mm-ddThh:mm:ssZ`, and the timestamp
/// must agree with `time_reference`, or `time_coverage_start` without one.
fn check_time_units(dataset: &Dataset, units: &str, diag: &mut Diagnostics) {
    let section = "4.4.1";

    if !units.starts_with(TIME_UNITS_PREFIX) {
        diag.error(
            section,
            Category::FormatViolation,
            format!(
                "time attribute 'units' has an invalid format: {} should begin with '{}'",
                units, TIME_UNITS_PREFIX
            ),
        );
    }

    let chars: Vec<char> = units.chars().collect();
    let time_str: String = chars[chars.len().saturating_sub(20)..].iter().collect();
    if parse_utc_time(&time_str).is_err() {
        diag.error(
            section,
            Category::FormatViolation,
            format!(
                "'time' attribute 'units' has an invalid formatted time value: {} should be {}",
                time_str, TIME_FORMAT_HINT
            ),
        );
    }

    let reference = dataset
        .variable("time_reference")
        .or_else(|| dataset.variable("time_coverage_start"));
    let Some(reference) = reference else {
        return;
    };
    let Some(reference_time) = read_chars(
        diag,
        section,
        "global variable",
        reference,
        Variable::char_string,
    ) else {
        return;
    };
    if reference_time != time_str {
        diag.error(
            section,
            Category::CrossReferenceViolation,
            format!(
                "time attribute 'units' does not match time in {} variable: {} versus {}",
                reference.name, time_str, reference_time
            ),
        );
    }
}

pub(crate) fn check_range_attributes(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let Some(range) = dataset.variable("range") else {
        return;
    };
    let text = "range attribute";
    AttributeTable::new(text, "4.4.2")
        .with_rules(RANGE_ATTRIBUTES)
        .check(range, diag);
    check_attribute_choice(diag, "4.4.2", range, text, "spacing_is_constant", BOOLEAN_VALUES);
}

pub(crate) fn check_ray_dimension_variables(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let table =
        VariableTable::new("ray dimension variable", "4.5").with_rules(RAY_DIMENSION_VARIABLES);
    if ctx.n_gates_vary {
        table.check(dataset, diag);
        return;
    }
    for name in table.names() {
        if dataset.has_variable(name) {
            diag.error(
                "4.5",
                Category::StructuralViolation,
                format!(
                    "ray dimension variable '{}' must not exist when n_gates_vary is false.",
                    name
                ),
            );
        }
    }
}

pub(crate) fn check_location_variables(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let rules = if ctx.mobile_platform {
        LOCATION_VARIABLES_MOBILE
    } else {
        LOCATION_VARIABLES_FIXED
    };
    VariableTable::new("location variable", "4.6")
        .with_rules(rules)
        .check(dataset, diag);
}

pub(crate) fn check_sweep_variables(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let text = "sweep variable";
    VariableTable::new(text, "4.7")
        .with_rules(SWEEP_VARIABLES)
        .check(dataset, diag);
    check_char_rows_choice(diag, "4.7", dataset, text, "sweep_mode", SWEEP_MODES);
}

pub(crate) fn check_sensor_pointing_variables(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("sensor pointing variable", "4.8")
        .with_rules(SENSOR_POINTING_VARIABLES)
        .check(dataset, diag);
}

pub(crate) fn check_azimuth_attributes(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    if let Some(azimuth) = dataset.variable("azimuth") {
        AttributeTable::new("azimuth attribute", "4.8.1")
            .with_rules(AZIMUTH_ATTRIBUTES)
            .check(azimuth, diag);
    }
}

pub(crate) fn check_elevation_attributes(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    if let Some(elevation) = dataset.variable("elevation") {
        AttributeTable::new("elevation attribute", "4.8.2")
            .with_rules(ELEVATION_ATTRIBUTES)
            .check(elevation, diag);
    }
}

pub(crate) fn check_georeference_variables(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    if ctx.mobile_platform {
        VariableTable::new("moving platform geo-reference variable", "4.9")
            .with_rules(GEOREFERENCE_VARIABLE_RULES)
            .check(dataset, diag);
        return;
    }
    for name in GEOREFERENCE_VARIABLES {
        if dataset.has_variable(name) {
            diag.error(
                "4.9",
                Category::StructuralViolation,
                format!("variable '{}' must be omitted for fixed platforms.", name),
            );
        }
    }
}

/// 4.10: every variable shaped like field data is checked as a moment.
pub(crate) fn check_field_variables(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    for var in dataset.variables().filter(|v| is_field_variable(v, ctx)) {
        if !FIELD_TYPES.contains(&var.dtype) {
            diag.error(
                "4.10",
                Category::TypeMismatch,
                format!("field variable '{}' has invalid type: {}", var.name, var.dtype),
            );
        }
        field_attribute_table(var, ctx).check(var, diag);
    }
}

/// Field data is dimensioned `(time, range)`, or `(n_points)` when the
/// number of gates varies by ray.
pub fn is_field_variable(var: &Variable, ctx: &ConformanceContext) -> bool {
    var.has_dimensions(&["time", "range"])
        || (ctx.n_gates_vary && var.has_dimensions(&["n_points"]))
}

/// Attribute rules for one field variable. Packed integer fields also need
/// their scaling attributes, and `_FillValue` must share the field's type.
pub fn field_attribute_table(var: &Variable, ctx: &ConformanceContext) -> AttributeTable {
    let coordinates = if ctx.mobile_platform {
        FIELD_COORDINATES_MOBILE
    } else {
        FIELD_COORDINATES_FIXED
    };

    let mut fill_value = AttributeRule::required("_FillValue");
    if !var.dtype.is_text() {
        fill_value = fill_value.dtype(var.dtype);
    }

    let mut table = AttributeTable::new(format!("field variable {}", var.name), "4.10");
    table.add(AttributeRule::optional("long_name").dtype(DataType::String));
    table.add(AttributeRule::required("standard_name").dtype(DataType::String));
    table.add(AttributeRule::required("units").dtype(DataType::String));
    table.add(fill_value);
    if PACKED_FIELD_TYPES.contains(&var.dtype) {
        table.add(AttributeRule::required("scale_factor").dtype(DataType::Float));
        table.add(AttributeRule::required("add_offset").dtype(DataType::Float));
    }
    table.add(
        AttributeRule::required("coordinates")
            .dtype(DataType::String)
            .value(coordinates),
    );
    table
}
