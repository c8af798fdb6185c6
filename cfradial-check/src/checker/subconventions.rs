//! Clause 5: the CF/Radial sub-conventions.
//!
//! Each sub-convention is optional as a whole. Its variables are checked
//! when present, and its `meta_group` tag must be applied consistently.

use crate::checker::common::{
    check_char_rows_choice, check_meta_group, first_dimension_label, parse_utc_time, read_chars,
};
use crate::checker::standard::*;
use crate::checker::table::VariableTable;
use crate::checker::ConformanceContext;
use crate::dataset::{Dataset, Variable};
use crate::diagnostics::{Category, Diagnostics};

pub(crate) fn check_instrument_parameters(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    let section = "5.1";

    VariableTable::new("instrument_parameters variable", section)
        .with_rules(INSTRUMENT_PARAMETER_VARIABLES)
        .check(dataset, diag);

    // one mode string per sweep
    for (name, _) in MODE_VARIABLES {
        let Some(var) = dataset.variable(name) else {
            continue;
        };
        if var.first_dimension() != Some("sweep") {
            diag.error(
                section,
                Category::ShapeMismatch,
                format!(
                    "instrument_parameters {} must have a first dimension of sweep, not {}",
                    name,
                    first_dimension_label(var)
                ),
            );
        }
    }

    for (name, choices) in MODE_VARIABLES {
        check_char_rows_choice(diag, section, dataset, "instrument_parameters", name, choices);
    }

    check_meta_group(diag, dataset, &INSTRUMENT_PARAMETERS);
}

pub(crate) fn check_radar_parameters(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("radar_parameters", "5.2")
        .with_rules(RADAR_PARAMETER_VARIABLES)
        .check(dataset, diag);
    check_meta_group(diag, dataset, &RADAR_PARAMETERS);
}

pub(crate) fn check_lidar_parameters(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("lidar_parameters", "5.3")
        .with_rules(LIDAR_PARAMETER_VARIABLES)
        .check(dataset, diag);
    check_meta_group(diag, dataset, &LIDAR_PARAMETERS);
}

pub(crate) fn check_radar_calibration_group(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    check_meta_group(diag, dataset, &RADAR_CALIBRATION);
}

pub(crate) fn check_radar_calibration_variables(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("radar_calibration", "5.4.2")
        .with_rules(RADAR_CALIBRATION_VARIABLES)
        .check(dataset, diag);

    if let Some(var) = dataset.variable("r_calib_time") {
        check_calibration_times(var, diag);
    }
}

/// One timestamp per calibration, indexed by the `r_calib` dimension.
fn check_calibration_times(var: &Variable, diag: &mut Diagnostics) {
    let section = "5.4.2";

    if var.first_dimension() != Some("r_calib") {
        diag.error(
            section,
            Category::ShapeMismatch,
            format!(
                "radar_calibration r_calib_time must have first dimension of 'r_calib' not '{}'",
                first_dimension_label(var)
            ),
        );
        return;
    }

    let Some(rows) = read_chars(diag, section, "radar_calibration", var, Variable::char_rows) else {
        return;
    };
    for (i, value) in rows.iter().enumerate() {
        if parse_utc_time(value).is_err() {
            diag.error(
                section,
                Category::FormatViolation,
                format!(
                    "radar_calibration r_calib_time has an invalid time format in position {}: {} must be {}",
                    i, value, TIME_FORMAT_HINT
                ),
            );
        }
    }
}

pub(crate) fn check_platform_velocity(
    dataset: &Dataset,
    ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    if ctx.mobile_platform {
        VariableTable::new("platform_velocity", "5.6")
            .with_rules(PLATFORM_VELOCITY_VARIABLES)
            .check(dataset, diag);
        check_meta_group(diag, dataset, &PLATFORM_VELOCITY);
        return;
    }

    for name in PLATFORM_VELOCITY.variables {
        if dataset.has_variable(name) {
            diag.error(
                "5.6",
                Category::StructuralViolation,
                format!(
                    "variable {} should not exist as the platform is stationary.",
                    name
                ),
            );
        }
    }
}

pub(crate) fn check_geometry_correction(
    dataset: &Dataset,
    _ctx: &ConformanceContext,
    diag: &mut Diagnostics,
) {
    VariableTable::new("geometry_correction", "5.7")
        .with_rules(GEOMETRY_CORRECTION_VARIABLES)
        .check(dataset, diag);
    check_meta_group(diag, dataset, &GEOMETRY_CORRECTION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataType;

    fn run(
        check: fn(&Dataset, &ConformanceContext, &mut Diagnostics),
        dataset: &Dataset,
    ) -> Vec<String> {
        let ctx = ConformanceContext::from_dataset(dataset);
        let mut diag = Diagnostics::new(false);
        check(dataset, &ctx, &mut diag);
        diag.into_vec().iter().map(|d| d.to_string()).collect()
    }

    fn mode_variable(name: &str, dims: &[&str], rows: &[&str]) -> Variable {
        Variable::new(name, DataType::Char, dims)
            .with_text_attribute("meta_group", "instrument_parameters")
            .with_rows(rows.iter().copied())
    }

    #[test]
    fn test_empty_dataset_passes_sub_conventions() {
        let dataset = Dataset::new();
        let checks: [fn(&Dataset, &ConformanceContext, &mut Diagnostics); 7] = [
            check_instrument_parameters,
            check_radar_parameters,
            check_lidar_parameters,
            check_radar_calibration_group,
            check_radar_calibration_variables,
            check_platform_velocity,
            check_geometry_correction,
        ];
        for check in checks {
            assert!(run(check, &dataset).is_empty());
        }
    }

    #[test]
    fn test_mode_variables_first_dimension_and_values() {
        let dataset = Dataset::new()
            .with_variable(mode_variable(
                "prt_mode",
                &["sweep", "string_length"],
                &["fixed", "random"],
            ))
            .with_variable(mode_variable("follow_mode", &["time", "string_length"], &["none"]))
            .with_variable(mode_variable("polarization_mode", &[], &["circular"]));

        assert_eq!(
            run(check_instrument_parameters, &dataset),
            vec![
                "ERROR: (5.1) instrument_parameters follow_mode must have a first dimension of sweep, not time",
                "ERROR: (5.1) instrument_parameters polarization_mode must have a first dimension of sweep, not none",
                "ERROR: (5.1) instrument_parameters 'prt_mode' has an invalid value in position 1: random must be one of fixed staggered dual",
            ]
        );
    }

    #[test]
    fn test_lidar_corrected_names_are_members() {
        let dataset = Dataset::new()
            .with_variable(
                Variable::new("lidar_aperture_efficiency", DataType::Float, &[])
                    .with_text_attribute("units", "percent")
                    .with_text_attribute("meta_group", "lidar_parameters"),
            )
            .with_variable(
                Variable::new("lidar_peak_power", DataType::Float, &[])
                    .with_text_attribute("units", "watts")
                    .with_text_attribute("meta_group", "lidar_parameters"),
            );
        assert!(run(check_lidar_parameters, &dataset).is_empty());
    }

    #[test]
    fn test_calibration_time_rows() {
        let dataset = Dataset::new().with_variable(
            Variable::new("r_calib_time", DataType::Char, &["r_calib", "string_length"])
                .with_text_attribute("meta_group", "radar_calibration")
                .with_rows(["2023-04-01T00:00:00Z", "yesterday"]),
        );
        assert_eq!(
            run(check_radar_calibration_variables, &dataset),
            vec!["ERROR: (5.4.2) radar_calibration r_calib_time has an invalid time format in position 1: yesterday must be yyyy-mm-ddThh:mm:ssZ"]
        );
    }

    #[test]
    fn test_calibration_time_first_dimension() {
        let dataset = Dataset::new().with_variable(
            Variable::new("r_calib_time", DataType::Char, &["time", "string_length"])
                .with_rows(["not even checked"]),
        );
        assert_eq!(
            run(check_radar_calibration_variables, &dataset),
            vec!["ERROR: (5.4.2) radar_calibration r_calib_time must have first dimension of 'r_calib' not 'time'"]
        );
    }

    #[test]
    fn test_platform_velocity_on_stationary_platform() {
        let dataset = Dataset::new()
            .with_variable(Variable::new("eastward_velocity", DataType::Float, &["time"]))
            .with_variable(Variable::new("roll_rate", DataType::Float, &["time"]));
        assert_eq!(
            run(check_platform_velocity, &dataset),
            vec![
                "ERROR: (5.6) variable eastward_velocity should not exist as the platform is stationary.",
                "ERROR: (5.6) variable roll_rate should not exist as the platform is stationary.",
            ]
        );
    }

    #[test]
    fn test_platform_velocity_required_when_mobile() {
        let dataset = Dataset::new().with_text_attribute("platform_is_mobile", "true");
        let messages = run(check_platform_velocity, &dataset);
        assert_eq!(messages.len(), PLATFORM_VELOCITY.variables.len());
        assert_eq!(
            messages[0],
            "ERROR: (5.6) Required platform_velocity 'eastward_velocity' missing."
        );
    }

    #[test]
    fn test_geometry_correction_units() {
        let dataset = Dataset::new().with_variable(
            Variable::new("eastward_ground_speed_correction", DataType::Float, &[])
                .with_text_attribute("units", "meter_per_second")
                .with_text_attribute("meta_group", "geometry_correction"),
        );
        assert_eq!(
            run(check_geometry_correction, &dataset),
            vec!["ERROR: (5.7) geometry_correction 'eastward_ground_speed_correction' has incorrect units: meter_per_second should be meters_per_second"]
        );
    }
}
