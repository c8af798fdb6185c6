//! Checks shared by several clauses: enumerated values, UTC timestamps and
//! meta-group membership.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::checker::standard::{MetaGroup, TIME_FORMAT_HINT};
use crate::dataset::{AttributeSource, Dataset, DatasetError, Variable};
use crate::diagnostics::{Category, Diagnostics};

#[derive(Debug, Error, PartialEq)]
pub enum TimeFormatError {
    #[error("expected 20 characters shaped yyyy-mm-ddThh:mm:ssZ")]
    Shape,
    #[error("invalid calendar value: {0}")]
    Calendar(#[from] chrono::ParseError),
}

/// Parse a strict `yyyy-mm-ddThh:mm:ssZ` timestamp.
///
/// The shape is checked before chrono sees the string, since chrono accepts
/// single-digit fields and surrounding padding that the format forbids.
pub fn parse_utc_time(s: &str) -> Result<NaiveDateTime, TimeFormatError> {
    let bytes = s.as_bytes();
    if bytes.len() != 20 {
        return Err(TimeFormatError::Shape);
    }
    let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b'T',
        13 | 16 => *b == b':',
        19 => *b == b'Z',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return Err(TimeFormatError::Shape);
    }
    Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")?)
}

/// Decode a character variable, turning failures into diagnostics.
///
/// A variable that carries no values (a header-only dump) is reported as
/// unchecked. A payload that is not character data is a format violation.
pub(crate) fn read_chars<T>(
    diag: &mut Diagnostics,
    section: &str,
    text: &str,
    var: &Variable,
    decode: impl FnOnce(&Variable) -> Result<T, DatasetError>,
) -> Option<T> {
    match decode(var) {
        Ok(value) => Some(value),
        Err(DatasetError::NoData(_)) => {
            tracing::warn!(section, variable = %var.name, "no values loaded");
            diag.unchecked(
                section,
                format!("{} '{}' has no values; value checks skipped.", text, var.name),
            );
            None
        }
        Err(e) => {
            diag.error(
                section,
                Category::FormatViolation,
                format!("{} '{}' cannot be read as characters: {}", text, var.name, e),
            );
            None
        }
    }
}

/// An attribute limited to a fixed set of values. Absence is not checked.
pub fn check_attribute_choice<S: AttributeSource + ?Sized>(
    diag: &mut Diagnostics,
    section: &str,
    source: &S,
    text: &str,
    name: &str,
    choices: &[&str],
) {
    let Some(value) = source.attribute(name) else {
        return;
    };
    let valid = value
        .as_text()
        .map_or(false, |v| choices.contains(&v));
    if !valid {
        diag.error(
            section,
            Category::EnumViolation,
            format!(
                "{} '{}' has an invalid value: {} must be one of {}",
                text,
                name,
                value,
                choices.join(" ")
            ),
        );
    }
}

/// A character variable holding one string from a fixed set.
pub fn check_char_choice(
    diag: &mut Diagnostics,
    section: &str,
    dataset: &Dataset,
    text: &str,
    name: &str,
    choices: &[&str],
) {
    let Some(var) = dataset.variable(name) else {
        return;
    };
    let Some(value) = read_chars(diag, section, text, var, Variable::char_value) else {
        return;
    };
    if !choices.contains(&value.as_str()) {
        diag.error(
            section,
            Category::EnumViolation,
            format!(
                "{} '{}' has an invalid value: {} must be one of {}",
                text,
                name,
                value,
                choices.join(" ")
            ),
        );
    }
}

/// A character array with one string per row, each from a fixed set.
pub fn check_char_rows_choice(
    diag: &mut Diagnostics,
    section: &str,
    dataset: &Dataset,
    text: &str,
    name: &str,
    choices: &[&str],
) {
    let Some(var) = dataset.variable(name) else {
        return;
    };
    let Some(rows) = read_chars(diag, section, text, var, Variable::char_rows) else {
        return;
    };
    for (i, value) in rows.iter().enumerate() {
        if !choices.contains(&value.as_str()) {
            diag.error(
                section,
                Category::EnumViolation,
                format!(
                    "{} '{}' has an invalid value in position {}: {} must be one of {}",
                    text,
                    name,
                    i,
                    value,
                    choices.join(" ")
                ),
            );
        }
    }
}

/// A character variable holding a UTC timestamp. Absence is not checked.
pub fn check_time_format(
    diag: &mut Diagnostics,
    section: &str,
    dataset: &Dataset,
    text: &str,
    name: &str,
) {
    let Some(var) = dataset.variable(name) else {
        return;
    };
    let Some(value) = read_chars(diag, section, text, var, Variable::char_string) else {
        return;
    };
    if parse_utc_time(&value).is_err() {
        diag.error(
            section,
            Category::FormatViolation,
            format!(
                "{} '{}' has an invalid format: {} should be {}",
                text, name, value, TIME_FORMAT_HINT
            ),
        );
    }
}

/// Names of all variables whose `meta_group` attribute equals `group`, in
/// dataset order.
pub fn find_meta_group_vars<'a>(dataset: &'a Dataset, group: &str) -> Vec<&'a str> {
    dataset
        .variables()
        .filter(|v| v.text_attribute("meta_group") == Some(group))
        .map(|v| v.name.as_str())
        .collect()
}

/// Every member of the group that is present must be tagged with the group
/// name, and no other variable may carry that tag.
pub fn check_meta_group(diag: &mut Diagnostics, dataset: &Dataset, group: &MetaGroup) {
    let section = group.section;

    for name in group.variables {
        let Some(var) = dataset.variable(name) else {
            continue;
        };
        match var.attribute("meta_group") {
            None => diag.error(
                section,
                Category::CrossReferenceViolation,
                format!(
                    "{} {} does not have a `meta_group` attribute",
                    group.name, name
                ),
            ),
            Some(value) if value.as_text() != Some(group.name) => diag.error(
                section,
                Category::CrossReferenceViolation,
                format!(
                    "{} {} 'meta_group' attribute has incorrect value: {} should be {}",
                    group.name, name, value, group.name
                ),
            ),
            Some(_) => {}
        }
    }

    for name in find_meta_group_vars(dataset, group.name) {
        if !group.variables.contains(&name) {
            diag.error(
                section,
                Category::CrossReferenceViolation,
                format!(
                    "variable {} should not have its meta_group attribute set to '{}'",
                    name, group.name
                ),
            );
        }
    }
}

/// First dimension name of a variable, `none` for scalars.
pub(crate) fn first_dimension_label(var: &Variable) -> &str {
    var.first_dimension().unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{AttrValue, DataType};

    #[test]
    fn test_parse_utc_time_accepts_strict_format() {
        let parsed = parse_utc_time("2023-04-01T12:00:00Z").unwrap();
        assert_eq!(parsed.to_string(), "2023-04-01 12:00:00");
    }

    #[test]
    fn test_parse_utc_time_rejects_shape() {
        for bad in [
            "2023-04-01 12:00:00",
            "2023-04-01T12:00:00",
            "2023-4-01T12:00:00Z ",
            " 2023-04-01T12:00:00Z",
            "2023-04-01T12:00:00+",
            "2023/04/01T12:00:00Z",
            "20a3-04-01T12:00:00Z",
            "",
        ] {
            assert_eq!(parse_utc_time(bad), Err(TimeFormatError::Shape), "{:?}", bad);
        }
    }

    #[test]
    fn test_parse_utc_time_rejects_calendar() {
        for bad in ["2023-02-30T12:00:00Z", "2023-13-01T00:00:00Z", "2023-04-01T24:00:00Z"] {
            assert!(
                matches!(parse_utc_time(bad), Err(TimeFormatError::Calendar(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_time_format_check() {
        let dataset = Dataset::new()
            .with_variable(
                Variable::new("time_coverage_start", DataType::Char, &["string_length"])
                    .with_text("2023-04-01T12:00:00Z\0\0"),
            )
            .with_variable(
                Variable::new("time_coverage_end", DataType::Char, &["string_length"])
                    .with_text("2023-04-01 12:00:00"),
            );
        let mut diag = Diagnostics::new(false);
        check_time_format(&mut diag, "4.3", &dataset, "global variable", "time_coverage_start");
        check_time_format(&mut diag, "4.3", &dataset, "global variable", "time_coverage_end");
        check_time_format(&mut diag, "4.3", &dataset, "global variable", "time_reference");

        let events = diag.into_vec();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, Category::FormatViolation);
        assert_eq!(
            events[0].message,
            "global variable 'time_coverage_end' has an invalid format: 2023-04-01 12:00:00 should be yyyy-mm-ddThh:mm:ssZ"
        );
    }

    #[test]
    fn test_attribute_choice() {
        let dataset = Dataset::new()
            .with_text_attribute("platform_is_mobile", "yes")
            .with_attribute("n_gates_vary", AttrValue::scalar(DataType::Int, 1.0));
        let mut diag = Diagnostics::new(false);
        for name in ["platform_is_mobile", "n_gates_vary", "absent"] {
            check_attribute_choice(
                &mut diag,
                "4.1",
                &dataset,
                "global attribute",
                name,
                &["true", "false"],
            );
        }
        let messages: Vec<String> = diag.into_vec().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "global attribute 'platform_is_mobile' has an invalid value: yes must be one of true false",
                "global attribute 'n_gates_vary' has an invalid value: 1 must be one of true false",
            ]
        );
    }

    #[test]
    fn test_char_choice_trims_padding() {
        let dataset = Dataset::new().with_variable(
            Variable::new("primary_axis", DataType::Char, &["string_length"])
                .with_text("axis_z \0\0"),
        );
        let mut diag = Diagnostics::new(false);
        check_char_choice(
            &mut diag,
            "4.3",
            &dataset,
            "global variable",
            "primary_axis",
            &["axis_z"],
        );
        assert!(diag.events().is_empty());
    }

    #[test]
    fn test_char_rows_choice_reports_each_row() {
        let dataset = Dataset::new().with_variable(
            Variable::new("sweep_mode", DataType::Char, &["sweep", "string_length"])
                .with_rows(["rhi", "ppi", "sector", "volume"]),
        );
        let mut diag = Diagnostics::new(false);
        check_char_rows_choice(
            &mut diag,
            "4.7",
            &dataset,
            "sweep variable",
            "sweep_mode",
            &["rhi", "sector"],
        );

        let messages: Vec<String> = diag.into_vec().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "sweep variable 'sweep_mode' has an invalid value in position 1: ppi must be one of rhi sector",
                "sweep variable 'sweep_mode' has an invalid value in position 3: volume must be one of rhi sector",
            ]
        );
    }

    #[test]
    fn test_undecodable_payload_is_format_violation() {
        let mut var = Variable::new("platform_type", DataType::Int, &[]);
        var.data = Some(crate::dataset::VariableData::Numbers(vec![3.0]));
        let dataset = Dataset::new().with_variable(var);
        let mut diag = Diagnostics::new(false);
        check_char_choice(
            &mut diag,
            "4.3",
            &dataset,
            "global variable",
            "platform_type",
            &["fixed"],
        );

        let events = diag.into_vec();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, Category::FormatViolation);
        assert!(events[0].message.starts_with("global variable 'platform_type' cannot be read"));
    }

    #[test]
    fn test_missing_payload_is_reported_unchecked() {
        let dataset = Dataset::new().with_variable(Variable::new(
            "sweep_mode",
            DataType::Char,
            &["sweep", "string_length"],
        ));
        let mut diag = Diagnostics::new(false);
        check_char_rows_choice(
            &mut diag,
            "4.7",
            &dataset,
            "sweep variable",
            "sweep_mode",
            &["rhi"],
        );
        assert_eq!(diag.error_count(), 0);
        let lines: Vec<String> = diag.events().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            lines,
            vec!["NOTE: (4.7) sweep variable 'sweep_mode' has no values; value checks skipped."]
        );
        assert_eq!(diag.events()[0].category, Category::Unchecked);
    }

    #[test]
    fn test_meta_group_scenario() {
        let group = MetaGroup {
            name: "instrument_parameters",
            section: "5.1",
            variables: &["frequency", "prt"],
        };
        let dataset = Dataset::new()
            .with_variable(
                Variable::new("frequency", DataType::Float, &["frequency"])
                    .with_text_attribute("meta_group", "instrument_parameters"),
            )
            .with_variable(
                Variable::new("nyquist_velocity", DataType::Float, &["time"])
                    .with_text_attribute("meta_group", "instrument_parameters"),
            );
        let mut diag = Diagnostics::new(true);
        check_meta_group(&mut diag, &dataset, &group);

        let events = diag.into_vec();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, Category::CrossReferenceViolation);
        assert_eq!(
            events[0].to_string(),
            "ERROR: (5.1) variable nyquist_velocity should not have its meta_group attribute set to 'instrument_parameters'"
        );
    }

    #[test]
    fn test_meta_group_missing_and_wrong_tag() {
        let group = MetaGroup {
            name: "radar_parameters",
            section: "5.2",
            variables: &["radar_beam_width_h", "radar_beam_width_v"],
        };
        let dataset = Dataset::new()
            .with_variable(Variable::new("radar_beam_width_h", DataType::Float, &[]))
            .with_variable(
                Variable::new("radar_beam_width_v", DataType::Float, &[])
                    .with_text_attribute("meta_group", "lidar_parameters"),
            );
        let mut diag = Diagnostics::new(false);
        check_meta_group(&mut diag, &dataset, &group);

        let messages: Vec<String> = diag.into_vec().into_iter().map(|d| d.message).collect();
        assert_eq!(
            messages,
            vec![
                "radar_parameters radar_beam_width_h does not have a `meta_group` attribute",
                "radar_parameters radar_beam_width_v 'meta_group' attribute has incorrect value: lidar_parameters should be radar_parameters",
            ]
        );
    }

    fn tagged(name: &str, group: &str) -> Variable {
        Variable::new(name, DataType::Float, &[]).with_text_attribute("meta_group", group)
    }

    #[test]
    fn test_find_meta_group_vars_in_dataset_order() {
        let dataset = Dataset::new()
            .with_variable(tagged("b", "g"))
            .with_variable(tagged("a", "h"))
            .with_variable(tagged("c", "g"));
        assert_eq!(find_meta_group_vars(&dataset, "g"), vec!["b", "c"]);
    }

    #[test]
    fn test_first_dimension_label() {
        let scalar = Variable::new("prt_mode", DataType::Char, &[]);
        assert_eq!(first_dimension_label(&scalar), "none");
        let swept = Variable::new("prt_mode", DataType::Char, &["sweep", "string_length"]);
        assert_eq!(first_dimension_label(&swept), "sweep");
    }
}
