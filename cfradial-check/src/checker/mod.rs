//! CF/Radial 1.2 conformance checker.
//!
//! Clauses run strictly in document order. Every failure is recorded as a
//! diagnostic and the run always continues, so a single pass reports the
//! complete set of violations.

pub mod base;
pub mod common;
pub mod expect;
pub mod standard;
pub mod subconventions;
pub mod table;

pub use common::{
    check_attribute_choice, check_char_choice, check_char_rows_choice, check_meta_group,
    check_time_format, find_meta_group_vars, parse_utc_time, TimeFormatError,
};
pub use expect::{AttributeExpectation, VariableExpectation};
pub use standard::{MetaGroup, META_GROUPS};
pub use table::{
    AttributeRule, AttributeTable, ExpectationTable, Presence, Rule, VariableRule, VariableTable,
};

use crate::dataset::{AttributeSource, Dataset};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Flags derived once from the global attributes that gate conditional
/// rules throughout the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConformanceContext {
    /// `n_gates_vary = "true"`: rays have differing gate counts.
    pub n_gates_vary: bool,
    /// `platform_is_mobile = "true"`.
    pub mobile_platform: bool,
}

impl ConformanceContext {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            n_gates_vary: dataset.text_attribute("n_gates_vary") == Some("true"),
            mobile_platform: dataset.text_attribute("platform_is_mobile") == Some("true"),
        }
    }
}

type ClauseCheck = fn(&Dataset, &ConformanceContext, &mut Diagnostics);

/// A clause of the standard and the check that covers it.
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    check: ClauseCheck,
}

impl Section {
    const fn new(id: &'static str, title: &'static str, check: ClauseCheck) -> Self {
        Self { id, title, check }
    }
}

/// Clauses in check order.
pub const SECTIONS: &[Section] = &[
    Section::new("3", "Convention hierarchy", base::check_conventions),
    Section::new("4.1", "Global attributes", base::check_global_attributes),
    Section::new("4.2", "Dimensions", base::check_dimensions),
    Section::new("4.3", "Global variables", base::check_global_variables),
    Section::new("4.4", "Coordinate variables", base::check_coordinate_variables),
    Section::new(
        "4.4.1",
        "Attributes for time coordinate variable",
        base::check_time_attributes,
    ),
    Section::new(
        "4.4.2",
        "Attributes for range coordinate variable",
        base::check_range_attributes,
    ),
    Section::new("4.5", "Ray dimension variables", base::check_ray_dimension_variables),
    Section::new("4.6", "Location variables", base::check_location_variables),
    Section::new("4.7", "Sweep variables", base::check_sweep_variables),
    Section::new(
        "4.8",
        "Sensor pointing variables",
        base::check_sensor_pointing_variables,
    ),
    Section::new(
        "4.8.1",
        "Attributes for azimuth(time) variable",
        base::check_azimuth_attributes,
    ),
    Section::new(
        "4.8.2",
        "Attributes for elevation(time) variable",
        base::check_elevation_attributes,
    ),
    Section::new(
        "4.9",
        "Moving platform geo-reference variables",
        base::check_georeference_variables,
    ),
    Section::new("4.10", "Moments field data variables", base::check_field_variables),
    Section::new(
        "5.1",
        "The instrument_parameters sub-convention",
        subconventions::check_instrument_parameters,
    ),
    Section::new(
        "5.2",
        "The radar_parameters sub-convention",
        subconventions::check_radar_parameters,
    ),
    Section::new(
        "5.3",
        "The lidar_parameters sub-convention",
        subconventions::check_lidar_parameters,
    ),
    Section::new(
        "5.4",
        "The radar_calibration sub-convention",
        subconventions::check_radar_calibration_group,
    ),
    Section::new(
        "5.4.2",
        "Radar calibration variables",
        subconventions::check_radar_calibration_variables,
    ),
    Section::new(
        "5.6",
        "The platform_velocity sub-convention",
        subconventions::check_platform_velocity,
    ),
    Section::new(
        "5.7",
        "The geometry_correction sub-convention",
        subconventions::check_geometry_correction,
    ),
];

/// Check a dataset against CF/Radial 1.2.
///
/// Returns every diagnostic in emission order. NOTEs for missing optional
/// items are only produced when `verbose` is set. The dataset is never
/// modified and repeated runs give identical results.
pub fn check_cfradial_compliance(dataset: &Dataset, verbose: bool) -> Vec<Diagnostic> {
    let ctx = ConformanceContext::from_dataset(dataset);
    let mut diag = Diagnostics::new(verbose);

    tracing::info!(
        "Checking CF/Radial conformance (mobile platform: {}, n_gates_vary: {})",
        ctx.mobile_platform,
        ctx.n_gates_vary
    );

    for section in SECTIONS {
        tracing::debug!("Checking clause {} ({})", section.id, section.title);
        (section.check)(dataset, &ctx, &mut diag);
    }

    tracing::info!(
        "Conformance check finished: {} errors, {} notes",
        diag.error_count(),
        diag.note_count()
    );
    diag.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_context_requires_literal_true() {
        let ds = Dataset::new()
            .with_text_attribute("platform_is_mobile", "TRUE")
            .with_text_attribute("n_gates_vary", "true");
        let ctx = ConformanceContext::from_dataset(&ds);
        assert!(!ctx.mobile_platform);
        assert!(ctx.n_gates_vary);

        assert_eq!(
            ConformanceContext::from_dataset(&Dataset::new()),
            ConformanceContext::default()
        );
    }

    #[test]
    fn test_section_ids_unique() {
        let mut seen = HashSet::new();
        for section in SECTIONS {
            assert!(seen.insert(section.id), "duplicate section {}", section.id);
        }
    }

    #[test]
    fn test_meta_group_sections_are_listed() {
        let ids: HashSet<&str> = SECTIONS.iter().map(|s| s.id).collect();
        for group in META_GROUPS {
            assert!(ids.contains(group.section), "{}", group.name);
        }
    }
}
