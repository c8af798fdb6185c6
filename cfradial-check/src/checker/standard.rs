//! CF/Radial 1.2 reference data: allowed values, meta-group membership and
//! the rule tables for each clause.

use crate::checker::table::{AttributeRule, VariableRule};
use crate::dataset::DataType;
use crate::dataset::DataType::{Byte, Char, Double, Float, Int, Short};

/// Format a UTC timestamp must follow, as shown in messages.
pub const TIME_FORMAT_HINT: &str = "yyyy-mm-ddThh:mm:ssZ";

pub const BOOLEAN_VALUES: &[&str] = &["true", "false"];

pub const PLATFORM_TYPES: &[&str] = &[
    "fixed",
    "vehicle",
    "ship",
    "aircraft",
    "aircraft_fore",
    "aircraft_aft",
    "aircraft_tail",
    "aircraft_belly",
    "aircraft_roof",
    "aircraft_nose",
    "satellite_orbit",
    "satellite_geostat",
];

pub const INSTRUMENT_TYPES: &[&str] = &["radar", "lidar"];

pub const PRIMARY_AXES: &[&str] = &["axis_z", "axis_y", "axis_x"];

pub const SWEEP_MODES: &[&str] = &[
    "sector",
    "coplane",
    "rhi",
    "vertical_pointing",
    "idle",
    "azimuth_surveillance",
    "elevation_surveillance",
    "sunscan",
    "pointing",
    "manual_ppi",
    "manual_rhi",
];

pub const FOLLOW_MODES: &[&str] = &["none", "sun", "vehicle", "aircraft", "target", "manual"];

pub const PRT_MODES: &[&str] = &["fixed", "staggered", "dual"];

pub const POLARIZATION_MODES: &[&str] = &["horizontal", "vertical", "hv_alt", "hv_sim", "circular"];

/// The instrument_parameters `_mode` variables and their allowed values.
pub const MODE_VARIABLES: &[(&str, &[&str])] = &[
    ("follow_mode", FOLLOW_MODES),
    ("prt_mode", PRT_MODES),
    ("polarization_mode", POLARIZATION_MODES),
];

/// Required on moving platforms, forbidden on fixed ones.
pub const GEOREFERENCE_VARIABLES: &[&str] =
    &["heading", "roll", "pitch", "drift", "rotation", "tilt"];

/// Element types a moments field variable may use.
pub const FIELD_TYPES: &[DataType] = &[Byte, Short, Int, Float, Double];

/// Packed field types, which also need `scale_factor` and `add_offset`.
pub const PACKED_FIELD_TYPES: &[DataType] = &[Byte, Short, Int];

pub const FIELD_COORDINATES_FIXED: &str = "elevation azimuth range";
pub const FIELD_COORDINATES_MOBILE: &str =
    "elevation azimuth range heading roll pitch rotation tilt";

/// A sub-convention's `meta_group` label and the variables that carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaGroup {
    pub name: &'static str,
    pub section: &'static str,
    pub variables: &'static [&'static str],
}

pub const INSTRUMENT_PARAMETERS: MetaGroup = MetaGroup {
    name: "instrument_parameters",
    section: "5.1",
    variables: &[
        "frequency",
        "follow_mode",
        "pulse_width",
        "prt_mode",
        "prt",
        "prt_ratio",
        "polarization_mode",
        "nyquist_velocity",
        "unambiguous_range",
        "n_samples",
        "sampling_ratio",
    ],
};

pub const RADAR_PARAMETERS: MetaGroup = MetaGroup {
    name: "radar_parameters",
    section: "5.2",
    variables: &[
        "radar_antenna_gain_h",
        "radar_antenna_gain_v",
        "radar_beam_width_h",
        "radar_beam_width_v",
        "radar_receiver_bandwidth",
        "radar_measured_transmit_power_h",
        "radar_measured_transmit_power_v",
    ],
};

pub const LIDAR_PARAMETERS: MetaGroup = MetaGroup {
    name: "lidar_parameters",
    section: "5.3",
    variables: &[
        "lidar_beam_divergence",
        "lidar_field_of_view",
        "lidar_aperture_diameter",
        "lidar_aperture_efficiency",
        "lidar_peak_power",
        "lidar_pulse_energy",
    ],
};

pub const RADAR_CALIBRATION: MetaGroup = MetaGroup {
    name: "radar_calibration",
    section: "5.4",
    variables: &[
        "r_calib_index",
        "r_calib_time",
        "r_calib_pulse_width",
        "r_calib_ant_gain_h",
        "r_calib_ant_gain_v",
        "r_calib_xmit_power_h",
        "r_calib_xmit_power_v",
        "r_calib_two_way_waveguide_loss_h",
        "r_calib_two_way_waveguide_loss_v",
        "r_calib_two_way_radome_loss_h",
        "r_calib_two_way_radome_loss_v",
        "r_calib_receiver_mismatch_loss",
        "r_calib_radar_constant_h",
        "r_calib_radar_constant_v",
        "r_calib_noise_hc",
        "r_calib_noise_vc",
        "r_calib_noise_hx",
        "r_calib_noise_vx",
        "r_calib_receiver_gain_hc",
        "r_calib_receiver_gain_vc",
        "r_calib_receiver_gain_hx",
        "r_calib_receiver_gain_vx",
        "r_calib_base_dbz_1km_hc",
        "r_calib_base_dbz_1km_vc",
        "r_calib_base_dbz_1km_hx",
        "r_calib_base_dbz_1km_vx",
        "r_calib_sun_power_hc",
        "r_calib_sun_power_vc",
        "r_calib_sun_power_hx",
        "r_calib_sun_power_vx",
        "r_calib_noise_source_power_h",
        "r_calib_noise_source_power_v",
        "r_calib_power_measure_loss_h",
        "r_calib_power_measure_loss_v",
        "r_calib_coupler_forward_loss_h",
        "r_calib_coupler_forward_loss_v",
        "r_calib_zdr_correction",
        "r_calib_ldr_correction_h",
        "r_calib_ldr_correction_v",
        "r_calib_system_phidp",
        "r_calib_test_power_h",
        "r_calib_test_power_v",
        "r_calib_receiver_slope_hc",
        "r_calib_receiver_slope_vc",
        "r_calib_receiver_slope_hx",
        "r_calib_receiver_slope_vx",
    ],
};

pub const PLATFORM_VELOCITY: MetaGroup = MetaGroup {
    name: "platform_velocity",
    section: "5.6",
    variables: &[
        "eastward_velocity",
        "northward_velocity",
        "vertical_velocity",
        "eastward_wind",
        "northward_wind",
        "vertical_wind",
        "heading_rate",
        "roll_rate",
        "pitch_rate",
    ],
};

pub const GEOMETRY_CORRECTION: MetaGroup = MetaGroup {
    name: "geometry_correction",
    section: "5.7",
    variables: &[
        "azimuth_correction",
        "elevation_correction",
        "range_correction",
        "longitude_correction",
        "latitude_correction",
        "pressure_altitude_correction",
        "radar_altitude_correction",
        "eastward_ground_speed_correction",
        "northward_ground_speed_correction",
        "vertical_velocity_correction",
        "heading_correction",
        "roll_correction",
        "pitch_correction",
        "drift_correction",
        "rotation_correction",
        "tilt_correction",
    ],
};

pub const META_GROUPS: &[MetaGroup] = &[
    INSTRUMENT_PARAMETERS,
    RADAR_PARAMETERS,
    LIDAR_PARAMETERS,
    RADAR_CALIBRATION,
    PLATFORM_VELOCITY,
    GEOMETRY_CORRECTION,
];

// 4.1
pub const GLOBAL_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::required("Conventions").dtype(DataType::String),
    AttributeRule::optional("version").dtype(DataType::String),
    AttributeRule::required("title").dtype(DataType::String),
    AttributeRule::required("institution").dtype(DataType::String),
    AttributeRule::required("references").dtype(DataType::String),
    AttributeRule::required("source").dtype(DataType::String),
    AttributeRule::required("history").dtype(DataType::String),
    AttributeRule::required("comment").dtype(DataType::String),
    AttributeRule::required("instrument_name").dtype(DataType::String),
    AttributeRule::optional("site_name").dtype(DataType::String),
    AttributeRule::optional("scan_name").dtype(DataType::String),
    AttributeRule::optional("scan_id").dtype(Int),
    AttributeRule::optional("platform_is_mobile").dtype(DataType::String),
    AttributeRule::optional("n_gates_vary").dtype(DataType::String),
];

// 4.2
pub const REQUIRED_DIMENSIONS: &[&str] = &["time", "range", "sweep"];

// 4.3
pub const GLOBAL_VARIABLES: &[VariableRule] = &[
    VariableRule::required("volume_number").dtype(Int),
    VariableRule::optional("platform_type").dtype(Char),
    VariableRule::optional("instrument_type").dtype(Char),
    VariableRule::optional("primary_axis").dtype(Char),
    VariableRule::required("time_coverage_start").dtype(Char),
    VariableRule::required("time_coverage_end").dtype(Char),
    VariableRule::optional("time_reference").dtype(Char),
];

// 4.4
pub const COORDINATE_VARIABLES: &[VariableRule] = &[
    VariableRule::required("time").dtype(Double).dims(&["time"]),
    VariableRule::required("range")
        .dtype(Float)
        .dims(&["range"])
        .units("meters"),
];

// 4.4.1
pub const TIME_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::required("standard_name").dtype(DataType::String).value("time"),
    AttributeRule::required("long_name")
        .dtype(DataType::String)
        .value("time_in_seconds_since_volume_start"),
    AttributeRule::required("units").dtype(DataType::String),
];

// 4.4.2
pub const RANGE_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::required("standard_name")
        .dtype(DataType::String)
        .value("projection_range_coordinate"),
    AttributeRule::required("long_name")
        .dtype(DataType::String)
        .value("range_to_measurement_volume"),
    AttributeRule::required("units").dtype(DataType::String).value("meters"),
    AttributeRule::required("spacing_is_constant").dtype(DataType::String),
    AttributeRule::required("meters_to_center_of_first_gate").dtype(Float),
    AttributeRule::optional("meters_between_gates").dtype(Float),
    AttributeRule::required("axis")
        .dtype(DataType::String)
        .value("radial_range_coordinate"),
];

// 4.5
pub const RAY_DIMENSION_VARIABLES: &[VariableRule] = &[
    VariableRule::required("ray_n_gates").dtype(Int).dims(&["time"]),
    VariableRule::required("ray_start_index").dtype(Int).dims(&["time"]),
];

// 4.6, dimensioned by time on moving platforms and scalar otherwise
pub const LOCATION_VARIABLES_FIXED: &[VariableRule] = &location_variables(&[]);
pub const LOCATION_VARIABLES_MOBILE: &[VariableRule] = &location_variables(&["time"]);

const fn location_variables(dims: &'static [&'static str]) -> [VariableRule; 4] {
    [
        VariableRule::required("latitude")
            .dtype(Double)
            .dims(dims)
            .units("degrees_north"),
        VariableRule::required("longitude")
            .dtype(Double)
            .dims(dims)
            .units("degrees_east"),
        VariableRule::required("altitude")
            .dtype(Double)
            .dims(dims)
            .units("meters"),
        VariableRule::optional("altitude_agl")
            .dtype(Double)
            .dims(dims)
            .units("meters"),
    ]
}

// 4.7
pub const SWEEP_VARIABLES: &[VariableRule] = &[
    VariableRule::required("sweep_number").dtype(Int).dims(&["sweep"]),
    VariableRule::required("sweep_mode").dtype(Char),
    VariableRule::required("fixed_angle")
        .dtype(Float)
        .dims(&["sweep"])
        .units("degrees"),
    VariableRule::required("sweep_start_ray_index")
        .dtype(Int)
        .dims(&["sweep"]),
    VariableRule::required("sweep_end_ray_index")
        .dtype(Int)
        .dims(&["sweep"]),
    VariableRule::optional("target_scan_rate")
        .dtype(Float)
        .dims(&["sweep"])
        .units("degrees_per_second"),
];

// 4.8
pub const SENSOR_POINTING_VARIABLES: &[VariableRule] = &[
    VariableRule::required("azimuth")
        .dtype(Float)
        .dims(&["time"])
        .units("degrees"),
    VariableRule::required("elevation")
        .dtype(Float)
        .dims(&["time"])
        .units("degrees"),
    VariableRule::optional("scan_rate")
        .dtype(Float)
        .dims(&["time"])
        .units("degrees_per_second"),
    VariableRule::optional("antenna_transition")
        .dtype(Byte)
        .dims(&["time"]),
];

// 4.8.1
pub const AZIMUTH_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::required("standard_name")
        .dtype(DataType::String)
        .value("beam_azimuth_angle"),
    AttributeRule::required("long_name")
        .dtype(DataType::String)
        .value("azimuth_angle_from_true_north"),
    AttributeRule::required("units").dtype(DataType::String).value("degrees"),
    AttributeRule::required("axis")
        .dtype(DataType::String)
        .value("radial_azimuth_coordinate"),
];

// 4.8.2
pub const ELEVATION_ATTRIBUTES: &[AttributeRule] = &[
    AttributeRule::required("standard_name")
        .dtype(DataType::String)
        .value("beam_elevation_angle"),
    AttributeRule::required("long_name")
        .dtype(DataType::String)
        .value("elevation_angle_from_horizontal_plane"),
    AttributeRule::required("units").dtype(DataType::String).value("degrees"),
    AttributeRule::required("axis")
        .dtype(DataType::String)
        .value("radial_elevation_coordinate"),
];

// 4.9
pub const GEOREFERENCE_VARIABLE_RULES: &[VariableRule] = &[
    georeference("heading"),
    georeference("roll"),
    georeference("pitch"),
    georeference("drift"),
    georeference("rotation"),
    georeference("tilt"),
];

const fn georeference(name: &'static str) -> VariableRule {
    VariableRule::required(name)
        .dtype(Float)
        .dims(&["time"])
        .units("degrees")
}

// 5.1
pub const INSTRUMENT_PARAMETER_VARIABLES: &[VariableRule] = &[
    VariableRule::optional("frequency")
        .dtype(Float)
        .dims(&["frequency"])
        .units("s-1"),
    VariableRule::optional("follow_mode").dtype(Char),
    VariableRule::optional("pulse_width")
        .dtype(Float)
        .dims(&["time"])
        .units("seconds"),
    VariableRule::optional("prt_mode").dtype(Char),
    VariableRule::optional("prt")
        .dtype(Float)
        .dims(&["time"])
        .units("seconds"),
    VariableRule::optional("prt_ratio").dtype(Float).dims(&["time"]),
    VariableRule::optional("polarization_mode").dtype(Char),
    VariableRule::optional("nyquist_velocity")
        .dtype(Float)
        .dims(&["time"])
        .units("meters_per_second"),
    VariableRule::optional("unambiguous_range")
        .dtype(Float)
        .dims(&["time"])
        .units("meters"),
    VariableRule::optional("n_samples").dtype(Int).dims(&["time"]),
    VariableRule::optional("sampling_ratio")
        .dtype(Float)
        .dims(&["time"]),
];

// 5.2
pub const RADAR_PARAMETER_VARIABLES: &[VariableRule] = &[
    scalar_float("radar_antenna_gain_h", "dB"),
    scalar_float("radar_antenna_gain_v", "dB"),
    scalar_float("radar_beam_width_h", "degrees"),
    scalar_float("radar_beam_width_v", "degrees"),
    scalar_float("radar_receiver_bandwidth", "s-1"),
    VariableRule::optional("radar_measured_transmit_power_h")
        .dtype(Float)
        .dims(&["time"])
        .units("dBm"),
    VariableRule::optional("radar_measured_transmit_power_v")
        .dtype(Float)
        .dims(&["time"])
        .units("dBm"),
];

// 5.3
pub const LIDAR_PARAMETER_VARIABLES: &[VariableRule] = &[
    scalar_float("lidar_beam_divergence", "milliradians"),
    scalar_float("lidar_field_of_view", "milliradians"),
    scalar_float("lidar_aperture_diameter", "cm"),
    scalar_float("lidar_aperture_efficiency", "percent"),
    scalar_float("lidar_peak_power", "watts"),
    scalar_float("lidar_pulse_energy", "joules"),
];

// 5.4.2
pub const RADAR_CALIBRATION_VARIABLES: &[VariableRule] = &[
    VariableRule::optional("r_calib_index")
        .dtype(Byte)
        .dims(&["time"]),
    VariableRule::optional("r_calib_time").dtype(Char),
    calibration("r_calib_pulse_width", "seconds"),
    calibration("r_calib_ant_gain_h", "dB"),
    calibration("r_calib_ant_gain_v", "dB"),
    calibration("r_calib_xmit_power_h", "dBm"),
    calibration("r_calib_xmit_power_v", "dBm"),
    calibration("r_calib_two_way_waveguide_loss_h", "dB"),
    calibration("r_calib_two_way_waveguide_loss_v", "dB"),
    calibration("r_calib_two_way_radome_loss_h", "dB"),
    calibration("r_calib_two_way_radome_loss_v", "dB"),
    calibration("r_calib_receiver_mismatch_loss", "dB"),
    calibration("r_calib_radar_constant_h", "dB"),
    calibration("r_calib_radar_constant_v", "dB"),
    calibration("r_calib_noise_hc", "dBm"),
    calibration("r_calib_noise_vc", "dBm"),
    calibration("r_calib_noise_hx", "dBm"),
    calibration("r_calib_noise_vx", "dBm"),
    calibration("r_calib_receiver_gain_hc", "dB"),
    calibration("r_calib_receiver_gain_vc", "dB"),
    calibration("r_calib_receiver_gain_hx", "dB"),
    calibration("r_calib_receiver_gain_vx", "dB"),
    calibration("r_calib_base_dbz_1km_hc", "dBZ"),
    calibration("r_calib_base_dbz_1km_vc", "dBZ"),
    calibration("r_calib_base_dbz_1km_hx", "dBZ"),
    calibration("r_calib_base_dbz_1km_vx", "dBZ"),
    calibration("r_calib_sun_power_hc", "dBm"),
    calibration("r_calib_sun_power_vc", "dBm"),
    calibration("r_calib_sun_power_hx", "dBm"),
    calibration("r_calib_sun_power_vx", "dBm"),
    calibration("r_calib_noise_source_power_h", "dBm"),
    calibration("r_calib_noise_source_power_v", "dBm"),
    calibration("r_calib_power_measure_loss_h", "dB"),
    calibration("r_calib_power_measure_loss_v", "dB"),
    calibration("r_calib_coupler_forward_loss_h", "dB"),
    calibration("r_calib_coupler_forward_loss_v", "dB"),
    calibration("r_calib_zdr_correction", "dB"),
    calibration("r_calib_ldr_correction_h", "dB"),
    calibration("r_calib_ldr_correction_v", "dB"),
    calibration("r_calib_system_phidp", "degrees"),
    calibration("r_calib_test_power_h", "dBm"),
    calibration("r_calib_test_power_v", "dBm"),
    // slopes are dimensionless
    VariableRule::optional("r_calib_receiver_slope_hc")
        .dtype(Float)
        .dims(&["r_calib"]),
    VariableRule::optional("r_calib_receiver_slope_vc")
        .dtype(Float)
        .dims(&["r_calib"]),
    VariableRule::optional("r_calib_receiver_slope_hx")
        .dtype(Float)
        .dims(&["r_calib"]),
    VariableRule::optional("r_calib_receiver_slope_vx")
        .dtype(Float)
        .dims(&["r_calib"]),
];

// 5.6
pub const PLATFORM_VELOCITY_VARIABLES: &[VariableRule] = &[
    velocity("eastward_velocity", "meters_per_second"),
    velocity("northward_velocity", "meters_per_second"),
    velocity("vertical_velocity", "meters_per_second"),
    velocity("eastward_wind", "meters_per_second"),
    velocity("northward_wind", "meters_per_second"),
    velocity("vertical_wind", "meters_per_second"),
    velocity("heading_rate", "degrees_per_second"),
    velocity("roll_rate", "degrees_per_second"),
    velocity("pitch_rate", "degrees_per_second"),
];

// 5.7
pub const GEOMETRY_CORRECTION_VARIABLES: &[VariableRule] = &[
    scalar_float("azimuth_correction", "degrees"),
    scalar_float("elevation_correction", "degrees"),
    scalar_float("range_correction", "meters"),
    scalar_float("longitude_correction", "degrees"),
    scalar_float("latitude_correction", "degrees"),
    scalar_float("pressure_altitude_correction", "meters"),
    scalar_float("radar_altitude_correction", "meters"),
    scalar_float("eastward_ground_speed_correction", "meters_per_second"),
    scalar_float("northward_ground_speed_correction", "meters_per_second"),
    scalar_float("vertical_velocity_correction", "meters_per_second"),
    scalar_float("heading_correction", "degrees"),
    scalar_float("roll_correction", "degrees"),
    scalar_float("pitch_correction", "degrees"),
    scalar_float("drift_correction", "degrees"),
    scalar_float("rotation_correction", "degrees"),
    scalar_float("tilt_correction", "degrees"),
];

const fn scalar_float(name: &'static str, units: &'static str) -> VariableRule {
    VariableRule::optional(name).dtype(Float).dims(&[]).units(units)
}

const fn calibration(name: &'static str, units: &'static str) -> VariableRule {
    VariableRule::optional(name)
        .dtype(Float)
        .dims(&["r_calib"])
        .units(units)
}

const fn velocity(name: &'static str, units: &'static str) -> VariableRule {
    VariableRule::required(name)
        .dtype(Float)
        .dims(&["time"])
        .units(units)
}
