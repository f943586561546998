use configuration::{load_scenario, load_settings_from, scenario_to_toml_lines, ConfigError, OutputFormat};
use core_types::{RawInputs, RawValue};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn scenario_file_maps_onto_raw_inputs() {
    let file = toml_file(
        r#"
ad_spend = 9000
qualified_leads = "60"
keepers_mode = "From rate (%)"
lead_to_keeper_rate_pct = 8.5
avg_settlement = "lots"
"#,
    );

    let raw = load_scenario(Some(file.path())).unwrap();
    assert_eq!(raw.ad_spend, Some(RawValue::Number(dec!(9000))));
    assert_eq!(raw.qualified_leads, Some(RawValue::Number(dec!(60))));
    assert_eq!(raw.keepers_mode.as_deref(), Some("From rate (%)"));
    assert_eq!(raw.lead_to_keeper_rate_pct, Some(RawValue::Number(dec!(8.5))));
    assert_eq!(raw.avg_settlement, Some(RawValue::Text("lots".to_string())));
    assert_eq!(raw.keepers_count, None);
    assert_eq!(raw.tier_1_pct, None);
}

#[test]
fn missing_scenario_file_is_an_error() {
    let err = load_scenario(Some(std::path::Path::new("does/not/exist.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read(_)));
}

#[test]
fn no_path_loads_the_demo_scenario() {
    let raw = load_scenario(None).unwrap();
    assert_eq!(raw, RawInputs::demo());
}

#[test]
fn demo_scenario_round_trips_through_toml_lines() {
    let lines = scenario_to_toml_lines(&RawInputs::demo());
    assert_eq!(lines.len(), 18);
    assert_eq!(lines[0], "ad_spend = 9000");
    assert_eq!(lines[2], "keepers_mode = \"Direct entry\"");

    let file = toml_file(&lines.join("\n"));
    assert_eq!(load_scenario(Some(file.path())).unwrap(), RawInputs::demo());
}

#[test]
fn absent_settings_file_gives_defaults() {
    let settings = load_settings_from(std::path::Path::new("no-such-config.toml")).unwrap();
    assert_eq!(settings.logging.level, "warn");
    assert!(settings.logging.directory.is_none());
    assert_eq!(settings.output.format, OutputFormat::Text);
    assert_eq!(settings.output.table_step, 5);
}

#[test]
fn settings_file_overrides_defaults() {
    let file = toml_file(
        r#"
[logging]
level = "debug"
directory = "logs"

[output]
format = "json"
"#,
    );

    let settings = load_settings_from(file.path()).unwrap();
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.directory.as_deref(), Some(std::path::Path::new("logs")));
    assert_eq!(settings.logging.file_prefix, "referral-kpi.log");
    assert_eq!(settings.output.format, OutputFormat::Json);
    assert_eq!(settings.output.table_step, 5);
}

#[test]
fn zero_table_step_is_rejected() {
    let file = toml_file("[output]\ntable_step = 0\n");
    let err = load_settings_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSetting(_)));
}

#[test]
fn bundled_scenario_files_load() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");

    let demo = load_scenario(Some(&root.join("scenarios/demo.toml"))).unwrap();
    assert_eq!(demo, RawInputs::demo());

    let rate = load_scenario(Some(&root.join("scenarios/rate-based.toml"))).unwrap();
    assert_eq!(rate.ad_spend, Some(RawValue::Text("$25,000".to_string())));
    assert_eq!(rate.keepers_count, None);
    assert_eq!(rate.x_axis_max, None);
}

#[test]
fn bundled_config_file_loads() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let settings = load_settings_from(&root.join("config.toml")).unwrap();
    assert_eq!(settings.output.format, OutputFormat::Text);
    assert_eq!(settings.output.table_step, 5);
}
