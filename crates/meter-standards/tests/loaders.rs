use std::fs;

use meter_model::{SemanticType, ValueRange};
use meter_standards::{StandardsError, builtin_catalog, load_catalog};

#[test]
fn loads_catalog_file_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[column]]
name = "YYYYMMDD"
type = "date_string"

[[column]]
name = "hhmmss"
type = "time_string"

[[column]]
name = "Boiler-P_SUM"
type = "float"
min = 0.5
max = 12.0
"#,
    )
    .expect("write catalog");

    let catalog = load_catalog(&path).expect("load catalog");
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.type_of("Boiler-P_SUM"), Ok(SemanticType::Float));
    assert_eq!(
        catalog.range_of("Boiler-P_SUM"),
        Some(ValueRange::new(0.5, 12.0))
    );
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_catalog(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(StandardsError::Io { .. })));
}

#[test]
fn empty_catalog_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").expect("write catalog");
    let result = load_catalog(&path);
    assert!(matches!(result, Err(StandardsError::InvalidCatalog { .. })));
}

#[test]
fn builtin_catalog_declares_every_power_range() {
    let catalog = builtin_catalog();
    let ranged: Vec<&str> = catalog
        .entries()
        .iter()
        .filter(|entry| entry.valid_range.is_some())
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(
        ranged,
        vec![
            "R_BauBGb-P_SUM",
            "AEZ-P_SUM",
            "R_BauTGb-P_SUM",
            "PV_120kW-P_SUM",
            "R_BauBGa-P_SUM",
            "R_Bau_TGa-P_SUM",
        ]
    );
}
