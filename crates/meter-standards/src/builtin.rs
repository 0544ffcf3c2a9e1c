use meter_model::{
    CatalogEntry, ColumnCatalog, DATE_COLUMN, SemanticType, TIME_COLUMN, TIMESTAMP_COLUMN,
    ValueRange,
};

/// Power columns with a physical plausibility range (kW).
const RANGED_COLUMNS: &[(&str, f64, f64)] = &[
    ("R_BauBGb-P_SUM", 5.0, 40.0),
    ("AEZ-P_SUM", 5.0, 75.0),
    ("R_BauTGb-P_SUM", 35.0, 275.0),
    ("PV_120kW-P_SUM", 0.0, 120.0),
    ("R_BauBGa-P_SUM", 5.0, 60.0),
    ("R_Bau_TGa-P_SUM", 25.0, 250.0),
];

const UNRANGED_COLUMNS: &[&str] = &[
    "E_GLOBAL",
    "T_AMB",
    "P_AIR",
    "PV_SolarLog_30kW-P_SUM",
    "E_BauXa-P_SUM",
    "E_BauXb-P_SUM",
];

/// The catalog of the deployed meter installation.
pub fn builtin_catalog() -> ColumnCatalog {
    let mut entries = vec![
        CatalogEntry::numeric(TIMESTAMP_COLUMN, None),
        CatalogEntry::new(TIME_COLUMN, SemanticType::TimeString),
        CatalogEntry::new(DATE_COLUMN, SemanticType::DateString),
    ];
    entries.extend(
        RANGED_COLUMNS
            .iter()
            .map(|&(name, min, max)| CatalogEntry::numeric(name, Some(ValueRange::new(min, max)))),
    );
    entries.extend(
        UNRANGED_COLUMNS
            .iter()
            .map(|&name| CatalogEntry::numeric(name, None)),
    );
    ColumnCatalog::new(entries).expect("built-in catalog column names are unique")
}
