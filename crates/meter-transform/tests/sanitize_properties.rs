//! Property tests for record sanitization.

use meter_model::{RawTable, RawValue};
use meter_standards::builtin_catalog;
use meter_transform::{ERROR_MARKER, sanitize, sanitize_table};
use proptest::prelude::*;

const COLUMNS: [&str; 4] = ["AEZ-P_SUM", "R_BauBGa-P_SUM", "T_AMB", "hhmmss"];

fn numeric_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (-10.0f64..100.0).prop_map(|v| format!("{v:.2}")),
        1 => Just("err_timeout".to_string()),
        1 => Just("xerr".to_string()),
        1 => Just(String::new()),
    ]
}

fn time_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[0-2][0-9][0-5][0-9][0-5][0-9]",
        1 => Just("err".to_string()),
    ]
}

fn row() -> impl Strategy<Value = Vec<String>> {
    (numeric_cell(), numeric_cell(), numeric_cell(), time_cell())
        .prop_map(|(a, b, c, d)| vec![a, b, c, d])
}

fn clean_row() -> impl Strategy<Value = Vec<String>> {
    (5.0f64..=75.0, 5.0f64..=60.0, -20.0f64..40.0, "[01][0-9][0-5][0-9][0-5][0-9]")
        .prop_map(|(a, b, c, d)| vec![a.to_string(), b.to_string(), c.to_string(), d])
}

fn raw_table(rows: &[Vec<String>]) -> RawTable {
    RawTable {
        columns: COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| RawValue::from_field(cell)).collect())
            .collect(),
    }
}

/// Expected survivors computed directly from the text.
fn expected_survivors(rows: &[Vec<String>]) -> usize {
    rows.iter()
        .filter(|row| {
            if row.iter().any(|cell| cell.is_empty() || cell.contains(ERROR_MARKER)) {
                return false;
            }
            let aez: f64 = row[0].parse().unwrap();
            let bga: f64 = row[1].parse().unwrap();
            (5.0..=75.0).contains(&aez) && (5.0..=60.0).contains(&bga)
        })
        .count()
}

proptest! {
    #[test]
    fn survivors_are_complete_and_in_range(rows in prop::collection::vec(row(), 0..40)) {
        let catalog = builtin_catalog();
        let (clean, stats) = sanitize_table(raw_table(&rows), &catalog).unwrap();

        prop_assert_eq!(clean.height(), expected_survivors(&rows));
        prop_assert_eq!(stats.rows_kept, clean.height());
        prop_assert_eq!(stats.rows_read, rows.len());
        prop_assert_eq!(stats.rows_dropped() + stats.rows_kept, stats.rows_read);

        for row in &clean.rows {
            prop_assert!(row.iter().all(|cell| !cell.is_missing()));
            prop_assert!(row.iter().all(|cell| !cell.to_string().contains(ERROR_MARKER)));
            for (idx, column) in clean.columns.iter().enumerate() {
                if let Some(range) = catalog.range_of(column) {
                    let value = row[idx].as_number().unwrap();
                    prop_assert!(range.contains(value));
                }
            }
        }
    }

    #[test]
    fn sanitizing_twice_changes_nothing(rows in prop::collection::vec(row(), 0..40)) {
        let catalog = builtin_catalog();
        let (once, _) = sanitize_table(raw_table(&rows), &catalog).unwrap();
        let (twice, stats) = sanitize_table(once.clone(), &catalog).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(stats.rows_dropped(), 0);
    }

    #[test]
    fn clean_batch_is_kept_value_for_value(rows in prop::collection::vec(clean_row(), 1..20)) {
        let catalog = builtin_catalog();
        let sanitized = sanitize(raw_table(&rows), &catalog).unwrap();

        prop_assert_eq!(sanitized.data.height(), rows.len());
        let aez = sanitized.data.column("AEZ-P_SUM").unwrap().f64().unwrap();
        let times = sanitized.data.column("hhmmss").unwrap().str().unwrap();
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(aez.get(idx), Some(row[0].parse::<f64>().unwrap()));
            prop_assert_eq!(times.get(idx), Some(row[3].as_str()));
        }
    }
}
