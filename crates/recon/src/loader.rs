use crate::config::SourceConfig;
use crate::error::ReconError;
use crate::model::{RowFailure, StatRecord};

/// Extraction output for one source: the rows that parsed, and the rows that
/// did not. Failed rows are kept so the reconciliation report can account for
/// every input row.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<StatRecord>,
    pub failures: Vec<RowFailure>,
}

impl LoadedRecords {
    pub fn from_records(records: Vec<StatRecord>) -> Self {
        Self { records, failures: Vec::new() }
    }

    /// Total rows this source contributed, parsed or not.
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Best-effort per-row parse of a scraped table's CSV export.
///
/// A row with an unreadable or blank name cell becomes a `RowFailure`, never
/// an abort; a numeric cell that fails to parse leaves that attribute absent
/// (not zero). Only structural problems fail the whole load: a configured
/// column missing from the header, or an unreadable CSV header.
pub fn load_csv_records(
    source_name: &str,
    csv_data: &str,
    config: &SourceConfig,
) -> Result<LoadedRecords, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = |column: &str| -> Result<usize, ReconError> {
        headers.iter().position(|h| h == column).ok_or_else(|| ReconError::MissingColumn {
            source: source_name.to_string(),
            column: column.to_string(),
        })
    };

    let name_idx = idx(&config.columns.name)?;
    let mut attribute_idx = Vec::with_capacity(config.columns.attributes.len());
    for (attribute, column) in &config.columns.attributes {
        attribute_idx.push((attribute.as_str(), idx(column)?));
    }

    let mut loaded = LoadedRecords::default();

    for (row_number, row) in reader.records().enumerate() {
        let row_number = row_number + 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                loaded.failures.push(RowFailure {
                    row: row_number,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        let name = row.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            loaded.failures.push(RowFailure {
                row: row_number,
                message: format!("blank '{}' cell", config.columns.name),
            });
            continue;
        }

        let mut record = StatRecord::new(name);
        for (attribute, col) in &attribute_idx {
            let cell = row.get(*col).unwrap_or("").trim();
            if let Ok(value) = cell.parse::<f64>() {
                record.attributes.insert((*attribute).to_string(), value);
            }
            // Unparseable cell: attribute stays absent.
        }
        loaded.records.push(record);
    }

    Ok(loaded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnMapping, SourceConfig};
    use std::collections::BTreeMap;

    fn source() -> SourceConfig {
        let mut attributes = BTreeMap::new();
        attributes.insert("wins".to_string(), "W".to_string());
        attributes.insert("ppg".to_string(), "PTS".to_string());
        SourceConfig {
            file: "stats.csv".into(),
            columns: ColumnMapping { name: "TEAM".into(), attributes },
        }
    }

    #[test]
    fn load_basic() {
        let csv = "\
TEAM,W,PTS
Boston Celtics,61,120.6
Denver Nuggets,57,114.9
";
        let loaded = load_csv_records("stats", csv, &source()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded.failures.is_empty());
        assert_eq!(loaded.records[0].name, "Boston Celtics");
        assert_eq!(loaded.records[0].attributes["wins"], 61.0);
        assert_eq!(loaded.records[1].attributes["ppg"], 114.9);
    }

    #[test]
    fn unparseable_cell_leaves_attribute_absent() {
        let csv = "\
TEAM,W,PTS
Miami Heat,--,110.1
";
        let loaded = load_csv_records("stats", csv, &source()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        let record = &loaded.records[0];
        assert!(!record.attributes.contains_key("wins"));
        assert_eq!(record.attributes["ppg"], 110.1);
    }

    #[test]
    fn blank_name_rows_fail_without_aborting() {
        let csv = "\
TEAM,W,PTS
,50,100.0
Utah Jazz,31,108.3
   ,12,99.0
";
        let loaded = load_csv_records("stats", csv, &source()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].name, "Utah Jazz");
        assert_eq!(loaded.failures.len(), 2);
        assert_eq!(loaded.failures[0].row, 1);
        assert_eq!(loaded.failures[1].row, 3);
        assert_eq!(loaded.total_rows(), 3);
    }

    #[test]
    fn short_row_loses_attributes_not_the_record() {
        let csv = "\
TEAM,W,PTS
Chicago Bulls,39
";
        let loaded = load_csv_records("stats", csv, &source()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        let record = &loaded.records[0];
        assert_eq!(record.attributes["wins"], 39.0);
        assert!(!record.attributes.contains_key("ppg"));
    }

    #[test]
    fn missing_configured_column_is_structural() {
        let csv = "\
Team Name,W,PTS
Boston Celtics,61,120.6
";
        let err = load_csv_records("stats", csv, &source()).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { .. }));
        assert!(err.to_string().contains("TEAM"));
    }
}
