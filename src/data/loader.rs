use std::io::Read;
use std::path::Path;

use super::model::{CellValue, Dataset, Record};
use crate::error::LoadError;

/// Long sensor headers of the source CSV → short column identifiers.
pub const COLUMN_RENAMES: [(&str, &str); 6] = [
    ("Air temperature [K]", "AirTempK"),
    ("Process temperature [K]", "ProcTempK"),
    ("Rotational speed [rpm]", "RPM"),
    ("Torque [Nm]", "Torque"),
    ("Tool wear [min]", "ToolWear"),
    ("Failure Type", "FailureType"),
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a sensor dataset from a `.csv` file.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "csv" {
        return Err(LoadError::UnsupportedFormat(ext));
    }

    let file = std::fs::File::open(path)?;
    let dataset = load_reader(file)?;
    log::info!(
        "Loaded {} records with columns {:?} from {}",
        dataset.len(),
        dataset.columns,
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV text (header row first) and normalise the column names.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| rename_column(h.trim()).to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::MissingHeader);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::new(headers, records))
}

/// Short name for a long sensor header; other names pass through unchanged.
pub fn rename_column(name: &str) -> &str {
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(name)
}

/// Markers read as missing values, in addition to the empty field.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_nan() {
            return CellValue::Null;
        }
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "\
UDI,Product ID,Type,Air temperature [K],Process temperature [K],Rotational speed [rpm],Torque [Nm],Tool wear [min],Target,Failure Type
1,M14860,M,298.1,308.6,1551,42.8,0,0,No Failure
2,L47181,L,298.2,308.7,1408,46.3,3,0,No Failure
3,L47182,L,298.1,308.5,1498,49.4,5,1,Power Failure
";

    #[test]
    fn long_headers_are_renamed() {
        let ds = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            ds.columns,
            vec![
                "UDI",
                "Product ID",
                "Type",
                "AirTempK",
                "ProcTempK",
                "RPM",
                "Torque",
                "ToolWear",
                "Target",
                "FailureType",
            ]
        );
        assert_eq!(ds.len(), 3);
        let first = &ds.records[0];
        assert_eq!(first.get("RPM"), Some(&CellValue::Integer(1551)));
        assert_eq!(first.get("Torque"), Some(&CellValue::Float(42.8)));
        assert_eq!(first.get("FailureType"), Some(&CellValue::from("No Failure")));
    }

    #[test]
    fn absent_rename_sources_are_ignored() {
        let ds = load_reader("Type,Target\nL,0\nH,1\n".as_bytes()).unwrap();
        assert_eq!(ds.columns, vec!["Type", "Target"]);
        assert!(!ds.has_column("FailureType"));
    }

    #[test]
    fn empty_fields_become_null() {
        let ds = load_reader("Type,RPM\nL,\nM,1500\n".as_bytes()).unwrap();
        assert_eq!(ds.records[0].get("RPM"), Some(&CellValue::Null));
    }

    #[test]
    fn na_markers_become_null() {
        let csv = "RPM,Target,Note\n1500,0,NA\nNaN,nan,N/A\n1700,null,ok\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[1].get("RPM"), Some(&CellValue::Null));
        assert_eq!(ds.records[1].get("Target"), Some(&CellValue::Null));
        assert_eq!(ds.records[2].get("Target"), Some(&CellValue::Null));
        assert_eq!(ds.records[0].get("Note"), Some(&CellValue::Null));
        assert_eq!(ds.records[2].get("Note"), Some(&CellValue::from("ok")));
        assert_eq!(guess_cell_type("+nan"), CellValue::Null);
        assert_eq!(guess_cell_type("inf"), CellValue::Float(f64::INFINITY));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = load_reader("Type,Target\nL,0,extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = load_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)), "{err}");
    }

    #[test]
    fn non_csv_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.parquet");
        std::fs::write(&path, b"x").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "parquet"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.unique_values["Type"].len(), 2);
    }
}
