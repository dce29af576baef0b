use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The upload could not be turned into a usable dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("no columns to parse from file")]
    Empty,

    #[error("malformed {format} file: {cause:#}")]
    Malformed {
        format: &'static str,
        cause: anyhow::Error,
    },

    #[error("column '{column}', row {row}: '{value}' is not a number")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("the dataset has no rows")]
    NoRows,

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

// ---------------------------------------------------------------------------
// Upload – the file the user handed us
// ---------------------------------------------------------------------------

/// A user-supplied file: its name (for format dispatch and display) and raw
/// contents. Parsing happens anew on every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Upload {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk into an upload.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Upload::new(name, bytes))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
    Parquet,
}

impl Format {
    fn label(self) -> &'static str {
        match self {
            Format::Csv => "CSV",
            Format::Json => "JSON",
            Format::Parquet => "Parquet",
        }
    }
}

/// File extensions accepted by [`load_upload`].
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "json", "parquet", "pq"];

fn format_of(name: &str) -> Result<Format, LoadError> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => Ok(Format::Csv),
        "json" => Ok(Format::Json),
        "parquet" | "pq" => Ok(Format::Parquet),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse an upload into a [`Dataset`].  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by records (the primary format)
/// * `.json`    – `[{ "CCA3": "AFG", "2022 Population": 41128771, ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_upload(upload: &Upload) -> Result<Dataset, LoadError> {
    let format = format_of(&upload.name)?;

    if upload.bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Empty);
    }

    let parsed = match format {
        Format::Csv => parse_csv(&upload.bytes),
        Format::Json => parse_json(&upload.bytes),
        Format::Parquet => parse_parquet(upload.bytes.clone()),
    };

    let dataset = parsed.map_err(|cause| LoadError::Malformed {
        format: format.label(),
        cause,
    })?;

    if dataset.columns.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per row. Short records are
/// padded with nulls, records with extra fields are rejected.
fn parse_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Header is line 1, so the first record is line 2.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;

        if record.len() > columns.len() {
            bail!(
                "CSV line {line}: expected {} fields, saw {}",
                columns.len(),
                record.len()
            );
        }

        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Dataset::new(columns, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if matches!(trimmed, "" | "NaN" | "nan" | "null" | "NULL") {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }
    match trimmed {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
/// Columns are ordered by first appearance across records.
fn parse_json(bytes: &[u8]) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table, as written by Pandas `df.to_parquet()` or
/// Polars `df.write_parquet()`.
fn parse_parquet(bytes: Bytes) -> Result<Dataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(bytes).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let cells: Vec<Vec<CellValue>> = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(col, name)| {
                column_cells(col).with_context(|| format!("column '{name}'"))
            })
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            rows.push(cells.iter().map(|col| col[row].clone()).collect());
        }
    }

    Ok(Dataset::new(columns, rows))
}

// -- Arrow helpers --

/// Convert a whole Arrow column into cells, widening numeric types first.
fn column_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let cells = match col.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let widened = cast(col, &DataType::Int64).context("widening integers")?;
            let arr = widened.as_primitive::<Int64Type>();
            (0..arr.len())
                .map(|i| {
                    if arr.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Integer(arr.value(i))
                    }
                })
                .collect()
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let widened = cast(col, &DataType::Float64).context("widening floats")?;
            let arr = widened.as_primitive::<Float64Type>();
            (0..arr.len())
                .map(|i| {
                    if arr.is_null(i) || arr.value(i).is_nan() {
                        CellValue::Null
                    } else {
                        CellValue::Float(arr.value(i))
                    }
                })
                .collect()
        }
        DataType::Boolean => {
            let arr = col.as_boolean();
            (0..arr.len())
                .map(|i| {
                    if arr.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Bool(arr.value(i))
                    }
                })
                .collect()
        }
        other => {
            // Strings, dictionaries and anything else castable to text.
            let text = cast(col, &DataType::Utf8)
                .with_context(|| format!("unsupported column type {other:?}"))?;
            let arr = text.as_string::<i32>();
            (0..arr.len())
                .map(|i| {
                    if arr.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Text(arr.value(i).to_string())
                    }
                })
                .collect()
        }
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;

    use super::*;

    const WORLD_CSV: &str = "\
Rank,CCA3,Country/Territory,Continent,2022 Population
36,AFG,Afghanistan,Asia,41128771
1,CHN,China,Asia,1425887337
";

    #[test]
    fn csv_rows_are_typed() {
        let ds = load_upload(&Upload::new("world.csv", WORLD_CSV)).unwrap();
        assert_eq!(
            ds.columns,
            vec!["Rank", "CCA3", "Country/Territory", "Continent", "2022 Population"]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0][1], CellValue::Text("AFG".into()));
        assert_eq!(ds.rows[1][4], CellValue::Integer(1425887337));
    }

    #[test]
    fn csv_short_records_are_padded() {
        let ds = load_upload(&Upload::new("a.csv", "a,b,c\n1,2\n")).unwrap();
        assert_eq!(
            ds.rows[0],
            vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Null]
        );
    }

    #[test]
    fn csv_with_extra_fields_is_malformed() {
        let err = load_upload(&Upload::new("a.csv", "a,b\n1,2,3\n")).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { format: "CSV", .. }));
        assert!(err.to_string().contains("expected 2 fields, saw 3"), "{err}");
    }

    #[test]
    fn binary_content_is_a_load_error() {
        let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0xff, 0xfe, 0x00, 0x01, b'\n', 0xc3];
        let err = load_upload(&Upload::new("image.csv", bytes)).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }), "{err:?}");
    }

    #[test]
    fn empty_file_has_no_columns() {
        let err = load_upload(&Upload::new("empty.csv", "  \n")).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_upload(&Upload::new("world.xlsx", "x")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn cell_type_guessing() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("NaN"), CellValue::Null);
        assert_eq!(guess_cell_type(" 42 "), CellValue::Integer(42));
        assert_eq!(guess_cell_type("1.5"), CellValue::Float(1.5));
        assert_eq!(guess_cell_type("True"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("Oceania"), CellValue::Text("Oceania".into()));
    }

    #[test]
    fn json_records_keep_first_appearance_order() {
        let json = r#"[
            {"CCA3": "AFG", "2022 Population": 41128771},
            {"CCA3": "CHN", "2022 Population": 1425887337.0, "Continent": "Asia"}
        ]"#;
        let ds = load_upload(&Upload::new("world.json", json)).unwrap();
        assert_eq!(ds.columns, vec!["CCA3", "2022 Population", "Continent"]);
        assert_eq!(ds.rows[0][2], CellValue::Null);
        assert_eq!(ds.rows[1][1], CellValue::Float(1425887337.0));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let err = load_upload(&Upload::new("x.json", r#"{"a": 1}"#)).unwrap_err();
        assert!(err.to_string().contains("Expected top-level JSON array"), "{err}");
    }

    #[test]
    fn parquet_columns_are_converted() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CCA3", DataType::Utf8, false),
            Field::new("2022 Population", DataType::Int32, true),
            Field::new("Density", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["AFG", "CHN"])),
                Arc::new(Int32Array::from(vec![Some(41128771), None])),
                Arc::new(Float64Array::from(vec![63.0587, 151.3])),
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_upload(&Upload::new("world.parquet", buf)).unwrap();
        assert_eq!(ds.columns, vec!["CCA3", "2022 Population", "Density"]);
        assert_eq!(
            ds.rows[0],
            vec![
                CellValue::Text("AFG".into()),
                CellValue::Integer(41128771),
                CellValue::Float(63.0587),
            ]
        );
        assert_eq!(ds.rows[1][1], CellValue::Null);
    }

    #[test]
    fn garbage_parquet_is_malformed() {
        let err = load_upload(&Upload::new("x.parquet", "not parquet at all")).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { format: "Parquet", .. }));
    }
}
