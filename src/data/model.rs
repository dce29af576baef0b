use std::fmt;

// ---------------------------------------------------------------------------
// Column names the viewer depends on
// ---------------------------------------------------------------------------

pub const POPULATION_COLUMN: &str = "2022 Population";
pub const COUNTRY_COLUMN: &str = "Country/Territory";
pub const CCA3_COLUMN: &str = "CCA3";
pub const CONTINENT_COLUMN: &str = "Continent";

/// Columns every uploaded dataset must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    POPULATION_COLUMN,
    COUNTRY_COLUMN,
    CCA3_COLUMN,
    CONTINENT_COLUMN,
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text used for labels; nulls render as an empty string.
    pub fn label(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the parsed upload
// ---------------------------------------------------------------------------

/// A parsed table: ordered column names plus row-major cells.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, padding short rows with nulls and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the column at `col`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row][col]
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pads_and_truncates_rows() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1)],
                vec![
                    CellValue::Integer(2),
                    CellValue::Integer(3),
                    CellValue::Integer(4),
                ],
            ],
        );
        assert_eq!(ds.rows[0], vec![CellValue::Integer(1), CellValue::Null]);
        assert_eq!(ds.rows[1].len(), 2);
        assert_eq!(ds.column_index("b"), Some(1));
        assert_eq!(ds.column_index("B"), None);
    }

    #[test]
    fn display_keeps_large_whole_floats_readable() {
        assert_eq!(CellValue::Float(41128771.0).to_string(), "41128771.0");
        assert_eq!(CellValue::Float(0.5).to_string(), "0.5000");
        assert_eq!(CellValue::Null.label(), "");
        assert_eq!(CellValue::Text("Asia".into()).label(), "Asia");
    }
}
