use crate::common::*;

use crate::errors::report_error::*;

#[doc = "One scalar cell of a query result"]
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /* Ordering between kinds: bool < number < date/datetime < text, null last */
    fn rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Date(_) | CellValue::DateTime(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Null => 4,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0),
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    #[doc = "Total order used for sorting result rows"]
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ if self.rank() != other.rank() => self.rank().cmp(&other.rank()),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.as_datetime().cmp(&other.as_datetime()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str(""),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

static NULL_CELL: CellValue = CellValue::Null;

#[doc = "In-memory rows returned by a report query, before rendering"]
#[derive(Debug, Clone, Default, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[doc = r#"
        Position of `name` in the column set.
        An exact match wins; otherwise the first case-insensitive match is used,
        since SQL Server identifiers are usually compared without case.
    "#]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    pub fn require_column(&self, report: &str, name: &str) -> Result<usize, ReportError> {
        self.column_index(name).ok_or_else(|| {
            ReportError::render(
                report,
                format!(
                    "column '{}' is not in the result set (columns: {})",
                    name,
                    self.columns.join(", ")
                ),
            )
        })
    }

    #[doc = "Stable ascending sort on one column; equal keys keep their relative order"]
    pub fn sort_by_column(&mut self, report: &str, name: &str) -> Result<(), ReportError> {
        let idx: usize = self.require_column(report, name)?;

        self.rows.sort_by(|a, b| {
            let left: &CellValue = a.get(idx).unwrap_or(&NULL_CELL);
            let right: &CellValue = b.get(idx).unwrap_or(&NULL_CELL);
            left.compare(right)
        });

        Ok(())
    }

    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).unwrap_or(&NULL_CELL))
    }
}
