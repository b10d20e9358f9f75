//! Declarative column definitions.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A single cell value handed to the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell.
    Empty,
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// Point-in-time content, rendered by the sink.
    Timestamp(DateTime<Utc>),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

type Extractor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// One output column: a header and an explicit value extractor.
///
/// # Examples
///
/// ```rust
/// use crosscut::export::{CellValue, Column};
///
/// struct Transaction {
///     amount: f64,
///     remark: Option<String>,
/// }
///
/// let columns = vec![
///     Column::new("Amount", |t: &Transaction| t.amount.into()),
///     Column::new("Remark", |t: &Transaction| t.remark.clone().into()),
/// ];
/// assert_eq!(columns[0].header(), "Amount");
/// ```
pub struct Column<T: 'static> {
    header: String,
    extract: Extractor<T>,
}

impl<T: 'static> Column<T> {
    /// Define a column with `header` and an extractor for its cell value.
    pub fn new(
        header: impl Into<String>,
        extract: impl Fn(&T) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            extract: Arc::new(extract),
        }
    }

    /// Flatten child columns over a projected sub-record.
    ///
    /// Every child column becomes a column of the outer record; a `None`
    /// projection yields [`CellValue::Empty`] for the whole group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crosscut::export::{CellValue, Column};
    ///
    /// struct Customer {
    ///     name: String,
    /// }
    ///
    /// struct Order {
    ///     id: u64,
    ///     customer: Option<Customer>,
    /// }
    ///
    /// let mut columns = vec![Column::new("Id", |o: &Order| (o.id as i64).into())];
    /// columns.extend(Column::nested(
    ///     |o: &Order| o.customer.as_ref(),
    ///     vec![Column::new("Customer", |c: &Customer| c.name.clone().into())],
    /// ));
    /// ```
    pub fn nested<U: 'static>(
        project: impl for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync + 'static,
        columns: Vec<Column<U>>,
    ) -> Vec<Column<T>> {
        let project = Arc::new(project);
        columns
            .into_iter()
            .map(|child| {
                let project = Arc::clone(&project);
                let extract = child.extract;
                Column {
                    header: child.header,
                    extract: Arc::new(move |record: &T| match project(record) {
                        Some(sub) => extract(sub),
                        None => CellValue::Empty,
                    }),
                }
            })
            .collect()
    }

    /// The column header used in the sheet's header row.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Extract this column's cell value from `record`.
    pub fn value(&self, record: &T) -> CellValue {
        (self.extract)(record)
    }
}

impl<T: 'static> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            extract: Arc::clone(&self.extract),
        }
    }
}
