//! Writing column definitions into a tabular sink.

use super::columns::{CellValue, Column};
use crate::error::ExportError;

/// Abstract workbook writer.
///
/// Spreadsheet generation is outside this crate; implement this over the
/// workbook library the application uses (or over CSV, a terminal table,
/// anything row-oriented).
pub trait TabularSink {
    /// Start a new sheet with the given name.
    ///
    /// # Errors
    ///
    /// Implementations report writer failures as [`ExportError::Sink`].
    fn begin_sheet(&mut self, name: &str) -> Result<(), ExportError>;

    /// Append one row of cells to the current sheet.
    ///
    /// # Errors
    ///
    /// Implementations report writer failures as [`ExportError::Sink`].
    fn append_row(&mut self, cells: Vec<CellValue>) -> Result<(), ExportError>;

    /// Append a divider: a label row spanning `span` columns.
    ///
    /// # Errors
    ///
    /// Implementations report writer failures as [`ExportError::Sink`].
    fn merged_label(&mut self, label: &str, span: usize) -> Result<(), ExportError>;
}

/// Write a complete sheet: the header row derived from `columns`, then one
/// row per record.
///
/// # Errors
///
/// Propagates the first sink error; rows written before the failure are the
/// sink's responsibility.
pub fn export_sheet<T>(
    sink: &mut dyn TabularSink,
    name: &str,
    columns: &[Column<T>],
    records: &[T],
) -> Result<(), ExportError> {
    sink.begin_sheet(name)?;
    write_header(sink, columns)?;
    write_records(sink, columns, records)
}

/// Append the header row only, for sinks composing multiple sections into
/// one sheet.
///
/// # Errors
///
/// Propagates the sink error.
pub fn write_header<T>(
    sink: &mut dyn TabularSink,
    columns: &[Column<T>],
) -> Result<(), ExportError> {
    sink.append_row(
        columns
            .iter()
            .map(|c| CellValue::Text(c.header().to_string()))
            .collect(),
    )
}

/// Append one content row per record.
///
/// # Errors
///
/// Propagates the first sink error.
pub fn write_records<T>(
    sink: &mut dyn TabularSink,
    columns: &[Column<T>],
    records: &[T],
) -> Result<(), ExportError> {
    for record in records {
        sink.append_row(columns.iter().map(|c| c.value(record)).collect())?;
    }
    Ok(())
}
