//! Declarative tabular export.
//!
//! A [`Column`] tree describes what to emit for each record: a header plus an
//! explicit extractor closure, with [`Column::nested`] flattening groups
//! over projected sub-records. [`export_sheet`] walks the columns over a
//! slice of records and writes a header row and one content row per record
//! into an abstract [`TabularSink`]; the workbook library itself stays
//! outside this crate.

mod columns;
mod sheet;

pub use columns::{CellValue, Column};
pub use sheet::{TabularSink, export_sheet, write_header, write_records};
