//! Spreadsheet ingestion: a format-agnostic in-memory sheet model and a
//! calamine-backed reader for the workbook formats the source systems emit.

mod error;
mod read;
mod sheet;

pub use error::SheetError;
pub use read::read_sheet;
pub use sheet::{Cell, Sheet};
