use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::SheetError;
use crate::sheet::{Cell, Sheet};

/// Reads the first worksheet of the workbook at `path` into a [`Sheet`].
/// The first row becomes the header row; trailing short rows are padded.
///
/// # Errors
///
/// Returns `SheetError` if the workbook cannot be opened, holds no
/// worksheets, or the worksheet fails to parse.
pub fn read_sheet(path: &Path) -> Result<Sheet, SheetError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SheetError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SheetError::NoWorksheets {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheets {
            path: path.to_path_buf(),
        })?
        .map_err(|source| SheetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(sheet_from_range(&name, &range, path))
}

fn sheet_from_range(name: &str, range: &Range<Data>, path: &Path) -> Sheet {
    let mut iter = range.rows();
    let headers: Vec<String> = iter
        .next()
        .map(|row| row.iter().map(data_to_text).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<Cell>> = iter
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();

    debug!(
        path = %path.display(),
        sheet = name,
        columns = headers.len(),
        rows = rows.len(),
        "worksheet loaded"
    );

    Sheet::new(name, headers, rows)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

fn data_to_text(data: &Data) -> String {
    data_to_cell(data).to_text()
}
