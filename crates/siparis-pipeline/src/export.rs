//! The Exporter: serializes the working table into an xlsx workbook in the
//! canonical column order, with the secondary-code column forced to text
//! format and the total-depot-balance column written as a live formula.

use std::path::Path;

use rust_xlsxwriter::{utility, Format, Formula, Workbook};
use siparis_core::record::{ProductRecord, Table};
use siparis_core::schema::{canonical_columns, ColumnKind, ColumnSpec, Metric};
use tracing::warn;

use crate::error::PipelineError;

/// Writes `table` to `path`. The primary attempt cleans sentinel values
/// ("-", blanks) out of the balance columns and writes them as numbers; if
/// that fails for any reason a bare text export is retried so the caller is
/// never left without a file.
///
/// # Errors
///
/// Returns [`PipelineError::Xlsx`] only when the fallback export fails too.
pub fn write_order_workbook(table: &Table, path: &Path) -> Result<(), PipelineError> {
    if let Err(err) = write_table(table, path, true) {
        warn!(error = %err, "cleaned export failed, retrying bare export");
        return write_table(table, path, false);
    }
    Ok(())
}

fn write_table(table: &Table, path: &Path, cleaned: bool) -> Result<(), PipelineError> {
    let columns = canonical_columns(&table.month_labels);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let text_format = Format::new().set_num_format("@");

    let depot_cols: Vec<u16> = (0u16..)
        .zip(columns.iter())
        .filter(|(_, spec)| matches!(spec.kind, ColumnKind::DepotBalance(_)))
        .map(|(col, _)| col)
        .collect();

    for (col, spec) in (0u16..).zip(columns.iter()) {
        worksheet.write_string(0, col, &spec.name)?;
    }

    for (row_offset, record) in (0u32..).zip(table.rows.iter()) {
        let row = row_offset + 1;
        for (col, spec) in (0u16..).zip(columns.iter()) {
            write_cell(
                worksheet, row, col, spec, record, cleaned, &depot_cols, &text_format,
            )?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    spec: &ColumnSpec,
    record: &ProductRecord,
    cleaned: bool,
    depot_cols: &[u16],
    text_format: &Format,
) -> Result<(), PipelineError> {
    match &spec.kind {
        ColumnKind::PrimaryCode | ColumnKind::PrimaryCodeRepeat => {
            worksheet.write_string(row, col, &record.urun_kodu)?;
        }
        // Text format so leading zeros in the derived code survive Excel.
        ColumnKind::SecondaryCode => {
            worksheet.write_string_with_format(row, col, &record.duzenlenmis_kod, text_format)?;
        }
        ColumnKind::Description => {
            worksheet.write_string(row, col, &record.aciklama)?;
        }
        ColumnKind::ManufacturerCode => {
            worksheet.write_string(row, col, &record.uretici_kodu)?;
        }
        ColumnKind::OriginalCode => {
            worksheet.write_string(row, col, &record.orjinal)?;
        }
        ColumnKind::LegacyCode => {
            worksheet.write_string(row, col, &record.eski_kod)?;
        }
        ColumnKind::Category(i) => {
            worksheet.write_string(row, col, &record.categories[*i])?;
        }
        ColumnKind::Metric(warehouse, metric) => {
            let metrics = record.metrics.get(*warehouse);
            let text = match metric {
                Metric::Devir => &metrics.devir,
                Metric::Alis => &metrics.alis,
                Metric::Satis => &metrics.satis,
                Metric::Stok => &metrics.stok,
            };
            if cleaned {
                worksheet.write_number(row, col, sanitize_numeric(text))?;
            } else {
                worksheet.write_string(row, col, text)?;
            }
        }
        ColumnKind::DepotBalance(warehouse) => {
            worksheet.write_number(row, col, record.depot_balance[*warehouse])?;
        }
        ColumnKind::TotalDepotBalance => {
            // Live formula instead of the stored total, one SUM per row.
            let refs: Vec<String> = depot_cols
                .iter()
                .map(|&c| format!("{}{}", utility::column_number_to_name(c), row + 1))
                .collect();
            worksheet.write_formula(row, col, Formula::new(format!("=SUM({})", refs.join(","))))?;
        }
        ColumnKind::SupplierBalance(warehouse) => {
            worksheet.write_number(row, col, record.supplier_balance[*warehouse])?;
        }
        ColumnKind::OrderQty(warehouse) => {
            worksheet.write_number(row, col, record.order_qty[*warehouse])?;
        }
        ColumnKind::InvoiceTotal => {
            write_numeric_text(worksheet, row, col, &record.topl_fat_adt, cleaned)?;
        }
        ColumnKind::CustomerCount => {
            write_numeric_text(worksheet, row, col, &record.musteri_sayisi, cleaned)?;
        }
        ColumnKind::SalesPrice => {
            write_numeric_text(worksheet, row, col, &record.satis_fiyati, cleaned)?;
        }
        ColumnKind::Currency => {
            worksheet.write_string(row, col, &record.doviz_cinsi)?;
        }
        ColumnKind::FixedZero => {
            worksheet.write_number(row, col, 0.0)?;
        }
    }
    Ok(())
}

/// Balance-column cleanup: sentinel and unparseable values become zero.
fn sanitize_numeric(text: &str) -> f64 {
    match text.trim() {
        "" | "-" | "nan" | "NaN" | "None" => 0.0,
        value => value.parse::<f64>().unwrap_or(0.0),
    }
}

fn write_numeric_text(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    text: &str,
    cleaned: bool,
) -> Result<(), PipelineError> {
    if cleaned {
        if let Ok(value) = text.trim().parse::<f64>() {
            worksheet.write_number(row, col, value)?;
            return Ok(());
        }
    }
    worksheet.write_string(row, col, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use siparis_core::Warehouse;

    #[test]
    fn sanitize_maps_sentinels_to_zero() {
        assert!((sanitize_numeric("-") - 0.0).abs() < f64::EPSILON);
        assert!((sanitize_numeric("nan") - 0.0).abs() < f64::EPSILON);
        assert!((sanitize_numeric(" 12.5 ") - 12.5).abs() < f64::EPSILON);
        assert!((sanitize_numeric("abc") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn total_formula_addresses_are_valid_past_column_z() {
        let columns = canonical_columns(&["Eylül".to_string(), "Ekim".to_string()]);
        let depot_cols: Vec<u16> = (0u16..)
            .zip(columns.iter())
            .filter(|(_, spec)| matches!(spec.kind, ColumnKind::DepotBalance(_)))
            .map(|(col, _)| col)
            .collect();
        let names: Vec<String> = depot_cols
            .iter()
            .map(|&c| utility::column_number_to_name(c))
            .collect();
        assert_eq!(names, vec!["AI", "AJ", "AK", "AL", "AM"]);
    }

    #[test]
    fn workbook_export_round_trips_through_disk() {
        let mut record = ProductRecord::new("A-1234".to_string());
        record.duzenlenmis_kod = "01234".to_string();
        record.metrics.get_mut(Warehouse::Imes).devir = "-".to_string();
        record.depot_balance[Warehouse::Bolu] = 5.0;
        let mut table = Table {
            rows: vec![record],
            month_labels: ["Eylül".to_string(), "Ekim".to_string()],
        };
        table.recompute_totals();

        let path = std::env::temp_dir().join("siparis_export_test.xlsx");
        write_order_workbook(&table, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }
}
