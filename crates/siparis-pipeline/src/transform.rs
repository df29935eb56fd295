//! The Main Transformer: reshapes the wide primary import into the
//! canonical working table.

use siparis_core::record::{ProductRecord, Table};
use siparis_core::schema::{month_labels, Metric};
use siparis_core::{secondary_code, RunReport, StageReport, Warehouse};
use siparis_xlsx::{Cell, Sheet};
use tracing::warn;

use crate::error::PipelineError;

/// Source-column prefix aliases per warehouse, probed in order. The first
/// alias with an existing `{prefix}{METRIC}` column wins; later aliases for
/// the same warehouse never overwrite it.
fn metric_aliases(warehouse: Warehouse) -> &'static [&'static str] {
    match warehouse {
        Warehouse::Imes => &["D01-", "DTS"],
        Warehouse::Ikitelli => &["TD-E01-", "E01-", "ETS"],
        Warehouse::Ankara => &["A01-", "ATS"],
        Warehouse::Maslak => &["02-"],
        Warehouse::Bolu => &["04-"],
    }
}

/// Alternate header fragments probed when none of the İkitelli primary
/// aliases resolve; these columns get renamed upstream more often than the
/// rest. Ordered most to least specific.
const IKITELLI_ALTERNATE_PATTERNS: [&str; 10] = [
    "IKITELLI", "İKİTELLİ", "IKIT", "IKI", "TD-E01", "E01", "TD-E", "E-01", "E-", "TD-",
];

/// Transforms the raw primary import into the canonical working table.
///
/// Rows with an empty primary product code are dropped and counted on the
/// report. Absent optional source columns degrade to `"0"`/empty values.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumns`] when the primary-code column
/// itself is absent; every other column is optional.
pub fn transform_main_sheet(
    sheet: &Sheet,
    current_month: u32,
    report: &mut RunReport,
) -> Result<Table, PipelineError> {
    let code_col = sheet
        .column_index("URUNKODU")
        .ok_or_else(|| PipelineError::MissingColumns {
            file: sheet.name.clone(),
            columns: vec!["URUNKODU".to_string()],
        })?;

    let text_col = |name: &str| sheet.column_index(name);
    let aciklama = text_col("ACIKLAMA");
    let uretici = text_col("URETİCİKODU");
    let orjinal = text_col("ORJİNAL");
    let eski_kod = text_col("ESKİKOD");
    let topl_fat = text_col("TOPL.FAT.ADT");
    let musteri = text_col("MÜŞT.SAY.");
    let fiyat = text_col("SATıŞ FIYATı");
    let doviz = text_col("DÖVIZ CINSI (S)");

    let category_cols: Vec<Option<usize>> = (1..=7)
        .map(|i| sheet.column_index(&format!("CAT{i}")))
        .collect();

    let metric_cols = resolve_metric_columns(sheet);

    let mut table = Table {
        rows: Vec::with_capacity(sheet.len()),
        month_labels: month_labels(current_month),
    };
    let mut skipped = 0usize;

    for row_idx in 0..sheet.len() {
        let primary = sheet.cell(row_idx, code_col).to_text().trim().to_string();
        if primary.is_empty() {
            skipped += 1;
            continue;
        }

        let mut record = ProductRecord::new(primary);
        record.duzenlenmis_kod = secondary_code(&record.urun_kodu);
        record.aciklama = opt_text(sheet, row_idx, aciklama);
        record.uretici_kodu = opt_text(sheet, row_idx, uretici);
        record.orjinal = opt_text(sheet, row_idx, orjinal);
        record.eski_kod = opt_text(sheet, row_idx, eski_kod);
        record.topl_fat_adt = opt_metric_text(sheet, row_idx, topl_fat);
        record.musteri_sayisi = opt_metric_text(sheet, row_idx, musteri);
        record.satis_fiyati = opt_metric_text(sheet, row_idx, fiyat);
        record.doviz_cinsi = opt_text(sheet, row_idx, doviz);

        for (slot, col) in record.categories.iter_mut().zip(&category_cols) {
            *slot = opt_text(sheet, row_idx, *col);
        }

        for warehouse in Warehouse::ALL {
            let cols = &metric_cols[warehouse.index()];
            let metrics = record.metrics.get_mut(warehouse);
            metrics.devir = opt_metric_text(sheet, row_idx, cols[0]);
            metrics.alis = opt_metric_text(sheet, row_idx, cols[1]);
            metrics.satis = opt_metric_text(sheet, row_idx, cols[2]);
            metrics.stok = opt_metric_text(sheet, row_idx, cols[3]);
        }

        table.rows.push(record);
    }

    table.recompute_totals();

    report.rows_skipped_empty_code += skipped;
    report.push(StageReport::applied("transform", table.len(), 0));
    if skipped > 0 {
        warn!(skipped, "rows dropped for empty product code");
    }

    Ok(table)
}

/// Resolves the source column index for every (warehouse, metric) pair.
/// Returns, per warehouse, one `Option<usize>` per metric in
/// [`Metric::ALL`] order.
fn resolve_metric_columns(sheet: &Sheet) -> [[Option<usize>; 4]; 5] {
    let mut resolved = [[None; 4]; 5];

    for warehouse in Warehouse::ALL {
        for (slot, metric) in Metric::ALL.iter().enumerate() {
            for prefix in metric_aliases(warehouse) {
                let name = format!("{prefix}{}", metric.source_suffix());
                if let Some(col) = sheet.column_index(&name) {
                    resolved[warehouse.index()][slot] = Some(col);
                    break;
                }
            }
        }
    }

    // İkitelli headers get renamed upstream often enough to deserve a
    // looser second pass over whatever fragments are present.
    let iki = Warehouse::Ikitelli.index();
    if resolved[iki].iter().all(Option::is_none) {
        for pattern in IKITELLI_ALTERNATE_PATTERNS {
            for (col, header) in sheet.headers.iter().enumerate() {
                let upper = header.to_uppercase();
                if !upper.contains(pattern) {
                    continue;
                }
                let slot = if upper.contains("DEVIR") || upper.contains("DEVİR") {
                    Some(0)
                } else if upper.contains("ALIS") || upper.contains("ALIŞ") {
                    Some(1)
                } else if upper.contains("SATIS") || upper.contains("SATIŞ") {
                    Some(2)
                } else if upper.contains("STOK") {
                    Some(3)
                } else {
                    None
                };
                if let Some(slot) = slot {
                    if resolved[iki][slot].is_none() {
                        resolved[iki][slot] = Some(col);
                    }
                }
            }
            if resolved[iki].iter().all(Option::is_some) {
                break;
            }
        }
        if resolved[iki].iter().any(Option::is_some) {
            warn!("İkitelli metric columns resolved via alternate header patterns");
        }
    }

    resolved
}

fn opt_text(sheet: &Sheet, row: usize, col: Option<usize>) -> String {
    col.map(|c| sheet.cell(row, c).to_text().trim().to_string())
        .unwrap_or_default()
}

/// Like [`opt_text`] but numeric-flavored: missing columns and blank cells
/// become `"0"` so downstream coercion never sees an empty metric.
fn opt_metric_text(sheet: &Sheet, row: usize, col: Option<usize>) -> String {
    let Some(col) = col else {
        return "0".to_string();
    };
    match sheet.cell(row, col) {
        Cell::Empty => "0".to_string(),
        cell => {
            let text = cell.to_text().trim().to_string();
            if text.is_empty() {
                "0".to_string()
            } else {
                text
            }
        }
    }
}
