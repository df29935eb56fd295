//! The Inbound Merger: folds a goods-received export into the working
//! table's per-warehouse depot-balance accumulators.

use std::collections::HashMap;

use siparis_core::record::Table;
use siparis_core::{compact_code, StageReport, WarehouseSource};
use siparis_xlsx::Sheet;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["Depo", "Ürün Kodu", "İrsaliye Miktarı"];

/// Merges the inbound sheet into `table`, incrementing depot balances for
/// every row whose code matches the primary or secondary product code.
/// Matching is additive: re-running the merge adds the quantities again.
///
/// Missing required columns or an empty sheet skip the stage; the table
/// passes through unchanged.
pub fn merge_inbound(table: &mut Table, sheet: &Sheet) -> StageReport {
    let missing = sheet.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
        warn!(columns = ?missing, "inbound sheet rejected");
        return StageReport::skipped("inbound", format!("missing columns: {}", missing.join(", ")));
    }
    if sheet.is_empty() {
        return StageReport::skipped("inbound", "no rows");
    }

    // Either code column can match; a row reachable through both still
    // takes the increment once per inbound row.
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        for key in [compact_code(&row.urun_kodu), compact_code(&row.duzenlenmis_kod)] {
            if key.is_empty() {
                continue;
            }
            let entries = index.entry(key).or_default();
            if entries.last() != Some(&row_idx) {
                entries.push(row_idx);
            }
        }
    }

    let depo_col = sheet.column_index("Depo").unwrap_or_default();
    let code_col = sheet.column_index("Ürün Kodu").unwrap_or_default();
    let qty_col = sheet.column_index("İrsaliye Miktarı").unwrap_or_default();

    let token_table = WarehouseSource::Inbound.token_table();
    let mut matched = 0usize;
    let mut unmatched = 0usize;

    for row_idx in 0..sheet.len() {
        let qty = sheet.cell(row_idx, qty_col).as_f64().unwrap_or(0.0);
        if qty <= 0.0 {
            continue;
        }

        let Some(warehouse) = token_table.map(&sheet.cell(row_idx, depo_col).to_text()) else {
            unmatched += 1;
            continue;
        };

        let code = compact_code(&sheet.cell(row_idx, code_col).to_text());
        match index.get(&code) {
            Some(rows) if !rows.is_empty() => {
                for &target in rows {
                    table.rows[target].depot_balance[warehouse] += qty;
                }
                matched += 1;
            }
            _ => unmatched += 1,
        }
    }

    table.recompute_totals();
    info!(matched, unmatched, "inbound merge finished");
    StageReport::applied("inbound", matched, unmatched)
}
