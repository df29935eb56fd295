use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rust_xlsxwriter::{Format, Workbook};
use siparis_core::normalize::bosch_code;
use siparis_xlsx::Sheet;
use tracing::{info, warn};

use crate::error::BoschError;
use crate::record::{BoschOrderRecord, MatchStatus};

/// Quantities within this distance of each other are considered settled.
pub const QTY_TOLERANCE: f64 = 0.001;

/// Only order notes whose first three letters resolve to one of these
/// depot codes survive into the output.
const DEPOT_WHITELIST: [&str; 5] = ["aas", "das", "mas", "bas", "eas"];

const BALANCE_COLUMNS: [&str; 4] = [
    "Sipariş Notu",
    "Ürün Grubu",
    "Bosch No",
    "Fatura ve Sevk Edilmemiş Toplam",
];
const INBOUND_COLUMNS: [&str; 4] = ["Cari", "Sipariş No", "Ürün Kodu", "İrsaliye Miktarı"];
const ORDER_LINE_COLUMNS: [&str; 4] = ["SIPARIS_NO", "STOK_KODU", "SIPARIS_MIKTARI", "KALAN_MIKTAR"];

/// Matched against the uppercased party name; the loose `BOSCH` substring
/// test is the fallback when this full legal-entity form finds nothing.
static STRICT_BOSCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"BOSCH\s+SANAY[İI]\s+VE\s+T[İI]CARET\s+A\.?[ŞS]\.?").expect("valid regex")
});

/// How balance rows are joined against the open order lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Legacy behavior: enrich each balance row from the first order line
    /// sharing its key and emit it as-is, without a status tag.
    FirstMatch,
    /// Sum remaining quantities across all key matches and compare against
    /// the invoiced total: agreeing rows expand into one record per order
    /// line (FULL_MATCH), disagreeing rows stay single with zeroed order
    /// fields (PARTIAL_MATCH), keyless rows are tagged NO_MATCH.
    #[default]
    Reconcile,
}

/// Result of a reconciliation run, with the drop counters the operator
/// sees alongside the records.
#[derive(Debug)]
pub struct BoschOutput {
    pub records: Vec<BoschOrderRecord>,
    /// Balance rows whose derived depot code fell outside the whitelist.
    pub dropped_depot_rows: usize,
    /// Inbound rows appended to the balance table as DEPO rows.
    pub inbound_rows_added: usize,
}

struct BalanceRow {
    order_note: String,
    product_group: String,
    bosch_no: String,
    invoiced_total: f64,
}

struct OrderLine {
    order_qty: f64,
    remaining_qty: f64,
}

/// Runs the three-file reconciliation. A missing required column in any
/// of the inputs aborts with [`BoschError::MissingColumns`].
///
/// # Errors
///
/// Returns an error when any input violates its column contract.
pub fn reconcile(
    balance: &Sheet,
    inbound: &Sheet,
    order_lines: &Sheet,
    policy: MatchPolicy,
) -> Result<BoschOutput, BoschError> {
    require_columns(balance, &BALANCE_COLUMNS)?;
    require_columns(inbound, &INBOUND_COLUMNS)?;
    require_columns(order_lines, &ORDER_LINE_COLUMNS)?;

    let mut rows = parse_balance(balance);
    let inbound_rows_added = append_inbound(&mut rows, inbound);

    // Everything not fed in from the inbound file is a supplier-side
    // balance, regardless of how the report spelled the group.
    for row in &mut rows {
        if row.product_group != "DEPO" {
            row.product_group = "TEDARİKÇİ".to_string();
        }
    }

    let lines = parse_order_lines(order_lines);

    let mut records = Vec::new();
    let mut dropped_depot_rows = 0usize;
    for row in &rows {
        let Some(depot_code) = whitelisted_depot(&row.order_note) else {
            dropped_depot_rows += 1;
            continue;
        };
        let key = composite_key(&row.order_note, &row.bosch_no);
        match policy {
            MatchPolicy::FirstMatch => {
                records.push(emit_first_match(row, depot_code, lines.get(&key)));
            }
            MatchPolicy::Reconcile => {
                emit_reconciled(row, depot_code, lines.get(&key), &mut records);
            }
        }
    }

    info!(
        records = records.len(),
        dropped = dropped_depot_rows,
        inbound = inbound_rows_added,
        "bosch reconciliation complete"
    );
    Ok(BoschOutput { records, dropped_depot_rows, inbound_rows_added })
}

fn require_columns(sheet: &Sheet, required: &[&str]) -> Result<(), BoschError> {
    let missing = sheet.missing_columns(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BoschError::MissingColumns { file: sheet.name.clone(), columns: missing })
    }
}

fn parse_balance(sheet: &Sheet) -> Vec<BalanceRow> {
    let note = sheet.column_index("Sipariş Notu").unwrap_or(0);
    let group = sheet.column_index("Ürün Grubu").unwrap_or(0);
    let code = sheet.column_index("Bosch No").unwrap_or(0);
    let total = sheet.column_index("Fatura ve Sevk Edilmemiş Toplam").unwrap_or(0);

    (0..sheet.len())
        .map(|r| BalanceRow {
            order_note: sheet.cell(r, note).to_text().trim().to_string(),
            product_group: sheet.cell(r, group).to_text().trim().to_string(),
            bosch_no: bosch_code(&sheet.cell(r, code).to_text()),
            invoiced_total: sheet.cell(r, total).as_f64().unwrap_or(0.0),
        })
        .collect()
}

/// Appends the inbound deliveries that belong to Bosch as synthetic DEPO
/// rows, promoting order number to order note and product code to a
/// prefixed Bosch code.
fn append_inbound(rows: &mut Vec<BalanceRow>, sheet: &Sheet) -> usize {
    let party = sheet.column_index("Cari").unwrap_or(0);
    let order_no = sheet.column_index("Sipariş No").unwrap_or(0);
    let product = sheet.column_index("Ürün Kodu").unwrap_or(0);
    let qty = sheet.column_index("İrsaliye Miktarı").unwrap_or(0);

    let is_bosch = |r: usize, strict: bool| {
        let name = sheet.cell(r, party).to_text().to_uppercase();
        if strict {
            STRICT_BOSCH_RE.is_match(&name)
        } else {
            name.contains("BOSCH")
        }
    };

    let mut matched: Vec<usize> = (0..sheet.len()).filter(|&r| is_bosch(r, true)).collect();
    if matched.is_empty() {
        matched = (0..sheet.len()).filter(|&r| is_bosch(r, false)).collect();
        if !matched.is_empty() {
            warn!(
                rows = matched.len(),
                "strict party-name pattern found nothing, fell back to substring match"
            );
        }
    }

    let added = matched.len();
    for r in matched {
        rows.push(BalanceRow {
            order_note: sheet.cell(r, order_no).to_text().trim().to_string(),
            product_group: "DEPO".to_string(),
            bosch_no: bosch_code(&sheet.cell(r, product).to_text()),
            invoiced_total: sheet.cell(r, qty).as_f64().unwrap_or(0.0),
        });
    }
    added
}

fn parse_order_lines(sheet: &Sheet) -> HashMap<String, Vec<OrderLine>> {
    let order_no = sheet.column_index("SIPARIS_NO").unwrap_or(0);
    let stock = sheet.column_index("STOK_KODU").unwrap_or(0);
    let order_qty = sheet.column_index("SIPARIS_MIKTARI").unwrap_or(0);
    let remaining = sheet.column_index("KALAN_MIKTAR").unwrap_or(0);

    let mut map: HashMap<String, Vec<OrderLine>> = HashMap::new();
    for r in 0..sheet.len() {
        let key = composite_key(
            &sheet.cell(r, order_no).to_text(),
            &sheet.cell(r, stock).to_text(),
        );
        map.entry(key).or_default().push(OrderLine {
            order_qty: sheet.cell(r, order_qty).as_f64().unwrap_or(0.0),
            remaining_qty: sheet.cell(r, remaining).as_f64().unwrap_or(0.0),
        });
    }
    map
}

/// Both halves whitespace-stripped so join keys survive the inconsistent
/// spacing seen across the source exports.
fn composite_key(left: &str, right: &str) -> String {
    left.chars()
        .chain(right.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn whitelisted_depot(order_note: &str) -> Option<String> {
    let code: String = order_note.trim().chars().take(3).collect::<String>().to_lowercase();
    DEPOT_WHITELIST.contains(&code.as_str()).then_some(code)
}

fn base_record(row: &BalanceRow, depot_code: String) -> BoschOrderRecord {
    BoschOrderRecord {
        order_note: row.order_note.clone(),
        depot_code,
        product_group: row.product_group.clone(),
        bosch_no: row.bosch_no.clone(),
        display_key: composite_key(&row.order_note, &row.bosch_no),
        estimated_delivery: String::new(),
        invoiced_total: row.invoiced_total,
        order_qty: None,
        remaining_qty: None,
        match_status: None,
    }
}

fn emit_first_match(
    row: &BalanceRow,
    depot_code: String,
    lines: Option<&Vec<OrderLine>>,
) -> BoschOrderRecord {
    let mut record = base_record(row, depot_code);
    if let Some(line) = lines.and_then(|l| l.first()) {
        record.order_qty = Some(line.order_qty);
        record.remaining_qty = Some(line.remaining_qty);
    }
    record
}

fn emit_reconciled(
    row: &BalanceRow,
    depot_code: String,
    lines: Option<&Vec<OrderLine>>,
    records: &mut Vec<BoschOrderRecord>,
) {
    let Some(lines) = lines.filter(|l| !l.is_empty()) else {
        let mut record = base_record(row, depot_code);
        record.order_qty = Some(0.0);
        record.remaining_qty = Some(0.0);
        record.match_status = Some(MatchStatus::None);
        records.push(record);
        return;
    };

    let remaining_total: f64 = lines.iter().map(|l| l.remaining_qty).sum();
    if (remaining_total - row.invoiced_total).abs() <= QTY_TOLERANCE {
        // Fully settled: one record per order line, the display key
        // carrying the line's settled quantity.
        for line in lines {
            let mut record = base_record(row, depot_code.clone());
            record.order_qty = Some(line.order_qty);
            record.remaining_qty = Some(line.remaining_qty);
            record.match_status = Some(MatchStatus::Full);
            if (line.order_qty - line.remaining_qty).abs() <= QTY_TOLERANCE {
                record.display_key = format!("{}-{}", record.display_key, format_qty(line.remaining_qty));
            }
            records.push(record);
        }
    } else {
        let mut record = base_record(row, depot_code);
        record.order_qty = Some(0.0);
        record.remaining_qty = Some(0.0);
        record.match_status = Some(MatchStatus::Partial);
        records.push(record);
    }
}

fn format_qty(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{qty:.0}")
    } else {
        qty.to_string()
    }
}

const XLSX_HEADERS: [&str; 10] = [
    "Sipariş Notu",
    "Depo Kodu",
    "Ürün Grubu",
    "Bosch No",
    "Sütun1",
    "Tahmini Teslim Tarihi",
    "Fatura ve Sevk Edilmemiş Toplam",
    "SIPARIS_MIKTARI",
    "KALAN_MIKTAR",
    "Eşleşme Durumu",
];

/// Writes the records to a single-sheet workbook named `BOSCH_Verileri`.
///
/// # Errors
///
/// Returns an error when the workbook cannot be written to `path`.
pub fn write_xlsx(records: &[BoschOrderRecord], path: &Path) -> Result<(), BoschError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("BOSCH_Verileri")?;

    let bold = Format::new().set_bold();
    for (c, header) in XLSX_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, c as u16, *header, &bold)?;
    }

    for (r, record) in records.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string(row, 0, &record.order_note)?;
        sheet.write_string(row, 1, &record.depot_code)?;
        sheet.write_string(row, 2, &record.product_group)?;
        sheet.write_string(row, 3, &record.bosch_no)?;
        sheet.write_string(row, 4, &record.display_key)?;
        sheet.write_string(row, 5, &record.estimated_delivery)?;
        sheet.write_number(row, 6, record.invoiced_total)?;
        if let Some(qty) = record.order_qty {
            sheet.write_number(row, 7, qty)?;
        }
        if let Some(qty) = record.remaining_qty {
            sheet.write_number(row, 8, qty)?;
        }
        if let Some(status) = record.match_status {
            let label = match status {
                MatchStatus::Full => "FULL_MATCH",
                MatchStatus::Partial => "PARTIAL_MATCH",
                MatchStatus::None => "NO_MATCH",
            };
            sheet.write_string(row, 9, label)?;
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), records = records.len(), "bosch workbook written");
    Ok(())
}

/// Pretty-prints the records as a JSON array. Turkish characters stay
/// literal; serde_json does not escape non-ASCII.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn to_json(records: &[BoschOrderRecord]) -> Result<String, BoschError> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
