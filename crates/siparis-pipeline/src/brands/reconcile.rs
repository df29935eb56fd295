//! The generic brand reconciliation routine. One pass per brand, driven by
//! its [`BrandProfile`]; the structurally different BOSCH export has its
//! own routine routing rows into two column families.

use std::collections::BTreeMap;

use siparis_core::record::Table;
use siparis_core::warehouse::bosch_depot_code;
use siparis_core::{clean_product_code, compact_code, find_best_match};
use siparis_core::{RunReport, StageReport, Warehouse};
use siparis_xlsx::Sheet;
use tracing::{info, warn};

use crate::brands::profile::{Brand, BrandProfile, KeyColumn, MatchScope, QuantityRule};

/// Reconciles every supplied brand sheet into `table`'s supplier-balance
/// (and, for BOSCH, depot-balance) accumulators.
///
/// Brands are processed in the order given, one at a time; a brand that
/// cannot be processed (empty sheet, missing columns, no category rows) is
/// reported as skipped and never aborts the remaining brands. Totals are
/// recomputed once at the end.
pub fn reconcile_brands(
    table: &mut Table,
    sheets: &[(Brand, Sheet)],
    brand_threshold: f64,
    report: &mut RunReport,
) {
    for (brand, sheet) in sheets {
        let stage = format!("brand:{}", brand.slug());

        if sheet.is_empty() {
            report.push(StageReport::skipped(stage, "empty sheet"));
            continue;
        }

        let mask = category_mask(table, brand.search_terms());
        if !mask.iter().any(|&m| m) {
            warn!(brand = %brand, "brand not found in category column");
            report.push(StageReport::skipped(stage, "brand not present in category column"));
            continue;
        }

        let outcome = match brand.profile() {
            Some(profile) => reconcile_standard(table, &mask, &profile, sheet, brand_threshold),
            None => reconcile_bosch(table, &mask, sheet),
        };

        match outcome {
            Ok((touched, unmatched)) => {
                info!(brand = %brand, touched, unmatched, "brand reconciled");
                report.push(StageReport::applied(stage, touched, unmatched));
            }
            Err(reason) => {
                warn!(brand = %brand, reason, "brand skipped");
                report.push(StageReport::skipped(stage, reason));
            }
        }
    }

    table.recompute_totals();
}

/// Rows whose category label contains any of the brand's search terms
/// (case-insensitive). When substring search finds nothing, one
/// exact-equality pass against the first term is attempted before giving up.
fn category_mask(table: &Table, terms: &[&str]) -> Vec<bool> {
    let upper_terms: Vec<String> = terms.iter().map(|t| t.to_uppercase()).collect();
    let mut mask: Vec<bool> = table
        .rows
        .iter()
        .map(|row| {
            let category = row.brand_category().to_uppercase();
            upper_terms.iter().any(|t| category.contains(t.as_str()))
        })
        .collect();

    if !mask.iter().any(|&m| m) {
        if let Some(first) = terms.first() {
            for (slot, row) in mask.iter_mut().zip(&table.rows) {
                *slot = row.brand_category() == *first;
            }
        }
    }

    mask
}

/// Per-warehouse quantity aggregation keyed by normalized code. `BTreeMap`
/// keeps accumulation order deterministic across runs.
type CodeGroups = [BTreeMap<String, f64>; 5];

fn reconcile_standard(
    table: &mut Table,
    mask: &[bool],
    profile: &BrandProfile,
    sheet: &Sheet,
    threshold: f64,
) -> Result<(usize, usize), String> {
    let key_col = match profile.key {
        KeyColumn::Fixed(name) => sheet
            .column_index(name)
            .ok_or_else(|| format!("missing column: {name}"))?,
        KeyColumn::FirstOf(names) => names
            .iter()
            .find_map(|name| sheet.column_index(name))
            .ok_or_else(|| format!("no code column among: {}", names.join(", ")))?,
    };
    let warehouse_col = sheet
        .column_index(profile.warehouse_column)
        .ok_or_else(|| format!("missing column: {}", profile.warehouse_column))?;
    let qty_cols = match profile.quantity {
        QuantityRule::Single(name) => {
            vec![sheet
                .column_index(name)
                .ok_or_else(|| format!("missing column: {name}"))?]
        }
        QuantityRule::Sum(a, b) => vec![
            sheet
                .column_index(a)
                .ok_or_else(|| format!("missing column: {a}"))?,
            sheet
                .column_index(b)
                .ok_or_else(|| format!("missing column: {b}"))?,
        ],
    };

    let token_table = profile.warehouse_source.token_table();
    let mut groups = CodeGroups::default();

    for row_idx in 0..sheet.len() {
        let Some(warehouse) = token_table.map(&sheet.cell(row_idx, warehouse_col).to_text())
        else {
            continue;
        };
        let code = profile
            .code_rule
            .apply(&sheet.cell(row_idx, key_col).to_text());
        if code.is_empty() {
            continue;
        }
        let qty: f64 = qty_cols
            .iter()
            .map(|&col| sheet.cell(row_idx, col).as_f64().unwrap_or(0.0))
            .sum();
        *groups[warehouse.index()].entry(code).or_insert(0.0) += qty;
    }

    let index = CodeIndex::build(table);
    let mut touched = 0usize;
    let mut unmatched = 0usize;

    for warehouse in Warehouse::ALL {
        for (code, qty) in &groups[warehouse.index()] {
            let mut rows = index.exact_matches(code, profile.scope);
            if profile.category_coupled {
                rows.retain(|&i| mask[i]);
            }

            if rows.is_empty() && profile.fuzzy_fallback {
                rows = index.fuzzy_matches(code, threshold);
                if profile.category_coupled {
                    rows.retain(|&i| mask[i]);
                }
            }

            if rows.is_empty() {
                unmatched += 1;
                continue;
            }
            for i in rows {
                table.rows[i].supplier_balance[warehouse] += *qty;
            }
            touched += 1;
        }
    }

    Ok((touched, unmatched))
}

/// Whether a BOSCH balance row feeds the depot or the supplier family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BalanceKind {
    Depot,
    Supplier,
}

const BOSCH_COLUMNS: [&str; 4] = [
    "Depo Kodu",
    "Ürün Grubu",
    "Bosch No",
    "Fatura ve Sevk Edilmemiş Toplam",
];

fn reconcile_bosch(
    table: &mut Table,
    mask: &[bool],
    sheet: &Sheet,
) -> Result<(usize, usize), String> {
    let missing = sheet.missing_columns(&BOSCH_COLUMNS);
    if !missing.is_empty() {
        return Err(format!("missing columns: {}", missing.join(", ")));
    }

    let depo_col = sheet.column_index("Depo Kodu").unwrap_or_default();
    let group_col = sheet.column_index("Ürün Grubu").unwrap_or_default();
    let code_col = sheet.column_index("Bosch No").unwrap_or_default();
    let qty_col = sheet
        .column_index("Fatura ve Sevk Edilmemiş Toplam")
        .unwrap_or_default();

    // (code, warehouse, kind) → summed quantity, deterministic order.
    let mut groups: BTreeMap<(String, usize, BalanceKind), f64> = BTreeMap::new();

    for row_idx in 0..sheet.len() {
        let Some(warehouse) = bosch_depot_code(&sheet.cell(row_idx, depo_col).to_text()) else {
            continue;
        };
        let group = sheet.cell(row_idx, group_col).to_text().to_uppercase();
        let kind = if group.contains("TEDARİKÇİ") || group.contains("TEDARIKÇI") {
            BalanceKind::Supplier
        } else if group.contains("DEPO") {
            BalanceKind::Depot
        } else {
            continue;
        };
        let code = sheet.cell(row_idx, code_col).to_text().trim().to_string();
        if code.is_empty() {
            continue;
        }
        let qty = sheet.cell(row_idx, qty_col).as_f64().unwrap_or(0.0);
        *groups
            .entry((code, warehouse.index(), kind))
            .or_insert(0.0) += qty;
    }

    let index = CodeIndex::build(table);
    let mut touched = 0usize;
    let mut unmatched = 0usize;

    for ((code, warehouse_idx, kind), qty) in &groups {
        let warehouse = Warehouse::ALL[*warehouse_idx];
        let key = compact_code(code);
        let mut rows: Vec<usize> = index.compact_matches(&key);
        rows.retain(|&i| mask[i]);

        if rows.is_empty() {
            unmatched += 1;
            continue;
        }
        for i in rows {
            let row = &mut table.rows[i];
            match kind {
                BalanceKind::Depot => row.depot_balance[warehouse] += *qty,
                BalanceKind::Supplier => row.supplier_balance[warehouse] += *qty,
            }
        }
        touched += 1;
    }

    Ok((touched, unmatched))
}

/// Precomputed comparison keys for every working-table row.
struct CodeIndex {
    raw_primary: Vec<String>,
    raw_secondary: Vec<String>,
    compact_primary: Vec<String>,
    compact_secondary: Vec<String>,
    clean_primary: Vec<String>,
    clean_secondary: Vec<String>,
}

impl CodeIndex {
    fn build(table: &Table) -> Self {
        let raw_primary: Vec<String> = table.rows.iter().map(|r| r.urun_kodu.clone()).collect();
        let raw_secondary: Vec<String> = table
            .rows
            .iter()
            .map(|r| r.duzenlenmis_kod.clone())
            .collect();
        Self {
            compact_primary: raw_primary.iter().map(|c| compact_code(c)).collect(),
            compact_secondary: raw_secondary.iter().map(|c| compact_code(c)).collect(),
            clean_primary: raw_primary.iter().map(|c| clean_product_code(c)).collect(),
            clean_secondary: raw_secondary.iter().map(|c| clean_product_code(c)).collect(),
            raw_primary,
            raw_secondary,
        }
    }

    /// Exact equality at the brand's normalization level. The fuzzy-capable
    /// brands compare fully canonical forms; the rest compare the lighter
    /// compact form the same way their exports are keyed.
    fn exact_matches(&self, code: &str, scope: MatchScope) -> Vec<usize> {
        let clean = clean_product_code(code);
        let compact = compact_code(code);
        (0..self.raw_primary.len())
            .filter(|&i| {
                let secondary_hit = self.clean_secondary[i] == clean
                    || self.compact_secondary[i] == compact;
                match scope {
                    MatchScope::SecondaryOnly => secondary_hit,
                    MatchScope::PrimaryOrSecondary => {
                        secondary_hit
                            || self.clean_primary[i] == clean
                            || self.compact_primary[i] == compact
                    }
                }
            })
            .collect()
    }

    fn compact_matches(&self, compact: &str) -> Vec<usize> {
        (0..self.raw_primary.len())
            .filter(|&i| {
                self.compact_primary[i] == compact || self.compact_secondary[i] == compact
            })
            .collect()
    }

    /// Fuzzy fallback over the union of both raw code columns. On a hit the
    /// match set is re-resolved from the winning candidate's canonical form.
    fn fuzzy_matches(&self, code: &str, threshold: f64) -> Vec<usize> {
        let candidates = self
            .raw_primary
            .iter()
            .chain(self.raw_secondary.iter())
            .map(String::as_str);
        let (best, ratio) = find_best_match(code, candidates, threshold);
        let Some(best) = best else {
            return Vec::new();
        };
        if ratio < threshold {
            return Vec::new();
        }
        let target = clean_product_code(best);
        (0..self.raw_primary.len())
            .filter(|&i| self.clean_primary[i] == target || self.clean_secondary[i] == target)
            .collect()
    }
}
