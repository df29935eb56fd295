//! The working-table data model produced by the Main Transformer and
//! mutated in place by the Inbound Merger and Brand Reconciler.

use crate::warehouse::Warehouse;

/// Fixed-size per-warehouse value map in canonical warehouse order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseMap<T>([T; 5]);

impl<T> WarehouseMap<T> {
    pub fn get(&self, warehouse: Warehouse) -> &T {
        &self.0[warehouse.index()]
    }

    pub fn get_mut(&mut self, warehouse: Warehouse) -> &mut T {
        &mut self.0[warehouse.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Warehouse, &T)> {
        Warehouse::ALL.iter().copied().zip(self.0.iter())
    }
}

impl<T> std::ops::Index<Warehouse> for WarehouseMap<T> {
    type Output = T;

    fn index(&self, warehouse: Warehouse) -> &T {
        self.get(warehouse)
    }
}

impl<T> std::ops::IndexMut<Warehouse> for WarehouseMap<T> {
    fn index_mut(&mut self, warehouse: Warehouse) -> &mut T {
        self.get_mut(warehouse)
    }
}

impl WarehouseMap<f64> {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// The four stock metrics of one warehouse, kept as the source's text so
/// upstream formatting quirks survive into the export untouched. Missing
/// source columns synthesize as `"0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMetrics {
    pub devir: String,
    pub alis: String,
    pub satis: String,
    pub stok: String,
}

impl Default for StockMetrics {
    fn default() -> Self {
        Self {
            devir: "0".to_string(),
            alis: "0".to_string(),
            satis: "0".to_string(),
            stok: "0".to_string(),
        }
    }
}

/// One row of the working table.
///
/// The numeric accumulators start at zero and are only ever incremented by
/// the merge stages; nothing overwrites them. `total_depot_balance` is
/// derived and must be refreshed via [`Table::recompute_totals`] after any
/// merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub urun_kodu: String,
    pub duzenlenmis_kod: String,
    pub aciklama: String,
    pub uretici_kodu: String,
    pub orjinal: String,
    pub eski_kod: String,
    pub categories: [String; 7],
    pub metrics: WarehouseMap<StockMetrics>,
    pub depot_balance: WarehouseMap<f64>,
    pub supplier_balance: WarehouseMap<f64>,
    pub order_qty: WarehouseMap<f64>,
    pub total_depot_balance: f64,
    pub topl_fat_adt: String,
    pub musteri_sayisi: String,
    pub satis_fiyati: String,
    pub doviz_cinsi: String,
}

impl ProductRecord {
    #[must_use]
    pub fn new(urun_kodu: String) -> Self {
        Self {
            urun_kodu,
            ..Self::default()
        }
    }

    /// The brand category label (CAT4) used for brand classification.
    #[must_use]
    pub fn brand_category(&self) -> &str {
        &self.categories[3]
    }
}

/// The whole working table plus the two dynamic month labels computed at
/// transform time (they name the placeholder columns appended on export).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<ProductRecord>,
    pub month_labels: [String; 2],
}

impl Table {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Refreshes every row's derived total from the five depot-balance
    /// accumulators.
    pub fn recompute_totals(&mut self) {
        for row in &mut self.rows {
            row.total_depot_balance = row.depot_balance.sum();
        }
    }
}
