//! The canonical output schema: the fixed column sequence the Exporter
//! writes, and the dynamic month labels embedded in it.
//!
//! Placeholder columns exist purely for schema parity with the downstream
//! order sheet; they carry no computed value here and always export as zero.

use crate::warehouse::Warehouse;

pub const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// The two upcoming-month labels for a given current month (1-12): the next
/// calendar month and the one after, wrapping over the year boundary.
#[must_use]
pub fn month_labels(current_month: u32) -> [String; 2] {
    let current = current_month as usize;
    [
        TURKISH_MONTHS[current % 12].to_string(),
        TURKISH_MONTHS[(current + 1) % 12].to_string(),
    ]
}

/// One of the four per-warehouse stock metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Devir,
    Alis,
    Satis,
    Stok,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Devir, Metric::Alis, Metric::Satis, Metric::Stok];

    /// Suffix used in source column names (`02-DEVIR`, `D01-STOK`, ...).
    #[must_use]
    pub fn source_suffix(self) -> &'static str {
        match self {
            Metric::Devir => "DEVIR",
            Metric::Alis => "ALIS",
            Metric::Satis => "SATIS",
            Metric::Stok => "STOK",
        }
    }

    /// Suffix used in output column names (`İMES ALIŞ`, ...).
    #[must_use]
    pub fn output_suffix(self) -> &'static str {
        match self {
            Metric::Devir => "DEVIR",
            Metric::Alis => "ALIŞ",
            Metric::Satis => "SATIS",
            Metric::Stok => "STOK",
        }
    }
}

/// What a canonical column holds, so the Exporter can pull the value out of
/// a [`crate::record::ProductRecord`] without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    PrimaryCode,
    SecondaryCode,
    Description,
    ManufacturerCode,
    OriginalCode,
    LegacyCode,
    Category(usize),
    Metric(Warehouse, Metric),
    DepotBalance(Warehouse),
    TotalDepotBalance,
    SupplierBalance(Warehouse),
    OrderQty(Warehouse),
    InvoiceTotal,
    CustomerCount,
    SalesPrice,
    Currency,
    PrimaryCodeRepeat,
    /// Month placeholders and the fixed legacy business columns.
    FixedZero,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Builds the full fixed canonical column sequence for the given month
/// labels. Every transformed table exports exactly these columns in exactly
/// this order, regardless of which optional source columns were present.
#[must_use]
pub fn canonical_columns(month_labels: &[String; 2]) -> Vec<ColumnSpec> {
    let mut cols = vec![
        ColumnSpec::new("URUNKODU", ColumnKind::PrimaryCode),
        ColumnSpec::new("Düzenlenmiş Ürün Kodu", ColumnKind::SecondaryCode),
        ColumnSpec::new("ACIKLAMA", ColumnKind::Description),
        ColumnSpec::new("URETİCİKODU", ColumnKind::ManufacturerCode),
        ColumnSpec::new("ORJİNAL", ColumnKind::OriginalCode),
        ColumnSpec::new("ESKİKOD", ColumnKind::LegacyCode),
    ];

    for i in 0..7 {
        cols.push(ColumnSpec::new(
            format!("CAT{}", i + 1),
            ColumnKind::Category(i),
        ));
    }

    for warehouse in Warehouse::ALL {
        for metric in Metric::ALL {
            cols.push(ColumnSpec::new(
                format!("{} {}", warehouse.metric_label(), metric.output_suffix()),
                ColumnKind::Metric(warehouse, metric),
            ));
        }
    }

    cols.push(ColumnSpec::new("not", ColumnKind::FixedZero));

    for warehouse in Warehouse::ALL {
        cols.push(ColumnSpec::new(
            format!("{} Depo Bakiye", warehouse.name()),
            ColumnKind::DepotBalance(warehouse),
        ));
    }

    cols.push(ColumnSpec::new("Kampanya Tipi", ColumnKind::FixedZero));
    cols.push(ColumnSpec::new("Toplam İsk", ColumnKind::FixedZero));
    cols.push(ColumnSpec::new(
        "Toplam Depo Bakiye",
        ColumnKind::TotalDepotBalance,
    ));

    for warehouse in Warehouse::ALL {
        cols.push(ColumnSpec::new(
            format!("{} Tedarikçi Bakiye", warehouse.name()),
            ColumnKind::SupplierBalance(warehouse),
        ));
    }

    cols.push(ColumnSpec::new("Paket Adetleri", ColumnKind::FixedZero));

    for warehouse in Warehouse::ALL {
        cols.push(ColumnSpec::new(
            format!("{} Sipariş", warehouse.name()),
            ColumnKind::OrderQty(warehouse),
        ));
    }

    // Month placeholders interleave the two labels: first_1, second_1, ...
    for i in 1..=5 {
        for label in month_labels {
            cols.push(ColumnSpec::new(format!("{label}_{i}"), ColumnKind::FixedZero));
        }
    }

    cols.push(ColumnSpec::new("TOPL.FAT.ADT", ColumnKind::InvoiceTotal));
    cols.push(ColumnSpec::new("MÜŞT.SAY.", ColumnKind::CustomerCount));
    cols.push(ColumnSpec::new("SATıŞ FIYATı", ColumnKind::SalesPrice));
    cols.push(ColumnSpec::new("DÖVIZ CINSI (S)", ColumnKind::Currency));
    cols.push(ColumnSpec::new("URUNKODU_3", ColumnKind::PrimaryCodeRepeat));

    for name in [
        "İSK",
        "PRİM",
        "BÜTÇE",
        "liste",
        "TD SF",
        "Net Fiyat Kampanyası",
    ] {
        cols.push(ColumnSpec::new(name, ColumnKind::FixedZero));
    }

    cols
}

/// Whether an output column participates in the Exporter's numeric cleanup
/// (sentinel "-"/missing values replaced by zero, cells written as numbers).
#[must_use]
pub fn is_balance_column(kind: &ColumnKind) -> bool {
    matches!(
        kind,
        ColumnKind::Metric(_, _)
            | ColumnKind::DepotBalance(_)
            | ColumnKind::TotalDepotBalance
            | ColumnKind::SupplierBalance(_)
            | ColumnKind::OrderQty(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels_advance_and_wrap() {
        assert_eq!(month_labels(8), ["Eylül".to_string(), "Ekim".to_string()]);
        assert_eq!(month_labels(11), ["Aralık".to_string(), "Ocak".to_string()]);
        assert_eq!(month_labels(12), ["Ocak".to_string(), "Şubat".to_string()]);
    }

    #[test]
    fn canonical_columns_are_complete_and_ordered() {
        let labels = ["Eylül".to_string(), "Ekim".to_string()];
        let cols = canonical_columns(&labels);

        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[0], "URUNKODU");
        assert_eq!(names[1], "Düzenlenmiş Ürün Kodu");
        assert_eq!(names[12], "CAT7");
        assert_eq!(names[13], "İMES DEVIR");
        assert_eq!(names[32], "BOLU STOK");
        assert_eq!(names[33], "not");

        // No duplicate column names anywhere in the sequence.
        let mut seen = std::collections::HashSet::new();
        for name in &names {
            assert!(seen.insert(*name), "duplicate column {name}");
        }

        // Month columns interleave the two labels.
        let eylul1 = names.iter().position(|n| *n == "Eylül_1").unwrap();
        assert_eq!(names[eylul1 + 1], "Ekim_1");
        assert_eq!(names[eylul1 + 2], "Eylül_2");

        assert_eq!(*names.last().unwrap(), "Net Fiyat Kampanyası");
    }

    #[test]
    fn balance_columns_cover_metrics_and_accumulators() {
        let labels = month_labels(1);
        let cols = canonical_columns(&labels);
        let numeric = cols.iter().filter(|c| is_balance_column(&c.kind)).count();
        // 20 metrics + 5 depot + 1 total + 5 supplier + 5 order columns.
        assert_eq!(numeric, 36);
    }
}
