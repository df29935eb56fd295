//! The canonical warehouse enumeration and the per-source token tables that
//! map heterogeneous depot identifiers (TD codes, PO prefixes, branch names,
//! 3-letter short codes) onto it.
//!
//! Mapping is precision-over-recall: an identifier that carries no known
//! token stays unmapped and the caller excludes the row from aggregation.
//! Misrouting a quantity into the wrong warehouse balance is worse than
//! dropping it.

/// One of the five canonical physical warehouses, in canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Warehouse {
    Imes,
    Ikitelli,
    Ankara,
    Maslak,
    Bolu,
}

impl Warehouse {
    pub const ALL: [Warehouse; 5] = [
        Warehouse::Imes,
        Warehouse::Ikitelli,
        Warehouse::Ankara,
        Warehouse::Maslak,
        Warehouse::Bolu,
    ];

    /// Display name used in balance/order column headers ("İmes Depo Bakiye").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Warehouse::Imes => "İmes",
            Warehouse::Ikitelli => "İkitelli",
            Warehouse::Ankara => "Ankara",
            Warehouse::Maslak => "Maslak",
            Warehouse::Bolu => "Bolu",
        }
    }

    /// Uppercase label used in stock-metric column headers ("İMES DEVIR").
    #[must_use]
    pub fn metric_label(self) -> &'static str {
        match self {
            Warehouse::Imes => "İMES",
            Warehouse::Ikitelli => "İKİTELLİ",
            Warehouse::Ankara => "ANKARA",
            Warehouse::Maslak => "MASLAK",
            Warehouse::Bolu => "BOLU",
        }
    }

    /// Position in [`Warehouse::ALL`], used by [`crate::record::WarehouseMap`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Warehouse::Imes => 0,
            Warehouse::Ikitelli => 1,
            Warehouse::Ankara => 2,
            Warehouse::Maslak => 3,
            Warehouse::Bolu => 4,
        }
    }
}

impl std::fmt::Display for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered substring-containment table. Rules are evaluated top to
/// bottom and the first rule with a contained token wins, so more specific
/// tokens (e.g. full `TD-` codes) must be listed before generic ones.
#[derive(Debug, Clone)]
pub struct TokenTable {
    rules: Vec<(&'static [&'static str], Warehouse)>,
}

impl TokenTable {
    #[must_use]
    pub fn new(rules: Vec<(&'static [&'static str], Warehouse)>) -> Self {
        Self { rules }
    }

    /// Maps a free-text identifier to a canonical warehouse, or `None` when
    /// no known token is contained in it.
    #[must_use]
    pub fn map(&self, raw: &str) -> Option<Warehouse> {
        let hay = raw.trim().to_uppercase();
        if hay.is_empty() {
            return None;
        }
        for (tokens, warehouse) in &self.rules {
            if tokens.iter().any(|t| hay.contains(t)) {
                return Some(*warehouse);
            }
        }
        None
    }

    pub fn rules(&self) -> impl Iterator<Item = (&'static [&'static str], Warehouse)> + '_ {
        self.rules.iter().copied()
    }
}

/// Which source system an identifier comes from. Each source carries its own
/// token vocabulary; the same numeric token can mean different things in
/// different exports, so tables are never shared across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseSource {
    /// Goods-received file "Depo" column: TD codes, depot names, short codes.
    Inbound,
    /// Schaeffler "PO Number(L)" / Valeo "Müşteri P/O No." references.
    PurchaseOrder,
    /// ZF "Purchase order no." / "Ship-to Name" references (İST routes to İmes).
    ZfReference,
    /// Delphi "Şube" branch names ("Teknik Dizel-<Branch>").
    BranchName,
    /// Mann/Filtron "Müşteri SatınAlma No" short-code references.
    CustomerPo,
}

impl WarehouseSource {
    /// Builds the ordered token table for this source.
    #[must_use]
    pub fn token_table(self) -> TokenTable {
        use Warehouse::{Ankara, Bolu, Ikitelli, Imes, Maslak};
        match self {
            // TD codes first: "TD-E01" contains the bare "E01"/"ETS"-style
            // tokens of the generic rules and must resolve before them.
            WarehouseSource::Inbound => TokenTable::new(vec![
                (&["TD-02"], Maslak),
                (&["TD-04"], Bolu),
                (&["TD-A01", "TD-A09"], Ankara),
                (&["TD-D01", "TD-D05", "TD-D09"], Imes),
                (&["TD-E01"], Ikitelli),
                (&["ATS"], Ankara),
                (&["DTS"], Imes),
                (&["ETS"], Ikitelli),
                (&["MASLAK"], Maslak),
                (&["BOLU"], Bolu),
                (&["ANKARA"], Ankara),
                (&["İMES"], Imes),
                (&["İKİTELLİ", "IKITELLI"], Ikitelli),
                (&["AAS"], Ankara),
                (&["DAS"], Imes),
                (&["MAS"], Maslak),
                (&["BAS"], Bolu),
                (&["EAS"], Ikitelli),
            ]),
            WarehouseSource::PurchaseOrder => TokenTable::new(vec![
                (&["IME", "285", "DTS"], Imes),
                (&["ANK", "321", "ATS"], Ankara),
                (&["322"], Bolu),
                (&["323"], Maslak),
                (&["IKI", "324", "ETS"], Ikitelli),
            ]),
            WarehouseSource::ZfReference => TokenTable::new(vec![
                (&["IME", "285", "İST", "IST"], Imes),
                (&["ANK", "321"], Ankara),
                (&["322"], Bolu),
                (&["323"], Maslak),
                (&["IKI", "324"], Ikitelli),
            ]),
            WarehouseSource::BranchName => TokenTable::new(vec![
                (&["TEKNİK DİZEL-BOLU", "TEKNIK DIZEL-BOLU"], Bolu),
                (&["TEKNİK DİZEL-ÜMRANİYE", "TEKNIK DIZEL-UMRANIYE"], Imes),
                (&["TEKNİK DİZEL-MASLAK", "TEKNIK DIZEL-MASLAK"], Maslak),
                (&["TEKNİK DİZEL-ANKARA", "TEKNIK DIZEL-ANKARA"], Ankara),
                (&["TEKNİK DİZEL-İKİTELLİ", "TEKNIK DIZEL-IKITELLI"], Ikitelli),
            ]),
            WarehouseSource::CustomerPo => TokenTable::new(vec![
                (&["AAS", "ATS"], Ankara),
                (&["DAS", "DTS"], Imes),
                (&["BAS"], Bolu),
                (&["MAS"], Maslak),
                (&["EAS", "ETS"], Ikitelli),
            ]),
        }
    }

    /// Convenience for one-off lookups.
    #[must_use]
    pub fn map(self, raw: &str) -> Option<Warehouse> {
        self.token_table().map(raw)
    }
}

/// Exact-match map for the 3-letter depot codes carried by Bosch balance
/// exports. Unlike the token tables this requires the whole trimmed value to
/// be a known code.
#[must_use]
pub fn bosch_depot_code(raw: &str) -> Option<Warehouse> {
    match raw.trim().to_uppercase().as_str() {
        "AAS" | "ATS" => Some(Warehouse::Ankara),
        "BAS" => Some(Warehouse::Bolu),
        "DAS" | "DTS" => Some(Warehouse::Imes),
        "EAS" | "ETS" => Some(Warehouse::Ikitelli),
        "MAS" => Some(Warehouse::Maslak),
        _ => None,
    }
}

#[cfg(test)]
#[path = "warehouse_test.rs"]
mod warehouse_test;
