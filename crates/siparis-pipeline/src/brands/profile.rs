//! Declarative per-brand extraction profiles. Each supplier export names
//! its columns differently and carries its own code-cleaning and
//! warehouse-derivation quirks; everything brand-specific lives here so the
//! reconciliation routine itself stays generic.

use siparis_core::normalize::{schaeffler_code, valeo_code, zf_material_code};
use siparis_core::WarehouseSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    SchaefflerLuk,
    ZfIthal,
    Delphi,
    ZfYerli,
    Valeo,
    Filtron,
    Mann,
    Bosch,
}

impl Brand {
    /// Processing order. Reconciliation walks this array, so balance
    /// accumulation across brands is deterministic.
    pub const ALL: [Brand; 8] = [
        Brand::SchaefflerLuk,
        Brand::ZfIthal,
        Brand::Delphi,
        Brand::ZfYerli,
        Brand::Valeo,
        Brand::Filtron,
        Brand::Mann,
        Brand::Bosch,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Brand::SchaefflerLuk => "SCHAEFFLER LUK",
            Brand::ZfIthal => "ZF İTHAL",
            Brand::Delphi => "DELPHI",
            Brand::ZfYerli => "ZF YERLİ",
            Brand::Valeo => "VALEO",
            Brand::Filtron => "FILTRON",
            Brand::Mann => "MANN",
            Brand::Bosch => "BOSCH",
        }
    }

    /// CLI-facing identifier.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Brand::SchaefflerLuk => "schaeffler",
            Brand::ZfIthal => "zf-ithal",
            Brand::Delphi => "delphi",
            Brand::ZfYerli => "zf-yerli",
            Brand::Valeo => "valeo",
            Brand::Filtron => "filtron",
            Brand::Mann => "mann",
            Brand::Bosch => "bosch",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Brand> {
        Brand::ALL.into_iter().find(|b| b.slug() == slug)
    }

    /// Category labels searched (case-insensitive substring) to find this
    /// brand's rows in the working table. Some brands cover several related
    /// marque strings.
    #[must_use]
    pub fn search_terms(self) -> &'static [&'static str] {
        match self {
            Brand::SchaefflerLuk => &["SCHAEFFLER LUK"],
            Brand::ZfIthal => &["ZF İTHAL", "LEMFÖRDER", "LEMFORDER", "TRW", "SACHS"],
            Brand::Delphi => &["DELPHI"],
            Brand::ZfYerli => &["ZF YERLİ", "LEMFÖRDER", "LEMFORDER", "TRW", "SACHS"],
            Brand::Valeo => &["VALEO"],
            Brand::Filtron => &["FILTRON"],
            Brand::Mann => &["MANN", "MANN FILTER", "MANN-FILTER", "MANNFILTER"],
            Brand::Bosch => &["BOSCH", "BOSCH REXROTH", "BOSCH-REXROTH"],
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How the product-code column is located in the brand export.
#[derive(Debug, Clone, Copy)]
pub enum KeyColumn {
    Fixed(&'static str),
    /// Ordered candidate names, first present column wins. Documented
    /// priority list, not an ad hoc probe.
    FirstOf(&'static [&'static str]),
}

/// Which column(s) carry the quantity to accumulate.
#[derive(Debug, Clone, Copy)]
pub enum QuantityRule {
    Single(&'static str),
    /// Two columns summed per row (delivered + still open).
    Sum(&'static str, &'static str),
}

/// Brand-specific code cleaning applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRule {
    Trim,
    Schaeffler,
    Valeo,
    ZfMaterial,
}

impl CodeRule {
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            CodeRule::Trim => raw.trim().to_string(),
            CodeRule::Schaeffler => schaeffler_code(raw),
            CodeRule::Valeo => valeo_code(raw),
            CodeRule::ZfMaterial => zf_material_code(raw),
        }
    }
}

/// Which working-table code columns a brand's codes are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    PrimaryOrSecondary,
    SecondaryOnly,
}

/// Full extraction/matching contract for one standard brand export.
/// BOSCH is absent here: its export is structurally different (explicit
/// depot-code column, depot/supplier row classification) and is handled by
/// a dedicated routine.
#[derive(Debug, Clone, Copy)]
pub struct BrandProfile {
    pub key: KeyColumn,
    pub quantity: QuantityRule,
    pub warehouse_column: &'static str,
    pub warehouse_source: WarehouseSource,
    pub code_rule: CodeRule,
    pub scope: MatchScope,
    /// When set, code matches only count inside the brand's category mask
    /// (the ZF marque sub-labels share codes across suppliers).
    pub category_coupled: bool,
    /// When set, a failed exact match falls back to fuzzy matching at the
    /// brand threshold.
    pub fuzzy_fallback: bool,
}

impl Brand {
    #[must_use]
    pub fn profile(self) -> Option<BrandProfile> {
        let profile = match self {
            Brand::SchaefflerLuk => BrandProfile {
                key: KeyColumn::Fixed("Catalogue number"),
                quantity: QuantityRule::Single("Ordered quantity"),
                warehouse_column: "PO Number(L)",
                warehouse_source: WarehouseSource::PurchaseOrder,
                code_rule: CodeRule::Schaeffler,
                scope: MatchScope::PrimaryOrSecondary,
                category_coupled: false,
                fuzzy_fallback: true,
            },
            Brand::ZfIthal => BrandProfile {
                key: KeyColumn::Fixed("Material"),
                quantity: QuantityRule::Sum("Qty.in Del.", "Open quantity"),
                warehouse_column: "Purchase order no.",
                warehouse_source: WarehouseSource::ZfReference,
                code_rule: CodeRule::ZfMaterial,
                scope: MatchScope::PrimaryOrSecondary,
                category_coupled: true,
                fuzzy_fallback: false,
            },
            Brand::Delphi => BrandProfile {
                key: KeyColumn::Fixed("Material"),
                quantity: QuantityRule::Single("Cum.qty"),
                warehouse_column: "Şube",
                warehouse_source: WarehouseSource::BranchName,
                code_rule: CodeRule::Trim,
                scope: MatchScope::PrimaryOrSecondary,
                category_coupled: false,
                fuzzy_fallback: false,
            },
            Brand::ZfYerli => BrandProfile {
                key: KeyColumn::Fixed("Basic No."),
                quantity: QuantityRule::Single("Outstanding Quantity"),
                warehouse_column: "Ship-to Name",
                warehouse_source: WarehouseSource::ZfReference,
                code_rule: CodeRule::Trim,
                scope: MatchScope::SecondaryOnly,
                category_coupled: true,
                fuzzy_fallback: false,
            },
            Brand::Valeo => BrandProfile {
                key: KeyColumn::Fixed("Valeo Ref."),
                quantity: QuantityRule::Single("Sipariş Adeti"),
                warehouse_column: "Müşteri P/O No.",
                warehouse_source: WarehouseSource::PurchaseOrder,
                code_rule: CodeRule::Valeo,
                scope: MatchScope::PrimaryOrSecondary,
                category_coupled: false,
                fuzzy_fallback: true,
            },
            Brand::Filtron | Brand::Mann => BrandProfile {
                key: KeyColumn::FirstOf(&[
                    "Material Adı",
                    "Material",
                    "Material Name",
                    "Ürün Kodu",
                    "Product Code",
                    "Material Kodu",
                    "Malzeme Kodu",
                    "Malzeme Adı",
                ]),
                quantity: QuantityRule::Single("Açık Sipariş Adedi"),
                warehouse_column: "Müşteri SatınAlma No",
                warehouse_source: WarehouseSource::CustomerPo,
                code_rule: CodeRule::Trim,
                scope: MatchScope::PrimaryOrSecondary,
                category_coupled: false,
                fuzzy_fallback: false,
            },
            Brand::Bosch => return None,
        };
        Some(profile)
    }
}
