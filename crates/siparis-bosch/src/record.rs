use serde::{Deserialize, Serialize};

/// Outcome of comparing a balance row's invoiced quantity against the
/// open order lines sharing its composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "FULL_MATCH")]
    Full,
    #[serde(rename = "PARTIAL_MATCH")]
    Partial,
    #[serde(rename = "NO_MATCH")]
    None,
}

/// One row of the final BOSCH output, serialized with the Turkish field
/// names downstream consumers expect. The order/remaining quantities and
/// the status tag are only populated by the reconciling match policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoschOrderRecord {
    #[serde(rename = "Sipariş Notu")]
    pub order_note: String,
    /// Lowercase 3-letter depot code derived from the order note.
    #[serde(rename = "Depo Kodu")]
    pub depot_code: String,
    #[serde(rename = "Ürün Grubu")]
    pub product_group: String,
    #[serde(rename = "Bosch No")]
    pub bosch_no: String,
    /// Display key: order note + Bosch code, whitespace stripped, with a
    /// settled-quantity suffix on fully matched rows.
    #[serde(rename = "Sütun1")]
    pub display_key: String,
    /// Always empty; kept so the output schema matches the template the
    /// purchasing side fills in by hand.
    #[serde(rename = "Tahmini Teslim Tarihi")]
    pub estimated_delivery: String,
    #[serde(rename = "Fatura ve Sevk Edilmemiş Toplam")]
    pub invoiced_total: f64,
    /// Quantities keep the raw order-line column spellings so consumers
    /// keyed to that export read them unchanged.
    #[serde(rename = "SIPARIS_MIKTARI", skip_serializing_if = "Option::is_none")]
    pub order_qty: Option<f64>,
    #[serde(rename = "KALAN_MIKTAR", skip_serializing_if = "Option::is_none")]
    pub remaining_qty: Option<f64>,
    #[serde(rename = "Eşleşme Durumu", skip_serializing_if = "Option::is_none")]
    pub match_status: Option<MatchStatus>,
}
