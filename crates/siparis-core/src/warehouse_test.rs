use super::*;

#[test]
fn inbound_td_codes_resolve_before_generic_tokens() {
    let table = WarehouseSource::Inbound.token_table();
    // "TD-E01" contains no generic token that should win over the TD rule.
    assert_eq!(table.map("TD-E01"), Some(Warehouse::Ikitelli));
    assert_eq!(table.map("TD-02 MERKEZ"), Some(Warehouse::Maslak));
    assert_eq!(table.map("TD-D05"), Some(Warehouse::Imes));
    assert_eq!(table.map("TD-A09"), Some(Warehouse::Ankara));
}

#[test]
fn inbound_depot_names_and_short_codes() {
    let table = WarehouseSource::Inbound.token_table();
    assert_eq!(table.map("maslak"), Some(Warehouse::Maslak));
    assert_eq!(table.map("İKİTELLİ DEPO"), Some(Warehouse::Ikitelli));
    assert_eq!(table.map("AAS"), Some(Warehouse::Ankara));
    assert_eq!(table.map("eas"), Some(Warehouse::Ikitelli));
}

#[test]
fn unmatched_identifier_maps_to_none_never_a_default() {
    for source in [
        WarehouseSource::Inbound,
        WarehouseSource::PurchaseOrder,
        WarehouseSource::ZfReference,
        WarehouseSource::BranchName,
        WarehouseSource::CustomerPo,
    ] {
        assert_eq!(source.map("ZZZ-UNKNOWN-999"), None);
        assert_eq!(source.map(""), None);
        assert_eq!(source.map("   "), None);
    }
}

#[test]
fn every_token_maps_to_exactly_one_warehouse() {
    for source in [
        WarehouseSource::Inbound,
        WarehouseSource::PurchaseOrder,
        WarehouseSource::ZfReference,
        WarehouseSource::BranchName,
        WarehouseSource::CustomerPo,
    ] {
        let table = source.token_table();
        for (tokens, warehouse) in table.rules() {
            for token in tokens {
                assert_eq!(
                    table.map(token),
                    Some(warehouse),
                    "token {token:?} in {source:?} must resolve to {warehouse:?}"
                );
            }
        }
    }
}

#[test]
fn purchase_order_tokens() {
    let table = WarehouseSource::PurchaseOrder.token_table();
    assert_eq!(table.map("PO-285-0042"), Some(Warehouse::Imes));
    assert_eq!(table.map("ANK 2024/17"), Some(Warehouse::Ankara));
    assert_eq!(table.map("322/55"), Some(Warehouse::Bolu));
    assert_eq!(table.map("ETS-11"), Some(Warehouse::Ikitelli));
}

#[test]
fn zf_reference_routes_istanbul_to_imes() {
    let table = WarehouseSource::ZfReference.token_table();
    assert_eq!(table.map("İST DEPO"), Some(Warehouse::Imes));
    assert_eq!(table.map("IST-01"), Some(Warehouse::Imes));
    // ETS is not a ZF token.
    assert_eq!(table.map("ETS-11"), None);
}

#[test]
fn branch_names_resolve_by_full_label() {
    let table = WarehouseSource::BranchName.token_table();
    assert_eq!(table.map("Teknik Dizel-Bolu"), Some(Warehouse::Bolu));
    assert_eq!(table.map("Teknik Dizel-Ümraniye"), Some(Warehouse::Imes));
    assert_eq!(table.map("Teknik Dizel-Maslak"), Some(Warehouse::Maslak));
    assert_eq!(table.map("Başka Şube"), None);
}

#[test]
fn bosch_depot_codes_are_exact() {
    assert_eq!(bosch_depot_code("DAS"), Some(Warehouse::Imes));
    assert_eq!(bosch_depot_code(" mas "), Some(Warehouse::Maslak));
    assert_eq!(bosch_depot_code("DAS-X"), None);
    assert_eq!(bosch_depot_code(""), None);
}

#[test]
fn canonical_order_matches_indices() {
    for (i, w) in Warehouse::ALL.iter().enumerate() {
        assert_eq!(w.index(), i);
    }
    assert_eq!(Warehouse::ALL[0].name(), "İmes");
    assert_eq!(Warehouse::ALL[4].metric_label(), "BOLU");
}
