use super::*;
use crate::record::MatchStatus;
use siparis_xlsx::Cell;

fn balance_sheet(rows: Vec<(&str, &str, &str, f64)>) -> Sheet {
    Sheet::new(
        "bakiye",
        vec![
            "Sipariş Notu".to_string(),
            "Ürün Grubu".to_string(),
            "Bosch No".to_string(),
            "Fatura ve Sevk Edilmemiş Toplam".to_string(),
        ],
        rows.into_iter()
            .map(|(note, group, code, total)| {
                vec![
                    Cell::Text(note.to_string()),
                    Cell::Text(group.to_string()),
                    Cell::Text(code.to_string()),
                    Cell::Number(total),
                ]
            })
            .collect(),
    )
}

fn inbound_sheet(rows: Vec<(&str, &str, &str, f64)>) -> Sheet {
    Sheet::new(
        "inbound",
        vec![
            "Cari".to_string(),
            "Sipariş No".to_string(),
            "Ürün Kodu".to_string(),
            "İrsaliye Miktarı".to_string(),
        ],
        rows.into_iter()
            .map(|(party, order, code, qty)| {
                vec![
                    Cell::Text(party.to_string()),
                    Cell::Text(order.to_string()),
                    Cell::Text(code.to_string()),
                    Cell::Number(qty),
                ]
            })
            .collect(),
    )
}

fn lines_sheet(rows: Vec<(&str, &str, f64, f64)>) -> Sheet {
    Sheet::new(
        "kalemler",
        vec![
            "SIPARIS_NO".to_string(),
            "STOK_KODU".to_string(),
            "SIPARIS_MIKTARI".to_string(),
            "KALAN_MIKTAR".to_string(),
        ],
        rows.into_iter()
            .map(|(order, stock, ordered, remaining)| {
                vec![
                    Cell::Text(order.to_string()),
                    Cell::Text(stock.to_string()),
                    Cell::Number(ordered),
                    Cell::Number(remaining),
                ]
            })
            .collect(),
    )
}

#[test]
fn missing_balance_column_aborts() {
    let balance = Sheet::new("bakiye", vec!["Sipariş Notu".to_string()], vec![]);
    let err = reconcile(
        &balance,
        &inbound_sheet(vec![]),
        &lines_sheet(vec![]),
        MatchPolicy::Reconcile,
    )
    .unwrap_err();
    match err {
        BoschError::MissingColumns { file, columns } => {
            assert_eq!(file, "bakiye");
            assert!(columns.contains(&"Bosch No".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn depot_whitelist_drops_and_counts() {
    let balance = balance_sheet(vec![
        ("AAS123", "X", "111", 5.0),
        ("ZZZ999", "X", "222", 5.0),
        ("das-x", "X", "333", 5.0),
    ]);
    let out = reconcile(
        &balance,
        &inbound_sheet(vec![]),
        &lines_sheet(vec![]),
        MatchPolicy::Reconcile,
    )
    .unwrap();

    assert_eq!(out.dropped_depot_rows, 1);
    let depots: Vec<&str> = out.records.iter().map(|r| r.depot_code.as_str()).collect();
    assert_eq!(depots, vec!["aas", "das"]);
}

#[test]
fn inbound_rows_become_depo_records() {
    let balance = balance_sheet(vec![("AAS100", "TEDARİKÇİLER", "0986452041", 3.0)]);
    let inbound = inbound_sheet(vec![
        ("BOSCH SANAYİ VE TİCARET A.Ş.", "DAS200", "0986AB2041", 7.0),
        ("MANN FİLTRE SAN.", "DAS300", "W81280", 4.0),
    ]);
    let out =
        reconcile(&balance, &inbound, &lines_sheet(vec![]), MatchPolicy::FirstMatch).unwrap();

    assert_eq!(out.inbound_rows_added, 1);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].product_group, "TEDARİKÇİ");
    assert_eq!(out.records[0].bosch_no, "3E-0986452041");
    let depo = &out.records[1];
    assert_eq!(depo.product_group, "DEPO");
    assert_eq!(depo.order_note, "DAS200");
    assert_eq!(depo.bosch_no, "3E-0986AB2041");
    assert!((depo.invoiced_total - 7.0).abs() < f64::EPSILON);
}

#[test]
fn loose_party_match_is_fallback_only() {
    let balance = balance_sheet(vec![]);
    let inbound = inbound_sheet(vec![("ROBERT BOSCH GMBH", "MAS500", "123", 2.0)]);
    let out =
        reconcile(&balance, &inbound, &lines_sheet(vec![]), MatchPolicy::FirstMatch).unwrap();

    assert_eq!(out.inbound_rows_added, 1);
    assert_eq!(out.records[0].order_note, "MAS500");
}

#[test]
fn full_match_expands_per_order_line() {
    let balance = balance_sheet(vec![("AAS100", "X", "3E-900", 10.0)]);
    let lines = lines_sheet(vec![
        ("AAS100", "3E-900", 4.0, 4.0),
        ("AAS100", "3E-900", 7.0, 6.0),
    ]);
    let out =
        reconcile(&balance, &inbound_sheet(vec![]), &lines, MatchPolicy::Reconcile).unwrap();

    assert_eq!(out.records.len(), 2);
    for record in &out.records {
        assert_eq!(record.match_status, Some(MatchStatus::Full));
    }
    // Settled line carries its quantity in the display key, the open one
    // keeps the bare composite.
    assert_eq!(out.records[0].display_key, "AAS1003E-900-4");
    assert_eq!(out.records[1].display_key, "AAS1003E-900");
    assert_eq!(out.records[1].order_qty, Some(7.0));
    assert_eq!(out.records[1].remaining_qty, Some(6.0));
}

#[test]
fn partial_match_zeroes_order_fields() {
    let balance = balance_sheet(vec![("BAS100", "X", "3E-900", 10.0)]);
    let lines = lines_sheet(vec![("BAS100", "3E-900", 4.0, 3.0)]);
    let out =
        reconcile(&balance, &inbound_sheet(vec![]), &lines, MatchPolicy::Reconcile).unwrap();

    assert_eq!(out.records.len(), 1);
    let record = &out.records[0];
    assert_eq!(record.match_status, Some(MatchStatus::Partial));
    assert_eq!(record.order_qty, Some(0.0));
    assert_eq!(record.remaining_qty, Some(0.0));
    assert_eq!(record.display_key, "BAS1003E-900");
}

#[test]
fn keyless_row_is_no_match() {
    let balance = balance_sheet(vec![("EAS100", "X", "3E-900", 10.0)]);
    let out = reconcile(
        &balance,
        &inbound_sheet(vec![]),
        &lines_sheet(vec![("EAS100", "OTHER", 1.0, 1.0)]),
        MatchPolicy::Reconcile,
    )
    .unwrap();

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].match_status, Some(MatchStatus::None));
}

#[test]
fn first_match_policy_takes_first_line_untagged() {
    let balance = balance_sheet(vec![("MAS100", "X", "3E-900", 10.0)]);
    let lines = lines_sheet(vec![
        ("MAS100", "3E-900", 4.0, 4.0),
        ("MAS100", "3E-900", 7.0, 6.0),
    ]);
    let out =
        reconcile(&balance, &inbound_sheet(vec![]), &lines, MatchPolicy::FirstMatch).unwrap();

    assert_eq!(out.records.len(), 1);
    let record = &out.records[0];
    assert_eq!(record.order_qty, Some(4.0));
    assert_eq!(record.remaining_qty, Some(4.0));
    assert_eq!(record.match_status, None);
    assert_eq!(record.display_key, "MAS1003E-900");
}

#[test]
fn composite_keys_ignore_spacing() {
    let balance = balance_sheet(vec![("AAS 100", "X", "3E- 900", 5.0)]);
    let lines = lines_sheet(vec![("AAS100", "3E-900", 5.0, 5.0)]);
    let out =
        reconcile(&balance, &inbound_sheet(vec![]), &lines, MatchPolicy::Reconcile).unwrap();

    assert_eq!(out.records[0].match_status, Some(MatchStatus::Full));
}

#[test]
fn json_round_trip_preserves_types() {
    let balance = balance_sheet(vec![("AAS100", "X", "900", 12.5)]);
    let out = reconcile(
        &balance,
        &inbound_sheet(vec![]),
        &lines_sheet(vec![]),
        MatchPolicy::Reconcile,
    )
    .unwrap();

    let json = to_json(&out.records).unwrap();
    assert!(json.contains("Sipariş Notu"), "non-ASCII keys stay literal: {json}");
    assert!(json.contains("NO_MATCH"));

    let parsed: Vec<BoschOrderRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, out.records);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value[0]["Fatura ve Sevk Edilmemiş Toplam"].is_number());
    // The quantity fields keep the order-line export's column spellings.
    assert!(value[0]["SIPARIS_MIKTARI"].is_number());
    assert!(value[0]["KALAN_MIKTAR"].is_number());
}

#[test]
fn workbook_written_to_disk() {
    let balance = balance_sheet(vec![("AAS100", "X", "900", 1.0)]);
    let out = reconcile(
        &balance,
        &inbound_sheet(vec![]),
        &lines_sheet(vec![]),
        MatchPolicy::Reconcile,
    )
    .unwrap();

    let path = std::env::temp_dir().join("bosch_verileri_test.xlsx");
    write_xlsx(&out.records, &path).unwrap();
    assert!(path.exists());
    std::fs::remove_file(&path).ok();
}
