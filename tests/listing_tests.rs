//! Listing behavior against the in-memory store: pagination, filtering,
//! and sorting.

mod support;

use std::collections::HashMap;

use serde_json::json;
use support::MemoryStore;

use planta_core::database::SupervisionStore;
use planta_core::query::ListQuery;
use planta_core::registry::{find_module, TableSpec};

fn spec() -> &'static TableSpec {
    find_module("agronomia").unwrap()
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn seeded_store(count: u64) -> MemoryStore {
    let store = MemoryStore::new();
    for id in 1..=count {
        store.insert_row(
            spec(),
            json!({
                "plagas_id": id,
                "lote": format!("L-{}", id % 3),
                "plaga": if id % 2 == 0 { "Acaro" } else { "picudo" },
                "supervision": "aprobado",
                "check": true,
            })
            .as_object()
            .unwrap()
            .clone(),
        );
    }
    store
}

#[tokio::test]
async fn second_page_of_twenty_five_rows() {
    let store = seeded_store(25);
    let query = ListQuery::from_params(
        spec(),
        &params(&[("page", "2"), ("pageSize", "10")]),
        10,
        100,
    )
    .unwrap();

    let page = store.list_records(spec(), &query).await.unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.datos.len(), 10);
    assert_eq!(page.datos.first().unwrap()["plagas_id"], 11);
    assert_eq!(page.datos.last().unwrap()["plagas_id"], 20);
}

#[tokio::test]
async fn last_page_is_partial() {
    let store = seeded_store(25);
    let query = ListQuery::from_params(
        spec(),
        &params(&[("page", "3"), ("pageSize", "10")]),
        10,
        100,
    )
    .unwrap();

    let page = store.list_records(spec(), &query).await.unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.datos.len(), 5);
}

#[tokio::test]
async fn filters_are_case_insensitive_substrings() {
    let store = seeded_store(10);
    let query = ListQuery::from_params(spec(), &params(&[("filtro_plaga", "acar")]), 10, 100)
        .unwrap();

    let page = store.list_records(spec(), &query).await.unwrap();

    assert_eq!(page.total, 5);
    assert!(page
        .datos
        .iter()
        .all(|row| row["plaga"].as_str().unwrap().eq_ignore_ascii_case("acaro")));
}

#[tokio::test]
async fn wildcard_characters_in_filters_match_literally() {
    let store = seeded_store(10);
    let query =
        ListQuery::from_params(spec(), &params(&[("filtro_plaga", "a%o")]), 10, 100).unwrap();

    let page = store.list_records(spec(), &query).await.unwrap();

    assert_eq!(page.total, 0);
    assert!(page.datos.is_empty());
}

#[tokio::test]
async fn descending_sort_reverses_order() {
    let store = seeded_store(5);
    let query = ListQuery::from_params(
        spec(),
        &params(&[("ordenColumna", "plagas_id"), ("ordenAsc", "false")]),
        10,
        100,
    )
    .unwrap();

    let page = store.list_records(spec(), &query).await.unwrap();

    assert_eq!(page.datos.first().unwrap()["plagas_id"], 5);
    assert_eq!(page.datos.last().unwrap()["plagas_id"], 1);
}
