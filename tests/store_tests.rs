// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::{db, insights, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn new_tx(date_s: &str, description: &str, amount: &str) -> store::NewTransaction {
    store::NewTransaction {
        date: date(date_s),
        description: description.to_string(),
        amount: dec(amount),
        category_id: None,
    }
}

// ── Categories ──────────────────────────────────────────────────

#[test]
fn category_names_are_unique() {
    let conn = setup();
    store::create_category(&conn, "Groceries", None, None).unwrap();
    let err = store::create_category(&conn, "Groceries", None, None).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn category_name_lookup_is_case_sensitive() {
    let conn = setup();
    store::create_category(&conn, "Groceries", None, None).unwrap();
    assert!(
        store::find_category_by_name(&conn, "groceries")
            .unwrap()
            .is_none()
    );
    assert!(
        store::find_category_by_name(&conn, "Groceries")
            .unwrap()
            .is_some()
    );
}

#[test]
fn category_rejects_bad_names_and_budgets() {
    let conn = setup();
    assert!(store::create_category(&conn, "   ", None, None).is_err());
    let long = "x".repeat(101);
    assert!(store::create_category(&conn, &long, None, None).is_err());
    assert!(store::create_category(&conn, "Dining", None, Some(dec("-5"))).is_err());
}

#[test]
fn category_budget_can_be_set_and_cleared() {
    let conn = setup();
    let id = store::create_category(&conn, "Dining", None, None).unwrap().id;
    store::set_category_budget(&conn, id, Some(dec("120"))).unwrap();
    assert_eq!(
        store::get_category(&conn, id).unwrap().unwrap().monthly_budget,
        Some(dec("120"))
    );
    store::set_category_budget(&conn, id, None).unwrap();
    assert_eq!(
        store::get_category(&conn, id).unwrap().unwrap().monthly_budget,
        None
    );
    assert!(store::set_category_budget(&conn, id, Some(dec("-1"))).is_err());
    assert!(store::set_category_budget(&conn, 9999, Some(dec("1"))).is_err());
}

#[test]
fn deleting_a_category_orphans_its_transactions() {
    let conn = setup();
    let id = store::create_category(&conn, "Dining", None, None).unwrap().id;
    let tx = store::insert_transaction(
        &conn,
        &store::NewTransaction {
            category_id: Some(id),
            ..new_tx("2025-01-10", "Dinner", "40")
        },
    )
    .unwrap();

    assert!(store::delete_category(&conn, id).unwrap());
    assert!(!store::delete_category(&conn, id).unwrap());

    // The transaction survives uncategorized: still in totals, gone
    // from the per-category breakdown.
    let orphan = store::get_transaction(&conn, tx.id).unwrap().unwrap();
    assert_eq!(orphan.category_id, None);
    let summary = insights::monthly_summary(&conn, 2025, 1).unwrap();
    assert_eq!(summary.total, dec("40"));
    assert!(summary.by_category.is_empty());
}

// ── Transactions ────────────────────────────────────────────────

#[test]
fn insert_enforces_write_policy() {
    let conn = setup();
    assert!(
        store::insert_transaction(&conn, &new_tx("2999-01-01", "Time travel", "10")).is_err()
    );
    assert!(store::insert_transaction(&conn, &new_tx("2025-01-10", "   ", "10")).is_err());
    assert!(store::insert_transaction(&conn, &new_tx("2025-01-10", "Free", "0")).is_err());
    let long = "x".repeat(256);
    assert!(store::insert_transaction(&conn, &new_tx("2025-01-10", &long, "10")).is_err());
    let unknown_category = store::NewTransaction {
        category_id: Some(42),
        ..new_tx("2025-01-10", "Dinner", "10")
    };
    assert!(store::insert_transaction(&conn, &unknown_category).is_err());

    let ok = store::insert_transaction(&conn, &new_tx("2025-01-10", "  Dinner  ", "10")).unwrap();
    assert!(ok.id > 0);
    assert_eq!(ok.description, "Dinner");
}

#[test]
fn update_patches_only_provided_fields() {
    let conn = setup();
    let dining = store::create_category(&conn, "Dining", None, None).unwrap().id;
    let tx = store::insert_transaction(
        &conn,
        &store::NewTransaction {
            category_id: Some(dining),
            ..new_tx("2025-01-10", "Dinner", "40")
        },
    )
    .unwrap();

    let updated = store::update_transaction(
        &conn,
        tx.id,
        &store::TransactionPatch {
            amount: Some(dec("45.50")),
            category: Some(None),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();
    assert_eq!(updated.amount, dec("45.50"));
    assert_eq!(updated.category_id, None);
    assert_eq!(updated.description, "Dinner");
    assert_eq!(updated.date, date("2025-01-10"));

    // Patched values go through the same policy as inserts
    let err = store::update_transaction(
        &conn,
        tx.id,
        &store::TransactionPatch {
            amount: Some(Decimal::ZERO),
            ..Default::default()
        },
    );
    assert!(err.is_err());

    assert!(
        store::update_transaction(&conn, 9999, &store::TransactionPatch::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn delete_reports_whether_anything_was_removed() {
    let conn = setup();
    let tx = store::insert_transaction(&conn, &new_tx("2025-01-10", "Dinner", "40")).unwrap();
    assert!(store::delete_transaction(&conn, tx.id).unwrap());
    assert!(!store::delete_transaction(&conn, tx.id).unwrap());
}

#[test]
fn listing_filters_sort_and_paginate() {
    let conn = setup();
    let dining = store::create_category(&conn, "Dining", None, None).unwrap().id;
    for (d, desc) in [
        ("2025-01-01", "First"),
        ("2025-01-15", "Second"),
        ("2025-02-01", "Third"),
    ] {
        store::insert_transaction(&conn, &new_tx(d, desc, "10")).unwrap();
    }
    store::insert_transaction(
        &conn,
        &store::NewTransaction {
            category_id: Some(dining),
            ..new_tx("2025-01-20", "Dinner", "25")
        },
    )
    .unwrap();

    let january = store::list_transactions(
        &conn,
        Some(date("2025-01-01")),
        Some(date("2025-01-31")),
        None,
        None,
        None,
    )
    .unwrap();
    assert_eq!(january.len(), 3);
    // Newest first
    assert_eq!(january[0].description, "Dinner");
    assert_eq!(january[2].description, "First");

    let dining_only =
        store::list_transactions(&conn, None, None, Some(dining), None, None).unwrap();
    assert_eq!(dining_only.len(), 1);

    let page = store::list_transactions(&conn, None, None, None, Some(2), Some(1)).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].description, "Dinner");

    assert_eq!(store::count_transactions(&conn).unwrap(), 4);
}

#[test]
fn search_matches_substrings_case_insensitively() {
    let conn = setup();
    store::insert_transaction(&conn, &new_tx("2025-01-10", "Netflix subscription", "15")).unwrap();
    store::insert_transaction(&conn, &new_tx("2025-01-11", "Groceries", "50")).unwrap();

    let found = store::search_transactions(&conn, "netflix", None, None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "Netflix subscription");
    assert!(
        store::search_transactions(&conn, "spotify", None, None)
            .unwrap()
            .is_empty()
    );
}

// ── Settings ────────────────────────────────────────────────────

#[test]
fn global_budget_roundtrips_through_settings() {
    let conn = setup();
    assert_eq!(store::global_budget(&conn).unwrap(), None);
    assert_eq!(
        store::get_settings(&conn).unwrap().global_monthly_budget,
        None
    );

    store::set_global_budget(&conn, dec("1500")).unwrap();
    assert_eq!(store::global_budget(&conn).unwrap(), Some(dec("1500")));
    // Overwrite, not duplicate
    store::set_global_budget(&conn, dec("2000")).unwrap();
    assert_eq!(store::global_budget(&conn).unwrap(), Some(dec("2000")));

    assert!(store::set_global_budget(&conn, dec("-1")).is_err());

    store::clear_global_budget(&conn).unwrap();
    assert_eq!(store::global_budget(&conn).unwrap(), None);
}
