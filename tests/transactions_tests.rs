// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::{cli, commands::transactions, db, store};
use chrono::NaiveDate;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let dining = store::create_category(&conn, "Dining", None, None).unwrap().id;
    for (d, desc, amount, cat) in [
        ("2025-01-01", "Market", "12.00", None),
        ("2025-01-02", "Dinner", "30.00", Some(dining)),
        ("2025-01-03", "Bus", "2.50", None),
        ("2025-02-01", "Market", "14.00", None),
    ] {
        store::insert_transaction(
            &conn,
            &store::NewTransaction {
                date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
                description: desc.to_string(),
                amount: amount.parse().unwrap(),
                category_id: cat,
            },
        )
        .unwrap();
    }
    conn
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["centime", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-02-01");
}

#[test]
fn list_month_filter_bounds_the_range() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--month", "2025-01"])).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.date.starts_with("2025-01")));
}

#[test]
fn list_category_filter_resolves_names() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--category", "Dining"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Dinner");
    assert_eq!(rows[0].category, "Dining");

    let err =
        transactions::query_rows(&conn, &list_matches(&["--category", "Nope"])).unwrap_err();
    assert!(err.to_string().contains("Category 'Nope' not found"));
}

#[test]
fn list_rejects_malformed_month() {
    let conn = setup();
    let err = transactions::query_rows(&conn, &list_matches(&["--month", "2025-13"])).unwrap_err();
    assert!(err.to_string().contains("Invalid month '2025-13'"));
}

#[test]
fn explicit_range_overlaps_are_inclusive() {
    let conn = setup();
    let rows = transactions::query_rows(
        &conn,
        &list_matches(&["--from", "2025-01-02", "--to", "2025-01-03"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Bus");
    assert_eq!(rows[1].description, "Dinner");
}
