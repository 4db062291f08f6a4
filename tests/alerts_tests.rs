// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centime::models::AlertScope;
use centime::{alerts, cli, commands, db, store};
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

fn add_tx(conn: &Connection, date: &str, description: &str, amount: &str, category_id: Option<i64>) {
    store::insert_transaction(
        conn,
        &store::NewTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            amount: dec(amount),
            category_id,
        },
    )
    .unwrap();
}

#[test]
fn global_alert_fires_on_overrun() {
    let conn = setup();
    store::set_global_budget(&conn, dec("200")).unwrap();
    add_tx(&conn, "2025-01-10", "Rent", "250.50", None);

    let alerts = alerts::monthly_alerts(&conn, 2025, 1).unwrap();
    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(alert.scope, AlertScope::Global);
    assert_eq!(alert.category, None);
    assert_eq!(alert.budget, dec("200"));
    assert_eq!(alert.actual, dec("250.50"));
    assert_eq!(alert.delta, dec("50.50"));
}

#[test]
fn no_alert_without_configured_budgets() {
    let conn = setup();
    add_tx(&conn, "2025-01-10", "Rent", "5000", None);
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn no_alert_at_exactly_budget() {
    let conn = setup();
    store::set_global_budget(&conn, dec("100")).unwrap();
    add_tx(&conn, "2025-01-10", "Rent", "100", None);
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn zero_budget_means_unconfigured() {
    let conn = setup();
    store::set_global_budget(&conn, Decimal::ZERO).unwrap();
    let dining = store::create_category(&conn, "Dining", None, Some(Decimal::ZERO))
        .unwrap()
        .id;
    add_tx(&conn, "2025-01-10", "Dinner", "80", Some(dining));
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn global_alert_precedes_categories_in_name_order() {
    let conn = setup();
    store::set_global_budget(&conn, dec("100")).unwrap();
    let groceries = store::create_category(&conn, "Groceries", None, Some(dec("40")))
        .unwrap()
        .id;
    let dining = store::create_category(&conn, "Dining", None, Some(dec("50")))
        .unwrap()
        .id;
    add_tx(&conn, "2025-01-03", "Dinner", "80", Some(dining));
    add_tx(&conn, "2025-01-04", "Market", "60", Some(groceries));
    add_tx(&conn, "2025-01-05", "Cash", "160", None);

    let alerts = alerts::monthly_alerts(&conn, 2025, 1).unwrap();
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0].scope, AlertScope::Global);
    assert_eq!(alerts[0].actual, dec("300"));
    assert_eq!(alerts[0].delta, dec("200"));
    assert_eq!(alerts[1].category.as_deref(), Some("Dining"));
    assert_eq!(alerts[1].delta, dec("30"));
    assert_eq!(alerts[2].category.as_deref(), Some("Groceries"));
    assert_eq!(alerts[2].delta, dec("20"));
}

#[test]
fn category_without_budget_never_alerts() {
    let conn = setup();
    let dining = store::create_category(&conn, "Dining", None, None).unwrap().id;
    add_tx(&conn, "2025-01-03", "Dinner", "9999", Some(dining));
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn budgeted_category_with_no_spend_stays_quiet() {
    let conn = setup();
    store::create_category(&conn, "Dining", None, Some(dec("50"))).unwrap();
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn deleting_the_offender_clears_the_alert() {
    let conn = setup();
    let dining = store::create_category(&conn, "Dining", None, Some(dec("50")))
        .unwrap()
        .id;
    let offender = store::insert_transaction(
        &conn,
        &store::NewTransaction {
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            description: "Big dinner".to_string(),
            amount: dec("80"),
            category_id: Some(dining),
        },
    )
    .unwrap();
    assert_eq!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().len(), 1);

    assert!(store::delete_transaction(&conn, offender.id).unwrap());
    assert!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().is_empty());
}

#[test]
fn multi_month_budgets_scale_linearly() {
    let conn = setup();
    let dining = store::create_category(&conn, "Dining", None, Some(dec("100")))
        .unwrap()
        .id;
    add_tx(&conn, "2025-01-10", "Dinner", "120", Some(dining));
    add_tx(&conn, "2025-02-10", "Dinner", "120", Some(dining));
    add_tx(&conn, "2025-03-10", "Dinner", "50", Some(dining));

    // January alone is over its monthly budget...
    assert_eq!(alerts::monthly_alerts(&conn, 2025, 1).unwrap().len(), 1);
    // ...but the quarter stays under 3x the monthly budget.
    assert!(alerts::period_alerts(&conn, 2025, 3, 3).unwrap().is_empty());

    add_tx(&conn, "2025-03-20", "Dessert", "20", Some(dining));
    let alerts = alerts::period_alerts(&conn, 2025, 3, 3).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].budget, dec("300"));
    assert_eq!(alerts[0].actual, dec("310"));
    assert_eq!(alerts[0].delta, dec("10"));
}

#[test]
fn alerts_cli_parses_period_flags() {
    let conn = setup();
    store::set_global_budget(&conn, dec("10")).unwrap();
    add_tx(&conn, "2025-01-10", "Rent", "25", None);

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["centime", "alerts", "--year", "2025", "--month", "1", "--json"]);
    if let Some(("alerts", sub)) = matches.subcommand() {
        commands::alerts::handle(&conn, sub).unwrap();
    } else {
        panic!("no alerts subcommand");
    }
}
