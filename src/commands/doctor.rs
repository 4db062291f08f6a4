// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();
    let today = chrono::Utc::now().date_naive();

    // 1) Transactions pointing at a category that no longer exists
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphan_category_ref".into(), format!("transaction {}", id)]);
    }

    // 2) Stored transaction fields that no longer parse or violate policy
    let mut stmt2 = conn.prepare("SELECT id, date, amount FROM transactions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let amount: String = r.get(2)?;
        match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
            Ok(d) if d > today => {
                rows.push(vec!["future_date".into(), format!("transaction {}: {}", id, date)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_date".into(), format!("transaction {}: '{}'", id, date)]);
            }
        }
        match amount.parse::<Decimal>() {
            Ok(a) if a.is_zero() => {
                rows.push(vec!["zero_amount".into(), format!("transaction {}", id)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("transaction {}: '{}'", id, amount)]);
            }
        }
    }

    // 3) Category budgets that no longer parse or are negative
    let mut stmt3 = conn
        .prepare("SELECT name, monthly_budget FROM categories WHERE monthly_budget IS NOT NULL")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let budget: String = r.get(1)?;
        match budget.parse::<Decimal>() {
            Ok(b) if b < Decimal::ZERO => {
                rows.push(vec!["negative_budget".into(), format!("category '{}'", name)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec![
                    "bad_budget".into(),
                    format!("category '{}': '{}'", name, budget),
                ]);
            }
        }
    }

    // 4) Global budget setting
    let global: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='global_monthly_budget'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(raw) = global {
        match raw.parse::<Decimal>() {
            Ok(b) if b < Decimal::ZERO => {
                rows.push(vec!["negative_budget".into(), "global budget".into()]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_budget".into(), format!("global budget: '{}'", raw)]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
