// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::alerts;
use crate::models::AlertScope;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let year = *m.get_one::<i32>("year").unwrap();
    let month = *m.get_one::<u32>("month").unwrap();
    let months = *m.get_one::<u32>("months").unwrap();

    let alerts = alerts::period_alerts(conn, year, month, months)?;
    if json_flag {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "alerts": alerts }))?
        );
        return Ok(());
    }
    if maybe_print_json(false, jsonl_flag, &alerts)? {
        return Ok(());
    }
    if alerts.is_empty() {
        println!("No budget overruns for this period");
        return Ok(());
    }
    let rows = alerts
        .iter()
        .map(|a| {
            vec![
                match a.scope {
                    AlertScope::Global => "global".to_string(),
                    AlertScope::Category => "category".to_string(),
                },
                a.category.clone().unwrap_or_default(),
                fmt_amount(&a.budget),
                fmt_amount(&a.actual),
                fmt_amount(&a.delta),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Scope", "Category", "Budget", "Actual", "Over by"], rows)
    );
    Ok(())
}
