// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights;
use crate::models::CategoryBreakdown;
use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("total", sub)) => total(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn year_month(sub: &clap::ArgMatches) -> (i32, u32) {
    (
        *sub.get_one::<i32>("year").unwrap(),
        *sub.get_one::<u32>("month").unwrap(),
    )
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = year_month(sub);
    let summary = insights::monthly_summary(conn, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        println!("Summary for {:04}-{:02}", year, month);
        println!("  Total:   {}", fmt_amount(&summary.total));
        println!("  Count:   {}", summary.count);
        println!("  Average: {}", fmt_amount(&summary.average));
        if !summary.by_category.is_empty() {
            println!("{}", breakdown_table(&summary.by_category));
        }
    }
    Ok(())
}

fn total(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let (year, month) = year_month(sub);
    let months = *sub.get_one::<u32>("months").unwrap();
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| store::category_id_by_name(conn, name))
        .transpose()?;
    let total = insights::period_total(conn, year, month, months, category_id)?.round_dp(2);
    if json_flag {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "total": total }))?
        );
    } else {
        println!("{}", fmt_amount(&total));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = year_month(sub);
    let months = *sub.get_one::<u32>("months").unwrap();
    let breakdown = insights::period_breakdown(conn, year, month, months)?;
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        println!("{}", breakdown_table(&breakdown));
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = year_month(sub);
    let months = *sub.get_one::<u32>("months").unwrap();
    let current = insights::period_total(conn, year, month, months, None)?;
    let (prev_year, prev_month) = insights::shift_months_back(year, month, months);
    let previous = insights::period_total(conn, prev_year, prev_month, months, None)?;
    let change = insights::percentage_change(current, previous);
    println!(
        "{}",
        pretty_table(
            &["Current", "Previous", "Change %"],
            vec![vec![
                fmt_amount(&current.round_dp(2)),
                fmt_amount(&previous.round_dp(2)),
                fmt_amount(&change),
            ]],
        )
    );
    Ok(())
}

fn breakdown_table(breakdown: &BTreeMap<String, CategoryBreakdown>) -> comfy_table::Table {
    let rows = breakdown
        .iter()
        .map(|(name, b)| {
            vec![
                name.clone(),
                fmt_amount(&b.total),
                b.count.to_string(),
                fmt_amount(&b.percentage),
            ]
        })
        .collect();
    pretty_table(&["Category", "Total", "Count", "Share %"], rows)
}
