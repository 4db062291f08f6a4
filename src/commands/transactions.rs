// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::month_bounds;
use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("search", sub)) => search(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_transaction(conn, id)? {
                println!("Deleted transaction {}", id);
            } else {
                println!("Transaction {} not found", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| store::category_id_by_name(conn, name))
        .transpose()?;

    let recorded = store::insert_transaction(
        conn,
        &store::NewTransaction {
            date,
            description,
            amount,
            category_id,
        },
    )?;
    println!(
        "Recorded {} on {} for '{}'",
        fmt_amount(&recorded.amount),
        recorded.date,
        recorded.description
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows(&data);
    }
    Ok(())
}

fn search(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let text = sub.get_one::<String>("text").unwrap();
    let limit = sub.get_one::<usize>("limit").copied();
    let found = store::search_transactions(conn, text, limit, None)?;
    let data = to_rows(conn, found)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_rows(&data);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut from = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let mut to = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    if let Some(month) = sub.get_one::<String>("month") {
        let (year, month) = parse_month(month)?;
        let (first, last) = month_bounds(year, month)?;
        from = Some(first);
        to = Some(last);
    }
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| store::category_id_by_name(conn, name))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied();
    let offset = sub.get_one::<usize>("offset").copied();

    let transactions = store::list_transactions(conn, from, to, category_id, limit, offset)?;
    to_rows(conn, transactions)
}

fn to_rows(
    conn: &Connection,
    transactions: Vec<crate::models::Transaction>,
) -> Result<Vec<TransactionRow>> {
    let names: HashMap<i64, String> = store::list_categories(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(transactions
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            description: t.description,
            amount: fmt_amount(&t.amount),
            category: t
                .category_id
                .and_then(|cid| names.get(&cid).cloned())
                .unwrap_or_default(),
        })
        .collect())
}

fn print_rows(data: &[TransactionRow]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.description.clone(),
                r.amount.clone(),
                r.category.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Description", "Amount", "Category"], rows)
    );
}
