// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Batch transaction import. Rows are validated independently: one bad
//! row is reported and skipped, never aborting the batch. Categories
//! named by valid rows are created on the fly, once per batch.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::{HashMap, hash_map::Entry};
use std::io::Read;

use crate::models::{ImportError, ImportReport};
use crate::store;

pub const DEFAULT_CATEGORY_COLOR: &str = "#818cf8";

#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// Per-row validation ladder; the first failing rule wins and its
/// message becomes the row's error entry.
pub fn validate_row(row: &RawRow, today: NaiveDate) -> Result<ParsedRow, String> {
    let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
        .map_err(|_| "date must be in YYYY-MM-DD format".to_string())?;
    if date > today {
        return Err("date cannot be in the future".to_string());
    }
    let description = row.description.trim();
    if description.is_empty() {
        return Err("description is required".to_string());
    }
    if description.chars().count() > store::MAX_DESCRIPTION_LEN {
        return Err(format!(
            "description must be {} characters or fewer",
            store::MAX_DESCRIPTION_LEN
        ));
    }
    let amount = row
        .amount
        .trim()
        .parse::<Decimal>()
        .map_err(|_| "amount must be a number".to_string())?;
    if amount.is_zero() {
        return Err("amount cannot be zero".to_string());
    }
    let category = row.category.trim();
    Ok(ParsedRow {
        date,
        description: description.to_string(),
        amount,
        category: if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        },
    })
}

/// Reads a headered CSV into raw rows. Columns are located by header
/// name (case-insensitive); `category` is optional, the rest are not.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let date_col = find("date").context("CSV is missing a 'date' column")?;
    let description_col = find("description").context("CSV is missing a 'description' column")?;
    let amount_col = find("amount").context("CSV is missing an 'amount' column")?;
    let category_col = find("category");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let field = |col: usize| record.get(col).unwrap_or("").to_string();
        rows.push(RawRow {
            date: field(date_col),
            description: field(description_col),
            amount: field(amount_col),
            category: category_col.map(|col| field(col)).unwrap_or_default(),
        });
    }
    Ok(rows)
}

/// Validates and inserts a batch inside one storage transaction.
/// Error line numbers are 1-based over the data rows, header excluded.
pub fn import_rows(
    conn: &mut Connection,
    rows: &[RawRow],
    today: NaiveDate,
) -> Result<ImportReport> {
    let tx = conn.transaction()?;
    let mut category_cache: HashMap<String, i64> = HashMap::new();
    let mut report = ImportReport {
        inserted: 0,
        skipped: 0,
        errors: Vec::new(),
    };

    for (idx, row) in rows.iter().enumerate() {
        let line = idx + 1;
        let parsed = match validate_row(row, today) {
            Ok(parsed) => parsed,
            Err(message) => {
                report.skipped += 1;
                report.errors.push(ImportError { line, message });
                continue;
            }
        };
        let category_id = match parsed.category {
            Some(name) => Some(match category_cache.entry(name) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id = resolve_category(&tx, entry.key())?;
                    *entry.insert(id)
                }
            }),
            None => None,
        };
        tx.execute(
            "INSERT INTO transactions(date, description, amount, category_id) VALUES (?1,?2,?3,?4)",
            params![
                parsed.date.to_string(),
                parsed.description,
                parsed.amount.to_string(),
                category_id
            ],
        )?;
        report.inserted += 1;
    }

    tx.commit()?;
    Ok(report)
}

pub fn import_csv_file(conn: &mut Connection, path: &str) -> Result<ImportReport> {
    let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let rows = read_rows(file)?;
    let today = chrono::Utc::now().date_naive();
    import_rows(conn, &rows, today)
}

fn resolve_category(conn: &Connection, name: &str) -> Result<i64> {
    if let Some(existing) = store::find_category_by_name(conn, name)? {
        return Ok(existing.id);
    }
    let created = store::create_category(conn, name, Some(DEFAULT_CATEGORY_COLOR), None)?;
    Ok(created.id)
}
