// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::models::{Category, Settings, Transaction};

pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

const GLOBAL_BUDGET_KEY: &str = "global_monthly_budget";

// ── Transactions ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
}

/// Partial update: outer `None` leaves the field untouched; for
/// `category` the inner `None` clears the assignment.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<Option<i64>>,
}

pub fn insert_transaction(conn: &Connection, new: &NewTransaction) -> Result<Transaction> {
    let description = new.description.trim();
    validate_transaction_fields(conn, new.date, description, new.amount, new.category_id)?;
    conn.execute(
        "INSERT INTO transactions(date, description, amount, category_id) VALUES (?1,?2,?3,?4)",
        params![
            new.date.to_string(),
            description,
            new.amount.to_string(),
            new.category_id
        ],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Transaction {
        id,
        date: new.date,
        description: description.to_string(),
        amount: new.amount,
        category_id: new.category_id,
    })
}

pub fn get_transaction(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let row: Option<(i64, NaiveDate, String, String, Option<i64>)> = conn
        .query_row(
            "SELECT id, date, description, amount, category_id FROM transactions WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .optional()?;
    row.map(into_transaction).transpose()
}

pub fn update_transaction(
    conn: &Connection,
    id: i64,
    patch: &TransactionPatch,
) -> Result<Option<Transaction>> {
    let existing = match get_transaction(conn, id)? {
        Some(t) => t,
        None => return Ok(None),
    };
    let date = patch.date.unwrap_or(existing.date);
    let description = patch
        .description
        .as_deref()
        .unwrap_or(&existing.description)
        .trim()
        .to_string();
    let amount = patch.amount.unwrap_or(existing.amount);
    let category_id = patch.category.unwrap_or(existing.category_id);
    validate_transaction_fields(conn, date, &description, amount, category_id)?;
    conn.execute(
        "UPDATE transactions SET date=?1, description=?2, amount=?3, category_id=?4 WHERE id=?5",
        params![
            date.to_string(),
            description,
            amount.to_string(),
            category_id,
            id
        ],
    )?;
    Ok(Some(Transaction {
        id,
        date,
        description,
        amount,
        category_id,
    }))
}

pub fn delete_transaction(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(affected > 0)
}

/// Date-range + category filtered listing, newest first. `None` bounds
/// leave that side of the range open.
pub fn list_transactions(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    category_id: Option<i64>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, description, amount, category_id FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(from) = from {
        sql.push_str(&format!(" AND date>=?{}", params_vec.len() + 1));
        params_vec.push(Box::new(from.to_string()));
    }
    if let Some(to) = to {
        sql.push_str(&format!(" AND date<=?{}", params_vec.len() + 1));
        params_vec.push(Box::new(to.to_string()));
    }
    if let Some(cid) = category_id {
        sql.push_str(&format!(" AND category_id=?{}", params_vec.len() + 1));
        params_vec.push(Box::new(cid));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    push_page_clause(&mut sql, limit, offset);
    query_transactions(conn, &sql, &params_vec)
}

/// Case-insensitive substring search over descriptions, newest first.
pub fn search_transactions(
    conn: &Connection,
    text: &str,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, description, amount, category_id FROM transactions \
         WHERE description LIKE ?1 ORDER BY date DESC, id DESC",
    );
    push_page_clause(&mut sql, limit, offset);
    let params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(format!("%{}%", text))];
    query_transactions(conn, &sql, &params_vec)
}

// SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
fn push_page_clause(sql: &mut String, limit: Option<usize>, offset: Option<usize>) {
    match (limit, offset) {
        (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset)),
        (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
        (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset)),
        (None, None) => {}
    }
}

pub fn count_transactions(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
}

fn query_transactions(
    conn: &Connection,
    sql: &str,
    params_vec: &[Box<dyn rusqlite::ToSql>],
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(refs))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(into_transaction((
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
        ))?);
    }
    Ok(data)
}

fn into_transaction(
    (id, date, description, amount, category_id): (i64, NaiveDate, String, String, Option<i64>),
) -> Result<Transaction> {
    let amount = amount
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' stored for transaction {}", amount, id))?;
    Ok(Transaction {
        id,
        date,
        description,
        amount,
        category_id,
    })
}

fn validate_transaction_fields(
    conn: &Connection,
    date: NaiveDate,
    description: &str,
    amount: Decimal,
    category_id: Option<i64>,
) -> Result<()> {
    if date > chrono::Utc::now().date_naive() {
        bail!("Transaction date {} cannot be in the future", date);
    }
    if description.is_empty() {
        bail!("Transaction description is required");
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        bail!(
            "Transaction description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        );
    }
    if amount.is_zero() {
        bail!("Transaction amount cannot be zero");
    }
    if let Some(cid) = category_id {
        if get_category(conn, cid)?.is_none() {
            bail!("Category {} not found", cid);
        }
    }
    Ok(())
}

// ── Categories ──────────────────────────────────────────────────

pub fn create_category(
    conn: &Connection,
    name: &str,
    color: Option<&str>,
    monthly_budget: Option<Decimal>,
) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Category name is required");
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        bail!("Category name exceeds {} characters", MAX_CATEGORY_NAME_LEN);
    }
    if let Some(budget) = monthly_budget {
        validate_budget(budget)?;
    }
    if find_category_by_name(conn, name)?.is_some() {
        bail!("Category '{}' already exists", name);
    }
    conn.execute(
        "INSERT INTO categories(name, color, monthly_budget) VALUES (?1,?2,?3)",
        params![name, color, monthly_budget.map(|b| b.to_string())],
    )?;
    Ok(Category {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        color: color.map(|c| c.to_string()),
        monthly_budget,
    })
}

pub fn get_category(conn: &Connection, id: i64) -> Result<Option<Category>> {
    let row: Option<(i64, String, Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT id, name, color, monthly_budget FROM categories WHERE id=?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    row.map(into_category).transpose()
}

/// Exact, case-sensitive name lookup (names are unique).
pub fn find_category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let row: Option<(i64, String, Option<String>, Option<String>)> = conn
        .query_row(
            "SELECT id, name, color, monthly_budget FROM categories WHERE name=?1",
            params![name],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    row.map(into_category).transpose()
}

pub fn category_id_by_name(conn: &Connection, name: &str) -> Result<i64> {
    find_category_by_name(conn, name)?
        .map(|c| c.id)
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}

pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt =
        conn.prepare("SELECT id, name, color, monthly_budget FROM categories ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(into_category((
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
        ))?);
    }
    Ok(data)
}

pub fn set_category_budget(
    conn: &Connection,
    id: i64,
    monthly_budget: Option<Decimal>,
) -> Result<()> {
    if let Some(budget) = monthly_budget {
        validate_budget(budget)?;
    }
    let affected = conn.execute(
        "UPDATE categories SET monthly_budget=?1 WHERE id=?2",
        params![monthly_budget.map(|b| b.to_string()), id],
    )?;
    if affected == 0 {
        bail!("Category {} not found", id);
    }
    Ok(())
}

pub fn set_category_color(conn: &Connection, id: i64, color: Option<&str>) -> Result<()> {
    let affected = conn.execute(
        "UPDATE categories SET color=?1 WHERE id=?2",
        params![color, id],
    )?;
    if affected == 0 {
        bail!("Category {} not found", id);
    }
    Ok(())
}

/// Removes a category; its transactions survive with `category_id`
/// cleared by the schema's ON DELETE SET NULL.
pub fn delete_category(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    Ok(affected > 0)
}

fn into_category(
    (id, name, color, monthly_budget): (i64, String, Option<String>, Option<String>),
) -> Result<Category> {
    let monthly_budget = match monthly_budget {
        Some(raw) => Some(raw.parse::<Decimal>().with_context(|| {
            format!("Invalid monthly budget '{}' stored for category {}", raw, id)
        })?),
        None => None,
    };
    Ok(Category {
        id,
        name,
        color,
        monthly_budget,
    })
}

// ── Settings ────────────────────────────────────────────────────

pub fn get_settings(conn: &Connection) -> Result<Settings> {
    Ok(Settings {
        global_monthly_budget: global_budget(conn)?,
    })
}

pub fn global_budget(conn: &Connection) -> Result<Option<Decimal>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![GLOBAL_BUDGET_KEY],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(raw) => Ok(Some(raw.parse::<Decimal>().with_context(|| {
            format!("Invalid global budget '{}' stored in settings", raw)
        })?)),
        None => Ok(None),
    }
}

pub fn set_global_budget(conn: &Connection, amount: Decimal) -> Result<()> {
    validate_budget(amount)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![GLOBAL_BUDGET_KEY, amount.to_string()],
    )?;
    Ok(())
}

pub fn clear_global_budget(conn: &Connection) -> Result<()> {
    conn.execute(
        "DELETE FROM settings WHERE key=?1",
        params![GLOBAL_BUDGET_KEY],
    )?;
    Ok(())
}

fn validate_budget(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        bail!("Budget cannot be negative");
    }
    Ok(())
}
