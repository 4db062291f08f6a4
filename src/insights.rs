// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation over recorded transactions: monthly summaries, category
//! breakdowns, and multi-month rollups. Every computation reads the
//! store fresh; nothing is cached between calls.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::error::CoreError;
use crate::models::{CategoryBreakdown, Summary, Transaction};
use crate::store;

/// First and last day of a calendar month, inclusive.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::MonthOutOfRange(month));
    }
    if year < 1 {
        return Err(CoreError::YearOutOfRange(year));
    }
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(CoreError::MonthOutOfRange(month)),
    };
    let first =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CoreError::YearOutOfRange(year))?;
    let last =
        NaiveDate::from_ymd_opt(year, month, last_day).ok_or(CoreError::YearOutOfRange(year))?;
    Ok((first, last))
}

/// The `n` consecutive (year, month) pairs ending at (year, month),
/// oldest first.
pub fn period_months(year: i32, month: u32, n: u32) -> Result<Vec<(i32, u32)>, CoreError> {
    if n == 0 {
        return Err(CoreError::EmptyPeriod);
    }
    month_bounds(year, month)?;
    let (mut y, mut m) = (year, month);
    let mut months = Vec::with_capacity(n as usize);
    for _ in 0..n {
        months.push((y, m));
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    months.reverse();
    Ok(months)
}

/// The (year, month) `n` months before the given month. Used to anchor
/// the previous window in period-over-period comparisons.
pub fn shift_months_back(year: i32, month: u32, n: u32) -> (i32, u32) {
    let mut y = year;
    let mut m = month;
    for _ in 0..n {
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    (y, m)
}

/// Pure aggregation over an already-fetched slice. Uncategorized
/// transactions contribute to `total` and `count` only; percentages are
/// shares of the overall (signed) total with a zero-denominator guard.
pub fn summarize(transactions: &[Transaction], category_names: &HashMap<i64, String>) -> Summary {
    let mut total = Decimal::ZERO;
    let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    for t in transactions {
        total += t.amount;
        if let Some(cid) = t.category_id {
            if let Some(name) = category_names.get(&cid) {
                let entry = groups.entry(name.clone()).or_insert((Decimal::ZERO, 0));
                entry.0 += t.amount;
                entry.1 += 1;
            }
        }
    }
    let count = transactions.len() as i64;
    let average = if count > 0 {
        (total / Decimal::from(count)).round_dp(2)
    } else {
        Decimal::ZERO
    };
    let by_category = groups
        .into_iter()
        .map(|(name, (cat_total, cat_count))| {
            (
                name,
                CategoryBreakdown {
                    total: cat_total.round_dp(2),
                    count: cat_count,
                    percentage: percentage_of(cat_total, total),
                },
            )
        })
        .collect();
    Summary {
        total: total.round_dp(2),
        count,
        average,
        by_category,
    }
}

pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (Decimal::ONE_HUNDRED * part / whole).round_dp(2)
    }
}

/// Month-over-month style comparison between two scalar totals.
pub fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    } else {
        (Decimal::ONE_HUNDRED * (current - previous) / previous).round_dp(2)
    }
}

pub fn monthly_summary(conn: &Connection, year: i32, month: u32) -> Result<Summary> {
    let (first, last) = month_bounds(year, month)?;
    let transactions = store::list_transactions(conn, Some(first), Some(last), None, None, None)?;
    let names = category_name_index(conn)?;
    Ok(summarize(&transactions, &names))
}

/// Signed sum for one month, optionally restricted to a category. The
/// cheap variant multi-month rollups are built on.
pub fn monthly_total(
    conn: &Connection,
    year: i32,
    month: u32,
    category_id: Option<i64>,
) -> Result<Decimal> {
    let (first, last) = month_bounds(year, month)?;
    let transactions =
        store::list_transactions(conn, Some(first), Some(last), category_id, None, None)?;
    Ok(transactions.iter().map(|t| t.amount).sum())
}

pub fn period_total(
    conn: &Connection,
    year: i32,
    month: u32,
    months: u32,
    category_id: Option<i64>,
) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for (y, m) in period_months(year, month, months)? {
        total += monthly_total(conn, y, m, category_id)?;
    }
    Ok(total)
}

/// Entry-wise sum of the monthly category maps over a period, with
/// percentages recomputed against the summed overall total.
pub fn period_breakdown(
    conn: &Connection,
    year: i32,
    month: u32,
    months: u32,
) -> Result<BTreeMap<String, CategoryBreakdown>> {
    let mut grand = Decimal::ZERO;
    let mut groups: BTreeMap<String, (Decimal, i64)> = BTreeMap::new();
    for (y, m) in period_months(year, month, months)? {
        let summary = monthly_summary(conn, y, m)?;
        grand += summary.total;
        for (name, breakdown) in summary.by_category {
            let entry = groups.entry(name).or_insert((Decimal::ZERO, 0));
            entry.0 += breakdown.total;
            entry.1 += breakdown.count;
        }
    }
    Ok(groups
        .into_iter()
        .map(|(name, (total, count))| {
            (
                name,
                CategoryBreakdown {
                    total,
                    count,
                    percentage: percentage_of(total, grand),
                },
            )
        })
        .collect())
}

fn category_name_index(conn: &Connection) -> Result<HashMap<i64, String>> {
    Ok(store::list_categories(conn)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}
