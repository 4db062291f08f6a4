// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget-overrun detection. Alerts are recomputed from scratch on
//! every call; no alert state is ever persisted, so removing the
//! offending spend removes the alert.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::insights;
use crate::models::{Alert, AlertScope};
use crate::store;

/// Strict overrun check shared by both scopes: spending exactly at
/// budget stays quiet.
pub fn exceeds(actual: Decimal, budget: Decimal) -> Option<Decimal> {
    if actual > budget {
        Some(actual - budget)
    } else {
        None
    }
}

pub fn monthly_alerts(conn: &Connection, year: i32, month: u32) -> Result<Vec<Alert>> {
    period_alerts(conn, year, month, 1)
}

/// Overrun alerts over an `n`-month window ending at (year, month).
/// Budgets scale linearly with the window width; there is no carryover.
/// The global alert (if any) comes first, then category alerts in
/// name order.
pub fn period_alerts(conn: &Connection, year: i32, month: u32, months: u32) -> Result<Vec<Alert>> {
    let scale = Decimal::from(months);
    let total = insights::period_total(conn, year, month, months, None)?;
    let breakdown = insights::period_breakdown(conn, year, month, months)?;

    let mut alerts = Vec::new();

    // An unset budget, and a budget of exactly zero, both mean
    // "nothing configured for this scope".
    if let Some(budget) = store::global_budget(conn)? {
        if !budget.is_zero() {
            let effective = budget * scale;
            if let Some(delta) = exceeds(total, effective) {
                alerts.push(Alert {
                    scope: AlertScope::Global,
                    category: None,
                    budget: effective.round_dp(2),
                    actual: total.round_dp(2),
                    delta: delta.round_dp(2),
                });
            }
        }
    }

    for category in store::list_categories(conn)? {
        let budget = match category.monthly_budget {
            Some(b) if !b.is_zero() => b,
            _ => continue,
        };
        let effective = budget * scale;
        let actual = breakdown
            .get(&category.name)
            .map(|b| b.total)
            .unwrap_or(Decimal::ZERO);
        if let Some(delta) = exceeds(actual, effective) {
            alerts.push(Alert {
                scope: AlertScope::Category,
                category: Some(category.name),
                budget: effective.round_dp(2),
                actual: actual.round_dp(2),
                delta: delta.round_dp(2),
            });
        }
    }

    Ok(alerts)
}
