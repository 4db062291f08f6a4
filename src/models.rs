// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
    pub monthly_budget: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub global_monthly_budget: Option<Decimal>,
}

/// Per-category slice of a [`Summary`]. `percentage` is the share of the
/// period's overall total, not of the categorized subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total: Decimal,
    pub count: i64,
    pub percentage: Decimal,
}

/// Aggregated spending snapshot for a period. Transactions without a
/// category contribute to `total` and `count` but not to `by_category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total: Decimal,
    pub count: i64,
    pub average: Decimal,
    pub by_category: BTreeMap<String, CategoryBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertScope {
    Global,
    Category,
}

/// Budget-overrun notice, derived on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub scope: AlertScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub budget: Decimal,
    pub actual: Decimal,
    pub delta: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}
