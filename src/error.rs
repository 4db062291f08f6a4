// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Contract violations by the caller, as opposed to validation or
/// business outcomes: an empty month is a zero-valued summary, but a
/// thirteenth month is one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("month {0} is out of range, expected 1-12")]
    MonthOutOfRange(u32),
    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
    #[error("period width must be at least 1 month")]
    EmptyPeriod,
}
