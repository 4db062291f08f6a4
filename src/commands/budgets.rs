// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_amount, parse_decimal};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            store::set_global_budget(conn, amount)?;
            println!("Global monthly budget set to {}", fmt_amount(&amount));
        }
        Some(("show", _)) => match store::global_budget(conn)? {
            Some(amount) => println!("Global monthly budget: {}", fmt_amount(&amount)),
            None => println!("No global monthly budget set"),
        },
        Some(("clear", _)) => {
            store::clear_global_budget(conn)?;
            println!("Global monthly budget cleared");
        }
        _ => {}
    }
    Ok(())
}
