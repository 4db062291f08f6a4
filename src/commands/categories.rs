// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").map(|s| s.as_str());
            let budget = sub
                .get_one::<String>("budget")
                .map(|s| parse_decimal(s))
                .transpose()?;
            let category = store::create_category(conn, name, color, budget)?;
            println!("Added category '{}'", category.name);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let categories = store::list_categories(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.color.clone().unwrap_or_default(),
                            c.monthly_budget
                                .as_ref()
                                .map(fmt_amount)
                                .unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Color", "Monthly budget"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::category_id_by_name(conn, name)?;
            store::delete_category(conn, id)?;
            println!("Removed category '{}'", name);
        }
        Some(("set-budget", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let id = store::category_id_by_name(conn, name)?;
            store::set_category_budget(conn, id, Some(amount))?;
            println!("Budget for '{}' set to {}", name, fmt_amount(&amount));
        }
        Some(("clear-budget", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = store::category_id_by_name(conn, name)?;
            store::set_category_budget(conn, id, None)?;
            println!("Budget for '{}' cleared", name);
        }
        Some(("set-color", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let id = store::category_id_by_name(conn, name)?;
            store::set_category_color(conn, id, Some(color))?;
            println!("Color for '{}' set to {}", name, color);
        }
        _ => {}
    }
    Ok(())
}
