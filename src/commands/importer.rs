// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::import;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let json_flag = sub.get_flag("json");

    let report = import::import_csv_file(conn, path)?;
    if json_flag {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!(
        "Imported {} transactions ({} skipped) from {}",
        report.inserted, report.skipped, path
    );
    if !report.errors.is_empty() {
        let rows = report
            .errors
            .iter()
            .map(|e| vec![e.line.to_string(), e.message.clone()])
            .collect();
        println!("{}", pretty_table(&["Line", "Error"], rows));
    }
    Ok(())
}
