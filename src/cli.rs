// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("centime")
        .about("Centime: personal finance tracking, budget insights, and overrun alerts")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(insights_cmd())
        .subcommand(alerts_cmd())
        .subcommand(import_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn year_month_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("year")
            .long("year")
            .required(true)
            .value_parser(value_parser!(i32))
            .help("Calendar year, e.g. 2025"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .required(true)
            .value_parser(value_parser!(u32))
            .help("Month 1-12"),
    )
}

fn months_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("months")
            .long("months")
            .value_parser(value_parser!(u32))
            .default_value("1")
            .help("Period width in months ending at --year/--month (e.g. 1, 3, 12)"),
    )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage spending categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("color").long("color").help("Hex color, e.g. #818cf8"))
                .arg(Arg::new("budget").long("budget").help("Monthly budget amount")),
        )
        .subcommand(json_flags(Command::new("list").about("List categories")))
        .subcommand(
            Command::new("rm")
                .about("Remove a category (its transactions become uncategorized)")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("set-budget")
                .about("Set a category's monthly budget")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("amount").required(true)),
        )
        .subcommand(
            Command::new("clear-budget")
                .about("Remove a category's monthly budget")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("set-color")
                .about("Set a category's display color")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("color").required(true).help("Hex color, e.g. #818cf8")),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction (negative amounts are refunds/credits)")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").help("Category name")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
                .arg(Arg::new("month").long("month").help("Restrict to a month YYYY-MM"))
                .arg(Arg::new("category").long("category").help("Category name"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("search")
                .about("Search transaction descriptions")
                .arg(Arg::new("text").required(true))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction by id")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(i64))),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Manage the global monthly budget")
        .subcommand(
            Command::new("set")
                .about("Set the global monthly budget")
                .arg(Arg::new("amount").required(true)),
        )
        .subcommand(Command::new("show").about("Show the global monthly budget"))
        .subcommand(Command::new("clear").about("Unset the global monthly budget"))
}

fn insights_cmd() -> Command {
    Command::new("insights")
        .about("Spending summaries and trends")
        .subcommand(json_flags(year_month_args(
            Command::new("summary").about("Monthly summary with per-category breakdown"),
        )))
        .subcommand(months_arg(year_month_args(
            Command::new("total")
                .about("Total spend for a period, optionally per category")
                .arg(Arg::new("category").long("category").help("Category name"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as pretty JSON"),
                ),
        )))
        .subcommand(json_flags(months_arg(year_month_args(
            Command::new("breakdown").about("Per-category totals and shares for a period"),
        ))))
        .subcommand(months_arg(year_month_args(
            Command::new("trend").about("Compare a period against the one before it"),
        )))
}

fn alerts_cmd() -> Command {
    json_flags(months_arg(year_month_args(
        Command::new("alerts").about("Budget-overrun alerts for a period"),
    )))
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Bulk import from CSV")
        .subcommand(
            Command::new("transactions")
                .about("Import transactions from a CSV with date,description,amount[,category]")
                .arg(Arg::new("path").long("path").required(true))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the import report as pretty JSON"),
                ),
        )
}
