// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn today_arg() -> Arg {
    opt("today", "Override today's date (YYYY-MM-DD)")
}

fn fund_state_args(cmd: Command) -> Command {
    cmd.arg(req("balance", "Current fund balance"))
        .arg(req("monthly", "Current monthly contribution"))
        .arg(opt("initial", "Initial balance").default_value("0"))
        .arg(opt("last", "Date of the last monthly addition"))
        .arg(req("contract-start", "Contract start date"))
        .arg(today_arg())
}

pub fn build_cli() -> Command {
    Command::new("fundledger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Period proration, recurring accrual and monthly reserve ledger")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a config.json overriding the platform default"),
        )
        .subcommand(json_flags(
            Command::new("split")
                .about("Split one transaction across the months of its period")
                .arg(
                    opt("id", "Transaction id")
                        .default_value("1")
                        .value_parser(value_parser!(i64)),
                )
                .arg(req("amount", "Full amount"))
                .arg(opt("date", "Transaction date"))
                .arg(opt("period-start", "Period start (inclusive)"))
                .arg(opt("period-end", "Period end (inclusive)"))
                .arg(opt("window-start", "Restrict to months from this date"))
                .arg(opt("window-end", "Restrict to months up to this date")),
        ))
        .subcommand(json_flags(
            Command::new("accrue")
                .about("Total accrued by a monthly amount between two dates")
                .arg(req("monthly", "Monthly amount"))
                .arg(req("start", "Anniversary start date"))
                .arg(req("as-of", "As-of date (inclusive)")),
        ))
        .subcommand(json_flags(
            Command::new("ledger")
                .about("Twelve-month ledger with running reserve")
                .arg(req("path", "Transactions CSV"))
                .arg(opt("suppliers", "Suppliers CSV (id,name)"))
                .arg(opt("start-month", "First month of the window (YYYY-MM)"))
                .arg(
                    opt("fiscal-year", "Fiscal year starting at the configured month")
                        .value_parser(value_parser!(i32)),
                )
                .arg(opt(
                    "contract-start",
                    "Contract start; shows the contract year containing today",
                ))
                .group(ArgGroup::new("window").args(["start-month", "fiscal-year", "contract-start"]))
                .arg(opt("budget", "Recurring monthly budget income"))
                .arg(opt("fund-monthly", "Fund monthly contribution"))
                .arg(opt("fund-initial", "Fund initial balance").default_value("0"))
                .arg(opt("fund-start", "Fund contribution anchor date"))
                .arg(opt("month", "Show a single month (YYYY-MM) instead of the grid"))
                .arg(today_arg()),
        ))
        .subcommand(
            Command::new("fund")
                .about("Reserve fund policies")
                .subcommand(json_flags(
                    Command::new("create")
                        .about("Create a fund, backfilling contributions")
                        .arg(req("monthly", "Monthly contribution"))
                        .arg(opt("initial", "Initial balance").default_value("0"))
                        .arg(req("contract-start", "Contract start date"))
                        .arg(opt("period-end", "End of the viewed past period"))
                        .arg(
                            opt("scope", "through-period-end | through-today")
                                .requires("period-end"),
                        )
                        .arg(today_arg()),
                ))
                .subcommand(json_flags(fund_state_args(
                    Command::new("update")
                        .about("Change the fund with an explicit scope")
                        .arg(req("scope", "from_start | from_this_month | only_this_month"))
                        .arg(req("amount", "New monthly amount, or one-time delta")),
                )))
                .subcommand(json_flags(fund_state_args(
                    Command::new("catch-up").about("Apply contributions due since the last addition"),
                ))),
        )
        .subcommand(
            Command::new("validate")
                .about("Report transactions violating the period precondition")
                .arg(req("path", "Transactions CSV")),
        )
}
