// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

const CATEGORIES: [&str; 6] = [
    "bills",
    "food",
    "transport",
    "shopping",
    "entertainment",
    "other",
];

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .help("Print as pretty JSON")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .help("Print as JSON lines")
            .action(ArgAction::SetTrue),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month, defaults to the current one")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn name_arg() -> Arg {
    Arg::new("name").long("name").required(true)
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(true)
        .allow_negative_numbers(true)
}

pub fn build_cli() -> Command {
    Command::new("billfold")
        .about("Monthly bills, recurring income, and budget health")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("expense")
                .about("Manage a month's expenses")
                .subcommand(
                    Command::new("add")
                        .about("Add an expense to a month")
                        .arg(month_arg())
                        .arg(name_arg())
                        .arg(amount_arg())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(CATEGORIES)
                                .default_value("other"),
                        )
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_name("1-31")
                                .help("Day of month the bill is due"),
                        )
                        .arg(
                            Arg::new("fixed")
                                .long("fixed")
                                .help("Recurring fixed expense; carried into the next month")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List expenses"))
                        .arg(month_arg())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(CATEGORIES),
                        )
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .help("Only bills not yet paid")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(
                    Command::new("pay")
                        .about("Mark an expense paid")
                        .arg(id_arg())
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Payment date, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("unpay")
                        .about("Mark an expense unpaid again")
                        .arg(id_arg()),
                )
                .subcommand(Command::new("rm").about("Remove an expense").arg(id_arg())),
        )
        .subcommand(
            Command::new("income")
                .about("Manage income entries")
                .subcommand(
                    Command::new("add")
                        .about("Record income")
                        .arg(name_arg())
                        .arg(amount_arg())
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Defaults to today; decides the owning month"),
                        )
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .help("Carried into the next month on rollover")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    json_flags(Command::new("list").about("List income")).arg(month_arg()),
                )
                .subcommand(Command::new("rm").about("Remove an income entry").arg(id_arg())),
        )
        .subcommand(
            Command::new("template")
                .about("Manage fixed-expense templates")
                .subcommand(
                    Command::new("add")
                        .about("Add a recurring bill template")
                        .arg(name_arg())
                        .arg(amount_arg())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_parser(CATEGORIES)
                                .default_value("bills"),
                        )
                        .arg(
                            Arg::new("due-day")
                                .long("due-day")
                                .value_name("1-31")
                                .default_value("1"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List templates")))
                .subcommand(
                    Command::new("pause")
                        .about("Stop materializing this template")
                        .arg(name_arg()),
                )
                .subcommand(
                    Command::new("resume")
                        .about("Materialize this template again")
                        .arg(name_arg()),
                )
                .subcommand(Command::new("rm").about("Remove a template").arg(name_arg())),
        )
        .subcommand(
            Command::new("rollover")
                .about("Materialize recurring records into a month (idempotent)")
                .arg(month_arg()),
        )
        .subcommand(
            json_flags(
                Command::new("summary")
                    .about("Materialize the month, then show totals and health"),
            )
            .arg(month_arg()),
        )
        .subcommand(
            Command::new("settings")
                .about("User settings")
                .subcommand(
                    Command::new("set-currency")
                        .about("Currency code used for display")
                        .arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("set-month-start")
                        .about("Preferred first day of the month (display only)")
                        .arg(Arg::new("day").long("day").required(true)),
                )
                .subcommand(Command::new("show").about("Show current settings")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("month")
                        .about("Export a month's records")
                        .arg(month_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .help("csv or json")
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for inconsistencies"))
}
