// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::{cli, commands::settings, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    billfold::db::init_schema(&mut conn).unwrap();
    conn
}

fn settings_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("settings", sub)) => sub.clone(),
        _ => panic!("no settings subcommand"),
    }
}

#[test]
fn absent_settings_read_as_defaults() {
    let conn = setup();
    let s = utils::get_settings(&conn).unwrap();
    assert_eq!(s.currency_code, "USD");
    assert_eq!(s.month_start_day, 1);
}

#[test]
fn set_currency_uppercases_and_persists() {
    let conn = setup();
    let m = settings_matches(&["billfold", "settings", "set-currency", "--code", "eur"]);
    settings::handle(&conn, &m).unwrap();
    assert_eq!(utils::get_currency_code(&conn).unwrap(), "EUR");
}

#[test]
fn set_currency_rejects_garbage() {
    let conn = setup();
    let m = settings_matches(&["billfold", "settings", "set-currency", "--code", "US$"]);
    assert!(settings::handle(&conn, &m).is_err());
}

#[test]
fn month_start_day_round_trips() {
    let conn = setup();
    let m = settings_matches(&["billfold", "settings", "set-month-start", "--day", "15"]);
    settings::handle(&conn, &m).unwrap();
    assert_eq!(utils::get_month_start_day(&conn).unwrap(), 15);

    let m = settings_matches(&["billfold", "settings", "set-month-start", "--day", "40"]);
    assert!(settings::handle(&conn, &m).is_err());
}
