// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    get_settings, pretty_table, set_currency_code, set_month_start_day,
};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("code").unwrap().trim().to_uppercase();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}'", ccy));
            }
            set_currency_code(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        Some(("set-month-start", sub)) => {
            let raw = sub.get_one::<String>("day").unwrap();
            let day: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid day '{}'", raw))?;
            if !(1..=31).contains(&day) {
                return Err(anyhow!("Month start day {} out of range 1-31", day));
            }
            set_month_start_day(conn, day)?;
            println!("Month start day set to {}", day);
        }
        Some(("show", _)) => {
            let settings = get_settings(conn)?;
            let rows = vec![
                vec!["currency_code".into(), settings.currency_code],
                vec![
                    "month_start_day".into(),
                    settings.month_start_day.to_string(),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
