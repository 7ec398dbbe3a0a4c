// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::summary::compute_summary;
use crate::utils::{expenses_for_month, income_for_month, month_arg};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => export_month(conn, sub),
        _ => Ok(()),
    }
}

fn export_month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let month = month_arg(sub)?;

    let expenses = expenses_for_month(conn, &month)?;
    let income = income_for_month(conn, &month)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "kind", "name", "amount", "category", "due_day", "paid", "paid_date", "date",
            ])?;
            for e in &expenses {
                wtr.write_record([
                    "expense".to_string(),
                    e.name.clone(),
                    e.amount.to_string(),
                    e.category.to_string(),
                    e.due_day.map(|d| d.to_string()).unwrap_or_default(),
                    if e.is_paid { "yes".into() } else { "no".into() },
                    e.paid_date.map(|d| d.to_string()).unwrap_or_default(),
                    String::new(),
                ])?;
            }
            for i in &income {
                wtr.write_record([
                    "income".to_string(),
                    i.name.clone(),
                    i.amount.to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    i.date.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let doc = json!({
                "month": month,
                "expenses": expenses,
                "income": income,
                "summary": compute_summary(&expenses, &income),
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        _ => {
            return Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported {} to {}", month, out);
    Ok(())
}
