// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::month;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s.trim())?,
        None => chrono::Utc::now().date_naive(),
    };
    let recurring = sub.get_flag("recurring");
    // Owning month is fixed at creation; editing the date later does not
    // move the record to another month.
    let month = month::key_for(date);

    conn.execute(
        "INSERT INTO income(name, amount, date, is_recurring, month)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, amount.to_string(), date.to_string(), recurring, month],
    )?;
    println!("Recorded income '{}' ({}) on {}", name, amount, date);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM income WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Income {} not found", id));
    }
    println!("Removed income {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub id: i64,
    pub month: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub recurring: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut sql = String::from(
        "SELECT id, month, name, amount, date, is_recurring FROM income WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND month=?");
        params_vec.push(month.trim().into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let month: String = r.get(1)?;
        let name: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let date: String = r.get(4)?;
        let is_recurring: bool = r.get(5)?;
        data.push(IncomeRow {
            id,
            month,
            name,
            amount,
            date,
            recurring: if is_recurring { "yes".into() } else { "".into() },
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.month.clone(),
                    r.name.clone(),
                    r.amount.clone(),
                    r.date.clone(),
                    r.recurring.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Name", "Amount", "Date", "Recurring"], rows)
        );
    }
    Ok(())
}
