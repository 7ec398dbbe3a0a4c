// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::{
    maybe_print_json, month_arg, parse_amount, parse_date, parse_due_day, pretty_table,
};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("unpay", sub)) => unpay(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let fixed = sub.get_flag("fixed");
    let due_day = sub
        .get_one::<String>("due-day")
        .map(|s| parse_due_day(s))
        .transpose()?;

    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, due_day, is_paid, month)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
        params![
            name,
            amount.to_string(),
            category.as_str(),
            fixed,
            due_day,
            month
        ],
    )?;
    println!("Added expense '{}' ({}) for {}", name, amount, month);
    Ok(())
}

fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s.trim())?,
        None => chrono::Utc::now().date_naive(),
    };
    let n = conn.execute(
        "UPDATE expenses SET is_paid=1, paid_date=?2 WHERE id=?1",
        params![id, date.to_string()],
    )?;
    if n == 0 {
        return Err(anyhow!("Expense {} not found", id));
    }
    println!("Marked expense {} paid on {}", id, date);
    Ok(())
}

fn unpay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "UPDATE expenses SET is_paid=0, paid_date=NULL WHERE id=?1",
        params![id],
    )?;
    if n == 0 {
        return Err(anyhow!("Expense {} not found", id));
    }
    println!("Marked expense {} unpaid", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("Expense {} not found", id));
    }
    println!("Removed expense {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.month.clone(),
                    r.name.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.fixed.clone(),
                    r.due_day.clone(),
                    r.paid.clone(),
                    r.paid_date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Month", "Name", "Amount", "Category", "Fixed", "Due", "Paid", "Paid on"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub month: String,
    pub name: String,
    pub amount: String,
    pub category: String,
    pub fixed: String,
    pub due_day: String,
    pub paid: String,
    pub paid_date: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let mut sql = String::from(
        "SELECT id, month, name, amount, category, is_fixed, due_day, is_paid, paid_date
         FROM expenses WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND month=?");
        params_vec.push(month.trim().into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    if sub.get_flag("unpaid") {
        sql.push_str(" AND is_paid=0");
    }
    sql.push_str(" ORDER BY month DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

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
        let category: String = r.get(4)?;
        let is_fixed: bool = r.get(5)?;
        let due_day: Option<u32> = r.get(6)?;
        let is_paid: bool = r.get(7)?;
        let paid_date: Option<String> = r.get(8)?;
        data.push(ExpenseRow {
            id,
            month,
            name,
            amount,
            category,
            fixed: if is_fixed { "yes".into() } else { "".into() },
            due_day: due_day.map(|d| d.to_string()).unwrap_or_default(),
            paid: if is_paid { "yes".into() } else { "no".into() },
            paid_date: paid_date.unwrap_or_default(),
        });
    }
    Ok(data)
}
