// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, FixedExpenseTemplate};
use crate::utils::{maybe_print_json, parse_amount, parse_due_day, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
            let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
            let due_day = parse_due_day(sub.get_one::<String>("due-day").unwrap())?;
            conn.execute(
                "INSERT INTO templates(name, amount, category, due_day, is_active)
                 VALUES (?1, ?2, ?3, ?4, 1)",
                params![name, amount.to_string(), category.as_str(), due_day],
            )?;
            println!(
                "Added template '{}' ({}, {}, due day {})",
                name, amount, category, due_day
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let data = query_templates(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|t| {
                        vec![
                            t.name.clone(),
                            t.amount.to_string(),
                            t.category.to_string(),
                            t.due_day.to_string(),
                            if t.is_active { "yes".into() } else { "paused".into() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Amount", "Category", "Due", "Active"], rows)
                );
            }
        }
        Some(("pause", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            set_active(conn, name, false)?;
            println!("Paused template '{}'", name);
        }
        Some(("resume", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            set_active(conn, name, true)?;
            println!("Resumed template '{}'", name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let n = conn.execute("DELETE FROM templates WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Template '{}' not found", name));
            }
            println!("Removed template '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

pub fn query_templates(conn: &Connection) -> Result<Vec<FixedExpenseTemplate>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, category, due_day, is_active FROM templates ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, u32>(4)?,
            r.get::<_, bool>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, amount_s, cat_s, due_day, is_active) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in templates", amount_s))?;
        let category: Category = cat_s
            .parse()
            .with_context(|| format!("Invalid category '{}' in templates", cat_s))?;
        data.push(FixedExpenseTemplate {
            id,
            name,
            amount,
            category,
            due_day,
            is_active,
        });
    }
    Ok(data)
}

fn set_active(conn: &Connection, name: &str, active: bool) -> Result<()> {
    let n = conn.execute(
        "UPDATE templates SET is_active=?2 WHERE name=?1",
        params![name, active],
    )?;
    if n == 0 {
        return Err(anyhow!("Template '{}' not found", name));
    }
    Ok(())
}
