// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Category, Expense, Income, UserSettings};
use crate::month;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    month::parse(s)?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are magnitudes everywhere in the schema; signs live in the
/// expense/income split, not in the numbers.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() {
        return Err(anyhow::anyhow!("Amount '{}' must not be negative", s));
    }
    Ok(d)
}

pub fn parse_due_day(s: &str) -> Result<u32> {
    let day: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid due day '{}'", s))?;
    if !(1..=31).contains(&day) {
        return Err(anyhow::anyhow!("Due day {} out of range 1-31", day));
    }
    Ok(day)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Month selected by --month, defaulting to the current calendar month.
pub fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(s) => parse_month(s.trim()),
        None => Ok(month::key_for(chrono::Utc::now().date_naive())),
    }
}

// User settings: key/value rows, absent keys read as defaults. Only the
// settings command ever writes them.
pub fn get_currency_code(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='currency_code'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| "USD".to_string()))
}

pub fn set_currency_code(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency_code', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

pub fn get_month_start_day(conn: &Connection) -> Result<u32> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='month_start_day'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => s
            .parse::<u32>()
            .with_context(|| format!("Invalid month_start_day '{}' in settings", s)),
        None => Ok(1),
    }
}

pub fn set_month_start_day(conn: &Connection, day: u32) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('month_start_day', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![day.to_string()],
    )?;
    Ok(())
}

pub fn get_settings(conn: &Connection) -> Result<UserSettings> {
    Ok(UserSettings {
        currency_code: get_currency_code(conn)?,
        month_start_day: get_month_start_day(conn)?,
    })
}

fn expense_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, String, String, String, bool, Option<u32>, bool, Option<String>, String)> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

pub fn expenses_for_month(conn: &Connection, month: &str) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, category, is_fixed, due_day, is_paid, paid_date, month
         FROM expenses WHERE month=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![month], expense_from_row)?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, amount_s, cat_s, is_fixed, due_day, is_paid, paid_s, month) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in expenses", amount_s))?;
        let category: Category = cat_s
            .parse()
            .with_context(|| format!("Invalid category '{}' in expenses", cat_s))?;
        let paid_date = match paid_s {
            Some(s) => Some(parse_date(&s)?),
            None => None,
        };
        data.push(Expense {
            id,
            name,
            amount,
            category,
            is_fixed,
            due_day,
            is_paid,
            paid_date,
            month,
        });
    }
    Ok(data)
}

pub fn income_for_month(conn: &Connection, month: &str) -> Result<Vec<Income>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, date, is_recurring, month
         FROM income WHERE month=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![month], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, bool>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, amount_s, date_s, is_recurring, month) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in income", amount_s))?;
        let date = parse_date(&date_s)?;
        data.push(Income {
            id,
            name,
            amount,
            date,
            is_recurring,
            month,
        });
    }
    Ok(data)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
