// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::month;

#[derive(Debug, Error)]
pub enum RolloverError {
    #[error(transparent)]
    Month(#[from] month::BadMonthKey),
    #[error("Rollover storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloverOutcome {
    /// Month was already in the ledger; nothing was touched.
    pub skipped: bool,
    pub expenses_added: usize,
    pub income_added: usize,
}

fn names_in(conn: &Connection, sql: &str, month: &str) -> Result<HashSet<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![month], |r| r.get::<_, String>(0))?;
    let mut names = HashSet::new();
    for row in rows {
        names.insert(row?);
    }
    Ok(names)
}

/// Materialize recurring records into `target_month`, exactly once per month.
///
/// Three sources feed a fresh month: active templates, the previous month's
/// fixed expenses, and the previous month's recurring income. The record
/// *name* is the de-duplication key, with templates taking precedence over
/// carry-forwards. Every materialized expense starts unpaid.
///
/// The ledger check is month-level: once a month is in `rollover_ledger`,
/// later visits are no-ops even if the user has deleted materialized
/// records in between. Inserts and the ledger append happen in one sqlite
/// transaction, so a failed run leaves the ledger untouched and the next
/// visit retries.
///
/// Never deletes or mutates existing records.
pub fn ensure_month_populated(
    conn: &mut Connection,
    target_month: &str,
    now: NaiveDateTime,
) -> Result<RolloverOutcome, RolloverError> {
    let previous = month::previous(target_month)?;
    let created_at = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let tx = conn.transaction()?;

    let already: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM rollover_ledger WHERE month=?1",
            params![target_month],
            |r| r.get(0),
        )
        .optional()?;
    if already.is_some() {
        return Ok(RolloverOutcome {
            skipped: true,
            ..RolloverOutcome::default()
        });
    }

    let mut expense_names = names_in(
        &tx,
        "SELECT name FROM expenses WHERE month=?1",
        target_month,
    )?;
    let mut income_names =
        names_in(&tx, "SELECT name FROM income WHERE month=?1", target_month)?;

    // Amounts stay as their stored TEXT form; a carry-forward copies the
    // string verbatim rather than round-tripping through Decimal.
    let templates: Vec<(String, String, String, u32)> = {
        let mut stmt = tx.prepare(
            "SELECT name, amount, category, due_day FROM templates WHERE is_active=1 ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, u32>(3)?,
            ))
        })?;
        rows.collect::<Result<_, _>>()?
    };

    let mut expenses_added = 0usize;
    for (name, amount, category, due_day) in &templates {
        if expense_names.contains(name) {
            continue;
        }
        tx.execute(
            "INSERT INTO expenses(name, amount, category, is_fixed, due_day, is_paid, month, created_at)
             VALUES (?1, ?2, ?3, 1, ?4, 0, ?5, ?6)",
            params![name, amount, category, due_day, target_month, created_at],
        )?;
        expense_names.insert(name.clone());
        expenses_added += 1;
    }

    let template_names: HashSet<&str> = templates.iter().map(|t| t.0.as_str()).collect();

    let prev_fixed: Vec<(String, String, String, Option<u32>)> = {
        let mut stmt = tx.prepare(
            "SELECT name, amount, category, due_day FROM expenses WHERE month=?1 AND is_fixed=1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![previous], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, Option<u32>>(3)?,
            ))
        })?;
        rows.collect::<Result<_, _>>()?
    };

    for (name, amount, category, due_day) in prev_fixed {
        // A bill that is also a template was already handled above.
        if template_names.contains(name.as_str()) || expense_names.contains(&name) {
            continue;
        }
        tx.execute(
            "INSERT INTO expenses(name, amount, category, is_fixed, due_day, is_paid, month, created_at)
             VALUES (?1, ?2, ?3, 1, ?4, 0, ?5, ?6)",
            params![name, amount, category, due_day, target_month, created_at],
        )?;
        expense_names.insert(name);
        expenses_added += 1;
    }

    let month_start = month::start_date(target_month)?.to_string();
    let prev_recurring: Vec<(String, String)> = {
        let mut stmt = tx.prepare(
            "SELECT name, amount FROM income WHERE month=?1 AND is_recurring=1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![previous], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
        rows.collect::<Result<_, _>>()?
    };

    let mut income_added = 0usize;
    for (name, amount) in prev_recurring {
        if income_names.contains(&name) {
            continue;
        }
        tx.execute(
            "INSERT INTO income(name, amount, date, is_recurring, month, created_at)
             VALUES (?1, ?2, ?3, 1, ?4, ?5)",
            params![name, amount, month_start, target_month, created_at],
        )?;
        income_names.insert(name);
        income_added += 1;
    }

    tx.execute(
        "INSERT INTO rollover_ledger(month, rolled_at) VALUES (?1, ?2)",
        params![target_month, created_at],
    )?;
    tx.commit()?;

    Ok(RolloverOutcome {
        skipped: false,
        expenses_added,
        income_added,
    })
}
