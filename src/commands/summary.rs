// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::month;
use crate::rollover::ensure_month_populated;
use crate::summary::compute_summary;
use crate::utils::{
    expenses_for_month, fmt_money, get_currency_code, income_for_month, maybe_print_json,
    month_arg, pretty_table,
};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

/// The dashboard: materialize the month first, then aggregate whatever the
/// store now holds for it.
pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let month = month_arg(m)?;

    ensure_month_populated(conn, &month, chrono::Utc::now().naive_utc())?;

    let expenses = expenses_for_month(conn, &month)?;
    let income = income_for_month(conn, &month)?;
    let summary = compute_summary(&expenses, &income);

    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    let ccy = get_currency_code(conn)?;
    println!("Budget for {} [{}]", month, summary.health.as_str());
    let rows = vec![
        vec!["Income".into(), fmt_money(&summary.total_income, &ccy)],
        vec!["Expenses".into(), fmt_money(&summary.total_expenses, &ccy)],
        vec!["Paid".into(), fmt_money(&summary.paid_expenses, &ccy)],
        vec![
            "Pending bills".into(),
            fmt_money(&summary.unpaid_expenses, &ccy),
        ],
        vec![
            "Available to spend".into(),
            fmt_money(&summary.remaining_budget, &ccy),
        ],
        vec![
            "After all bills".into(),
            fmt_money(&summary.projected_remaining, &ccy),
        ],
    ];
    println!("{}", pretty_table(&["", ""], rows));

    let mut unpaid: Vec<_> = expenses.iter().filter(|e| !e.is_paid).collect();
    if unpaid.is_empty() {
        println!("All bills paid");
        return Ok(());
    }
    unpaid.sort_by_key(|e| (e.due_day.is_none(), e.due_day, e.id));
    // A due day past the month's end (e.g. 31 in February) falls on the last day.
    let month_end = month::end_date(&month)?;
    let rows: Vec<Vec<String>> = unpaid
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.name.clone(),
                fmt_money(&e.amount, &ccy),
                e.due_day
                    .and_then(|d| month_end.with_day(d.min(month_end.day())))
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Bill", "Amount", "Due"], rows));
    Ok(())
}
