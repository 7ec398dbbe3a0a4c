// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::rollover::{ensure_month_populated, RolloverError};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    billfold::db::init_schema(&mut conn).unwrap();
    conn
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn add_template(conn: &Connection, name: &str, amount: &str, due_day: u32) {
    conn.execute(
        "INSERT INTO templates(name, amount, category, due_day, is_active) VALUES (?1,?2,'bills',?3,1)",
        params![name, amount, due_day],
    )
    .unwrap();
}

fn add_fixed_expense(conn: &Connection, month: &str, name: &str, amount: &str, paid: bool) {
    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, due_day, is_paid, paid_date, month)
         VALUES (?1,?2,'bills',1,5,?3,?4,?5)",
        params![
            name,
            amount,
            paid,
            if paid { Some(format!("{}-10", month)) } else { None },
            month
        ],
    )
    .unwrap();
}

fn add_income(conn: &Connection, month: &str, name: &str, amount: &str, recurring: bool) {
    conn.execute(
        "INSERT INTO income(name, amount, date, is_recurring, month) VALUES (?1,?2,?3,?4,?5)",
        params![name, amount, format!("{}-25", month), recurring, month],
    )
    .unwrap();
}

fn expense_count(conn: &Connection, month: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM expenses WHERE month=?1",
        params![month],
        |r| r.get(0),
    )
    .unwrap()
}

fn ledger_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM rollover_ledger", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn templates_materialize_unpaid_with_their_fields() {
    let mut conn = setup();
    add_template(&conn, "Rent", "1200", 1);
    add_template(&conn, "Internet", "45.50", 15);

    let outcome = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert!(!outcome.skipped);
    assert_eq!(outcome.expenses_added, 2);
    assert_eq!(expense_count(&conn, "2025-08"), 2);

    let (amount, category, due_day, is_fixed, is_paid, paid_date): (
        String,
        String,
        u32,
        bool,
        bool,
        Option<String>,
    ) = conn
        .query_row(
            "SELECT amount, category, due_day, is_fixed, is_paid, paid_date
             FROM expenses WHERE month='2025-08' AND name='Internet'",
            [],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(amount, "45.50");
    assert_eq!(category, "bills");
    assert_eq!(due_day, 15);
    assert!(is_fixed);
    assert!(!is_paid);
    assert_eq!(paid_date, None);
}

#[test]
fn rollover_is_idempotent() {
    let mut conn = setup();
    add_template(&conn, "Rent", "1200", 1);

    let first = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert_eq!(first.expenses_added, 1);
    let second = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert!(second.skipped);
    assert_eq!(second.expenses_added, 0);
    assert_eq!(expense_count(&conn, "2025-08"), 1);
    assert_eq!(ledger_count(&conn), 1);
}

#[test]
fn deleted_record_is_not_regenerated() {
    let mut conn = setup();
    add_template(&conn, "Rent", "1200", 1);
    ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    conn.execute("DELETE FROM expenses WHERE month='2025-08'", [])
        .unwrap();

    let outcome = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert!(outcome.skipped);
    assert_eq!(expense_count(&conn, "2025-08"), 0);
}

#[test]
fn carried_forward_bill_starts_unpaid() {
    let mut conn = setup();
    add_fixed_expense(&conn, "2025-07", "Rent", "1200", true);

    ensure_month_populated(&mut conn, "2025-08", now()).unwrap();

    let (is_paid, paid_date): (bool, Option<String>) = conn
        .query_row(
            "SELECT is_paid, paid_date FROM expenses WHERE month='2025-08' AND name='Rent'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert!(!is_paid);
    assert_eq!(paid_date, None);
}

#[test]
fn template_takes_precedence_over_carry_forward() {
    let mut conn = setup();
    add_template(&conn, "Rent", "1300", 1);
    add_fixed_expense(&conn, "2025-07", "Rent", "1200", false);

    ensure_month_populated(&mut conn, "2025-08", now()).unwrap();

    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM expenses WHERE month='2025-08' AND name='Rent'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
    let amount: String = conn
        .query_row(
            "SELECT amount FROM expenses WHERE month='2025-08' AND name='Rent'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(amount, "1300");
}

#[test]
fn variable_expenses_do_not_carry_forward() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, is_paid, month)
         VALUES ('Coffee','4.50','food',0,1,'2025-07')",
        [],
    )
    .unwrap();

    ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert_eq!(expense_count(&conn, "2025-08"), 0);
}

#[test]
fn recurring_income_is_dated_at_month_start() {
    let mut conn = setup();
    add_income(&conn, "2025-07", "Salary", "3000", true);
    add_income(&conn, "2025-07", "Bonus", "500", false);

    let outcome = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert_eq!(outcome.income_added, 1);

    let (date, recurring): (String, bool) = conn
        .query_row(
            "SELECT date, is_recurring FROM income WHERE month='2025-08' AND name='Salary'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(date, "2025-08-01");
    assert!(recurring);

    let bonus: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM income WHERE month='2025-08' AND name='Bonus'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(bonus, 0);
}

#[test]
fn existing_names_are_not_duplicated() {
    let mut conn = setup();
    add_template(&conn, "Rent", "1300", 1);
    // User already entered a Rent bill for August by hand.
    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, is_paid, month)
         VALUES ('Rent','1250','bills',0,0,'2025-08')",
        [],
    )
    .unwrap();

    let outcome = ensure_month_populated(&mut conn, "2025-08", now()).unwrap();
    assert_eq!(outcome.expenses_added, 0);
    assert_eq!(expense_count(&conn, "2025-08"), 1);
}

#[test]
fn carry_forward_chains_across_months() {
    let mut conn = setup();
    add_fixed_expense(&conn, "2025-06", "Gym", "30", false);

    ensure_month_populated(&mut conn, "2025-07", now()).unwrap();
    ensure_month_populated(&mut conn, "2025-08", now()).unwrap();

    assert_eq!(expense_count(&conn, "2025-07"), 1);
    assert_eq!(expense_count(&conn, "2025-08"), 1);
    assert_eq!(ledger_count(&conn), 2);
}

#[test]
fn previous_month_crosses_year_boundary() {
    let mut conn = setup();
    add_fixed_expense(&conn, "2024-12", "Rent", "1200", false);

    ensure_month_populated(&mut conn, "2025-01", now()).unwrap();
    assert_eq!(expense_count(&conn, "2025-01"), 1);
}

#[test]
fn bad_month_key_leaves_ledger_untouched() {
    let mut conn = setup();
    let err = ensure_month_populated(&mut conn, "2025-13", now()).unwrap_err();
    assert!(matches!(err, RolloverError::Month(_)));
    assert_eq!(ledger_count(&conn), 0);

    let err = ensure_month_populated(&mut conn, "august", now()).unwrap_err();
    assert!(matches!(err, RolloverError::Month(_)));
    assert_eq!(ledger_count(&conn), 0);
}
