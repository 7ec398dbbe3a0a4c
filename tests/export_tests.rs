// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billfold::{cli, commands::exporter};
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    billfold::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, due_day, is_paid, paid_date, month)
         VALUES ('Rent','1200','bills',1,1,1,'2025-08-01','2025-08')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(name, amount, category, is_fixed, is_paid, month)
         VALUES ('Groceries','210.40','food',0,0,'2025-08')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO income(name, amount, date, is_recurring, month)
         VALUES ('Salary','3000','2025-08-01',1,'2025-08')",
        [],
    )
    .unwrap();
    conn
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("export", sub)) => sub.clone(),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn csv_export_writes_both_record_kinds() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("august.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let m = export_matches(&[
        "billfold", "export", "month", "--month", "2025-08", "--out", &out_str,
    ]);
    exporter::handle(&conn, &m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "kind,name,amount,category,due_day,paid,paid_date,date"
    );
    assert_eq!(lines[1], "expense,Rent,1200,bills,1,yes,2025-08-01,");
    assert_eq!(lines[2], "expense,Groceries,210.40,food,,no,,");
    assert_eq!(lines[3], "income,Salary,3000,,,,,2025-08-01");
}

#[test]
fn json_export_includes_the_summary() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("august.json");
    let out_str = out_path.to_string_lossy().to_string();

    let m = export_matches(&[
        "billfold",
        "export",
        "month",
        "--month",
        "2025-08",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    exporter::handle(&conn, &m).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["month"], "2025-08");
    assert_eq!(parsed["expenses"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["income"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["summary"]["total_income"], "3000");
    assert_eq!(parsed["summary"]["total_expenses"], "1410.40");
    assert_eq!(parsed["summary"]["paid_expenses"], "1200");
    assert_eq!(parsed["summary"]["health"], "good");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("august.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let m = export_matches(&[
        "billfold",
        "export",
        "month",
        "--month",
        "2025-08",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    assert!(exporter::handle(&conn, &m).is_err());
    assert!(!out_path.exists());
}
