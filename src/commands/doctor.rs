// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Paid flag out of sync with paid date
    let mut stmt = conn.prepare(
        "SELECT id, name FROM expenses
         WHERE (is_paid=1 AND paid_date IS NULL) OR (is_paid=0 AND paid_date IS NOT NULL)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        rows.push(vec!["paid_date_mismatch".into(), format!("#{} {}", id, name)]);
    }

    // 2) Fixed expenses sharing a name within a month. Rollover de-duplicates
    //    by name, so only one of these will ever carry forward.
    let mut stmt2 = conn.prepare(
        "SELECT month, name, COUNT(*) FROM expenses WHERE is_fixed=1
         GROUP BY month, name HAVING COUNT(*) > 1",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let month: String = r.get(0)?;
        let name: String = r.get(1)?;
        let n: i64 = r.get(2)?;
        rows.push(vec![
            "duplicate_fixed_name".into(),
            format!("{} '{}' x{}", month, name, n),
        ]);
    }

    // 3) Due day on a non-fixed expense is never consulted
    let mut stmt3 =
        conn.prepare("SELECT id, name FROM expenses WHERE is_fixed=0 AND due_day IS NOT NULL")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        rows.push(vec![
            "due_day_on_variable_expense".into(),
            format!("#{} {}", id, name),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
