// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rollover::ensure_month_populated;
use crate::utils::month_arg;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(m)?;
    let now = chrono::Utc::now().naive_utc();
    let outcome = ensure_month_populated(conn, &month, now)?;
    if outcome.skipped {
        println!("Month {} already materialized; nothing to do", month);
    } else {
        println!(
            "Materialized {} expense(s) and {} income record(s) for {}",
            outcome.expenses_added, outcome.income_added, month
        );
    }
    Ok(())
}
