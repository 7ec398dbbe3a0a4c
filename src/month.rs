// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A month key is the canonical "YYYY-MM" grouping identifier. Records carry
/// it denormalized, so editing a record's date never silently moves it to
/// another month.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid month '{0}', expected YYYY-MM")]
pub struct BadMonthKey(pub String);

pub fn parse(month: &str) -> Result<(i32, u32), BadMonthKey> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 || parts[0].len() != 4 || parts[1].len() != 2 {
        return Err(BadMonthKey(month.to_string()));
    }
    let y: i32 = parts[0]
        .parse()
        .map_err(|_| BadMonthKey(month.to_string()))?;
    let m: u32 = parts[1]
        .parse()
        .map_err(|_| BadMonthKey(month.to_string()))?;
    if !(1..=12).contains(&m) {
        return Err(BadMonthKey(month.to_string()));
    }
    Ok((y, m))
}

pub fn key_for(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn previous(month: &str) -> Result<String, BadMonthKey> {
    let (y, m) = parse(month)?;
    if m == 1 {
        Ok(format!("{:04}-12", y - 1))
    } else {
        Ok(format!("{:04}-{:02}", y, m - 1))
    }
}

pub fn next(month: &str) -> Result<String, BadMonthKey> {
    let (y, m) = parse(month)?;
    if m == 12 {
        Ok(format!("{:04}-01", y + 1))
    } else {
        Ok(format!("{:04}-{:02}", y, m + 1))
    }
}

pub fn start_date(month: &str) -> Result<NaiveDate, BadMonthKey> {
    let (y, m) = parse(month)?;
    NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| BadMonthKey(month.to_string()))
}

pub fn end_date(month: &str) -> Result<NaiveDate, BadMonthKey> {
    let (y, m) = parse(month)?;
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(BadMonthKey(month.to_string())),
    };
    NaiveDate::from_ymd_opt(y, m, last_day).ok_or_else(|| BadMonthKey(month.to_string()))
}
