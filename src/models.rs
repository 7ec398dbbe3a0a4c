// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bills,
    Food,
    Transport,
    Shopping,
    Entertainment,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bills => "bills",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bills" => Ok(Category::Bills),
            "food" => Ok(Category::Food),
            "transport" => Ok(Category::Transport),
            "shopping" => Ok(Category::Shopping),
            "entertainment" => Ok(Category::Entertainment),
            "other" => Ok(Category::Other),
            _ => Err(anyhow::anyhow!("Unknown category '{}'", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
    pub is_fixed: bool,
    pub due_day: Option<u32>,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub month: String, // YYYY-MM
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub month: String, // YYYY-MM
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpenseTemplate {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    pub category: Category,
    pub due_day: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub currency_code: String,
    pub month_start_day: u32,
}
