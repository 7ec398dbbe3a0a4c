// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, Income};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Good,
    Warning,
    Danger,
}

impl BudgetHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetHealth::Good => "good",
            BudgetHealth::Warning => "warning",
            BudgetHealth::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub paid_expenses: Decimal,
    pub unpaid_expenses: Decimal,
    /// Safe to spend right now, ignoring bills not yet paid.
    pub remaining_budget: Decimal,
    /// What remains once every known bill is paid.
    pub projected_remaining: Decimal,
    pub health: BudgetHealth,
}

/// Aggregate a month's records into display totals. Pure; callers re-invoke
/// after any mutation of the month's record set.
pub fn compute_summary(expenses: &[Expense], income: &[Income]) -> BudgetSummary {
    let total_income: Decimal = income.iter().map(|i| i.amount).sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
    let paid_expenses: Decimal = expenses
        .iter()
        .filter(|e| e.is_paid)
        .map(|e| e.amount)
        .sum();
    let unpaid_expenses = total_expenses - paid_expenses;
    let remaining_budget = total_income - paid_expenses;
    let projected_remaining = total_income - total_expenses;

    // With zero income and zero expenses the warning threshold is also zero,
    // so an empty month classifies as good rather than danger.
    let health = if projected_remaining < Decimal::ZERO {
        BudgetHealth::Danger
    } else if projected_remaining < total_income * Decimal::new(1, 1) {
        BudgetHealth::Warning
    } else {
        BudgetHealth::Good
    };

    BudgetSummary {
        total_income,
        total_expenses,
        paid_expenses,
        unpaid_expenses,
        remaining_budget,
        projected_remaining,
        health,
    }
}
