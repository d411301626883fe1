use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lease::cash_flow::MonthlyCashFlow;
use crate::types::Money;

/// Month in which cumulative rent first covers the upfront investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payback {
    Recovered { month: u32 },
    /// Not recovered within the term; never extrapolated past it
    Unresolved { term_months: u32 },
}

impl Payback {
    pub fn month(&self) -> Option<u32> {
        match self {
            Payback::Recovered { month } => Some(*month),
            Payback::Unresolved { .. } => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Payback::Recovered { .. })
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Recovered { month } => write!(f, "{month}"),
            Payback::Unresolved { term_months } => write!(f, ">{term_months}"),
        }
    }
}

/// Walk the rent roll from a balance of `-upfront_cost` until it reaches zero.
pub fn find_payback(
    upfront_cost: Money,
    flows: &[MonthlyCashFlow],
    term_months: u32,
) -> Payback {
    let mut balance = -upfront_cost;
    for flow in flows {
        balance += flow.actual_monthly_rent;
        if balance >= Decimal::ZERO {
            return Payback::Recovered { month: flow.month };
        }
    }
    Payback::Unresolved { term_months }
}
