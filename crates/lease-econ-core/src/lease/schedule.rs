use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeaseEconError;
use crate::types::{Money, Percent};
use crate::LeaseEconResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of lease years a rent schedule can state explicitly.
pub const MAX_SCHEDULE_YEARS: usize = 20;

/// Derived rates are stored the way a deal sheet quotes them.
const RATE_DECIMALS: u32 = 2;

// ---------------------------------------------------------------------------
// Rent schedule
// ---------------------------------------------------------------------------

/// Annual base rent per square foot, indexed by lease year.
///
/// Holds at most [`MAX_SCHEDULE_YEARS`] rates and at least one. Any year past
/// the last stated rate (or past year 20) pays the last stated rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Money>", into = "Vec<Money>")]
pub struct RentSchedule {
    rates: [Money; MAX_SCHEDULE_YEARS],
    last_index: usize,
}

impl RentSchedule {
    pub fn new(rates: &[Money]) -> LeaseEconResult<Self> {
        if rates.is_empty() {
            return Err(LeaseEconError::InvalidInput {
                field: "rent_schedule".into(),
                reason: "At least one annual rent rate is required".into(),
            });
        }
        if rates.len() > MAX_SCHEDULE_YEARS {
            return Err(LeaseEconError::InvalidInput {
                field: "rent_schedule".into(),
                reason: format!(
                    "At most {MAX_SCHEDULE_YEARS} annual rates are supported, got {}",
                    rates.len()
                ),
            });
        }
        if let Some((i, r)) = rates.iter().enumerate().find(|(_, r)| **r < Decimal::ZERO) {
            return Err(LeaseEconError::InvalidInput {
                field: "rent_schedule".into(),
                reason: format!("Year {} rent {r} must not be negative", i + 1),
            });
        }

        let mut fixed = [Decimal::ZERO; MAX_SCHEDULE_YEARS];
        fixed[..rates.len()].copy_from_slice(rates);
        Ok(Self {
            rates: fixed,
            last_index: rates.len() - 1,
        })
    }

    /// A single rate for every year of the term.
    pub fn flat(rate: Money) -> LeaseEconResult<Self> {
        Self::new(&[rate])
    }

    /// The stated rates, year 1 first.
    pub fn rates(&self) -> &[Money] {
        &self.rates[..=self.last_index]
    }

    /// Number of explicitly stated years.
    pub fn stated_years(&self) -> usize {
        self.last_index + 1
    }

    /// Rate for a 1-based lease year, clamped to the last stated year.
    pub fn rate_for_year(&self, year: u32) -> Money {
        let index = (year.saturating_sub(1) as usize)
            .min(MAX_SCHEDULE_YEARS - 1)
            .min(self.last_index);
        self.rates[index]
    }

    pub fn first_year_rate(&self) -> Money {
        self.rates[0]
    }
}

impl TryFrom<Vec<Money>> for RentSchedule {
    type Error = LeaseEconError;

    fn try_from(rates: Vec<Money>) -> Result<Self, Self::Error> {
        Self::new(&rates)
    }
}

impl From<RentSchedule> for Vec<Money> {
    fn from(schedule: RentSchedule) -> Self {
        schedule.rates().to_vec()
    }
}

// ---------------------------------------------------------------------------
// Escalation
// ---------------------------------------------------------------------------

/// How annual base rent moves from year to year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Escalation {
    /// Rates typed in year by year
    Manual { rates: Vec<Money> },
    /// Compounding annual bump (3 = 3% per year)
    Percentage {
        start_rent: Money,
        escalation_pct: Percent,
    },
    /// Fixed dollar bump per square foot each year
    FixedStep { start_rent: Money, step: Money },
}

impl Escalation {
    /// Expand into a rent schedule.
    ///
    /// Derived methods fill all twenty years. Each stored rate is rounded to
    /// cents while the running rent compounds unrounded.
    pub fn build_schedule(&self) -> LeaseEconResult<RentSchedule> {
        match self {
            Escalation::Manual { rates } => RentSchedule::new(rates),
            Escalation::Percentage {
                start_rent,
                escalation_pct,
            } => {
                let growth = Decimal::ONE + *escalation_pct / dec!(100);
                derive_schedule(*start_rent, |rent| rent.checked_mul(growth))
            }
            Escalation::FixedStep { start_rent, step } => {
                derive_schedule(*start_rent, |rent| rent.checked_add(*step))
            }
        }
    }
}

fn derive_schedule(
    start_rent: Money,
    next: impl Fn(Money) -> Option<Money>,
) -> LeaseEconResult<RentSchedule> {
    let mut rates = Vec::with_capacity(MAX_SCHEDULE_YEARS);
    let mut current = start_rent;
    for year in 0..MAX_SCHEDULE_YEARS {
        if year > 0 {
            current = next(current).ok_or_else(|| LeaseEconError::InvalidInput {
                field: "rent_schedule".into(),
                reason: format!("Escalated rent overflows in year {}", year + 1),
            })?;
        }
        rates.push(current.round_dp_with_strategy(
            RATE_DECIMALS,
            RoundingStrategy::MidpointAwayFromZero,
        ));
    }
    RentSchedule::new(&rates)
}
