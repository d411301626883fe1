use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LeaseEconError;
use crate::lease::schedule::RentSchedule;
use crate::types::{Money, Percent};
use crate::LeaseEconResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest term the engine projects (100 years).
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Largest rentable area accepted, in square feet.
pub const MAX_SQUARE_FOOTAGE: Decimal = dec!(1000000000);

/// Ceiling for any $/sf amount and any commission percentage.
pub const MAX_UNIT_AMOUNT: Decimal = dec!(1000000);

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What the tenant still pays during free-rent months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreeRentBasis {
    /// Tenant pays nothing; the landlord carries operating costs (TMI)
    Gross,
    /// Tenant still pays TMI; only base rent is waived
    Net,
}

/// Brokerage commission structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommissionModel {
    /// Flat $/sf per lease year, paid linearly over the term
    Office {
        listing_fee_psf_per_year: Money,
        tenant_rep_fee_psf_per_year: Money,
    },
    /// Percent of scheduled base rent, with a separate year-1 tier
    Industrial {
        listing_fee_year1_pct: Percent,
        listing_fee_year2_plus_pct: Percent,
        tenant_rep_fee_year1_pct: Percent,
        tenant_rep_fee_year2_plus_pct: Percent,
    },
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Deal terms for a single commercial lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealParameters {
    /// Total lease term in months
    pub term_months: u32,
    /// Rentable area in square feet
    pub square_footage: Decimal,
    /// Annual taxes, maintenance and insurance recovery per square foot
    pub tmi_psf: Money,
    /// Months of concessionary rent at the start of the term
    pub free_rent_months: u32,
    /// Whether free rent also waives TMI
    pub free_rent_basis: FreeRentBasis,
    /// Tenant improvement allowance per square foot
    pub ti_allowance_psf: Money,
    /// Landlord's work per square foot
    pub landlord_work_psf: Money,
    /// Nominal annual discount rate in percent (8 = 8%)
    pub discount_rate_annual_pct: Percent,
    /// Annual base rent per square foot by lease year
    pub rent_schedule: RentSchedule,
    /// Brokerage commission structure
    pub commission_model: CommissionModel,
    /// Calendar date of the first rent month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commencement_date: Option<NaiveDate>,
}

impl DealParameters {
    /// Term and area must both be non-zero before anything is computed.
    pub fn ensure_sufficient(&self) -> LeaseEconResult<()> {
        if self.term_months == 0 {
            return Err(LeaseEconError::InsufficientInput {
                field: "term_months".into(),
            });
        }
        if self.square_footage.is_zero() {
            return Err(LeaseEconError::InsufficientInput {
                field: "square_footage".into(),
            });
        }
        Ok(())
    }

    /// Check the deal can be projected.
    ///
    /// Beyond sufficiency, every amount must be non-negative and within the
    /// ranges above, so that rent, commission and concession products stay
    /// inside `Decimal`'s range for the whole term.
    pub fn validate(&self) -> LeaseEconResult<()> {
        self.ensure_sufficient()?;

        if self.term_months > MAX_TERM_MONTHS {
            return Err(LeaseEconError::InvalidInput {
                field: "term_months".into(),
                reason: format!(
                    "At most {MAX_TERM_MONTHS} months are supported, got {}",
                    self.term_months
                ),
            });
        }

        let mut amounts: Vec<(&str, Decimal)> = vec![
            ("square_footage", self.square_footage),
            ("discount_rate_annual_pct", self.discount_rate_annual_pct),
        ];
        let unit_amounts = self.unit_amounts();
        amounts.extend(unit_amounts.iter().copied());

        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(LeaseEconError::InvalidInput {
                    field: field.into(),
                    reason: format!("Must not be negative, got {value}"),
                });
            }
        }

        if self.square_footage > MAX_SQUARE_FOOTAGE {
            return Err(LeaseEconError::InvalidInput {
                field: "square_footage".into(),
                reason: format!(
                    "At most {MAX_SQUARE_FOOTAGE} sf is supported, got {}",
                    self.square_footage
                ),
            });
        }

        for (field, value) in unit_amounts {
            if value > MAX_UNIT_AMOUNT {
                return Err(LeaseEconError::InvalidInput {
                    field: field.into(),
                    reason: format!("Must not exceed {MAX_UNIT_AMOUNT}, got {value}"),
                });
            }
        }

        Ok(())
    }

    /// Per-sf amounts and commission percentages, rent schedule included.
    fn unit_amounts(&self) -> Vec<(&'static str, Decimal)> {
        let mut amounts = vec![
            ("tmi_psf", self.tmi_psf),
            ("ti_allowance_psf", self.ti_allowance_psf),
            ("landlord_work_psf", self.landlord_work_psf),
        ];
        amounts.extend(self.rent_schedule.rates().iter().map(|r| ("rent_schedule", *r)));

        match &self.commission_model {
            CommissionModel::Office {
                listing_fee_psf_per_year,
                tenant_rep_fee_psf_per_year,
            } => {
                amounts.push(("listing_fee_psf_per_year", *listing_fee_psf_per_year));
                amounts.push(("tenant_rep_fee_psf_per_year", *tenant_rep_fee_psf_per_year));
            }
            CommissionModel::Industrial {
                listing_fee_year1_pct,
                listing_fee_year2_plus_pct,
                tenant_rep_fee_year1_pct,
                tenant_rep_fee_year2_plus_pct,
            } => {
                amounts.push(("listing_fee_year1_pct", *listing_fee_year1_pct));
                amounts.push(("listing_fee_year2_plus_pct", *listing_fee_year2_plus_pct));
                amounts.push(("tenant_rep_fee_year1_pct", *tenant_rep_fee_year1_pct));
                amounts.push(("tenant_rep_fee_year2_plus_pct", *tenant_rep_fee_year2_plus_pct));
            }
        }

        amounts
    }

    /// Monthly TMI for the whole premises.
    pub fn monthly_tmi(&self) -> Money {
        self.tmi_psf * self.square_footage / MONTHS_PER_YEAR
    }

    /// Monthly base rent at a given annual $/sf rate.
    pub fn monthly_rent_at(&self, annual_rate_psf: Money) -> Money {
        annual_rate_psf * self.square_footage / MONTHS_PER_YEAR
    }

    /// Lease term in (possibly fractional) years.
    pub fn term_years(&self) -> Decimal {
        Decimal::from(self.term_months) / MONTHS_PER_YEAR
    }

    /// Free-rent window, never longer than the term.
    pub fn effective_free_rent_months(&self) -> u32 {
        self.free_rent_months.min(self.term_months)
    }

    pub fn is_free_rent_month(&self, month: u32) -> bool {
        month <= self.free_rent_months
    }
}
