use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LeaseEconError;
use crate::lease::deal::{DealParameters, FreeRentBasis};
use crate::types::Money;
use crate::LeaseEconResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One month of the landlord's rent roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    /// 1-based month of the term
    pub month: u32,
    /// 1-based lease year
    pub year: u32,
    /// Annual $/sf rate in force for this lease year
    pub scheduled_base_rent_psf_annual: Money,
    /// Base rent as signed, before any free rent
    pub full_monthly_base_rent: Money,
    /// Net cash to the landlord after the free-rent policy
    pub actual_monthly_rent: Money,
    pub is_free_rent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<NaiveDate>,
}

/// Rent roll rolled up to a lease year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashFlow {
    pub year: u32,
    /// Annual $/sf rate for the year
    pub base_rent_psf: Money,
    /// Sum of actual monthly rent
    pub total_rent: Money,
    /// Free-rent months falling in this year
    pub free_rent_months: u32,
    /// Total rent per square foot
    pub rent_psf: Money,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project the month-by-month cash flow for the full term.
///
/// The deal is validated first, so the term bounds the allocation.
pub fn project_cash_flows(deal: &DealParameters) -> LeaseEconResult<Vec<MonthlyCashFlow>> {
    deal.validate()?;

    let monthly_tmi = deal.monthly_tmi();
    let mut flows = Vec::with_capacity(deal.term_months as usize);

    for month in 1..=deal.term_months {
        let year = lease_year(month);
        let annual_rate = deal.rent_schedule.rate_for_year(year);
        let full_monthly_base_rent = deal.monthly_rent_at(annual_rate);
        let is_free_rent = deal.is_free_rent_month(month);

        let actual_monthly_rent = if is_free_rent {
            match deal.free_rent_basis {
                FreeRentBasis::Gross => -monthly_tmi,
                // TMI is collected and passed straight through
                FreeRentBasis::Net => Decimal::ZERO,
            }
        } else {
            full_monthly_base_rent
        };

        let period_start = match deal.commencement_date {
            Some(start) => Some(start.checked_add_months(Months::new(month - 1)).ok_or_else(
                || LeaseEconError::InvalidInput {
                    field: "commencement_date".into(),
                    reason: format!("Month {month} falls outside the supported date range"),
                },
            )?),
            None => None,
        };

        flows.push(MonthlyCashFlow {
            month,
            year,
            scheduled_base_rent_psf_annual: annual_rate,
            full_monthly_base_rent,
            actual_monthly_rent,
            is_free_rent,
            period_start,
        });
    }

    Ok(flows)
}

/// Lease year containing a 1-based month.
pub fn lease_year(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Group monthly flows by lease year, in order.
pub fn summarize_by_year(
    flows: &[MonthlyCashFlow],
    square_footage: Decimal,
) -> Vec<AnnualCashFlow> {
    let mut years: Vec<AnnualCashFlow> = Vec::new();

    for flow in flows {
        let needs_new = years.last().map_or(true, |y| y.year != flow.year);
        if needs_new {
            years.push(AnnualCashFlow {
                year: flow.year,
                base_rent_psf: flow.scheduled_base_rent_psf_annual,
                total_rent: Decimal::ZERO,
                free_rent_months: 0,
                rent_psf: Decimal::ZERO,
            });
        }
        if let Some(current) = years.last_mut() {
            current.total_rent += flow.actual_monthly_rent;
            if flow.is_free_rent {
                current.free_rent_months += 1;
            }
        }
    }

    if !square_footage.is_zero() {
        for year in &mut years {
            year.rent_psf = year.total_rent / square_footage;
        }
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::deal::CommissionModel;
    use crate::lease::schedule::RentSchedule;
    use rust_decimal_macros::dec;

    fn deal(free_months: u32, basis: FreeRentBasis) -> DealParameters {
        DealParameters {
            term_months: 60,
            square_footage: dec!(10000),
            tmi_psf: dec!(5),
            free_rent_months: free_months,
            free_rent_basis: basis,
            ti_allowance_psf: Decimal::ZERO,
            landlord_work_psf: Decimal::ZERO,
            discount_rate_annual_pct: Decimal::ZERO,
            rent_schedule: RentSchedule::new(&[dec!(20), dec!(21), dec!(22)]).unwrap(),
            commission_model: CommissionModel::Office {
                listing_fee_psf_per_year: Decimal::ZERO,
                tenant_rep_fee_psf_per_year: Decimal::ZERO,
            },
            commencement_date: None,
        }
    }

    #[test]
    fn test_lease_year_boundaries() {
        assert_eq!(lease_year(1), 1);
        assert_eq!(lease_year(12), 1);
        assert_eq!(lease_year(13), 2);
        assert_eq!(lease_year(241), 21);
    }

    #[test]
    fn test_projection_length_and_rates() {
        let flows = project_cash_flows(&deal(0, FreeRentBasis::Net)).unwrap();
        assert_eq!(flows.len(), 60);
        assert_eq!(flows[0].month, 1);
        assert_eq!(flows[0].full_monthly_base_rent, dec!(20) * dec!(10000) / dec!(12));
        assert_eq!(flows[12].scheduled_base_rent_psf_annual, dec!(21));
        // Years 4 and 5 reuse the last stated rate
        assert_eq!(flows[59].scheduled_base_rent_psf_annual, dec!(22));
        assert!(flows.iter().all(|f| f.actual_monthly_rent > Decimal::ZERO));
    }

    #[test]
    fn test_gross_free_rent_months_are_negative_tmi() {
        let flows = project_cash_flows(&deal(3, FreeRentBasis::Gross)).unwrap();
        let tmi = dec!(5) * dec!(10000) / dec!(12);
        for f in &flows[..3] {
            assert!(f.is_free_rent);
            assert_eq!(f.actual_monthly_rent, -tmi);
        }
        assert_eq!(flows[3].actual_monthly_rent, flows[3].full_monthly_base_rent);
    }

    #[test]
    fn test_net_free_rent_months_are_zero() {
        let flows = project_cash_flows(&deal(3, FreeRentBasis::Net)).unwrap();
        assert!(flows[..3].iter().all(|f| f.actual_monthly_rent.is_zero()));
        assert!(!flows[3].is_free_rent);
    }

    #[test]
    fn test_zero_area_is_insufficient() {
        let mut d = deal(0, FreeRentBasis::Net);
        d.square_footage = Decimal::ZERO;
        assert!(matches!(
            project_cash_flows(&d),
            Err(LeaseEconError::InsufficientInput { .. })
        ));
    }

    #[test]
    fn test_oversized_term_rejected_before_projection() {
        let mut d = deal(0, FreeRentBasis::Net);
        d.term_months = u32::MAX;
        assert!(matches!(
            project_cash_flows(&d),
            Err(LeaseEconError::InvalidInput { ref field, .. }) if field == "term_months"
        ));
    }

    #[test]
    fn test_period_start_dates() {
        let mut d = deal(0, FreeRentBasis::Net);
        d.commencement_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        let flows = project_cash_flows(&d).unwrap();
        assert_eq!(flows[0].period_start, NaiveDate::from_ymd_opt(2024, 1, 31));
        // Month-end dates clamp to the shorter month
        assert_eq!(flows[1].period_start, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(flows[12].period_start, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn test_summarize_by_year() {
        let flows = project_cash_flows(&deal(14, FreeRentBasis::Net)).unwrap();
        let years = summarize_by_year(&flows, dec!(10000));
        assert_eq!(years.len(), 5);
        assert_eq!(years[0].free_rent_months, 12);
        assert_eq!(years[0].total_rent, Decimal::ZERO);
        assert_eq!(years[1].free_rent_months, 2);
        // 10 paying months at $21/sf on 10,000 sf
        assert_eq!(years[1].total_rent, dec!(175000));
        assert_eq!(years[1].rent_psf, dec!(17.5));
        assert_eq!(years[4].base_rent_psf, dec!(22));
    }
}
