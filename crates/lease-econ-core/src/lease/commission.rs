use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::lease::cash_flow::MonthlyCashFlow;
use crate::lease::deal::{CommissionModel, DealParameters};
use crate::types::{Money, Percent, Rate};

/// Months covered by the year-1 commission tier.
const YEAR_ONE_MONTHS: u32 = 12;

/// Brokerage commissions owed on a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    pub total_commissions: Money,
    pub listing_commission: Money,
    pub tenant_rep_commission: Money,
    /// Portion earned on the first twelve months
    pub year1_commissions: Money,
    pub year2_plus_commissions: Money,
}

/// Total brokerage commissions for the deal.
///
/// Industrial percentages apply to scheduled base rent, free-rent months
/// included: brokers are paid on the rent the deal was signed for.
pub fn calculate_commissions(
    deal: &DealParameters,
    flows: &[MonthlyCashFlow],
) -> CommissionBreakdown {
    match &deal.commission_model {
        CommissionModel::Office {
            listing_fee_psf_per_year,
            tenant_rep_fee_psf_per_year,
        } => office_commissions(
            deal,
            *listing_fee_psf_per_year,
            *tenant_rep_fee_psf_per_year,
        ),
        CommissionModel::Industrial {
            listing_fee_year1_pct,
            listing_fee_year2_plus_pct,
            tenant_rep_fee_year1_pct,
            tenant_rep_fee_year2_plus_pct,
        } => industrial_commissions(
            flows,
            IndustrialRates {
                listing_year1: pct_to_rate(*listing_fee_year1_pct),
                listing_year2_plus: pct_to_rate(*listing_fee_year2_plus_pct),
                tenant_rep_year1: pct_to_rate(*tenant_rep_fee_year1_pct),
                tenant_rep_year2_plus: pct_to_rate(*tenant_rep_fee_year2_plus_pct),
            },
        ),
    }
}

fn office_commissions(
    deal: &DealParameters,
    listing_psf: Money,
    tenant_rep_psf: Money,
) -> CommissionBreakdown {
    let term_years = deal.term_years();
    let sqft = deal.square_footage;

    let total_commissions = (listing_psf + tenant_rep_psf) * term_years * sqft;
    let listing_commission = listing_psf * term_years * sqft;

    let year1_months = deal.term_months.min(YEAR_ONE_MONTHS);
    let year1_commissions =
        (listing_psf + tenant_rep_psf) * Decimal::from(year1_months) / dec!(12) * sqft;

    CommissionBreakdown {
        total_commissions,
        listing_commission,
        tenant_rep_commission: total_commissions - listing_commission,
        year1_commissions,
        year2_plus_commissions: total_commissions - year1_commissions,
    }
}

struct IndustrialRates {
    listing_year1: Rate,
    listing_year2_plus: Rate,
    tenant_rep_year1: Rate,
    tenant_rep_year2_plus: Rate,
}

fn industrial_commissions(
    flows: &[MonthlyCashFlow],
    rates: IndustrialRates,
) -> CommissionBreakdown {
    let mut total_commissions = Decimal::ZERO;
    let mut listing_commission = Decimal::ZERO;
    let mut year1_commissions = Decimal::ZERO;

    for flow in flows {
        let is_year1 = flow.month <= YEAR_ONE_MONTHS;
        let (listing_rate, tenant_rep_rate) = if is_year1 {
            (rates.listing_year1, rates.tenant_rep_year1)
        } else {
            (rates.listing_year2_plus, rates.tenant_rep_year2_plus)
        };

        let monthly = flow.full_monthly_base_rent * (listing_rate + tenant_rep_rate);
        total_commissions += monthly;
        listing_commission += flow.full_monthly_base_rent * listing_rate;
        if is_year1 {
            year1_commissions += monthly;
        }
    }

    CommissionBreakdown {
        total_commissions,
        listing_commission,
        tenant_rep_commission: total_commissions - listing_commission,
        year1_commissions,
        year2_plus_commissions: total_commissions - year1_commissions,
    }
}

fn pct_to_rate(pct: Percent) -> Rate {
    pct / dec!(100)
}
