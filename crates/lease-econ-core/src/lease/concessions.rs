use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::lease::cash_flow::MonthlyCashFlow;
use crate::lease::deal::{DealParameters, FreeRentBasis};
use crate::types::{Money, Percent};

/// Tenant-facing concessions and how rich they are against year-1 rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcessionSummary {
    pub total_ti: Money,
    pub total_landlord_work: Money,
    /// Rent (and TMI under gross free rent) the landlord forgoes
    pub total_free_rent_value: Money,
    /// TI + landlord work + free rent; commissions are excluded
    pub total_concessions: Money,
    /// (year-1 base rent + TMI) * area
    pub year1_gross_rent: Money,
    /// Concessions as a percent of year-1 gross rent
    pub incentives_pct: Percent,
}

/// Value the concessions granted to the tenant.
pub fn value_concessions(deal: &DealParameters, flows: &[MonthlyCashFlow]) -> ConcessionSummary {
    let sqft = deal.square_footage;
    let total_ti = deal.ti_allowance_psf * sqft;
    let total_landlord_work = deal.landlord_work_psf * sqft;

    // Net free rent leaves TMI with the tenant, so only base rent is lost.
    let forgone_tmi = match deal.free_rent_basis {
        FreeRentBasis::Gross => deal.monthly_tmi(),
        FreeRentBasis::Net => Decimal::ZERO,
    };
    let total_free_rent_value: Money = flows
        .iter()
        .filter(|f| f.is_free_rent)
        .map(|f| f.full_monthly_base_rent + forgone_tmi)
        .sum();

    let total_concessions = total_ti + total_landlord_work + total_free_rent_value;

    let year1_gross_rent = (deal.rent_schedule.first_year_rate() + deal.tmi_psf) * sqft;
    let incentives_pct = if year1_gross_rent > Decimal::ZERO {
        total_concessions / year1_gross_rent * dec!(100)
    } else {
        Decimal::ZERO
    };

    ConcessionSummary {
        total_ti,
        total_landlord_work,
        total_free_rent_value,
        total_concessions,
        year1_gross_rent,
        incentives_pct,
    }
}
