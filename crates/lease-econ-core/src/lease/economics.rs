use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::lease::cash_flow::{
    project_cash_flows, summarize_by_year, AnnualCashFlow, MonthlyCashFlow,
};
use crate::lease::commission::{calculate_commissions, CommissionBreakdown};
use crate::lease::concessions::{value_concessions, ConcessionSummary};
use crate::lease::deal::DealParameters;
use crate::lease::payback::{find_payback, Payback};
use crate::time_value::{annuity_due_factor, monthly_rate, present_value_due};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::LeaseEconResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Full-precision lease metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseMetrics {
    /// Annual discount rate / 12, as a decimal
    pub monthly_discount_rate: Rate,
    /// PV of actual monthly rent, paid in advance
    pub total_pv: Money,
    /// PV of $1 per month in advance over the term
    pub annuity_factor: Decimal,
    /// TI + landlord work + commissions
    pub upfront_cost: Money,
    /// total_pv less upfront cost
    pub npv: Money,
    /// Level monthly rent per sf with the same NPV
    pub ner_monthly_psf: Money,
    /// Net effective rent, annual $/sf
    pub ner: Money,
    /// Undiscounted sum of actual monthly rent
    pub net_rent: Money,
    /// Sum of positive monthly rent (negative free-rent months excluded)
    pub gross_rent: Money,
    pub avg_monthly_rent: Money,
}

/// Headline figures rounded the way a deal sheet shows them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseSummary {
    /// $/sf/yr, 2 dp
    pub ner: Money,
    pub npv: Money,
    /// Total lease value (gross rent)
    pub total_value: Money,
    pub avg_monthly_rent: Money,
    pub total_concessions: Money,
    /// Percent of year-1 gross rent, 1 dp
    pub incentives_pct: Percent,
    pub payback: Payback,
}

/// Complete lease economics output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseEconomicsOutput {
    pub summary: LeaseSummary,
    pub metrics: LeaseMetrics,
    pub commissions: CommissionBreakdown,
    pub concessions: ConcessionSummary,
    pub monthly_cash_flows: Vec<MonthlyCashFlow>,
    pub annual_breakdown: Vec<AnnualCashFlow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse a lease from the landlord's side: NER, NPV, concessions, payback.
///
/// Returns a `ComputationOutput<LeaseEconomicsOutput>` with warnings for
/// unusual deal terms and computation metadata.
pub fn analyze_lease(
    deal: &DealParameters,
) -> LeaseEconResult<ComputationOutput<LeaseEconomicsOutput>> {
    let start = Instant::now();

    let output = compute_lease_economics(deal)?;
    let warnings = collect_warnings(deal, &output);
    for w in &warnings {
        log::debug!("lease warning: {w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Net Effective Rent (monthly annuity-due discounting)",
        deal,
        warnings,
        elapsed,
        output,
    ))
}

/// The deterministic core of [`analyze_lease`]: same deal, same output.
pub fn compute_lease_economics(deal: &DealParameters) -> LeaseEconResult<LeaseEconomicsOutput> {
    deal.validate()?;
    log::debug!(
        "projecting {} months on {} sf",
        deal.term_months,
        deal.square_footage
    );

    let monthly_cash_flows = project_cash_flows(deal)?;
    let commissions = calculate_commissions(deal, &monthly_cash_flows);
    let concessions = value_concessions(deal, &monthly_cash_flows);

    let upfront_cost =
        concessions.total_ti + concessions.total_landlord_work + commissions.total_commissions;
    let payback = find_payback(upfront_cost, &monthly_cash_flows, deal.term_months);

    let metrics = compute_metrics(deal, &monthly_cash_flows, upfront_cost)?;
    log::trace!(
        "total_pv={} npv={} ner={}",
        metrics.total_pv,
        metrics.npv,
        metrics.ner
    );

    let summary = LeaseSummary {
        ner: round_display(metrics.ner, 2),
        npv: round_display(metrics.npv, 0),
        total_value: round_display(metrics.gross_rent, 0),
        avg_monthly_rent: round_display(metrics.avg_monthly_rent, 0),
        total_concessions: round_display(concessions.total_concessions, 0),
        incentives_pct: round_display(concessions.incentives_pct, 1),
        payback,
    };

    let annual_breakdown = summarize_by_year(&monthly_cash_flows, deal.square_footage);

    Ok(LeaseEconomicsOutput {
        summary,
        metrics,
        commissions,
        concessions,
        monthly_cash_flows,
        annual_breakdown,
    })
}

// ---------------------------------------------------------------------------
// Discounting and NER
// ---------------------------------------------------------------------------

fn compute_metrics(
    deal: &DealParameters,
    flows: &[MonthlyCashFlow],
    upfront_cost: Money,
) -> LeaseEconResult<LeaseMetrics> {
    let monthly_discount_rate = monthly_rate(deal.discount_rate_annual_pct);

    let rents: Vec<Money> = flows.iter().map(|f| f.actual_monthly_rent).collect();
    let total_pv = present_value_due(monthly_discount_rate, &rents)?;
    let annuity_factor = annuity_due_factor(monthly_discount_rate, deal.term_months)?;

    let npv = total_pv - upfront_cost;

    let ner_monthly_psf = if annuity_factor.is_zero() {
        Decimal::ZERO
    } else {
        npv / deal.square_footage / annuity_factor
    };
    let ner = ner_monthly_psf * dec!(12);

    let net_rent: Money = rents.iter().copied().sum();
    let gross_rent: Money = rents.iter().filter(|r| **r > Decimal::ZERO).copied().sum();
    let avg_monthly_rent = gross_rent / Decimal::from(deal.term_months);

    Ok(LeaseMetrics {
        monthly_discount_rate,
        total_pv,
        annuity_factor,
        upfront_cost,
        npv,
        ner_monthly_psf,
        ner,
        net_rent,
        gross_rent,
        avg_monthly_rent,
    })
}

/// Round half away from zero, matching how currency is usually displayed.
fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(deal: &DealParameters, output: &LeaseEconomicsOutput) -> Vec<String> {
    let mut warnings = Vec::new();

    if deal.free_rent_months > deal.term_months {
        warnings.push(format!(
            "Free rent of {} months exceeds the {}-month term; every month is treated as free",
            deal.free_rent_months, deal.term_months
        ));
    }

    if !output.summary.payback.is_recovered() {
        warnings.push(format!(
            "Upfront cost of {} is not recovered within the {}-month term",
            round_display(output.metrics.upfront_cost, 0),
            deal.term_months
        ));
    }

    if output.concessions.incentives_pct > dec!(100) {
        warnings.push(format!(
            "Concessions are {:.1}% of year-1 gross rent, more than a full year of rent",
            output.concessions.incentives_pct
        ));
    }

    if deal.discount_rate_annual_pct > dec!(25) {
        warnings.push(format!(
            "Discount rate {}% exceeds 25%, unusually high for a lease",
            deal.discount_rate_annual_pct
        ));
    }

    if output.metrics.npv < Decimal::ZERO {
        warnings.push("NPV is negative: the deal costs more than its rent is worth".into());
    }

    warnings
}
