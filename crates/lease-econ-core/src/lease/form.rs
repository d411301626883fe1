//! Raw deal-sheet input, as typed into a form.
//!
//! Every numeric field arrives as text. Anything that does not start with a
//! number reads as zero, so a half-filled form still produces deal terms
//! rather than an error.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lease::deal::{CommissionModel, DealParameters, FreeRentBasis};
use crate::lease::schedule::Escalation;
use crate::LeaseEconResult;

/// Text fields of a lease calculator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DealForm {
    pub lease_term: String,
    pub square_footage: String,
    pub tmi_psf: String,
    pub free_rent: String,
    /// "gross" selects gross free rent, anything else is net
    pub free_rent_type: String,
    pub ti_allowance: String,
    pub landlord_work: String,
    pub discount_rate: String,
    /// "industrial" selects the industrial model, anything else is office
    pub commission_model: String,
    pub listing_fee: String,
    pub tenant_rep_fee: String,
    pub listing_fee_ind_yr1: String,
    pub listing_fee_ind_yr2: String,
    pub tenant_rep_fee_ind_yr1: String,
    pub tenant_rep_fee_ind_yr2: String,
    /// "pct", "fixed", or manual entry
    pub escalation_method: String,
    pub rent_inputs: Vec<String>,
    pub start_base_rent: String,
    pub esc_pct_value: String,
    pub esc_fixed_value: String,
    pub commencement_date: String,
}

impl DealForm {
    /// Read the form into deal terms.
    ///
    /// Only the rent schedule can fail (e.g. a negative derived rate); every
    /// other field falls back to zero.
    pub fn to_deal_parameters(&self) -> LeaseEconResult<DealParameters> {
        let free_rent_basis = if self.free_rent_type.trim().eq_ignore_ascii_case("gross") {
            FreeRentBasis::Gross
        } else {
            FreeRentBasis::Net
        };

        let is_industrial = self.commission_model.trim().eq_ignore_ascii_case("industrial");
        let commission_model = if is_industrial {
            CommissionModel::Industrial {
                listing_fee_year1_pct: parse_number(&self.listing_fee_ind_yr1),
                listing_fee_year2_plus_pct: parse_number(&self.listing_fee_ind_yr2),
                tenant_rep_fee_year1_pct: parse_number(&self.tenant_rep_fee_ind_yr1),
                tenant_rep_fee_year2_plus_pct: parse_number(&self.tenant_rep_fee_ind_yr2),
            }
        } else {
            CommissionModel::Office {
                listing_fee_psf_per_year: parse_number(&self.listing_fee),
                tenant_rep_fee_psf_per_year: parse_number(&self.tenant_rep_fee),
            }
        };

        let commencement_date = match self.commencement_date.trim() {
            "" => None,
            text => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
        };

        Ok(DealParameters {
            term_months: parse_count(&self.lease_term),
            square_footage: parse_number(&self.square_footage),
            tmi_psf: parse_number(&self.tmi_psf),
            free_rent_months: parse_count(&self.free_rent),
            free_rent_basis,
            ti_allowance_psf: parse_number(&self.ti_allowance),
            landlord_work_psf: parse_number(&self.landlord_work),
            discount_rate_annual_pct: parse_number(&self.discount_rate),
            rent_schedule: self.escalation().build_schedule()?,
            commission_model,
            commencement_date,
        })
    }

    /// The escalation method the form describes.
    pub fn escalation(&self) -> Escalation {
        let start_rent = parse_number(&self.start_base_rent);
        match self.escalation_method.trim().to_ascii_lowercase().as_str() {
            "pct" | "percentage" => Escalation::Percentage {
                start_rent,
                escalation_pct: parse_number(&self.esc_pct_value),
            },
            "fixed" => Escalation::FixedStep {
                start_rent,
                step: parse_number(&self.esc_fixed_value),
            },
            _ => {
                let mut rates: Vec<Decimal> =
                    self.rent_inputs.iter().map(|r| parse_number(r)).collect();
                if rates.is_empty() {
                    rates.push(Decimal::ZERO);
                }
                Escalation::Manual { rates }
            }
        }
    }
}

/// Parse the leading number of a text field, or zero.
///
/// `"12.5"` → 12.5, `"12.5 sf"` → 12.5, `"abc"` / `""` → 0.
pub fn parse_number(text: &str) -> Decimal {
    let trimmed = text.trim();
    if let Ok(value) = Decimal::from_str(trimmed) {
        return value;
    }
    if let Ok(value) = Decimal::from_scientific(trimmed) {
        return value;
    }

    let prefix = numeric_prefix(trimmed);
    match Decimal::from_str(prefix) {
        Ok(value) => value,
        Err(_) => {
            if !trimmed.is_empty() {
                log::debug!("unparsable numeric field {trimmed:?}, reading as 0");
            }
            Decimal::ZERO
        }
    }
}

/// Parse a whole count of months; fractions truncate, negatives read as zero.
pub fn parse_count(text: &str) -> u32 {
    let value = parse_number(text).trunc();
    if value <= Decimal::ZERO {
        return 0;
    }
    value.to_u32().unwrap_or(u32::MAX)
}

fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    text[..end].trim_end_matches('.')
}
