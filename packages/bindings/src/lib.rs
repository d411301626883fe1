use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;

use lease_econ_core::lease::form::DealForm;
use lease_econ_core::lease::{self, DealParameters, Escalation};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Lease economics
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_lease(input_json: String) -> NapiResult<String> {
    let deal: DealParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lease::analyze_lease(&deal).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Same as `analyzeLease`, but from the raw text of a deal-sheet form.
#[napi]
pub fn analyze_lease_form(form_json: String) -> NapiResult<String> {
    let form: DealForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let deal = form.to_deal_parameters().map_err(to_napi_error)?;
    let output = lease::analyze_lease(&deal).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rent schedule
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScheduleRow {
    year: u32,
    base_rent_psf: Decimal,
}

#[napi]
pub fn build_rent_schedule(escalation_json: String) -> NapiResult<String> {
    let escalation: Escalation = serde_json::from_str(&escalation_json).map_err(to_napi_error)?;
    let schedule = escalation.build_schedule().map_err(to_napi_error)?;
    let rows: Vec<ScheduleRow> = (1..)
        .zip(schedule.rates())
        .map(|(year, rate)| ScheduleRow {
            year,
            base_rent_psf: *rate,
        })
        .collect();
    serde_json::to_string(&rows).map_err(to_napi_error)
}
