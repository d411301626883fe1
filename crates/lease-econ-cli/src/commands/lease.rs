use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use lease_econ_core::lease::form::DealForm;
use lease_econ_core::lease::{
    self as lease, CommissionModel, DealParameters, Escalation, FreeRentBasis,
};

use crate::input;

// ---------------------------------------------------------------------------
// Shared argument groups
// ---------------------------------------------------------------------------

/// Rent schedule, either typed in year by year or derived from a start rent
#[derive(Args, Debug, Clone, Default)]
pub struct RentArgs {
    /// Annual base rent per sf by lease year, comma separated (e.g. 20,21,22)
    #[arg(long, value_delimiter = ',', conflicts_with = "start_rent")]
    pub rents: Vec<Decimal>,

    /// Year-1 base rent per sf for a derived schedule
    #[arg(long)]
    pub start_rent: Option<Decimal>,

    /// Compounding annual escalation in percent (3 = 3%)
    #[arg(long, requires = "start_rent", conflicts_with = "escalation_step")]
    pub escalation_pct: Option<Decimal>,

    /// Fixed annual bump in $/sf
    #[arg(long, requires = "start_rent")]
    pub escalation_step: Option<Decimal>,
}

impl RentArgs {
    /// The escalation these flags describe, if any were given.
    pub fn escalation(&self) -> Option<Escalation> {
        if !self.rents.is_empty() {
            return Some(Escalation::Manual {
                rates: self.rents.clone(),
            });
        }
        let start_rent = self.start_rent?;
        Some(match self.escalation_step {
            Some(step) => Escalation::FixedStep { start_rent, step },
            None => Escalation::Percentage {
                start_rent,
                escalation_pct: self.escalation_pct.unwrap_or(Decimal::ZERO),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FreeRentArg {
    /// Tenant still pays TMI
    #[default]
    Net,
    /// Landlord also carries TMI
    Gross,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CommissionArg {
    /// $/sf per lease year
    #[default]
    Office,
    /// Percent of base rent, year 1 and year 2+ tiers
    Industrial,
}

// ---------------------------------------------------------------------------
// Command arguments
// ---------------------------------------------------------------------------

/// Arguments for lease analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML deal file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the input document as a raw deal-sheet form (all values as text)
    #[arg(long)]
    pub form: bool,

    /// Lease term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Rentable area in square feet
    #[arg(long, alias = "sqft")]
    pub square_footage: Option<Decimal>,

    /// Annual TMI per sf
    #[arg(long)]
    pub tmi_psf: Option<Decimal>,

    /// Months of free rent at the start of the term
    #[arg(long, default_value = "0")]
    pub free_rent_months: u32,

    /// Free rent basis
    #[arg(long, value_enum, default_value_t = FreeRentArg::Net)]
    pub free_rent_basis: FreeRentArg,

    /// Tenant improvement allowance per sf
    #[arg(long, alias = "ti")]
    pub ti_allowance: Option<Decimal>,

    /// Landlord's work per sf
    #[arg(long)]
    pub landlord_work: Option<Decimal>,

    /// Nominal annual discount rate in percent (8 = 8%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    #[command(flatten)]
    pub rent: RentArgs,

    /// Commission model
    #[arg(long, value_enum, default_value_t = CommissionArg::Office)]
    pub commission_model: CommissionArg,

    /// Office listing fee in $/sf per lease year
    #[arg(long)]
    pub listing_fee: Option<Decimal>,

    /// Office tenant-rep fee in $/sf per lease year
    #[arg(long)]
    pub tenant_rep_fee: Option<Decimal>,

    /// Industrial listing fee on year-1 rent, percent
    #[arg(long)]
    pub listing_fee_yr1: Option<Decimal>,

    /// Industrial listing fee on year 2+ rent, percent
    #[arg(long)]
    pub listing_fee_yr2: Option<Decimal>,

    /// Industrial tenant-rep fee on year-1 rent, percent
    #[arg(long)]
    pub tenant_rep_fee_yr1: Option<Decimal>,

    /// Industrial tenant-rep fee on year 2+ rent, percent
    #[arg(long)]
    pub tenant_rep_fee_yr2: Option<Decimal>,

    /// First rent month as YYYY-MM-DD
    #[arg(long)]
    pub commencement_date: Option<NaiveDate>,
}

/// Arguments for rent schedule derivation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML escalation document (e.g. {"Percentage": {...}})
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub rent: RentArgs,
}

// ---------------------------------------------------------------------------
// Runners
// ---------------------------------------------------------------------------

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: DealParameters = match read_document(&args.input)? {
        Some(doc) if args.form => {
            let form: DealForm = serde_json::from_value(doc)?;
            form.to_deal_parameters()?
        }
        Some(doc) => serde_json::from_value(doc)?,
        None if args.form => {
            return Err("--form needs --input <file> or a document on stdin".into());
        }
        None => deal_from_flags(&args)?,
    };

    let result = lease::analyze_lease(&deal)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let escalation: Escalation = if let Some(esc) = args.rent.escalation() {
        esc
    } else if let Some(doc) = read_document(&args.input)? {
        serde_json::from_value(doc)?
    } else {
        return Err("--rents, --start-rent or --input <file> required for schedule".into());
    };

    let schedule = escalation.build_schedule()?;
    let rows: Vec<Value> = schedule
        .rates()
        .iter()
        .enumerate()
        .map(|(i, rate)| json!({ "year": i + 1, "base_rent_psf": rate }))
        .collect();
    Ok(Value::Array(rows))
}

fn read_document(path: &Option<String>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(input::file::read_document(path)?)),
        None => input::stdin::read_stdin(),
    }
}

fn deal_from_flags(args: &AnalyzeArgs) -> Result<DealParameters, Box<dyn std::error::Error>> {
    let escalation = args
        .rent
        .escalation()
        .ok_or("--rents or --start-rent is required (or provide --input)")?;

    let commission_model = match args.commission_model {
        CommissionArg::Office => CommissionModel::Office {
            listing_fee_psf_per_year: args.listing_fee.unwrap_or(Decimal::ZERO),
            tenant_rep_fee_psf_per_year: args.tenant_rep_fee.unwrap_or(Decimal::ZERO),
        },
        CommissionArg::Industrial => CommissionModel::Industrial {
            listing_fee_year1_pct: args.listing_fee_yr1.unwrap_or(Decimal::ZERO),
            listing_fee_year2_plus_pct: args.listing_fee_yr2.unwrap_or(Decimal::ZERO),
            tenant_rep_fee_year1_pct: args.tenant_rep_fee_yr1.unwrap_or(Decimal::ZERO),
            tenant_rep_fee_year2_plus_pct: args.tenant_rep_fee_yr2.unwrap_or(Decimal::ZERO),
        },
    };

    Ok(DealParameters {
        term_months: args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?,
        square_footage: args
            .square_footage
            .ok_or("--square-footage is required (or provide --input)")?,
        tmi_psf: args.tmi_psf.unwrap_or(Decimal::ZERO),
        free_rent_months: args.free_rent_months,
        free_rent_basis: match args.free_rent_basis {
            FreeRentArg::Net => FreeRentBasis::Net,
            FreeRentArg::Gross => FreeRentBasis::Gross,
        },
        ti_allowance_psf: args.ti_allowance.unwrap_or(Decimal::ZERO),
        landlord_work_psf: args.landlord_work.unwrap_or(Decimal::ZERO),
        discount_rate_annual_pct: args.discount_rate.unwrap_or(Decimal::ZERO),
        rent_schedule: escalation.build_schedule()?,
        commission_model,
        commencement_date: args.commencement_date,
    })
}
