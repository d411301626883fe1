use lease_econ_core::lease::form::DealForm;
use lease_econ_core::lease::{
    analyze_lease, compute_lease_economics, CommissionModel, DealParameters, Escalation,
    FreeRentBasis, Payback, RentSchedule,
};
use lease_econ_core::LeaseEconError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn office_deal() -> DealParameters {
    DealParameters {
        term_months: 60,
        square_footage: dec!(10000),
        tmi_psf: dec!(5),
        free_rent_months: 0,
        free_rent_basis: FreeRentBasis::Net,
        ti_allowance_psf: Decimal::ZERO,
        landlord_work_psf: Decimal::ZERO,
        discount_rate_annual_pct: Decimal::ZERO,
        rent_schedule: RentSchedule::new(&[dec!(20); 5]).unwrap(),
        commission_model: CommissionModel::Office {
            listing_fee_psf_per_year: Decimal::ZERO,
            tenant_rep_fee_psf_per_year: Decimal::ZERO,
        },
        commencement_date: None,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_flat_office_deal_reference() {
    let result = analyze_lease(&office_deal()).unwrap();
    let s = &result.result.summary;

    // 20 * 10,000 * 5 years
    assert_eq!(s.total_value, dec!(1000000));
    assert_eq!(s.avg_monthly_rent, dec!(16667));
    assert_eq!(s.npv, dec!(1000000));
    assert_eq!(s.ner, dec!(20.00));
    assert_eq!(s.total_concessions, Decimal::ZERO);
    assert_eq!(s.payback.month(), Some(1));
    assert_eq!(result.result.monthly_cash_flows.len(), 60);
}

#[test]
fn test_typical_office_deal_with_concessions() {
    // 10-year deal, $2 bumps, 6 months net free, $50 TI, 7% discount rate
    let deal = DealParameters {
        term_months: 120,
        square_footage: dec!(8000),
        tmi_psf: dec!(14),
        free_rent_months: 6,
        free_rent_basis: FreeRentBasis::Net,
        ti_allowance_psf: dec!(50),
        landlord_work_psf: dec!(5),
        discount_rate_annual_pct: dec!(7),
        rent_schedule: Escalation::FixedStep {
            start_rent: dec!(28),
            step: dec!(2),
        }
        .build_schedule()
        .unwrap(),
        commission_model: CommissionModel::Office {
            listing_fee_psf_per_year: dec!(1.25),
            tenant_rep_fee_psf_per_year: dec!(1.25),
        },
        commencement_date: None,
    };

    let out = compute_lease_economics(&deal).unwrap();

    // 2.50 * 10 years * 8,000 sf
    assert_eq!(out.commissions.total_commissions, dec!(200000));
    // 6 months of $28 base: 6 * 28 * 8,000 / 12
    assert_eq!(out.concessions.total_free_rent_value.round_dp(2), dec!(112000));
    assert_eq!(out.concessions.total_concessions.round_dp(2), dec!(552000));
    // (28 + 14) * 8,000 = 336,000
    assert_eq!(out.concessions.incentives_pct.round_dp(1), dec!(164.3));

    // NER sits well below the average face rate of $37/sf
    assert!((out.metrics.ner - dec!(22.86)).abs() < dec!(0.01));
    assert_eq!(out.summary.payback, Payback::Recovered { month: 38 });
    assert_eq!(out.annual_breakdown.len(), 10);
    assert_eq!(out.annual_breakdown[9].base_rent_psf, dec!(46));
}

// ===========================================================================
// Free rent
// ===========================================================================

#[test]
fn test_gross_free_rent_months() {
    let mut deal = office_deal();
    deal.free_rent_months = 3;
    deal.free_rent_basis = FreeRentBasis::Gross;
    let out = compute_lease_economics(&deal).unwrap();

    for f in &out.monthly_cash_flows[..3] {
        assert!(f.actual_monthly_rent <= Decimal::ZERO);
        assert_eq!(f.actual_monthly_rent.round_dp(2), dec!(-4166.67));
    }
    assert!(out.monthly_cash_flows[3..]
        .iter()
        .all(|f| f.actual_monthly_rent > Decimal::ZERO));
}

#[test]
fn test_net_free_rent_months() {
    let mut deal = office_deal();
    deal.free_rent_months = 3;
    let out = compute_lease_economics(&deal).unwrap();
    assert!(out.monthly_cash_flows[..3]
        .iter()
        .all(|f| f.actual_monthly_rent.is_zero()));
    // 3 * 16,666.67
    assert!((out.concessions.total_free_rent_value - dec!(50000)).abs() < dec!(0.0001));
}

#[test]
fn test_gross_free_rent_costs_more_than_net() {
    let mut gross = office_deal();
    gross.free_rent_months = 6;
    gross.free_rent_basis = FreeRentBasis::Gross;
    let mut net = gross.clone();
    net.free_rent_basis = FreeRentBasis::Net;

    let g = compute_lease_economics(&gross).unwrap();
    let n = compute_lease_economics(&net).unwrap();
    assert!(g.metrics.npv < n.metrics.npv);
    assert!(g.concessions.total_free_rent_value > n.concessions.total_free_rent_value);
}

// ===========================================================================
// Commissions
// ===========================================================================

#[test]
fn test_industrial_year1_commission_per_month() {
    let mut deal = office_deal();
    deal.commission_model = CommissionModel::Industrial {
        listing_fee_year1_pct: dec!(3),
        listing_fee_year2_plus_pct: Decimal::ZERO,
        tenant_rep_fee_year1_pct: dec!(3),
        tenant_rep_fee_year2_plus_pct: Decimal::ZERO,
    };
    let out = compute_lease_economics(&deal).unwrap();

    let per_month = out.monthly_cash_flows[0].full_monthly_base_rent * dec!(0.06);
    assert_eq!(per_month.round_dp(2), dec!(1000.00));
    assert!((out.commissions.total_commissions - per_month * dec!(12)).abs() < dec!(0.0001));
    assert!(out.commissions.year2_plus_commissions.abs() < dec!(0.0001));
}

// ===========================================================================
// Discounting, payback and determinism
// ===========================================================================

#[test]
fn test_pv_falls_as_discount_rate_rises() {
    let mut deal = office_deal();
    let mut last = None;
    for pct in [dec!(0), dec!(3), dec!(6), dec!(9), dec!(15)] {
        deal.discount_rate_annual_pct = pct;
        let pv = compute_lease_economics(&deal).unwrap().metrics.total_pv;
        if let Some(prev) = last {
            assert!(pv < prev);
        }
        last = Some(pv);
    }
}

#[test]
fn test_payback_is_first_month_covering_costs() {
    let mut deal = office_deal();
    deal.ti_allowance_psf = dec!(9); // 90,000 upfront
    let out = compute_lease_economics(&deal).unwrap();

    let upfront = out.metrics.upfront_cost;
    let month = out.summary.payback.month().unwrap();
    let cumulative = |m: u32| -> Decimal {
        out.monthly_cash_flows[..m as usize]
            .iter()
            .map(|f| f.actual_monthly_rent)
            .sum::<Decimal>()
            - upfront
    };
    assert!(cumulative(month) >= Decimal::ZERO);
    assert!(cumulative(month - 1) < Decimal::ZERO);
    assert_eq!(month, 6);
}

#[test]
fn test_payback_unresolved_never_extrapolated() {
    let mut deal = office_deal();
    deal.landlord_work_psf = dec!(150);
    let out = compute_lease_economics(&deal).unwrap();
    assert_eq!(out.summary.payback, Payback::Unresolved { term_months: 60 });
    assert_eq!(out.summary.payback.to_string(), ">60");
}

#[test]
fn test_repeat_invocations_are_identical() {
    let mut deal = office_deal();
    deal.discount_rate_annual_pct = dec!(6.5);
    deal.free_rent_months = 2;
    deal.free_rent_basis = FreeRentBasis::Gross;

    let a = serde_json::to_string(&compute_lease_economics(&deal).unwrap()).unwrap();
    let b = serde_json::to_string(&compute_lease_economics(&deal).unwrap()).unwrap();
    assert_eq!(a, b);
}

// ===========================================================================
// Boundaries
// ===========================================================================

#[test]
fn test_term_beyond_twenty_years_clamps_schedule() {
    let mut deal = office_deal();
    deal.term_months = 250;
    let rates: Vec<Decimal> = (0..20).map(|i| dec!(20) + Decimal::from(i)).collect();
    deal.rent_schedule = RentSchedule::new(&rates).unwrap();
    let out = compute_lease_economics(&deal).unwrap();

    let last = out.monthly_cash_flows.last().unwrap();
    assert_eq!(last.year, 21);
    assert_eq!(last.scheduled_base_rent_psf_annual, dec!(39));
}

#[test]
fn test_short_schedule_reuses_last_defined_year() {
    let mut deal = office_deal();
    deal.term_months = 250;
    deal.rent_schedule = RentSchedule::new(&[dec!(20), dec!(22)]).unwrap();
    let out = compute_lease_economics(&deal).unwrap();
    assert!(out.monthly_cash_flows[12..]
        .iter()
        .all(|f| f.scheduled_base_rent_psf_annual == dec!(22)));
}

#[test]
fn test_zero_square_footage_yields_no_result() {
    let mut deal = office_deal();
    deal.square_footage = Decimal::ZERO;
    match analyze_lease(&deal) {
        Err(LeaseEconError::InsufficientInput { field }) => assert_eq!(field, "square_footage"),
        other => panic!("expected InsufficientInput, got {other:?}"),
    }
}

// ===========================================================================
// Form boundary
// ===========================================================================

#[test]
fn test_form_round_trip_through_engine() {
    let form: DealForm = serde_json::from_str(
        r#"{
            "lease_term": "60",
            "square_footage": "10,000",
            "tmi_psf": "5",
            "escalation_method": "manual",
            "rent_inputs": ["20", "20", "20", "20", "20"]
        }"#,
    )
    .unwrap();
    let deal = form.to_deal_parameters().unwrap();
    // "10,000" reads its leading number only
    assert_eq!(deal.square_footage, dec!(10));

    let out = compute_lease_economics(&deal).unwrap();
    assert_eq!(out.summary.ner, dec!(20.00));
    assert_eq!(out.summary.total_value, dec!(1000));
}

#[test]
fn test_form_with_out_of_range_area_and_rent_is_rejected() {
    let form = DealForm {
        lease_term: "12".into(),
        square_footage: "1e20".into(),
        rent_inputs: vec!["1e10".into()],
        ..DealForm::default()
    };
    let deal = form.to_deal_parameters().unwrap();
    assert!(matches!(
        analyze_lease(&deal),
        Err(LeaseEconError::InvalidInput { .. })
    ));

    let mut deal = deal;
    deal.square_footage = dec!(10000);
    match analyze_lease(&deal) {
        Err(LeaseEconError::InvalidInput { field, .. }) => assert_eq!(field, "rent_schedule"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_form_with_absurd_term_is_rejected_without_projecting() {
    let form = DealForm {
        lease_term: "1e10".into(),
        square_footage: "10000".into(),
        rent_inputs: vec!["20".into()],
        ..DealForm::default()
    };
    let deal = form.to_deal_parameters().unwrap();
    assert_eq!(deal.term_months, u32::MAX);
    match compute_lease_economics(&deal) {
        Err(LeaseEconError::InvalidInput { field, .. }) => assert_eq!(field, "term_months"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
