use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LeaseEconError;
use crate::types::{Money, Percent, Rate};
use crate::LeaseEconResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert a nominal annual percentage (6 = 6%) into a monthly decimal rate.
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / dec!(100) / MONTHS_PER_YEAR
}

/// Present value of a monthly series paid at the start of each period
/// (annuity-due). The first flow is undiscounted, flow `t` is divided by
/// `(1 + rate)^t`.
pub fn present_value_due(rate: Rate, cash_flows: &[Money]) -> LeaseEconResult<Money> {
    if rate <= dec!(-1) {
        return Err(LeaseEconError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            // Past the Decimal range the remaining terms are negligible.
            match discount.checked_mul(one_plus_r) {
                Some(d) => discount = d,
                None => break,
            }
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Present value of `periods` unit payments made at the start of each period.
///
/// Returns `periods` exactly when the rate is zero, otherwise
/// `Σ_{i=0}^{periods-1} 1 / (1 + rate)^i`.
pub fn annuity_due_factor(rate: Rate, periods: u32) -> LeaseEconResult<Decimal> {
    if rate.is_zero() {
        return Ok(Decimal::from(periods));
    }

    let ones = vec![Decimal::ONE; periods as usize];
    present_value_due(rate, &ones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_from_annual_pct() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_pv_first_flow_undiscounted() {
        let cfs = vec![dec!(100), dec!(100)];
        let result = present_value_due(dec!(0.10), &cfs).unwrap();
        // 100 + 100/1.1 = 190.909...
        assert!((result - dec!(190.909)).abs() < dec!(0.001));
    }

    #[test]
    fn test_pv_zero_rate_is_plain_sum() {
        let cfs = vec![dec!(-50), dec!(100), dec!(100)];
        let result = present_value_due(Decimal::ZERO, &cfs).unwrap();
        assert_eq!(result, dec!(150));
    }

    #[test]
    fn test_pv_rejects_rate_at_minus_one() {
        assert!(present_value_due(dec!(-1), &[dec!(1)]).is_err());
    }

    #[test]
    fn test_annuity_due_factor_zero_rate() {
        assert_eq!(annuity_due_factor(Decimal::ZERO, 60).unwrap(), dec!(60));
        assert_eq!(annuity_due_factor(Decimal::ZERO, 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_annuity_due_factor_matches_closed_form() {
        // Closed form: (1 - (1+r)^-n) / r * (1+r), r = 0.5%, n = 60 → ~51.9842
        let factor = annuity_due_factor(dec!(0.005), 60).unwrap();
        assert!((factor - dec!(51.9842)).abs() < dec!(0.001));
    }

    #[test]
    fn test_extreme_rate_does_not_overflow() {
        let flows = vec![dec!(1000); 600];
        let result = present_value_due(dec!(5), &flows).unwrap();
        // 1000 * (1 + 1/6 + 1/36 + ...) = 1200
        assert!((result - dec!(1200)).abs() < dec!(0.0001));
    }
}
