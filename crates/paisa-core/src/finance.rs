//! Loan amortization math.
//!
//! Standard EMI formula with the annual percentage rate converted to a
//! monthly fraction. All monetary outputs are rounded to two decimals,
//! and the totals are derived from the rounded monthly payment so the
//! schedule is internally consistent (payment * months == total payable).

use serde::Serialize;

use crate::error::{Error, Result};

/// Derived repayment schedule for a loan
#[derive(Debug, Clone, Serialize)]
pub struct EmiSchedule {
    /// Fixed monthly installment
    pub emi_amount: f64,
    /// Interest paid over the full tenure
    pub total_interest: f64,
    /// Principal plus interest over the full tenure
    pub total_payable: f64,
}

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the fixed monthly installment for a loan.
///
/// `annual_rate` is a percentage (10 means 10% per year). A zero rate is
/// a valid interest-free loan and divides the principal evenly across the
/// tenure.
pub fn compute_emi(principal: f64, annual_rate: f64, tenure_months: u32) -> Result<EmiSchedule> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "principal must be a positive number, got {}",
            principal
        )));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(Error::InvalidInput(format!(
            "interest rate must be a non-negative number, got {}",
            annual_rate
        )));
    }
    if tenure_months == 0 {
        return Err(Error::InvalidInput(
            "tenure must be at least one month".to_string(),
        ));
    }

    let months = tenure_months as f64;
    let monthly_rate = annual_rate / (12.0 * 100.0);

    let emi_amount = if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
        round2(principal * monthly_rate * growth / (growth - 1.0))
    } else {
        round2(principal / months)
    };

    let total_payable = round2(emi_amount * months);
    let total_interest = round2(total_payable - principal);

    Ok(EmiSchedule {
        emi_amount,
        total_interest,
        total_payable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_standard_loan() {
        // 1 lakh at 10% over a year
        let schedule = compute_emi(100000.0, 10.0, 12).unwrap();
        assert_eq!(schedule.emi_amount, 8791.59);
        assert_eq!(schedule.total_payable, 105499.08);
        assert_eq!(schedule.total_interest, 5499.08);
    }

    #[test]
    fn test_emi_zero_rate_divides_evenly() {
        let schedule = compute_emi(12000.0, 0.0, 12).unwrap();
        assert_eq!(schedule.emi_amount, 1000.0);
        assert_eq!(schedule.total_payable, 12000.0);
        assert_eq!(schedule.total_interest, 0.0);
    }

    #[test]
    fn test_emi_zero_rate_rounds_payment() {
        let schedule = compute_emi(1000.0, 0.0, 3).unwrap();
        assert_eq!(schedule.emi_amount, 333.33);
        // Totals follow the rounded payment
        assert_eq!(schedule.total_payable, 999.99);
        assert_eq!(schedule.total_interest, -0.01);
    }

    #[test]
    fn test_emi_rejects_bad_terms() {
        assert!(compute_emi(0.0, 10.0, 12).is_err());
        assert!(compute_emi(-5000.0, 10.0, 12).is_err());
        assert!(compute_emi(100000.0, -1.0, 12).is_err());
        assert!(compute_emi(100000.0, 10.0, 0).is_err());
        assert!(compute_emi(f64::NAN, 10.0, 12).is_err());
        assert!(compute_emi(100000.0, f64::INFINITY, 12).is_err());
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        // 0.125 is exact in binary, so this exercises a true .5 tie
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
    }
}
