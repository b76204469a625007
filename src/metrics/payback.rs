//! Payback period with explicit non-recovery sentinels

use serde::{Deserialize, Serialize};
use std::fmt;

use super::irr::ANNUAL_DISCOUNT_RATE_PCT;

/// When cumulative cash flow turns non-negative.
///
/// `Never` means the series genuinely does not recover (mean monthly flow
/// at or below zero); `BeyondHorizon` means the run is profitable on
/// average and would recover at roughly the estimated month if extended.
/// Callers render the two cases differently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payback {
    /// Recovered within the horizon, linearly interpolated
    Months(f64),
    /// Not recovered in the horizon, but on track; estimate in months from start
    BeyondHorizon { estimated_months: f64 },
    Never,
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Months(m) => write!(f, "{m:.1} mo"),
            Payback::BeyondHorizon { estimated_months } => {
                write!(f, "> horizon (~{estimated_months:.0} mo)")
            }
            Payback::Never => write!(f, "Never"),
        }
    }
}

/// Payback from undiscounted monthly flows against an up-front investment
pub fn payback(flows: &[f64], investment: f64) -> Payback {
    payback_of_series(flows, investment)
}

/// Payback over flows discounted at the standard 10% annual rate
pub fn discounted_payback(flows: &[f64], investment: f64) -> Payback {
    let monthly = ANNUAL_DISCOUNT_RATE_PCT / 100.0 / 12.0;
    let discounted: Vec<f64> = flows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + monthly).powi(i as i32 + 1))
        .collect();
    payback_of_series(&discounted, investment)
}

fn payback_of_series(flows: &[f64], investment: f64) -> Payback {
    if investment <= 0.0 {
        return Payback::Months(0.0);
    }
    if flows.is_empty() {
        return Payback::Never;
    }

    let mut cumulative = -investment;
    for (i, &cf) in flows.iter().enumerate() {
        let previous = cumulative;
        cumulative += cf;
        if cumulative >= 0.0 {
            // Interpolate inside the recovering month
            let fraction = if cf > 0.0 { -previous / cf } else { 0.0 };
            return Payback::Months(i as f64 + fraction);
        }
    }

    let mean = flows.iter().sum::<f64>() / flows.len() as f64;
    if mean <= 0.0 {
        return Payback::Never;
    }

    // Profitable on average: extrapolate the remaining deficit
    let extra_months = -cumulative / mean;
    Payback::BeyondHorizon {
        estimated_months: flows.len() as f64 + extra_months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_recovery_month() {
        // -1000 then 100/month: recovered during month 10
        let flows = vec![100.0; 36];
        match payback(&flows, 1_000.0) {
            Payback::Months(m) => assert!((m - 10.0).abs() < 1e-9, "months {}", m),
            other => panic!("expected Months, got {:?}", other),
        }
    }

    #[test]
    fn interpolated_recovery() {
        // Deficit of 50 entering the recovering month of 100: half a month
        let flows = vec![250.0, 100.0];
        match payback(&flows, 300.0) {
            Payback::Months(m) => assert!((m - 1.5).abs() < 1e-9, "months {}", m),
            other => panic!("expected Months, got {:?}", other),
        }
    }

    #[test]
    fn payback_is_first_nonnegative_index() {
        let flows = vec![60.0, -10.0, 80.0, 5.0];
        let investment = 100.0;
        let result = payback(&flows, investment);

        // Walk the cumulative series by hand
        let mut cumulative = -investment;
        let mut first = None;
        for (i, &cf) in flows.iter().enumerate() {
            cumulative += cf;
            if cumulative >= 0.0 {
                first = Some(i);
                break;
            }
        }
        match (result, first) {
            (Payback::Months(m), Some(i)) => {
                assert!(m >= i as f64 && m < i as f64 + 1.0);
            }
            other => panic!("mismatch: {:?}", other),
        }
    }

    #[test]
    fn never_iff_mean_nonpositive() {
        let flows = vec![-5.0; 36];
        assert_eq!(payback(&flows, 1_000.0), Payback::Never);

        let flows = vec![1.0; 36];
        match payback(&flows, 1_000.0) {
            Payback::BeyondHorizon { estimated_months } => {
                // 1000 deficit at 1/month: ~1000 months total
                assert!((estimated_months - 1_000.0).abs() < 1e-6);
            }
            other => panic!("expected BeyondHorizon, got {:?}", other),
        }
    }

    #[test]
    fn discounted_payback_is_later() {
        let flows = vec![100.0; 36];
        let plain = payback(&flows, 1_000.0);
        let discounted = discounted_payback(&flows, 1_000.0);
        match (plain, discounted) {
            (Payback::Months(p), Payback::Months(d)) => assert!(d > p),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn renders_distinct_labels() {
        assert_eq!(Payback::Never.to_string(), "Never");
        assert!(Payback::BeyondHorizon { estimated_months: 41.0 }
            .to_string()
            .contains("~41"));
    }
}
