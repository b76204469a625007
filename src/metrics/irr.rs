//! Time-value-of-money math: NPV, IRR, MIRR
//!
//! IRR uses damped Newton-Raphson on the monthly rate. The damping factor
//! and guess clamps are empirical stabilizers for the short, front-loaded
//! cash-flow series this engine produces; they are exposed on [`IrrParams`]
//! rather than baked in.

use log::warn;

/// Annual discount rate used for NPV and as the MIRR finance rate (percent)
pub const ANNUAL_DISCOUNT_RATE_PCT: f64 = 10.0;

/// Annual reinvestment rate for MIRR (percent)
pub const REINVESTMENT_RATE_PCT: f64 = 8.0;

/// Sentinel for a series that never recovers the investment
pub const IRR_TOTAL_LOSS_PCT: f64 = -100.0;

/// Solver parameters for the Newton-Raphson IRR
#[derive(Debug, Clone, Copy)]
pub struct IrrParams {
    pub max_iterations: u32,
    /// Stop when |NPV| falls below this (reporting-currency units)
    pub npv_tolerance: f64,
    /// Fraction of each Newton step actually applied
    pub damping: f64,
    /// Monthly-rate clamp applied every iteration
    pub guess_min: f64,
    pub guess_max: f64,
    /// Annualized results outside these percent bounds fall back to 0
    pub annual_min_pct: f64,
    pub annual_max_pct: f64,
}

impl Default for IrrParams {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            npv_tolerance: 0.01,
            damping: 0.5,
            guess_min: -0.5,
            guess_max: 2.0,
            annual_min_pct: -100.0,
            annual_max_pct: 1000.0,
        }
    }
}

/// Net present value of monthly flows against an up-front investment.
/// Flow `i` (0-based) is discounted over `i + 1` months.
pub fn npv(flows: &[f64], investment: f64, annual_rate_pct: f64) -> f64 {
    let monthly = annual_rate_pct / 100.0 / 12.0;
    let discounted: f64 = flows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + monthly).powi(i as i32 + 1))
        .sum();
    discounted - investment
}

/// NPV and its derivative with respect to the monthly rate, with the
/// investment as the time-zero outflow
fn npv_and_derivative(flows: &[f64], investment: f64, monthly_rate: f64) -> (f64, f64) {
    let mut value = -investment;
    let mut derivative = 0.0;
    for (i, &cf) in flows.iter().enumerate() {
        let t = i as i32 + 1;
        value += cf / (1.0 + monthly_rate).powi(t);
        derivative -= t as f64 * cf / (1.0 + monthly_rate).powi(t + 1);
    }
    (value, derivative)
}

/// Annualized IRR in percent.
///
/// A series whose flows never add up to the investment returns the −100%
/// sentinel without iterating; a solve that diverges or leaves the sane
/// annual bounds returns 0.
pub fn irr_percent(flows: &[f64], investment: f64, params: &IrrParams) -> f64 {
    if flows.is_empty() {
        return IRR_TOTAL_LOSS_PCT;
    }

    let total: f64 = flows.iter().sum();
    if total - investment <= 0.0 {
        return IRR_TOTAL_LOSS_PCT;
    }

    // Seed from a simple-payback estimate of the monthly return
    let mean_flow = total / flows.len() as f64;
    let mut guess = if investment > 0.0 {
        (mean_flow / investment).clamp(0.001, 0.5)
    } else {
        0.01
    };

    let mut converged = false;
    for _ in 0..params.max_iterations {
        let (value, derivative) = npv_and_derivative(flows, investment, guess);

        if value.abs() < params.npv_tolerance {
            converged = true;
            break;
        }
        if derivative.abs() < 1e-12 {
            break;
        }

        let newton = guess - value / derivative;
        guess += params.damping * (newton - guess);
        guess = guess.clamp(params.guess_min, params.guess_max);
    }

    if !converged {
        warn!("IRR solver did not converge, returning fallback");
        return 0.0;
    }

    let annual_pct = ((1.0 + guess).powi(12) - 1.0) * 100.0;
    if !annual_pct.is_finite()
        || annual_pct < params.annual_min_pct
        || annual_pct > params.annual_max_pct
    {
        warn!("IRR {annual_pct:.2}% outside sanity bounds, returning fallback");
        return 0.0;
    }
    annual_pct
}

/// Modified IRR in percent: negative flows discounted at the finance rate,
/// positive flows compounded at the reinvestment rate, annualized ×12.
pub fn mirr_percent(flows: &[f64], investment: f64) -> f64 {
    let n = flows.len();
    if n == 0 {
        return 0.0;
    }

    let finance_monthly = ANNUAL_DISCOUNT_RATE_PCT / 100.0 / 12.0;
    let reinvest_monthly = REINVESTMENT_RATE_PCT / 100.0 / 12.0;

    let mut pv_negative = investment;
    let mut fv_positive = 0.0;
    for (i, &cf) in flows.iter().enumerate() {
        let t = i + 1;
        if cf < 0.0 {
            pv_negative += -cf / (1.0 + finance_monthly).powi(t as i32);
        } else {
            fv_positive += cf * (1.0 + reinvest_monthly).powi((n - t) as i32);
        }
    }

    if pv_negative <= 0.0 || fv_positive <= 0.0 {
        return 0.0;
    }

    let monthly = (fv_positive / pv_negative).powf(1.0 / n as f64) - 1.0;
    monthly * 12.0 * 100.0
}
