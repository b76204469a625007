//! Investment metrics computed from a cash-flow projection

mod irr;
mod payback;

pub use irr::{
    irr_percent, mirr_percent, npv, IrrParams, ANNUAL_DISCOUNT_RATE_PCT, IRR_TOTAL_LOSS_PCT,
    REINVESTMENT_RATE_PCT,
};
pub use payback::{discounted_payback, payback, Payback};

use serde::{Deserialize, Serialize};

use crate::projection::{CashFlowProjection, DEPRECIATION_MONTHS};

/// Book value of the hardware at the end of a month
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookValuePoint {
    pub month: u32,
    pub depreciation: f64,
    pub accumulated: f64,
    pub book_value: f64,
}

/// Aggregate investment metrics for one projection.
/// Rates and margins are percents; NPV and EBITDA are reporting currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub npv: f64,
    pub irr_percent: f64,
    pub mirr_percent: f64,
    pub payback: Payback,
    pub discounted_payback: Payback,
    pub profitability_index: f64,

    /// Annualized cash profit before depreciation
    pub ebitda: f64,
    pub gross_margin_percent: f64,
    pub operating_margin_percent: f64,
    pub net_margin_percent: f64,
    pub cash_on_cash_percent: f64,

    pub depreciation_schedule: Vec<BookValuePoint>,
}

/// Compute all investment metrics from a projection
pub fn calculate_metrics(projection: &CashFlowProjection) -> InvestmentMetrics {
    calculate_metrics_with(projection, &IrrParams::default())
}

/// Same as [`calculate_metrics`] with explicit IRR solver parameters
pub fn calculate_metrics_with(
    projection: &CashFlowProjection,
    irr_params: &IrrParams,
) -> InvestmentMetrics {
    let investment = projection.initial_investment;
    let flows = projection.net_flows();

    let npv_value = npv(&flows, investment, ANNUAL_DISCOUNT_RATE_PCT);

    // Annualize over the first year of the projection
    let year: Vec<_> = projection.months.iter().take(12).collect();
    let scale = if year.is_empty() { 0.0 } else { 12.0 / year.len() as f64 };
    let revenue: f64 = year.iter().map(|m| m.revenue).sum::<f64>() * scale;
    let power: f64 = year.iter().map(|m| m.power_cost).sum::<f64>() * scale;
    let fees: f64 = year.iter().map(|m| m.pool_fees).sum::<f64>() * scale;
    let maintenance: f64 = year.iter().map(|m| m.maintenance).sum::<f64>() * scale;
    let depreciation: f64 = year.iter().map(|m| m.depreciation).sum::<f64>() * scale;

    let ebitda = revenue - power - fees - maintenance;

    let margin = |numerator: f64| {
        if revenue > 0.0 {
            numerator / revenue * 100.0
        } else {
            0.0
        }
    };

    InvestmentMetrics {
        npv: npv_value,
        irr_percent: irr_percent(&flows, investment, irr_params),
        mirr_percent: mirr_percent(&flows, investment),
        payback: payback(&flows, investment),
        discounted_payback: discounted_payback(&flows, investment),
        profitability_index: if investment > 0.0 {
            (npv_value + investment) / investment
        } else {
            0.0
        },
        ebitda,
        gross_margin_percent: margin(revenue - power - fees),
        operating_margin_percent: margin(ebitda),
        net_margin_percent: margin(ebitda - depreciation),
        cash_on_cash_percent: if investment > 0.0 {
            ebitda / investment * 100.0
        } else {
            0.0
        },
        depreciation_schedule: depreciation_schedule(investment),
    }
}

/// 3-year straight-line depreciation schedule
pub fn depreciation_schedule(investment: f64) -> Vec<BookValuePoint> {
    let monthly = investment / DEPRECIATION_MONTHS as f64;
    (1..=DEPRECIATION_MONTHS)
        .map(|month| {
            let accumulated = monthly * month as f64;
            BookValuePoint {
                month,
                depreciation: monthly,
                accumulated,
                book_value: (investment - accumulated).max(0.0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{CashFlowMonth, CashFlowProjection};

    fn level_projection(monthly_net: f64, investment: f64) -> CashFlowProjection {
        let mut projection = CashFlowProjection::new(investment);
        let mut cumulative = -investment;
        for month in 1..=36 {
            let revenue = monthly_net + 60.0;
            cumulative += monthly_net;
            projection.add_month(CashFlowMonth {
                month,
                btc_mined: 0.003,
                btc_price: 90_000.0,
                network_hashrate_ths: 8.0e8,
                revenue,
                power_cost: 40.0,
                pool_fees: 10.0,
                maintenance: 10.0,
                net_cash_flow: monthly_net,
                cumulative_cash_flow: cumulative,
                depreciation: investment / 36.0,
            });
        }
        projection
    }

    #[test]
    fn metrics_for_profitable_projection() {
        let metrics = calculate_metrics(&level_projection(200.0, 5_000.0));

        assert!(metrics.npv > 0.0);
        assert!(metrics.irr_percent > 0.0);
        assert!(metrics.mirr_percent > 0.0);
        assert!(matches!(metrics.payback, Payback::Months(_)));
        assert!(metrics.profitability_index > 1.0);
        assert!((metrics.ebitda - 200.0 * 12.0).abs() < 1e-9);
    }

    #[test]
    fn margins_ordering() {
        let metrics = calculate_metrics(&level_projection(200.0, 5_000.0));
        // gross excludes maintenance, operating includes it, net also books depreciation
        assert!(metrics.gross_margin_percent > metrics.operating_margin_percent);
        assert!(metrics.operating_margin_percent > metrics.net_margin_percent);
    }

    #[test]
    fn losing_projection_uses_sentinels() {
        let metrics = calculate_metrics(&level_projection(-50.0, 5_000.0));
        assert_eq!(metrics.irr_percent, IRR_TOTAL_LOSS_PCT);
        assert_eq!(metrics.payback, Payback::Never);
        assert!(metrics.npv < 0.0);
    }

    #[test]
    fn depreciation_fully_writes_off() {
        let schedule = depreciation_schedule(36_000.0);
        assert_eq!(schedule.len(), 36);
        assert!((schedule[0].depreciation - 1_000.0).abs() < 1e-9);
        let last = schedule.last().unwrap();
        assert!(last.book_value.abs() < 1e-6);
        assert!((last.accumulated - 36_000.0).abs() < 1e-6);
    }
}
