//! Cash-flow output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowMonth {
    /// 1-based month index
    pub month: u32,

    // Production
    pub btc_mined: f64,
    pub btc_price: f64,
    pub network_hashrate_ths: f64,

    // Cash items
    pub revenue: f64,
    pub power_cost: f64,
    pub pool_fees: f64,
    pub maintenance: f64,
    pub net_cash_flow: f64,
    pub cumulative_cash_flow: f64,

    /// Straight-line book depreciation; non-cash, excluded from net_cash_flow
    pub depreciation: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub initial_investment: f64,
    pub months: Vec<CashFlowMonth>,
}

impl CashFlowProjection {
    pub fn new(initial_investment: f64) -> Self {
        Self {
            initial_investment,
            months: Vec::new(),
        }
    }

    pub fn add_month(&mut self, row: CashFlowMonth) {
        self.months.push(row);
    }

    pub fn horizon_months(&self) -> u32 {
        self.months.len() as u32
    }

    /// Monthly net cash flows, excluding the initial investment
    pub fn net_flows(&self) -> Vec<f64> {
        self.months.iter().map(|m| m.net_cash_flow).collect()
    }

    pub fn total_net_cash_flow(&self) -> f64 {
        self.months.iter().map(|m| m.net_cash_flow).sum()
    }

    pub fn mean_monthly_net(&self) -> f64 {
        if self.months.is_empty() {
            return 0.0;
        }
        self.total_net_cash_flow() / self.months.len() as f64
    }

    /// Summary totals over the horizon
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_months: self.months.len() as u32,
            total_revenue: self.months.iter().map(|m| m.revenue).sum(),
            total_power_cost: self.months.iter().map(|m| m.power_cost).sum(),
            total_pool_fees: self.months.iter().map(|m| m.pool_fees).sum(),
            total_maintenance: self.months.iter().map(|m| m.maintenance).sum(),
            total_btc_mined: self.months.iter().map(|m| m.btc_mined).sum(),
            total_net_cash_flow: self.total_net_cash_flow(),
            final_cumulative: self
                .months
                .last()
                .map(|m| m.cumulative_cash_flow)
                .unwrap_or(-self.initial_investment),
        }
    }
}

/// Summary totals for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_revenue: f64,
    pub total_power_cost: f64,
    pub total_pool_fees: f64,
    pub total_maintenance: f64,
    pub total_btc_mined: f64,
    pub total_net_cash_flow: f64,
    pub final_cumulative: f64,
}
