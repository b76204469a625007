//! Tornado sensitivity analysis
//!
//! Each tracked variable is perturbed to 80% and 120% of its base value
//! with the others held fixed, and the variables are ranked by the swing
//! they produce in annual profit.

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;
use crate::market::{self, NetworkSnapshot};

/// Perturbation applied to each side of the base case (percent)
pub const PERTURBATION_PCT: f64 = 20.0;

/// Impact of one variable on annual profit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TornadoItem {
    pub variable: String,

    /// Annual profit with the variable at 80% of base
    pub low_case: f64,
    pub base_case: f64,
    /// Annual profit with the variable at 120% of base
    pub high_case: f64,

    /// |high - low|
    pub impact: f64,

    /// Percent change in profit per 1% change in the variable
    pub sensitivity: f64,
}

#[derive(Debug, Clone, Copy)]
enum Variable {
    BtcPrice,
    ElectricityRate,
    NetworkHashrate,
    PoolFee,
    UnitCount,
}

impl Variable {
    const ALL: [Variable; 5] = [
        Variable::BtcPrice,
        Variable::ElectricityRate,
        Variable::NetworkHashrate,
        Variable::PoolFee,
        Variable::UnitCount,
    ];

    fn label(self) -> &'static str {
        match self {
            Variable::BtcPrice => "BTC Price",
            Variable::ElectricityRate => "Electricity Rate",
            Variable::NetworkHashrate => "Network Hashrate",
            Variable::PoolFee => "Pool Fee",
            Variable::UnitCount => "Unit Count",
        }
    }
}

/// Annual profit with one variable scaled by `factor`
fn profit_at(
    variable: Variable,
    factor: f64,
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    rate_per_kwh: f64,
) -> f64 {
    let mut config = config.clone();
    let mut snapshot = snapshot.clone();
    let mut rate = rate_per_kwh;

    match variable {
        Variable::BtcPrice => snapshot.btc_price *= factor,
        Variable::ElectricityRate => rate *= factor,
        Variable::NetworkHashrate => snapshot.network_hashrate_ths *= factor,
        Variable::PoolFee => config.pool_fee_percent *= factor,
        // Fleet size is perturbed continuously: hashrate, draw, and
        // investment all scale with it
        Variable::UnitCount => {
            config.hashrate_ths *= factor;
            config.power_draw_watts *= factor;
            config.hardware_cost_per_unit *= factor;
        }
    }

    market::annual_net_profit(&config, &snapshot, rate)
}

/// Rank all tracked variables by their impact on annual profit,
/// highest impact first
pub fn tornado(
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    rate_per_kwh: f64,
) -> Vec<TornadoItem> {
    let base = market::annual_net_profit(config, snapshot, rate_per_kwh);
    let low_factor = 1.0 - PERTURBATION_PCT / 100.0;
    let high_factor = 1.0 + PERTURBATION_PCT / 100.0;

    let mut items: Vec<TornadoItem> = Variable::ALL
        .iter()
        .map(|&variable| {
            let low = profit_at(variable, low_factor, config, snapshot, rate_per_kwh);
            let high = profit_at(variable, high_factor, config, snapshot, rate_per_kwh);
            let impact = (high - low).abs();
            let sensitivity = if base.abs() > 0.0 {
                impact / base.abs() * 100.0 / (2.0 * PERTURBATION_PCT)
            } else {
                0.0
            };
            TornadoItem {
                variable: variable.label().to_string(),
                low_case: low,
                base_case: base,
                high_case: high,
                impact,
                sensitivity,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}
