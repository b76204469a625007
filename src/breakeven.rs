//! Closed-form break-even solver
//!
//! No iteration: each break-even value is the algebraic solution of
//! `revenue * (1 - fee) == power cost` for one variable with the others
//! held at the snapshot. Degenerate inputs produce 0 sentinels.

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;
use crate::market::{self, NetworkSnapshot};

/// Break-even values at which daily net profit is exactly zero
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BreakEven {
    /// BTC price at which mining breaks even
    pub price: f64,

    /// Electricity rate ($/kWh) at which mining breaks even
    pub electricity_rate: f64,

    /// Network hashrate (TH/s) at which mining breaks even
    pub network_hashrate_ths: f64,

    /// Difficulty at which mining breaks even
    pub difficulty: f64,

    /// Headroom between current and break-even price, percent of current
    pub safety_margin_percent: f64,
}

/// Solve all break-even values at the given all-in power rate
pub fn solve(config: &MinerConfig, snapshot: &NetworkSnapshot, rate_per_kwh: f64) -> BreakEven {
    let keep = 1.0 - config.pool_fee_percent / 100.0;
    let daily_btc = market::daily_btc_mined(config, snapshot);
    let daily_kwh = market::daily_power_kwh(config);
    let daily_power = market::daily_power_cost(config, rate_per_kwh);
    let daily_revenue = market::daily_revenue(config, snapshot);

    let price = if daily_btc > 0.0 && keep > 0.0 {
        daily_power / (daily_btc * keep)
    } else {
        0.0
    };

    let electricity_rate = if daily_kwh > 0.0 {
        daily_revenue * keep / daily_kwh
    } else {
        0.0
    };

    // Yield that makes revenue net of fees equal the power bill; the
    // network can grow by the ratio of current to required yield.
    let required_btc = if snapshot.btc_price > 0.0 && keep > 0.0 {
        daily_power / (snapshot.btc_price * keep)
    } else {
        0.0
    };
    let scale = if required_btc > 0.0 {
        daily_btc / required_btc
    } else {
        0.0
    };

    let safety_margin_percent = if snapshot.btc_price > 0.0 {
        (snapshot.btc_price - price) / snapshot.btc_price * 100.0
    } else {
        0.0
    };

    BreakEven {
        price,
        electricity_rate,
        network_hashrate_ths: snapshot.network_hashrate_ths * scale,
        difficulty: snapshot.difficulty * scale,
        safety_margin_percent,
    }
}
