//! Network snapshot and daily production math
//!
//! The snapshot is a pre-resolved point-in-time view of the network supplied
//! by a market-data collaborator. Everything downstream (projection,
//! break-even, sensitivity, scenarios) derives from the daily figures
//! computed here, so they all agree on the same formulas.

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;

/// Point-in-time network and price state used for a calculation.
///
/// Hashrates are expressed in TH/s throughout the engine; prices in the
/// reporting currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// BTC price in the reporting currency
    pub btc_price: f64,

    /// Network difficulty
    pub difficulty: f64,

    /// Total network hashrate (TH/s)
    pub network_hashrate_ths: f64,

    /// Current block subsidy (BTC)
    pub block_reward: f64,

    /// Average block interval in minutes
    pub avg_block_time_minutes: f64,

    /// Days until the next halving (informational, not used in projections)
    pub next_halving_days: u32,
}

impl NetworkSnapshot {
    /// Expected blocks per day at the snapshot's average block interval
    pub fn blocks_per_day(&self) -> f64 {
        if self.avg_block_time_minutes <= 0.0 {
            return 0.0;
        }
        1440.0 / self.avg_block_time_minutes
    }
}

/// Fleet's share of the network hashrate
pub fn hashrate_share(config: &MinerConfig, snapshot: &NetworkSnapshot) -> f64 {
    if snapshot.network_hashrate_ths <= 0.0 {
        return 0.0;
    }
    config.total_hashrate_ths() / snapshot.network_hashrate_ths
}

/// Expected BTC mined per day by the whole fleet
pub fn daily_btc_mined(config: &MinerConfig, snapshot: &NetworkSnapshot) -> f64 {
    hashrate_share(config, snapshot) * snapshot.blocks_per_day() * snapshot.block_reward
}

/// Daily revenue before fees, at the snapshot price
pub fn daily_revenue(config: &MinerConfig, snapshot: &NetworkSnapshot) -> f64 {
    daily_btc_mined(config, snapshot) * snapshot.btc_price
}

/// Energy drawn per day by the whole fleet (kWh)
pub fn daily_power_kwh(config: &MinerConfig) -> f64 {
    config.total_power_kw() * 24.0
}

/// Daily electricity spend at a given all-in rate ($/kWh)
pub fn daily_power_cost(config: &MinerConfig, rate_per_kwh: f64) -> f64 {
    daily_power_kwh(config) * rate_per_kwh
}

/// Daily pool fees (percent of revenue)
pub fn daily_pool_fees(config: &MinerConfig, snapshot: &NetworkSnapshot) -> f64 {
    daily_revenue(config, snapshot) * config.pool_fee_percent / 100.0
}

/// Daily net profit: revenue less power and pool fees.
///
/// Maintenance is charged monthly against total investment and is not part
/// of the daily figure; see [`annual_net_profit`].
pub fn daily_net_profit(config: &MinerConfig, snapshot: &NetworkSnapshot, rate_per_kwh: f64) -> f64 {
    daily_revenue(config, snapshot)
        - daily_power_cost(config, rate_per_kwh)
        - daily_pool_fees(config, snapshot)
}

/// Annual net profit: daily profit over 365 days less the annual
/// maintenance charge on the hardware investment.
pub fn annual_net_profit(
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    rate_per_kwh: f64,
) -> f64 {
    let maintenance = config.total_investment() * config.maintenance_percent / 100.0;
    daily_net_profit(config, snapshot, rate_per_kwh) * 365.0 - maintenance
}
