//! Weighted risk scoring
//!
//! Sub-scores are on a 0-100 scale. Price and difficulty risk are fixed
//! baselines reflecting historical BTC volatility and network growth;
//! operational risk tracks fleet efficiency (W/TH), and exposure tracks
//! how much of revenue the power bill eats.

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;
use crate::market::{self, NetworkSnapshot};

/// Historical BTC price volatility baseline
pub const PRICE_VOLATILITY_BASELINE: f64 = 65.0;

/// Historical network difficulty growth baseline
pub const DIFFICULTY_GROWTH_BASELINE: f64 = 55.0;

/// W/TH multiplier mapping fleet efficiency onto the 0-100 scale
const EFFICIENCY_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskScores {
    pub price_volatility: f64,
    pub difficulty_growth: f64,
    pub operational: f64,
    pub power_cost_exposure: f64,
    pub overall: f64,
}

/// Score a configuration against a snapshot at the given power rate
pub fn score(config: &MinerConfig, snapshot: &NetworkSnapshot, rate_per_kwh: f64) -> RiskScores {
    let efficiency_w_per_th = if config.hashrate_ths > 0.0 {
        config.power_draw_watts / config.hashrate_ths
    } else {
        0.0
    };
    let operational = (efficiency_w_per_th * EFFICIENCY_SCALE).clamp(0.0, 100.0);

    let revenue = market::daily_revenue(config, snapshot);
    let power = market::daily_power_cost(config, rate_per_kwh);
    let power_cost_exposure = if revenue > 0.0 {
        (power / revenue * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };

    let overall = 0.4 * PRICE_VOLATILITY_BASELINE
        + 0.3 * DIFFICULTY_GROWTH_BASELINE
        + 0.2 * operational
        + 0.1 * power_cost_exposure;

    RiskScores {
        price_volatility: PRICE_VOLATILITY_BASELINE,
        difficulty_growth: DIFFICULTY_GROWTH_BASELINE,
        operational,
        power_cost_exposure,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MinerConfig {
        MinerConfig {
            hashrate_ths: 200.0,
            power_draw_watts: 3_500.0,
            units: 1,
            hardware_cost_per_unit: 5_000.0,
            pool_fee_percent: 1.5,
            maintenance_percent: 0.0,
            electricity_rate: 0.05,
            hosting_fee_rate: 0.07,
        }
    }

    fn snapshot() -> NetworkSnapshot {
        NetworkSnapshot {
            btc_price: 90_000.0,
            difficulty: 110e12,
            network_hashrate_ths: 8.0e8,
            block_reward: 3.125,
            avg_block_time_minutes: 10.0,
            next_halving_days: 700,
        }
    }

    #[test]
    fn scores_within_bounds() {
        let scores = score(&config(), &snapshot(), 0.05);
        for s in [
            scores.price_volatility,
            scores.difficulty_growth,
            scores.operational,
            scores.power_cost_exposure,
            scores.overall,
        ] {
            assert!((0.0..=100.0).contains(&s), "score out of range: {}", s);
        }
    }

    #[test]
    fn overall_is_weighted_sum() {
        let scores = score(&config(), &snapshot(), 0.05);
        let expected = 0.4 * scores.price_volatility
            + 0.3 * scores.difficulty_growth
            + 0.2 * scores.operational
            + 0.1 * scores.power_cost_exposure;
        assert!((scores.overall - expected).abs() < 1e-12);
    }

    #[test]
    fn efficient_rig_scores_lower_operational() {
        let base = score(&config(), &snapshot(), 0.05);

        let mut efficient = config();
        efficient.power_draw_watts = 2_400.0; // 12 W/TH
        let better = score(&efficient, &snapshot(), 0.05);
        assert!(better.operational < base.operational);
        // 17.5 W/TH at scale 2 lands at 35
        assert!((base.operational - 35.0).abs() < 1e-9);
    }

    #[test]
    fn zero_revenue_maxes_exposure() {
        let mut snap = snapshot();
        snap.btc_price = 0.0;
        let scores = score(&config(), &snap, 0.05);
        assert_eq!(scores.power_cost_exposure, 100.0);
    }
}
