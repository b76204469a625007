//! Monthly cash-flow projection engine
//!
//! The default projection holds the snapshot's price and network hashrate
//! constant across the horizon so the series stays consistent with the
//! point-in-time daily figures reported elsewhere. A compounding growth
//! mode exists for what-if runs but is deliberately not the default:
//! mixing growth into the base series makes NPV/IRR disagree with the
//! single-period numbers.

use serde::{Deserialize, Serialize};

use super::cashflows::{CashFlowMonth, CashFlowProjection};
use crate::config::{MinerConfig, OperatingMode};
use crate::error::{EngineError, Result};
use crate::market::NetworkSnapshot;

/// Depreciation horizon: 3-year straight-line
pub const DEPRECIATION_MONTHS: u32 = 36;

/// Default projection horizon
pub const DEFAULT_HORIZON_MONTHS: u32 = 36;

/// Monthly compounding growth applied to the snapshot (percent per month)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthAssumptions {
    pub price_growth_percent: f64,
    pub difficulty_growth_percent: f64,
}

/// Configuration for a projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub horizon_months: u32,

    /// Optional compounding growth; `None` holds the snapshot constant
    pub growth: Option<GrowthAssumptions>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            growth: None,
        }
    }
}

/// Project monthly cash flows for a fleet under the given mode.
///
/// Depreciation is tracked for book value only and never subtracted from
/// the net cash flow.
pub fn project_cash_flows(
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    mode: OperatingMode,
    projection: &ProjectionConfig,
) -> Result<CashFlowProjection> {
    config.validate(mode)?;
    if projection.horizon_months == 0 {
        return Err(EngineError::EmptyHorizon);
    }

    let investment = config.total_investment();
    let rate = config.power_rate(mode);
    let monthly_kwh = config.total_power_kw() * 24.0 * 30.0;
    let monthly_maintenance = investment * config.maintenance_percent / 100.0 / 12.0;
    let monthly_depreciation = investment / DEPRECIATION_MONTHS as f64;

    let mut result = CashFlowProjection::new(investment);
    let mut cumulative = -investment;

    for month in 1..=projection.horizon_months {
        let (price_factor, difficulty_factor) = match projection.growth {
            Some(g) => (
                (1.0 + g.price_growth_percent / 100.0).powi(month as i32 - 1),
                (1.0 + g.difficulty_growth_percent / 100.0).powi(month as i32 - 1),
            ),
            None => (1.0, 1.0),
        };

        let price = snapshot.btc_price * price_factor;
        let network_hashrate = snapshot.network_hashrate_ths * difficulty_factor;

        let share = if network_hashrate > 0.0 {
            config.total_hashrate_ths() / network_hashrate
        } else {
            0.0
        };
        let btc_mined = share * snapshot.blocks_per_day() * 30.0 * snapshot.block_reward;

        let revenue = btc_mined * price;
        let power_cost = monthly_kwh * rate;
        let pool_fees = revenue * config.pool_fee_percent / 100.0;
        let net_cash_flow = revenue - power_cost - pool_fees - monthly_maintenance;
        cumulative += net_cash_flow;

        result.add_month(CashFlowMonth {
            month,
            btc_mined,
            btc_price: price,
            network_hashrate_ths: network_hashrate,
            revenue,
            power_cost,
            pool_fees,
            maintenance: monthly_maintenance,
            net_cash_flow,
            cumulative_cash_flow: cumulative,
            depreciation: if month <= DEPRECIATION_MONTHS {
                monthly_depreciation
            } else {
                0.0
            },
        });
    }

    Ok(result)
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
            maintenance_percent: 2.0,
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
    fn cumulative_recurrence_holds() {
        let proj =
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &ProjectionConfig::default())
                .unwrap();

        assert_eq!(proj.months.len(), 36);
        let first = &proj.months[0];
        assert!(
            (first.cumulative_cash_flow - (first.net_cash_flow - proj.initial_investment)).abs()
                < 1e-9
        );
        for pair in proj.months.windows(2) {
            let expected = pair[0].cumulative_cash_flow + pair[1].net_cash_flow;
            assert!((pair[1].cumulative_cash_flow - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn constant_snapshot_gives_level_months() {
        let proj =
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &ProjectionConfig::default())
                .unwrap();
        let first = &proj.months[0];
        let last = &proj.months[35];
        assert!((first.revenue - last.revenue).abs() < 1e-9);
        assert!((first.net_cash_flow - last.net_cash_flow).abs() < 1e-9);
        // 30-day months: monthly revenue = 30x the ~10.125 daily figure
        assert!((first.revenue - 303.75).abs() < 0.1, "revenue {}", first.revenue);
    }

    #[test]
    fn depreciation_is_cash_flow_neutral() {
        let proj =
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &ProjectionConfig::default())
                .unwrap();
        let m = &proj.months[0];
        let expected_net = m.revenue - m.power_cost - m.pool_fees - m.maintenance;
        assert!((m.net_cash_flow - expected_net).abs() < 1e-9);
        assert!((m.depreciation - 5_000.0 / 36.0).abs() < 1e-9);
    }

    #[test]
    fn hosting_mode_uses_hosting_rate() {
        let self_mining =
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &ProjectionConfig::default())
                .unwrap();
        let hosted =
            project_cash_flows(&config(), &snapshot(), OperatingMode::Hosting, &ProjectionConfig::default())
                .unwrap();
        assert!(hosted.months[0].power_cost > self_mining.months[0].power_cost);
    }

    #[test]
    fn growth_mode_compounds() {
        let growth = ProjectionConfig {
            horizon_months: 12,
            growth: Some(GrowthAssumptions {
                price_growth_percent: 2.0,
                difficulty_growth_percent: 0.0,
            }),
        };
        let proj =
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &growth).unwrap();
        assert!(proj.months[11].revenue > proj.months[0].revenue);
        assert!((proj.months[1].btc_price - 90_000.0 * 1.02).abs() < 1e-6);
    }

    #[test]
    fn zero_horizon_rejected() {
        let bad = ProjectionConfig {
            horizon_months: 0,
            growth: None,
        };
        assert!(matches!(
            project_cash_flows(&config(), &snapshot(), OperatingMode::SelfMining, &bad),
            Err(EngineError::EmptyHorizon)
        ));
    }
}
