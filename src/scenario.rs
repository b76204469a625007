//! Macro scenario modeling
//!
//! A fixed set of named market scenarios, each a triple of annual growth
//! assumptions (price, difficulty, electricity). Each assumption ramps in
//! linearly over the 3-year horizon: year y uses `1 + growth * y/3`.

use serde::{Deserialize, Serialize};

use crate::config::MinerConfig;
use crate::market::{self, NetworkSnapshot};

/// Scenario horizon in years
pub const SCENARIO_YEARS: u32 = 3;

/// Growth assumptions for one named scenario (whole-number percents over
/// the full horizon)
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub price_growth_percent: f64,
    pub difficulty_growth_percent: f64,
    pub electricity_growth_percent: f64,
    pub probability: &'static str,
}

/// The fixed scenario set evaluated for every calculation
pub const SCENARIOS: [ScenarioDefinition; 5] = [
    ScenarioDefinition {
        name: "Bull Market",
        description: "Sustained rally; hashrate chases price upward",
        price_growth_percent: 150.0,
        difficulty_growth_percent: 80.0,
        electricity_growth_percent: 10.0,
        probability: "Medium",
    },
    ScenarioDefinition {
        name: "Bear Market",
        description: "Prolonged drawdown with sticky difficulty",
        price_growth_percent: -45.0,
        difficulty_growth_percent: 20.0,
        electricity_growth_percent: 5.0,
        probability: "Medium",
    },
    ScenarioDefinition {
        name: "Consolidation",
        description: "Sideways price while the network keeps growing",
        price_growth_percent: 20.0,
        difficulty_growth_percent: 40.0,
        electricity_growth_percent: 8.0,
        probability: "High",
    },
    ScenarioDefinition {
        name: "Super Cycle",
        description: "Parabolic adoption wave and a mining arms race",
        price_growth_percent: 300.0,
        difficulty_growth_percent: 150.0,
        electricity_growth_percent: 15.0,
        probability: "Low",
    },
    ScenarioDefinition {
        name: "Mining Exodus",
        description: "Capacity leaves the network faster than price moves",
        price_growth_percent: 10.0,
        difficulty_growth_percent: -30.0,
        electricity_growth_percent: 3.0,
        probability: "Low",
    },
];

/// Outcome of one scenario over the 3-year horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    pub price_growth_percent: f64,
    pub difficulty_growth_percent: f64,
    pub electricity_growth_percent: f64,
    pub year_profits: [f64; SCENARIO_YEARS as usize],
    pub total_profit: f64,
    pub roi_percent: f64,
    pub probability: String,
}

/// Evaluate one scenario definition against the base snapshot
pub fn evaluate_scenario(
    definition: &ScenarioDefinition,
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    rate_per_kwh: f64,
) -> ScenarioResult {
    let mut year_profits = [0.0; SCENARIO_YEARS as usize];

    for year in 1..=SCENARIO_YEARS {
        let ramp = year as f64 / SCENARIO_YEARS as f64;
        let mut scaled = snapshot.clone();
        scaled.btc_price = snapshot.btc_price * (1.0 + definition.price_growth_percent / 100.0 * ramp);
        scaled.network_hashrate_ths =
            snapshot.network_hashrate_ths * (1.0 + definition.difficulty_growth_percent / 100.0 * ramp);
        let rate = rate_per_kwh * (1.0 + definition.electricity_growth_percent / 100.0 * ramp);

        year_profits[(year - 1) as usize] = market::annual_net_profit(config, &scaled, rate);
    }

    let total_profit: f64 = year_profits.iter().sum();
    let investment = config.total_investment();

    ScenarioResult {
        name: definition.name.to_string(),
        description: definition.description.to_string(),
        price_growth_percent: definition.price_growth_percent,
        difficulty_growth_percent: definition.difficulty_growth_percent,
        electricity_growth_percent: definition.electricity_growth_percent,
        year_profits,
        total_profit,
        roi_percent: if investment > 0.0 {
            total_profit / investment * 100.0
        } else {
            0.0
        },
        probability: definition.probability.to_string(),
    }
}

/// Evaluate the whole fixed scenario set
pub fn evaluate_all(
    config: &MinerConfig,
    snapshot: &NetworkSnapshot,
    rate_per_kwh: f64,
) -> Vec<ScenarioResult> {
    SCENARIOS
        .iter()
        .map(|definition| evaluate_scenario(definition, config, snapshot, rate_per_kwh))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MinerConfig {
        MinerConfig {
            hashrate_ths: 200.0,
            power_draw_watts: 3_500.0,
            units: 2,
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
    fn five_scenarios_evaluated() {
        let results = evaluate_all(&config(), &snapshot(), 0.05);
        assert_eq!(results.len(), 5);
        for r in &results {
            let sum: f64 = r.year_profits.iter().sum();
            assert!((r.total_profit - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn profit_monotone_in_price_growth() {
        // Same scenario with increasing price growth, all else fixed
        let base = ScenarioDefinition {
            name: "probe",
            description: "",
            price_growth_percent: 0.0,
            difficulty_growth_percent: 40.0,
            electricity_growth_percent: 8.0,
            probability: "High",
        };

        let mut previous = f64::NEG_INFINITY;
        for growth in [-50.0, 0.0, 50.0, 150.0, 300.0] {
            let definition = ScenarioDefinition {
                price_growth_percent: growth,
                ..base.clone()
            };
            let result = evaluate_scenario(&definition, &config(), &snapshot(), 0.05);
            assert!(
                result.total_profit >= previous,
                "profit not monotone at growth {}",
                growth
            );
            previous = result.total_profit;
        }
    }

    #[test]
    fn super_cycle_beats_bear() {
        let results = evaluate_all(&config(), &snapshot(), 0.05);
        let by_name = |name: &str| results.iter().find(|r| r.name == name).unwrap();
        assert!(by_name("Super Cycle").total_profit > by_name("Bear Market").total_profit);
    }

    #[test]
    fn roi_scaled_by_investment() {
        let results = evaluate_all(&config(), &snapshot(), 0.05);
        let first = &results[0];
        let expected = first.total_profit / 10_000.0 * 100.0;
        assert!((first.roi_percent - expected).abs() < 1e-9);
    }
}
