//! Compare full-analysis results across a set of hardware presets
//!
//! Runs every preset in parallel against the same snapshot and prints a
//! ranking by NPV.

use mining_economics::{run_full_analysis, MinerConfig, NetworkSnapshot, OperatingMode};
use rayon::prelude::*;
use std::time::Instant;

struct Preset {
    name: &'static str,
    hashrate_ths: f64,
    power_draw_watts: f64,
    hardware_cost_per_unit: f64,
}

const PRESETS: [Preset; 5] = [
    Preset { name: "S19j Pro", hashrate_ths: 104.0, power_draw_watts: 3_068.0, hardware_cost_per_unit: 2_100.0 },
    Preset { name: "S19 XP", hashrate_ths: 140.0, power_draw_watts: 3_010.0, hardware_cost_per_unit: 3_400.0 },
    Preset { name: "S21", hashrate_ths: 200.0, power_draw_watts: 3_500.0, hardware_cost_per_unit: 5_000.0 },
    Preset { name: "S21 Pro", hashrate_ths: 234.0, power_draw_watts: 3_510.0, hardware_cost_per_unit: 6_300.0 },
    Preset { name: "M60S", hashrate_ths: 186.0, power_draw_watts: 3_441.0, hardware_cost_per_unit: 4_200.0 },
];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let snapshot = NetworkSnapshot {
        btc_price: 90_000.0,
        difficulty: 110e12,
        network_hashrate_ths: 8.0e8,
        block_reward: 3.125,
        avg_block_time_minutes: 10.0,
        next_halving_days: 700,
    };

    println!("Comparing {} hardware presets, 10 units each...", PRESETS.len());
    let start = Instant::now();

    let mut results: Vec<_> = PRESETS
        .par_iter()
        .map(|preset| {
            let config = MinerConfig {
                hashrate_ths: preset.hashrate_ths,
                power_draw_watts: preset.power_draw_watts,
                units: 10,
                hardware_cost_per_unit: preset.hardware_cost_per_unit,
                pool_fee_percent: 1.5,
                maintenance_percent: 2.0,
                electricity_rate: 0.05,
                hosting_fee_rate: 0.072,
            };
            let analysis = run_full_analysis(&config, &snapshot, OperatingMode::SelfMining)?;
            Ok((preset.name, analysis))
        })
        .collect::<Result<Vec<_>, mining_economics::EngineError>>()?;

    println!("Done in {:?}\n", start.elapsed());

    results.sort_by(|a, b| {
        b.1.metrics
            .npv
            .partial_cmp(&a.1.metrics.npv)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    println!("{:<10} {:>7} {:>8} {:>12} {:>8} {:>8} {:>14} {:>10}",
        "Model", "TH/s", "W/TH", "NPV", "IRR%", "MIRR%", "Payback", "Safety%");
    println!("{}", "-".repeat(84));
    for (name, analysis) in &results {
        let preset = PRESETS.iter().find(|p| p.name == *name);
        let w_per_th = preset
            .map(|p| p.power_draw_watts / p.hashrate_ths)
            .unwrap_or(0.0);
        println!("{:<10} {:>7.0} {:>8.1} {:>12.2} {:>8.2} {:>8.2} {:>14} {:>10.1}",
            name,
            preset.map(|p| p.hashrate_ths).unwrap_or(0.0),
            w_per_th,
            analysis.metrics.npv,
            analysis.metrics.irr_percent,
            analysis.metrics.mirr_percent,
            analysis.metrics.payback.to_string(),
            analysis.break_even.safety_margin_percent,
        );
    }

    Ok(())
}
