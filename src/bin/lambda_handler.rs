//! AWS Lambda handler for running full analyses
//!
//! Accepts the fleet configuration and network snapshot as JSON and returns
//! the complete analysis bundle. Supports Lambda Function URLs for direct
//! HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;

use mining_economics::{run_full_analysis, MinerConfig, NetworkSnapshot, OperatingMode};

/// Input for one analysis run; every field has a sensible default so a
/// partial request still produces a full response
#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    #[serde(default = "default_hashrate")]
    hashrate_ths: f64,

    #[serde(default = "default_power_draw")]
    power_draw_watts: f64,

    #[serde(default = "default_units")]
    units: u32,

    #[serde(default = "default_hardware_cost")]
    hardware_cost_per_unit: f64,

    #[serde(default = "default_pool_fee")]
    pool_fee_percent: f64,

    #[serde(default = "default_maintenance")]
    maintenance_percent: f64,

    #[serde(default = "default_electricity_rate")]
    electricity_rate: f64,

    #[serde(default = "default_hosting_fee")]
    hosting_fee_rate: f64,

    /// "self_mining" (default) or "hosting"
    #[serde(default)]
    mode: Option<String>,

    #[serde(default = "default_btc_price")]
    btc_price: f64,

    #[serde(default = "default_difficulty")]
    difficulty: f64,

    #[serde(default = "default_network_hashrate")]
    network_hashrate_ths: f64,

    #[serde(default = "default_block_reward")]
    block_reward: f64,

    #[serde(default = "default_block_time")]
    avg_block_time_minutes: f64,

    #[serde(default)]
    next_halving_days: u32,
}

fn default_hashrate() -> f64 { 200.0 }
fn default_power_draw() -> f64 { 3_500.0 }
fn default_units() -> u32 { 1 }
fn default_hardware_cost() -> f64 { 5_000.0 }
fn default_pool_fee() -> f64 { 1.5 }
fn default_maintenance() -> f64 { 2.0 }
fn default_electricity_rate() -> f64 { 0.05 }
fn default_hosting_fee() -> f64 { 0.072 }
fn default_btc_price() -> f64 { 90_000.0 }
fn default_difficulty() -> f64 { 110e12 }
fn default_network_hashrate() -> f64 { 8.0e8 }
fn default_block_reward() -> f64 { 3.125 }
fn default_block_time() -> f64 { 10.0 }

async fn handle(event: Request) -> Result<Response<Body>, Error> {
    let request: AnalysisRequest = match event.body() {
        Body::Text(text) if !text.is_empty() => serde_json::from_str(text)?,
        Body::Binary(bytes) if !bytes.is_empty() => serde_json::from_slice(bytes)?,
        _ => serde_json::from_str("{}")?,
    };

    let mode = match request.mode.as_deref() {
        Some("hosting") => OperatingMode::Hosting,
        _ => OperatingMode::SelfMining,
    };

    let config = MinerConfig {
        hashrate_ths: request.hashrate_ths,
        power_draw_watts: request.power_draw_watts,
        units: request.units,
        hardware_cost_per_unit: request.hardware_cost_per_unit,
        pool_fee_percent: request.pool_fee_percent,
        maintenance_percent: request.maintenance_percent,
        electricity_rate: request.electricity_rate,
        hosting_fee_rate: request.hosting_fee_rate,
    };

    let snapshot = NetworkSnapshot {
        btc_price: request.btc_price,
        difficulty: request.difficulty,
        network_hashrate_ths: request.network_hashrate_ths,
        block_reward: request.block_reward,
        avg_block_time_minutes: request.avg_block_time_minutes,
        next_halving_days: request.next_halving_days,
    };

    let response = match run_full_analysis(&config, &snapshot, mode) {
        Ok(analysis) => Response::builder()
            .status(200)
            .header("content-type", "application/json")
            .body(Body::Text(serde_json::to_string(&analysis)?))?,
        Err(e) => Response::builder()
            .status(422)
            .header("content-type", "application/json")
            .body(Body::Text(serde_json::to_string(
                &serde_json::json!({ "error": e.to_string() }),
            )?))?,
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handle)).await
}
