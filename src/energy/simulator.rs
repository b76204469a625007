//! Hour-by-hour energy cost optimization with curtailment
//!
//! Given a year of hourly wholesale prices and a target uptime, the
//! simulator runs the facility during the cheapest hours and curtails the
//! rest. The selection is a pure function of its inputs: discount and
//! currency conversion are applied to every posted price, the region's
//! fixed delivery add-ons produce an all-in rate, and the cheapest
//! `floor(total_hours * uptime%)` hours are marked as operating.

use serde::Serialize;

use super::curve::RegionalEnergyCurve;
use super::rates::{EnergyRateBreakdown, RegionProfile, SimulatorParams, HOURS_PER_YEAR};

/// Where hourly prices come from: a real curve, or a flat contracted rate
/// ($/kWh) when no market data is available for the region.
#[derive(Debug, Clone, Copy)]
pub enum PriceSource<'a> {
    Curve(&'a RegionalEnergyCurve),
    FlatRate(f64),
}

/// Result of simulating one year of facility operation
#[derive(Debug, Clone, Serialize)]
pub struct HostingEnergyResult {
    /// Energy actually consumed over operating hours (kWh)
    pub total_energy_kwh: f64,

    /// All-in electricity cost over operating hours
    pub total_cost: f64,

    /// Realized average all-in rate ($/kWh); 0 when nothing ran
    pub average_rate: f64,

    /// Hours the facility ran
    pub operating_hours: usize,

    /// Hours deliberately curtailed
    pub curtailed_hours: usize,

    /// Achieved uptime as a percent of the curve's hours
    pub actual_uptime_percent: f64,

    /// Rate decomposition with the realized energy component filled in
    pub rate_breakdown: EnergyRateBreakdown,
}

/// Simulate one year of operation at `load_kw` (overhead already included)
/// and `uptime_percent` target uptime.
///
/// With a curve, the cheapest hours are selected; with a flat rate the same
/// add-on table applies over `floor(8760 * uptime%)` hours. Uptime is
/// clamped to [0, 100]: no selection can run more hours than the curve has.
pub fn simulate_hosting_year(
    load_kw: f64,
    uptime_percent: f64,
    region: RegionProfile,
    source: PriceSource<'_>,
    params: SimulatorParams,
) -> HostingEnergyResult {
    let uptime_percent = uptime_percent.clamp(0.0, 100.0);
    let breakdown = EnergyRateBreakdown::for_region(region);
    match source {
        PriceSource::Curve(curve) => {
            simulate_with_curve(load_kw, uptime_percent, curve, breakdown, params)
        }
        PriceSource::FlatRate(rate) => simulate_flat(load_kw, uptime_percent, rate, breakdown),
    }
}

fn simulate_with_curve(
    load_kw: f64,
    uptime_percent: f64,
    curve: &RegionalEnergyCurve,
    breakdown: EnergyRateBreakdown,
    params: SimulatorParams,
) -> HostingEnergyResult {
    let adders = breakdown.adders_per_kwh();

    // Discounted, converted energy component in $/kWh for every hour
    let energy_rates: Vec<f64> = curve
        .hours
        .iter()
        .map(|h| h.price_per_mwh * params.fx_rate * params.discount_factor / 1000.0)
        .collect();

    let mut order: Vec<usize> = (0..energy_rates.len()).collect();
    order.sort_by(|&a, &b| {
        energy_rates[a]
            .partial_cmp(&energy_rates[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_hours = energy_rates.len();
    let operating_hours = (total_hours as f64 * uptime_percent / 100.0).floor() as usize;
    let curtailed_hours = total_hours - operating_hours;

    let mut total_cost = 0.0;
    let mut energy_cost = 0.0;
    for &idx in order.iter().take(operating_hours) {
        let all_in = energy_rates[idx] + adders;
        total_cost += load_kw * all_in;
        energy_cost += load_kw * energy_rates[idx];
    }

    let total_energy_kwh = load_kw * operating_hours as f64;
    let average_rate = safe_rate(total_cost, total_energy_kwh);
    let avg_energy_rate = safe_rate(energy_cost, total_energy_kwh);

    HostingEnergyResult {
        total_energy_kwh,
        total_cost,
        average_rate,
        operating_hours,
        curtailed_hours,
        actual_uptime_percent: if total_hours == 0 {
            0.0
        } else {
            operating_hours as f64 / total_hours as f64 * 100.0
        },
        rate_breakdown: breakdown.with_energy_rate(avg_energy_rate),
    }
}

fn simulate_flat(
    load_kw: f64,
    uptime_percent: f64,
    flat_rate_per_kwh: f64,
    breakdown: EnergyRateBreakdown,
) -> HostingEnergyResult {
    let total_hours = HOURS_PER_YEAR;
    let operating_hours = (total_hours as f64 * uptime_percent / 100.0).floor() as usize;
    let curtailed_hours = total_hours - operating_hours;

    let all_in = flat_rate_per_kwh + breakdown.adders_per_kwh();
    let total_energy_kwh = load_kw * operating_hours as f64;
    let total_cost = total_energy_kwh * all_in;

    HostingEnergyResult {
        total_energy_kwh,
        total_cost,
        average_rate: safe_rate(total_cost, total_energy_kwh),
        operating_hours,
        curtailed_hours,
        actual_uptime_percent: operating_hours as f64 / total_hours as f64 * 100.0,
        rate_breakdown: breakdown.with_energy_rate(flat_rate_per_kwh),
    }
}

fn safe_rate(cost: f64, kwh: f64) -> f64 {
    if kwh <= 0.0 {
        0.0
    } else {
        cost / kwh
    }
}
