//! Regional rate tables and simulator parameters
//!
//! The wholesale discount factor and the per-kWh delivery add-ons are
//! business constants carried over from contract terms; they are kept as
//! named defaults that callers can override rather than values the engine
//! tries to derive.

use serde::{Deserialize, Serialize};

/// Fraction of the posted wholesale price actually paid under the standard
/// large-load contract (0.4 = 60% discount).
pub const DEFAULT_WHOLESALE_DISCOUNT_FACTOR: f64 = 0.4;

/// Hours in the canonical one-year curve
pub const HOURS_PER_YEAR: usize = 8_760;

/// Grid region selecting a fixed delivery add-on table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionProfile {
    /// Texas interconnection
    Ercot,
    /// PJM eastern US
    Pjm,
    /// Nord Pool area
    Nordic,
}

/// Decomposition of the all-in per-kWh cost ($/kWh)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyRateBreakdown {
    /// Realized average energy component (set by the simulator)
    pub energy_rate: f64,
    pub transmission_rate: f64,
    pub distribution_rate: f64,
    pub ancillary_services_rate: f64,
    pub regulatory_fees_rate: f64,
    /// Energy plus all add-ons
    pub total_rate: f64,
}

impl EnergyRateBreakdown {
    /// Fixed delivery add-ons for a region, with the energy component unset
    pub fn for_region(region: RegionProfile) -> Self {
        let (transmission, distribution, ancillary, regulatory) = match region {
            RegionProfile::Ercot => (0.012, 0.008, 0.003, 0.002),
            RegionProfile::Pjm => (0.015, 0.011, 0.004, 0.003),
            RegionProfile::Nordic => (0.009, 0.006, 0.002, 0.004),
        };
        Self {
            energy_rate: 0.0,
            transmission_rate: transmission,
            distribution_rate: distribution,
            ancillary_services_rate: ancillary,
            regulatory_fees_rate: regulatory,
            total_rate: transmission + distribution + ancillary + regulatory,
        }
    }

    /// Sum of the fixed non-energy components
    pub fn adders_per_kwh(&self) -> f64 {
        self.transmission_rate
            + self.distribution_rate
            + self.ancillary_services_rate
            + self.regulatory_fees_rate
    }

    /// Fill in the realized energy component and the total
    pub fn with_energy_rate(mut self, energy_rate: f64) -> Self {
        self.energy_rate = energy_rate;
        self.total_rate = energy_rate + self.adders_per_kwh();
        self
    }
}

/// Tunable simulator parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulatorParams {
    /// Fraction of posted wholesale actually paid
    pub discount_factor: f64,

    /// Native-currency to reporting-currency conversion applied to the
    /// curve's prices before any other math. 1.0 when they already match.
    pub fx_rate: f64,
}

impl Default for SimulatorParams {
    fn default() -> Self {
        Self {
            discount_factor: DEFAULT_WHOLESALE_DISCOUNT_FACTOR,
            fx_rate: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_adders_sum_to_total() {
        for region in [RegionProfile::Ercot, RegionProfile::Pjm, RegionProfile::Nordic] {
            let b = EnergyRateBreakdown::for_region(region);
            assert!((b.total_rate - b.adders_per_kwh()).abs() < 1e-12);
            assert_eq!(b.energy_rate, 0.0);
        }
    }

    #[test]
    fn energy_rate_folds_into_total() {
        let b = EnergyRateBreakdown::for_region(RegionProfile::Ercot).with_energy_rate(0.031);
        assert!((b.total_rate - (0.031 + 0.025)).abs() < 1e-12);
    }
}
