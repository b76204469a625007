//! Calculation configurations and boundary validation
//!
//! A configuration is immutable once built; the engine never mutates it.
//! Percentages are whole numbers everywhere (1.5 means 1.5%), and all
//! per-kWh rates are in the reporting currency.

use serde::{Deserialize, Serialize};

use crate::energy::rates::RegionProfile;
use crate::error::{EngineError, Result};

/// Whether power is bought directly or through a hosting provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Operator owns the site and pays a retail electricity rate
    SelfMining,
    /// Hardware is colocated; operator pays an all-in hosting fee per kWh
    Hosting,
}

/// Mining fleet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Hashrate per unit (TH/s)
    pub hashrate_ths: f64,

    /// Power draw per unit (watts at the wall)
    pub power_draw_watts: f64,

    /// Number of identical units
    pub units: u32,

    /// Hardware cost per unit (reporting currency)
    pub hardware_cost_per_unit: f64,

    /// Pool fee as a percent of revenue
    pub pool_fee_percent: f64,

    /// Annual maintenance as a percent of total investment
    pub maintenance_percent: f64,

    /// Retail electricity rate for self-mining ($/kWh)
    pub electricity_rate: f64,

    /// All-in hosting fee for hosted operation ($/kWh)
    pub hosting_fee_rate: f64,
}

impl MinerConfig {
    pub fn total_hashrate_ths(&self) -> f64 {
        self.hashrate_ths * self.units as f64
    }

    /// Total fleet draw in kW
    pub fn total_power_kw(&self) -> f64 {
        self.power_draw_watts * self.units as f64 / 1000.0
    }

    pub fn total_investment(&self) -> f64 {
        self.hardware_cost_per_unit * self.units as f64
    }

    /// Per-kWh power rate the operator actually pays in the given mode
    pub fn power_rate(&self, mode: OperatingMode) -> f64 {
        match mode {
            OperatingMode::SelfMining => self.electricity_rate,
            OperatingMode::Hosting => self.hosting_fee_rate,
        }
    }

    /// Reject configurations that would silently produce a misleading
    /// zero-profit result instead of a real answer.
    pub fn validate(&self, mode: OperatingMode) -> Result<()> {
        if self.units == 0 {
            return Err(EngineError::InvalidInput("unit count is zero".into()));
        }
        if self.hashrate_ths <= 0.0 {
            return Err(EngineError::InvalidInput(
                "per-unit hashrate must be positive".into(),
            ));
        }
        if self.power_draw_watts <= 0.0 {
            return Err(EngineError::InvalidInput(
                "power draw must be positive".into(),
            ));
        }
        if self.hardware_cost_per_unit < 0.0 {
            return Err(EngineError::InvalidInput(
                "hardware cost cannot be negative".into(),
            ));
        }
        if self.power_rate(mode) < 0.0 {
            return Err(EngineError::InvalidInput(
                "power rate cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Hosting facility configuration (host-side business model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingSiteConfig {
    /// IT load from customer hardware (kW)
    pub it_load_kw: f64,

    /// Cooling and auxiliary overhead as a percent of IT load
    pub overhead_percent: f64,

    /// Target uptime percent (curtailment budget is the remainder)
    pub target_uptime_percent: f64,

    /// Fee billed to customers per kWh of IT load served
    pub hosting_fee_rate: f64,

    /// Up-front facility buildout cost
    pub facility_cost: f64,

    /// Annual maintenance as a percent of facility cost
    pub maintenance_percent: f64,

    /// Fraction of the posted wholesale price actually paid (0.4 = 60% discount)
    pub wholesale_discount_factor: f64,

    /// Grid region selecting the fixed per-kWh add-on table
    pub region: RegionProfile,
}

impl HostingSiteConfig {
    /// Facility load including overhead (what the meter sees)
    pub fn total_load_kw(&self) -> f64 {
        self.it_load_kw * (1.0 + self.overhead_percent / 100.0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.it_load_kw <= 0.0 {
            return Err(EngineError::InvalidInput("IT load must be positive".into()));
        }
        if !(0.0..=100.0).contains(&self.target_uptime_percent) {
            return Err(EngineError::InvalidInput(
                "target uptime must be between 0 and 100".into(),
            ));
        }
        if self.wholesale_discount_factor <= 0.0 || self.wholesale_discount_factor > 1.0 {
            return Err(EngineError::InvalidInput(
                "wholesale discount factor must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}
