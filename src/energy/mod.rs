//! Energy cost simulation: wholesale curves, regional rate tables,
//! cheapest-hours selection, and curve caching

pub mod cache;
pub mod curve;
pub mod rates;
pub mod simulator;

pub use cache::{CsvCurveProvider, CurveCache, CurveProvider};
pub use curve::{CurveStats, HourlyPrice, RegionalEnergyCurve};
pub use rates::{
    EnergyRateBreakdown, RegionProfile, SimulatorParams, DEFAULT_WHOLESALE_DISCOUNT_FACTOR,
    HOURS_PER_YEAR,
};
pub use simulator::{simulate_hosting_year, HostingEnergyResult, PriceSource};
