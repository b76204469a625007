//! Mining Economics - profitability engine for mining hardware and hosting facilities
//!
//! This library provides:
//! - Monthly cash-flow projections from a hardware configuration and a
//!   network/price snapshot
//! - Investment metrics (NPV, IRR, MIRR, payback, margins)
//! - Closed-form break-even solves for price, electricity rate, and difficulty
//! - Risk scoring, tornado sensitivity analysis, and macro scenario modeling
//! - Hour-by-hour energy-cost optimization under wholesale price curves
//!   with curtailment, for the hosting business model
//!
//! The engine is a pure, synchronous function of its inputs: market
//! snapshots and energy curves are resolved by collaborators before they
//! reach it, and every result bundle is an immutable value object.

pub mod analysis;
pub mod breakeven;
pub mod config;
pub mod energy;
pub mod error;
pub mod market;
pub mod metrics;
pub mod projection;
pub mod risk;
pub mod scenario;
pub mod sensitivity;

// Re-export commonly used types
pub use analysis::{analyze_hosting_site, run_full_analysis, FinancialAnalysis, HostingRoiResults};
pub use config::{HostingSiteConfig, MinerConfig, OperatingMode};
pub use energy::{simulate_hosting_year, HostingEnergyResult, PriceSource, RegionProfile};
pub use error::{EngineError, Result};
pub use market::NetworkSnapshot;
pub use metrics::{InvestmentMetrics, Payback};
pub use projection::{CashFlowMonth, CashFlowProjection, ProjectionConfig};
