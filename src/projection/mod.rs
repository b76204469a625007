//! Monthly cash-flow projection

mod cashflows;
mod engine;

pub use cashflows::{CashFlowMonth, CashFlowProjection, ProjectionSummary};
pub use engine::{
    project_cash_flows, GrowthAssumptions, ProjectionConfig, DEFAULT_HORIZON_MONTHS,
    DEPRECIATION_MONTHS,
};
