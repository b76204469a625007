//! Hourly wholesale price curves
//!
//! A curve is one year of hourly posted wholesale prices for a region,
//! pre-resolved by a collaborator (live feed, file, or synthetic fallback)
//! before it reaches the engine. Prices are in the curve's native currency
//! per MWh, before discount or delivery add-ons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One hour of posted wholesale price
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HourlyPrice {
    pub timestamp: DateTime<Utc>,

    /// Posted wholesale price, native currency per MWh, pre-discount
    pub price_per_mwh: f64,
}

/// Ordered year of hourly prices for one region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalEnergyCurve {
    pub hours: Vec<HourlyPrice>,
    pub stats: CurveStats,
}

/// Summary statistics over the posted prices
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurveStats {
    pub min_price: f64,
    pub max_price: f64,
    pub mean_price: f64,
}

impl RegionalEnergyCurve {
    /// Build a curve from hourly prices, computing summary stats.
    /// An empty series is a hard error.
    pub fn from_hours(hours: Vec<HourlyPrice>) -> Result<Self> {
        if hours.is_empty() {
            return Err(EngineError::EmptyCurve);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for h in &hours {
            min = min.min(h.price_per_mwh);
            max = max.max(h.price_per_mwh);
            sum += h.price_per_mwh;
        }
        let mean = sum / hours.len() as f64;

        Ok(Self {
            stats: CurveStats {
                min_price: min,
                max_price: max,
                mean_price: mean,
            },
            hours,
        })
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}
