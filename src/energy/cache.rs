//! Curve providers and explicit TTL caching
//!
//! The engine itself never fetches anything: a [`CurveProvider`] hands it a
//! pre-resolved year of hourly prices. [`CurveCache`] is an explicit
//! map-plus-timestamp cache owned by the composition root, so curve
//! lifetime and refresh policy live with the caller rather than in a
//! module-level singleton. Synthetic curve generation also belongs behind
//! the provider interface, keeping the engine deterministic.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::debug;

use super::curve::{HourlyPrice, RegionalEnergyCurve};
use super::rates::{RegionProfile, HOURS_PER_YEAR};
use crate::error::{EngineError, Result};

/// Source of regional hourly price curves, already resolved (no suspension)
pub trait CurveProvider {
    fn fetch(&self, region: RegionProfile) -> Result<RegionalEnergyCurve>;
}

/// Loads one year of hourly prices per region from CSV files in a directory
/// (`ercot.csv`, `pjm.csv`, `nordic.csv`; columns `timestamp,price_per_mwh`).
#[derive(Debug, Clone)]
pub struct CsvCurveProvider {
    dir: PathBuf,
}

impl CsvCurveProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn file_name(region: RegionProfile) -> &'static str {
        match region {
            RegionProfile::Ercot => "ercot.csv",
            RegionProfile::Pjm => "pjm.csv",
            RegionProfile::Nordic => "nordic.csv",
        }
    }
}

impl CurveProvider for CsvCurveProvider {
    fn fetch(&self, region: RegionProfile) -> Result<RegionalEnergyCurve> {
        let path = self.dir.join(Self::file_name(region));
        let mut reader = csv::Reader::from_path(&path)?;

        let mut hours = Vec::with_capacity(HOURS_PER_YEAR);
        for record in reader.deserialize::<HourlyPrice>() {
            hours.push(record?);
        }

        if hours.len() < HOURS_PER_YEAR {
            return Err(EngineError::CurveTooShort {
                expected: HOURS_PER_YEAR,
                actual: hours.len(),
            });
        }

        RegionalEnergyCurve::from_hours(hours)
    }
}

#[derive(Debug, Clone)]
struct CachedCurve {
    curve: RegionalEnergyCurve,
    fetched_at: Instant,
}

/// Explicit TTL cache over a curve provider
#[derive(Debug)]
pub struct CurveCache {
    entries: HashMap<RegionProfile, CachedCurve>,
    ttl: Duration,
    pub hits: u64,
    pub misses: u64,
}

impl CurveCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached curve for a region, refetching through `provider`
    /// when missing or older than the TTL.
    pub fn get_or_fetch(
        &mut self,
        region: RegionProfile,
        provider: &dyn CurveProvider,
    ) -> Result<&RegionalEnergyCurve> {
        match self.entries.entry(region) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().fetched_at.elapsed() > self.ttl {
                    self.misses += 1;
                    debug!("curve cache expired for {:?}, refetching", region);
                    let curve = provider.fetch(region)?;
                    occupied.insert(CachedCurve {
                        curve,
                        fetched_at: Instant::now(),
                    });
                } else {
                    self.hits += 1;
                }
                Ok(&occupied.into_mut().curve)
            }
            Entry::Vacant(vacant) => {
                self.misses += 1;
                debug!("curve cache miss for {:?}", region);
                let curve = provider.fetch(region)?;
                let cached = vacant.insert(CachedCurve {
                    curve,
                    fetched_at: Instant::now(),
                });
                Ok(&cached.curve)
            }
        }
    }

    pub fn invalidate(&mut self, region: RegionProfile) {
        self.entries.remove(&region);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    struct FixedProvider {
        price: f64,
    }

    impl CurveProvider for FixedProvider {
        fn fetch(&self, _region: RegionProfile) -> Result<RegionalEnergyCurve> {
            let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            let hours = (0..24)
                .map(|i| HourlyPrice {
                    timestamp: start + chrono::Duration::hours(i),
                    price_per_mwh: self.price,
                })
                .collect();
            RegionalEnergyCurve::from_hours(hours)
        }
    }

    #[test]
    fn cache_hits_within_ttl() {
        let provider = FixedProvider { price: 42.0 };
        let mut cache = CurveCache::new(Duration::from_secs(3600));

        cache.get_or_fetch(RegionProfile::Ercot, &provider).unwrap();
        cache.get_or_fetch(RegionProfile::Ercot, &provider).unwrap();
        cache.get_or_fetch(RegionProfile::Pjm, &provider).unwrap();

        assert_eq!(cache.hits, 1);
        assert_eq!(cache.misses, 2);
        assert!((cache.hit_rate() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_ttl_always_refetches() {
        let provider = FixedProvider { price: 42.0 };
        let mut cache = CurveCache::new(Duration::from_secs(0));

        cache.get_or_fetch(RegionProfile::Ercot, &provider).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        cache.get_or_fetch(RegionProfile::Ercot, &provider).unwrap();

        assert_eq!(cache.hits, 0);
        assert_eq!(cache.misses, 2);
    }

    #[test]
    fn short_csv_curve_rejected() {
        let dir = std::env::temp_dir().join("mining_economics_short_curve");
        std::fs::create_dir_all(&dir).unwrap();

        // One day of prices where a full year is required
        let mut content = String::from("timestamp,price_per_mwh\n");
        for hour in 0..24 {
            content.push_str(&format!("2025-01-01T{hour:02}:00:00Z,42.0\n"));
        }
        std::fs::write(dir.join("ercot.csv"), content).unwrap();

        let provider = CsvCurveProvider::new(&dir);
        match provider.fetch(RegionProfile::Ercot) {
            Err(EngineError::CurveTooShort { expected, actual }) => {
                assert_eq!(expected, HOURS_PER_YEAR);
                assert_eq!(actual, 24);
            }
            other => panic!("expected CurveTooShort, got {:?}", other),
        }
    }

    #[test]
    fn invalidate_forces_miss() {
        let provider = FixedProvider { price: 42.0 };
        let mut cache = CurveCache::new(Duration::from_secs(3600));

        cache.get_or_fetch(RegionProfile::Nordic, &provider).unwrap();
        cache.invalidate(RegionProfile::Nordic);
        cache.get_or_fetch(RegionProfile::Nordic, &provider).unwrap();

        assert_eq!(cache.misses, 2);
    }
}
