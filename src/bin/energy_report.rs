//! Hosting-site energy and ROI report
//!
//! Loads an hourly wholesale curve from CSV (or falls back to a flat
//! contracted rate) and prints the optimized energy buy and hosting ROI.
//! Use --json for machine-readable output.

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;

use mining_economics::analysis::analyze_hosting_site;
use mining_economics::energy::{CsvCurveProvider, CurveProvider};
use mining_economics::{HostingSiteConfig, PriceSource, RegionProfile};

#[derive(Parser, Debug)]
#[command(about = "Hosting-site energy cost and ROI report")]
struct Args {
    /// Grid region: ercot, pjm, or nordic
    #[arg(long, default_value = "ercot")]
    region: String,

    /// Directory holding per-region curve CSVs; omit to use --flat-rate
    #[arg(long)]
    curve_dir: Option<std::path::PathBuf>,

    /// Flat contracted wholesale rate ($/kWh) when no curve is available
    #[arg(long, default_value_t = 0.03)]
    flat_rate: f64,

    /// IT load from customer hardware (kW)
    #[arg(long, default_value_t = 250.0)]
    load_kw: f64,

    /// Cooling/auxiliary overhead (percent of IT load)
    #[arg(long, default_value_t = 20.0)]
    overhead: f64,

    /// Target uptime percent
    #[arg(long, default_value_t = 95.0)]
    uptime: f64,

    /// Hosting fee billed per kWh of IT load
    #[arg(long, default_value_t = 0.072)]
    hosting_fee: f64,

    /// Facility buildout cost
    #[arg(long, default_value_t = 1_500_000.0)]
    facility_cost: f64,

    /// Fraction of posted wholesale actually paid
    #[arg(long, default_value_t = 0.4)]
    discount_factor: f64,

    /// Emit JSON instead of a console report
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    region: RegionProfile,
    results: mining_economics::HostingRoiResults,
}

fn parse_region(name: &str) -> anyhow::Result<RegionProfile> {
    match name.to_ascii_lowercase().as_str() {
        "ercot" => Ok(RegionProfile::Ercot),
        "pjm" => Ok(RegionProfile::Pjm),
        "nordic" => Ok(RegionProfile::Nordic),
        other => bail!("unknown region '{other}', expected ercot, pjm, or nordic"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let region = parse_region(&args.region)?;

    let site = HostingSiteConfig {
        it_load_kw: args.load_kw,
        overhead_percent: args.overhead,
        target_uptime_percent: args.uptime,
        hosting_fee_rate: args.hosting_fee,
        facility_cost: args.facility_cost,
        maintenance_percent: 3.0,
        wholesale_discount_factor: args.discount_factor,
        region,
    };

    let curve = match &args.curve_dir {
        Some(dir) => Some(
            CsvCurveProvider::new(dir)
                .fetch(region)
                .with_context(|| format!("loading curve for {region:?} from {}", dir.display()))?,
        ),
        None => None,
    };
    let source = match &curve {
        Some(curve) => PriceSource::Curve(curve),
        None => PriceSource::FlatRate(args.flat_rate),
    };

    let results = analyze_hosting_site(&site, source)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Report { region, results })?);
        return Ok(());
    }

    println!("Hosting Energy Report ({region:?})");
    println!("==============================\n");
    if let Some(curve) = &curve {
        println!("Curve: {} hours, posted {:.2}-{:.2} (mean {:.2}) /MWh",
            curve.len(), curve.stats.min_price, curve.stats.max_price, curve.stats.mean_price);
    } else {
        println!("Curve: none, flat rate ${:.4}/kWh", args.flat_rate);
    }
    println!("Load: {:.0} kW IT ({:.0} kW with overhead), target uptime {:.1}%",
        args.load_kw, site.total_load_kw(), args.uptime);
    println!();
    println!("  Energy used:      {:.0} kWh", results.total_energy_usage_kwh);
    println!("  Electricity cost: ${:.2}", results.total_electricity_cost);
    println!("  Avg all-in rate:  ${:.4}/kWh", results.energy_rate_breakdown.total_rate);
    println!("  Curtailed hours:  {}", results.curtailed_hours);
    println!("  Actual uptime:    {:.2}%", results.average_uptime_percent);
    println!();
    println!("  Hosting revenue:  ${:.2}", results.total_hosting_revenue);
    println!("  Operational cost: ${:.2}", results.total_operational_cost);
    println!("  Net profit:       ${:.2}", results.net_profit);
    println!("  12-month ROI:     {:.2}%", results.roi_12_month_percent);
    match results.payback_period_years {
        Some(years) => println!("  Payback:          {:.1} years", years),
        None => println!("  Payback:          never at current rates"),
    }

    Ok(())
}
