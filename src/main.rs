//! Mining Economics CLI
//!
//! Runs the full analysis for a sample fleet and prints the results

use mining_economics::{
    run_full_analysis, MinerConfig, NetworkSnapshot, OperatingMode,
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Mining Economics v0.1.0");
    println!("=======================\n");

    // Sample fleet: 10 late-generation units, self-mining at $0.05/kWh
    let config = MinerConfig {
        hashrate_ths: 200.0,
        power_draw_watts: 3_500.0,
        units: 10,
        hardware_cost_per_unit: 5_000.0,
        pool_fee_percent: 1.5,
        maintenance_percent: 2.0,
        electricity_rate: 0.05,
        hosting_fee_rate: 0.072,
    };

    let snapshot = NetworkSnapshot {
        btc_price: 90_000.0,
        difficulty: 110e12,
        network_hashrate_ths: 8.0e8, // 800 EH/s
        block_reward: 3.125,
        avg_block_time_minutes: 10.0,
        next_halving_days: 700,
    };

    println!("Fleet: {} x {} TH/s @ {} W", config.units, config.hashrate_ths, config.power_draw_watts);
    println!("  Investment: ${:.2}", config.total_investment());
    println!("  BTC price: ${:.0}", snapshot.btc_price);
    println!("  Network: {:.0} EH/s", snapshot.network_hashrate_ths / 1e6);
    println!();

    let analysis = match run_full_analysis(&config, &snapshot, OperatingMode::SelfMining) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("analysis failed: {e}");
            std::process::exit(1);
        }
    };

    // Print first 12 months to console
    println!("Cash-Flow Projection ({} months):", analysis.cash_flows.months.len());
    println!("{:>5} {:>12} {:>12} {:>10} {:>12} {:>12} {:>14}",
        "Month", "Revenue", "Power", "Fees", "Maint", "Net", "Cumulative");
    println!("{}", "-".repeat(82));
    for row in analysis.cash_flows.months.iter().take(12) {
        println!("{:>5} {:>12.2} {:>12.2} {:>10.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month,
            row.revenue,
            row.power_cost,
            row.pool_fees,
            row.maintenance,
            row.net_cash_flow,
            row.cumulative_cash_flow,
        );
    }
    if analysis.cash_flows.months.len() > 12 {
        println!("... ({} more months)", analysis.cash_flows.months.len() - 12);
    }

    // Write full series to CSV
    let csv_path = "cashflow_output.csv";
    match write_csv(csv_path, &analysis) {
        Ok(()) => println!("\nFull series written to: {}", csv_path),
        Err(e) => eprintln!("\nfailed to write {}: {}", csv_path, e),
    }

    println!("\nInvestment Metrics:");
    println!("  NPV (10%):        ${:.2}", analysis.metrics.npv);
    println!("  IRR:              {:.2}%", analysis.metrics.irr_percent);
    println!("  MIRR:             {:.2}%", analysis.metrics.mirr_percent);
    println!("  Payback:          {}", analysis.metrics.payback);
    println!("  Disc. payback:    {}", analysis.metrics.discounted_payback);
    println!("  Profit. index:    {:.3}", analysis.metrics.profitability_index);
    println!("  EBITDA (annual):  ${:.2}", analysis.metrics.ebitda);
    println!("  Gross margin:     {:.1}%", analysis.metrics.gross_margin_percent);

    println!("\nBreak-Even:");
    println!("  Price:            ${:.2}", analysis.break_even.price);
    println!("  Electricity:      ${:.4}/kWh", analysis.break_even.electricity_rate);
    println!("  Network:          {:.0} EH/s", analysis.break_even.network_hashrate_ths / 1e6);
    println!("  Safety margin:    {:.1}%", analysis.break_even.safety_margin_percent);

    println!("\nRisk (overall {:.1}):", analysis.risk.overall);
    println!("  Price volatility: {:.1}", analysis.risk.price_volatility);
    println!("  Difficulty:       {:.1}", analysis.risk.difficulty_growth);
    println!("  Operational:      {:.1}", analysis.risk.operational);
    println!("  Power exposure:   {:.1}", analysis.risk.power_cost_exposure);

    println!("\nSensitivity (tornado):");
    for item in &analysis.tornado {
        println!("  {:<18} impact ${:>12.2}  ({:.2}%/1%)",
            item.variable, item.impact, item.sensitivity);
    }

    println!("\nScenarios (3-year):");
    for s in &analysis.scenarios {
        println!("  {:<14} total ${:>12.2}  roi {:>7.1}%  [{}]",
            s.name, s.total_profit, s.roi_percent, s.probability);
    }
}

fn write_csv(path: &str, analysis: &mining_economics::FinancialAnalysis) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Month,BtcMined,BtcPrice,Revenue,PowerCost,PoolFees,Maintenance,Depreciation,NetCashFlow,CumulativeCashFlow")?;
    for row in &analysis.cash_flows.months {
        writeln!(file, "{},{:.8},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.month,
            row.btc_mined,
            row.btc_price,
            row.revenue,
            row.power_cost,
            row.pool_fees,
            row.maintenance,
            row.depreciation,
            row.net_cash_flow,
            row.cumulative_cash_flow,
        )?;
    }
    Ok(())
}
