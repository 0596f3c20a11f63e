//! surat — one-incident ambulance dispatch over a synthetic Surat grid.
//!
//! Places three ambulances at random intersections, raises one incident near
//! the middle of the city, and dispatches the fastest ambulance.  The
//! patient goes to whichever hospital is fastest to reach from the incident.

mod log;
mod network;
mod settings;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use ed_dispatch::{CandidateOutcome, Scenario, hospitals_with_fallback, load_hospitals_csv};

use network::build_network;
use settings::Settings;

#[derive(Parser)]
#[command(version, about = "Dispatch the fastest ambulance to a single incident")]
struct Cli {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,
    /// CSV of hospitals (`name,lon,lat`); overrides the settings file
    #[arg(long)]
    hospitals: Option<PathBuf>,
    /// Keep edges without a travel time as they are instead of filling them in
    #[arg(long)]
    no_impute: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    log::init(settings.log_level.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.scenario.seed = seed;
    }

    println!("=== surat — emergency ambulance dispatch ===");

    // 1. Road network.
    let network = build_network(!cli.no_impute);
    println!(
        "Road network: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    // 2. Hospitals, falling back to the fixed set.
    let hospitals = match cli.hospitals.or(settings.hospitals_csv) {
        Some(path) => hospitals_with_fallback(load_hospitals_csv(&path), settings.scenario.min_hospitals),
        None => hospitals_with_fallback::<&str>(Err("no hospital file given"), settings.scenario.min_hospitals),
    };

    // 3. Scenario and dispatch.
    let mut scenario = Scenario::build(&network, hospitals, &settings.scenario)?;
    let (selection, assignment) = scenario.dispatch(&network)?;
    println!();

    let Some(assignment) = assignment else {
        bail!("Assignment failed: no ambulance can reach incident {}", scenario.incident.id);
    };
    println!("{assignment}");
    println!();

    // 4. Details.
    let inc = &scenario.incident;
    println!("Incident {} at {} ({}, node {})", inc.id, inc.location, inc.status, selection.incident_node.0);
    println!();

    println!("{:<6} {:<12} {:<8} {:>10}", "Unit", "Status", "Node", "ETA (s)");
    println!("{}", "-".repeat(40));
    for (i, amb) in scenario.ambulances.iter().enumerate() {
        let eta = selection
            .ambulance
            .outcome(i)
            .and_then(CandidateOutcome::time_secs)
            .map_or_else(|| "-".to_string(), |t| format!("{t:.0}"));
        println!("{:<6} {:<12} {:<8} {:>10}", amb.id, amb.status, amb.node.0, eta);
    }
    println!();

    println!("Hospitals ({}):", scenario.hospitals.len());
    for (i, h) in scenario.hospitals.iter().enumerate() {
        let eta = selection.hospital.outcomes[i]
            .time_secs()
            .map_or_else(|| "unreachable".to_string(), |t| format!("{t:.0} s"));
        println!("  {}. {} — {} ({eta})", i + 1, h.name, h.location);
    }
    println!();

    // 5. Route geometry, ready for a map layer.
    if let Some(path) = selection.ambulance.path() {
        let coords = network.path_positions(path)?;
        println!("Route to incident ({} points):", coords.len());
        for p in coords {
            println!("  {p}");
        }
    }
    if let Some(path) = selection.hospital.path() {
        let coords = network.path_positions(path)?;
        println!("Route to hospital ({} points):", coords.len());
        for p in coords {
            println!("  {p}");
        }
    }

    Ok(())
}
