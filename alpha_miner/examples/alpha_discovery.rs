use alpha_miner::{discover_alpha_net, AlphaMinerConfig, EventLog, Exportable, Importable};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <path_to_event_log> <output_pnml_path>", args[0]);
        std::process::exit(1);
    }

    let input_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(&args[2]);

    println!("Importing event log from {:?}", input_path);
    let log = EventLog::import_from_path(&input_path)?;

    println!("Discovering Petri net using Alpha...");
    let (discovery, durations) = discover_alpha_net(&log, &AlphaMinerConfig::default())?;
    for (candidate, _) in discovery.net.candidate_places() {
        println!("  {candidate}");
    }

    let petri_net = discovery.net.into_petri_net();
    println!(
        "Discovered Petri net with {} places and {} transitions in {}s.",
        petri_net.places.len(),
        petri_net.transitions.len(),
        durations.total
    );

    println!("Exporting Petri net to {:?}", output_path);
    petri_net.export_to_path(&output_path)?;

    println!("Done!");
    Ok(())
}
