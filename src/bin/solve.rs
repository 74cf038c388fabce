use clap::{Arg, Command};
use std::error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use wcc_solver::solve::SolverConfig;
use wcc_solver::wcc_instance::WCCInstance;

/// Solves one or more instance files and writes a `.out` result file next to
/// each input.
pub fn main() -> Result<(), Box<dyn error::Error>> {
    let m = Command::new("solve")
        .arg(Arg::new("files")
             .required(true)
             .takes_value(true)
             .multiple_values(true)
             .short('f'))
        .arg(Arg::new("seed")
             .takes_value(true)
             .short('s'))
        .arg(Arg::new("exact_threshold")
             .takes_value(true)
             .short('e'))
        .arg(Arg::new("trials_per_vertex")
             .takes_value(true)
             .short('t'))
        .get_matches();
    let files: Vec<PathBuf> = m.values_of("files").unwrap().map(PathBuf::from).collect();
    let mut config = SolverConfig::default();
    if let Some(seed) = m.value_of("seed") {
        config.seed = seed.parse()?;
    }
    if let Some(threshold) = m.value_of("exact_threshold") {
        config.exact_threshold = threshold.parse()?;
    }
    if let Some(trials) = m.value_of("trials_per_vertex") {
        config.trials_per_vertex = trials.parse()?;
    }
    for file in files {
        let mut instance = WCCInstance::read_instance(BufReader::new(File::open(&file)?))?;
        eprintln!("{:?}: {} nodes, {} edges",
                  file.file_stem().expect("Not a file."),
                  instance.graph.num_nodes(),
                  instance.graph.num_edges());
        let solution = instance.solve(&config);
        eprintln!("{:?}: value {}, {} cycles",
                  file.file_stem().expect("Not a file."),
                  solution.value,
                  solution.cycles.len());
        let out = File::create(file.with_extension("out"))?;
        WCCInstance::write_solution(&solution, BufWriter::new(out))?;
    }
    Ok(())
}
