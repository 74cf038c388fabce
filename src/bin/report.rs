use clap::{Arg, Command};
use std::error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Collects all `.out` files of a directory into a combined solutions file and
/// writes a per-instance report.
pub fn main() -> Result<(), Box<dyn error::Error>> {
    let m = Command::new("report")
        .arg(Arg::new("dir")
             .required(true)
             .takes_value(true)
             .short('d'))
        .get_matches();
    let dir = PathBuf::from(m.value_of("dir").unwrap());

    let mut out_files: Vec<PathBuf> = std::fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "out").unwrap_or(false))
        .collect();
    out_files.sort();

    let mut solutions = BufWriter::new(File::create(dir.join("solutions.out"))?);
    let mut report = BufWriter::new(File::create(dir.join("report.txt"))?);
    for path in &out_files {
        let mut lines = BufReader::new(File::open(path)?).lines();
        // First line is the value, the rest are the cycles.
        let value = match lines.next() {
            Some(line) => line?,
            None => {
                eprintln!("{:?}: empty result file, skipped", path);
                continue;
            },
        };
        writeln!(solutions, "{}", value)?;
        writeln!(report, "{:?}", path.file_stem().expect("Not a file."))?;
        writeln!(report, "value: {}", value)?;
        for line in lines {
            writeln!(report, "{}", line?)?;
        }
        writeln!(report)?;
    }
    eprintln!("aggregated {} result files from {:?}", out_files.len(), dir);
    Ok(())
}
