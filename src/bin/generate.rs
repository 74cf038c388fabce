use clap::{Arg, Command};
use fxhash::FxHashSet;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};

/// Generates synthetic instance files of a few known-hard families.
pub fn main() -> Result<(), Box<dyn error::Error>> {
    let m = Command::new("generate")
        .arg(Arg::new("family")
             .required(true)
             .takes_value(true)
             .possible_values(["random", "nasty", "onecenter", "turtle"])
             .short('k'))
        .arg(Arg::new("nodes")
             .required(true)
             .takes_value(true)
             .short('n'))
        .arg(Arg::new("seed")
             .takes_value(true)
             .short('s'))
        .arg(Arg::new("out")
             .takes_value(true)
             .short('o'))
        .get_matches();
    let family = m.value_of("family").unwrap();
    let n: usize = m.value_of("nodes").unwrap().parse()?;
    let mut rng = match m.value_of("seed") {
        Some(seed) => SmallRng::seed_from_u64(seed.parse()?),
        None => SmallRng::from_os_rng(),
    };
    let (heavy, edges) = match family {
        "random" => random_instance(n, &mut rng),
        "nasty" => nasty_instance(n),
        "onecenter" => onecenter_instance(n),
        "turtle" => turtle_instance(n),
        _ => unreachable!("clap rejects other values"),
    };
    let filename = match m.value_of("out") {
        Some(out) => out.to_owned(),
        None => format!("{}_instance_{}.in", family, n),
    };
    write_instance(BufWriter::new(File::create(&filename)?), n, &heavy, &edges)?;
    eprintln!("{}: {} nodes, {} heavy, {} edges", filename, n, heavy.len(), edges.len());
    Ok(())
}

type RawInstance = (FxHashSet<usize>, FxHashSet<(usize, usize)>);

/// Every node is heavy with probability 1/2; every ordered pair of distinct
/// nodes is an edge with probability 1/2.
fn random_instance(n: usize, rng: &mut SmallRng) -> RawInstance {
    let heavy = (0..n).filter(|_| rng.random_bool(0.5)).collect();
    let mut edges = FxHashSet::default();
    for i in 0..n {
        for j in 0..n {
            if i != j && rng.random_bool(0.5) {
                edges.insert((i, j));
            }
        }
    }
    (heavy, edges)
}

/// Blocks of 16 nodes: a hub and three chains of five heavy nodes, each chain
/// closing a cycle of six nodes through the hub. Every cycle is one node too
/// long, so a correct solver has to discard entire blocks. More than five
/// leftover nodes close one extra heavy cycle.
fn nasty_instance(n: usize) -> RawInstance {
    let mut heavy = FxHashSet::default();
    let mut edges = FxHashSet::default();
    for block in 0..n / 16 {
        let hub = 16 * block;
        for chain in 0..3 {
            let head = hub + chain * 5 + 1;
            edges.insert((hub, head));
            for x in 0..4 {
                heavy.insert(head + x);
                edges.insert((head + x, head + x + 1));
            }
            heavy.insert(head + 4);
            edges.insert((head + 4, hub));
        }
    }
    if n % 16 > 5 {
        heavy_cycle_tail(16 * (n / 16), n, &mut heavy, &mut edges);
    }
    (heavy, edges)
}

/// Closes the nodes `start..n` into one directed cycle of heavy nodes.
fn heavy_cycle_tail(start: usize, n: usize, heavy: &mut FxHashSet<usize>,
                    edges: &mut FxHashSet<(usize, usize)>) {
    for x in start..n - 1 {
        heavy.insert(x);
        edges.insert((x, x + 1));
    }
    heavy.insert(n - 1);
    edges.insert((n - 1, start));
}

/// Node 0 is strongly connected to the head of every 3-cycle block; the two
/// other nodes of each block are heavy. Two leftover nodes close one extra
/// heavy 2-cycle.
fn onecenter_instance(n: usize) -> RawInstance {
    let mut heavy = FxHashSet::default();
    let mut edges = FxHashSet::default();
    for block in 0..n.saturating_sub(1) / 3 {
        let head = 1 + 3 * block;
        edges.insert((0, head));
        edges.insert((head, 0));
        edges.insert((head, head + 1));
        edges.insert((head + 1, head + 2));
        edges.insert((head + 2, head));
        heavy.insert(head + 1);
        heavy.insert(head + 2);
    }
    if n.saturating_sub(1) % 3 == 2 {
        edges.insert((n - 2, n - 1));
        edges.insert((n - 1, n - 2));
        heavy.insert(n - 2);
        heavy.insert(n - 1);
    }
    (heavy, edges)
}

/// Blocks of 25 nodes: a heavy central 5-cycle whose every node also lies on a
/// private 5-cycle with four light nodes. More than five leftover nodes close
/// one extra heavy cycle.
fn turtle_instance(n: usize) -> RawInstance {
    let mut heavy = FxHashSet::default();
    let mut edges = FxHashSet::default();
    for block in 0..n / 25 {
        let start = 25 * block;
        for i in 0..5 {
            heavy.insert(start + i);
            edges.insert((start + i, start + (i + 1) % 5));
            let leg = start + (i + 1) * 4 + 1;
            edges.insert((start + i, leg));
            for x in 0..3 {
                edges.insert((leg + x, leg + x + 1));
            }
            edges.insert((leg + 3, start + i));
        }
    }
    if n % 25 > 5 {
        heavy_cycle_tail(25 * (n / 25), n, &mut heavy, &mut edges);
    }
    (heavy, edges)
}

/// Writes an instance in the textual format the solver reads: node count,
/// heavy ids, then the 0/1 adjacency matrix.
fn write_instance<W: Write>(mut out: W, n: usize, heavy: &FxHashSet<usize>,
                            edges: &FxHashSet<(usize, usize)>) -> Result<(), io::Error> {
    writeln!(out, "{}", n)?;
    let mut heavy_ids: Vec<usize> = heavy.iter().copied().collect();
    heavy_ids.sort_unstable();
    let line = heavy_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" ");
    writeln!(out, "{}", line)?;
    for i in 0..n {
        let row = (0..n)
            .map(|j| if edges.contains(&(i, j)) { "1" } else { "0" })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nasty_tail_test() {
        // 22 = one full block + 6 leftover nodes, enough for an extra cycle.
        let (heavy, edges) = nasty_instance(22);
        for x in 16..22 {
            assert!(heavy.contains(&x));
        }
        for x in 16..21 {
            assert!(edges.contains(&(x, x + 1)));
        }
        assert!(edges.contains(&(21, 16)));
        // 20 = one full block + 4 leftover nodes, too few: they stay isolated.
        let (heavy, edges) = nasty_instance(20);
        assert!(!heavy.contains(&16));
        assert!(edges.iter().all(|(src, trg)| *src < 16 && *trg < 16));
    }

    #[test]
    fn onecenter_tail_test() {
        // 6 = center + one block + 2 leftover nodes closing a heavy 2-cycle.
        let (heavy, edges) = onecenter_instance(6);
        assert!(heavy.contains(&4));
        assert!(heavy.contains(&5));
        assert!(edges.contains(&(4, 5)));
        assert!(edges.contains(&(5, 4)));
        // 5 = center + one block + 1 leftover node: no tail.
        let (heavy, edges) = onecenter_instance(5);
        assert!(!heavy.contains(&4));
        assert!(edges.iter().all(|(src, trg)| *src < 4 && *trg < 4));
        // Degenerate sizes must not underflow.
        let (heavy, edges) = onecenter_instance(0);
        assert!(heavy.is_empty() && edges.is_empty());
        let (heavy, edges) = onecenter_instance(1);
        assert!(heavy.is_empty() && edges.is_empty());
    }

    #[test]
    fn turtle_tail_test() {
        // 32 = one full block + 7 leftover nodes closing a heavy cycle.
        let (heavy, edges) = turtle_instance(32);
        for x in 25..32 {
            assert!(heavy.contains(&x));
        }
        assert!(edges.contains(&(25, 26)));
        assert!(edges.contains(&(31, 25)));
        // 28 = one full block + 3 leftover nodes: they stay isolated.
        let (heavy, edges) = turtle_instance(28);
        assert!(!heavy.contains(&25));
        assert!(edges.iter().all(|(src, trg)| *src < 25 && *trg < 25));
    }
}
