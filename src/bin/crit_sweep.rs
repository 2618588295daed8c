//! Sweep a range of cluster counts over a dataset and print every validity
//! score together with the best k per index.
//!
//! The input is either a `.npy` matrix of shape (n_samples, 1..=4) or a text
//! file of whitespace-separated numbers grouped into points of `--dims`
//! components.
//!
//! Usage: `crit-sweep <input> <min_k> [max_k] [--seed N] [--dims D] [--threads T]`

use clustercrit_rs::{ClusterRange, CritSweep, Dataset, SweepConfig, SweepReport};
use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{error, info};

struct Args {
    input: String,
    bounds: Vec<usize>,
    seed: Option<usize>,
    dims: usize,
    threads: Option<usize>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <input> <min_k> [max_k] [--seed N] [--dims D] [--threads T]",
        program
    )
}

fn parse_args(args: &[String]) -> Result<Args, Box<dyn std::error::Error>> {
    let program = args.first().map(String::as_str).unwrap_or("crit-sweep");
    let mut rest = args.iter().skip(1);

    let input = rest.next().ok_or_else(|| usage(program))?.clone();
    let mut bounds = Vec::new();
    let mut seed = None;
    let mut dims = 1;
    let mut threads = None;

    while let Some(arg) = rest.next() {
        let mut value = || rest.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--seed" => seed = Some(value()?.parse()?),
            "--dims" => dims = value()?.parse()?,
            "--threads" => threads = Some(value()?.parse()?),
            other => bounds.push(other.parse()?),
        }
    }

    Ok(Args {
        input,
        bounds,
        seed,
        dims,
        threads,
    })
}

fn load_dataset(path: &str, dims: usize) -> Result<Dataset, Box<dyn std::error::Error>> {
    let is_npy = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("npy"));

    if is_npy {
        let reader = BufReader::new(File::open(path)?);
        let data: Array2<f64> = Array2::read_npy(reader)?;
        return Ok(Dataset::from_array(&data.view())?);
    }

    let text = std::fs::read_to_string(path)?;
    let values = text
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::from_values(&values, dims)?)
}

fn print_report(report: &SweepReport, range: &ClusterRange) {
    print!("{:<20}", "criterion");
    for k in range.iter() {
        print!("{:>14}", k);
    }
    println!("{:>10}{:>8}", "rule", "best");

    for (name, by_k) in &report.scores {
        print!("{:<20}", name);
        for k in range.iter() {
            match by_k.get(&k) {
                Some(v) => print!("{:>14.6}", v),
                None => print!("{:>14}", "-"),
            }
        }
        let rule = report
            .rules
            .get(name)
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let best = report
            .selection(name)
            .map_or_else(|| "-".to_string(), |k| k.to_string());
        println!("{:>10}{:>8}", rule, best);
    }

    if !report.singleton_ks.is_empty() {
        println!("k with singleton clusters: {:?}", report.singleton_ks);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clustercrit_rs=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", usage(raw.first().map(String::as_str).unwrap_or("crit-sweep")));
            std::process::exit(2);
        }
    };

    let range = match ClusterRange::from_bounds(&args.bounds) {
        Ok(range) => range,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let data = match load_dataset(&args.input, args.dims) {
        Ok(data) => data,
        Err(e) => {
            error!(input = %args.input, "error reading data set: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        n_samples = data.len(),
        dims = data.dims(),
        "loaded {}",
        args.input
    );

    let mut config = SweepConfig::new(range.min(), range.max());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    let sweep = CritSweep::new(config)?;
    let report = sweep.run(&data);
    print_report(&report, &range);

    Ok(())
}
