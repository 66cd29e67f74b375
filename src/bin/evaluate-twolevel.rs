//! Evaluate a set of [`TwoLevelPredictor`] schemes and baselines against a
//! branch trace.

use std::fs::{ self, File };
use std::io::{ self, BufWriter, Write };
use std::path::PathBuf;

use anyhow::{ bail, Context, Result };
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use twolevel::*;
use twolevel::report::*;
use twolevel::sim::*;
use twolevel::trace::synth::*;

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate two-level adaptive branch predictors")]
struct Cli {
    /// Trace file, one '<pc_hex> <taken_bit>' record per line
    #[arg(required_unless_present = "synthetic")]
    trace: Option<PathBuf>,

    /// Benchmark label used in CSV and JSON output
    #[arg(short, long, default_value = "unknown")]
    benchmark: String,

    /// JSON file containing a list of scheme configurations
    #[arg(short, long)]
    schemes: Option<PathBuf>,

    /// Write CSV rows to this file instead of stdout
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write results as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Only evaluate the first N records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Evaluate a generated trace with N iterations instead of a file
    #[arg(long, conflicts_with = "trace")]
    synthetic: Option<usize>,

    /// Number of static branches in a generated trace
    #[arg(long, default_value_t = 64)]
    synthetic_branches: usize,

    /// Seed for random branches in a generated trace
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the N most mispredicted branches for each scheme
    #[arg(long)]
    worst: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_schemes(path: Option<&PathBuf>) -> Result<Vec<TwoLevelConfig>> {
    let Some(path) = path else {
        return Ok(TwoLevelConfig::default_schemes());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("couldn't read schemes {}", path.display()))?;
    let cfgs: Vec<TwoLevelConfig> = serde_json::from_str(&text)
        .with_context(|| format!("couldn't parse schemes {}", path.display()))?;
    Ok(cfgs)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let trace = match (&args.trace, args.synthetic) {
        (_, Some(iterations)) => TextTrace {
            name: "synthetic".to_string(),
            data: TraceAssembler::mixed(args.synthetic_branches, args.seed)
                .compile(iterations),
        },
        (Some(path), None) => TextTrace::from_file(path)
            .with_context(|| format!("couldn't load trace {}", path.display()))?,
        (None, None) => bail!("no trace file given"),
    };
    let records = match args.limit {
        Some(limit) => trace.as_slice_trunc(limit),
        None => trace.as_slice(),
    };
    info!("loaded {} records from {}", records.len(), trace.name());

    let schemes = load_schemes(args.schemes.as_ref())?;
    let mut eval = Evaluation::new().track_branches(args.worst.is_some());
    let rejected = eval.add_schemes(schemes);
    eval.add_baselines();
    eval.run(records);
    let results = eval.results();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, trace.name(), &args.benchmark, &results)?;
    if let Some(n) = args.worst {
        write_worst_branches(&mut out, &eval, n)?;
    }

    match &args.csv {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("couldn't create {}", path.display()))?;
            let mut w = BufWriter::new(f);
            write_csv(&mut w, &args.benchmark, &results)?;
            w.flush()?;
            info!("wrote CSV to {}", path.display());
        },
        None => {
            writeln!(out, "=== CSV ===")?;
            write_csv(&mut out, &args.benchmark, &results)?;
        },
    }

    if let Some(path) = &args.json {
        let doc = ResultDocument {
            benchmark: &args.benchmark,
            trace: trace.name(),
            results: &results,
        };
        let f = File::create(path)
            .with_context(|| format!("couldn't create {}", path.display()))?;
        write_json(&mut BufWriter::new(f), &doc)?;
        info!("wrote JSON to {}", path.display());
    }

    if !rejected.is_empty() {
        info!("{} scheme(s) were rejected", rejected.len());
    }
    Ok(())
}
