use std::fs::File;
use std::io::stdin;
use std::io::BufReader;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use log::LevelFilter;

use apriori_baskets::io::read_baskets;
use apriori_baskets::AprioriError;
use apriori_baskets::BasketCollection;

#[derive(clap::Parser, Debug)]
#[command(about = "Mines frequent itemsets from a file with one basket per line")]
struct Cli {
    #[arg(long, help = "Minimum fraction of baskets an itemset must appear in")]
    min_support: f64,

    #[arg(long, help = "Minimum rule confidence, stored but not used for mining")]
    min_confidence: Option<f64>,

    #[arg(short, long, default_value_t = 1, help = "Size of the itemsets to report")]
    level: usize,

    #[arg(long, help = "Report every level up to and including --level")]
    all_levels: bool,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    /// Input file, standard input when absent or `-`.
    input: Option<String>,
}

#[derive(clap::Args, Debug)]
struct VerbosityFlag {
    #[arg(short, long, global = true, help = "Set the verbosity to quiet")]
    quiet: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to verbose")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to debug")]
    debug: bool,

    #[arg(short, long, global = true, help = "Set the verbosity to trace")]
    trace: bool,
}

impl VerbosityFlag {
    fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn main() -> Result<ExitCode, AprioriError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    let baskets = match cli.input.as_deref() {
        None | Some("-") => read_baskets(stdin().lock())?,
        Some(path) => read_baskets(BufReader::new(File::open(path)?))?,
    };
    info!("Loaded {} baskets", baskets.len());

    let mut collection: BasketCollection = baskets.into_iter().collect();
    match cli.min_confidence {
        Some(confidence) => collection.configure(cli.min_support, confidence)?,
        None => collection.set_minimum_support(cli.min_support)?,
    }

    collection.build_frequent_itemsets(cli.level)?;

    let first = if cli.all_levels { 1 } else { cli.level };
    for level in first..=cli.level {
        let lines = level_report(&collection, level)?;
        if lines.is_empty() {
            break;
        }
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// One sorted `level<TAB>itemset<TAB>support` line per frequent itemset of `level`.
fn level_report(collection: &BasketCollection, level: usize) -> Result<Vec<String>, AprioriError> {
    let Some(itemsets) = collection.frequent_itemsets_at(level) else {
        return Ok(Vec::new());
    };

    let mut lines = Vec::with_capacity(itemsets.len());
    for itemset in itemsets {
        let support = collection.support(itemset)?;
        lines.push(format!("{}\t{}\t{:.4}", level, itemset, support));
    }
    lines.sort();
    Ok(lines)
}
