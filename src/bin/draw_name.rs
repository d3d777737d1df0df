use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::RngCore;

use namepool::constants::store::{DEFAULT_CATEGORIES, DEFAULT_ROOT};
use namepool::{CategoryStore, CorpusError, DeterministicRng, Record};

#[derive(Debug, Parser)]
#[command(
    name = "draw_name",
    disable_help_subcommand = true,
    about = "Draw one random record from a category corpus",
    long_about = "Draw exactly one record from a category's corpus artifacts. \
Categories with an offset index are sampled uniformly; bare corpora are \
sampled by scanning and favor longer records."
)]
struct DrawNameCli {
    #[arg(help = "Category to draw from")]
    category: String,
    #[arg(
        long,
        default_value = DEFAULT_ROOT,
        help = "Directory holding {category}.txt and optional {category}.idx artifacts"
    )]
    root: PathBuf,
    #[arg(
        long,
        help = "Also draw from this category and append it, space-separated"
    )]
    family_category: Option<String>,
    #[arg(
        long = "known-category",
        value_name = "CATEGORY",
        help = "Override the known category set (repeatable)"
    )]
    known_categories: Vec<String>,
    #[arg(long, help = "Seed for a reproducible draw; omit for OS randomness")]
    seed: Option<u64>,
}

fn draw(store: &CategoryStore, cli: &DrawNameCli, rng: &mut dyn RngCore) -> Result<Record, CorpusError> {
    match &cli.family_category {
        Some(family) => store.sample_full_name(&cli.category, family, rng),
        None => store.sample(&cli.category, rng),
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cli = DrawNameCli::parse();
    let categories: Vec<String> = if cli.known_categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        cli.known_categories.clone()
    };
    let store = CategoryStore::new(&cli.root, categories);

    let result = match cli.seed {
        Some(seed) => draw(&store, &cli, &mut DeterministicRng::new(seed)),
        None => draw(&store, &cli, &mut rand::rng()),
    };
    match result {
        Ok(record) => {
            println!("{record}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("draw_name: {err}");
            ExitCode::FAILURE
        }
    }
}
