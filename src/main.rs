//! Deckscope command line.
//!
//! Usage:
//!     deckscope analyze deck.txt --cards cards.json
//!     deckscope learn reference_decks.json --cards cards.json
//!     deckscope classify deck.txt --cards cards.json

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use deckscope::config::AppConfig;
use deckscope::core::deck::prelude::*;
use deckscope::core::deck::{default_meta_decks, ResolutionCache};
use deckscope::core::logging;

#[derive(Parser, Debug)]
#[command(name = "deckscope", version, about = "Deck analysis and archetype classification")]
struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "deckscope=debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a decklist and print the result as JSON
    Analyze {
        decklist: PathBuf,
        /// Card database (JSON array of cards)
        #[arg(long)]
        cards: Option<PathBuf>,
        /// Skip the metagame comparison
        #[arg(long)]
        no_meta: bool,
    },
    /// Learn archetype clusters from reference decks
    Learn {
        /// JSON array of {"name", "keyCards"} objects
        reference_decks: PathBuf,
        #[arg(long)]
        cards: Option<PathBuf>,
    },
    /// Assign a decklist to its nearest learned cluster
    Classify {
        decklist: PathBuf,
        #[arg(long)]
        cards: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOutput {
    #[serde(flatten)]
    main: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    sideboard: Option<SideboardAnalysis>,
}

fn card_database(cli: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    match cli.or_else(|| config.data.card_database.clone()) {
        Some(path) => Ok(path),
        None => bail!("no card database given; pass --cards or set data.card_database"),
    }
}

fn build_analyzer(cards: &Path, config: &AppConfig) -> anyhow::Result<DeckAnalyzer> {
    let source = InMemoryCardSource::from_json_file(cards)
        .with_context(|| format!("loading card database {}", cards.display()))?
        .with_fuzzy_threshold(config.resolver.fuzzy_threshold);

    let cache = Arc::new(ResolutionCache::from_capacity(config.resolver.cache_capacity));
    let resolver = CardResolver::with_cache(Arc::new(source), cache)
        .with_concurrency(config.resolver.concurrency);

    let store = Arc::new(JsonFileModelStore::new(config.model_path()));
    let learner = ArchetypeLearner::with_config(store, config.learner.kmeans());

    Ok(DeckAnalyzer::new(resolver, Arc::new(learner)))
}

fn read_decklist(path: &Path) -> anyhow::Result<deckscope::core::deck::Decklist> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading decklist {}", path.display()))?;
    Ok(parse_decklist(&text)?)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Args, config: AppConfig) -> anyhow::Result<()> {
    match args.command {
        Command::Analyze {
            decklist,
            cards,
            no_meta,
        } => {
            let mut analyzer = build_analyzer(&card_database(cards, &config)?, &config)?;
            if !no_meta {
                analyzer = analyzer.with_meta_decks(default_meta_decks());
            }

            let list = read_decklist(&decklist)?;
            let main = analyzer.analyze(list.main.as_slice()).await?;
            if !main.unresolved.is_empty() {
                logging::print_warning(&format!(
                    "{} card(s) not found: {}",
                    main.unresolved.len(),
                    main.unresolved.join(", ")
                ));
            }
            let sideboard = analyzer.analyze_sideboard(list.sideboard.as_slice(), &main).await;
            print_json(&AnalyzeOutput { main, sideboard })
        }
        Command::Learn {
            reference_decks,
            cards,
        } => {
            let analyzer = build_analyzer(&card_database(cards, &config)?, &config)?;
            let text = std::fs::read_to_string(&reference_decks)
                .with_context(|| format!("reading {}", reference_decks.display()))?;
            let decks: Vec<MetaDeck> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", reference_decks.display()))?;

            let outcome = analyzer.learn_clusters(&decks).await?;
            logging::print_success(&format!(
                "Learned {} clusters from {} decks; saved to {}",
                outcome.k,
                outcome.decks_used,
                config.model_path().display()
            ));
            print_json(&outcome)
        }
        Command::Classify { decklist, cards } => {
            let analyzer = build_analyzer(&card_database(cards, &config)?, &config)?;
            let list = read_decklist(&decklist)?;
            let assignment = analyzer.classify_deck(list.main.as_slice()).await?;
            if assignment.is_unknown() {
                logging::print_warning("No cluster model available; run `deckscope learn` first");
            }
            print_json(&assignment)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::load(),
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let _log_guard = logging::init(&level, config.logging.log_dir.as_deref());
    log::info!("Deckscope v{} starting", deckscope::VERSION);

    if let Err(e) = run(args, config).await {
        logging::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
    Ok(())
}
