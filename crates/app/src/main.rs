use chrono::Utc;
use clap::Parser;
use search_rerank_core::providers::google::DEFAULT_ENDPOINT;
use search_rerank_core::{
    fetch_results, write_corpus, CorpusError, GoogleCustomSearchProvider, Normalizer,
    RankingMetric, SearchResult, Session, SessionError, SessionStage, MAX_SELECTIONS,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "search-rerank", version)]
struct Cli {
    /// Search query.
    query: String,

    /// Google Custom Search API key.
    #[arg(long, env = "GOOGLE_API_KEY")]
    api_key: String,

    /// Google Custom Search engine id.
    #[arg(long, env = "GOOGLE_CX")]
    cx: String,

    /// Search API endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Number of 10-result pages to fetch.
    #[arg(long, default_value = "2")]
    pages: u32,

    /// Ranks to mark relevant, comma separated. Skips the interactive prompt.
    #[arg(long, value_delimiter = ',')]
    relevant: Vec<u32>,

    /// Sorting preference: jaccard or cosine. Unrecognized values keep
    /// provider order.
    #[arg(long)]
    metric: Option<String>,

    /// Directory for the relevance corpus files.
    #[arg(long, default_value = ".")]
    corpus_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let normalizer = Normalizer::new()?;
    let provider = GoogleCustomSearchProvider::new(&cli.endpoint, &cli.api_key, &cli.cx);

    info!(
        version = app_version,
        query = %cli.query,
        started_at = %Utc::now().to_rfc3339(),
        "search-rerank boot"
    );

    let raw = fetch_results(&provider, &cli.query, cli.pages).await?;
    info!(result_count = raw.len(), pages = cli.pages, "results fetched");

    let mut session = Session::new(&normalizer);
    let report = session.load_results(&cli.query, raw)?;
    for skipped in report.skipped {
        warn!(rank = skipped.rank, reason = %skipped.reason, "skipped result");
    }

    if session.results().is_empty() {
        println!("no results for query: {}", session.query());
        return Ok(());
    }

    for result in session.results() {
        print_result(result, false);
    }

    if cli.relevant.is_empty() {
        prompt_selections(&mut session)?;
    } else {
        apply_selections(&mut session, &cli.relevant)?;
    }
    session.finish_selection()?;

    let reference = session.build_reference()?.clone();
    match write_corpus(&cli.corpus_dir, session.query(), &reference) {
        Ok(files) => info!(
            raw = %files.raw_path.display(),
            clean = %files.clean_path.display(),
            "relevance corpus written"
        ),
        Err(CorpusError::EmptyQuery) => warn!("query is empty, corpus not written"),
        Err(error) => return Err(error.into()),
    }

    session.score()?;

    let choice = match &cli.metric {
        Some(choice) => choice.clone(),
        None => prompt_metric()?,
    };
    let metric = RankingMetric::parse(&choice);
    match metric {
        Some(RankingMetric::Jaccard) => println!("Showing results by Jaccard coefficient:"),
        Some(RankingMetric::Cosine) => println!("Showing results by cosine similarity:"),
        None => {
            warn!(choice = %choice, "unrecognized metric, keeping provider order");
            println!("Unrecognized sorting preference, keeping provider order:");
        }
    }

    let ranked = session.sort_by(metric)?;
    for result in ranked {
        print_result(result, true);
    }

    Ok(())
}

fn print_result(result: &SearchResult, with_scores: bool) {
    println!();
    println!("[{}] {}", result.rank, result.title);
    println!("  {}", result.url);
    println!("  {}", result.snippet);
    if with_scores {
        println!(
            "  jaccard={:.4} cosine={:.4}",
            result.jaccard_score, result.cosine_score
        );
    }
}

/// Non-interactive selection from the --relevant flag. Duplicates and unknown
/// ranks are reported and skipped, exactly like the interactive path.
fn apply_selections(session: &mut Session<'_>, ranks: &[u32]) -> anyhow::Result<()> {
    for rank in ranks {
        match session.select(*rank) {
            Ok(_) => {}
            Err(error @ (SessionError::DuplicateSelection(_) | SessionError::UnknownRank(_))) => {
                warn!(rank = *rank, "{error}");
            }
            Err(SessionError::SelectionClosed) => {
                warn!(rank = *rank, "selection limit reached, ignoring remaining ranks");
                break;
            }
            Err(error) => return Err(error.into()),
        }
    }
    Ok(())
}

/// Interactive selection loop. A negative number (or end of input) is the
/// sentinel; duplicate and unknown ranks are reported and do not consume a
/// selection slot.
fn prompt_selections(session: &mut Session<'_>) -> anyhow::Result<()> {
    println!();
    println!("Choose up to {MAX_SELECTIONS} results that were relevant to your search.");
    println!("Enter a negative number to stop.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while session.stage() == SessionStage::ResultsFetched {
        print!("Enter a result number (negative to stop): ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let trimmed = line.trim();
        let Ok(number) = trimmed.parse::<i64>() else {
            println!("Error: '{trimmed}' is not a number");
            continue;
        };
        if number < 0 {
            break;
        }
        let Ok(rank) = u32::try_from(number) else {
            println!("Error: {number} is not a valid result number");
            continue;
        };

        match session.select(rank) {
            Ok(remaining) => println!("{remaining} selection(s) left"),
            Err(error @ (SessionError::DuplicateSelection(_) | SessionError::UnknownRank(_))) => {
                println!("Error: {error}");
            }
            Err(SessionError::SelectionClosed) => break,
            Err(error) => return Err(error.into()),
        }
    }

    Ok(())
}

fn prompt_metric() -> anyhow::Result<String> {
    println!();
    println!("Select sorting preference:");
    println!("[1] Jaccard Coefficient");
    println!("[2] Cosine Similarity");
    print!("Enter choice here: ");
    io::stdout().flush()?;

    let mut choice = String::new();
    io::stdin().read_line(&mut choice)?;
    Ok(choice.trim().to_string())
}
