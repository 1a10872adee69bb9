use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use meme_stream_lib::trending::{resolve_topic, TRENDING_TOPICS};
use meme_stream_lib::{
    logger, HttpMemeSearch, MemeSearch, MemeStreamConfig, SearchOutcome, SearchSession,
};

#[derive(Parser)]
#[command(name = "meme-stream", about = "Fish the meme you like from Imgur, with Bing as fallback")]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the maximum number of results.
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Print the outcome as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for memes matching a query.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Search a trending topic ("Random" and "Surprise me" pick one for you).
    Topic { name: String },
    /// List trending topics.
    Trending,
    /// Music memes from Imgur.
    Ticker,
    /// Read queries from stdin; a blank line repeats the last one, `:topic <name>`
    /// searches a trending topic, `:q` quits.
    Interactive,
}

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MemeStreamConfig::load(path)?,
        None => MemeStreamConfig::default(),
    };
    if let Some(limit) = cli.limit {
        config.result_limit = limit;
    }
    let search = MemeSearch::from_config(&config)?;

    match cli.command {
        Command::Search { query } => {
            let query = query.join(" ");
            let outcome = search.search(&query);
            print_outcome(&query, &outcome, cli.json)?;
        }
        Command::Topic { name } => {
            let query = resolve_topic(&name, &mut rand::thread_rng());
            info!("Topic '{}' resolved to '{}'", name, query);
            let outcome = search.search(&query);
            print_outcome(&query, &outcome, cli.json)?;
        }
        Command::Trending => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&TRENDING_TOPICS)?);
            } else {
                for topic in TRENDING_TOPICS {
                    println!("{}", topic);
                }
            }
        }
        Command::Ticker => {
            let outcome = search.ticker();
            print_outcome(meme_stream_lib::search::TICKER_QUERY, &outcome, cli.json)?;
        }
        Command::Interactive => run_interactive(&search, cli.json)?,
    }
    Ok(())
}

fn run_interactive(search: &HttpMemeSearch, json: bool) -> Result<(), Box<dyn Error>> {
    let mut session = SearchSession::new();
    let mut rng = rand::thread_rng();
    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == ":q" {
            break;
        }
        match session.handle_line(&line, &mut rng) {
            Some(query) => {
                let outcome = search.search(query);
                print_outcome(query, &outcome, json)?;
            }
            None => eprintln!("Type a search term first."),
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "search> ")?;
    stdout.flush()
}

fn print_outcome(query: &str, outcome: &SearchOutcome, json: bool) -> Result<(), Box<dyn Error>> {
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    if outcome.is_empty() {
        println!("No memes found for '{}'. Try another keyword.", query);
        return Ok(());
    }
    let source = outcome.source.map(|s| s.label()).unwrap_or("unknown");
    println!("Results for '{}' ({} from {}):", query, outcome.urls.len(), source);
    for url in &outcome.urls {
        println!("{}", url);
    }
    Ok(())
}
