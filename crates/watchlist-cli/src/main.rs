//! Command-line interface for the watchlist compare client
//!
//! # Usage
//!
//! ```bash
//! # Point at a backend (defaults to http://127.0.0.1:8000)
//! export WATCHLIST_API_BASE="https://stocks.example.com"
//!
//! watchlist compare AAPL "microsoft"
//! watchlist compare AAPL MSFT NVDA --format html
//! watchlist suggest
//! watchlist repl
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use watchlist_compare::bot::{BotConfig, CompareBot, Reply};
use watchlist_compare::{
    Comparator, CompareConfig, Environment, FormatterFactory, HttpStockApi, LookupCache,
    OutputFormat, RetryPolicy, StockApi, load_suggestions,
};

#[derive(Parser, Debug)]
#[command(name = "watchlist")]
#[command(about = "Compare stocks through the watchlist backend", long_about = None)]
struct Args {
    /// Backend base URL (overrides WATCHLIST_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Runtime environment: local or hosted (overrides WATCHLIST_ENV)
    #[arg(long, global = true)]
    env: Option<Environment>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Attempts for lookups and watchlist reads (1 disables retries)
    #[arg(long, global = true)]
    retries: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two or three tickers or company names
    Compare {
        /// Tickers or company names
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<String>,

        /// Output format: table, html or json
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// List symbols from the watchlist
    Suggest,
    /// Interactive compare form
    Repl {
        /// Output format: table, html or json
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

impl Args {
    fn compare_config(&self) -> anyhow::Result<CompareConfig> {
        let mut builder = CompareConfig::builder();
        if let Some(env) = self.env {
            builder = builder.environment(env);
        }
        if let Some(base) = &self.api_base {
            builder = builder.api_base(base);
        }
        if let Some(secs) = self.timeout {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(attempts) = self.retries {
            builder = builder.retry(RetryPolicy {
                max_attempts: attempts,
                ..RetryPolicy::default()
            });
        }
        builder
            .with_env()?
            .build()
            .context("invalid backend configuration")
    }
}

async fn run_compare(
    config: CompareConfig,
    inputs: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let cache = config
        .lookup_cache_enabled()
        .then(|| LookupCache::new(config.lookup_cache_ttl));
    let api = Arc::new(HttpStockApi::new(config)?);

    let mut comparator = Comparator::new(api);
    if let Some(cache) = cache {
        comparator = comparator.with_cache(cache);
    }

    let view = comparator.compare(inputs).await;
    println!("{}", FormatterFactory::create(format).format_view(&view));
    Ok(())
}

async fn run_suggest(config: CompareConfig) -> anyhow::Result<()> {
    let api = HttpStockApi::new(config)?;
    let suggestions = load_suggestions(&api as &dyn StockApi).await;

    if suggestions.is_empty() {
        println!("No watchlist suggestions available.");
    }
    for s in suggestions {
        println!("{:<8} {}", s.symbol, s.name);
    }
    Ok(())
}

async fn run_repl(config: CompareConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut bot = CompareBot::from_config(BotConfig {
        compare_config: config,
        output_format: format,
        ..Default::default()
    })?;

    println!("Watchlist compare - type /help for commands");
    let suggestions = bot.refresh_suggestions().await;
    if !suggestions.is_empty() {
        let symbols: Vec<_> = suggestions.iter().map(|s| s.symbol.as_str()).collect();
        println!("Watchlist: {}", symbols.join(" "));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", bot.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        if input.trim().is_empty() {
            continue;
        }

        match bot.process_input(&input).await {
            Ok(Reply::Output(text)) => println!("{text}\n"),
            Ok(Reply::Exit) => break,
            Err(e) => eprintln!("{}\n", e.user_message()),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    watchlist_utils::init_tracing();

    let args = Args::parse();
    let config = args.compare_config()?;
    info!("Using backend {} ({})", config.api_base, config.environment);

    match args.command {
        Commands::Compare { inputs, format } => run_compare(config, &inputs, format).await,
        Commands::Suggest => run_suggest(config).await,
        Commands::Repl { format } => run_repl(config, format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare() {
        let args = Args::try_parse_from([
            "watchlist",
            "compare",
            "AAPL",
            "microsoft corp",
            "--format",
            "html",
        ])
        .unwrap();

        match args.command {
            Commands::Compare { inputs, format } => {
                assert_eq!(inputs, vec!["AAPL", "microsoft corp"]);
                assert_eq!(format, OutputFormat::Html);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Args::try_parse_from([
            "watchlist",
            "--api-base",
            "https://stocks.example.com",
            "--env",
            "hosted",
            "--timeout",
            "5",
            "--retries",
            "1",
            "suggest",
        ])
        .unwrap();

        assert_eq!(args.api_base.as_deref(), Some("https://stocks.example.com"));
        assert_eq!(args.env, Some(Environment::Hosted));
        assert_eq!(args.timeout, Some(5));

        let config = args.compare_config().unwrap();
        assert_eq!(config.environment, Environment::Hosted);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_compare_requires_input() {
        assert!(Args::try_parse_from(["watchlist", "compare"]).is_err());
        assert!(Args::try_parse_from(["watchlist", "compare", "AAPL", "-f", "xml"]).is_err());
    }
}
