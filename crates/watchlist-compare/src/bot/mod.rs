//! Interactive compare session
//!
//! This module keeps the state of one compare panel (the three input slots,
//! the chosen formatter and the watchlist suggestions) in an explicit
//! session object driven by parsed commands.
//!
//! # Example
//!
//! ```rust,ignore
//! use watchlist_compare::CompareConfig;
//! use watchlist_compare::bot::{BotConfig, CompareBot, Reply};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut bot = CompareBot::from_config(BotConfig {
//!         compare_config: CompareConfig::from_env()?,
//!         ..Default::default()
//!     })?;
//!     if let Reply::Output(text) = bot.process_input("AAPL, microsoft").await? {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod form;

use crate::api::{HttpStockApi, StockApi};
use crate::cache::LookupCache;
use crate::comparator::Comparator;
use crate::config::CompareConfig;
use crate::error::Result;
use crate::formatter::{Formatter, FormatterFactory, OutputFormat};
use crate::suggestions::{Suggestion, load_suggestions};
use std::sync::Arc;

pub use commands::Command;
pub use form::CompareForm;

/// Configuration for the compare session
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Backend client configuration
    pub compare_config: CompareConfig,
    /// Output format for comparison results
    pub output_format: OutputFormat,
    /// Prompt prefix
    pub prompt: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            compare_config: CompareConfig::default(),
            output_format: OutputFormat::Table,
            prompt: "compare> ".to_string(),
        }
    }
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text
    Output(String),
    /// End the session
    Exit,
}

/// One compare panel and its state
pub struct CompareBot {
    api: Arc<dyn StockApi>,
    comparator: Comparator,
    formatter: Box<dyn Formatter>,
    form: CompareForm,
    suggestions: Vec<Suggestion>,
    prompt: String,
}

impl CompareBot {
    /// Create a session over any backend implementation
    pub fn new(api: Arc<dyn StockApi>, output_format: OutputFormat) -> Self {
        Self {
            comparator: Comparator::new(Arc::clone(&api)),
            api,
            formatter: FormatterFactory::create(output_format),
            form: CompareForm::new(),
            suggestions: Vec::new(),
            prompt: BotConfig::default().prompt,
        }
    }

    /// Create a session talking HTTP to the configured backend
    pub fn from_config(config: BotConfig) -> Result<Self> {
        let compare_config = config.compare_config;
        let cache = compare_config
            .lookup_cache_enabled()
            .then(|| LookupCache::new(compare_config.lookup_cache_ttl));
        let api: Arc<dyn StockApi> = Arc::new(HttpStockApi::new(compare_config)?);

        let mut bot = Self::new(api, config.output_format);
        if let Some(cache) = cache {
            bot.comparator = bot.comparator.with_cache(cache);
        }
        bot.prompt = config.prompt;
        Ok(bot)
    }

    /// Get the prompt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn form(&self) -> &CompareForm {
        &self.form
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Fetch watchlist suggestions; failures leave the list empty
    pub async fn refresh_suggestions(&mut self) -> &[Suggestion] {
        self.suggestions = load_suggestions(self.api.as_ref()).await;
        &self.suggestions
    }

    /// Process user input and return a reply
    pub async fn process_input(&mut self, input: &str) -> Result<Reply> {
        let command = Command::parse(input)?;
        self.execute_command(command).await
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Result<Reply> {
        let output = match command {
            Command::Compare { inputs } => {
                let view = self.comparator.compare(inputs.as_slice()).await;
                self.formatter.format_view(&view)
            }
            Command::Run => {
                let view = self.comparator.compare(self.form.inputs()).await;
                self.formatter.format_view(&view)
            }
            Command::Set { slot, text } => {
                self.form.set(slot, text)?;
                self.render_form()
            }
            Command::Add { symbol } => {
                self.form.fill_next(symbol.trim().to_uppercase());
                self.render_form()
            }
            Command::Swap => {
                self.form.swap();
                self.render_form()
            }
            Command::Clear => {
                self.form.clear();
                self.render_form()
            }
            Command::Show => self.render_form(),
            Command::Suggest => {
                self.refresh_suggestions().await;
                self.render_suggestions()
            }
            Command::Help => Command::help_text().to_string(),
            Command::Exit => return Ok(Reply::Exit),
        };

        Ok(Reply::Output(output))
    }

    fn render_form(&self) -> String {
        self.form
            .inputs()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let text = if text.trim().is_empty() { "(empty)" } else { text.as_str() };
                format!("[{}] {}", i + 1, text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_suggestions(&self) -> String {
        if self.suggestions.is_empty() {
            return "No watchlist suggestions available.".to_string();
        }
        self.suggestions
            .iter()
            .map(|s| {
                if s.name.is_empty() {
                    s.symbol.clone()
                } else {
                    format!("{:<8} {}", s.symbol, s.name)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ComparisonResult, MockStockApi, SearchResult, WatchlistEntry};
    use crate::error::{CompareError, MSG_EMPTY_INPUT};

    fn ok_payload() -> ComparisonResult {
        serde_json::from_value(serde_json::json!({
            "success": true,
            "stocks": [
                {"symbol": "AAPL", "price": 150.2, "change": 1.23},
                {"symbol": "MSFT", "price": 310.5, "change": -0.4}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_form_editing() {
        let mut bot = CompareBot::new(Arc::new(MockStockApi::new()), OutputFormat::Table);

        bot.process_input("/set 1 apple").await.unwrap();
        bot.process_input("/add msft").await.unwrap();
        let reply = bot.process_input("/swap").await.unwrap();

        assert_eq!(
            reply,
            Reply::Output("[1] MSFT\n[2] apple\n[3] (empty)".to_string())
        );
        assert_eq!(bot.form().inputs(), ["MSFT", "apple", ""]);

        bot.process_input("/clear").await.unwrap();
        assert!(bot.form().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_slot_is_an_error() {
        let mut bot = CompareBot::new(Arc::new(MockStockApi::new()), OutputFormat::Table);
        let err = bot.process_input("/set 7 AAPL").await.unwrap_err();
        assert!(matches!(err, CompareError::InvalidSlot(7)));
    }

    #[tokio::test]
    async fn test_run_uses_form_slots() {
        let mut api = MockStockApi::new();
        api.expect_search()
            .withf(|q| q == "apple inc")
            .times(1)
            .returning(|_| Ok(vec![SearchResult::new("AAPL", "Apple Inc.")]));
        api.expect_compare()
            .withf(|symbols| symbols.iter().map(String::as_str).eq(["AAPL", "MSFT"]))
            .times(1)
            .returning(|_| Ok(ok_payload()));

        let mut bot = CompareBot::new(Arc::new(api), OutputFormat::Html);
        bot.process_input("/set 1 apple inc").await.unwrap();
        bot.process_input("/set 3 MSFT").await.unwrap();

        let Reply::Output(html) = bot.process_input("/run").await.unwrap() else {
            panic!("expected output");
        };
        assert!(html.contains("<span>apple inc -&gt; AAPL</span>"));
        assert!(html.contains("<td>-0.40%</td>"));
    }

    #[tokio::test]
    async fn test_run_with_empty_form() {
        let mut api = MockStockApi::new();
        api.expect_compare().never();

        let mut bot = CompareBot::new(Arc::new(api), OutputFormat::Table);
        let reply = bot.process_input("/run").await.unwrap();
        assert_eq!(reply, Reply::Output(MSG_EMPTY_INPUT.to_string()));
    }

    #[tokio::test]
    async fn test_direct_compare() {
        let mut api = MockStockApi::new();
        api.expect_compare().times(1).returning(|_| Ok(ok_payload()));

        let mut bot = CompareBot::new(Arc::new(api), OutputFormat::Table);
        let Reply::Output(text) = bot.process_input("AAPL, MSFT").await.unwrap() else {
            panic!("expected output");
        };
        assert!(text.contains("$150.20"));
        assert!(text.contains("$310.50"));
    }

    #[tokio::test]
    async fn test_suggest() {
        let mut api = MockStockApi::new();
        api.expect_watchlist().times(1).returning(|| {
            Ok(vec![WatchlistEntry {
                symbol: Some("nvda".to_string()),
                company: Some("NVIDIA".to_string()),
                ..Default::default()
            }])
        });

        let mut bot = CompareBot::new(Arc::new(api), OutputFormat::Table);
        let reply = bot.process_input("/suggest").await.unwrap();
        assert_eq!(reply, Reply::Output("NVDA     NVIDIA".to_string()));
        assert_eq!(bot.suggestions().len(), 1);
    }

    #[tokio::test]
    async fn test_exit() {
        let mut bot = CompareBot::new(Arc::new(MockStockApi::new()), OutputFormat::Table);
        assert_eq!(bot.process_input("/exit").await.unwrap(), Reply::Exit);
    }
}
