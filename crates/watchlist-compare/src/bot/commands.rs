//! Command parsing for the interactive compare session

use crate::error::{CompareError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare the given inputs directly (comma separated on the prompt)
    Compare { inputs: Vec<String> },
    /// Put text into a form slot
    Set { slot: usize, text: String },
    /// Put a symbol into the next free slot
    Add { symbol: String },
    /// Exchange slots 1 and 2
    Swap,
    /// Blank the form
    Clear,
    /// Show the form
    Show,
    /// Compare what is in the form
    Run,
    /// List watchlist suggestions
    Suggest,
    /// Show help
    Help,
    /// Leave the session
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Text that does not start with `/` is a direct comparison, split on
    /// commas so company names may contain spaces: `apple, microsoft`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(CompareError::Command("Empty input".to_string()));
        }

        let Some(command) = input.strip_prefix('/') else {
            return Ok(Command::Compare {
                inputs: input.split(',').map(|s| s.trim().to_string()).collect(),
            });
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, rest)| (name, rest.trim()));

        match name.to_lowercase().as_str() {
            "set" | "s" => {
                let (slot, text) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    CompareError::Command("Usage: /set <slot> <text>".to_string())
                })?;
                let slot = slot.parse().map_err(|_| {
                    CompareError::Command(format!("Slot must be a number, got '{slot}'"))
                })?;
                Ok(Command::Set {
                    slot,
                    text: text.trim().to_string(),
                })
            }
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(CompareError::Command(
                        "Missing symbol for add command".to_string(),
                    ));
                }
                Ok(Command::Add {
                    symbol: rest.to_string(),
                })
            }
            "swap" => Ok(Command::Swap),
            "clear" | "cls" => Ok(Command::Clear),
            "show" | "form" => Ok(Command::Show),
            "run" | "compare" | "cmp" | "r" => Ok(Command::Run),
            "suggest" | "watchlist" | "list" => Ok(Command::Suggest),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => Err(CompareError::Command(format!("Unknown command: {other}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Compare Commands
================

  <a>, <b>[, <c>]        Compare up to three tickers or company names
  /set <slot> <text>     Fill slot 1, 2 or 3
  /add <symbol>          Fill the next free slot (replaces slot 3 when full)
  /swap                  Exchange slots 1 and 2
  /clear                 Blank all slots
  /show                  Show the slots
  /run                   Compare what is in the slots
  /suggest               List symbols from your watchlist
  /help                  Show help
  /exit                  Exit

Aliases: /s = /set  /a = /add  /r = /run  /q = /exit
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direct_compare() {
        let cmd = Command::parse("AAPL, apple inc ,msft").unwrap();
        assert_eq!(
            cmd,
            Command::Compare {
                inputs: vec![
                    "AAPL".to_string(),
                    "apple inc".to_string(),
                    "msft".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_parse_set() {
        let cmd = Command::parse("/set 2 Johnson & Johnson").unwrap();
        assert_eq!(
            cmd,
            Command::Set {
                slot: 2,
                text: "Johnson & Johnson".to_string()
            }
        );

        assert!(Command::parse("/set two AAPL").is_err());
        assert!(Command::parse("/set 2").is_err());
    }

    #[test]
    fn test_parse_add() {
        let cmd = Command::parse("/a NVDA").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                symbol: "NVDA".to_string()
            }
        );
        assert!(Command::parse("/add").is_err());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/swap").unwrap(), Command::Swap);
        assert_eq!(Command::parse("/CLEAR").unwrap(), Command::Clear);
        assert_eq!(Command::parse("/r").unwrap(), Command::Run);
        assert_eq!(Command::parse("/suggest").unwrap(), Command::Suggest);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("   ").is_err());
        assert!(Command::parse("/frobnicate").is_err());
    }
}
