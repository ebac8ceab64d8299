use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for the Mars data analysis backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base address of the backend, e.g. http://localhost:8080
    #[arg(long, global = true, env = "MARS_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Path to a TOML config file (defaults to ~/.config/mars-analyzer/config.toml)
    #[arg(long, global = true, env = "MARS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Render GPT analysis and bot answers as markdown
    #[arg(long, global = true, default_value_t = false)]
    pub markdown: bool,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch NASA data and show its GPT analysis
    Analyze {
        /// Print the whole raw NASA payload instead of a snippet
        #[arg(long, default_value_t = false)]
        full: bool,
    },
    /// Ask the backend to ingest Mars imagery into its vector store
    Ingest,
    /// Interactive question/answer session over ingested data
    Chat {
        /// Run ingest before the first question
        #[arg(long, default_value_t = false)]
        ingest: bool,
    },
    /// Ask a single question and print the exchange
    Ask {
        /// The question to send
        question: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_global_flags() {
        let args = Args::try_parse_from([
            "mars-cli",
            "analyze",
            "--full",
            "--backend-url",
            "http://rover:8080",
        ])
        .unwrap();
        assert_eq!(args.command, Some(Command::Analyze { full: true }));
        assert_eq!(args.backend_url.as_deref(), Some("http://rover:8080"));
    }

    #[test]
    fn test_parse_ask() {
        let args = Args::try_parse_from(["mars-cli", "ask", "Did you find water?"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Ask {
                question: "Did you find water?".to_string()
            })
        );
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let args = Args::try_parse_from(["mars-cli", "--verbose"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.verbose);
    }
}
