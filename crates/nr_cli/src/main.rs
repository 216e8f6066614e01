use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nr_core::{Error, HistoryStorage, NewsQuery, ResearchPipeline};
use nr_export::{render_pdf, report};
use nr_sources::GoogleNewsSource;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod display;

const RECENT_QUERIES: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "nr", author, version, about = "Fetch recent news on a topic and summarize it with an LLM")]
pub struct Cli {
    /// History backend: csv or memory
    #[arg(long, env = "NR_STORAGE", default_value = "csv")]
    storage: String,
    #[arg(long, env = "NR_HISTORY_FILE", default_value = nr_storage::DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,
    #[arg(long, env = "NR_MODEL", default_value = "openai", help = "Model to use for summaries. Available models: openai (default), dummy")]
    model: String,
    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL")]
    model_url: Option<String>,
    #[arg(long, env = "NR_MODEL_NAME")]
    model_name: Option<String>,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Google News RSS search endpoint
    #[arg(long, env = "NR_NEWS_URL")]
    news_url: Option<String>,
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch and summarize news for a query
    Research {
        query: String,
        /// Number of articles to fetch
        #[arg(long, short = 'n', default_value_t = 5, value_parser = clap::value_parser!(u8).range(3..=20))]
        articles: u8,
        #[arg(long, default_value = nr_core::types::DEFAULT_COUNTRY)]
        country: String,
        #[arg(long, default_value = nr_core::types::DEFAULT_LANGUAGE)]
        language: String,
        /// Write per_article_summaries.pdf and overall_summary.pdf into this directory
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
    /// Inspect or manage the query history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[derive(clap::Subcommand, Debug)]
enum HistoryCommands {
    List {
        /// Only show queries containing this keyword (case-insensitive)
        #[arg(long)]
        keyword: Option<String>,
        /// How many of the latest queries to show when no keyword is given
        #[arg(long, default_value_t = RECENT_QUERIES)]
        recent: usize,
    },
    Clear,
    /// Write the full history to a PDF file
    Export { file: PathBuf },
}

impl Cli {
    fn inference_config(&self) -> nr_inference::Config {
        nr_inference::Config {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            model_name: self.model_name.clone(),
            base_url: self.model_url.clone(),
            ..Default::default()
        }
    }

    fn history(&self) -> nr_core::Result<Arc<dyn HistoryStorage>> {
        nr_storage::create_storage(&self.storage, Some(self.history_file.clone()))
    }

    fn pipeline(&self) -> nr_core::Result<ResearchPipeline> {
        let source = match &self.news_url {
            Some(url) => GoogleNewsSource::with_base_url(url.clone()),
            None => GoogleNewsSource::new(),
        };
        let inference = nr_inference::init(&self.inference_config())?;
        Ok(ResearchPipeline::new(Arc::new(source), inference, self.history()?))
    }
}

async fn write_pdf(path: &Path, title: &str, body: &str) -> anyhow::Result<()> {
    let bytes = render_pdf(title, body)?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("📄 Wrote {}", path.display());
    Ok(())
}

async fn research(cli: &Cli, request: NewsQuery, export_dir: Option<&Path>) -> anyhow::Result<()> {
    let pipeline = cli.pipeline()?;
    let research = pipeline.run(&request).await?;
    print!("{}", display::render_report(&research));

    if let Some(dir) = export_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        write_pdf(
            &dir.join("per_article_summaries.pdf"),
            report::PER_ARTICLE_TITLE,
            &report::per_article_text(&research.summaries),
        )
        .await?;
        write_pdf(
            &dir.join("overall_summary.pdf"),
            report::OVERALL_TITLE,
            &research.overall_summary,
        )
        .await?;
    }
    Ok(())
}

async fn history(cli: &Cli, command: &HistoryCommands) -> anyhow::Result<()> {
    let history = cli.history()?;
    match command {
        HistoryCommands::List { keyword, recent } => {
            let total = history.count().await?;
            if total == 0 {
                println!("No history yet. Run some queries!");
                return Ok(());
            }
            println!("📌 Total Queries Logged: {}", total);

            let shown = match keyword {
                Some(keyword) => {
                    let matched = history.filter(keyword).await?;
                    println!("✅ Found {} matching queries", matched.len());
                    matched
                }
                None => history.recent(*recent).await?,
            };
            print!("\n{}", display::render_history(&shown));
        }
        HistoryCommands::Clear => {
            history.clear().await?;
            println!("✅ History cleared!");
        }
        HistoryCommands::Export { file } => {
            let records = history.load_all().await?;
            write_pdf(file, report::HISTORY_TITLE, &report::history_text(&records)).await?;
            println!("⬇️ History exported to {}", file.display());
        }
    }
    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Research {
            query,
            articles,
            country,
            language,
            export_dir,
        } => {
            let request = NewsQuery::new(query.clone())
                .with_max_results(usize::from(*articles))
                .with_country(country)
                .with_language(language);
            research(cli, request, export_dir.as_deref()).await
        }
        Commands::History { command } => history(cli, command).await,
        Commands::Serve { addr } => {
            let state = nr_web::AppState::new(cli.pipeline()?);
            nr_web::serve(state, *addr).await?;
            Ok(())
        }
    }
}

/// How a failed run is reported to the user.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    message: String,
    to_stderr: bool,
    code: u8,
}

fn failure_outcome(err: &anyhow::Error) -> Outcome {
    match err.downcast_ref::<Error>() {
        Some(Error::EmptyQuery) => Outcome {
            message: "⚠️ Please enter a query.".to_string(),
            to_stderr: true,
            code: 2,
        },
        Some(Error::NoArticles) => Outcome {
            message: "❌ No articles found for that query.".to_string(),
            to_stderr: false,
            code: 0,
        },
        _ => Outcome {
            message: format!("⚠️ Error: {:#}", err),
            to_stderr: true,
            code: 1,
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let outcome = failure_outcome(&err);
            if outcome.to_stderr {
                eprintln!("{}", outcome.message);
            } else {
                println!("{}", outcome.message);
            }
            ExitCode::from(outcome.code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_research_arguments() {
        let cli = Cli::try_parse_from(["nr", "--model", "dummy", "research", "chip makers", "-n", "3", "--country", "US"]).unwrap();
        match cli.command {
            Commands::Research { query, articles, country, language, export_dir } => {
                assert_eq!(query, "chip makers");
                assert_eq!(articles, 3);
                assert_eq!(country, "US");
                assert_eq!(language, "en");
                assert!(export_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["nr", "research", "q", "-n", "2"]).is_err());
        assert!(Cli::try_parse_from(["nr", "research", "q", "-n", "21"]).is_err());
    }

    #[test]
    fn test_failure_outcomes() {
        let empty = failure_outcome(&anyhow::Error::new(Error::EmptyQuery));
        assert_eq!(empty.code, 2);
        assert!(empty.to_stderr);
        assert!(empty.message.contains("Please enter a query"));

        let none = failure_outcome(&anyhow::Error::new(Error::NoArticles));
        assert_eq!(none.code, 0);
        assert!(!none.to_stderr);
        assert_eq!(none.message, "❌ No articles found for that query.");

        let provider = failure_outcome(&anyhow::Error::new(Error::Inference("quota exceeded".to_string())));
        assert_eq!(provider.code, 1);
        assert!(provider.to_stderr);
        assert_eq!(provider.message, "⚠️ Error: Inference error: quota exceeded");
    }

    #[tokio::test]
    async fn test_empty_query_fails_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.csv");
        let file_arg = file.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["nr", "--model", "dummy", "--history-file", &file_arg, "research", "  "]).unwrap();
        let err = run(&cli).await.unwrap_err();
        assert_eq!(failure_outcome(&err).code, 2);
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn test_history_commands_use_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.csv");
        let file_arg = file.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["nr", "--history-file", &file_arg, "history", "list"]).unwrap();
        let history = cli.history().unwrap();
        history.append(&nr_core::HistoryRecord::new("rates", "steady")).await.unwrap();
        run(&cli).await.unwrap();

        let export = dir.path().join("history.pdf");
        let export_arg = export.to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["nr", "--history-file", &file_arg, "history", "export", &export_arg]).unwrap();
        run(&cli).await.unwrap();
        assert!(std::fs::read(&export).unwrap().starts_with(b"%PDF"));

        let cli = Cli::try_parse_from(["nr", "--history-file", &file_arg, "history", "clear"]).unwrap();
        run(&cli).await.unwrap();
        assert!(cli.history().unwrap().load_all().await.unwrap().is_empty());
    }
}
