// command line interface

use crate::core::{DEFAULT_API_URL, DEFAULT_MODEL, SYSTEM_PROMPT};
use crate::{Chat, ModerationSystem, OpenRouter, Server, load_terms, repl};
use clap::{Args, Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modchat", about = "Chat with an LLM behind a content moderation filter")]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,

    /// file of banned terms, one per line (replaces the built-in list)
    #[arg(long, global = true)]
    banned_terms: Option<PathBuf>,

    /// print results as json
    #[arg(long, global = true)]
    json: bool,

    /// debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ModelArgs {
    /// api key for the model provider
    #[arg(long, short = 'k', env = "OPENROUTER_API", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// chat completions endpoint
    #[arg(long, env = "MODCHAT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// model identifier
    #[arg(long, short, env = "MODCHAT_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    /// seconds to wait for the model before giving up
    #[arg(long, env = "MODCHAT_TIMEOUT", default_value = "30", global = true)]
    timeout: u64,

    /// system prompt sent with every message
    #[arg(long, env = "MODCHAT_SYSTEM_PROMPT", default_value = SYSTEM_PROMPT, hide_default_value = true, global = true)]
    system: String,
}

#[derive(Subcommand)]
enum Commands {
    /// interactive chat (default)
    Chat,

    /// run the built-in moderation test prompts through the model
    Test,

    /// run moderation only, without calling the model
    Check {
        /// text to check
        text: String,
    },

    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let moderator = match &cli.banned_terms {
        Some(path) => ModerationSystem::new(load_terms(path)?)?,
        None => ModerationSystem::standard()?,
    };
    tracing::debug!(terms = moderator.terms().count(), "moderation ready");

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Check { text } => {
            if cli.json {
                println!("{}", check_json(&moderator, &text));
            } else {
                print!("{}", check_text(&moderator, &text));
            }
            Ok(())
        }

        Commands::Chat => {
            let chat = connect(cli.model, moderator)?;
            let input = BufReader::new(tokio::io::stdin());
            Ok(repl::run(&chat, input, &mut tokio::io::stdout(), cli.json).await?)
        }

        Commands::Test => {
            let chat = connect(cli.model, moderator)?;
            Ok(repl::run_tests(&chat, &mut tokio::io::stdout(), cli.json).await?)
        }

        Commands::Serve { port, host } => {
            let chat = connect(cli.model, moderator)?;
            Ok(Server::run(chat, &host, port).await?)
        }
    }
}

fn connect(args: ModelArgs, moderator: ModerationSystem) -> Result<Chat<OpenRouter>> {
    let model = OpenRouter::new(args.api_key)?
        .with_api_url(args.api_url)
        .with_model(args.model)
        .with_timeout(Duration::from_secs(args.timeout))?;

    tracing::debug!(model = model.model(), "model client ready");

    Ok(Chat::new(model, moderator).with_system_prompt(args.system))
}

/// Input verdict plus what output redaction would make of the same text.
pub fn check_json(moderator: &ModerationSystem, text: &str) -> serde_json::Value {
    let verdict = moderator.check_input(text);
    let redaction = moderator.moderate_output(text);

    serde_json::json!({
        "safe": verdict.safe,
        "reason": verdict.reason,
        "redacted": redaction.text,
        "modified": redaction.modified,
    })
}

pub fn check_text(moderator: &ModerationSystem, text: &str) -> String {
    let verdict = moderator.check_input(text);
    let redaction = moderator.moderate_output(text);

    let label = if verdict.safe { "safe" } else { "blocked" };
    let mut report = format!("{label}: {}\n", verdict.reason);
    if redaction.modified {
        report.push_str(&format!("as output: {}\n", redaction.text));
    }
    report
}

fn init_logging(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` wins when set and valid, otherwise `--verbose` picks the level.
pub fn log_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            EnvFilter::new(if verbose { "modchat=debug" } else { "modchat=warn" })
        })
}
