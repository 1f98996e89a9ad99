//! BIOFEAST CLI
//!
//! Terminal front end for the sustainable-food chatbot: chat on stdin/stdout,
//! browse the conversation log, or show what the bot is about.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use elizaos_plugin_biofeast::{BiofeastConfig, BiofeastPlugin, ChatLog, ABOUT_TEXT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "biofeast")]
#[command(author = "elizaOS")]
#[command(version)]
#[command(about = "BIOFEAST: sustainable food practices chatbot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Intent catalogue JSON file
    #[arg(long, global = true, env = "BIOFEAST_CATALOGUE_PATH")]
    catalogue: Option<PathBuf>,

    /// Lexicon JSON file
    #[arg(long, global = true, env = "BIOFEAST_LEXICON_PATH")]
    lexicon: Option<PathBuf>,

    /// WordNet database directory (overrides --lexicon)
    #[arg(long, global = true, env = "BIOFEAST_WORDNET_DIR")]
    wordnet: Option<PathBuf>,

    /// Conversation log file
    #[arg(long, global = true, env = "BIOFEAST_CHAT_LOG")]
    log: Option<PathBuf>,

    /// Keep punctuation and clitic tokens when normalizing
    #[arg(long, global = true)]
    keep_punctuation: bool,

    /// Seed for reproducible response selection
    #[arg(long, global = true, env = "BIOFEAST_SEED")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot (default)
    #[command(alias = "home")]
    Chat {
        /// Do not write turns to the conversation log
        #[arg(long)]
        no_log: bool,
    },

    /// Print the logged conversation history
    History,

    /// Describe the chatbot
    About,
}

impl Cli {
    fn config(&self) -> anyhow::Result<BiofeastConfig> {
        let mut config = BiofeastConfig::from_env()?;
        if let Some(path) = &self.catalogue {
            config = config.with_catalogue_path(path);
        }
        if let Some(path) = &self.lexicon {
            config = config.with_lexicon_path(path);
        }
        if let Some(dir) = &self.wordnet {
            config = config.with_wordnet_dir(dir);
        }
        if let Some(path) = &self.log {
            config = config.with_chat_log_path(path);
        }
        if self.keep_punctuation {
            config = config.with_filter_non_alphanumeric(false);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Per-session state owned by the front end.
#[derive(Debug, Default)]
struct Session {
    turns: usize,
}

fn chat<R: BufRead, W: Write>(
    bot: &BiofeastPlugin,
    log: Option<&ChatLog>,
    input: R,
    out: &mut W,
) -> anyhow::Result<Session> {
    let mut session = Session::default();
    writeln!(out, "{}", bot.get_greeting())?;
    write!(out, "You: ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if !text.is_empty() {
            session.turns += 1;
            let response = bot.respond(text);
            writeln!(out, "Chatbot: {}", response)?;
            if let Some(log) = log {
                if let Err(e) = log.append(text, &response) {
                    tracing::warn!(error = %e, "Could not log turn");
                }
            }
            tracing::debug!(turn = session.turns, "Answered");
        }
        write!(out, "You: ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(session)
}

fn print_history<W: Write>(log: &ChatLog, out: &mut W) -> anyhow::Result<()> {
    let turns = log.history()?;
    if turns.is_empty() {
        writeln!(out, "No conversation history yet.")?;
    }
    for turn in turns {
        writeln!(out, "User: {}", turn.user_input)?;
        writeln!(out, "Chatbot: {}", turn.response)?;
        writeln!(out, "---")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let mut stdout = io::stdout();

    match cli.command.unwrap_or(Commands::Chat { no_log: false }) {
        Commands::Chat { no_log } => {
            let bot = BiofeastPlugin::from_config(&config).context("loading responder resources")?;
            let log = if no_log {
                None
            } else {
                Some(ChatLog::open(config.chat_log_path())?)
            };
            let stdin = io::stdin();
            let session = chat(&bot, log.as_ref(), stdin.lock(), &mut stdout)?;
            tracing::info!(turns = session.turns, "Session ended");
        }
        Commands::History => {
            print_history(&ChatLog::at(config.chat_log_path()), &mut stdout)?;
        }
        Commands::About => {
            writeln!(stdout, "{}", ABOUT_TEXT)?;
        }
    }

    Ok(())
}
