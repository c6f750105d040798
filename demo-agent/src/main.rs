// ABOUTME: Console launcher for the example agents. Each input line is a tool
// ABOUTME: call routed through the agent's permission gate and registry.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use toolwire::agent::presets;
use toolwire::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "demo-agent", version)]
#[command(about = "Chat with an example agent by calling its tools directly")]
struct Cli {
    /// Confirm every tool call, not only the ones the agent's policy flags
    #[arg(long, global = true)]
    confirm: bool,

    #[command(subcommand)]
    agent: AgentChoice,
}

#[derive(Subcommand, Debug)]
enum AgentChoice {
    /// Weather and current time in a city
    WeatherTime,
    /// Weather report plus its sentiment
    WeatherSentiment,
    /// Order status lookup
    OrderStatus,
    /// Session-scoped user preferences
    Preferences,
    /// Document analysis over artifacts
    Documents {
        /// Files to load as artifacts, stored under their file names
        files: Vec<PathBuf>,
    },
    /// Calculator toolset and a greeter
    Calculator,
    /// Capital cities, with callbacks that rewrite calls and results
    Capital,
    /// Routes urgent queries to the support agent
    Support,
    /// Reimbursements with manager approval for large amounts
    Reimbursement,
    /// Files under a directory, via the filesystem MCP server
    Filesystem {
        /// Directory to expose (default: TOOLWIRE_FS_ROOT or ./test_data)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Only expose these server tools (repeatable)
        #[arg(long = "allow", value_name = "TOOL")]
        allowed: Vec<String>,
    },
    /// Places and directions, via the Google Maps MCP server
    Maps,
}

/// Reads lines through rustyline with history.
struct Editor(DefaultEditor);

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.0.readline(prompt) {
            Ok(line) => {
                let _ = self.0.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Asks on the terminal before a gated call runs.
struct TerminalApproval;

#[async_trait]
impl ApprovalHandler for TerminalApproval {
    async fn approve(&self, request: &ApprovalRequest) -> Result<bool> {
        let question = format!("\n{}\nAllow this call? [y/N] ", request.prompt());
        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stdout = io::stdout();
            stdout.write_all(question.as_bytes())?;
            stdout.flush()?;
            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer)?;
            Ok(answer)
        })
        .await??;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn load_documents(files: &[PathBuf]) -> Result<Vec<(String, Artifact)>> {
    let mut documents = Vec::new();
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("not a file: {}", path.display()))?;
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let artifact = match String::from_utf8(data) {
            Ok(text) => Artifact::text(text),
            Err(e) => Artifact::new("application/octet-stream", e.into_bytes()),
        };
        documents.push((name, artifact));
    }
    Ok(documents)
}

async fn build(choice: &AgentChoice, config: &Config) -> Result<AgentPreset> {
    let preset = match choice {
        AgentChoice::WeatherTime => presets::weather_time().await,
        AgentChoice::WeatherSentiment => presets::weather_sentiment().await,
        AgentChoice::OrderStatus => presets::order_status().await,
        AgentChoice::Preferences => presets::user_preferences().await,
        AgentChoice::Documents { files } => {
            presets::document_analysis(load_documents(files).await?).await?
        }
        AgentChoice::Calculator => presets::calculator().await?,
        AgentChoice::Capital => presets::capital_lookup().await,
        AgentChoice::Support => presets::customer_support().await,
        AgentChoice::Reimbursement => presets::reimbursement().await,
        AgentChoice::Filesystem { root, allowed } => {
            let root: &Path = root.as_deref().unwrap_or(&config.filesystem_root);
            let filter = (!allowed.is_empty()).then(|| ToolFilter::new().allow(allowed.iter()));
            presets::filesystem(root, config.mcp_timeout, filter).await?
        }
        AgentChoice::Maps => presets::maps(config.maps_api_key()?, config.mcp_timeout).await?,
    };
    Ok(preset)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let mut preset = build(&cli.agent, &config).await?;
    if let Some(model) = &config.model {
        preset = preset.model(model);
    }
    if cli.confirm {
        preset.policy = Policy::ask_all();
    }

    let registry = preset.registry.clone();
    let tools = registry.list().await;
    println!("Agent: {} ({})", preset.definition.name, preset.definition.model);
    println!("Tools: {}", tools.join(", "));
    println!("Type 'help' for usage.\n");

    let mut agent = preset.into_direct(Arc::new(TerminalApproval));
    let mut repl = Repl::new(Editor(DefaultEditor::new()?), io::stdout());
    let outcome = repl.run(&mut agent).await;

    registry.close().await;
    outcome
}
