//! CLI definitions and entry point

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use agent_adapter::adapter::Adapter;
use agent_adapter::api;
use agent_adapter::config::AdapterConfig;

/// agent-adapter - Serve a run-case handler over HTTP
#[derive(Parser, Debug)]
#[command(
    name = "agent-adapter",
    version,
    about = "Serve a run-case handler over HTTP",
    long_about = "Expose an agent as an HTTP service.\n\n\
                  POST /health answers {\"ok\": true}.\n\
                  POST /run-case passes the JSON body to the agent and returns its JSON answer."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the agent until interrupted
    Serve {
        /// Host to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// TOML file with `host` and `port`
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Which bundled agent answers /run-case
        #[arg(short, long, value_enum, default_value_t = Agent::Example)]
        agent: Agent,
    },

    /// Show version
    Version,
}

/// Bundled agents
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    /// Echo case_id and version, answer "ok"
    Example,
    /// Typed agent answering "ok: <user>"
    Simple,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Some(Command::Serve {
            host,
            port,
            config,
            agent,
        }) => serve(host, port, config, agent),
        Some(Command::Version) => {
            print_version(cli.json);
            Ok(())
        },
        None => {
            print_version(cli.json);
            if !cli.json {
                println!("\nRun 'agent-adapter --help' for usage");
                println!("Run 'agent-adapter serve' to start serving");
            }
            Ok(())
        },
    }
}

fn serve(
    host: Option<String>,
    port: Option<u16>,
    config: Option<PathBuf>,
    agent: Agent,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => AdapterConfig::load(&path)?,
        None => AdapterConfig::default(),
    }
    .with_overrides(host, port);

    log::debug!("serving {agent:?} agent on {}", config.address());

    match agent {
        Agent::Example => Adapter::new(api::example_handler).serve(&config.host, config.port),
        Agent::Simple => Adapter::new(api::wrap_simple_agent(api::example_simple_agent))
            .serve(&config.host, config.port),
    }
    .with_context(|| format!("cannot serve on {}", config.address()))
}

fn print_version(json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "version": agent_adapter::VERSION
            })
        );
    } else {
        println!("agent-adapter v{}", agent_adapter::VERSION);
    }
}
