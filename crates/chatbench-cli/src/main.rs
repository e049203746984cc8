use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use futures::StreamExt;

use chatbench_llm::OpenAiGateway;
use chatbench_loop::{spawn_agent_loop, AgentLoopConfig};
use chatbench_tools::builtin_registry;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the available tools when they \
help, and call the `finish` tool with your final answer once the task is done.";

#[derive(Parser)]
#[command(name = "chatbench")]
#[command(about = "Tool-augmented agent loop for OpenAI-compatible endpoints")]
#[command(version)]
struct Cli {
    #[arg(long, env = "CHATBENCH_BASE_URL", default_value = "https://api.openai.com/v1")]
    base_url: String,

    #[arg(long, env = "CHATBENCH_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "CHATBENCH_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one agent conversation to completion
    Ask {
        /// The user message to start from
        message: String,

        #[arg(long, default_value_t = 10)]
        max_steps: u32,

        #[arg(long)]
        temperature: Option<f32>,

        /// Override the default system prompt
        #[arg(long)]
        system_prompt: Option<String>,
    },
    /// List the registered tools
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            message,
            max_steps,
            temperature,
            system_prompt,
        } => {
            run_ask(
                &cli.base_url,
                &cli.api_key,
                &cli.model,
                message,
                max_steps,
                temperature,
                system_prompt,
            )
            .await
        }
        Commands::Tools => {
            let registry = builtin_registry();
            for schema in registry.list_tools() {
                println!(
                    "{}  {}",
                    schema.function.name.cyan().bold(),
                    schema.function.description
                );
            }
            Ok(())
        }
    }
}

async fn run_ask(
    base_url: &str,
    api_key: &str,
    model: &str,
    message: String,
    max_steps: u32,
    temperature: Option<f32>,
    system_prompt: Option<String>,
) -> anyhow::Result<()> {
    let gateway = Arc::new(
        OpenAiGateway::new(api_key)
            .with_base_url(base_url)
            .with_model(model),
    );
    let registry = Arc::new(builtin_registry());

    let config = AgentLoopConfig {
        max_steps,
        temperature,
        system_prompt: Some(system_prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())),
        model_name: Some(model.to_string()),
        ..Default::default()
    };

    let mut invocation = spawn_agent_loop(gateway, registry, config, message);

    let cancel_token = invocation.cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{}", "cancelling...".yellow());
            cancel_token.cancel();
        }
    });

    while let Some(event) = invocation.events.next().await {
        if let Some(report) = &event.tool_call {
            match &report.result {
                None => {
                    println!(
                        "\n{} {}({})",
                        "→".yellow().bold(),
                        report.name.yellow(),
                        report.parameters
                    );
                }
                Some(result) if result.success => {
                    let data = result
                        .data
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    println!(
                        "{} {} {} ({}ms)",
                        "✓".green().bold(),
                        report.name.green(),
                        data,
                        result.duration_ms
                    );
                }
                Some(result) => {
                    println!(
                        "{} {} {}",
                        "✗".red().bold(),
                        report.name.red(),
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
        }

        if !event.content.is_empty() {
            if event.is_done {
                println!("\n{} {}", "answer:".blue().bold(), event.content);
            } else {
                print!("{}", event.content);
                io::stdout().flush().ok();
            }
        }

        if event.is_done {
            if let Some(error) = &event.error {
                println!("\n{} {}", "stopped:".red().bold(), error);
            }
            println!("{}", format!("[{} step(s)]", event.step).dimmed());
        }
    }

    let outcome = invocation
        .outcome
        .await
        .context("agent task panicked")?;
    log::debug!("final outcome: {outcome:?}");

    Ok(())
}
