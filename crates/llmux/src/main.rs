//! A simple interactive chat over one LLM provider and an optional
//! remote tool server.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use llmux::{ClientFactory, Provider};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let Some(provider_id) = args.next() else {
        eprintln!("usage: llmux <provider> [tool-server-url]");
        return;
    };
    let provider: Provider = match provider_id.parse() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let api_key_var = match provider {
        Provider::Anthropic => "ANTHROPIC_API_KEY",
        Provider::Gemini => "GEMINI_API_KEY",
    };
    let Ok(api_key) = env::var(api_key_var) else {
        eprintln!("{api_key_var} environment variable is not set");
        return;
    };
    let system_prompt = env::var("LLMUX_SYSTEM_PROMPT").ok();

    let mut client = ClientFactory::create(provider);
    if let Err(err) = client.initialize(&api_key).await {
        eprintln!("failed to initialize the client: {err}");
        return;
    }
    if let Some(endpoint) = args.next() {
        if let Err(err) = client.connect_tool_bridge(&endpoint).await {
            eprintln!("failed to connect to the tool server: {err}");
            return;
        }
    }

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let result =
            client.process_query(line, system_prompt.as_deref()).await;
        progress_bar.finish_and_clear();

        match result {
            Ok(answer) => {
                println!(
                    "{}🤖 {}",
                    BAR_CHAR.bright_cyan(),
                    answer.bright_white()
                );
            }
            Err(err) => {
                println!("{}⚠️  {}", BAR_CHAR.bright_yellow(), err);
            }
        }
    }

    if let Err(err) = client.cleanup().await {
        error!("failed to clean up: {err}");
    }
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
