use clap::Parser;
use tracing_subscriber::EnvFilter;

use duobot::core::bot::BotKind;
use duobot::core::config::Config;
use duobot::ui::chat_loop::{run_chat, Settings};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(name = "duobot")]
#[command(about = "A terminal chat client for the dual business/healthcare QA bot service")]
#[command(long_about = "Duobot is a full-screen terminal chat client for the dual QA bot \
backend. It keeps an independent conversation per assistant and renders the \
backend's formatted replies (headings, lists, emphasis, medical disclaimers).\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Tab               Switch between the business and healthcare assistants\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+L            Clear the active assistant's history\n\
  Ctrl+T            Toggle between dark and light themes\n\
  Ctrl+C            Quit")]
struct Args {
    #[arg(long, help = "Backend base URL (default http://localhost:5000)")]
    base_url: Option<String>,

    #[arg(short, long, help = "Assistant to open with: business or healthcare")]
    bot: Option<String>,

    #[arg(long, help = "UI theme: dark or light")]
    theme: Option<String>,

    #[arg(long, help = "Append the conversation transcript to this file")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load()?;

    let bot_name = args
        .bot
        .or(config.default_bot)
        .unwrap_or_else(|| "business".to_string());
    let bot = BotKind::from_wire_name(&bot_name).ok_or_else(|| {
        format!("unknown bot {bot_name:?} (expected \"business\" or \"healthcare\")")
    })?;

    let settings = Settings {
        base_url: args
            .base_url
            .or(config.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        bot,
        theme: args.theme.or(config.theme).unwrap_or_else(|| "dark".to_string()),
        log_file: args.log_file.or(config.log_file),
    };

    run_chat(settings).await
}
