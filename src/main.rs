use chat_relay::cli::{ Args, Command };
use clap::Parser;
use dotenv::dotenv;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();

    // The chat view owns the terminal, so only warnings reach stderr there.
    let default_filter = match args.command {
        Command::Serve(_) => "info",
        Command::Chat(_) => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    chat_relay::run(args).await
}
