pub mod models;
pub mod server;
pub mod llm;
pub mod cli;
pub mod client;

use cli::{ Args, Command, ServeArgs };
use llm::LlmConfig;
use llm::chat::{ new_client, ChatClient };
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.command {
        Command::Serve(serve_args) => serve(serve_args).await,
        Command::Chat(chat_args) => client::terminal::run(chat_args).await,
    }
}

pub fn build_chat_client(args: &ServeArgs) -> Result<Arc<dyn ChatClient>, Box<dyn Error + Send + Sync>> {
    let llm_config = LlmConfig {
        llm_type: args.chat_llm_type.parse()?,
        api_key: Some(args.chat_api_key.clone()).filter(|k| !k.trim().is_empty()),
        completion_model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
    };
    Ok(new_client(&llm_config)?)
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let chat_client = build_chat_client(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", chat_client.get_model());
    info!("Chat Base URL: {}", chat_client.get_base_url());
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let server = Server::new(args, chat_client);
    server.run().await
}
