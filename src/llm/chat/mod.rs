pub mod groq;
pub mod openai;

use async_trait::async_trait;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::sync::Arc;
use thiserror::Error;
use super::{ LlmConfig, LlmType };
use self::groq::GroqChatClient;
use self::openai::OpenAIChatClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} API key is required")]
    MissingApiKey(&'static str),

    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One-shot chat completion against an external provider.
///
/// Returns the content of the first choice. An empty string means the provider
/// answered without any content; callers decide what to show in that case.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

#[derive(Serialize, Deserialize)]
struct CompletionMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ProviderError> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Groq => {
            let specific_client = GroqChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

pub(crate) fn authorized_http_client(api_key: &str) -> Result<HttpClient, ProviderError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
        ProviderError::InvalidApiKey(e.to_string())
    )?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    HttpClient::builder().default_headers(headers).build().map_err(ProviderError::Client)
}

/// Posts a single user turn to an OpenAI-compatible `/chat/completions` route
/// with the provider's default sampling parameters.
pub(crate) async fn chat_completion(
    http: &HttpClient,
    base_url: &str,
    model: &str,
    prompt: &str
) -> Result<String, ProviderError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));

    let req = CompletionRequest {
        model,
        messages: vec![CompletionMessage {
            role: "user".to_string(),
            content: Some(prompt.to_string()),
        }],
    };

    let resp = http
        .post(&url)
        .json(&req)
        .send().await?
        .error_for_status()?
        .json::<CompletionResponse>().await?;

    let content = resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default();

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_rejected_for_every_provider() {
        for llm_type in [LlmType::Groq, LlmType::OpenAI] {
            let config = LlmConfig { llm_type, ..LlmConfig::default() };
            let err = new_client(&config).err().expect("client without key must fail");
            assert!(matches!(err, ProviderError::MissingApiKey(_)));
        }
    }

    #[test]
    fn api_key_with_newline_is_invalid() {
        let err = authorized_http_client("bad\nkey").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidApiKey(_)));
    }

    #[test]
    fn response_without_content_decodes() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let resp: CompletionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.choices[0].message.as_ref().unwrap().content.is_none());

        let resp: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.choices.is_empty());
    }
}
