use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use url::Url;

use super::{ BackendError, ChatBackend };
use crate::models::api::{ ChatReply, ChatRequest, ErrorReply };

/// Talks to a running proxy over `POST {proxy_url}/api/chat`.
pub struct HttpBackend {
    http: HttpClient,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(proxy_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(proxy_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("api/chat")?;

        Ok(Self { http: HttpClient::new(), endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, text: &str) -> Result<String, BackendError> {
        let req = ChatRequest { message: Some(text.to_string()) };
        let resp = self.http
            .post(self.endpoint.clone())
            .json(&req)
            .send().await
            .map_err(BackendError::Transport)?;

        let status = resp.status();
        debug!("Proxy answered {}", status);

        if status.is_success() {
            let reply = resp
                .json::<ChatReply>().await
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            Ok(reply.message)
        } else {
            let detail = resp
                .json::<ErrorReply>().await
                .ok()
                .and_then(|body| body.error)
                .filter(|e| !e.is_empty());
            Err(BackendError::Status { status: status.as_u16(), detail })
        }
    }
}
