use std::time::Duration;

use anyhow::Result;
use reqwest::header::AUTHORIZATION;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::error;
use url::Url;

use crate::api_errors::ApiError;
use crate::config::config_model::Api;
use crate::domain::value_objects::iam::SessionContext;

/// Authenticated JSON client for the lifeboard backend. Non-2xx responses
/// come back as [`ApiError`] with the raw body preserved, so callers can run
/// the error classifier over whatever shape the failure produced.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Api) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        // A trailing slash makes Url::join treat the last segment as a
        // directory instead of replacing it.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(self.endpoint(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", session.token))
            .query(query)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, path).await?;
        Ok(resp.json().await?)
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .http
            .post(self.endpoint(path)?)
            .header(AUTHORIZATION, format!("Bearer {}", session.token))
            .json(body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, path).await?;
        Ok(resp.json().await?)
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body_text = match resp.text().await {
            Ok(text) => text,
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        // Keep an unparseable body as a plain string; the classifier handles
        // both shapes.
        let body = serde_json::from_str::<Value>(&body_text)
            .unwrap_or_else(|_| Value::String(body_text.clone()));

        error!(
            status = %status,
            response_body = %body_text,
            context = %context,
            "api request failed"
        );

        Err(anyhow::Error::new(ApiError {
            status: status.as_u16(),
            body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&Api {
            base_url: base.to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_relative_to_the_base_path() {
        let client = client("https://api.lifeboard.app/api/v1");
        assert_eq!(
            client.endpoint("vault/items").unwrap().as_str(),
            "https://api.lifeboard.app/api/v1/vault/items"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_not_doubled() {
        let client = client("https://api.lifeboard.app/api/v1/");
        assert_eq!(
            client.endpoint("subscription").unwrap().as_str(),
            "https://api.lifeboard.app/api/v1/subscription"
        );
    }
}
