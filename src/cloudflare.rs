use serde::Deserialize;
use worker::*;

use crate::config::Config;
use crate::error::ProviderError;
use crate::record::DnsRecordRequest;

// Constants for better maintainability
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const CONTENT_TYPE_JSON: &str = "application/json";
const HEADER_AUTH_KEY: &str = "X-Auth-Key";
const HEADER_AUTH_EMAIL: &str = "X-Auth-Email";
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,HEAD,POST,OPTIONS"),
    ("Access-Control-Max-Age", "86400"),
];

/// The part of Cloudflare's response envelope this service reads
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ProviderReply {
    pub success: bool,
    #[serde(default)]
    pub errors: Option<Vec<ApiError>>,
}

impl ProviderReply {
    /// First error message the provider reported, if any
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .as_deref()
            .and_then(|errors| errors.first())
            .map(|err| err.message.as_str())
    }
}

/// Cloudflare API error structure
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<u32>,
    pub message: String,
}

/// Something that can create a DNS record at the provider
#[allow(async_fn_in_trait)]
pub trait RecordCreator {
    async fn create_record(&self, record: &DnsRecordRequest) -> std::result::Result<ProviderReply, ProviderError>;
}

/// Cloudflare client authenticated with a global API key
pub struct CloudflareClient {
    zone_id: String,
    auth_key: String,
    auth_email: String,
}

impl CloudflareClient {
    /// Create a new client instance
    pub fn new(zone_id: String, auth_key: String, auth_email: String) -> Self {
        Self {
            zone_id,
            auth_key,
            auth_email,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.zone_id.clone(),
            config.auth_key.clone(),
            config.auth_email.clone(),
        )
    }

    /// Record-creation endpoint for the configured zone
    pub fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", CLOUDFLARE_API_BASE, self.zone_id)
    }

    /// Headers sent with every provider request, credentials included
    fn provider_headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = vec![
            (HEADER_AUTH_KEY, self.auth_key.as_str()),
            (HEADER_AUTH_EMAIL, self.auth_email.as_str()),
            ("Content-Type", CONTENT_TYPE_JSON),
        ];
        headers.extend(CORS_HEADERS);
        headers
    }

    fn build_request(&self, record: &DnsRecordRequest) -> Result<Request> {
        let body = serde_json::to_string(record)?;

        let mut init = RequestInit::new();
        init.with_method(Method::Post);
        init.with_body(Some(body.into()));

        let mut req = Request::new_with_init(&self.records_url(), &init)?;
        let headers = req.headers_mut()?;
        for (name, value) in self.provider_headers() {
            headers.set(name, value)?;
        }
        Ok(req)
    }
}

impl RecordCreator for CloudflareClient {
    async fn create_record(&self, record: &DnsRecordRequest) -> std::result::Result<ProviderReply, ProviderError> {
        let req = self
            .build_request(record)
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let mut resp = Fetch::Request(req).send().await.map_err(|e| {
            console_error!("Cloudflare request for {} failed: {}", record.name, e);
            ProviderError::Transport(e.to_string())
        })?;

        let status = resp.status_code();
        let text = resp
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        parse_reply(status, &text).inspect_err(|e| console_warn!("{}", e))
    }
}

/// Reads a provider body regardless of HTTP status; error statuses still carry the envelope
pub fn parse_reply(status: u16, body: &str) -> std::result::Result<ProviderReply, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Malformed {
        status,
        detail: e.to_string(),
    })
}
