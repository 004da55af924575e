use serde::{Deserialize, Serialize};

use crate::cloudflare::{ProviderReply, RecordCreator};
use crate::error::{ProviderError, RequestError};
use crate::record::DnsRecordRequest;

pub const SUCCESS_MESSAGE: &str = "DNS Record generated successfully.";
pub const UNEXPECTED_REPLY_MESSAGE: &str = "DNS provider returned an unexpected response.";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the DNS provider.";
pub const CONFIG_MESSAGE: &str = "Server configuration is incomplete.";

// HTTP status codes
pub const HTTP_OK: u16 = 200;
pub const HTTP_BAD_REQUEST: u16 = 400;
pub const HTTP_INTERNAL_ERROR: u16 = 500;
pub const HTTP_BAD_GATEWAY: u16 = 502;

/// Simplified result returned to the browser
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub message: String,
    pub success: bool,
}

impl ProxyReply {
    pub fn ok() -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

/// Status code plus reply body for one proxied request
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyOutcome {
    pub status: u16,
    pub reply: ProxyReply,
}

impl ProxyOutcome {
    fn new(status: u16, reply: ProxyReply) -> Self {
        Self { status, reply }
    }

    pub fn is_success(&self) -> bool {
        self.reply.success
    }
}

/// Forwards record requests to the provider and simplifies its answer
pub struct ProxyEndpoint<'a, C> {
    creator: &'a C,
}

impl<'a, C: RecordCreator> ProxyEndpoint<'a, C> {
    pub fn new(creator: &'a C) -> Self {
        Self { creator }
    }

    /// Handles a raw `/api/dns` body; every path produces a response
    pub async fn handle_body(&self, body: &[u8]) -> ProxyOutcome {
        match parse_body(body) {
            Ok(record) => self.create(&record).await,
            Err(err) => ProxyOutcome::new(HTTP_BAD_REQUEST, ProxyReply::failure(err.to_string())),
        }
    }

    /// Creates an already-parsed record; validation is repeated here so no path skips it
    pub async fn create(&self, record: &DnsRecordRequest) -> ProxyOutcome {
        if let Err(err) = record.validate() {
            return ProxyOutcome::new(HTTP_BAD_REQUEST, ProxyReply::failure(err.to_string()));
        }
        translate(self.creator.create_record(record).await)
    }
}

/// Outcome used when configuration is missing and no provider call is possible
pub fn config_failure() -> ProxyOutcome {
    ProxyOutcome::new(HTTP_INTERNAL_ERROR, ProxyReply::failure(CONFIG_MESSAGE))
}

/// Parses and validates an incoming request body
pub fn parse_body(body: &[u8]) -> Result<DnsRecordRequest, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::EmptyBody);
    }
    let record: DnsRecordRequest = serde_json::from_slice(body)?;
    record.validate()?;
    Ok(record)
}

/// Maps the provider result onto the reply shape
pub fn translate(result: Result<ProviderReply, ProviderError>) -> ProxyOutcome {
    match result {
        Ok(reply) if reply.success => ProxyOutcome::new(HTTP_OK, ProxyReply::ok()),
        Ok(reply) => match reply.first_error() {
            Some(message) => ProxyOutcome::new(HTTP_BAD_REQUEST, ProxyReply::failure(message)),
            None => ProxyOutcome::new(HTTP_BAD_GATEWAY, ProxyReply::failure(UNEXPECTED_REPLY_MESSAGE)),
        },
        Err(ProviderError::Malformed { .. }) => {
            ProxyOutcome::new(HTTP_BAD_GATEWAY, ProxyReply::failure(UNEXPECTED_REPLY_MESSAGE))
        }
        Err(ProviderError::Transport(_)) => {
            ProxyOutcome::new(HTTP_BAD_GATEWAY, ProxyReply::failure(UNREACHABLE_MESSAGE))
        }
    }
}
