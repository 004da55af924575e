use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ip::IpUtils;

pub const RECORD_TTL: u32 = 3600;
pub const NAME_MAX_LEN: usize = 16;

/// DNS record types this service creates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    #[default]
    A,
}

/// Why a record request was refused before reaching the provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("IPv4 address is required.")]
    MissingContent,
    #[error("'{0}' is not a valid IPv4 address.")]
    InvalidContent(String),
    #[error("Name is required.")]
    MissingName,
    #[error("Name must be at most {} characters.", NAME_MAX_LEN)]
    NameTooLong,
    #[error("Only English and numbers allowed !")]
    NameCharacters,
    #[error("Records must be proxied.")]
    NotProxied,
    #[error("TTL must be {}, got {}.", RECORD_TTL, .0)]
    UnsupportedTtl(u32),
}

/// Body of a record-creation request, as sent to `/api/dns` and forwarded to Cloudflare.
///
/// Field order matches the provider payload: `content, name, proxied, type, comment, ttl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordRequest {
    pub content: String,
    pub name: String,
    #[serde(default = "proxied_default")]
    pub proxied: bool,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "ttl_default")]
    pub ttl: u32,
}

fn proxied_default() -> bool {
    true
}

fn ttl_default() -> u32 {
    RECORD_TTL
}

impl DnsRecordRequest {
    /// Builds a proxied A record with the fixed TTL
    pub fn new(content: impl Into<String>, name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: name.into(),
            proxied: true,
            record_type: RecordType::A,
            comment: comment.into(),
            ttl: RECORD_TTL,
        }
    }

    /// Checks every field against the record invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_content(&self.content)?;
        validate_name(&self.name)?;
        if !self.proxied {
            return Err(ValidationError::NotProxied);
        }
        if self.ttl != RECORD_TTL {
            return Err(ValidationError::UnsupportedTtl(self.ttl));
        }
        Ok(())
    }
}

/// True when every character is an ASCII letter or digit; the empty string passes
pub fn is_name_charset(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !is_name_charset(name) {
        return Err(ValidationError::NameCharacters);
    }
    if name.len() > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    if content.is_empty() {
        return Err(ValidationError::MissingContent);
    }
    if !IpUtils::is_valid_ipv4(content) {
        return Err(ValidationError::InvalidContent(content.to_string()));
    }
    Ok(())
}
