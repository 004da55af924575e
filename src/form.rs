//! Form state for the record-creation page.
//!
//! The controller owns the three input values plus the flags the page renders
//! from. Its phase only moves through `submit` and `complete`:
//! `Idle -> Submitting -> {Succeeded, Failed}`, with `Failed` returning to
//! `Idle` on the next edit. `Succeeded` is final.

use thiserror::Error;

use crate::proxy::ProxyReply;
use crate::record::{self, DnsRecordRequest, NAME_MAX_LEN, ValidationError};

/// Where the form is in its single submit cycle
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Succeeded { hostname: String },
    Failed,
}

/// Why `submit` did not produce a request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the record has already been created")]
    Finished,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct FormController {
    domain: String,
    ip: String,
    name: String,
    comment: String,
    name_error: bool,
    error_message: String,
    phase: FormPhase,
}

impl FormController {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ip: String::new(),
            name: String::new(),
            comment: String::new(),
            name_error: false,
            error_message: String::new(),
            phase: FormPhase::Idle,
        }
    }

    pub fn set_ip(&mut self, ip: impl Into<String>) {
        self.ip = ip.into();
        self.reopen();
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
        self.reopen();
    }

    /// Applies a name edit. Returns whether the value was taken.
    ///
    /// Characters outside `[a-zA-Z0-9]` raise the name error and keep the
    /// previous name. Over-long values are dropped without touching the flag,
    /// the same as an input's `maxlength`.
    pub fn on_name_input(&mut self, value: &str) -> bool {
        if !record::is_name_charset(value) {
            self.name_error = true;
            return false;
        }
        if value.len() > NAME_MAX_LEN {
            return false;
        }
        self.name = value.to_string();
        self.name_error = false;
        self.reopen();
        true
    }

    /// Builds the request for the current values and enters `Submitting`
    pub fn submit(&mut self) -> Result<DnsRecordRequest, SubmitError> {
        match self.phase {
            FormPhase::Submitting => return Err(SubmitError::InFlight),
            FormPhase::Succeeded { .. } => return Err(SubmitError::Finished),
            FormPhase::Idle | FormPhase::Failed => {}
        }

        let request = DnsRecordRequest::new(self.ip.clone(), self.name.clone(), self.comment.clone());
        if let Err(err) = request.validate() {
            return Err(self.refuse(err));
        }

        self.error_message.clear();
        self.phase = FormPhase::Submitting;
        Ok(request)
    }

    /// Refuses the current submission with a validation error shown inline
    pub fn refuse(&mut self, err: ValidationError) -> SubmitError {
        self.error_message = err.to_string();
        self.phase = FormPhase::Failed;
        err.into()
    }

    /// Applies the endpoint's reply to an in-flight submission
    pub fn complete(&mut self, reply: &ProxyReply) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        if reply.success {
            self.error_message.clear();
            self.phase = FormPhase::Succeeded {
                hostname: self.hostname(),
            };
        } else {
            self.error_message = reply.message.clone();
            self.phase = FormPhase::Failed;
        }
    }

    fn reopen(&mut self) {
        if self.phase == FormPhase::Failed {
            self.phase = FormPhase::Idle;
        }
    }

    pub fn hostname(&self) -> String {
        format!("{}.{}", self.name, self.domain)
    }

    /// Link shown on the success view
    pub fn site_url(&self) -> String {
        format!("https://{}", self.hostname())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn name_error(&self) -> bool {
        self.name_error
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn is_success(&self) -> bool {
        matches!(self.phase, FormPhase::Succeeded { .. })
    }
}
