use worker::*;

use crate::form::{FormController, SubmitError};
use crate::record::{self, DnsRecordRequest, ValidationError};

// Constants
const PATH_ROOT: &str = "/";
const PATH_API_DNS: &str = "/api/dns";
const FIELD_IP: &str = "ip";
const FIELD_NAME: &str = "name";
const FIELD_COMMENT: &str = "comment";

/// Where an incoming request should be handled
#[derive(Debug, PartialEq)]
pub enum Route {
    /// GET / renders the empty form
    Page,
    /// POST / submits the HTML form
    SubmitForm,
    /// POST /api/dns proxies a JSON record request
    CreateRecord,
    MethodNotAllowed,
    NotFound,
}

impl Route {
    pub fn from_request(req: &Request) -> Self {
        Self::resolve(req.method(), &req.path())
    }

    /// Resolves a route from method and path
    pub fn resolve(method: Method, path: &str) -> Self {
        match (method, path) {
            (Method::Get | Method::Head, PATH_ROOT) => Route::Page,
            (Method::Post, PATH_ROOT) => Route::SubmitForm,
            (Method::Post, PATH_API_DNS) => Route::CreateRecord,
            (_, PATH_ROOT | PATH_API_DNS) => Route::MethodNotAllowed,
            _ => Route::NotFound,
        }
    }
}

/// Field values posted by the HTML form
#[derive(Debug, Default, PartialEq)]
pub struct FormSubmission {
    pub ip: String,
    pub name: String,
    pub comment: String,
}

impl FormSubmission {
    /// Reads the posted form fields; absent fields are empty
    pub async fn from_request(req: &mut Request) -> Result<Self> {
        let data = req.form_data().await?;
        let field = |key: &str| match data.get(key) {
            Some(FormEntry::Field(value)) => value,
            _ => String::new(),
        };

        Ok(Self {
            ip: field(FIELD_IP),
            name: field(FIELD_NAME),
            comment: field(FIELD_COMMENT),
        })
    }

    /// Replays the submission through the controller the way a user would type it
    pub fn apply_to(&self, form: &mut FormController) -> std::result::Result<(), ValidationError> {
        form.set_ip(self.ip.trim());
        form.set_comment(self.comment.as_str());
        if form.on_name_input(&self.name) {
            Ok(())
        } else {
            // A refused edit leaves the old name in place; report the posted value instead
            record::validate_name(&self.name)
        }
    }

    /// Applies the posted fields and submits, reporting the posted name's own error
    pub fn submit_to(&self, form: &mut FormController) -> std::result::Result<DnsRecordRequest, SubmitError> {
        match self.apply_to(form) {
            Ok(()) => form.submit(),
            Err(err) => Err(form.refuse(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_resolution() {
        let test_cases = vec![
            (Method::Get, "/", Route::Page, "form page"),
            (Method::Head, "/", Route::Page, "head of form page"),
            (Method::Post, "/", Route::SubmitForm, "form submission"),
            (Method::Post, "/api/dns", Route::CreateRecord, "json proxy"),
            (Method::Get, "/api/dns", Route::MethodNotAllowed, "proxy only takes POST"),
            (Method::Delete, "/", Route::MethodNotAllowed, "page rejects DELETE"),
            (Method::Get, "/favicon.ico", Route::NotFound, "unknown path"),
            (Method::Post, "/api/dns/extra", Route::NotFound, "nested proxy path"),
        ];

        for (method, path, expected, description) in test_cases {
            assert_eq!(Route::resolve(method, path), expected, "Failed: {}", description);
        }
    }

    #[test]
    fn submission_applies_valid_fields() {
        let submission = FormSubmission {
            ip: " 118.231.234.214 ".into(),
            name: "myhost".into(),
            comment: "home server".into(),
        };
        let mut form = FormController::new("example.com");

        assert_eq!(submission.apply_to(&mut form), Ok(()));
        assert_eq!(form.ip(), "118.231.234.214");
        assert_eq!(form.name(), "myhost");
        assert_eq!(form.comment(), "home server");
        assert!(!form.name_error());
    }

    #[test]
    fn submission_error_messages() {
        let test_cases = vec![
            ("10.0.0.1", "my host", Some("Only English and numbers allowed !"), true, "space in name"),
            (" 10.0.0.1", " myhost ", Some("Only English and numbers allowed !"), true, "padded name is not trimmed"),
            ("10.0.0.1", "my-host", Some("Only English and numbers allowed !"), true, "hyphen in name"),
            ("10.0.0.1", "abcdefghijklmnopq", Some("Name must be at most 16 characters."), false, "seventeen characters"),
            ("10.0.0.1", "", Some("Name is required."), false, "empty name"),
            ("10.0.0", "myhost", Some("'10.0.0' is not a valid IPv4 address."), false, "short address"),
            ("10.0.0.1", "myhost", None, false, "valid submission"),
        ];

        for (ip, name, expected_error, flag, description) in test_cases {
            let submission = FormSubmission {
                ip: ip.into(),
                name: name.into(),
                comment: String::new(),
            };
            let mut form = FormController::new("example.com");
            let result = submission.submit_to(&mut form);

            match expected_error {
                Some(message) => {
                    assert!(result.is_err(), "Failed result: {}", description);
                    assert_eq!(form.error_message(), message, "Failed message: {}", description);
                    assert!(!form.is_loading(), "Failed phase: {}", description);
                }
                None => {
                    assert_eq!(
                        result,
                        Ok(DnsRecordRequest::new("10.0.0.1", "myhost", "")),
                        "Failed result: {}",
                        description
                    );
                    assert!(form.is_loading(), "Failed phase: {}", description);
                }
            }
            assert_eq!(form.name_error(), flag, "Failed flag: {}", description);
        }
    }
}
