use worker::*;

use crate::form::FormController;
use crate::proxy::{ProxyOutcome, SUCCESS_MESSAGE};

const NAME_ERROR_TEXT: &str = "Only English and numbers allowed !";
const NAME_PLACEHOLDER: &str = "[name]";
const IP_PLACEHOLDER: &str = "[IPv4 address]";

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:40em;margin:3em auto;text-align:center}\
.input-container{margin:1em 0}\
input{font-size:1em;padding:.5em;width:90%}\
button{font-size:1em;padding:.5em 2em}\
.alert{color:#F48120;padding:.5em;text-align:left}\
.alert.thick{font-size:20px}\
.hidden{visibility:hidden}\
.suffix{color:#666}\
a{color:#F48120;text-decoration:none}";

// Disables the button on submit so one request is in flight at a time
const SUBMIT_SCRIPT: &str = "this.querySelector('button').disabled=true;this.querySelector('button').textContent='Loading...'";

/// Page rendering utilities
pub struct PageUtils;

impl PageUtils {
    /// Renders the page for the controller's current state
    pub fn render(form: &FormController) -> String {
        let body = if form.is_success() {
            Self::success_view(form)
        } else {
            Self::form_view(form)
        };
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{title}</title><style>{STYLE}</style></head>\
             <body><main>{body}</main></body></html>",
            title = Self::escape_html(&format!("DNS records of {}", form.domain())),
        )
    }

    fn success_view(form: &FormController) -> String {
        let url = Self::escape_html(&form.site_url());
        format!(
            "<div class=\"success\"><div class=\"text-1\">{SUCCESS_MESSAGE}</div>\
             <div class=\"text-2\">Visit page ? <a href=\"{url}\">{url}</a></div></div>"
        )
    }

    fn form_view(form: &FormController) -> String {
        let domain = Self::escape_html(form.domain());
        let preview_name = if form.name().is_empty() {
            NAME_PLACEHOLDER.to_string()
        } else {
            Self::escape_html(&form.hostname())
        };
        let preview_ip = if form.ip().is_empty() {
            IP_PLACEHOLDER.to_string()
        } else {
            Self::escape_html(form.ip())
        };
        let name_alert_class = if form.name_error() { "alert" } else { "alert hidden" };
        let error_class = if form.error_message().is_empty() {
            "alert thick hidden"
        } else {
            "alert thick"
        };
        let button = if form.is_loading() {
            "<button type=\"submit\" disabled>Loading...</button>"
        } else {
            "<button type=\"submit\">Submit &rsaquo;</button>"
        };

        format!(
            "<h1>Manage DNS records of {domain}</h1>\
             <div class=\"info\"><span>{preview_name}</span> points to <span>{preview_ip}</span>\
             <br>and has its traffic proxied through Cloudflare.</div>\
             <form method=\"post\" action=\"/\" onsubmit=\"{SUBMIT_SCRIPT}\">\
             <div class=\"input-container\"><input name=\"ip\" required minlength=\"7\" maxlength=\"15\" \
             placeholder=\"IPv4 Address (ex) 118.231.234.214\" value=\"{ip}\"></div>\
             <div class=\"input-container\"><input name=\"name\" required minlength=\"1\" maxlength=\"16\" \
             pattern=\"[a-zA-Z0-9]*\" placeholder=\"Name\" value=\"{name}\"><span class=\"suffix\">.{domain}</span>\
             <div class=\"{name_alert_class}\">{NAME_ERROR_TEXT}</div></div>\
             <div class=\"input-container\"><input name=\"comment\" placeholder=\"Comment (Not required)\" value=\"{comment}\"></div>\
             <div class=\"input-container\">{button}<div class=\"{error_class}\">{error}</div></div>\
             </form>",
            ip = Self::escape_html(form.ip()),
            name = Self::escape_html(form.name()),
            comment = Self::escape_html(form.comment()),
            error = Self::escape_html(form.error_message()),
        )
    }

    /// Escapes HTML special characters to prevent injection
    pub fn escape_html(input: &str) -> String {
        input
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Minimal page for failures that happen before the form can be built
    pub fn render_error(message: &str) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <title>DNS records</title><style>{STYLE}</style></head>\
             <body><main><div class=\"alert thick\">{message}</div></main></body></html>",
            message = Self::escape_html(message),
        )
    }

    pub fn error_response(message: &str, status: u16) -> Result<Response> {
        Ok(Response::from_html(Self::render_error(message))?.with_status(status))
    }

    /// Wraps rendered HTML in a response
    pub fn html_response(form: &FormController, status: u16) -> Result<Response> {
        Ok(Response::from_html(Self::render(form))?.with_status(status))
    }

    /// Serializes a proxy outcome as the JSON endpoint's response
    pub fn json_response(outcome: &ProxyOutcome) -> Result<Response> {
        Ok(Response::from_json(&outcome.reply)?.with_status(outcome.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyReply;

    #[test]
    fn html_escaping() {
        let test_cases = vec![
            ("myhost.example.com", "myhost.example.com", "plain hostname unchanged"),
            ("a&b.example", "a&amp;b.example", "ampersand in domain"),
            (
                "my \"home\" server",
                "my &quot;home&quot; server",
                "quoted comment kept inside value attribute",
            ),
            ("Bob's laptop", "Bob&#39;s laptop", "apostrophe in comment"),
            (
                "Content for A record is invalid. Must be <IPv4>",
                "Content for A record is invalid. Must be &lt;IPv4&gt;",
                "provider message with angle brackets",
            ),
            (
                "\"><img src=x onerror=alert(1)>",
                "&quot;&gt;&lt;img src=x onerror=alert(1)&gt;",
                "attribute breakout escaped",
            ),
        ];

        for (input, expected, description) in test_cases {
            assert_eq!(PageUtils::escape_html(input), expected, "Failed: {}", description);
        }
    }

    #[test]
    fn idle_page_shows_placeholders() {
        let form = FormController::new("example.com");
        let html = PageUtils::render(&form);

        assert!(html.contains("Manage DNS records of example.com"));
        assert!(html.contains("<span>[name]</span> points to <span>[IPv4 address]</span>"));
        assert!(html.contains("<span class=\"suffix\">.example.com</span>"));
        assert!(html.contains("<div class=\"alert hidden\">Only English and numbers allowed !</div>"));
        assert!(html.contains("Submit &rsaquo;"));
    }

    #[test]
    fn preview_follows_inputs() {
        let mut form = FormController::new("example.com");
        form.set_ip("118.231.234.214");
        form.on_name_input("myhost");
        let html = PageUtils::render(&form);

        assert!(html.contains("<span>myhost.example.com</span> points to <span>118.231.234.214</span>"));
        assert!(html.contains("value=\"myhost\""));
    }

    #[test]
    fn name_error_is_visible() {
        let mut form = FormController::new("example.com");
        form.on_name_input("bad name");
        let html = PageUtils::render(&form);

        assert!(html.contains("<div class=\"alert\">Only English and numbers allowed !</div>"));
    }

    #[test]
    fn provider_error_rendered_escaped() {
        let mut form = FormController::new("example.com");
        form.set_ip("10.0.0.1");
        form.on_name_input("box");
        form.submit().unwrap();
        form.complete(&ProxyReply::failure("Record <box> exists"));
        let html = PageUtils::render(&form);

        assert!(html.contains("<div class=\"alert thick\">Record &lt;box&gt; exists</div>"));
        assert!(html.contains("<form"));
    }

    #[test]
    fn loading_button_is_disabled() {
        let mut form = FormController::new("example.com");
        form.set_ip("10.0.0.1");
        form.on_name_input("box");
        form.submit().unwrap();
        let html = PageUtils::render(&form);

        assert!(html.contains("<button type=\"submit\" disabled>Loading...</button>"));
    }

    #[test]
    fn error_page_is_html() {
        let html = PageUtils::render_error("Server configuration is incomplete.");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div class=\"alert thick\">Server configuration is incomplete.</div>"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn success_page_links_hostname() {
        let mut form = FormController::new("example.com");
        form.set_ip("118.231.234.214");
        form.on_name_input("myhost");
        form.submit().unwrap();
        form.complete(&ProxyReply::ok());
        let html = PageUtils::render(&form);

        assert!(html.contains("DNS Record generated successfully."));
        assert!(html.contains(
            "<a href=\"https://myhost.example.com\">https://myhost.example.com</a>"
        ));
        assert!(!html.contains("<form"));
    }
}
