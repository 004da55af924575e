use worker::*;

// Module declarations
mod cloudflare;
mod config;
mod error;
mod form;
mod ip;
mod page;
mod proxy;
mod record;
mod request;

// Re-export public APIs
pub use cloudflare::{CloudflareClient, ProviderReply, RecordCreator};
pub use config::Config;
pub use error::{ConfigError, ProviderError, RequestError};
pub use form::{FormController, FormPhase, SubmitError};
pub use ip::IpUtils;
pub use page::PageUtils;
pub use proxy::{ProxyEndpoint, ProxyOutcome, ProxyReply};
pub use record::{DnsRecordRequest, RecordType, ValidationError};
pub use request::{FormSubmission, Route};

// HTTP status codes
const HTTP_NOT_FOUND: u16 = 404;
const HTTP_METHOD_NOT_ALLOWED: u16 = 405;

/// Main request handler
pub async fn handler(req: Request, env: Env) -> Result<Response> {
    match Route::from_request(&req) {
        Route::Page => render_page(&env),
        Route::SubmitForm => submit_form(req, &env).await,
        Route::CreateRecord => create_record(req, &env).await,
        Route::MethodNotAllowed => Response::error("Method Not Allowed", HTTP_METHOD_NOT_ALLOWED),
        Route::NotFound => Response::error("Not Found", HTTP_NOT_FOUND),
    }
}

/// Reads configuration, logging what is missing
fn load_config(env: &Env) -> Option<Config> {
    Config::from_env(env)
        .inspect_err(|e| console_error!("{}", e))
        .ok()
}

fn render_page(env: &Env) -> Result<Response> {
    let Some(config) = load_config(env) else {
        return config_error_page();
    };
    PageUtils::html_response(&FormController::new(config.domain_name), proxy::HTTP_OK)
}

/// Runs a posted HTML form through the controller and renders the result
async fn submit_form(mut req: Request, env: &Env) -> Result<Response> {
    let Some(config) = load_config(env) else {
        return config_error_page();
    };
    let submission = FormSubmission::from_request(&mut req).await?;
    let mut form = FormController::new(config.domain_name.clone());

    let record = match submission.submit_to(&mut form) {
        Ok(record) => record,
        Err(e) => {
            console_log!("Form submission refused: {}", e);
            return PageUtils::html_response(&form, proxy::HTTP_BAD_REQUEST);
        }
    };

    let client = CloudflareClient::from_config(&config);
    let outcome = ProxyEndpoint::new(&client).create(&record).await;
    log_outcome(&record.name, &outcome);
    form.complete(&outcome.reply);
    PageUtils::html_response(&form, outcome.status)
}

/// JSON proxy: forwards the body to Cloudflare with server-side credentials
async fn create_record(mut req: Request, env: &Env) -> Result<Response> {
    let Some(config) = load_config(env) else {
        return PageUtils::json_response(&proxy::config_failure());
    };
    let body = req.bytes().await?;

    let client = CloudflareClient::from_config(&config);
    let outcome = ProxyEndpoint::new(&client).handle_body(&body).await;
    log_outcome("/api/dns", &outcome);
    PageUtils::json_response(&outcome)
}

/// HTML routes report missing configuration as a page, not JSON
fn config_error_page() -> Result<Response> {
    let outcome = proxy::config_failure();
    PageUtils::error_response(&outcome.reply.message, outcome.status)
}

fn log_outcome(target: &str, outcome: &ProxyOutcome) {
    if outcome.is_success() {
        console_log!("Created A record for {}", target);
    } else {
        console_warn!(
            "Create A record for {} failed with {}: {}",
            target,
            outcome.status,
            outcome.reply.message
        );
    }
}

/// Cloudflare Workers entry point
#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    handler(req, env).await
}
