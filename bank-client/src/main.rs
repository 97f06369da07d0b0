//! Console demo for the bank app.
//!
//! Addresses the bank by its app id (`http://bank/...`) and lets the
//! invocation rewriter route every call through the local sidecar.
//!
//! Usage: `bank-client <example-index>`. Without a valid index the list of
//! examples is printed and the process exits with status 1.

use std::process::ExitCode;

use bank_core::{Account, AccountId, Amount, Transaction, ValidationProblem};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{header, Method, Request, Response, StatusCode};
use invoke_rewriter::{Body, HyperTransport, InvocationRewriter, Transport, TransportError};
use serde::{de::DeserializeOwned, Serialize};
use tracing_subscriber::EnvFilter;

type Client = InvocationRewriter<HyperTransport>;

/// Errors that end an example run early.
#[derive(Debug, thiserror::Error)]
enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { status: StatusCode, path: String },

    #[error(transparent)]
    Amount(#[from] bank_core::CoreError),
}

const EXAMPLES: &[&str] = &["Regular hyper client"];

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let index = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .filter(|&i| i < EXAMPLES.len());

    let Some(index) = index else {
        println!("Hello, please choose a sample to run:");
        for (i, name) in EXAMPLES.iter().enumerate() {
            println!("{i}: {name}");
        }
        println!();
        return ExitCode::from(1);
    };

    let app_id = std::env::var("BANK_APP_ID").unwrap_or_else(|_| "bank".to_owned());
    tracing::info!(example = EXAMPLES[index], %app_id, "running example");

    tokio::select! {
        result = run_http_client_example(&app_id) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "example failed");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("cancelled");
            ExitCode::FAILURE
        }
    }
}

async fn run_http_client_example(app_id: &str) -> Result<(), ClientError> {
    let client = InvocationRewriter::new(HyperTransport::new());
    client.allowed_hosts().insert(app_id);

    // Scenario 1: check whether the account already exists.
    let path = "/accounts/17";
    let response = client.send(&mut request(app_id, Method::GET, path, None)?).await?;
    let account: Option<Account> = match response.status() {
        StatusCode::NOT_FOUND => None,
        s if s.is_success() => Some(serde_json::from_slice(response.body())?),
        status => return Err(ClientError::UnexpectedStatus { status, path: path.to_owned() }),
    };
    println!(
        "Scenario 1: account '17' {}",
        if account.is_none() { "does not exist" } else { "already exists" }
    );

    // Scenario 2: deposit some money.
    let deposit = Transaction::new(AccountId::new("17"), Amount::new(100.0)?);
    let account: Account = expect_json(&client, app_id, "/deposit", &deposit).await?;
    println!("Scenario 2: account '17' has '{}' money", account.balance);

    // Scenario 3: a validation error comes back as a response, not an error.
    let withdraw = Transaction::new(AccountId::new("17"), Amount::new(1_000_000.0)?);
    let body = serde_json::to_vec(&withdraw)?;
    let response = client
        .send(&mut request(app_id, Method::POST, "/withdraw", Some(body))?)
        .await?;
    if response.status() != StatusCode::BAD_REQUEST {
        println!("Something went wrong :(");
        return Ok(());
    }
    let problem: ValidationProblem = serde_json::from_slice(response.body())?;
    println!("Scenario 3: got the following errors:");
    for (field, messages) in &problem.errors {
        println!("{field}: {}", messages.join(", "));
    }
    Ok(())
}

/// POST `payload` as JSON and decode a successful JSON response.
async fn expect_json<T, R>(client: &Client, app_id: &str, path: &str, payload: &T) -> Result<R, ClientError>
where
    T: Serialize,
    R: DeserializeOwned,
{
    let body = serde_json::to_vec(payload)?;
    let response: Response<Bytes> = client
        .send(&mut request(app_id, Method::POST, path, Some(body))?)
        .await?;
    if !response.status().is_success() {
        return Err(ClientError::UnexpectedStatus { status: response.status(), path: path.to_owned() });
    }
    Ok(serde_json::from_slice(response.body())?)
}

/// Build a request addressed to `app_id` as if it were a plain host name.
fn request(app_id: &str, method: Method, path: &str, json: Option<Vec<u8>>) -> Result<Request<Body>, ClientError> {
    let mut builder = Request::builder().method(method).uri(format!("http://{app_id}{path}"));
    if json.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let body = json.map(Bytes::from).unwrap_or_default();
    Ok(builder.body(Full::new(body))?)
}
