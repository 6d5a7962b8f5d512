//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.

use std::io::Cursor;
#[allow(unused_imports)]
use std::io::Read as _;

use serde::{de::DeserializeOwned, Serialize};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::api::{self, ApiError, ApiResponse, RateRequest, ScrapeRequest, WorkflowRequest};
use crate::config::Config;
use crate::storage::{FileJobStore, FileTaskStore};
use crate::workflow::Pipeline;

const DEFAULT_LIST_LIMIT: usize = 200;

/// Long-lived server state, built once at startup
struct ServerState {
    pipeline: Pipeline,
    job_store: FileJobStore,
    task_store: FileTaskStore,
}

/// Run the API server until the process is stopped
pub fn serve(config: &Config) -> anyhow::Result<()> {
    let state = ServerState {
        pipeline: Pipeline::from_config(config),
        job_store: FileJobStore::new(&config.data_dir),
        task_store: FileTaskStore::new(&config.data_dir),
    };

    let server = tiny_http::Server::http(("0.0.0.0", config.server_port))
        .map_err(|err| anyhow::anyhow!("failed to bind port {}: {err}", config.server_port))?;
    log::info!("trackr API listening on port {}", config.server_port);

    for mut request in server.incoming_requests() {
        let response = route(&state, &mut request);
        if let Err(err) = request.respond(response) {
            log::warn!("failed to send response: {err}");
        }
    }
    Ok(())
}

/// Map one request to a handler
fn route(state: &ServerState, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let url = request.url().to_string();
    let method = request.method().clone();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    match (&method, path) {
        (&Method::Get, "/api/health") => {
            handle_result(api::health(&state.job_store, &state.task_store))
        },
        (&Method::Get, "/api/jobs") => {
            handle_result(api::list_jobs(&state.job_store, limit_param(query)))
        },
        (&Method::Get, "/api/tasks") => {
            handle_result(api::list_tasks(&state.task_store, limit_param(query)))
        },

        (&Method::Post, "/api/scrape") => match read_json_body::<ScrapeRequest>(request) {
            Ok(req) => handle_result(api::scrape(&state.pipeline, &req)),
            Err(e) => error_response(&e),
        },
        (&Method::Post, "/api/rate") => match read_json_body::<RateRequest>(request) {
            Ok(req) => handle_result(api::rate(&state.pipeline, &req)),
            Err(e) => error_response(&e),
        },
        (&Method::Post, "/api/workflow") => match read_json_body::<WorkflowRequest>(request) {
            Ok(req) => handle_result(api::run_workflow(&state.pipeline, &req)),
            Err(e) => error_response(&e),
        },

        _ => error_response(&ApiError::not_found(format!("No route for {method} {path}"))),
    }
}

/// Pull `limit=N` out of a query string
fn limit_param(query: &str) -> usize {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("limit="))
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_LIST_LIMIT)
}

/// Deserialize a JSON request body
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|err| ApiError::bad_request(format!("Failed to read body: {err}")))?;

    serde_json::from_str(&body)
        .map_err(|err| ApiError::bad_request(format!("Invalid JSON body: {err}")))
}

/// Convert a handler result into an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Response<Cursor<Vec<u8>>> {
    match result {
        Ok(data) => json_response(200, &ApiResponse::success(data)),
        Err(err) => error_response(&err),
    }
}

fn error_response(err: &ApiError) -> Response<Cursor<Vec<u8>>> {
    json_response(err.status_code(), &ApiResponse::<()>::failure(err))
}

/// Serialize a payload to a JSON response with status code
fn json_response<T: Serialize>(status: u16, payload: &T) -> Response<Cursor<Vec<u8>>> {
    let json =
        serde_json::to_string(payload).unwrap_or_else(|_| r#"{"ok":false}"#.to_string());
    Response::from_data(json.into_bytes())
        .with_header(Header::from_bytes("Content-Type", "application/json").expect("valid header"))
        .with_status_code(StatusCode(status))
}
