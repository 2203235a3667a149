//! Normalization of remote call outcomes.
//!
//! Every outbound explorer call goes through [`exec`] so downstream code sees
//! one error shape:
//! - embedded error object → [`AdapterError::RemoteApi`]
//! - bare message → [`AdapterError::Transport`]
//! - typed error → unchanged

use std::future::Future;

use crate::blockchain::explorer::{RawResponse, RemoteFailure, RemoteResponse};
use crate::blockchain::types::{AdapterError, AdapterResult};
use crate::observability::metrics;

/// Await a raw remote call and normalize its outcome.
pub async fn exec<T, F>(method: &'static str, call: F) -> AdapterResult<T>
where
    F: Future<Output = RawResponse<T>>,
{
    let outcome = normalize_outcome(call.await);
    match &outcome {
        Ok(_) => {
            tracing::debug!(method, "Remote call succeeded");
            metrics::record_remote_call(method, "ok");
        }
        Err(e) => {
            tracing::debug!(method, error = %e, "Remote call failed");
            metrics::record_remote_call(method, error_label(e));
        }
    }
    outcome
}

fn normalize_outcome<T>(raw: RawResponse<T>) -> AdapterResult<T> {
    match raw {
        Ok(response) => normalize_result(response),
        Err(failure) => Err(normalize_error(failure)),
    }
}

fn normalize_result<T>(response: RemoteResponse<T>) -> AdapterResult<T> {
    if let Some(error) = response.error {
        return Err(AdapterError::RemoteApi {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| AdapterError::Decode("Response carried neither result nor error".to_string()))
}

fn normalize_error(failure: RemoteFailure) -> AdapterError {
    match failure {
        RemoteFailure::Message(message) => AdapterError::Transport(message),
        RemoteFailure::Error(err) => err,
    }
}

fn error_label(err: &AdapterError) -> &'static str {
    match err {
        AdapterError::RemoteApi { .. } => "remote_api",
        AdapterError::Transport(_) => "transport",
        AdapterError::Timeout(_) => "timeout",
        AdapterError::Decode(_) => "decode",
        _ => "other",
    }
}
