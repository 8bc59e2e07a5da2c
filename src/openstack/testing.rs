//! In-memory control plane used by the query tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use reqwest::Method;

use crate::error::OstackError;
use crate::openstack::{ControlPlane, RawResponse};

/// Serves canned bodies keyed by absolute url and records what was asked for
#[derive(Debug, Default)]
pub(crate) struct FakeControlPlane {
    responses: HashMap<String, String>,
    fail_auth: bool,
    auth_calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl FakeControlPlane {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_response(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn failing_auth(mut self) -> Self {
        self.fail_auth = true;
        self
    }

    pub(crate) fn auth_calls(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ControlPlane for FakeControlPlane {
    async fn validate_auth(&self) -> Result<(), OstackError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth {
            return Err(OstackError::Auth("token rejected".to_string()));
        }
        Ok(())
    }

    async fn send(
        &self,
        _method: Method,
        url: &str,
        _body: Option<String>,
    ) -> Result<RawResponse, OstackError> {
        self.requests.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(body) => Ok(RawResponse {
                body: body.clone().into_bytes(),
                status: 200,
            }),
            None => Err(OstackError::Status {
                url: url.to_string(),
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }
}
