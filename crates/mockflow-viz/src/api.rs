//! HTTP client for the Mockflow API.
//!
//! Each trigger spawns a background thread that performs a blocking request
//! and pushes the outcome onto a channel; the app drains the channel once
//! per frame. Requests are fire-and-forget: no cancellation, no timeout
//! beyond the client default, no deduplication if re-triggered.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use mockflow_core::{FlowGraphNode, MockConfiguration};

/// Errors a request can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, DNS, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Acknowledgment payload from `POST /configuration`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAck {
    /// Whether the configuration was stored.
    pub saved: bool,
}

/// Result of a background fetch, delivered through the event channel.
#[derive(Debug)]
pub enum FetchEvent {
    /// Outcome of `GET /graph`.
    Graph(Result<Vec<FlowGraphNode>, ClientError>),
    /// Outcome of `GET /dependencies?flow=..`. Kept as a raw JSON value so
    /// the view can degrade malformed shapes instead of hard-failing.
    Dependencies(Result<Value, ClientError>),
    /// Outcome of `GET /configuration?flow=..`.
    Configuration(Result<MockConfiguration, ClientError>),
    /// Outcome of `POST /configuration`.
    Save(Result<SaveAck, ClientError>),
}

/// Client for the Mockflow API, polled by the app each frame.
pub struct ApiClient {
    base_url: String,
    flow: String,
    http: reqwest::blocking::Client,
    tx: Sender<FetchEvent>,
    rx: Receiver<FetchEvent>,
    in_flight: Arc<AtomicUsize>,
}

impl ApiClient {
    /// Create a client for the given server base URL and flow name.
    pub fn new(base_url: impl Into<String>, flow: impl Into<String>) -> Self {
        let (tx, rx) = channel();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            flow: flow.into(),
            http: reqwest::blocking::Client::new(),
            tx,
            rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The flow this client is scoped to.
    pub fn flow(&self) -> &str {
        &self.flow
    }

    /// Whether any request is still in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed) > 0
    }

    /// Drain all events delivered since the last poll.
    pub fn poll(&self) -> Vec<FetchEvent> {
        self.rx.try_iter().collect()
    }

    /// Fetch the dependency graph.
    pub fn trigger_graph(&self) {
        let url = format!("{}/graph", self.base_url);
        self.spawn(move |http| FetchEvent::Graph(get_json(http, &url)));
    }

    /// Fetch the dependency list for the flow.
    pub fn trigger_dependencies(&self) {
        let url = format!("{}/dependencies", self.base_url);
        let flow = self.flow.clone();
        self.spawn(move |http| FetchEvent::Dependencies(get_json_for_flow(http, &url, &flow)));
    }

    /// Fetch the stored configuration for the flow.
    pub fn trigger_configuration(&self) {
        let url = format!("{}/configuration", self.base_url);
        let flow = self.flow.clone();
        self.spawn(move |http| FetchEvent::Configuration(get_json_for_flow(http, &url, &flow)));
    }

    /// Persist a configuration snapshot.
    pub fn trigger_save(&self, snapshot: MockConfiguration) {
        let url = format!("{}/configuration", self.base_url);
        self.spawn(move |http| FetchEvent::Save(post_json(http, &url, &snapshot)));
    }

    fn spawn<F>(&self, request: F)
    where
        F: FnOnce(&reqwest::blocking::Client) -> FetchEvent + Send + 'static,
    {
        let http = self.http.clone();
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        in_flight.fetch_add(1, Ordering::Relaxed);
        thread::spawn(move || {
            let event = request(&http);
            // The receiver only disappears when the app shuts down. Send
            // before decrementing: once `is_loading()` reads false, the
            // event must already be in the channel.
            let _ = tx.send(event);
            in_flight.fetch_sub(1, Ordering::Relaxed);
        });
    }
}

fn get_json<T: serde::de::DeserializeOwned>(
    http: &reqwest::blocking::Client,
    url: &str,
) -> Result<T, ClientError> {
    let response = http.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(response.json()?)
}

/// Build a flow-scoped GET; the flow name goes through `query` so it is
/// percent-encoded instead of pasted into the URL.
fn flow_scoped_get(
    http: &reqwest::blocking::Client,
    url: &str,
    flow: &str,
) -> reqwest::blocking::RequestBuilder {
    http.get(url).query(&[("flow", flow)])
}

fn get_json_for_flow<T: serde::de::DeserializeOwned>(
    http: &reqwest::blocking::Client,
    url: &str,
    flow: &str,
) -> Result<T, ClientError> {
    let response = flow_scoped_get(http, url, flow).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(response.json()?)
}

fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    http: &reqwest::blocking::Client,
    url: &str,
    body: &B,
) -> Result<T, ClientError> {
    let response = http.post(url).json(body).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn flow_name_is_percent_encoded_in_query() {
        let http = reqwest::blocking::Client::new();

        let request = flow_scoped_get(&http, "http://localhost:4000/dependencies", "a b&c")
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("flow=a+b%26c"));
    }

    #[test]
    fn event_is_delivered_before_loading_flag_clears() {
        // Nothing listens on port 1, so the request fails fast; the point
        // is the ordering guarantee, not the outcome.
        let client = ApiClient::new("http://127.0.0.1:1", "checkout");
        client.trigger_graph();

        let deadline = Instant::now() + Duration::from_secs(10);
        while client.is_loading() {
            assert!(Instant::now() < deadline, "request never settled");
            std::thread::sleep(Duration::from_millis(10));
        }

        // Once is_loading() reads false the event must already be queued.
        let events = client.poll();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], FetchEvent::Graph(Err(_))));
    }
}
