//! Shared test fixtures for the free games integration tests.
//!
//! Provides sample raw products in the promotions feed shape, a helper that
//! wraps them in a full response body, and `StubFetcher`, a [`Fetcher`] that
//! replays canned responses instead of touching the network. `capture_logs`
//! records the tracing events emitted while a closure runs.

#![allow(dead_code)]

use epic_free_games::{FetchResponse, Fetcher, FreeGamesError, Result};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// A product with every field present and well-formed.
pub fn product(title: &str, price: i64, slug: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "price": { "totalPrice": { "discountPrice": price } },
        "offerMappings": [ { "pageSlug": slug }, { "pageSlug": "other-slug" } ],
        "keyImages": [
            { "type": "OfferImageWide", "url": "https://cdn.example/wide.jpg" },
            { "type": "Thumbnail", "url": format!("https://cdn.example/{slug}.jpg") }
        ]
    })
}

pub fn free_product(title: &str, slug: &str) -> Value {
    product(title, 0, slug)
}

pub fn paid_product(title: &str, slug: &str) -> Value {
    product(title, 1999, slug)
}

/// Wrap products in `data.Catalog.searchStore.elements`.
pub fn response_with(elements: Value) -> Value {
    json!({ "data": { "Catalog": { "searchStore": { "elements": elements } } } })
}

pub fn response_body(products: Vec<Value>) -> String {
    response_with(Value::Array(products)).to_string()
}

/// Either a canned response or a transport failure.
pub enum Reply {
    Response(FetchResponse),
    TransportFailure,
}

/// [`Fetcher`] replaying queued replies in order and recording requested URLs.
#[derive(Clone, Default)]
pub struct StubFetcher {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(FetchResponse::new(status, body)));
        self
    }

    pub fn fail(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::TransportFailure);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

impl Fetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::TransportFailure) | None => Err(FreeGamesError::InvalidArgument(
                "connection refused".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// One recorded tracing event: its level, message and rendered fields.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogLine {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

#[derive(Clone, Default)]
struct Recorder {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        self.lines.lock().unwrap().push(LogLine {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Run `f` with a recording subscriber installed on this thread.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<LogLine>) {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let lines = recorder.lines.lock().unwrap().clone();
    (out, lines)
}
