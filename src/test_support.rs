//! Fixtures shared by the network-facing tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::snapshot::{Point, SnapshotSource};

#[derive(Clone)]
pub enum Reply {
    Body(String),
    Status(StatusCode),
    Delayed(Duration, String),
}

struct Fixture {
    replies: HashMap<usize, Reply>,
    hits: AtomicUsize,
}

pub struct Upstream {
    pub base_url: String,
    fixture: Arc<Fixture>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.fixture.hits.load(Ordering::SeqCst)
    }
}

/// Serve `/treasure/{HH}.json` from `replies` on an ephemeral local port. Hours
/// without a reply answer 404.
pub async fn spawn_upstream(replies: HashMap<usize, Reply>) -> Upstream {
    let fixture = Arc::new(Fixture {
        replies,
        hits: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/treasure/{file}", get(serve_hour))
        .with_state(fixture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{}/treasure", addr),
        fixture,
    }
}

async fn serve_hour(State(fixture): State<Arc<Fixture>>, Path(file): Path<String>) -> Response {
    fixture.hits.fetch_add(1, Ordering::SeqCst);

    let hour = file
        .strip_suffix(".json")
        .and_then(|h| h.parse::<usize>().ok());
    let reply = hour.and_then(|h| fixture.replies.get(&h)).cloned();

    match reply {
        Some(Reply::Body(body)) => body.into_response(),
        Some(Reply::Status(status)) => status.into_response(),
        Some(Reply::Delayed(delay, body)) => {
            tokio::time::sleep(delay).await;
            body.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// In-memory source that counts how often each hour was requested.
pub struct StaticSource {
    hours: Vec<Option<Vec<Point>>>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(hours: Vec<Option<Vec<Point>>>) -> Self {
        StaticSource {
            hours,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for StaticSource {
    async fn fetch_hour(&self, hour: usize) -> Option<Vec<Point>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hours.get(hour).cloned().flatten()
    }
}

pub fn point(lat: f64, lon: f64, alt: f64) -> Point {
    Point::new(lat, lon, alt).unwrap()
}
