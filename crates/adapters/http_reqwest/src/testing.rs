//! Fake dashboard backend for adapter tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use tokio::net::TcpListener;

use crate::client::HttpGateway;
use crate::config::HttpConfig;

/// Requests seen by a fake backend, as `"{path} {payload}"`.
pub(crate) type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `router` on an ephemeral port and point a gateway at it.
pub(crate) async fn serve(router: Router) -> HttpGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HttpGateway::new(&HttpConfig {
        base_url: format!("http://{address}"),
        ..HttpConfig::default()
    })
    .unwrap()
}

/// A gateway pointing at a port nobody listens on.
pub(crate) async fn unreachable() -> HttpGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    HttpGateway::new(&HttpConfig {
        base_url: format!("http://{address}"),
        ..HttpConfig::default()
    })
    .unwrap()
}

pub(crate) fn seen(log: &Seen) -> Vec<String> {
    log.lock().unwrap().clone()
}
