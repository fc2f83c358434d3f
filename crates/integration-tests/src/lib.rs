//! End-to-end tests for Recipe Box.
//!
//! Each test spawns the real router on an ephemeral port, backed by the
//! in-memory store, and talks to it over HTTP through [`ApiClient`].
//!
//! ```bash
//! cargo test -p recipe-box-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use recipe_box_client::ApiClient;
use recipe_box_server::{AppState, Store, app};

/// A server running in the background for the duration of a test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub api: ApiClient,
}

impl TestServer {
    /// Spawn a server with an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let router = app(AppState::new(Store::memory()));

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                report_stopped(&e);
            }
        });

        let api = ApiClient::new(&format!("http://{addr}"))?;
        Ok(Self { addr, api })
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

#[allow(clippy::print_stderr)]
fn report_stopped(e: &std::io::Error) {
    eprintln!("test server stopped: {e}");
}
