//! Async wrapper around [`EpicFreeGames`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every pipeline pass on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP request is in flight.
//!
//! # Example
//!
//! ```no_run
//! use epic_free_games::AsyncEpicFreeGames;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncEpicFreeGames::builder().build();
//!
//!     if client.make_request().await.unwrap() {
//!         for game in client.free_games().await.unwrap() {
//!             println!("{game}");
//!         }
//!     }
//!     client.close().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::Level;

use crate::error::{FreeGamesError, Result};
use crate::fetch::Fetcher;
use crate::models::Game;
use crate::{EpicFreeGames, EpicFreeGamesBuilder};

// ---------------------------------------------------------------------------
// AsyncEpicFreeGamesBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncEpicFreeGames`] instance.
#[derive(Default)]
pub struct AsyncEpicFreeGamesBuilder {
    inner: EpicFreeGamesBuilder,
}

impl AsyncEpicFreeGamesBuilder {
    /// Set the HTTP request timeout of the default fetcher.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Set the severity used to log products that fail to decode.
    pub fn decode_failure_level(mut self, level: Level) -> Self {
        self.inner = self.inner.decode_failure_level(level);
        self
    }

    /// Replace the HTTP transport.
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.inner = self.inner.fetcher(fetcher);
        self
    }

    /// Build the async client. No request is made until the first run.
    pub fn build(self) -> AsyncEpicFreeGames {
        AsyncEpicFreeGames {
            inner: Arc::new(Mutex::new(self.inner.build())),
        }
    }
}

// ---------------------------------------------------------------------------
// AsyncEpicFreeGames
// ---------------------------------------------------------------------------

/// Async wrapper around [`EpicFreeGames`].
///
/// The client sits behind a [`Mutex`], so concurrent callers are serialized
/// and two pipeline runs never write the retained list at the same time.
pub struct AsyncEpicFreeGames {
    inner: Arc<Mutex<EpicFreeGames>>,
}

impl AsyncEpicFreeGames {
    /// Create a new builder for configuring the async client.
    pub fn builder() -> AsyncEpicFreeGamesBuilder {
        AsyncEpicFreeGamesBuilder::default()
    }

    /// Run a sync client operation on the blocking thread pool.
    ///
    /// The closure receives exclusive access to the wrapped client.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut EpicFreeGames) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = client
                .lock()
                .map_err(|_| FreeGamesError::InvalidArgument("Client lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| FreeGamesError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Run the pipeline and replace the retained free games on success.
    ///
    /// See [`EpicFreeGames::make_request()`].
    pub async fn make_request(&self) -> Result<bool> {
        self.run(|c| Ok(c.make_request())).await
    }

    /// Run the pipeline once and return the free games, or the first error.
    pub async fn fetch_free_games(&self) -> Result<Vec<Game>> {
        self.run(|c| c.fetch_free_games()).await
    }

    /// Snapshot of the free games found by the last successful run.
    pub async fn free_games(&self) -> Result<Vec<Game>> {
        self.run(|c| Ok(c.free_games().to_vec())).await
    }

    /// Release the client on the blocking pool.
    ///
    /// The default fetcher holds a blocking HTTP client, which should not be
    /// torn down on an async worker thread.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| FreeGamesError::InvalidArgument(format!("Task join error: {e}")))
    }
}
