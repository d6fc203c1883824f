//! Free games discovery for the Epic Games Store.
//!
//! Fetches the public promotions feed, decodes each listed product into a
//! [`Game`], and keeps the ones currently offered at zero cost.
//!
//! # Quick start
//!
//! ```no_run
//! use epic_free_games::EpicFreeGames;
//!
//! let mut client = EpicFreeGames::builder().build();
//!
//! if client.make_request() {
//!     for game in client.free_games() {
//!         println!("{game}");
//!     }
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod models;

#[cfg(feature = "async")]
pub use async_client::AsyncEpicFreeGames;
pub use error::{DecodeError, FreeGamesError, Result};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use models::Game;

use std::fmt;
use std::time::Duration;

use tracing::{error, info, warn, Level};

// ---------------------------------------------------------------------------
// EpicFreeGamesBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`EpicFreeGames`] instance.
///
/// Use [`EpicFreeGames::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](EpicFreeGamesBuilder::build).
pub struct EpicFreeGamesBuilder {
    timeout: Duration,
    decode_failure_level: Level,
    fetcher: Option<Box<dyn Fetcher>>,
}

impl Default for EpicFreeGamesBuilder {
    fn default() -> Self {
        Self {
            timeout: config::DEFAULT_TIMEOUT,
            decode_failure_level: config::DEFAULT_DECODE_FAILURE_LEVEL,
            fetcher: None,
        }
    }
}

impl EpicFreeGamesBuilder {
    /// Set the HTTP request timeout of the default fetcher.
    ///
    /// Defaults to 30 seconds. Ignored when a custom fetcher is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the severity used to log products that fail to decode.
    ///
    /// Defaults to [`Level::ERROR`].
    pub fn decode_failure_level(mut self, level: Level) -> Self {
        self.decode_failure_level = level;
        self
    }

    /// Replace the HTTP transport.
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Build the client. No request is made until the first run.
    pub fn build(self) -> EpicFreeGames {
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Box::new(HttpFetcher::new(self.timeout)));
        EpicFreeGames {
            fetcher,
            decode_failure_level: self.decode_failure_level,
            free_games: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// EpicFreeGames
// ---------------------------------------------------------------------------

/// Runs the fetch, decode and filter pipeline and keeps the latest result.
///
/// Runs take `&mut self`, so two runs on the same instance cannot overlap.
/// Created via [`EpicFreeGames::builder()`].
pub struct EpicFreeGames {
    fetcher: Box<dyn Fetcher>,
    decode_failure_level: Level,
    free_games: Vec<Game>,
}

impl EpicFreeGames {
    /// Create a new builder for configuring the client.
    pub fn builder() -> EpicFreeGamesBuilder {
        EpicFreeGamesBuilder::default()
    }

    /// Free games found by the last successful run.
    ///
    /// Empty until a run succeeds.
    pub fn free_games(&self) -> &[Game] {
        &self.free_games
    }

    /// Run the pipeline once and return the free games, or the first error.
    ///
    /// Retained state is left alone; see [`make_request()`](Self::make_request)
    /// for the variant that updates it.
    pub fn fetch_free_games(&self) -> Result<Vec<Game>> {
        let response = self.fetcher.fetch(config::FREE_GAMES_URL)?;
        if !response.is_ok() {
            return Err(FreeGamesError::Status(response.status));
        }
        let json = decode::parse_response(&response.body)?;
        let products = decode::get_products_from_response(&json)?;
        Ok(decode::filter_free_games(products, self.decode_failure_level))
    }

    /// Run the pipeline and replace the retained free games on success.
    ///
    /// Failures are logged, never returned, and leave the previous result in
    /// place. Returns whether the retained list was replaced.
    pub fn make_request(&mut self) -> bool {
        match self.fetch_free_games() {
            Ok(games) => {
                info!(count = games.len(), "Free games refreshed");
                self.free_games = games;
                true
            }
            Err(FreeGamesError::Status(status)) => {
                warn!("Request failed with code: {}", status);
                false
            }
            Err(FreeGamesError::Json(e)) => {
                warn!("Convert to json failed with: {}", e);
                false
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for EpicFreeGames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles: Vec<&str> = self.free_games.iter().map(|g| g.title.as_str()).collect();
        write!(
            f,
            "EpicFreeGames(url={}, free_games=[{}])",
            config::FREE_GAMES_URL,
            titles.join(", ")
        )
    }
}
