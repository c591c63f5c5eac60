//! Resolves a day's raw input from its cache file or the remote endpoint

use crate::cache::InputCache;
use crate::config::SESSION_ENV_VARS;
use crate::error::InputError;
use aoc_http_client::{AocClient, AocError};
use std::fmt;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Body the server answers with when a puzzle is requested before it unlocks
pub const NOT_UNLOCKED_MESSAGE: &str = "Please don't repeatedly request this endpoint before it \
    unlocks! The calendar countdown is synchronized with the server time; the link will be \
    enabled on the calendar the instant this puzzle becomes available.";

fn is_not_unlocked(body: &str) -> bool {
    body.trim() == NOT_UNLOCKED_MESSAGE
}

/// Fetches puzzle input, downloading it at most once per missing cache file
///
/// There is no retry, backoff or rate limiting: every call for a day whose
/// cache file is missing issues one request.
///
/// A fetcher may carry a fallback session, used for days that bring none of
/// their own. [`InputFetcher::new`] takes it from the environment.
#[derive(Clone)]
pub struct InputFetcher {
    client: Option<AocClient>,
    session: Option<Zeroizing<String>>,
}

impl InputFetcher {
    /// Fetcher backed by the given client, with the fallback session read
    /// from the environment (see [`InputFetcher::with_env_session`])
    pub fn new(client: AocClient) -> Self {
        Self {
            client: Some(client),
            session: None,
        }
        .with_env_session()
    }

    /// Fetcher that only reads cache files and never touches the network
    pub fn offline() -> Self {
        Self {
            client: None,
            session: None,
        }
    }

    /// Set the fallback session, ignored if empty
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        let session = session.into();
        self.session = (!session.is_empty()).then(|| Zeroizing::new(session));
        self
    }

    /// Take the fallback session from the first non-empty variable of
    /// [`SESSION_ENV_VARS`], keeping the current one if none is set
    pub fn with_env_session(self) -> Self {
        match env_session() {
            Some(session) => self.with_session(session),
            None => self,
        }
    }

    /// Drop the fallback session
    pub fn without_session(mut self) -> Self {
        self.session = None;
        self
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Resolve a day's raw input
    ///
    /// Returns the cached content when `cache` exists. Otherwise downloads the
    /// input with `session`, or the fallback session, persists it unless the
    /// puzzle is still locked, and returns it. A download that cannot be
    /// persisted is still returned. Missing input degrades to an empty string.
    ///
    /// # Errors
    ///
    /// `InputError::CacheRead` if the cache file exists but cannot be read.
    pub fn get_input(
        &self,
        cache: &InputCache,
        day: u8,
        year: u16,
        session: Option<&str>,
    ) -> Result<String, InputError> {
        if !cache.contains() {
            let session = session.or(self.session.as_deref().map(String::as_str));
            if let Some(body) = self.download(cache, day, year, session) {
                return Ok(body);
            }
        }

        match cache.get() {
            Ok(content) => Ok(content.unwrap_or_default()),
            Err(source) => Err(InputError::CacheRead {
                path: cache.path().to_path_buf(),
                source,
            }),
        }
    }

    /// Unlocked input body, persisted to `cache` on a best-effort basis
    fn download(
        &self,
        cache: &InputCache,
        day: u8,
        year: u16,
        session: Option<&str>,
    ) -> Option<String> {
        let Some(client) = &self.client else {
            debug!(year, day, "Offline, not downloading input");
            return None;
        };
        let Some(session) = session else {
            warn!(year, day, "No session configured, cannot download input");
            return None;
        };

        info!(year, day, url = %client.base_url(), "Downloading input");
        let body = match client.get_input(year, day, session) {
            Ok(body) => body,
            Err(AocError::InvalidStatus { body, .. }) if is_not_unlocked(&body) => body,
            Err(e) => {
                warn!(year, day, error = %e, "Input download failed");
                return None;
            }
        };

        if is_not_unlocked(&body) {
            info!(year, day, "Puzzle is not unlocked yet");
            return None;
        }

        if let Err(e) = cache.put(body.as_bytes()) {
            warn!(year, day, path = %cache.path().display(), error = %e, "Cache write failed");
        }
        Some(body)
    }
}

fn env_session() -> Option<String> {
    SESSION_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|session| !session.is_empty())
}

impl fmt::Debug for InputFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFetcher")
            .field("client", &self.client)
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
