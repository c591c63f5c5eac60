//! AOC HTTP Client Library
//!
//! Blocking client for downloading personal puzzle input from the Advent of Code website.
//!
//! # Features
//!
//! - Puzzle input fetching for any year and day
//! - Session cookie sent as a sensitive header and zeroized after use
//! - Fixed browser-like `User-Agent`
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//!
//! // Your session cookie from adventofcode.com
//! let session = "your_session_cookie_here";
//!
//! let input = client.get_input(2024, 1, session)?;
//! println!("{} bytes of input", input.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder, DEFAULT_BASE_URL, USER_AGENT};
pub use error::AocError;
