//! Advent of Code puzzle days with automatic registration
//!
//! Days are laid out one module folder per day, e.g.
//! `my_solutions/year_2025/day01/mod.rs`. Each day derives `AocDay`, so
//! pointing the runner at a year folder is enough to find it.

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
