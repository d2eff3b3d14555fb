#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod container;
pub mod controller;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod keyboard;
pub mod presentation;
pub mod render;
pub mod telemetry;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
