//! AWTRIX pixel clock client.
//!
//! The clock exposes a custom-app endpoint that accepts a JSON list of
//! colored text fragments. One fragment is sent per monitored line.

mod client;
mod error;

pub use client::{AwtrixClient, AwtrixConfig, CustomApp, DEFAULT_URL, TextSegment};
pub use error::DisplayPushError;
