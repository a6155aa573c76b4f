//! molcrew-web — Web GUI for molcrew
//! Provides the lab dashboard with:
//!   - Control panel for research parameters
//!   - Lab monitor with annotated agent messages
//!   - Property-evolution chart feed
//!   - SSE event stream for live updates

pub mod config;
pub mod handlers;
pub mod router;
pub mod sse;
pub mod state;
