//! molcrew-runtime — Simulated research-crew runs.
//!
//! A run is a cancellable producer task that replays a scripted message
//! sequence with fixed pacing, appending each event to an in-memory run log
//! and fanning it out over a broadcast channel. Starting a new run
//! supersedes (cancels) any run in flight.

pub mod producer;
pub mod run;
pub mod script;

pub use run::{RunLog, RunManager, StreamPacing};
pub use script::RunScript;
