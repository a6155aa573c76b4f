pub mod annotate;
pub mod crew;
pub mod monitor;
pub mod visualize;
