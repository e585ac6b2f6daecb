//! Ambient engineering scaffolding around the motion analysis engine:
//! typed errors, config loading, logging helpers, and the
//! `SkeletonSource` trait boundary the camera SDK would implement
//! against. None of this participates in per-frame processing, which
//! stays infallible per spec §7.

pub mod config;
pub mod error;
pub mod logging;
pub mod source;

pub use error::EngineError;
pub use source::SkeletonSource;
