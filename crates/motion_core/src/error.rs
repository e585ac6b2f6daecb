use std::io;
use std::path::PathBuf;

/// Errors raised by the ambient scaffolding around the engine:
/// configuration loading and replay-file parsing. Per-frame processing
/// never raises this type — transient data gaps and stalled timestamps are
/// handled silently inside the detectors (spec §7).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read configuration file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("replay file not found at {path}")]
    ReplayNotFound { path: PathBuf },

    #[error("failed to read replay file {path}")]
    ReplayRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed skeleton frame on replay line {line}")]
    ReplayParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
