/// Crate-level error types for the CLI harness.
///
/// The library core never fails: unresolved symbols are an expected outcome
/// carried as `Option`, not an error. These variants cover the harness
/// concerns around it — files, parsing, and watcher setup.
use std::path::PathBuf;

/// All errors carry enough context to produce a useful diagnostic without a
/// debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document passed to `transform` does not exist on disk.
    #[error("document not found: {}", path.display())]
    DocumentNotFound {
        /// Path to the missing document.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A JSON input (reflection tree or document) cannot be parsed.
    #[error("json parse: {}: {source}", file.display())]
    Json {
        /// File that failed to parse.
        file: PathBuf,
        /// The wrapped JSON error.
        source: serde_json::Error,
    },

    /// The configured documentation-model file does not exist on disk.
    #[error("documentation model not found: {}", path.display())]
    ReflectionNotFound {
        /// Path to the missing reflection JSON.
        path: PathBuf,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The `link` command was given a symbol the index does not contain.
    #[error("unresolved symbol: `{symbol}`")]
    UnresolvedSymbol {
        /// The symbol expression that failed to resolve.
        symbol: String,
    },

    /// The filesystem watcher could not be created or attached.
    #[error("watch setup failed: {reason}")]
    WatchSetup {
        /// Description of the watcher failure.
        reason: String,
    },
}
