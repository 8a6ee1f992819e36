use thiserror::Error;

// ─── Request-level error hierarchy ───────────────────────────────────────────

/// Fatal outcomes of one activity completion.
///
/// Only these variants ever abort a request. Ledger, reconciliation and audit
/// failures are absorbed at their own stage and never surface here. Adapter
/// internals keep using `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ActivityError {
    // ── Client errors (no side effects performed) ───────────────────────
    #[error("Persona not found: {0}")]
    PersonaNotFound(String),

    #[error("Activity not supported yet: {0}")]
    UnsupportedActivity(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // ── Generation ──────────────────────────────────────────────────────
    #[error("execution failed: {0}")]
    Execution(String),

    // ── Last-resort boundary ────────────────────────────────────────────
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActivityError {
    /// Client errors are safe to retry with different input; nothing ran.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::PersonaNotFound(_) | Self::UnsupportedActivity(_) | Self::InvalidRequest(_)
        )
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Catalog errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse failed: {0}")]
    Parse(String),

    #[error("template render failed: {0}")]
    Render(String),

    #[error("duplicate {kind} id: {id}")]
    Duplicate { kind: &'static str, id: String },
}

/// Shorthand result type for one activity completion.
pub type Result<T> = std::result::Result<T, ActivityError>;
