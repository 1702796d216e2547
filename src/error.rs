//! Error hierarchy for ruckrs
//!
//! Catalog operations themselves never fail. Errors only arise where user
//! text is turned into typed values: lookups, workout drafts and configuration.

use thiserror::Error;

/// Top-level error type for ruckrs operations
#[derive(Debug, Error)]
pub enum RuckError {
    /// Input that could not be turned into a valid value
    #[error("Validation error: {0}")]
    Validation(String),

    /// No entity matched a lookup
    #[error("{kind} not found: {query}")]
    NotFound { kind: EntityKind, query: String },

    /// More than one entity matched a lookup
    #[error("{kind} query '{query}' is ambiguous ({matches} matches)")]
    Ambiguous {
        kind: EntityKind,
        query: String,
        matches: usize,
    },

    /// Unknown gear category name
    #[error("Invalid gear category: {0}")]
    InvalidCategory(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Entity families that can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Gear,
    Route,
    Workout,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Gear => write!(f, "Gear"),
            EntityKind::Route => write!(f, "Route"),
            EntityKind::Workout => write!(f, "Workout"),
        }
    }
}

/// Result type alias for ruckrs operations
pub type Result<T> = std::result::Result<T, RuckError>;

impl RuckError {
    pub fn not_found(kind: EntityKind, query: impl Into<String>) -> Self {
        RuckError::NotFound {
            kind,
            query: query.into(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuckError::Validation(_) => ErrorSeverity::Warning,
            RuckError::NotFound { .. } => ErrorSeverity::Warning,
            RuckError::Ambiguous { .. } => ErrorSeverity::Info,
            RuckError::InvalidCategory(_) => ErrorSeverity::Warning,
            RuckError::Configuration(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RuckError::NotFound { kind, query } => {
                format!("No {} matches '{}'.", kind.to_string().to_lowercase(), query)
            }
            RuckError::Ambiguous { kind, query, matches } => format!(
                "'{}' matches {} {} entries. Use a longer id prefix or the full name.",
                query,
                matches,
                kind.to_string().to_lowercase()
            ),
            RuckError::InvalidCategory(name) => format!(
                "Unknown category '{}'. Expected one of: Vest, Stone, Backpack, Sandbag.",
                name
            ),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Rejected input, the store is unchanged
    Warning,
    /// Informational message
    Info,
}
