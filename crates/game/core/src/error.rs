//! Common error infrastructure for quest-core.
//!
//! Domain-specific errors (e.g. [`crate::OracleError`], [`crate::BattleError`])
//! are defined next to the code that raises them and implement [`GameError`]
//! so callers can classify failures uniformly.
//!
//! Nothing in this crate panics on bad input or missing content. Conditions
//! that the game tolerates (a missing step entry, a word that does not fit in
//! a puzzle grid, an exhausted world graph) are not errors at all and are
//! reported through ordinary return values.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later (e.g. a round in flight)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry once the blocking condition clears.
    ///
    /// Examples: a round is still resolving, a stale continuation was dropped
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: zero hits reported, session already over
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: world graph order keys that do not increase
    Internal,

    /// Fatal error - required data is unavailable.
    ///
    /// Examples: missing oracle, empty world graph
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all quest-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable `SCREAMING_SNAKE` code from [`GameError::error_code`]
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
