//! Unified error types for mpn-tools.
//!
//! Scoring itself never fails: malformed or unknown input resolves to
//! sentinels (`Manufacturer::Unknown`, `None`, `0.0`). Errors are raised only
//! while building registries, rules and matchers, and while loading
//! configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for mpn-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MpnError {
    /// Errors while registering patterns, metadata, rules or calculators
    #[error("Registration failed: {context}")]
    Registration {
        context: String,
        #[source]
        source: RegistrationErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific registration error kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegistrationErrorKind {
    #[error("type metadata for {0} declares no specs")]
    EmptyMetadata(String),

    #[error("invalid component type tag '{tag}': {reason}")]
    InvalidTypeTag { tag: String, reason: String },

    #[error("metadata for {metadata} cannot be registered under {tag}")]
    TypeMismatch { tag: String, metadata: String },

    #[error("invalid parameter for {rule}: {message}")]
    InvalidRuleParameter { rule: String, message: String },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("the catch-all manufacturer must be the last detector entry")]
    CatchAllNotLast,

    #[error("manufacturer {0} registered twice")]
    DuplicateManufacturer(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for mpn-tools operations
pub type Result<T> = std::result::Result<T, MpnError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl MpnError {
    /// Create a registration error with context
    pub fn registration(context: impl Into<String>, source: RegistrationErrorKind) -> Self {
        Self::Registration {
            context: context.into(),
            source,
        }
    }

    /// Create a registration error for a malformed type tag
    pub fn invalid_type_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        let tag = tag.into();
        Self::registration(
            format!("parsing component type '{tag}'"),
            RegistrationErrorKind::InvalidTypeTag {
                tag,
                reason: reason.into(),
            },
        )
    }

    /// Create a registration error for an out-of-range rule parameter
    pub fn invalid_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::registration(
            "validating tolerance rule",
            RegistrationErrorKind::InvalidRuleParameter {
                rule: rule.into(),
                message: message.into(),
            },
        )
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The registration error kind, if this is a registration failure.
    #[must_use]
    pub const fn registration_kind(&self) -> Option<&RegistrationErrorKind> {
        match self {
            Self::Registration { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<ConfigError> for MpnError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<Vec<ConfigError>> for MpnError {
    fn from(errors: Vec<ConfigError>) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Config(joined)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost first, so a failure deep inside registry
/// construction reads `building matcher: registering metadata for X: ...`.
///
/// # Example
///
/// ```ignore
/// use mpn_tools::error::ErrorContext;
///
/// let mut builder = TypeMetadataRegistry::builder();
/// builder
///     .register(tag, metadata)
///     .with_context(|| format!("applying override for {tag}"))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MpnError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: MpnError, new_ctx: &str) -> MpnError {
    match err {
        MpnError::Registration {
            context: existing,
            source,
        } => MpnError::Registration {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MpnError::Config(msg) => MpnError::Config(chain_context(new_ctx, &msg)),
        MpnError::Validation(msg) => MpnError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| MpnError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| MpnError::Validation(f().into()))
    }
}
