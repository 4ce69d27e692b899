//! Structured error types shared across grava crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GravaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the grava library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GravaError {
    /// Malformed or mistyped input to a constructor or setter.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// A label could not be canonicalized.
    #[error("serialization error: {0}")]
    Serialization(ErrorInfo),
    /// Vertex identity collision on insert.
    #[error("duplicate vertex: {0}")]
    VertexDuplicated(ErrorInfo),
    /// Lookup or mutation target vertex is absent.
    #[error("vertex not found: {0}")]
    VertexNotFound(ErrorInfo),
    /// Lookup or mutation target edge is absent.
    #[error("edge not found: {0}")]
    EdgeNotFound(ErrorInfo),
    /// Reserved for shortest-path extensions: a negative edge weight.
    #[error("negative edge: {0}")]
    NegativeEdge(ErrorInfo),
    /// Reserved for shortest-path extensions: a negative-weight cycle.
    #[error("negative cycle: {0}")]
    NegativeCycle(ErrorInfo),
    /// Interchange encoding or parsing failure, distinct from domain errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl GravaError {
    /// Creates an [`GravaError::InvalidArgument`] with the given code and message.
    pub fn invalid_argument(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::InvalidArgument(ErrorInfo::new(code, message))
    }

    /// Creates a [`GravaError::Serialization`] with the given code and message.
    pub fn serialization(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::Serialization(ErrorInfo::new(code, message))
    }

    /// Creates a [`GravaError::VertexDuplicated`] with the given code and message.
    pub fn vertex_duplicated(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::VertexDuplicated(ErrorInfo::new(code, message))
    }

    /// Creates a [`GravaError::VertexNotFound`] with the given code and message.
    pub fn vertex_not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::VertexNotFound(ErrorInfo::new(code, message))
    }

    /// Creates a [`GravaError::EdgeNotFound`] with the given code and message.
    pub fn edge_not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::EdgeNotFound(ErrorInfo::new(code, message))
    }

    /// Creates a [`GravaError::Serde`] with the given code and message.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        GravaError::Serde(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        let attach = |info: ErrorInfo| info.with_context(key, value.to_string());
        match self {
            GravaError::InvalidArgument(info) => GravaError::InvalidArgument(attach(info)),
            GravaError::Serialization(info) => GravaError::Serialization(attach(info)),
            GravaError::VertexDuplicated(info) => GravaError::VertexDuplicated(attach(info)),
            GravaError::VertexNotFound(info) => GravaError::VertexNotFound(attach(info)),
            GravaError::EdgeNotFound(info) => GravaError::EdgeNotFound(attach(info)),
            GravaError::NegativeEdge(info) => GravaError::NegativeEdge(attach(info)),
            GravaError::NegativeCycle(info) => GravaError::NegativeCycle(attach(info)),
            GravaError::Serde(info) => GravaError::Serde(attach(info)),
        }
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GravaError::InvalidArgument(info)
            | GravaError::Serialization(info)
            | GravaError::VertexDuplicated(info)
            | GravaError::VertexNotFound(info)
            | GravaError::EdgeNotFound(info)
            | GravaError::NegativeEdge(info)
            | GravaError::NegativeCycle(info)
            | GravaError::Serde(info) => info,
        }
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}
