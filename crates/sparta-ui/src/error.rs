use crate::backend::BackendError;
use crate::property::{Property, ValueType};
use crate::widget::WidgetId;

/// Errors from writing a widget property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The value does not have the semantic type the key requires.
    TypeMismatch {
        key: Property,
        expected: ValueType,
        actual: ValueType,
    },
}

impl std::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyError::TypeMismatch {
                key,
                expected,
                actual,
            } => write!(
                f,
                "property `{}` expects a {} value, got {}",
                key, expected, actual
            ),
        }
    }
}

impl std::error::Error for PropertyError {}

/// A property or event type name that is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.name)
    }
}

impl std::error::Error for ParseNameError {}

/// Failure to hand a command to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The injection queue is at capacity.
    Full,
    /// The event loop has shut down.
    Disconnected,
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Full => write!(f, "event injection queue is full"),
            SendError::Disconnected => write!(f, "event loop is no longer running"),
        }
    }
}

impl std::error::Error for SendError {}

/// Top-level error type of the toolkit.
#[derive(Debug)]
pub enum UiError {
    Backend(BackendError),
    Property(PropertyError),
    /// The widget was already closed.
    StaleWidget(WidgetId),
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::Backend(e) => write!(f, "backend error: {}", e),
            UiError::Property(e) => write!(f, "property error: {}", e),
            UiError::StaleWidget(id) => write!(f, "widget {} no longer exists", id),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Backend(e) => Some(e),
            UiError::Property(e) => Some(e),
            UiError::StaleWidget(_) => None,
        }
    }
}

impl From<BackendError> for UiError {
    fn from(e: BackendError) -> Self {
        UiError::Backend(e)
    }
}

impl From<PropertyError> for UiError {
    fn from(e: PropertyError) -> Self {
        UiError::Property(e)
    }
}

/// Result type for toolkit operations.
pub type UiResult<T> = Result<T, UiError>;
