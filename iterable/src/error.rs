use strum::EnumMessage;
use strum_macros::{EnumMessage, IntoStaticStr};
use thiserror::Error;

/// Errors raised by sequence construction and terminal operations.
///
/// Running out of elements is not an error: an exhausted pull-function
/// returns `None`. These variants only surface when a caller asks for
/// something the sequence cannot provide.
#[derive(Debug, Clone, PartialEq, Error, EnumMessage, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// Absent source.
    ///
    /// A sequence cannot be constructed from an absent value or from the
    /// explicit null marker. Every other value is accepted.
    #[error("cannot construct a sequence from an absent value")]
    #[strum(serialize = "ConstructionError")]
    Construction,

    /// Empty sequence.
    ///
    /// A terminal accessor such as `head`, `last` or a seedless fold was
    /// applied to a sequence without elements, and no default was supplied.
    /// Also raised when the result of `tail` or `init` on an empty sequence
    /// is inspected.
    #[error("sequence is empty")]
    #[strum(serialize = "EmptySequenceError")]
    EmptySequence,

    /// Invalid argument.
    ///
    /// A projection template is malformed, an element does not have the
    /// shape an operation requires, or combinator arguments are
    /// incompatible.
    #[error("invalid argument: {0}")]
    #[strum(serialize = "ArgumentError")]
    Argument(String),
}

impl Error {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Error::Argument(message.into())
    }

    /// The stable name of this kind of error.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// The one line summary from the error documentation.
    pub fn message(&self) -> &str {
        self.documentation_pieces().0
    }

    /// The longer explanation from the error documentation.
    pub fn note(&self) -> &str {
        self.documentation_pieces().1
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("");
            let second = pieces.next().unwrap_or("");
            (first, second)
        } else {
            ("", "")
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
