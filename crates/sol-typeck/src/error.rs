//! Errors produced while resolving declarations into types.

use std::fmt;

use rowan::TextRange;
use sol_common::span::LineIndex;
use sol_parser::ParseError;

/// A declaration that could not be turned into a type.
///
/// Ranges point into the source the declaration was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeError {
    /// A type name that is neither elementary nor known to the resolver.
    UnknownType { name: String, range: TextRange },
    /// A declaration, field or state variable without a name.
    MissingName { what: &'static str, range: TextRange },
    /// `returns (a, b)`: only a single return type is modelled.
    MultipleReturns {
        function: String,
        count: usize,
        range: TextRange,
    },
    /// A built-in naming itself or a built-in constructed after it.
    ForwardReference { name: String, range: TextRange },
    /// A built-in type that failed to construct.
    Dependency {
        name: String,
        range: TextRange,
        error: Box<BuiltinError>,
    },
}

impl TypeError {
    pub fn range(&self) -> TextRange {
        match self {
            TypeError::UnknownType { range, .. }
            | TypeError::MissingName { range, .. }
            | TypeError::MultipleReturns { range, .. }
            | TypeError::ForwardReference { range, .. }
            | TypeError::Dependency { range, .. } => *range,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UnknownType { name, .. } => write!(f, "unknown type `{name}`"),
            TypeError::MissingName { what, .. } => write!(f, "{what} has no name"),
            TypeError::MultipleReturns {
                function, count, ..
            } => write!(
                f,
                "function `{function}` returns {count} values, expected at most one"
            ),
            TypeError::ForwardReference { name, .. } => write!(
                f,
                "`{name}` is not constructed before the built-in that refers to it"
            ),
            TypeError::Dependency { name, error, .. } => {
                write!(f, "`{name}` is unavailable: {error}")
            }
        }
    }
}

impl std::error::Error for TypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TypeError::Dependency { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// A built-in declaration that could not be constructed.
///
/// These come from the fixed templates, never from user input, so they
/// indicate a defect in the registry. The synthesized `text` is kept for
/// rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum BuiltinError {
    /// The synthesized text did not parse.
    Parse {
        canonical: String,
        text: String,
        errors: Vec<ParseError>,
    },
    /// The text parsed but its members could not be resolved.
    Resolve {
        canonical: String,
        text: String,
        error: TypeError,
    },
    /// The text did not produce exactly one declaration of the expected kind.
    UnexpectedShape {
        canonical: String,
        text: String,
        found: String,
    },
}

impl BuiltinError {
    pub fn canonical(&self) -> &str {
        match self {
            BuiltinError::Parse { canonical, .. }
            | BuiltinError::Resolve { canonical, .. }
            | BuiltinError::UnexpectedShape { canonical, .. } => canonical,
        }
    }

    /// The synthesized declaration text.
    pub fn text(&self) -> &str {
        match self {
            BuiltinError::Parse { text, .. }
            | BuiltinError::Resolve { text, .. }
            | BuiltinError::UnexpectedShape { text, .. } => text,
        }
    }

    /// 1-based line and column of the failure within the synthesized text.
    pub fn line_col(&self) -> Option<(u32, u32)> {
        let offset = match self {
            BuiltinError::Parse { errors, .. } => errors.first()?.span.start,
            BuiltinError::Resolve { error, .. } => error.range().start().into(),
            BuiltinError::UnexpectedShape { .. } => return None,
        };
        Some(LineIndex::new(self.text()).line_col(offset))
    }

    /// Render as a diagnostic over the synthesized text.
    pub fn render(&self) -> String {
        crate::diagnostics::render_builtin_error(self)
    }
}

impl fmt::Display for BuiltinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinError::Parse {
                canonical, errors, ..
            } => {
                write!(f, "built-in `{canonical}` failed to parse")?;
                if let Some(first) = errors.first() {
                    write!(f, ": {first}")?;
                }
                Ok(())
            }
            BuiltinError::Resolve {
                canonical, error, ..
            } => write!(f, "built-in `{canonical}` failed to resolve: {error}"),
            BuiltinError::UnexpectedShape {
                canonical, found, ..
            } => write!(f, "built-in `{canonical}` declares {found}"),
        }
    }
}

impl std::error::Error for BuiltinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuiltinError::Parse { errors, .. } => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            BuiltinError::Resolve { error, .. } => Some(error),
            BuiltinError::UnexpectedShape { .. } => None,
        }
    }
}
