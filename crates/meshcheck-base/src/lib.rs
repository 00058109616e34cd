use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NameKind {
    Vertex,
    Face,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Face => write!(f, "face"),
        }
    }
}

/// Thresholds used when deciding whether derived geometry is usable.
///
/// `angular` is compared against the sine of the angle between the two edges
/// that span a face plane, so it does not depend on mesh size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            angular: 1.0e-9,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("duplicate {kind} name `{name}`")]
    DuplicateName { kind: NameKind, name: String },
    #[error("face `{face}` references unknown vertex `{vertex}`")]
    UnknownVertex { face: String, vertex: String },
    #[error("face `{face}` is degenerate (its first three vertices do not span a plane)")]
    DegenerateFace { face: String },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn duplicate(kind: NameKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
