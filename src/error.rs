//! Crate level error type.
//!
//! Every failure surfaces while an engine is being assembled: reading the
//! configuration, loading the knowledge base snapshot or classifying it. Once a
//! [`crate::kisao::Kisao`] instance exists, queries never fail.

use std::path::PathBuf;

use crate::{
    config::ConfigError,
    ontology::{IriError, OntologyError, ReasonerError},
};

/// Errors raised while constructing engines and their collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration could not be read or was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A textual identifier in the knowledge base was not a valid IRI.
    #[error(transparent)]
    Iri(#[from] IriError),

    /// Knowledge base aggregate rejected a declaration.
    #[error(transparent)]
    Ontology(#[from] OntologyError),

    /// Reasoner refused the knowledge base, typically because it is inconsistent.
    #[error(transparent)]
    Reasoner(#[from] ReasonerError),

    /// Reading a knowledge base snapshot failed.
    #[error("failed to read knowledge base {path:?}: {source}")]
    SnapshotIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The snapshot file extension did not map to a supported format.
    #[error("unsupported knowledge base format for {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
