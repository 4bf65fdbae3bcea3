use std::collections::BTreeSet;

use thiserror::Error;

use super::expression::{Axiom, ClassExpression};
use super::value_objects::Iri;

/// Contract describing the inference capability the query layer relies on.
///
/// Implementations answer subsumption questions over a knowledge base that
/// does not change after [`Reasoner::classify`] succeeded. Query methods take
/// `&self` and must be safe to call concurrently.
pub trait Reasoner: Send + Sync {
    /// Classifies the knowledge base and materialises inferred axioms.
    ///
    /// Called exactly once, before any query. An inconsistent knowledge base
    /// must be reported here.
    fn classify(&self) -> Result<(), ReasonerError>;

    /// Named classes subsumed by `expression`.
    ///
    /// The result may contain `owl:Nothing`; it never contains classes
    /// equivalent to `expression` itself. With `direct`, only the immediate
    /// subclasses are returned.
    fn sub_classes(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri>;

    /// Named classes subsuming `expression`.
    ///
    /// The result may contain `owl:Thing`; it never contains `expression`
    /// itself. With `direct`, only the immediate superclasses are returned.
    fn super_classes(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri>;

    /// Checks whether the axiom follows from the knowledge base.
    fn is_entailed(&self, axiom: &Axiom) -> bool;
}

/// Errors reported by reasoners during classification.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReasonerError {
    /// The knowledge base is inconsistent.
    #[error("knowledge base is inconsistent: {reason}")]
    Inconsistent { reason: String },
    /// The reasoner could not process the knowledge base.
    #[error("reasoner failure: {0}")]
    Internal(String),
}
