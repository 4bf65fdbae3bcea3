//! Query translation and result aggregation over a classified knowledge base.
//!
//! [`QueryEngine`] owns the knowledge base, the reasoner and the label index.
//! It is assembled once; every operation afterwards borrows it immutably and
//! never fails. Operations are grouped by concern:
//!
//! * [`extractor`] reads relation targets out of told axioms,
//! * [`builder`] composes restriction queries and evaluates them,
//! * [`hierarchy`] navigates the inferred is-a order,
//! * [`similarity`] ranks entities by shared ancestry and characteristics,
//! * [`labels`] resolves display names and synonyms.

pub mod builder;
pub mod extractor;
pub mod hierarchy;
pub mod labels;
pub mod similarity;

use std::collections::BTreeSet;

pub use labels::{normalize, LabelIndex};
pub use similarity::SimilarityQuery;

use crate::ontology::{Iri, KnowledgeBase, Reasoner, ReasonerError, StructuralReasoner};

/// Read-only query surface over a knowledge base and its reasoner.
#[derive(Debug)]
pub struct QueryEngine<R = StructuralReasoner> {
    knowledge_base: KnowledgeBase,
    reasoner: R,
    labels: LabelIndex,
}

impl QueryEngine<StructuralReasoner> {
    /// Builds an engine backed by the [`StructuralReasoner`].
    ///
    /// # Errors
    ///
    /// Fails when the knowledge base is inconsistent.
    pub fn structural(knowledge_base: KnowledgeBase) -> Result<Self, ReasonerError> {
        let reasoner = StructuralReasoner::new(&knowledge_base);
        Self::new(knowledge_base, reasoner)
    }
}

impl<R: Reasoner> QueryEngine<R> {
    /// Classifies the knowledge base and indexes its labels.
    ///
    /// # Errors
    ///
    /// Surfaces the reasoner's classification failure unchanged.
    pub fn new(knowledge_base: KnowledgeBase, reasoner: R) -> Result<Self, ReasonerError> {
        if let Err(error) = reasoner.classify() {
            tracing::warn!(
                knowledge_base = %knowledge_base.id(),
                err.msg = %error,
                "query_engine_classification_failed"
            );
            return Err(error);
        }
        let labels = LabelIndex::build(&knowledge_base);
        tracing::info!(
            knowledge_base = %knowledge_base.id(),
            entities = knowledge_base.entities().len(),
            labels = labels.len(),
            "query_engine_ready"
        );
        Ok(Self {
            knowledge_base,
            reasoner,
            labels,
        })
    }

    #[must_use]
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    #[must_use]
    pub fn reasoner(&self) -> &R {
        &self.reasoner
    }

    #[must_use]
    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Entities whose name or synonym normalizes to the same key as `label`.
    #[must_use]
    pub fn lookup(&self, label: &str) -> BTreeSet<Iri> {
        self.labels.lookup(label).cloned().unwrap_or_default()
    }

    /// `true` when `iri` names an entity of the knowledge base.
    #[must_use]
    pub fn contains(&self, iri: &Iri) -> bool {
        self.knowledge_base.entity(iri).is_some()
    }
}
