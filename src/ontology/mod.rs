//! Knowledge base domain primitives and the reasoning contract.
//!
//! The module keeps the knowledge base model free from query concerns: value
//! objects, the aggregate of entities, relations and told axioms, the class
//! expression language and the [`Reasoner`] trait the query layer consumes.

pub mod entities;
pub mod expression;
pub mod reasoner;
pub mod snapshot;
pub mod structural;
pub mod value_objects;

pub use entities::{
    Entity, KnowledgeBase, OntologyError, Relation, RelationKind, Synonym, SynonymType,
};
pub use expression::{Axiom, ClassExpression, Filler, Polarity, Restriction};
pub use reasoner::{Reasoner, ReasonerError};
pub use snapshot::KnowledgeBaseSnapshot;
pub use structural::StructuralReasoner;
pub use value_objects::{Iri, IriError};
