//! KiSAO facade over the generic [`QueryEngine`].
//!
//! [`Kisao`] fixes the roots and relations of the Kinetic Simulation
//! Algorithm Ontology and exposes the questions clients ask about it: what an
//! algorithm is characterised by, which parameters it takes, what it is
//! similar to. It holds no reasoning of its own.

pub mod identifiers;
pub mod vocabulary;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use oxrdf::vocab::xsd;
use serde::{Deserialize, Serialize};

pub use identifiers::IdDialect;
pub use vocabulary::Vocabulary;

use crate::config::Config;
use crate::ontology::{
    snapshot, ClassExpression, Filler, Iri, KnowledgeBase, Polarity, Reasoner,
    StructuralReasoner, SynonymType,
};
use crate::query::builder::build_expression;
use crate::query::similarity::Similar;
use crate::query::{QueryEngine, SimilarityQuery};
use crate::Result;

/// Branch of the ontology a term belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Algorithm,
    Characteristic,
    Parameter,
    Other,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm => f.write_str("algorithm"),
            Self::Characteristic => f.write_str("characteristic"),
            Self::Parameter => f.write_str("parameter"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Value type of an algorithm parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Boolean,
    Integer,
    Float,
    Double,
}

impl ParameterType {
    /// Maps an XML Schema datatype to a parameter type.
    #[must_use]
    pub fn from_datatype(datatype: &Iri) -> Option<Self> {
        match datatype.as_str() {
            value if value == xsd::BOOLEAN.as_str() => Some(Self::Boolean),
            value if value == xsd::INTEGER.as_str() => Some(Self::Integer),
            value if value == xsd::FLOAT.as_str() => Some(Self::Float),
            value if value == xsd::DOUBLE.as_str() => Some(Self::Double),
            _ => None,
        }
    }
}

impl Display for ParameterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
        }
    }
}

/// Queries over a loaded KiSAO knowledge base.
#[derive(Debug)]
pub struct Kisao<R = StructuralReasoner> {
    engine: QueryEngine<R>,
    vocabulary: Vocabulary,
}

impl Kisao<StructuralReasoner> {
    /// Builds the facade from a knowledge base using the structural reasoner.
    ///
    /// # Errors
    ///
    /// Fails when the knowledge base is inconsistent.
    pub fn from_knowledge_base(knowledge_base: KnowledgeBase) -> Result<Self> {
        Ok(Self::new(QueryEngine::structural(knowledge_base)?))
    }

    /// Loads a snapshot from `path` and builds the facade over it.
    ///
    /// # Errors
    ///
    /// Fails when the snapshot cannot be read or validated, or when the
    /// knowledge base is inconsistent.
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "kisao_loading");
        Self::from_knowledge_base(snapshot::load(path)?)
    }

    /// Loads the knowledge base named by the configuration.
    ///
    /// # Errors
    ///
    /// See [`Kisao::from_path`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_path(&config.knowledge_base.path)
    }
}

impl<R: Reasoner> Kisao<R> {
    #[must_use]
    pub fn new(engine: QueryEngine<R>) -> Self {
        Self {
            engine,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Replaces the roots and relations queries go through.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &QueryEngine<R> {
        &self.engine
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn knowledge_base(&self) -> &KnowledgeBase {
        self.engine.knowledge_base()
    }

    // annotations

    #[must_use]
    pub fn name(&self, iri: &Iri) -> Option<&str> {
        if let Some(entity) = self.knowledge_base().entity(iri) {
            return entity.name();
        }
        self.knowledge_base()
            .relation(iri)
            .and_then(|relation| relation.name())
    }

    #[must_use]
    pub fn definition(&self, iri: &Iri) -> Option<&str> {
        self.knowledge_base()
            .entity(iri)
            .and_then(|entity| entity.definition())
    }

    #[must_use]
    pub fn is_deprecated(&self, iri: &Iri) -> bool {
        self.knowledge_base()
            .entity(iri)
            .is_some_and(|entity| entity.is_deprecated())
    }

    #[must_use]
    pub fn all_synonyms(&self, iri: &Iri) -> BTreeSet<&str> {
        self.knowledge_base()
            .entity(iri)
            .map(|entity| {
                entity
                    .synonyms()
                    .iter()
                    .map(|synonym| synonym.text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn synonyms(&self, iri: &Iri, kind: SynonymType) -> BTreeSet<&str> {
        self.knowledge_base()
            .entity(iri)
            .map(|entity| {
                entity
                    .synonyms()
                    .iter()
                    .filter(|synonym| synonym.kind == kind)
                    .map(|synonym| synonym.text.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reference links, URL to description.
    #[must_use]
    pub fn links(&self, iri: &Iri) -> Option<&BTreeMap<String, String>> {
        self.knowledge_base().entity(iri).map(|entity| entity.links())
    }

    // classification

    /// Branch of `iri`; algorithms win over characteristics over parameters.
    #[must_use]
    pub fn kind(&self, iri: &Iri) -> EntityKind {
        if self.is_algorithm(iri) {
            EntityKind::Algorithm
        } else if self.is_characteristic(iri) {
            EntityKind::Characteristic
        } else if self.is_parameter(iri) {
            EntityKind::Parameter
        } else {
            EntityKind::Other
        }
    }

    #[must_use]
    pub fn is_algorithm(&self, iri: &Iri) -> bool {
        self.engine.is_a(iri, &self.vocabulary.algorithm)
    }

    #[must_use]
    pub fn is_characteristic(&self, iri: &Iri) -> bool {
        self.engine.is_a(iri, &self.vocabulary.characteristic)
    }

    #[must_use]
    pub fn is_parameter(&self, iri: &Iri) -> bool {
        self.engine.is_a(iri, &self.vocabulary.parameter)
    }

    // branches

    /// Every algorithm, including grouping classes.
    #[must_use]
    pub fn all_algorithms(&self) -> BTreeSet<Iri> {
        self.engine.sub_branch(&self.vocabulary.algorithm)
    }

    /// Characteristics without further refinements.
    #[must_use]
    pub fn all_characteristics(&self) -> BTreeSet<Iri> {
        self.engine.sub_branch_leaves(&self.vocabulary.characteristic)
    }

    /// Parameters without further refinements.
    #[must_use]
    pub fn all_parameters(&self) -> BTreeSet<Iri> {
        self.engine.sub_branch_leaves(&self.vocabulary.parameter)
    }

    // characteristics

    /// Characteristics `algorithm` has (or lacks), optionally restricted to
    /// descendants of `types`.
    #[must_use]
    pub fn characteristics(&self, algorithm: &Iri, polarity: Polarity, types: &[Iri]) -> BTreeSet<Iri> {
        self.engine.relation_targets(
            &ClassExpression::named(algorithm.clone()),
            &self.vocabulary.has_characteristic,
            polarity,
            types,
        )
    }

    /// Algorithms having (or lacking) every characteristic given.
    #[must_use]
    pub fn algorithms_by_characteristic(&self, polarity: Polarity, characteristics: &[Iri]) -> BTreeSet<Iri> {
        self.engine.relation_subjects(
            Some(&ClassExpression::named(self.vocabulary.algorithm.clone())),
            &self.vocabulary.has_characteristic,
            polarity,
            characteristics,
        )
    }

    #[must_use]
    pub fn has_characteristic(&self, algorithm: &Iri, polarity: Polarity, characteristics: &[Iri]) -> bool {
        self.engine.has_relation_value(
            &ClassExpression::named(algorithm.clone()),
            &self.vocabulary.has_characteristic,
            polarity,
            characteristics,
        )
    }

    // hybrids and complex algorithms

    /// `true` when `algorithm` is a hybrid of other algorithms.
    #[must_use]
    pub fn is_hybrid(&self, algorithm: &Iri) -> bool {
        self.engine.has_relation_value(
            &ClassExpression::named(algorithm.clone()),
            &self.vocabulary.is_hybrid_of,
            Polarity::Positive,
            std::slice::from_ref(&self.vocabulary.algorithm),
        )
    }

    /// Algorithms a hybrid combines; `None` for non-hybrids.
    #[must_use]
    pub fn hybrid_of(&self, algorithm: &Iri) -> Option<BTreeSet<Iri>> {
        self.is_hybrid(algorithm).then(|| {
            self.engine.relation_targets(
                &ClassExpression::named(algorithm.clone()),
                &self.vocabulary.is_hybrid_of,
                Polarity::Positive,
                &[],
            )
        })
    }

    /// `true` for hybrids and for algorithms that use other algorithms.
    #[must_use]
    pub fn is_complex(&self, algorithm: &Iri) -> bool {
        self.is_hybrid(algorithm)
            || self.engine.has_relation_value(
                &ClassExpression::named(algorithm.clone()),
                &self.vocabulary.uses,
                Polarity::Positive,
                std::slice::from_ref(&self.vocabulary.algorithm),
            )
    }

    /// Algorithms `algorithm` uses or is a hybrid of.
    #[must_use]
    pub fn used_algorithms(&self, algorithm: &Iri) -> BTreeSet<Iri> {
        let subject = ClassExpression::named(algorithm.clone());
        let only_algorithms = std::slice::from_ref(&self.vocabulary.algorithm);
        let mut used = self.engine.relation_targets(
            &subject,
            &self.vocabulary.uses,
            Polarity::Positive,
            only_algorithms,
        );
        used.extend(self.engine.relation_targets(
            &subject,
            &self.vocabulary.is_hybrid_of,
            Polarity::Positive,
            only_algorithms,
        ));
        used
    }

    /// Algorithms that use, or are hybrids of, other algorithms.
    #[must_use]
    pub fn complex_algorithms(&self) -> BTreeSet<Iri> {
        let only_algorithms = std::slice::from_ref(&self.vocabulary.algorithm);
        let mut complex = self.engine.relation_subjects(
            None,
            &self.vocabulary.uses,
            Polarity::Positive,
            only_algorithms,
        );
        complex.extend(self.engine.relation_subjects(
            None,
            &self.vocabulary.is_hybrid_of,
            Polarity::Positive,
            only_algorithms,
        ));
        complex
    }

    // parameters

    /// Parameter leaves every member of `algorithm` is required to have.
    #[must_use]
    pub fn parameters(&self, algorithm: &Iri) -> BTreeSet<Iri> {
        self.parameters_of(&ClassExpression::named(algorithm.clone()))
    }

    /// Parameter leaves implied by an arbitrary algorithm description.
    #[must_use]
    pub fn parameters_of(&self, algorithm: &ClassExpression) -> BTreeSet<Iri> {
        self.all_parameters()
            .into_iter()
            .filter(|parameter| {
                self.engine.has_relation_value(
                    algorithm,
                    &self.vocabulary.has_parameter,
                    Polarity::Positive,
                    std::slice::from_ref(parameter),
                )
            })
            .collect()
    }

    /// Parameters shared by every algorithm with (or without) the
    /// characteristics.
    #[must_use]
    pub fn parameters_by_characteristic(&self, polarity: Polarity, characteristics: &[Iri]) -> BTreeSet<Iri> {
        self.parameters_by_ancestor_and_characteristic(&self.vocabulary.algorithm, polarity, characteristics)
    }

    /// Parameters shared by every descendant of `ancestor` with (or without)
    /// the characteristics.
    #[must_use]
    pub fn parameters_by_ancestor_and_characteristic(
        &self,
        ancestor: &Iri,
        polarity: Polarity,
        characteristics: &[Iri],
    ) -> BTreeSet<Iri> {
        let algorithm = build_expression(
            ClassExpression::named(ancestor.clone()),
            &self.vocabulary.has_characteristic,
            polarity,
            characteristics,
        );
        self.parameters_of(&algorithm)
    }

    /// `true` when `algorithm` has every parameter given.
    #[must_use]
    pub fn has_parameter(&self, algorithm: &Iri, parameters: &[Iri]) -> bool {
        self.has_parameter_of(&ClassExpression::named(algorithm.clone()), parameters)
    }

    /// `true` when every algorithm with (or without) the characteristics has
    /// every parameter given.
    #[must_use]
    pub fn has_parameter_for_characteristics(
        &self,
        polarity: Polarity,
        characteristics: &[Iri],
        parameters: &[Iri],
    ) -> bool {
        let algorithm = build_expression(
            ClassExpression::named(self.vocabulary.algorithm.clone()),
            &self.vocabulary.has_characteristic,
            polarity,
            characteristics,
        );
        self.has_parameter_of(&algorithm, parameters)
    }

    fn has_parameter_of(&self, algorithm: &ClassExpression, parameters: &[Iri]) -> bool {
        parameters.iter().all(|parameter| {
            self.engine.has_relation_value(
                algorithm,
                &self.vocabulary.has_parameter,
                Polarity::Positive,
                std::slice::from_ref(parameter),
            )
        })
    }

    /// Value type declared on `parameter` through its has-type restriction.
    #[must_use]
    pub fn parameter_type(&self, parameter: &Iri) -> Option<ParameterType> {
        self.knowledge_base()
            .super_class_axioms(parameter)
            .iter()
            .find_map(|expression| {
                let (relation, filler) = match expression {
                    ClassExpression::Exists(restriction)
                    | ClassExpression::Universal(restriction) => {
                        (&restriction.relation, &restriction.filler)
                    }
                    ClassExpression::Cardinality {
                        relation, filler, ..
                    } => (relation, filler),
                    _ => return None,
                };
                match filler {
                    Filler::Datatype(datatype) if *relation == self.vocabulary.has_type => {
                        ParameterType::from_datatype(datatype)
                    }
                    _ => None,
                }
            })
    }

    // lookup

    /// Every term whose name or synonym matches `name` after normalization.
    /// Relations are not named here; use [`Kisao::search_by_id`] for them.
    #[must_use]
    pub fn search_by_name(&self, name: &str) -> BTreeSet<Iri> {
        self.engine.lookup(name)
    }

    /// Single term for `name`, preferring primary names over synonyms.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<Iri> {
        self.engine.labels().preferred(name).cloned()
    }

    /// Term or relation for any accepted identifier form, if it exists.
    #[must_use]
    pub fn search_by_id(&self, id: &str) -> Option<Iri> {
        let iri = identifiers::resolve(id)?;
        let known = self.knowledge_base().entity(&iri).is_some()
            || self.knowledge_base().relation(&iri).is_some();
        known.then_some(iri)
    }

    // identifiers

    #[must_use]
    pub fn urn(&self, iri: &Iri) -> Option<String> {
        identifiers::urn(iri)
    }

    #[must_use]
    pub fn id(&self, iri: &Iri, dialect: IdDialect) -> Option<String> {
        identifiers::format_id(iri, dialect)
    }

    // similarity

    #[must_use]
    pub fn distance(&self, first: &Iri, second: &Iri) -> f64 {
        self.engine.distance(first, second)
    }

    fn characteristic_query(&self, types: &[Iri]) -> SimilarityQuery {
        SimilarityQuery::new(
            self.vocabulary.has_characteristic.clone(),
            self.vocabulary.algorithm.clone(),
        )
        .with_type_filter(types.iter().cloned())
    }

    /// Algorithms with exactly the characteristics of `algorithm` among
    /// `types`.
    #[must_use]
    pub fn algorithms_with_same_characteristics(&self, algorithm: &Iri, types: &[Iri]) -> BTreeSet<Iri> {
        self.engine
            .same_relation_values(algorithm, &self.characteristic_query(types))
    }

    /// Up to `limit` algorithms closest to `algorithm`.
    #[must_use]
    pub fn most_similar_algorithms(
        &self,
        algorithm: &Iri,
        limit: Option<usize>,
        types: &[Iri],
    ) -> Vec<Similar> {
        self.engine
            .top_n_similar(algorithm, &self.characteristic_query(types), limit)
    }
}
