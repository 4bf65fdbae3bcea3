use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::expression::{ClassExpression, Filler};
use super::value_objects::Iri;

/// Qualifier attached to a synonym annotation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SynonymType {
    Exact,
    #[default]
    Related,
    Narrow,
    Broad,
}

impl SynonymType {
    /// Canonical tag as written in the knowledge base.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::Related => "RELATED",
            Self::Narrow => "NARROW",
            Self::Broad => "BROAD",
        }
    }

    /// Parses a tag, falling back to [`SynonymType::Related`] for unknown or
    /// missing tags.
    #[must_use]
    pub fn by_name(name: Option<&str>) -> Self {
        match name {
            Some("EXACT") => Self::Exact,
            Some("NARROW") => Self::Narrow,
            Some("BROAD") => Self::Broad,
            _ => Self::Related,
        }
    }
}

/// Alternative label for an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonym {
    pub text: String,
    #[serde(default)]
    pub kind: SynonymType,
}

impl Synonym {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SynonymType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Named class of the knowledge base together with its annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: Iri,
    name: Option<String>,
    definition: Option<String>,
    synonyms: Vec<Synonym>,
    links: BTreeMap<String, String>,
    deprecated: bool,
}

impl Entity {
    /// Creates a new [`Entity`] with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            name: None,
            definition: None,
            synonyms: Vec::new(),
            links: BTreeMap::new(),
            deprecated: false,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the textual definition.
    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// Marks the entity as deprecated.
    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Adds a synonym.
    pub fn add_synonym(&mut self, synonym: Synonym) {
        self.synonyms.push(synonym);
    }

    /// Adds a reference link. Returns `false` when the URL was already present.
    pub fn add_link(&mut self, url: impl Into<String>, description: impl Into<String>) -> bool {
        self.links.insert(url.into(), description.into()).is_none()
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    #[must_use]
    pub fn synonyms(&self) -> &[Synonym] {
        &self.synonyms
    }

    /// Reference links keyed by URL, valued by their description.
    #[must_use]
    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

/// Classifies the values a relation links to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Links classes to classes.
    #[default]
    Object,
    /// Links classes to literal datatypes.
    Data,
}

/// Named directed relation between entity classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    id: Iri,
    name: Option<String>,
    kind: RelationKind,
}

impl Relation {
    /// Creates a new relation with the provided identifier and kind.
    #[must_use]
    pub fn new(id: Iri, kind: RelationKind) -> Self {
        Self {
            id,
            name: None,
            kind,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

/// Aggregates entities, relations and the told `SubClassOf` axioms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    id: Iri,
    entities: BTreeMap<Iri, Entity>,
    relations: BTreeMap<Iri, Relation>,
    super_classes: BTreeMap<Iri, Vec<ClassExpression>>,
    sub_classes: BTreeMap<Iri, BTreeSet<Iri>>,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base with the supplied identifier.
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            entities: BTreeMap::new(),
            relations: BTreeMap::new(),
            super_classes: BTreeMap::new(),
            sub_classes: BTreeMap::new(),
        }
    }

    /// Adds an entity, enforcing unique identifiers.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), OntologyError> {
        let id = entity.id().clone();
        if self.entities.contains_key(&id) || self.relations.contains_key(&id) {
            return Err(OntologyError::DuplicateEntity(id));
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    /// Adds a relation, enforcing unique identifiers.
    pub fn add_relation(&mut self, relation: Relation) -> Result<(), OntologyError> {
        let id = relation.id().clone();
        if self.relations.contains_key(&id) || self.entities.contains_key(&id) {
            return Err(OntologyError::DuplicateRelation(id));
        }
        self.relations.insert(id, relation);
        Ok(())
    }

    /// Records `subject SubClassOf expression`.
    ///
    /// Every class and relation mentioned must already be declared; datatype
    /// fillers are accepted as is. Object relations may only take class
    /// fillers and data relations only datatype fillers.
    pub fn add_sub_class_of(
        &mut self,
        subject: &Iri,
        expression: ClassExpression,
    ) -> Result<(), OntologyError> {
        if !self.entities.contains_key(subject) {
            return Err(self.missing_entity(subject));
        }
        self.validate_expression(&expression)?;
        if let ClassExpression::Named(parent) = &expression {
            self.sub_classes
                .entry(parent.clone())
                .or_default()
                .insert(subject.clone());
        }
        self.super_classes
            .entry(subject.clone())
            .or_default()
            .push(expression);
        Ok(())
    }

    /// Convenience for a named `SubClassOf` edge.
    pub fn add_parent(&mut self, subject: &Iri, parent: &Iri) -> Result<(), OntologyError> {
        self.add_sub_class_of(subject, ClassExpression::Named(parent.clone()))
    }

    fn validate_expression(&self, expression: &ClassExpression) -> Result<(), OntologyError> {
        match expression {
            ClassExpression::Named(iri) => {
                if iri.is_thing() || iri.is_nothing() || self.entities.contains_key(iri) {
                    Ok(())
                } else {
                    Err(self.missing_entity(iri))
                }
            }
            ClassExpression::Intersection(operands) => operands
                .iter()
                .try_for_each(|operand| self.validate_expression(operand)),
            ClassExpression::Complement(operand) => self.validate_expression(operand),
            ClassExpression::Exists(restriction) | ClassExpression::Universal(restriction) => {
                self.validate_restriction(&restriction.relation, &restriction.filler)
            }
            ClassExpression::Cardinality {
                relation, filler, ..
            } => self.validate_restriction(relation, filler),
        }
    }

    fn validate_restriction(&self, relation: &Iri, filler: &Filler) -> Result<(), OntologyError> {
        let Some(declared) = self.relations.get(relation) else {
            return Err(OntologyError::MissingRelation {
                knowledge_base: self.id.clone(),
                relation: relation.clone(),
            });
        };
        match (declared.kind(), filler) {
            (RelationKind::Object, Filler::Class(expression)) => {
                self.validate_expression(expression)
            }
            (RelationKind::Data, Filler::Datatype(_)) => Ok(()),
            _ => Err(OntologyError::InvalidFiller {
                knowledge_base: self.id.clone(),
                relation: relation.clone(),
            }),
        }
    }

    fn missing_entity(&self, entity: &Iri) -> OntologyError {
        OntologyError::MissingEntity {
            knowledge_base: self.id.clone(),
            entity: entity.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn entity(&self, id: &Iri) -> Option<&Entity> {
        self.entities.get(id)
    }

    #[must_use]
    pub fn relation(&self, id: &Iri) -> Option<&Relation> {
        self.relations.get(id)
    }

    /// Returns all entities ordered by identifier.
    #[must_use]
    pub fn entities(&self) -> &BTreeMap<Iri, Entity> {
        &self.entities
    }

    /// Returns all relations ordered by identifier.
    #[must_use]
    pub fn relations(&self) -> &BTreeMap<Iri, Relation> {
        &self.relations
    }

    /// Told superclass expressions of `subject`, named and anonymous, in
    /// declaration order.
    #[must_use]
    pub fn super_class_axioms(&self, subject: &Iri) -> &[ClassExpression] {
        self.super_classes.get(subject).map_or(&[][..], Vec::as_slice)
    }

    /// Told named parents of `subject`.
    pub fn told_parents<'a>(&'a self, subject: &Iri) -> impl Iterator<Item = &'a Iri> + 'a {
        self.super_class_axioms(subject)
            .iter()
            .filter_map(ClassExpression::as_named)
    }

    /// Entities declared as direct named subclasses of `parent`.
    #[must_use]
    pub fn told_children(&self, parent: &Iri) -> Option<&BTreeSet<Iri>> {
        self.sub_classes.get(parent)
    }

    /// `true` when no entity was declared as a subclass of `parent`.
    #[must_use]
    pub fn is_leaf(&self, parent: &Iri) -> bool {
        self.told_children(parent).map_or(true, BTreeSet::is_empty)
    }
}

/// Errors raised when assembling a knowledge base.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OntologyError {
    /// Attempted to add an entity with an existing identifier.
    #[error("entity `{0}` already exists")]
    DuplicateEntity(Iri),
    /// Attempted to add a relation with an existing identifier.
    #[error("relation `{0}` already exists")]
    DuplicateRelation(Iri),
    /// Referenced entity was not part of the knowledge base.
    #[error("entity `{entity}` does not exist in knowledge base `{knowledge_base}`")]
    MissingEntity { knowledge_base: Iri, entity: Iri },
    /// Referenced relation was not part of the knowledge base.
    #[error("relation `{relation}` does not exist in knowledge base `{knowledge_base}`")]
    MissingRelation { knowledge_base: Iri, relation: Iri },
    /// Restriction filler did not match the relation kind.
    #[error("restriction filler does not match relation `{relation}` in knowledge base `{knowledge_base}`")]
    InvalidFiller { knowledge_base: Iri, relation: Iri },
}

#[cfg(test)]
mod tests {
    use super::{
        Entity, KnowledgeBase, OntologyError, Relation, RelationKind, Synonym, SynonymType,
    };
    use crate::ontology::expression::{ClassExpression, Filler, Restriction};
    use crate::ontology::value_objects::Iri;

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    fn knowledge_base() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new(iri("https://example.org/kb"));
        kb.add_entity(Entity::new(iri("https://example.org/Base")))
            .expect("base");
        kb.add_entity(Entity::new(iri("https://example.org/Derived")))
            .expect("derived");
        kb.add_relation(Relation::new(iri("https://example.org/has"), RelationKind::Object))
            .expect("relation");
        kb
    }

    #[test]
    fn entity_annotations_are_tracked() {
        let mut entity = Entity::new(iri("https://example.org/GFRD"))
            .with_name("GFRD")
            .with_definition("Particle level method")
            .deprecated(true);
        entity.add_synonym(Synonym::new(
            "Green's function reaction dynamics",
            SynonymType::Exact,
        ));
        assert!(entity.add_link("urn:miriam:doi:10.1063/1.2137716", "Van Zon JS"));
        assert!(!entity.add_link("urn:miriam:doi:10.1063/1.2137716", "again"));

        assert_eq!(entity.name(), Some("GFRD"));
        assert_eq!(entity.definition(), Some("Particle level method"));
        assert!(entity.is_deprecated());
        assert_eq!(entity.synonyms()[0].kind, SynonymType::Exact);
        assert_eq!(entity.links().len(), 1);
    }

    #[test]
    fn synonym_type_defaults_to_related() {
        assert_eq!(SynonymType::by_name(Some("EXACT")), SynonymType::Exact);
        assert_eq!(SynonymType::by_name(Some("exact")), SynonymType::Related);
        assert_eq!(SynonymType::by_name(None), SynonymType::Related);
        assert_eq!(SynonymType::Broad.name(), "BROAD");
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut kb = knowledge_base();
        let err = kb
            .add_entity(Entity::new(iri("https://example.org/Base")))
            .expect_err("duplicate");
        assert!(matches!(err, OntologyError::DuplicateEntity(_)));
        let err = kb
            .add_relation(Relation::new(iri("https://example.org/Base"), RelationKind::Data))
            .expect_err("clashes with entity");
        assert!(matches!(err, OntologyError::DuplicateRelation(_)));
    }

    #[test]
    fn axioms_track_parents_and_children() {
        let mut kb = knowledge_base();
        let base = iri("https://example.org/Base");
        let derived = iri("https://example.org/Derived");
        kb.add_parent(&derived, &base).expect("parent");
        kb.add_sub_class_of(
            &derived,
            ClassExpression::some(iri("https://example.org/has"), base.clone()),
        )
        .expect("restriction");

        assert_eq!(kb.told_parents(&derived).collect::<Vec<_>>(), vec![&base]);
        assert_eq!(kb.super_class_axioms(&derived).len(), 2);
        assert!(kb.told_children(&base).expect("children").contains(&derived));
        assert!(kb.is_leaf(&derived));
        assert!(!kb.is_leaf(&base));
    }

    #[test]
    fn axioms_require_declared_references() {
        let mut kb = knowledge_base();
        let derived = iri("https://example.org/Derived");
        let err = kb
            .add_parent(&derived, &iri("https://example.org/Unknown"))
            .expect_err("unknown parent");
        assert!(matches!(err, OntologyError::MissingEntity { .. }));

        let err = kb
            .add_sub_class_of(
                &derived,
                ClassExpression::some(
                    iri("https://example.org/unknown"),
                    iri("https://example.org/Base"),
                ),
            )
            .expect_err("unknown relation");
        assert!(matches!(err, OntologyError::MissingRelation { .. }));
    }

    #[test]
    fn restriction_fillers_must_match_relation_kind() {
        let mut kb = knowledge_base();
        let err = kb
            .add_sub_class_of(
                &iri("https://example.org/Derived"),
                ClassExpression::Exists(Restriction::new(
                    iri("https://example.org/has"),
                    Filler::Datatype(iri("http://www.w3.org/2001/XMLSchema#boolean")),
                )),
            )
            .expect_err("datatype on object relation");
        assert!(matches!(err, OntologyError::InvalidFiller { .. }));
    }
}
