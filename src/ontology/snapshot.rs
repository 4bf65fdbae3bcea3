//! Serialized form of a knowledge base.
//!
//! Snapshots are pre-extracted from the published ontology and stored as YAML
//! or JSON. The file extension selects the format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::entities::{Entity, KnowledgeBase, OntologyError, Relation, RelationKind, Synonym, SynonymType};
use super::expression::ClassExpression;
use super::value_objects::Iri;
use crate::{Error, Result};

/// Root document of a knowledge base snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeBaseSnapshot {
    pub id: Iri,
    #[serde(default)]
    pub relations: Vec<RelationSnapshot>,
    #[serde(default)]
    pub entities: Vec<EntitySnapshot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelationSnapshot {
    pub id: Iri,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: RelationKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: Iri,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub synonyms: Vec<SynonymSnapshot>,
    /// URL to description.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    /// Named superclasses.
    #[serde(default)]
    pub parents: Vec<Iri>,
    /// Anonymous superclass expressions, written as single-key maps
    /// (`exists:`, `complement:`) rather than YAML tags.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub axioms: Vec<ClassExpression>,
}

/// Synonym as written in a snapshot. Unknown tags fall back to `RELATED`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynonymSnapshot {
    pub text: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl KnowledgeBaseSnapshot {
    /// Reads a snapshot from `path`, picking the format from the extension.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, the extension is neither `yaml`,
    /// `yml` nor `json`, or the content does not deserialize.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        let content = fs::read_to_string(path).map_err(|source| Error::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// # Errors
    ///
    /// Fails when `content` is not a valid YAML snapshot.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Fails when the snapshot cannot be written as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// # Errors
    ///
    /// Fails when `content` is not a valid JSON snapshot.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builds the validated aggregate.
    ///
    /// Relations and entities are declared before any axiom so axioms may
    /// reference entities listed later in the document.
    ///
    /// # Errors
    ///
    /// Returns the first [`OntologyError`] raised by the aggregate.
    pub fn into_knowledge_base(self) -> Result<KnowledgeBase, OntologyError> {
        let mut knowledge_base = KnowledgeBase::new(self.id);

        for relation in self.relations {
            let mut declared = Relation::new(relation.id, relation.kind);
            if let Some(name) = relation.name {
                declared = declared.with_name(name);
            }
            knowledge_base.add_relation(declared)?;
        }

        let mut axioms = Vec::with_capacity(self.entities.len());
        for snapshot in self.entities {
            let mut entity = Entity::new(snapshot.id.clone()).deprecated(snapshot.deprecated);
            if let Some(name) = snapshot.name {
                entity = entity.with_name(name);
            }
            if let Some(definition) = snapshot.definition {
                entity = entity.with_definition(definition);
            }
            for synonym in snapshot.synonyms {
                entity.add_synonym(Synonym::new(
                    synonym.text,
                    SynonymType::by_name(synonym.kind.as_deref()),
                ));
            }
            for (url, description) in snapshot.links {
                entity.add_link(url, description);
            }
            knowledge_base.add_entity(entity)?;
            axioms.push((snapshot.id, snapshot.parents, snapshot.axioms));
        }

        for (subject, parents, expressions) in axioms {
            for parent in &parents {
                knowledge_base.add_parent(&subject, parent)?;
            }
            for expression in expressions {
                knowledge_base.add_sub_class_of(&subject, expression)?;
            }
        }

        tracing::debug!(
            knowledge_base = %knowledge_base.id(),
            entities = knowledge_base.entities().len(),
            relations = knowledge_base.relations().len(),
            "knowledge_base_snapshot_loaded"
        );
        Ok(knowledge_base)
    }
}

/// Reads and validates the knowledge base stored at `path`.
///
/// # Errors
///
/// See [`KnowledgeBaseSnapshot::from_path`] and
/// [`KnowledgeBaseSnapshot::into_knowledge_base`].
pub fn load(path: &Path) -> Result<KnowledgeBase> {
    Ok(KnowledgeBaseSnapshot::from_path(path)?.into_knowledge_base()?)
}
