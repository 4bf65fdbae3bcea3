use std::collections::{BTreeMap, BTreeSet};

use crate::ontology::{Iri, KnowledgeBase};

/// Canonical lookup key for a label: trimmed, lowercased, apostrophes removed.
#[must_use]
pub fn normalize(label: &str) -> String {
    label.trim().to_lowercase().replace('\'', "")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct LabelEntry {
    all: BTreeSet<Iri>,
    named: BTreeSet<Iri>,
}

/// Normalized label to entity table shared by names and synonyms.
///
/// Labels are not unique, so every key maps to a set. Keys produced by a
/// primary name are remembered so a single preferred hit can be picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelIndex {
    entries: BTreeMap<String, LabelEntry>,
}

impl LabelIndex {
    /// Indexes entity names and synonyms. Relations are reached by id only.
    #[must_use]
    pub fn build(knowledge_base: &KnowledgeBase) -> Self {
        let mut index = Self::default();
        for entity in knowledge_base.entities().values() {
            if let Some(name) = entity.name() {
                index.insert(name, entity.id(), true);
            }
            for synonym in entity.synonyms() {
                index.insert(&synonym.text, entity.id(), false);
            }
        }
        index
    }

    fn insert(&mut self, label: &str, iri: &Iri, named: bool) {
        let key = normalize(label);
        if key.is_empty() {
            return;
        }
        let entry = self.entries.entry(key).or_default();
        entry.all.insert(iri.clone());
        if named {
            entry.named.insert(iri.clone());
        }
    }

    /// All entities labelled `label` after normalization.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<&BTreeSet<Iri>> {
        self.entries.get(&normalize(label)).map(|entry| &entry.all)
    }

    /// Single hit for `label`, preferring a primary name over a synonym.
    #[must_use]
    pub fn preferred(&self, label: &str) -> Option<&Iri> {
        let entry = self.entries.get(&normalize(label))?;
        entry.named.first().or_else(|| entry.all.first())
    }

    /// Number of distinct normalized labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
