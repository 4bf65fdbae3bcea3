use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

use super::builder::build_expression;
use super::QueryEngine;
use crate::ontology::{ClassExpression, Iri, Polarity, Reasoner};

/// Relation and branch a similarity search compares entities over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityQuery {
    relation: Iri,
    root: Iri,
    type_filter: Vec<Iri>,
}

impl SimilarityQuery {
    /// Compares entities below `root` by their `relation` values.
    #[must_use]
    pub fn new(relation: Iri, root: Iri) -> Self {
        Self {
            relation,
            root,
            type_filter: Vec::new(),
        }
    }

    /// Restricts the compared values to descendants of `types`.
    #[must_use]
    pub fn with_type_filter(mut self, types: impl IntoIterator<Item = Iri>) -> Self {
        self.type_filter = types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn relation(&self) -> &Iri {
        &self.relation
    }

    #[must_use]
    pub fn root(&self) -> &Iri {
        &self.root
    }

    #[must_use]
    pub fn type_filter(&self) -> &[Iri] {
        &self.type_filter
    }
}

/// Ranked candidate of a similarity search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Similar {
    pub iri: Iri,
    pub distance: f64,
    /// Relation values, asserted and negated, shared with the reference.
    pub shared: usize,
}

impl Similar {
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| other.shared.cmp(&self.shared))
            .then_with(|| self.iri.cmp(&other.iri))
    }
}

impl<R: Reasoner> QueryEngine<R> {
    /// Normalized ancestor-overlap distance in `[0, 1]`.
    ///
    /// `1 - 2 * |common| / (|A| + |B|)` where `A` and `B` are the ancestors of
    /// each entity including the entity itself.
    #[must_use]
    pub fn distance(&self, first: &Iri, second: &Iri) -> f64 {
        if first == second {
            return 0.0;
        }
        let mut left = self.ancestors(first, false);
        left.insert(first.clone());
        let mut right = self.ancestors(second, false);
        right.insert(second.clone());

        let common = left.intersection(&right).count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = (2 * common) as f64 / (left.len() + right.len()) as f64;
        1.0 - ratio
    }

    /// Entities below the query root sharing every asserted and every negated
    /// relation value of `reference`, `reference` excluded.
    #[must_use]
    pub fn same_relation_values(&self, reference: &Iri, query: &SimilarityQuery) -> BTreeSet<Iri> {
        let subject = ClassExpression::named(reference.clone());
        let asserted = self.relation_targets(
            &subject,
            &query.relation,
            Polarity::Positive,
            &query.type_filter,
        );
        let negated = self.relation_targets(
            &subject,
            &query.relation,
            Polarity::Negative,
            &query.type_filter,
        );

        let asserted: Vec<Iri> = asserted.into_iter().collect();
        let negated: Vec<Iri> = negated.into_iter().collect();
        let expression = build_expression(
            ClassExpression::named(query.root.clone()),
            &query.relation,
            Polarity::Positive,
            &asserted,
        );
        let expression = build_expression(expression, &query.relation, Polarity::Negative, &negated);

        let mut found = self.by_query(&expression);
        found.remove(reference);
        found
    }

    /// Candidates of [`QueryEngine::same_relation_values`] ranked by
    /// ascending distance, then by descending count of shared relation
    /// values, then by identifier. `None` keeps every candidate.
    #[must_use]
    pub fn top_n_similar(
        &self,
        reference: &Iri,
        query: &SimilarityQuery,
        limit: Option<usize>,
    ) -> Vec<Similar> {
        let subject = ClassExpression::named(reference.clone());
        let asserted = self.relation_targets(&subject, &query.relation, Polarity::Positive, &[]);
        let negated = self.relation_targets(&subject, &query.relation, Polarity::Negative, &[]);

        let mut ranked: Vec<Similar> = self
            .same_relation_values(reference, query)
            .into_iter()
            .map(|candidate| {
                let candidate_subject = ClassExpression::named(candidate.clone());
                let shared = self
                    .relation_targets(&candidate_subject, &query.relation, Polarity::Positive, &[])
                    .intersection(&asserted)
                    .count()
                    + self
                        .relation_targets(
                            &candidate_subject,
                            &query.relation,
                            Polarity::Negative,
                            &[],
                        )
                        .intersection(&negated)
                        .count();
                Similar {
                    distance: self.distance(reference, &candidate),
                    iri: candidate,
                    shared,
                }
            })
            .collect();

        ranked.sort_by(Similar::rank);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        tracing::debug!(
            reference = %reference,
            candidates = ranked.len(),
            "similarity_ranked"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::{Similar, SimilarityQuery};
    use crate::tests_cfg::{self, fixture_engine};

    fn characteristics() -> SimilarityQuery {
        SimilarityQuery::new(tests_cfg::has_characteristic(), tests_cfg::algorithm())
    }

    #[test]
    fn distance_of_siblings_under_a_root() {
        let engine = fixture_engine();
        let distance = engine.distance(&tests_cfg::lsoda(), &tests_cfg::gfrd());
        assert!((distance - 0.5).abs() < f64::EPSILON);
        assert!(engine
            .distance(&tests_cfg::tau_leaping(), &tests_cfg::tau_leaping())
            .abs()
            < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let engine = fixture_engine();
        let forward = engine.distance(&tests_cfg::tau_leaping(), &tests_cfg::euler_forward());
        let backward = engine.distance(&tests_cfg::euler_forward(), &tests_cfg::tau_leaping());
        assert!((forward - backward).abs() < f64::EPSILON);
        assert!((forward - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn same_values_exclude_the_reference() {
        let engine = fixture_engine();
        let tau = tests_cfg::tau_leaping();
        let found = engine.same_relation_values(&tau, &characteristics());
        assert!(!found.contains(&tau));
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::poisson_tau_leaping()]
        );

        let filtered = engine.same_relation_values(
            &tau,
            &characteristics().with_type_filter([
                tests_cfg::system_behaviour(),
                tests_cfg::variable_type(),
            ]),
        );
        assert!(filtered.contains(&tests_cfg::gfrd()));
        assert!(filtered.contains(&tests_cfg::poisson_tau_leaping()));
        assert!(!filtered.contains(&tau));
    }

    #[test]
    fn ranking_is_ascending_in_distance_and_bounded() {
        let engine = fixture_engine();
        let query = characteristics().with_type_filter([
            tests_cfg::system_behaviour(),
            tests_cfg::variable_type(),
        ]);
        let ranked = engine.top_n_similar(&tests_cfg::tau_leaping(), &query, None);
        assert_eq!(
            ranked.iter().map(|similar| similar.iri.clone()).collect::<Vec<_>>(),
            vec![tests_cfg::poisson_tau_leaping(), tests_cfg::gfrd()]
        );
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].distance <= pair[1].distance));

        let bounded = engine.top_n_similar(&tests_cfg::tau_leaping(), &query, Some(1));
        assert_eq!(bounded.len(), 1);
        assert!(engine
            .top_n_similar(&tests_cfg::tau_leaping(), &query, Some(0))
            .is_empty());
    }

    #[test]
    fn ties_prefer_more_shared_values_then_identifier() {
        let near = Similar {
            iri: tests_cfg::gfrd(),
            distance: 0.5,
            shared: 3,
        };
        let far = Similar {
            iri: tests_cfg::lsoda(),
            distance: 0.5,
            shared: 1,
        };
        let also_far = Similar {
            iri: tests_cfg::euler_forward(),
            distance: 0.5,
            shared: 1,
        };
        let mut ranked = vec![far.clone(), also_far.clone(), near.clone()];
        ranked.sort_by(Similar::rank);
        assert_eq!(ranked, vec![near, also_far, far]);
    }
}
