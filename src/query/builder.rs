use std::collections::BTreeSet;

use super::QueryEngine;
use crate::ontology::{Axiom, ClassExpression, Iri, Polarity, Reasoner};

/// Folds `base` through one intersection per value.
///
/// Each value contributes `relation some value`, complemented for
/// [`Polarity::Negative`]. Values are applied in order; with no values `base`
/// is returned unchanged.
#[must_use]
pub fn build_expression(
    base: ClassExpression,
    relation: &Iri,
    polarity: Polarity,
    values: &[Iri],
) -> ClassExpression {
    values.iter().fold(base, |expression, value| {
        let restriction = ClassExpression::some(relation.clone(), value.clone());
        let operand = match polarity {
            Polarity::Positive => restriction,
            Polarity::Negative => restriction.complement(),
        };
        expression.and(operand)
    })
}

impl<R: Reasoner> QueryEngine<R> {
    /// `true` when `candidate` is equivalent to `expression`.
    #[must_use]
    pub fn membership_holds(&self, expression: &ClassExpression, candidate: &ClassExpression) -> bool {
        self.reasoner.is_entailed(&Axiom::equivalent(
            expression.clone(),
            candidate.clone(),
        ))
    }

    /// Checks that adding the restrictions to `subject` does not narrow it.
    #[must_use]
    pub fn has_relation_value(
        &self,
        subject: &ClassExpression,
        relation: &Iri,
        polarity: Polarity,
        values: &[Iri],
    ) -> bool {
        let query = build_expression(subject.clone(), relation, polarity, values);
        self.membership_holds(&query, subject)
    }

    /// Named classes below `ancestor` carrying the restrictions.
    ///
    /// Without an ancestor the search starts from `owl:Thing`.
    #[must_use]
    pub fn relation_subjects(
        &self,
        ancestor: Option<&ClassExpression>,
        relation: &Iri,
        polarity: Polarity,
        values: &[Iri],
    ) -> BTreeSet<Iri> {
        let base = ancestor.cloned().unwrap_or_else(ClassExpression::thing);
        self.by_query(&build_expression(base, relation, polarity, values))
    }

    /// All named descendants of an arbitrary expression.
    #[must_use]
    pub fn by_query(&self, expression: &ClassExpression) -> BTreeSet<Iri> {
        let mut found = self.reasoner.sub_classes(expression, false);
        found.retain(|iri| !iri.is_nothing() && !iri.is_thing());
        tracing::debug!(query = %expression, matches = found.len(), "query_evaluated");
        found
    }
}

#[cfg(test)]
mod tests {
    use super::build_expression;
    use crate::ontology::{ClassExpression, Polarity};
    use crate::tests_cfg::{self, fixture_engine};

    #[test]
    fn empty_values_leave_base_unchanged() {
        let base = ClassExpression::named(tests_cfg::algorithm());
        let built = build_expression(
            base.clone(),
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[],
        );
        assert_eq!(built, base);
    }

    #[test]
    fn values_fold_left_in_order() {
        let base = ClassExpression::named(tests_cfg::algorithm());
        let built = build_expression(
            base.clone(),
            &tests_cfg::has_characteristic(),
            Polarity::Negative,
            &[tests_cfg::stochastic(), tests_cfg::discrete()],
        );
        let expected = base
            .and(
                ClassExpression::some(tests_cfg::has_characteristic(), tests_cfg::stochastic())
                    .complement(),
            )
            .and(
                ClassExpression::some(tests_cfg::has_characteristic(), tests_cfg::discrete())
                    .complement(),
            );
        assert_eq!(built, expected);
    }

    #[test]
    fn subjects_are_found_below_the_top() {
        let engine = fixture_engine();
        let subjects = engine.relation_subjects(
            None,
            &tests_cfg::is_hybrid_of(),
            Polarity::Positive,
            &[tests_cfg::algorithm()],
        );
        assert_eq!(
            subjects.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::pahle_hybrid()]
        );
    }

    #[test]
    fn relation_values_hold_only_when_told_or_inherited() {
        let engine = fixture_engine();
        let tau = ClassExpression::named(tests_cfg::tau_leaping());
        let has = tests_cfg::has_characteristic();
        assert!(engine.has_relation_value(&tau, &has, Polarity::Positive, &[tests_cfg::stochastic()]));
        assert!(engine.has_relation_value(
            &tau,
            &has,
            Polarity::Positive,
            &[tests_cfg::explicit_characteristic()]
        ));
        assert!(engine.has_relation_value(&tau, &has, Polarity::Negative, &[tests_cfg::continuous()]));
        assert!(!engine.has_relation_value(&tau, &has, Polarity::Positive, &[tests_cfg::continuous()]));
        assert!(engine.has_relation_value(&tau, &has, Polarity::Positive, &[]));
    }

    #[test]
    fn by_query_never_returns_bounds() {
        let engine = fixture_engine();
        let found = engine.by_query(&ClassExpression::named(tests_cfg::poisson_tau_leaping()));
        assert!(found.is_empty());
    }
}
