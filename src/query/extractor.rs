use std::collections::BTreeSet;

use super::QueryEngine;
use crate::ontology::{ClassExpression, Iri, Polarity, Reasoner};

impl<R: Reasoner> QueryEngine<R> {
    /// Targets of `relation` read from the told superclass expressions of
    /// `subject` and of every named ancestor.
    ///
    /// Existential, universal and exact-cardinality restrictions with a named
    /// filler contribute their filler. With [`Polarity::Negative`] only
    /// complemented restrictions are read, one level deep. Anonymous subjects
    /// contribute only their ancestors' axioms. A non-empty `type_filter`
    /// keeps targets that are, or descend from, one of its entries.
    #[must_use]
    pub fn relation_targets(
        &self,
        subject: &ClassExpression,
        relation: &Iri,
        polarity: Polarity,
        type_filter: &[Iri],
    ) -> BTreeSet<Iri> {
        let mut owners: Vec<Iri> = Vec::new();
        if let ClassExpression::Named(iri) = subject {
            owners.push(iri.clone());
        }
        owners.extend(
            self.reasoner
                .super_classes(subject, false)
                .into_iter()
                .filter(|ancestor| !ancestor.is_thing()),
        );

        let mut targets = BTreeSet::new();
        for owner in &owners {
            for expression in self.knowledge_base.super_class_axioms(owner) {
                if !expression.is_anonymous() {
                    continue;
                }
                let matched = match polarity {
                    Polarity::Positive => restriction_target(expression, relation),
                    Polarity::Negative => match expression {
                        ClassExpression::Complement(inner) if inner.is_anonymous() => {
                            restriction_target(inner, relation)
                        }
                        _ => None,
                    },
                };
                if let Some(target) = matched {
                    targets.insert(target.clone());
                }
            }
        }

        if type_filter.is_empty() {
            return targets;
        }
        targets
            .into_iter()
            .filter(|target| type_filter.iter().any(|kind| self.is_a(target, kind)))
            .collect()
    }
}

fn restriction_target<'a>(expression: &'a ClassExpression, relation: &Iri) -> Option<&'a Iri> {
    match expression {
        ClassExpression::Exists(restriction) | ClassExpression::Universal(restriction)
            if restriction.relation == *relation =>
        {
            restriction.filler.named()
        }
        ClassExpression::Cardinality {
            relation: restricted,
            filler,
            ..
        } if restricted == relation => filler.named(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::ontology::{ClassExpression, Polarity};
    use crate::tests_cfg::{self, fixture_engine};

    #[test]
    fn positive_targets_include_inherited_restrictions() {
        let engine = fixture_engine();
        let targets = engine.relation_targets(
            &ClassExpression::named(tests_cfg::tau_leaping()),
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[],
        );
        assert!(targets.contains(&tests_cfg::stochastic()));
        assert!(targets.contains(&tests_cfg::discrete()));
        assert!(!targets.contains(&tests_cfg::continuous()));
    }

    #[test]
    fn negative_targets_unwrap_one_complement() {
        let engine = fixture_engine();
        let targets = engine.relation_targets(
            &ClassExpression::named(tests_cfg::tau_leaping()),
            &tests_cfg::has_characteristic(),
            Polarity::Negative,
            &[],
        );
        assert_eq!(
            targets.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::continuous()]
        );
    }

    #[test]
    fn type_filter_keeps_descendants_of_the_filter() {
        let engine = fixture_engine();
        let targets = engine.relation_targets(
            &ClassExpression::named(tests_cfg::tau_leaping()),
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[tests_cfg::system_behaviour()],
        );
        assert_eq!(
            targets.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::stochastic()]
        );
    }

    #[test]
    fn anonymous_subjects_read_ancestor_axioms_only() {
        let engine = fixture_engine();
        let subject = ClassExpression::named(tests_cfg::tau_leaping())
            .and(ClassExpression::some(
                tests_cfg::has_characteristic(),
                tests_cfg::spatial_description(),
            ));
        let targets = engine.relation_targets(
            &subject,
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[],
        );
        assert!(targets.contains(&tests_cfg::stochastic()));
        assert!(!targets.contains(&tests_cfg::spatial_description()));
    }

    #[test]
    fn unknown_subjects_have_no_targets() {
        let engine = fixture_engine();
        let targets = engine.relation_targets(
            &ClassExpression::named(tests_cfg::kisao("KISAO_9999999")),
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[],
        );
        assert!(targets.is_empty());
    }
}
