use std::collections::BTreeSet;

use super::QueryEngine;
use crate::ontology::{Axiom, ClassExpression, Iri, Reasoner};

impl<R: Reasoner> QueryEngine<R> {
    /// Named ancestors of `entity`; empty for unknown entities.
    #[must_use]
    pub fn ancestors(&self, entity: &Iri, direct: bool) -> BTreeSet<Iri> {
        if !self.contains(entity) {
            return BTreeSet::new();
        }
        self.ancestors_of(&ClassExpression::named(entity.clone()), direct)
    }

    /// Named superclasses of an arbitrary expression, without `owl:Thing`.
    #[must_use]
    pub fn ancestors_of(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri> {
        let mut found = self.reasoner.super_classes(expression, direct);
        found.retain(|iri| !iri.is_thing() && !iri.is_nothing());
        found
    }

    /// Named descendants of `entity`; empty for unknown entities.
    #[must_use]
    pub fn descendants(&self, entity: &Iri, direct: bool) -> BTreeSet<Iri> {
        if !self.contains(entity) {
            return BTreeSet::new();
        }
        self.descendants_of(&ClassExpression::named(entity.clone()), direct)
    }

    /// Named subclasses of an arbitrary expression, without `owl:Nothing`.
    #[must_use]
    pub fn descendants_of(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri> {
        let mut found = self.reasoner.sub_classes(expression, direct);
        found.retain(|iri| !iri.is_nothing() && !iri.is_thing());
        found
    }

    /// Reflexive subsumption between two named classes.
    ///
    /// Equal IRIs are accepted before the reasoner is asked, so
    /// `is_a(x, x)` holds even when `x` is not in the knowledge base.
    #[must_use]
    pub fn is_a(&self, descendant: &Iri, ancestor: &Iri) -> bool {
        descendant == ancestor
            || self
                .reasoner
                .is_entailed(&Axiom::sub_class_of(descendant.clone(), ancestor.clone()))
    }

    /// Every named class below `root`, `root` excluded.
    #[must_use]
    pub fn sub_branch(&self, root: &Iri) -> BTreeSet<Iri> {
        self.descendants(root, false)
    }

    /// Classes below `root` that have no told subclasses.
    #[must_use]
    pub fn sub_branch_leaves(&self, root: &Iri) -> BTreeSet<Iri> {
        let mut leaves = self.sub_branch(root);
        leaves.retain(|iri| self.knowledge_base.is_leaf(iri));
        leaves
    }
}

#[cfg(test)]
mod tests {
    use crate::ontology::Iri;
    use crate::tests_cfg::{self, fixture_engine};

    #[test]
    fn ancestors_exclude_the_top() {
        let engine = fixture_engine();
        let all = engine.ancestors(&tests_cfg::tau_leaping(), false);
        assert!(all.contains(&tests_cfg::explicit_method()));
        assert!(all.contains(&tests_cfg::algorithm()));
        assert!(!all.contains(&Iri::thing()));

        let direct = engine.ancestors(&tests_cfg::tau_leaping(), true);
        assert!(all.is_superset(&direct));
        assert_eq!(
            direct.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::explicit_method()]
        );
        assert!(engine.ancestors(&tests_cfg::algorithm(), false).is_empty());
    }

    #[test]
    fn descendants_exclude_the_bottom() {
        let engine = fixture_engine();
        let below = engine.descendants(&tests_cfg::tau_leaping(), false);
        assert_eq!(
            below.into_iter().collect::<Vec<_>>(),
            vec![tests_cfg::poisson_tau_leaping()]
        );
        assert!(engine
            .descendants(&tests_cfg::poisson_tau_leaping(), true)
            .is_empty());
    }

    #[test]
    fn is_a_is_reflexive_and_transitive() {
        let engine = fixture_engine();
        let tau = tests_cfg::tau_leaping();
        assert!(engine.is_a(&tau, &tau));
        assert!(engine.is_a(&tau, &tests_cfg::explicit_method()));
        assert!(engine.is_a(&tests_cfg::poisson_tau_leaping(), &tests_cfg::algorithm()));
        assert!(!engine.is_a(&tests_cfg::algorithm(), &tau));
    }

    #[test]
    fn unknown_entities_resolve_to_nothing() {
        let engine = fixture_engine();
        let unknown = tests_cfg::kisao("KISAO_9999999");
        assert!(engine.ancestors(&unknown, false).is_empty());
        assert!(engine.descendants(&unknown, false).is_empty());
        assert!(!engine.is_a(&unknown, &tests_cfg::algorithm()));
    }

    #[test]
    fn leaves_have_no_told_subclasses() {
        let engine = fixture_engine();
        let branch = engine.sub_branch(&tests_cfg::parameter());
        let leaves = engine.sub_branch_leaves(&tests_cfg::parameter());
        assert!(branch.contains(&tests_cfg::error_tolerance()));
        assert!(!leaves.contains(&tests_cfg::error_tolerance()));
        assert!(leaves.contains(&tests_cfg::absolute_tolerance()));
        assert!(!branch.contains(&tests_cfg::parameter()));
    }
}
