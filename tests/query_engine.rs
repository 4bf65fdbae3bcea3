use std::collections::BTreeSet;

use kisao::{
    ontology::{ClassExpression, Iri, Polarity},
    query::{builder::build_expression, QueryEngine, SimilarityQuery},
    tests_cfg,
};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> QueryEngine {
    tests_cfg::fixture_engine()
}

fn all_terms(engine: &QueryEngine) -> Vec<Iri> {
    engine.knowledge_base().entities().keys().cloned().collect()
}

#[rstest]
fn every_term_is_a_itself(engine: QueryEngine) {
    for term in all_terms(&engine) {
        assert!(engine.is_a(&term, &term), "{term} is not a {term}");
    }
}

#[rstest]
fn direct_ancestors_are_ancestors(engine: QueryEngine) {
    for term in all_terms(&engine) {
        let direct = engine.ancestors(&term, true);
        let all = engine.ancestors(&term, false);
        assert!(direct.is_subset(&all), "direct ancestors of {term} leak");
        assert!(!all.contains(&term));
    }
}

#[rstest]
fn direct_descendants_are_descendants(engine: QueryEngine) {
    for term in all_terms(&engine) {
        let direct = engine.descendants(&term, true);
        let all = engine.descendants(&term, false);
        assert!(direct.is_subset(&all), "direct descendants of {term} leak");
        assert!(!all.contains(&term));
    }
}

#[rstest]
fn hierarchy_of_tau_leaping(engine: QueryEngine) {
    let tau = tests_cfg::tau_leaping();
    assert_eq!(
        engine.ancestors(&tau, true),
        BTreeSet::from([tests_cfg::explicit_method()])
    );
    assert_eq!(
        engine.ancestors(&tau, false),
        BTreeSet::from([tests_cfg::explicit_method(), tests_cfg::algorithm()])
    );
    assert_eq!(
        engine.descendants(&tau, false),
        BTreeSet::from([tests_cfg::poisson_tau_leaping()])
    );
}

#[rstest]
fn unknown_terms_have_no_hierarchy(engine: QueryEngine) {
    let unknown = tests_cfg::kisao("KISAO_0000999");
    assert!(engine.ancestors(&unknown, false).is_empty());
    assert!(engine.descendants(&unknown, false).is_empty());
    assert!(!engine.is_a(&unknown, &tests_cfg::algorithm()));
    assert!(!engine.is_a(&tests_cfg::algorithm(), &unknown));
    assert!(engine.is_a(&unknown, &unknown));
}

#[rstest]
fn asserted_and_negated_targets_are_disjoint(engine: QueryEngine) {
    for term in all_terms(&engine) {
        let subject = ClassExpression::named(term.clone());
        let asserted = engine.relation_targets(
            &subject,
            &tests_cfg::has_characteristic(),
            Polarity::Positive,
            &[],
        );
        let negated = engine.relation_targets(
            &subject,
            &tests_cfg::has_characteristic(),
            Polarity::Negative,
            &[],
        );
        assert!(asserted.is_disjoint(&negated), "{term} has and lacks a value");
    }
}

#[rstest]
fn building_without_values_returns_the_base() {
    let base = ClassExpression::named(tests_cfg::algorithm());
    for polarity in [Polarity::Positive, Polarity::Negative] {
        assert_eq!(
            build_expression(base.clone(), &tests_cfg::has_characteristic(), polarity, &[]),
            base
        );
    }
}

#[rstest]
fn subjects_with_a_characteristic(engine: QueryEngine) {
    let found = engine.relation_subjects(
        Some(&ClassExpression::named(tests_cfg::algorithm())),
        &tests_cfg::has_characteristic(),
        Polarity::Positive,
        &[tests_cfg::stochastic()],
    );
    assert_eq!(
        found,
        BTreeSet::from([
            tests_cfg::tau_leaping(),
            tests_cfg::poisson_tau_leaping(),
            tests_cfg::gfrd(),
            tests_cfg::pahle_hybrid(),
        ])
    );
}

#[rstest]
fn subjects_lacking_a_characteristic(engine: QueryEngine) {
    let found = engine.relation_subjects(
        None,
        &tests_cfg::has_characteristic(),
        Polarity::Negative,
        &[tests_cfg::continuous()],
    );
    assert_eq!(
        found,
        BTreeSet::from([
            tests_cfg::tau_leaping(),
            tests_cfg::poisson_tau_leaping(),
            tests_cfg::gfrd(),
        ])
    );
}

#[rstest]
fn distance_is_a_symmetric_dissimilarity(engine: QueryEngine) {
    let terms = all_terms(&engine);
    for first in &terms {
        assert!(engine.distance(first, first).abs() < f64::EPSILON);
        for second in &terms {
            let forward = engine.distance(first, second);
            let backward = engine.distance(second, first);
            assert!((forward - backward).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&forward));
        }
    }
}

#[rstest]
fn siblings_under_the_root_are_half_apart(engine: QueryEngine) {
    let distance = engine.distance(&tests_cfg::lsoda(), &tests_cfg::runge_kutta());
    assert!((distance - 0.5).abs() < f64::EPSILON);
}

#[rstest]
#[case(None)]
#[case(Some(0))]
#[case(Some(1))]
#[case(Some(10))]
fn ranking_is_bounded_and_sorted(engine: QueryEngine, #[case] limit: Option<usize>) {
    let query = SimilarityQuery::new(tests_cfg::has_characteristic(), tests_cfg::algorithm())
        .with_type_filter([tests_cfg::system_behaviour()]);
    let ranked = engine.top_n_similar(&tests_cfg::gfrd(), &query, limit);

    if let Some(limit) = limit {
        assert!(ranked.len() <= limit);
    }
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].distance <= pair[1].distance));
    assert!(ranked
        .iter()
        .all(|similar| similar.iri != tests_cfg::gfrd()));
}

#[rstest]
fn labels_are_normalized(engine: QueryEngine) {
    assert_eq!(
        engine.lookup("  Tau-Leaping Method "),
        engine.lookup("tau-leaping method")
    );
    assert_eq!(
        engine.lookup("Gillespies tau-leaping method"),
        BTreeSet::from([tests_cfg::tau_leaping()])
    );
    assert!(engine.lookup("no such method").is_empty());
}
