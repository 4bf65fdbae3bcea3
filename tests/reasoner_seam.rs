use std::collections::BTreeSet;

use kisao::{
    kisao::{EntityKind, Kisao},
    ontology::{Axiom, ClassExpression, Iri, Reasoner, ReasonerError},
    query::QueryEngine,
    tests_cfg,
};

#[derive(Debug)]
struct RefusingStub;

impl Reasoner for RefusingStub {
    fn classify(&self) -> Result<(), ReasonerError> {
        Err(ReasonerError::Internal("timed out".to_string()))
    }

    fn sub_classes(&self, _expression: &ClassExpression, _direct: bool) -> BTreeSet<Iri> {
        BTreeSet::new()
    }

    fn super_classes(&self, _expression: &ClassExpression, _direct: bool) -> BTreeSet<Iri> {
        BTreeSet::new()
    }

    fn is_entailed(&self, _axiom: &Axiom) -> bool {
        false
    }
}

/// Answers every subsumption with `Thing` only and entails nothing.
#[derive(Debug)]
struct FlatStub;

impl Reasoner for FlatStub {
    fn classify(&self) -> Result<(), ReasonerError> {
        Ok(())
    }

    fn sub_classes(&self, _expression: &ClassExpression, _direct: bool) -> BTreeSet<Iri> {
        BTreeSet::from([Iri::nothing()])
    }

    fn super_classes(&self, _expression: &ClassExpression, _direct: bool) -> BTreeSet<Iri> {
        BTreeSet::from([Iri::thing()])
    }

    fn is_entailed(&self, _axiom: &Axiom) -> bool {
        false
    }
}

#[test]
fn classification_failures_surface_from_the_constructor() {
    let err = QueryEngine::new(tests_cfg::fixture_knowledge_base(), RefusingStub)
        .expect_err("refused");
    assert_eq!(err, ReasonerError::Internal("timed out".to_string()));
}

#[test]
fn queries_go_through_the_supplied_reasoner() {
    let engine =
        QueryEngine::new(tests_cfg::fixture_knowledge_base(), FlatStub).expect("classified");
    let kisao = Kisao::new(engine);
    let tau = tests_cfg::tau_leaping();

    assert!(kisao.engine().ancestors(&tau, false).is_empty());
    assert!(kisao.engine().descendants(&tau, false).is_empty());
    assert!(kisao.engine().is_a(&tau, &tau));
    assert_eq!(kisao.kind(&tau), EntityKind::Other);
    assert!(kisao.all_algorithms().is_empty());
    assert!(!kisao.is_hybrid(&tests_cfg::pahle_hybrid()));
}

#[test]
fn labels_do_not_depend_on_the_reasoner() {
    let engine =
        QueryEngine::new(tests_cfg::fixture_knowledge_base(), FlatStub).expect("classified");
    let kisao = Kisao::new(engine);
    assert_eq!(
        kisao.find_by_name("LSODA"),
        Some(tests_cfg::lsoda())
    );
    assert_eq!(
        kisao.search_by_id("KISAO:0000088"),
        Some(tests_cfg::lsoda())
    );
}
