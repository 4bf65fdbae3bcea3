//! Fixtures shared by unit and integration tests.
//!
//! A small KiSAO-shaped knowledge base: the three roots, grouped
//! characteristics, typed parameters and a handful of algorithms covering
//! inherited, negated, hybrid and `uses` restrictions.

use crate::kisao::vocabulary::{self, term};
use crate::kisao::Kisao;
use crate::ontology::{
    ClassExpression, Entity, Filler, Iri, KnowledgeBase, Relation, RelationKind, Synonym,
    SynonymType,
};
use crate::query::QueryEngine;

/// KiSAO term for `fragment`.
#[must_use]
pub fn kisao(fragment: &str) -> Iri {
    term(fragment)
}

macro_rules! terms {
    ($($name:ident => $fragment:literal),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name() -> Iri {
                term($fragment)
            }
        )*
    };
}

terms! {
    algorithm => "KISAO_0000000",
    characteristic => "KISAO_0000097",
    parameter => "KISAO_0000201",
    has_characteristic => "KISAO_0000245",
    is_hybrid_of => "KISAO_0000246",
    has_type => "KISAO_0000251",
    has_parameter => "KISAO_0000259",
    uses => "KISAO_0000360",

    system_behaviour => "KISAO_0000098",
    deterministic => "KISAO_0000103",
    stochastic => "KISAO_0000104",
    variable_type => "KISAO_0000099",
    discrete => "KISAO_0000105",
    continuous => "KISAO_0000106",
    solution_type => "KISAO_0000236",
    explicit_characteristic => "KISAO_0000239",
    implicit_characteristic => "KISAO_0000240",
    spatial_description => "KISAO_0000102",

    error_tolerance => "KISAO_0000597",
    absolute_tolerance => "KISAO_0000211",
    step_size => "KISAO_0000114",
    integrate_reduced_model => "KISAO_0000216",
    tau_leaping_epsilon => "KISAO_0000228",
    critical_firing_threshold => "KISAO_0000249",

    explicit_method => "KISAO_0000630",
    tau_leaping => "KISAO_0000039",
    poisson_tau_leaping => "KISAO_0000040",
    euler_forward => "KISAO_0000030",
    lsoda => "KISAO_0000088",
    gfrd => "KISAO_0000058",
    pahle_hybrid => "KISAO_0000231",
    runge_kutta => "KISAO_0000064",
    obsolete_term => "KISAO_0000001",
}

fn xsd(local: &str) -> Iri {
    Iri::new_unchecked(format!("http://www.w3.org/2001/XMLSchema#{local}"))
}

fn declare(kb: &mut KnowledgeBase, iri: Iri, name: &str, parent: Option<Iri>) -> Iri {
    kb.add_entity(Entity::new(iri.clone()).with_name(name))
        .expect("fixture entity");
    if let Some(parent) = parent {
        kb.add_parent(&iri, &parent).expect("fixture parent");
    }
    iri
}

fn restrict(kb: &mut KnowledgeBase, subject: &Iri, relation: Iri, value: Iri) {
    kb.add_sub_class_of(subject, ClassExpression::some(relation, value))
        .expect("fixture restriction");
}

fn exclude(kb: &mut KnowledgeBase, subject: &Iri, relation: Iri, value: Iri) {
    kb.add_sub_class_of(subject, ClassExpression::some(relation, value).complement())
        .expect("fixture negated restriction");
}

fn typed(kb: &mut KnowledgeBase, subject: &Iri, datatype: &str) {
    kb.add_sub_class_of(
        subject,
        ClassExpression::Cardinality {
            cardinality: 1,
            relation: has_type(),
            filler: Filler::Datatype(xsd(datatype)),
        },
    )
    .expect("fixture parameter type");
}

/// Builds the fixture knowledge base.
#[must_use]
pub fn fixture_knowledge_base() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new(Iri::new_unchecked(vocabulary::ONTOLOGY));

    for (relation, name, kind) in [
        (has_characteristic(), "has characteristic", RelationKind::Object),
        (is_hybrid_of(), "is hybrid of", RelationKind::Object),
        (has_type(), "has type", RelationKind::Data),
        (has_parameter(), "has parameter", RelationKind::Object),
        (uses(), "uses", RelationKind::Object),
    ] {
        kb.add_relation(Relation::new(relation, kind).with_name(name))
            .expect("fixture relation");
    }

    let algorithm = declare(&mut kb, algorithm(), "modelling and simulation algorithm", None);
    let characteristic = declare(
        &mut kb,
        characteristic(),
        "modelling and simulation algorithm characteristic",
        None,
    );
    let parameter = declare(
        &mut kb,
        parameter(),
        "modelling and simulation algorithm parameter",
        None,
    );

    let behaviour = declare(&mut kb, system_behaviour(), "type of system behaviour", Some(characteristic.clone()));
    declare(&mut kb, deterministic(), "deterministic system behaviour", Some(behaviour.clone()));
    declare(&mut kb, stochastic(), "stochastic system behaviour", Some(behaviour));
    let variables = declare(&mut kb, variable_type(), "type of variables", Some(characteristic.clone()));
    declare(&mut kb, discrete(), "discrete variables", Some(variables.clone()));
    declare(&mut kb, continuous(), "continuous variables", Some(variables));
    let solution = declare(&mut kb, solution_type(), "type of solution", Some(characteristic.clone()));
    declare(&mut kb, explicit_characteristic(), "explicit method", Some(solution.clone()));
    declare(&mut kb, implicit_characteristic(), "implicit method", Some(solution));
    declare(&mut kb, spatial_description(), "spatial description", Some(characteristic));

    let tolerance = declare(&mut kb, error_tolerance(), "error tolerance", Some(parameter.clone()));
    let absolute = declare(&mut kb, absolute_tolerance(), "absolute tolerance", Some(tolerance));
    typed(&mut kb, &absolute, "double");
    let step = declare(&mut kb, step_size(), "step size", Some(parameter.clone()));
    typed(&mut kb, &step, "double");
    let reduced = declare(&mut kb, integrate_reduced_model(), "integrate reduced model", Some(parameter.clone()));
    typed(&mut kb, &reduced, "boolean");
    let epsilon = declare(&mut kb, tau_leaping_epsilon(), "tau-leaping epsilon", Some(parameter.clone()));
    typed(&mut kb, &epsilon, "float");
    let threshold = declare(&mut kb, critical_firing_threshold(), "critical firing threshold", Some(parameter));
    typed(&mut kb, &threshold, "integer");

    let explicit = declare(&mut kb, explicit_method(), "explicit integration method", Some(algorithm.clone()));
    restrict(&mut kb, &explicit, has_characteristic(), explicit_characteristic());

    let tau = tau_leaping();
    let mut entity = Entity::new(tau.clone())
        .with_name("tau-leaping method")
        .with_definition("Approximate stochastic simulation that fires many reactions per leap.");
    entity.add_synonym(Synonym::new("tau leaping", SynonymType::Exact));
    entity.add_synonym(Synonym::new("Gillespie's tau-leaping method", SynonymType::Related));
    entity.add_synonym(Synonym::new("explicit tau-leaping", SynonymType::Narrow));
    entity.add_link("urn:miriam:doi:10.1063%2F1.1378322", "Gillespie DT (2001)");
    kb.add_entity(entity).expect("fixture entity");
    kb.add_parent(&tau, &explicit).expect("fixture parent");
    restrict(&mut kb, &tau, has_characteristic(), stochastic());
    restrict(&mut kb, &tau, has_characteristic(), discrete());
    exclude(&mut kb, &tau, has_characteristic(), continuous());
    restrict(&mut kb, &tau, has_parameter(), tau_leaping_epsilon());

    declare(&mut kb, poisson_tau_leaping(), "Poisson tau-leaping method", Some(tau));

    let euler = declare(&mut kb, euler_forward(), "Euler forward method", Some(explicit));
    restrict(&mut kb, &euler, has_characteristic(), deterministic());
    restrict(&mut kb, &euler, has_characteristic(), continuous());
    exclude(&mut kb, &euler, has_characteristic(), discrete());
    restrict(&mut kb, &euler, has_parameter(), step_size());

    let lsoda = declare(&mut kb, lsoda(), "LSODA", Some(algorithm.clone()));
    restrict(&mut kb, &lsoda, has_characteristic(), deterministic());
    restrict(&mut kb, &lsoda, has_characteristic(), continuous());
    restrict(&mut kb, &lsoda, has_characteristic(), implicit_characteristic());
    restrict(&mut kb, &lsoda, has_parameter(), absolute_tolerance());

    let gfrd = declare(&mut kb, gfrd(), "Green's function reaction dynamics", Some(algorithm.clone()));
    restrict(&mut kb, &gfrd, has_characteristic(), stochastic());
    restrict(&mut kb, &gfrd, has_characteristic(), discrete());
    restrict(&mut kb, &gfrd, has_characteristic(), spatial_description());
    exclude(&mut kb, &gfrd, has_characteristic(), continuous());

    let pahle = declare(&mut kb, pahle_hybrid(), "Pahle hybrid method", Some(algorithm.clone()));
    restrict(&mut kb, &pahle, is_hybrid_of(), tau_leaping());
    restrict(&mut kb, &pahle, is_hybrid_of(), lsoda);
    restrict(&mut kb, &pahle, has_characteristic(), stochastic());
    restrict(&mut kb, &pahle, has_characteristic(), deterministic());
    restrict(&mut kb, &pahle, has_parameter(), integrate_reduced_model());

    let runge_kutta = declare(&mut kb, runge_kutta(), "Runge-Kutta based method", Some(algorithm));
    restrict(&mut kb, &runge_kutta, uses(), euler);
    restrict(&mut kb, &runge_kutta, has_characteristic(), deterministic());

    kb.add_entity(
        Entity::new(obsolete_term())
            .with_name("obsolete simulation term")
            .deprecated(true),
    )
    .expect("fixture entity");

    kb
}

/// Engine over [`fixture_knowledge_base`] with the structural reasoner.
#[must_use]
pub fn fixture_engine() -> QueryEngine {
    QueryEngine::structural(fixture_knowledge_base()).expect("consistent fixture")
}

/// Facade over [`fixture_knowledge_base`].
#[must_use]
pub fn fixture_kisao() -> Kisao {
    Kisao::new(fixture_engine())
}
