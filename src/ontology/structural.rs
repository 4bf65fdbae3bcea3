//! Reasoner answering subsumption from told axioms only.
//!
//! Named classes are closed transitively over their told parents and inherit
//! the anonymous superclass expressions of every ancestor. Anonymous
//! expressions are compared structurally: existential fillers covariantly,
//! complements contravariantly. This covers the restriction shapes the query
//! layer builds; it is not a tableau reasoner and does not use equivalence
//! definitions.

use std::collections::{BTreeMap, BTreeSet};

use super::entities::KnowledgeBase;
use super::expression::{Axiom, ClassExpression, Filler};
use super::reasoner::{Reasoner, ReasonerError};
use super::value_objects::Iri;

/// Told axioms may be cyclic through restriction fillers.
const MAX_DEPTH: usize = 64;

/// [`Reasoner`] over the told `SubClassOf` axioms of a [`KnowledgeBase`].
#[derive(Clone, Debug, Default)]
pub struct StructuralReasoner {
    classes: BTreeSet<Iri>,
    ancestors: BTreeMap<Iri, BTreeSet<Iri>>,
    restrictions: BTreeMap<Iri, Vec<ClassExpression>>,
}

impl StructuralReasoner {
    /// Precomputes the named closure and inherited restrictions.
    #[must_use]
    pub fn new(knowledge_base: &KnowledgeBase) -> Self {
        let mut parents: BTreeMap<Iri, BTreeSet<Iri>> = BTreeMap::new();
        let mut own_restrictions: BTreeMap<Iri, Vec<ClassExpression>> = BTreeMap::new();

        for id in knowledge_base.entities().keys() {
            let told_parents = parents.entry(id.clone()).or_default();
            let told_restrictions = own_restrictions.entry(id.clone()).or_default();
            for expression in knowledge_base.super_class_axioms(id) {
                split_conjuncts(expression, told_parents, told_restrictions);
            }
        }

        let ancestors: BTreeMap<Iri, BTreeSet<Iri>> = parents
            .keys()
            .map(|id| (id.clone(), transitive_parents(id, &parents)))
            .collect();

        let restrictions = ancestors
            .iter()
            .map(|(id, above)| {
                let mut inherited: Vec<ClassExpression> =
                    own_restrictions.get(id).cloned().unwrap_or_default();
                for ancestor in above {
                    for expression in own_restrictions.get(ancestor).into_iter().flatten() {
                        if !inherited.contains(expression) {
                            inherited.push(expression.clone());
                        }
                    }
                }
                (id.clone(), inherited)
            })
            .collect();

        Self {
            classes: knowledge_base.entities().keys().cloned().collect(),
            ancestors,
            restrictions,
        }
    }

    /// Anonymous superclass expressions of `class`, its own first.
    #[must_use]
    pub fn told_restrictions(&self, class: &Iri) -> &[ClassExpression] {
        self.restrictions.get(class).map_or(&[][..], Vec::as_slice)
    }

    /// `sub ⊑ sup` as far as the told axioms show it.
    #[must_use]
    pub fn subsumes(&self, sub: &ClassExpression, sup: &ClassExpression) -> bool {
        self.subsumes_within(sub, sup, 0)
    }

    fn subsumes_within(&self, sub: &ClassExpression, sup: &ClassExpression, depth: usize) -> bool {
        if depth > MAX_DEPTH {
            return false;
        }
        if sub == sup {
            return true;
        }
        let depth = depth + 1;

        match sup {
            ClassExpression::Named(iri) if iri.is_thing() => return true,
            ClassExpression::Intersection(parts) => {
                return parts
                    .iter()
                    .all(|part| self.subsumes_within(sub, part, depth));
            }
            _ => {}
        }

        match sub {
            ClassExpression::Named(iri) if iri.is_nothing() => true,
            ClassExpression::Named(iri) => self.named_within(iri, sup, depth),
            ClassExpression::Intersection(parts) => parts
                .iter()
                .any(|part| self.subsumes_within(part, sup, depth)),
            _ => self.restriction_within(sub, sup, depth),
        }
    }

    fn named_within(&self, class: &Iri, sup: &ClassExpression, depth: usize) -> bool {
        match sup {
            ClassExpression::Named(target) => self
                .ancestors
                .get(class)
                .is_some_and(|above| above.contains(target)),
            _ => self
                .told_restrictions(class)
                .iter()
                .any(|told| self.subsumes_within(told, sup, depth)),
        }
    }

    fn restriction_within(&self, sub: &ClassExpression, sup: &ClassExpression, depth: usize) -> bool {
        match (sub, sup) {
            (ClassExpression::Exists(told), ClassExpression::Exists(wanted))
            | (ClassExpression::Universal(told), ClassExpression::Universal(wanted)) => {
                told.relation == wanted.relation
                    && self.filler_within(&told.filler, &wanted.filler, depth)
            }
            (
                ClassExpression::Cardinality {
                    cardinality,
                    relation,
                    filler,
                },
                ClassExpression::Exists(wanted),
            ) => {
                *cardinality > 0
                    && *relation == wanted.relation
                    && self.filler_within(filler, &wanted.filler, depth)
            }
            (ClassExpression::Complement(told), ClassExpression::Complement(wanted)) => {
                self.subsumes_within(wanted, told, depth)
            }
            _ => false,
        }
    }

    fn filler_within(&self, sub: &Filler, sup: &Filler, depth: usize) -> bool {
        match (sub, sup) {
            (Filler::Class(sub), Filler::Class(sup)) => self.subsumes_within(sub, sup, depth),
            (Filler::Datatype(sub), Filler::Datatype(sup)) => sub == sup,
            _ => false,
        }
    }

    fn is_strict(&self, sub: &ClassExpression, sup: &ClassExpression) -> bool {
        self.subsumes(sub, sup) && !self.subsumes(sup, sub)
    }

    fn conflict(&self, class: &Iri) -> Option<String> {
        let told = self.told_restrictions(class);
        let asserted = told.iter().filter_map(|expression| match expression {
            ClassExpression::Exists(restriction) => Some((&restriction.relation, &restriction.filler)),
            ClassExpression::Cardinality {
                cardinality,
                relation,
                filler,
            } if *cardinality > 0 => Some((relation, filler)),
            _ => None,
        });

        for (relation, filler) in asserted {
            for expression in told {
                let ClassExpression::Complement(negated) = expression else {
                    continue;
                };
                let ClassExpression::Exists(excluded) = negated.as_ref() else {
                    continue;
                };
                if excluded.relation == *relation && self.filler_within(filler, &excluded.filler, 0)
                {
                    return Some(format!(
                        "`{class}` both has and lacks `{relation}` {filler}"
                    ));
                }
            }
        }
        None
    }
}

impl Reasoner for StructuralReasoner {
    fn classify(&self) -> Result<(), ReasonerError> {
        for class in &self.classes {
            if let Some(reason) = self.conflict(class) {
                return Err(ReasonerError::Inconsistent { reason });
            }
        }
        tracing::debug!(classes = self.classes.len(), "structural_reasoner_classified");
        Ok(())
    }

    fn sub_classes(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri> {
        let below: BTreeSet<Iri> = self
            .classes
            .iter()
            .filter(|class| {
                self.is_strict(&ClassExpression::Named((*class).clone()), expression)
            })
            .cloned()
            .collect();

        if !direct {
            let mut below = below;
            below.insert(Iri::nothing());
            return below;
        }

        let mut maximal: BTreeSet<Iri> = below
            .iter()
            .filter(|class| {
                !below.iter().any(|other| {
                    other != *class && self.named_strictly_below(class, other)
                })
            })
            .cloned()
            .collect();
        if maximal.is_empty() {
            maximal.insert(Iri::nothing());
        }
        maximal
    }

    fn super_classes(&self, expression: &ClassExpression, direct: bool) -> BTreeSet<Iri> {
        let above: BTreeSet<Iri> = self
            .classes
            .iter()
            .chain(std::iter::once(&Iri::thing()))
            .filter(|class| {
                self.is_strict(expression, &ClassExpression::Named((*class).clone()))
            })
            .cloned()
            .collect();

        if !direct {
            return above;
        }

        above
            .iter()
            .filter(|class| {
                !above.iter().any(|other| {
                    other != *class && self.named_strictly_below(other, class)
                })
            })
            .cloned()
            .collect()
    }

    fn is_entailed(&self, axiom: &Axiom) -> bool {
        match axiom {
            Axiom::SubClassOf { sub, sup } => self.subsumes(sub, sup),
            Axiom::EquivalentClasses(left, right) => {
                self.subsumes(left, right) && self.subsumes(right, left)
            }
        }
    }
}

impl StructuralReasoner {
    fn named_strictly_below(&self, sub: &Iri, sup: &Iri) -> bool {
        if sup.is_thing() {
            return !sub.is_thing();
        }
        let below = |a: &Iri, b: &Iri| self.ancestors.get(a).is_some_and(|above| above.contains(b));
        below(sub, sup) && !below(sup, sub)
    }
}

fn split_conjuncts(
    expression: &ClassExpression,
    parents: &mut BTreeSet<Iri>,
    restrictions: &mut Vec<ClassExpression>,
) {
    match expression {
        ClassExpression::Named(iri) if iri.is_thing() || iri.is_nothing() => {}
        ClassExpression::Named(iri) => {
            parents.insert(iri.clone());
        }
        ClassExpression::Intersection(parts) => {
            for part in parts {
                split_conjuncts(part, parents, restrictions);
            }
        }
        other => {
            if !restrictions.contains(other) {
                restrictions.push(other.clone());
            }
        }
    }
}

fn transitive_parents(start: &Iri, parents: &BTreeMap<Iri, BTreeSet<Iri>>) -> BTreeSet<Iri> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&Iri> = parents.get(start).into_iter().flatten().collect();
    while let Some(current) = stack.pop() {
        if seen.insert(current.clone()) {
            stack.extend(parents.get(current).into_iter().flatten());
        }
    }
    seen
}
