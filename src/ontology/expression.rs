//! Class expressions and the axioms built from them.
//!
//! Expressions are plain values: leaves are always named classes or named
//! datatypes, inner nodes are the combinators the query layer understands.
//! Consumers walk them with a single `match`, so adding a node kind is a
//! compile error everywhere it has to be handled.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::value_objects::Iri;

/// Whether a relation is asserted (`has`) or negated (`lacks`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl From<bool> for Polarity {
    fn from(positive: bool) -> Self {
        if positive {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// Target of a quantified restriction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filler {
    /// Object restrictions range over classes.
    Class(Box<ClassExpression>),
    /// Data restrictions range over a named datatype such as `xsd:boolean`.
    Datatype(Iri),
}

impl Filler {
    /// Filler pointing at a named class.
    #[must_use]
    pub fn class(iri: Iri) -> Self {
        Self::Class(Box::new(ClassExpression::Named(iri)))
    }

    /// Returns the IRI of a named filler; anonymous class fillers yield `None`.
    #[must_use]
    pub fn named(&self) -> Option<&Iri> {
        match self {
            Self::Class(expression) => expression.as_named(),
            Self::Datatype(iri) => Some(iri),
        }
    }
}

impl Display for Filler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(expression) if expression.is_anonymous() => write!(f, "({expression})"),
            Self::Class(expression) => write!(f, "{expression}"),
            Self::Datatype(iri) => write!(f, "<{iri}>"),
        }
    }
}

/// Quantified restriction over a single relation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Restriction {
    pub relation: Iri,
    pub filler: Filler,
}

impl Restriction {
    #[must_use]
    pub fn new(relation: Iri, filler: Filler) -> Self {
        Self { relation, filler }
    }
}

/// Composite class description used both in told axioms and in queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassExpression {
    /// A named class.
    Named(Iri),
    /// Conjunction of the operands.
    Intersection(Vec<ClassExpression>),
    /// Negation of the operand.
    Complement(Box<ClassExpression>),
    /// `relation some filler`.
    Exists(Restriction),
    /// `relation only filler`.
    Universal(Restriction),
    /// `relation exactly n filler`.
    Cardinality {
        cardinality: u32,
        relation: Iri,
        filler: Filler,
    },
}

impl ClassExpression {
    #[must_use]
    pub fn named(iri: Iri) -> Self {
        Self::Named(iri)
    }

    /// The synthetic top class.
    #[must_use]
    pub fn thing() -> Self {
        Self::Named(Iri::thing())
    }

    /// `relation some value` over a named class.
    #[must_use]
    pub fn some(relation: Iri, value: Iri) -> Self {
        Self::Exists(Restriction::new(relation, Filler::class(value)))
    }

    /// Binary conjunction `self and other`.
    ///
    /// Operands are kept in call order rather than flattened so repeated folds
    /// produce the same nested shape every time.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::Intersection(vec![self, other])
    }

    /// Negation `not self`.
    #[must_use]
    pub fn complement(self) -> Self {
        Self::Complement(Box::new(self))
    }

    #[must_use]
    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            Self::Named(iri) => Some(iri),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        !matches!(self, Self::Named(_))
    }
}

impl From<Iri> for ClassExpression {
    fn from(iri: Iri) -> Self {
        Self::Named(iri)
    }
}

impl Display for ClassExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => write!(f, "<{iri}>"),
            Self::Intersection(operands) => {
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" and ")?;
                    }
                    if operand.is_anonymous() {
                        write!(f, "({operand})")?;
                    } else {
                        write!(f, "{operand}")?;
                    }
                }
                Ok(())
            }
            Self::Complement(operand) if operand.is_anonymous() => write!(f, "not ({operand})"),
            Self::Complement(operand) => write!(f, "not {operand}"),
            Self::Exists(Restriction { relation, filler }) => {
                write!(f, "<{relation}> some {filler}")
            }
            Self::Universal(Restriction { relation, filler }) => {
                write!(f, "<{relation}> only {filler}")
            }
            Self::Cardinality {
                cardinality,
                relation,
                filler,
            } => write!(f, "<{relation}> exactly {cardinality} {filler}"),
        }
    }
}

/// Logical statements the reasoner can be asked about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// `sub` is subsumed by `sup`.
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    /// Both expressions denote the same class.
    EquivalentClasses(ClassExpression, ClassExpression),
}

impl Axiom {
    #[must_use]
    pub fn sub_class_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf {
            sub: sub.into(),
            sup: sup.into(),
        }
    }

    #[must_use]
    pub fn equivalent(left: impl Into<ClassExpression>, right: impl Into<ClassExpression>) -> Self {
        Self::EquivalentClasses(left.into(), right.into())
    }
}
