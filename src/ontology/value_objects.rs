use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";

/// Absolute IRI checked against RDF syntax on construction.
///
/// IRIs are the identity of every entity, relation and datatype in the
/// knowledge base; display names are only annotations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Parses `value`, rejecting anything `oxrdf` does not accept as a named node.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Builds an [`Iri`] without validation.
    ///
    /// Reserved for identifiers assembled from known-good prefixes, such as the
    /// vocabulary constants and identifiers produced by the resolver.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The synthetic top class, `owl:Thing`.
    #[must_use]
    pub fn thing() -> Self {
        Self::new_unchecked(OWL_THING)
    }

    /// The synthetic bottom class, `owl:Nothing`.
    #[must_use]
    pub fn nothing() -> Self {
        Self::new_unchecked(OWL_NOTHING)
    }

    #[must_use]
    pub fn is_thing(&self) -> bool {
        self.value == OWL_THING
    }

    #[must_use]
    pub fn is_nothing(&self) -> bool {
        self.value == OWL_NOTHING
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the local part after the last `#` or `/`, if it is not empty.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        let index = self.value.rfind(['#', '/'])?;
        let fragment = &self.value[index + 1..];
        (!fragment.is_empty()).then_some(fragment)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.value
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    #[error("`{value}` is not an absolute IRI")]
    Invalid { value: String },
}

#[cfg(test)]
mod tests {
    use super::Iri;

    #[test]
    fn kisao_terms_parse_with_their_fragment() {
        let iri = Iri::new("http://www.biomodels.net/kisao/KISAO#KISAO_0000039").expect("valid IRI");
        assert_eq!(iri.as_str(), "http://www.biomodels.net/kisao/KISAO#KISAO_0000039");
        assert_eq!(iri.fragment(), Some("KISAO_0000039"));
    }

    #[test]
    fn relative_text_is_rejected() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn fragment_falls_back_to_last_path_segment() {
        let iri = Iri::new("http://biomodels.net/kisao/KISAO").expect("valid IRI");
        assert_eq!(iri.fragment(), Some("KISAO"));
        let iri = Iri::new("http://biomodels.net/kisao/").expect("valid IRI");
        assert_eq!(iri.fragment(), None);
    }

    #[test]
    fn synthetic_bounds_are_recognised() {
        assert!(Iri::thing().is_thing());
        assert!(Iri::nothing().is_nothing());
        assert!(!Iri::thing().is_nothing());
    }

    #[test]
    fn deserializes_through_validation() {
        let iri: Iri = serde_json::from_str("\"http://example.org/a\"").expect("valid");
        assert_eq!(iri.as_str(), "http://example.org/a");
        assert!(serde_json::from_str::<Iri>("\"not an iri\"").is_err());
    }
}
