//! Well-known KiSAO terms.

use crate::ontology::Iri;

/// Namespace every KiSAO term lives in.
pub const NAMESPACE: &str = "http://www.biomodels.net/kisao/KISAO#";
/// Identifier of the ontology itself.
pub const ONTOLOGY: &str = "http://www.biomodels.net/kisao/KISAO";

pub const ALGORITHM: &str = "KISAO_0000000";
pub const CHARACTERISTIC: &str = "KISAO_0000097";
pub const PARAMETER: &str = "KISAO_0000201";
pub const HAS_CHARACTERISTIC: &str = "KISAO_0000245";
pub const IS_HYBRID_OF: &str = "KISAO_0000246";
pub const HAS_TYPE: &str = "KISAO_0000251";
pub const HAS_PARAMETER: &str = "KISAO_0000259";
pub const USES: &str = "KISAO_0000360";

/// KiSAO term for a `KISAO_nnnnnnn` fragment.
pub(crate) fn term(fragment: &str) -> Iri {
    Iri::new_unchecked(format!("{NAMESPACE}{fragment}"))
}

/// Roots and relations the facade queries through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    pub algorithm: Iri,
    pub characteristic: Iri,
    pub parameter: Iri,
    pub has_characteristic: Iri,
    pub has_parameter: Iri,
    pub is_hybrid_of: Iri,
    pub uses: Iri,
    pub has_type: Iri,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            algorithm: term(ALGORITHM),
            characteristic: term(CHARACTERISTIC),
            parameter: term(PARAMETER),
            has_characteristic: term(HAS_CHARACTERISTIC),
            has_parameter: term(HAS_PARAMETER),
            is_hybrid_of: term(IS_HYBRID_OF),
            uses: term(USES),
            has_type: term(HAS_TYPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Vocabulary;
    use crate::ontology::Iri;

    #[test]
    fn default_terms_are_valid_iris() {
        let vocabulary = Vocabulary::default();
        for term in [
            &vocabulary.algorithm,
            &vocabulary.characteristic,
            &vocabulary.parameter,
            &vocabulary.has_characteristic,
            &vocabulary.has_parameter,
            &vocabulary.is_hybrid_of,
            &vocabulary.uses,
            &vocabulary.has_type,
        ] {
            assert_eq!(&Iri::new(term.as_str()).expect("valid iri"), term);
        }
        assert_eq!(vocabulary.algorithm.fragment(), Some("KISAO_0000000"));
    }
}
