//! External identifier formats.
//!
//! A KiSAO term is written as a bare seven digit code, optionally prefixed by
//! `KISAO_` or `KISAO:` and by a namespace (`kisao:`, the MIRIAM URN or the
//! term IRI namespace). All of them resolve to the same term IRI.

use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::vocabulary::{term, NAMESPACE};
use crate::ontology::Iri;

/// MIRIAM URN prefix of KiSAO terms.
pub const URN_PREFIX: &str = "urn:miriam:biomodels.kisao:";

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:urn:miriam:biomodels\.kisao:|kisao:|http://www\.biomodels\.net/kisao/KISAO#)?(?:KISAO_|KISAO:)?(\d{7})\s*$",
    )
    .expect("Invalid regex")
});

static FRAGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^KISAO_(\d{7})$").expect("Invalid regex"));

/// Textual form used when rendering an identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum IdDialect {
    /// `KISAO_0000029`
    Kisao,
    /// `KISAO:0000029`, as used by SED-ML.
    #[default]
    Sedml,
    /// `0000029`
    Code,
    /// `29`
    Integer,
}

impl Display for IdDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kisao => f.write_str("kisao"),
            Self::Sedml => f.write_str("sedml"),
            Self::Code => f.write_str("code"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// Resolves any accepted identifier form to the term IRI.
///
/// Returns `None` for input that does not match the identifier grammar. The
/// term is not required to exist.
#[must_use]
pub fn resolve(id: &str) -> Option<Iri> {
    let digits = ID_PATTERN.captures(id)?.get(1)?.as_str();
    Some(term(&format!("KISAO_{digits}")))
}

/// Seven digit code of a KiSAO term IRI.
#[must_use]
pub fn code(iri: &Iri) -> Option<&str> {
    if !iri.as_str().starts_with(NAMESPACE) {
        return None;
    }
    let fragment = iri.fragment()?;
    FRAGMENT_PATTERN
        .captures(fragment)?
        .get(1)
        .map(|digits| digits.as_str())
}

/// Renders the identifier of a KiSAO term in `dialect`.
#[must_use]
pub fn format_id(iri: &Iri, dialect: IdDialect) -> Option<String> {
    let digits = code(iri)?;
    match dialect {
        IdDialect::Kisao => Some(format!("KISAO_{digits}")),
        IdDialect::Sedml => Some(format!("KISAO:{digits}")),
        IdDialect::Code => Some(digits.to_owned()),
        IdDialect::Integer => digits.parse::<u32>().ok().map(|value| value.to_string()),
    }
}

/// MIRIAM URN of a term, built from its fragment.
#[must_use]
pub fn urn(iri: &Iri) -> Option<String> {
    iri.fragment().map(|fragment| format!("{URN_PREFIX}{fragment}"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{code, format_id, resolve, urn, IdDialect};
    use crate::ontology::Iri;

    const TAU_LEAPING: &str = "http://www.biomodels.net/kisao/KISAO#KISAO_0000039";

    #[rstest]
    #[case("0000039")]
    #[case("KISAO_0000039")]
    #[case("KISAO:0000039")]
    #[case("kisao:KISAO_0000039")]
    #[case("urn:miriam:biomodels.kisao:KISAO_0000039")]
    #[case("http://www.biomodels.net/kisao/KISAO#KISAO_0000039")]
    #[case("  kisao_0000039 ")]
    fn accepted_forms_resolve_to_the_term(#[case] input: &str) {
        assert_eq!(resolve(input).map(String::from), Some(TAU_LEAPING.to_owned()));
    }

    #[rstest]
    #[case("")]
    #[case("39")]
    #[case("00000390")]
    #[case("KISAO-0000039")]
    #[case("go:KISAO_0000039")]
    #[case("KISAO_0000039 trailing")]
    fn malformed_input_is_rejected(#[case] input: &str) {
        assert_eq!(resolve(input), None);
    }

    #[rstest]
    #[case(IdDialect::Kisao, "KISAO_0000039")]
    #[case(IdDialect::Sedml, "KISAO:0000039")]
    #[case(IdDialect::Code, "0000039")]
    #[case(IdDialect::Integer, "39")]
    fn dialects_render_the_code(#[case] dialect: IdDialect, #[case] expected: &str) {
        let iri = Iri::new(TAU_LEAPING).expect("valid iri");
        assert_eq!(format_id(&iri, dialect).as_deref(), Some(expected));
    }

    #[test]
    fn code_round_trips_through_resolution() {
        let iri = resolve("0000039").expect("resolves");
        assert_eq!(code(&iri), Some("0000039"));
    }

    #[test]
    fn foreign_terms_have_no_code() {
        let iri = Iri::new("http://example.org/onto#KISAO_0000039").expect("valid iri");
        assert_eq!(code(&iri), None);
        assert_eq!(format_id(&iri, IdDialect::Kisao), None);
    }

    #[test]
    fn urn_uses_the_fragment() {
        let iri = Iri::new(TAU_LEAPING).expect("valid iri");
        assert_eq!(
            urn(&iri).as_deref(),
            Some("urn:miriam:biomodels.kisao:KISAO_0000039")
        );
    }
}
