//! Query engine over the Kinetic Simulation Algorithm Ontology (KiSAO).
//!
//! The crate loads a pre-extracted snapshot of the ontology, classifies it
//! with a pluggable [`ontology::Reasoner`] and answers questions about
//! algorithms, their characteristics and their parameters:
//!
//! ```no_run
//! use kisao::kisao::{IdDialect, Kisao};
//!
//! # fn main() -> kisao::Result<()> {
//! let kisao = Kisao::from_path(std::path::Path::new("kisao.yaml"))?;
//! if let Some(tau) = kisao.find_by_name("tau-leaping method") {
//!     for similar in kisao.most_similar_algorithms(&tau, Some(5), &[]) {
//!         println!("{:?} {:.3}", kisao.id(&similar.iri, IdDialect::Sedml), similar.distance);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod kisao;
pub mod logger;
pub mod ontology;
pub mod query;
#[cfg(any(test, feature = "testing"))]
pub mod tests_cfg;

pub use error::{Error, Result};
