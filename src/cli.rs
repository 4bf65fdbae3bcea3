//! Command line front end.
//!
//! ```bash
//! kisao --config kisao.config.yaml lookup "tau-leaping method"
//! kisao --knowledge-base kisao.yaml similar KISAO:0000039 --limit 5
//! kisao characteristics KISAO_0000039 --negative
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::config::Config;
use crate::kisao::{IdDialect, Kisao};
use crate::ontology::{Iri, Polarity};
use crate::{logger, Error, Result};

/// Query the Kinetic Simulation Algorithm Ontology
#[derive(Parser, Debug)]
#[command(name = "kisao")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Knowledge base snapshot, overriding the configured one
    #[arg(short, long, global = true)]
    pub knowledge_base: Option<PathBuf>,

    /// Identifier form used in the output
    #[arg(long, value_enum, default_value_t = IdDialect::Sedml, global = true)]
    pub dialect: IdDialect,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find terms by name, synonym or identifier
    Lookup { query: String },
    /// Show the annotations of a term
    Show { term: String },
    /// Print the identifier of a term in every dialect
    Id { term: String },
    /// List the superclasses of a term
    Ancestors {
        term: String,
        /// Only direct superclasses
        #[arg(long)]
        direct: bool,
    },
    /// List the subclasses of a term
    Descendants {
        term: String,
        /// Only direct subclasses
        #[arg(long)]
        direct: bool,
    },
    /// List the characteristics of an algorithm
    Characteristics {
        term: String,
        /// Characteristics the algorithm explicitly lacks
        #[arg(long)]
        negative: bool,
    },
    /// List the parameters of an algorithm with their value types
    Parameters { term: String },
    /// Rank algorithms by characteristic similarity
    Similar {
        term: String,
        /// Maximum number of results, defaults to the configured limit
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Parses the process arguments, runs the command and maps failures to an
/// exit code.
#[must_use]
pub fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return report(&err),
    };
    if let Err(err) = logger::init(&config.logger) {
        return report(&err);
    }

    let stdout = io::stdout();
    match run(&cli, &config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "error:".red().bold());
    ExitCode::FAILURE
}

/// Reads `path`, or falls back to the defaults when no file is given.
///
/// # Errors
///
/// Fails when the configuration file cannot be loaded.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Knowledge base location: the command line override, else the configured
/// path resolved against the directory of the configuration file.
#[must_use]
pub fn knowledge_base_path(cli: &Cli, config: &Config) -> PathBuf {
    if let Some(path) = &cli.knowledge_base {
        return path.clone();
    }
    let base = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    config.knowledge_base_path(base)
}

/// Executes `cli.command`, writing the results to `out`.
///
/// # Errors
///
/// Fails when the knowledge base cannot be loaded, a term does not resolve or
/// writing to `out` fails.
pub fn run(cli: &Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    let kisao = Kisao::from_path(&knowledge_base_path(cli, config))?;
    let printer = Printer {
        kisao: &kisao,
        dialect: cli.dialect,
    };

    match &cli.command {
        Command::Lookup { query } => {
            let mut found = kisao.search_by_name(query);
            if let Some(iri) = kisao.search_by_id(query) {
                found.insert(iri);
            }
            printer.terms(out, found.iter())
        }
        Command::Show { term } => printer.show(out, &resolve(&kisao, term)?),
        Command::Id { term } => {
            let iri = resolve(&kisao, term)?;
            for dialect in [IdDialect::Kisao, IdDialect::Sedml, IdDialect::Code, IdDialect::Integer] {
                if let Some(id) = kisao.id(&iri, dialect) {
                    writeln!(out, "{}\t{id}", dialect.to_string().green())?;
                }
            }
            if let Some(urn) = kisao.urn(&iri) {
                writeln!(out, "{}\t{urn}", "urn".green())?;
            }
            writeln!(out, "{}\t{iri}", "iri".green())?;
            Ok(())
        }
        Command::Ancestors { term, direct } => {
            let iri = resolve(&kisao, term)?;
            printer.terms(out, kisao.engine().ancestors(&iri, *direct).iter())
        }
        Command::Descendants { term, direct } => {
            let iri = resolve(&kisao, term)?;
            printer.terms(out, kisao.engine().descendants(&iri, *direct).iter())
        }
        Command::Characteristics { term, negative } => {
            let iri = resolve(&kisao, term)?;
            let polarity = Polarity::from(!negative);
            printer.terms(out, kisao.characteristics(&iri, polarity, &[]).iter())
        }
        Command::Parameters { term } => {
            let iri = resolve(&kisao, term)?;
            for parameter in kisao.parameters(&iri) {
                let kind = kisao
                    .parameter_type(&parameter)
                    .map_or_else(|| "-".to_string(), |kind| kind.to_string());
                writeln!(out, "{}\t{}", printer.line(&parameter), kind.cyan())?;
            }
            Ok(())
        }
        Command::Similar { term, limit } => {
            let iri = resolve(&kisao, term)?;
            let limit = limit.or(config.similarity.default_limit);
            for similar in kisao.most_similar_algorithms(&iri, limit, &[]) {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    format!("{:.3}", similar.distance).yellow(),
                    similar.shared,
                    printer.line(&similar.iri)
                )?;
            }
            Ok(())
        }
    }
}

/// Resolves an identifier in any accepted form, then falls back to names.
fn resolve(kisao: &Kisao, term: &str) -> Result<Iri> {
    kisao
        .search_by_id(term)
        .or_else(|| kisao.find_by_name(term))
        .ok_or_else(|| Error::Message(format!("no KiSAO term matches `{term}`")))
}

struct Printer<'a> {
    kisao: &'a Kisao,
    dialect: IdDialect,
}

impl Printer<'_> {
    fn line(&self, iri: &Iri) -> String {
        let id = self
            .kisao
            .id(iri, self.dialect)
            .unwrap_or_else(|| iri.to_string());
        let name = self.kisao.name(iri).unwrap_or_default();
        if self.kisao.is_deprecated(iri) {
            format!("{}\t{} {}", id.bold(), name, "(deprecated)".dimmed())
        } else {
            format!("{}\t{}", id.bold(), name)
        }
    }

    fn terms<'i>(&self, out: &mut impl Write, iris: impl Iterator<Item = &'i Iri>) -> Result<()> {
        for iri in iris {
            writeln!(out, "{}", self.line(iri))?;
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write, iri: &Iri) -> Result<()> {
        writeln!(out, "{}", self.line(iri))?;
        writeln!(out, "{}\t{}", "kind".green(), self.kisao.kind(iri))?;
        if let Some(urn) = self.kisao.urn(iri) {
            writeln!(out, "{}\t{urn}", "urn".green())?;
        }
        if let Some(definition) = self.kisao.definition(iri) {
            writeln!(out, "{}\t{definition}", "definition".green())?;
        }
        for synonym in self.kisao.all_synonyms(iri) {
            writeln!(out, "{}\t{synonym}", "synonym".green())?;
        }
        for (url, description) in self.kisao.links(iri).into_iter().flatten() {
            writeln!(out, "{}\t{url} {description}", "link".green())?;
        }
        Ok(())
    }
}
