//! `sparql-profiler`: generates descriptive metadata (classes, properties,
//! typed relations and their counts) for the graphs of a SPARQL endpoint.
//!
//! **Usage:**
//! ```
//! sparql-profiler profile [ENDPOINT] [-g <graph>] [--profiler aggregate|hcls|bio2rdf] [-o <file>]
//! sparql-profiler queries [--profiler hcls|bio2rdf] [--queries <dir>]
//! ```
//!
//! Logs go to stderr; the metadata goes to the output file or stdout.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

mod logging;
mod prompt;

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sparql_profiler::serializer::{ntriples, turtle};
use sparql_profiler::{
    describe_dataset, DirectoryTemplates, EmbeddedTemplates, HttpEndpointClient, MetadataDocument,
    Profiler, ProfilerConfig, ProfilingStrategy, TemplateStore,
};
use tracing::{info, warn};

/// Profile SPARQL endpoints into HCLS/VoID metadata.
#[derive(Parser)]
#[command(
    name = "sparql-profiler",
    version,
    about = "Generate descriptive metadata for the graphs of a SPARQL endpoint"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Profile an endpoint and print or store the metadata.
    Profile(ProfileArgs),
    /// List the queries a profiler runs for each graph.
    Queries(QueriesArgs),
}

/// Output serialization.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Turtle,
    Ntriples,
}

#[derive(Args)]
struct ProfileArgs {
    /// SPARQL endpoint to profile.
    endpoint: Option<String>,

    /// Compute metadata only for this graph (all graphs by default).
    #[arg(short, long)]
    graph: Option<String>,

    /// URI of the dataset distribution to describe.
    #[arg(long)]
    dataset_uri: Option<String>,

    /// Profiler to use: aggregate, hcls or bio2rdf.
    #[arg(long)]
    profiler: Option<String>,

    /// Directory holding `<profiler>/*.rq` templates to use instead of the built-in ones.
    #[arg(long, value_name = "DIR")]
    queries: Option<PathBuf>,

    /// Ask questions to describe the dataset before profiling.
    #[arg(long)]
    create_dataset: bool,

    /// JSON file answering the dataset questions.
    #[arg(long, value_name = "FILE", conflicts_with = "create_dataset")]
    metadata: Option<PathBuf>,

    /// Output file; printed to stdout if not given.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output serialization.
    #[arg(long, value_enum, default_value_t = Format::Turtle)]
    format: Format,

    /// Log level: DEBUG, INFO, WARN or ERROR. RUST_LOG takes precedence.
    #[arg(short, long = "log", default_value = "INFO")]
    log: String,

    /// TOML configuration file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Leave out the Virtuoso system graphs.
    #[arg(long)]
    skip_system_graphs: bool,
}

impl ProfileArgs {
    /// Merges the flags over the configuration file, if any.
    fn config(&self) -> Result<ProfilerConfig> {
        let mut config = match &self.config {
            Some(path) => ProfilerConfig::load(path)?,
            None => ProfilerConfig::default(),
        };
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(graph) = &self.graph {
            config.graph = Some(graph.clone());
        }
        if let Some(uri) = &self.dataset_uri {
            config.dataset_uri = Some(uri.clone());
        }
        if let Some(profiler) = &self.profiler {
            config.profiler = profiler.clone();
        }
        if let Some(dir) = &self.queries {
            config.queries = Some(dir.clone());
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
        config.skip_system_graphs |= self.skip_system_graphs;
        Ok(config)
    }
}

#[derive(Args)]
struct QueriesArgs {
    /// Profiler whose queries to list.
    #[arg(long, default_value = "hcls")]
    profiler: String,

    /// Directory holding `<profiler>/*.rq` templates.
    #[arg(long, value_name = "DIR")]
    queries: Option<PathBuf>,
}

fn template_store(dir: Option<&PathBuf>) -> Box<dyn TemplateStore> {
    match dir {
        Some(dir) => Box::new(DirectoryTemplates::new(dir)),
        None => Box::new(EmbeddedTemplates),
    }
}

fn profile(args: ProfileArgs) -> Result<()> {
    logging::init(&args.log)?;

    let config = args.config()?;
    let mut request = config.validate()?;
    let client = HttpEndpointClient::new(request.endpoint.clone(), config.timeout())
        .context("Failed to create the HTTP client")?;

    let mut document = MetadataDocument::new();
    let description = match (&args.metadata, args.create_dataset) {
        (Some(path), _) => Some(prompt::load(path)?),
        (None, true) => Some(prompt::ask(
            &mut io::stdin().lock(),
            &mut io::stderr(),
            request.distribution_uri.is_none(),
        )?),
        (None, false) => None,
    };
    if let Some(description) = description {
        if request.distribution_uri.is_none() {
            request.distribution_uri = description.distribution().map(str::to_string);
        }
        let added = describe_dataset(
            &description,
            &request.endpoint,
            request.fallback_iri(),
            &mut document,
        );
        info!(triples = added, distribution = %request.fallback_iri(), "Added dataset description");
    }

    let templates = template_store(config.queries.as_ref());
    let report = Profiler::new(&client, templates.as_ref()).profile(&request, &mut document)?;
    if !report.all_succeeded() {
        warn!(
            failed = report.failure_count(),
            total = report.outcomes.len(),
            "Some queries failed; their metadata is missing from the output"
        );
    }

    let text = match args.format {
        Format::Turtle => turtle::to_turtle(&document),
        Format::Ntriples => ntriples::to_ntriples(&document),
    };
    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Metadata stored to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn list_queries(args: QueriesArgs) -> Result<()> {
    let strategy: ProfilingStrategy = args.profiler.parse()?;
    let Some(kind) = strategy.kind() else {
        println!("{}: one generated query per graph", strategy);
        return Ok(());
    };
    let templates = template_store(args.queries.as_ref()).templates(kind)?;
    for template in &templates {
        println!("{}", template.name);
    }
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Profile(args) => profile(args),
        Command::Queries(args) => list_queries(args),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    fn profile_args(argv: &[&str]) -> ProfileArgs {
        let mut full = vec!["sparql-profiler", "profile"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Profile(args) => args,
            Command::Queries(_) => unreachable!(),
        }
    }

    #[test]
    fn defaults_profile_the_default_endpoint() {
        let config = profile_args(&[]).config().unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let config = profile_args(&[
            "https://bio2rdf.org/sparql",
            "--profiler",
            "bio2rdf",
            "-g",
            "http://bio2rdf.org/drugbank_resource:bio2rdf.dataset.drugbank.R3",
            "--timeout",
            "60",
            "--skip-system-graphs",
        ])
        .config()
        .unwrap();
        assert_eq!(config.endpoint, "https://bio2rdf.org/sparql");
        assert_eq!(config.profiler, "bio2rdf");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.skip_system_graphs);
        assert!(config.graph.is_some());
    }

    #[test]
    fn metadata_conflicts_with_prompt() {
        assert!(Cli::try_parse_from([
            "sparql-profiler",
            "profile",
            "--create-dataset",
            "--metadata",
            "answers.json",
        ])
        .is_err());
    }
}
