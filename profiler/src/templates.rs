//! Query template stores.
//!
//! A store hands out the ordered templates registered for a
//! [`ProfilerKind`]. Template bodies lack the shared prefix block and still
//! carry their placeholders; see [`resolver`](crate::resolver).

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ProfilingError, Result};
use crate::strategy::ProfilerKind;

/// A named, unsubstituted query body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    /// Identifier used in logs and reports (the file name).
    pub name: String,
    /// Query text without the prefix block.
    pub body: String,
}

impl QueryTemplate {
    /// Creates a template.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Read-only source of query templates, grouped by profiler kind.
pub trait TemplateStore {
    /// Returns the templates registered for `kind`, in execution order.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::Template`] if the templates cannot be read.
    fn templates(&self, kind: ProfilerKind) -> Result<Vec<QueryTemplate>>;
}

const HCLS: &[(&str, &str)] = &[
    ("01_triples.rq", include_str!("../queries/hcls/01_triples.rq")),
    ("02_entities.rq", include_str!("../queries/hcls/02_entities.rq")),
    (
        "03_distinct_subjects_objects.rq",
        include_str!("../queries/hcls/03_distinct_subjects_objects.rq"),
    ),
    (
        "04_classes_properties.rq",
        include_str!("../queries/hcls/04_classes_properties.rq"),
    ),
    (
        "05_class_partitions.rq",
        include_str!("../queries/hcls/05_class_partitions.rq"),
    ),
    (
        "06_property_partitions.rq",
        include_str!("../queries/hcls/06_property_partitions.rq"),
    ),
    (
        "07_typed_relations.rq",
        include_str!("../queries/hcls/07_typed_relations.rq"),
    ),
];

const BIO2RDF: &[(&str, &str)] = &[
    (
        "01_type_counts.rq",
        include_str!("../queries/bio2rdf/01_type_counts.rq"),
    ),
    (
        "02_predicate_counts.rq",
        include_str!("../queries/bio2rdf/02_predicate_counts.rq"),
    ),
    (
        "03_identifier_namespaces.rq",
        include_str!("../queries/bio2rdf/03_identifier_namespaces.rq"),
    ),
];

/// Templates compiled into the binary from `queries/<kind>/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateStore for EmbeddedTemplates {
    fn templates(&self, kind: ProfilerKind) -> Result<Vec<QueryTemplate>> {
        let table = match kind {
            ProfilerKind::Hcls => HCLS,
            ProfilerKind::Bio2rdf => BIO2RDF,
        };
        Ok(table
            .iter()
            .map(|(name, body)| QueryTemplate::new(*name, *body))
            .collect())
    }
}

/// Templates read from `<root>/<kind>/`, one query per file, ordered by
/// file name. Hidden files are ignored.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryTemplates {
    fn templates(&self, kind: ProfilerKind) -> Result<Vec<QueryTemplate>> {
        let dir = self.root.join(kind.as_str());
        let template_error = |reason: String| ProfilingError::Template {
            kind: kind.as_str().to_string(),
            reason,
        };

        if !dir.is_dir() {
            return Err(template_error(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| template_error(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !entry.file_type().is_file() || name.starts_with('.') {
                continue;
            }
            let body = fs::read_to_string(entry.path()).map_err(|e| {
                template_error(format!("failed to read {}: {}", entry.path().display(), e))
            })?;
            templates.push(QueryTemplate::new(name, body));
        }

        Ok(templates)
    }
}
