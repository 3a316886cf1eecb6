//! Namespace prefix bindings used to make serialized metadata readable.
//!
//! Bindings only affect serialization; triples always carry absolute IRIs.

use crate::model::iris::*;

/// A prefix bound to a namespace IRI (e.g., `void` → `http://rdfs.org/ns/void#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// The prefix label without the trailing colon.
    pub prefix: String,
    /// The full namespace IRI.
    pub iri: String,
}

impl Namespace {
    /// Creates a new binding.
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Prefixes bound on every new metadata document.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("rdf", RDF),
    ("rdfs", RDFS),
    ("xsd", XSD),
    ("owl", OWL),
    ("dct", DCT),
    ("dctypes", DCTYPES),
    ("dcat", DCAT),
    ("void", VOID),
    ("void-ext", VOID_EXT),
    ("foaf", FOAF),
    ("schema", SCHEMA),
    ("pav", PAV),
    ("idot", IDOT),
    ("dqv", DQV),
    ("hcls", HCLS),
    ("skos", SKOS),
    ("prov", PROV),
    ("d2s", D2S),
];

/// Returns the default bindings as owned [`Namespace`] values.
#[must_use]
pub fn default_namespaces() -> Vec<Namespace> {
    DEFAULT_PREFIXES
        .iter()
        .map(|(prefix, iri)| Namespace::new(*prefix, *iri))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefixes_unique() {
        let mut seen = std::collections::HashSet::new();
        for (prefix, _) in DEFAULT_PREFIXES {
            assert!(seen.insert(prefix), "Duplicate prefix: {}", prefix);
        }
    }

    #[test]
    fn default_iris_unique() {
        let mut seen = std::collections::HashSet::new();
        for (_, iri) in DEFAULT_PREFIXES {
            assert!(seen.insert(iri), "Duplicate namespace IRI: {}", iri);
        }
    }
}
