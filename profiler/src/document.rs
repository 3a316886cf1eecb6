//! The accumulated metadata document.

use std::collections::btree_set;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::endpoint::Endpoint;
use crate::model::{iris, Term, Triple};
use crate::namespaces::{default_namespaces, Namespace};

/// A growing set of triples plus the prefix bindings used to serialize it.
///
/// Triples are only ever added. Adding a triple that is already present is
/// a no-op, so merging the same results twice leaves the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    triples: BTreeSet<Triple>,
    namespaces: Vec<Namespace>,
}

impl MetadataDocument {
    /// Creates an empty document with the default prefix bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triples: BTreeSet::new(),
            namespaces: default_namespaces(),
        }
    }

    /// Binds `prefix` to `iri`, replacing an existing binding of `prefix`.
    pub fn bind(&mut self, prefix: &str, iri: &str) {
        match self.namespaces.iter_mut().find(|ns| ns.prefix == prefix) {
            Some(ns) => ns.iri = iri.to_string(),
            None => self.namespaces.push(Namespace::new(prefix, iri)),
        }
    }

    /// Returns the prefix bindings in binding order.
    #[must_use]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Adds one triple. Returns true if it was not already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Adds `triples` by set union. Returns how many were new.
    pub fn merge<I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = Triple>,
    {
        let before = self.triples.len();
        self.triples.extend(triples);
        self.triples.len() - before
    }

    /// Stamps `<endpoint> dct:issued "<today>"^^xsd:date`.
    ///
    /// Call once, after every graph has been profiled.
    pub fn finalize(&mut self, endpoint: &Endpoint) {
        self.finalize_on(endpoint, chrono::Local::now().date_naive());
    }

    /// Same as [`finalize`](Self::finalize) with an explicit issue date.
    pub fn finalize_on(&mut self, endpoint: &Endpoint, issued: NaiveDate) {
        self.insert(Triple::new(
            Term::iri(endpoint.url()),
            Term::iri(iris::DCT_ISSUED),
            Term::typed(issued.format("%Y-%m-%d").to_string(), iris::XSD_DATE),
        ));
    }

    /// Returns true if `triple` is in the document.
    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Returns the number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the document holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over the triples in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, Triple> {
        self.triples.iter()
    }
}

impl Default for MetadataDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MetadataDocument {
    type Item = &'a Triple;
    type IntoIter = btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<Triple> {
        (0..n)
            .map(|i| {
                Triple::new(
                    Term::iri("http://ex.org/g1"),
                    Term::iri("http://rdfs.org/ns/void#triples"),
                    Term::typed(i.to_string(), iris::XSD_INTEGER),
                )
            })
            .collect()
    }

    #[test]
    fn merge_is_idempotent() {
        let mut once = MetadataDocument::new();
        once.merge(sample(3));

        let mut twice = MetadataDocument::new();
        twice.merge(sample(3));
        let added = twice.merge(sample(3));

        assert_eq!(added, 0);
        assert_eq!(once, twice);
        assert_eq!(twice.len(), 3);
    }

    #[test]
    fn merge_is_union() {
        let mut doc = MetadataDocument::new();
        assert_eq!(doc.merge(sample(2)), 2);
        assert_eq!(doc.merge(sample(4)), 2);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn finalize_stamps_issued_date() {
        let endpoint = Endpoint::new("http://ex.org/sparql/").unwrap();
        let mut doc = MetadataDocument::new();
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        doc.finalize_on(&endpoint, date);

        assert_eq!(doc.len(), 1);
        assert!(doc.contains(&Triple::new(
            Term::iri("http://ex.org/sparql"),
            Term::iri(iris::DCT_ISSUED),
            Term::typed("2026-10-18", iris::XSD_DATE),
        )));
    }

    #[test]
    fn rebinding_prefix_replaces_iri() {
        let mut doc = MetadataDocument::new();
        let count = doc.namespaces().len();
        doc.bind("void", "http://example.org/void#");
        doc.bind("ex", "http://example.org/");
        assert_eq!(doc.namespaces().len(), count + 1);
        assert!(doc
            .namespaces()
            .iter()
            .any(|ns| ns.prefix == "void" && ns.iri == "http://example.org/void#"));
    }
}
