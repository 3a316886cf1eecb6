//! Turtle 1.1 serializer for metadata documents.
//!
//! Declares only the bound prefixes that the output actually uses, groups
//! statements by subject and writes `a` for `rdf:type`.

use std::collections::BTreeSet;

use crate::document::MetadataDocument;
use crate::model::{escape_literal, iris, Term};
use crate::namespaces::Namespace;

/// Serializes `document` to a Turtle string.
#[must_use]
pub fn to_turtle(document: &MetadataDocument) -> String {
    let mut names = Compactor::new(document.namespaces());
    let mut body = String::with_capacity(document.len() * 96);

    let mut subject: Option<&Term> = None;
    let mut predicate: Option<&Term> = None;
    for triple in document {
        if subject == Some(&triple.subject) {
            if predicate == Some(&triple.predicate) {
                body.push_str(" ,\n        ");
            } else {
                body.push_str(" ;\n    ");
                body.push_str(&names.predicate(&triple.predicate));
                body.push(' ');
            }
        } else {
            if subject.is_some() {
                body.push_str(" .\n\n");
            }
            body.push_str(&names.term(&triple.subject));
            body.push_str("\n    ");
            body.push_str(&names.predicate(&triple.predicate));
            body.push(' ');
        }
        body.push_str(&names.term(&triple.object));
        subject = Some(&triple.subject);
        predicate = Some(&triple.predicate);
    }
    if subject.is_some() {
        body.push_str(" .\n");
    }

    let mut out = names.prefix_block();
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

/// Shortens IRIs to prefixed names and remembers which prefixes it used.
struct Compactor<'a> {
    namespaces: &'a [Namespace],
    used: BTreeSet<usize>,
}

impl<'a> Compactor<'a> {
    fn new(namespaces: &'a [Namespace]) -> Self {
        Self {
            namespaces,
            used: BTreeSet::new(),
        }
    }

    fn predicate(&mut self, term: &Term) -> String {
        match term {
            Term::Iri(iri) if iri == iris::RDF_TYPE => "a".to_string(),
            other => self.term(other),
        }
    }

    fn term(&mut self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::BlankNode(id) => format!("_:{}", id),
            Term::Literal(lit) => {
                let mut out = format!("\"{}\"", escape_literal(&lit.value));
                if let Some(lang) = &lit.language {
                    out.push('@');
                    out.push_str(lang);
                } else if let Some(datatype) = &lit.datatype {
                    out.push_str("^^");
                    out.push_str(&self.iri(datatype));
                }
                out
            }
        }
    }

    fn iri(&mut self, iri: &str) -> String {
        // longest namespace wins, so `void-ext:` beats a shorter overlapping binding
        let best = self
            .namespaces
            .iter()
            .enumerate()
            .filter_map(|(i, ns)| {
                iri.strip_prefix(ns.iri.as_str())
                    .filter(|local| is_safe_local(local))
                    .map(|local| (i, ns, local))
            })
            .max_by_key(|(_, ns, _)| ns.iri.len());

        match best {
            Some((i, ns, local)) => {
                self.used.insert(i);
                format!("{}:{}", ns.prefix, local)
            }
            None => format!("<{}>", iri),
        }
    }

    fn prefix_block(&self) -> String {
        let mut out = String::new();
        for &i in &self.used {
            let ns = &self.namespaces[i];
            out.push_str(&format!("@prefix {}: <{}> .\n", ns.prefix, ns.iri));
        }
        out
    }
}

/// Returns true if `local` can follow a prefix without escaping.
fn is_safe_local(local: &str) -> bool {
    match local.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !local.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Triple;

    fn add(doc: &mut MetadataDocument, s: &str, p: &str, o: Term) {
        doc.insert(Triple::new(Term::iri(s), Term::iri(p), o));
    }

    #[test]
    fn empty_document_is_empty_string() {
        assert!(to_turtle(&MetadataDocument::new()).is_empty());
    }

    #[test]
    fn only_used_prefixes_are_declared() {
        let mut doc = MetadataDocument::new();
        add(&mut doc, "http://ex.org/sparql", iris::RDF_TYPE, Term::iri(iris::VOID_DATASET));
        let turtle = to_turtle(&doc);
        assert!(turtle.contains("@prefix void: <http://rdfs.org/ns/void#> ."));
        assert!(!turtle.contains("@prefix rdf:"));
        assert!(!turtle.contains("@prefix foaf:"));
        assert!(turtle.contains("<http://ex.org/sparql>\n    a void:Dataset ."));
    }

    #[test]
    fn subjects_are_grouped() {
        let mut doc = MetadataDocument::new();
        let s = "http://ex.org/sparql";
        add(&mut doc, s, iris::RDF_TYPE, Term::iri(iris::VOID_DATASET));
        add(&mut doc, s, iris::RDF_TYPE, Term::iri(iris::DCAT_DISTRIBUTION));
        add(&mut doc, s, iris::DCT_ISSUED, Term::typed("2026-10-18", iris::XSD_DATE));
        let turtle = to_turtle(&doc);

        assert_eq!(turtle.matches("<http://ex.org/sparql>").count(), 1);
        assert!(turtle.contains(
            "<http://ex.org/sparql>\n    dct:issued \"2026-10-18\"^^xsd:date ;\n    a void:Dataset ,\n        dcat:Distribution .\n"
        ));
    }

    #[test]
    fn unsafe_local_names_stay_absolute() {
        let mut doc = MetadataDocument::new();
        add(
            &mut doc,
            "http://rdfs.org/ns/void#a/b",
            "http://rdfs.org/ns/void#class",
            Term::iri("http://xmlns.com/foaf/0.1/"),
        );
        let turtle = to_turtle(&doc);
        assert!(turtle.contains("<http://rdfs.org/ns/void#a/b>"));
        assert!(turtle.contains("void:class <http://xmlns.com/foaf/0.1/>"));
    }

    #[test]
    fn literals_are_escaped() {
        let mut doc = MetadataDocument::new();
        add(&mut doc, "urn:x", iris::DCT_TITLE, Term::lang("say \"hi\"", "en"));
        assert!(to_turtle(&doc).contains(r#"dct:title "say \"hi\""@en"#));
    }

    #[test]
    fn void_ext_prefers_longest_namespace() {
        let mut doc = MetadataDocument::new();
        doc.bind("ldf", "http://ldf.fi/");
        add(&mut doc, "urn:x", "http://ldf.fi/void-ext#objectClassPartition", Term::iri("urn:y"));
        let turtle = to_turtle(&doc);
        assert!(turtle.contains("void-ext:objectClassPartition"));
        assert!(!turtle.contains("@prefix ldf:"));
    }
}
