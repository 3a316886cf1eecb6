//! N-Triples serializer for metadata documents.
//!
//! Produces one triple per line in the document's sorted order, so two runs
//! over the same data diff cleanly.

use crate::document::MetadataDocument;

/// Serializes `document` to an N-Triples string.
#[must_use]
pub fn to_ntriples(document: &MetadataDocument) -> String {
    let mut out = String::with_capacity(document.len() * 128);
    for triple in document {
        out.push_str(&triple.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{iris, Term, Triple};

    fn document() -> MetadataDocument {
        let mut doc = MetadataDocument::new();
        doc.insert(Triple::new(
            Term::iri("http://ex.org/g1"),
            Term::iri(iris::RDF_TYPE),
            Term::iri(iris::VOID_DATASET),
        ));
        doc.insert(Triple::new(
            Term::iri("http://ex.org/g1"),
            Term::iri(iris::DCT_TITLE),
            Term::lang("Line one\n\"two\"", "EN"),
        ));
        doc.insert(Triple::new(
            Term::blank("b0"),
            Term::iri("http://rdfs.org/ns/void#triples"),
            Term::typed("42", iris::XSD_INTEGER),
        ));
        doc
    }

    #[test]
    fn every_line_ends_with_period() {
        let nt = to_ntriples(&document());
        assert_eq!(nt.lines().count(), 3);
        for line in nt.lines() {
            assert!(line.ends_with(" ."), "Line does not end with ' .': {line}");
        }
    }

    #[test]
    fn terms_are_absolute_and_escaped() {
        let nt = to_ntriples(&document());
        assert!(nt.contains(
            "<http://ex.org/g1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://rdfs.org/ns/void#Dataset> ."
        ));
        assert!(nt.contains(r#""Line one\n\"two\""@en"#));
        assert!(nt.contains(r#"_:b0 <http://rdfs.org/ns/void#triples> "42"^^<http://www.w3.org/2001/XMLSchema#integer> ."#));
    }

    #[test]
    fn empty_document_is_empty_string() {
        assert!(to_ntriples(&MetadataDocument::new()).is_empty());
    }
}
