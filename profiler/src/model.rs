//! Core RDF model types.
//!
//! Terms and triples are owned values with a total order, so a set of
//! triples merges by union and always serializes in the same order.

use std::fmt;

/// An RDF term appearing in a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// An absolute IRI (e.g., `"http://rdfs.org/ns/void#Dataset"`).
    Iri(String),
    /// A blank node label, without the `_:` prefix.
    BlankNode(String),
    /// A literal with an optional datatype IRI or language tag.
    Literal(Literal),
}

/// An RDF literal.
///
/// At most one of `datatype` and `language` is set. A literal with neither
/// is a plain `xsd:string`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    /// Lexical form.
    pub value: String,
    /// Full IRI of the datatype, or `None` for plain and language-tagged literals.
    pub datatype: Option<String>,
    /// BCP47 language tag, lowercased.
    pub language: Option<String>,
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Creates a blank node term.
    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    /// Creates a plain string literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }

    /// Creates a typed literal.
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        // xsd:string is the implicit datatype of plain literals
        if datatype == iris::XSD_STRING {
            return Term::plain(value);
        }
        Term::Literal(Literal {
            value: value.into(),
            datatype: Some(datatype),
            language: None,
        })
    }

    /// Creates a language-tagged literal.
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into().to_ascii_lowercase()),
        })
    }

    /// Returns the IRI if this term is an IRI.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns true if this term may appear in subject position.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Term::Iri(_) | Term::BlankNode(_))
    }
}

impl fmt::Display for Term {
    /// Formats the term in N-Triples syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "_:{}", id),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.value))?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// A `(subject, predicate, object)` statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    /// Subject (IRI or blank node).
    pub subject: Term,
    /// Predicate (IRI).
    pub predicate: Term,
    /// Object (any term).
    pub object: Term,
}

impl Triple {
    /// Creates a triple from its three terms.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Escapes a literal's lexical form for a double-quoted Turtle/N-Triples string.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Standard IRI constants used when building and serializing metadata.
pub mod iris {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// Dublin Core terms.
    pub const DCT: &str = "http://purl.org/dc/terms/";
    /// Dublin Core types.
    pub const DCTYPES: &str = "http://purl.org/dc/dcmitype/";
    /// Data Catalog vocabulary.
    pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
    /// Vocabulary of Interlinked Datasets.
    pub const VOID: &str = "http://rdfs.org/ns/void#";
    /// VoID extensions.
    pub const VOID_EXT: &str = "http://ldf.fi/void-ext#";
    /// Friend of a Friend.
    pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
    /// Schema.org.
    pub const SCHEMA: &str = "http://schema.org/";
    /// Provenance, Authoring and Versioning.
    pub const PAV: &str = "http://purl.org/pav/";
    /// identifiers.org dataset vocabulary.
    pub const IDOT: &str = "http://identifiers.org/idot/";
    /// Data Quality Vocabulary.
    pub const DQV: &str = "http://www.w3.org/ns/dqv#";
    /// HCLS dataset description vocabulary.
    pub const HCLS: &str = "http://www.w3.org/hcls#";
    /// SKOS.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// PROV-O.
    pub const PROV: &str = "http://www.w3.org/ns/prov#";
    /// Data2Services vocabulary.
    pub const D2S: &str = "https://w3id.org/d2s/vocab/";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:date`.
    pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// `dct:issued`.
    pub const DCT_ISSUED: &str = "http://purl.org/dc/terms/issued";
    /// `dct:title`.
    pub const DCT_TITLE: &str = "http://purl.org/dc/terms/title";
    /// `dct:description`.
    pub const DCT_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    /// `dct:license`.
    pub const DCT_LICENSE: &str = "http://purl.org/dc/terms/license";
    /// `dct:language`.
    pub const DCT_LANGUAGE: &str = "http://purl.org/dc/terms/language";
    /// `dct:references`.
    pub const DCT_REFERENCES: &str = "http://purl.org/dc/terms/references";
    /// `dct:publisher`.
    pub const DCT_PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
    /// `dct:Agent`.
    pub const DCT_AGENT: &str = "http://purl.org/dc/terms/Agent";
    /// `dct:isVersionOf`.
    pub const DCT_IS_VERSION_OF: &str = "http://purl.org/dc/terms/isVersionOf";
    /// `dct:creator`.
    pub const DCT_CREATOR: &str = "http://purl.org/dc/terms/creator";
    /// `dct:source`.
    pub const DCT_SOURCE: &str = "http://purl.org/dc/terms/source";
    /// `dct:format`.
    pub const DCT_FORMAT: &str = "http://purl.org/dc/terms/format";
    /// `dct:created`.
    pub const DCT_CREATED: &str = "http://purl.org/dc/terms/created";

    /// `dctypes:Dataset`.
    pub const DCTYPES_DATASET: &str = "http://purl.org/dc/dcmitype/Dataset";
    /// `pav:version`.
    pub const PAV_VERSION: &str = "http://purl.org/pav/version";
    /// W3C format IRI for Turtle.
    pub const FORMAT_TURTLE: &str = "http://www.w3.org/ns/formats/Turtle";

    /// `dcat:Distribution`.
    pub const DCAT_DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#Distribution";
    /// `dcat:accessURL`.
    pub const DCAT_ACCESS_URL: &str = "http://www.w3.org/ns/dcat#accessURL";
    /// `dcat:downloadURL`.
    pub const DCAT_DOWNLOAD_URL: &str = "http://www.w3.org/ns/dcat#downloadURL";
    /// `dcat:keyword`.
    pub const DCAT_KEYWORD: &str = "http://www.w3.org/ns/dcat#keyword";
    /// `dcat:distribution`.
    pub const DCAT_HAS_DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#distribution";

    /// `void:Dataset`.
    pub const VOID_DATASET: &str = "http://rdfs.org/ns/void#Dataset";
    /// `void:sparqlEndpoint`.
    pub const VOID_SPARQL_ENDPOINT: &str = "http://rdfs.org/ns/void#sparqlEndpoint";

    /// `foaf:name`.
    pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
    /// `foaf:page`.
    pub const FOAF_PAGE: &str = "http://xmlns.com/foaf/0.1/page";
}
