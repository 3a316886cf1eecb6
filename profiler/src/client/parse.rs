//! Response body parsers for SELECT (JSON) and CONSTRUCT (Turtle) results.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use sophia_api::source::TripleSource;
use sophia_api::term::TermKind;
use sophia_api::triple::Triple as _;
use sophia_turtle::parser::turtle;

use super::{ResultFormat, SelectResults};
use crate::error::ClientError;
use crate::model::{Term, Triple};

#[derive(Deserialize)]
struct SparqlJson {
    #[serde(default)]
    head: SparqlHead,
    results: SparqlBindings,
}

#[derive(Deserialize, Default)]
struct SparqlHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlJsonTerm>>,
}

#[derive(Deserialize)]
struct SparqlJsonTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    datatype: Option<String>,
    #[serde(rename = "xml:lang")]
    lang: Option<String>,
}

impl SparqlJsonTerm {
    fn into_term(self) -> Term {
        match self.kind.as_str() {
            "uri" => Term::Iri(self.value),
            "bnode" => Term::BlankNode(self.value),
            _ => match (self.lang, self.datatype) {
                (Some(lang), _) => Term::lang(self.value, lang),
                (None, Some(dt)) => Term::typed(self.value, dt),
                (None, None) => Term::plain(self.value),
            },
        }
    }
}

/// Parses a SPARQL 1.1 Query Results JSON document.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] if the body is not a results document.
pub fn parse_select_json(body: &str) -> Result<SelectResults, ClientError> {
    let doc: SparqlJson = serde_json::from_str(body).map_err(|e| ClientError::Parse {
        format: ResultFormat::Json,
        reason: e.to_string(),
    })?;

    let bindings = doc
        .results
        .bindings
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(var, term)| (var, term.into_term()))
                .collect::<BTreeMap<_, _>>()
        })
        .collect();

    Ok(SelectResults {
        variables: doc.head.vars,
        bindings,
    })
}

/// Parses a Turtle document into triples.
///
/// Blank node labels are only unique within one response, so each label is
/// rewritten as `r{scope}_{label}`. Callers pass a distinct `scope` per
/// response to keep nodes of different responses apart after merging.
///
/// # Errors
///
/// Returns [`ClientError::Parse`] on any Turtle syntax error.
pub fn parse_turtle(body: &str, scope: usize) -> Result<Vec<Triple>, ClientError> {
    let mut triples = Vec::new();

    turtle::parse_str(body)
        .for_each_triple(|t| {
            let [s, p, o] = t.spo();
            if let (Some(s), Some(p), Some(o)) =
                (convert(s, scope), convert(p, scope), convert(o, scope))
            {
                triples.push(Triple::new(s, p, o));
            }
        })
        .map_err(|e| ClientError::Parse {
            format: ResultFormat::Turtle,
            reason: e.to_string(),
        })?;

    Ok(triples)
}

fn convert<T: sophia_api::term::Term>(term: T, scope: usize) -> Option<Term> {
    match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Term::Iri(iri.as_str().to_owned())),
        TermKind::BlankNode => term
            .bnode_id()
            .map(|id| Term::BlankNode(format!("r{}_{}", scope, id.as_str()))),
        TermKind::Literal => {
            let value = term.lexical_form()?.to_string();
            if let Some(tag) = term.language_tag() {
                Some(Term::lang(value, tag.as_str()))
            } else {
                let datatype = term.datatype()?;
                Some(Term::typed(value, datatype.as_str()))
            }
        }
        // quoted triples and variables never appear in CONSTRUCT output we consume
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::iris;

    const GRAPHS_JSON: &str = r#"{
      "head": { "vars": ["graph"] },
      "results": { "bindings": [
        { "graph": { "type": "uri", "value": "http://example.org/g1" } },
        { "graph": { "type": "uri", "value": "http://example.org/g2" } }
      ] }
    }"#;

    #[test]
    fn select_json_preserves_order() {
        let results = parse_select_json(GRAPHS_JSON).unwrap();
        assert_eq!(results.variables, vec!["graph".to_string()]);
        let graphs: Vec<_> = results.values("graph").filter_map(Term::as_iri).collect();
        assert_eq!(graphs, vec!["http://example.org/g1", "http://example.org/g2"]);
    }

    #[test]
    fn select_json_literals() {
        let body = r#"{"head":{"vars":["n","l"]},"results":{"bindings":[
            {"n":{"type":"literal","value":"3","datatype":"http://www.w3.org/2001/XMLSchema#integer"},
             "l":{"type":"literal","value":"hello","xml:lang":"en"}}]}}"#;
        let results = parse_select_json(body).unwrap();
        let row = &results.bindings[0];
        assert_eq!(row["n"], Term::typed("3", iris::XSD_INTEGER));
        assert_eq!(row["l"], Term::lang("hello", "en"));
    }

    #[test]
    fn select_json_rejects_garbage() {
        assert!(matches!(
            parse_select_json("<html>oops</html>"),
            Err(ClientError::Parse { format: ResultFormat::Json, .. })
        ));
    }

    #[test]
    fn turtle_terms_are_converted() {
        let body = r#"
            @prefix void: <http://rdfs.org/ns/void#> .
            @prefix dct: <http://purl.org/dc/terms/> .
            <http://example.org/g1> a void:Dataset ;
                void:triples 42 ;
                dct:title "Example"@en ;
                void:classPartition [ void:class <http://example.org/Drug> ] .
        "#;
        let triples = parse_turtle(body, 0).unwrap();
        assert_eq!(triples.len(), 5);
        assert!(triples.iter().any(|t| t.object == Term::typed("42", iris::XSD_INTEGER)));
        assert!(triples.iter().any(|t| t.object == Term::lang("Example", "en")));
        assert!(triples.iter().any(|t| matches!(t.subject, Term::BlankNode(_))));
    }

    #[test]
    fn blank_nodes_are_scoped_per_response() {
        let body = "_:b0 <http://example.org/p> \"x\" .";
        let first = parse_turtle(body, 1).unwrap();
        let second = parse_turtle(body, 2).unwrap();
        assert_ne!(first[0].subject, second[0].subject);
        assert_eq!(first[0].subject, Term::BlankNode("r1_b0".into()));
    }

    #[test]
    fn same_scope_gives_same_labels() {
        let body = "_:b0 <http://example.org/p> _:b1 .";
        assert_eq!(parse_turtle(body, 7).unwrap(), parse_turtle(body, 7).unwrap());
    }

    #[test]
    fn turtle_syntax_error_is_reported() {
        assert!(matches!(
            parse_turtle("<http://example.org/s> <http://example.org/p> .", 0),
            Err(ClientError::Parse { format: ResultFormat::Turtle, .. })
        ));
    }
}
