//! Dataset description entered by the publisher.
//!
//! The answers become an HCLS dataset description hanging off the
//! distribution URI `d`:
//!
//! - `d/summary`: the version-independent `dctypes:Dataset`;
//! - `d/agent/{publisher}`: the publishing `dct:Agent`;
//! - `d/version/1`: the described version, linking both distributions;
//! - `d/version/1/source`: the source data the RDF was built from;
//! - `d` itself: the RDF distribution served by the endpoint.
//!
//! Answers come from an interactive prompt or a JSON file and are added to
//! the document before profiling starts.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use tracing::warn;

use crate::document::MetadataDocument;
use crate::endpoint::Endpoint;
use crate::model::{iris, Term, Triple};

/// License applied when the publisher does not name one.
pub const DEFAULT_LICENSE: &str = "http://creativecommons.org/licenses/by-nc/4.0/legalcode";

/// Language applied when the publisher does not name one.
pub const DEFAULT_LANGUAGE: &str = "http://lexvo.org/id/iso639-3/eng";

/// Version number of the described dataset.
pub const VERSION: &str = "1";

/// Characters kept as-is in the publisher segment of the agent IRI.
const AGENT_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Publisher answers. Empty fields add nothing to the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatasetDescription {
    /// Distribution URI the description hangs off. Only used when the run
    /// does not name one.
    pub distribution_uri: String,
    /// Human-readable dataset name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Download URL of the source data.
    #[serde(alias = "downloadURL")]
    pub download_url: String,
    /// License IRI.
    pub license: String,
    /// Publisher name and affiliation.
    pub publisher_name: String,
    /// Publisher homepage.
    pub publisher_url: String,
    /// Publication date of the source data, `YYYY-MM-DD`.
    pub created: String,
    /// Media type of the source data.
    pub format: String,
    /// Lexvo IRI of the data language.
    pub language: String,
    /// Dataset homepage.
    pub homepage: String,
    /// IRI of a supporting publication.
    pub references: String,
    /// Comma-separated keywords.
    #[serde(alias = "keyword")]
    pub keywords: String,
}

impl Default for DatasetDescription {
    fn default() -> Self {
        Self {
            distribution_uri: String::new(),
            name: String::new(),
            description: String::new(),
            download_url: String::new(),
            license: DEFAULT_LICENSE.to_string(),
            publisher_name: String::new(),
            publisher_url: String::new(),
            created: today(),
            format: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            homepage: String::new(),
            references: String::new(),
            keywords: String::new(),
        }
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Answer used when the user enters nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// No default; the field stays empty.
    None,
    /// A fixed answer.
    Text(&'static str),
    /// The local date.
    Today,
}

/// One prompt question.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    /// Field the answer is stored in.
    pub id: &'static str,
    /// Text shown to the user.
    pub prompt: &'static str,
    /// Answer used when the user enters nothing.
    pub default: Suggestion,
}

impl Question {
    /// The default answer, resolved now.
    #[must_use]
    pub fn default_answer(&self) -> Option<String> {
        match self.default {
            Suggestion::None => None,
            Suggestion::Text(text) => Some(text.to_string()),
            Suggestion::Today => Some(today()),
        }
    }
}

/// Asked first when the run does not name a distribution URI.
pub const DISTRIBUTION_QUESTION: Question = Question {
    id: "distribution_uri",
    prompt: "Provide the distribution URI for this dataset",
    default: Suggestion::Text("https://w3id.org/d2s/drugbank/distribution"),
};

/// The questions asked by the interactive prompt, in order.
pub const QUESTIONS: &[Question] = &[
    Question {
        id: "name",
        prompt: "Enter a human-readable name for this dataset, e.g. DrugBank",
        default: Suggestion::None,
    },
    Question {
        id: "description",
        prompt: "Enter a description for this dataset",
        default: Suggestion::None,
    },
    Question {
        id: "download_url",
        prompt: "Enter the URL of the source data",
        default: Suggestion::Text("https://www.drugbank.ca/releases/5-1-1/downloads/all-full-database"),
    },
    Question {
        id: "license",
        prompt: "Enter a valid URL to the license informations about the original dataset",
        default: Suggestion::Text(DEFAULT_LICENSE),
    },
    Question {
        id: "publisher_name",
        prompt: "Enter the name of the institution publishing the data and its affiliation",
        default: Suggestion::Text("Institute of Data Science at Maastricht University"),
    },
    Question {
        id: "publisher_url",
        prompt: "Enter a valid URL for the publisher homepage",
        default: Suggestion::Text("https://maastrichtuniversity.nl/ids"),
    },
    Question {
        id: "created",
        prompt: "Enter the date at which the data has been published",
        default: Suggestion::Today,
    },
    Question {
        id: "format",
        prompt: "Enter the format of the source data",
        default: Suggestion::Text("application/xml"),
    },
    Question {
        id: "language",
        prompt: "Enter the lexvo URI for the language of the data",
        default: Suggestion::Text(DEFAULT_LANGUAGE),
    },
    Question {
        id: "homepage",
        prompt: "Enter the URL of the dataset homepage",
        default: Suggestion::Text("http://d2s.semanticscience.org/"),
    },
    Question {
        id: "references",
        prompt: "Enter the URL of a publication supporting the dataset",
        default: Suggestion::Text("https://www.ncbi.nlm.nih.gov/pubmed/29126136"),
    },
    Question {
        id: "keywords",
        prompt: "Enter keywords describing the dataset (separated by commas)",
        default: Suggestion::Text("drug"),
    },
];

impl DatasetDescription {
    /// Stores `answer` in the field named `id`. Returns false for an
    /// unknown field.
    pub fn set(&mut self, id: &str, answer: impl Into<String>) -> bool {
        let field = match id {
            "distribution_uri" => &mut self.distribution_uri,
            "name" => &mut self.name,
            "description" => &mut self.description,
            "download_url" => &mut self.download_url,
            "license" => &mut self.license,
            "publisher_name" => &mut self.publisher_name,
            "publisher_url" => &mut self.publisher_url,
            "created" => &mut self.created,
            "format" => &mut self.format,
            "language" => &mut self.language,
            "homepage" => &mut self.homepage,
            "references" => &mut self.references,
            "keywords" => &mut self.keywords,
            _ => return false,
        };
        *field = answer.into();
        true
    }

    /// Keywords split on commas, trimmed, empties dropped.
    pub fn keyword_list(&self) -> impl Iterator<Item = &str> {
        self.keywords.split(',').map(str::trim).filter(|k| !k.is_empty())
    }

    /// The distribution URI answer, if any.
    #[must_use]
    pub fn distribution(&self) -> Option<&str> {
        non_empty(&self.distribution_uri)
    }

    fn created_date(&self) -> Option<NaiveDate> {
        let created = non_empty(&self.created)?;
        match NaiveDate::parse_from_str(created, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(created = %created, error = %e, "Ignoring unparsable creation date");
                None
            }
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// IRIs of the described resources.
struct Resources {
    summary: Term,
    publisher: Option<Term>,
    version: Term,
    source: Term,
    distribution: Term,
}

impl Resources {
    fn new(distribution_uri: &str, publisher_name: Option<&str>) -> Self {
        let base = if distribution_uri.ends_with('/') {
            distribution_uri.to_string()
        } else {
            format!("{}/", distribution_uri)
        };
        Self {
            summary: Term::iri(format!("{}summary", base)),
            publisher: publisher_name.map(|name| {
                Term::iri(format!("{}agent/{}", base, utf8_percent_encode(name, AGENT_SEGMENT)))
            }),
            version: Term::iri(format!("{}version/{}", base, VERSION)),
            source: Term::iri(format!("{}version/{}/source", base, VERSION)),
            distribution: Term::iri(distribution_uri),
        }
    }
}

/// Adds the description of the dataset published as `distribution_uri`
/// and served by `endpoint` to `document`. Returns the number of new
/// triples.
pub fn describe_dataset(
    description: &DatasetDescription,
    endpoint: &Endpoint,
    distribution_uri: &str,
    document: &mut MetadataDocument,
) -> usize {
    let name = non_empty(&description.name);
    let publisher_name = non_empty(&description.publisher_name);
    let license = non_empty(&description.license).map(Term::iri);
    let language = non_empty(&description.language).map(Term::iri);
    let created = description
        .created_date()
        .map(|date| Term::typed(date.format("%Y-%m-%d").to_string(), iris::XSD_DATE));
    let ids = Resources::new(distribution_uri, publisher_name);
    let endpoint = Term::iri(endpoint.url());

    let mut triples = Vec::new();
    let mut add = |s: &Term, p: &str, o: Term| triples.push(Triple::new(s.clone(), Term::iri(p), o));

    // summary
    let summary = &ids.summary;
    add(summary, iris::RDF_TYPE, Term::iri(iris::DCTYPES_DATASET));
    if let Some(text) = non_empty(&description.description) {
        add(summary, iris::DCT_DESCRIPTION, Term::lang(text, "en"));
    }
    if let Some(name) = name {
        add(summary, iris::DCT_TITLE, Term::lang(name, "en"));
    }
    if let Some(homepage) = non_empty(&description.homepage) {
        add(summary, iris::FOAF_PAGE, Term::iri(homepage));
    }
    if let Some(references) = non_empty(&description.references) {
        add(summary, iris::DCT_REFERENCES, Term::iri(references));
    }
    for keyword in description.keyword_list() {
        add(summary, iris::DCAT_KEYWORD, Term::plain(keyword));
    }
    add(summary, iris::VOID_SPARQL_ENDPOINT, endpoint.clone());

    if let (Some(publisher), Some(publisher_name)) = (&ids.publisher, publisher_name) {
        add(publisher, iris::RDF_TYPE, Term::iri(iris::DCT_AGENT));
        add(publisher, iris::FOAF_NAME, Term::plain(publisher_name));
        if let Some(url) = non_empty(&description.publisher_url) {
            add(publisher, iris::FOAF_PAGE, Term::iri(url));
        }
        add(summary, iris::DCT_PUBLISHER, publisher.clone());
    }

    // version, source and RDF distribution share the provenance block
    let provenance = |add: &mut dyn FnMut(&Term, &str, Term), subject: &Term| {
        if let Some(publisher) = &ids.publisher {
            add(subject, iris::DCT_CREATOR, publisher.clone());
            add(subject, iris::DCT_PUBLISHER, publisher.clone());
        }
        if let Some(license) = &license {
            add(subject, iris::DCT_LICENSE, license.clone());
        }
        if let Some(language) = &language {
            add(subject, iris::DCT_LANGUAGE, language.clone());
        }
    };

    let version = &ids.version;
    add(version, iris::RDF_TYPE, Term::iri(iris::DCTYPES_DATASET));
    if let Some(name) = name {
        let label = format!("{} dataset version", name);
        add(version, iris::DCT_TITLE, Term::lang(label.as_str(), "en"));
        add(version, iris::DCT_DESCRIPTION, Term::lang(label, "en"));
    }
    add(version, iris::DCT_IS_VERSION_OF, summary.clone());
    add(version, iris::PAV_VERSION, Term::plain(VERSION));
    provenance(&mut add, version);
    add(version, iris::DCAT_HAS_DISTRIBUTION, ids.source.clone());
    add(version, iris::DCAT_HAS_DISTRIBUTION, ids.distribution.clone());

    let source = &ids.source;
    add(source, iris::RDF_TYPE, Term::iri(iris::DCAT_DISTRIBUTION));
    if let Some(name) = name {
        let label = format!("{} source distribution", name);
        add(source, iris::DCT_TITLE, Term::lang(label.as_str(), "en"));
        add(source, iris::DCT_DESCRIPTION, Term::lang(label, "en"));
    }
    if let Some(format) = non_empty(&description.format) {
        add(source, iris::DCT_FORMAT, Term::plain(format));
    }
    if let Some(url) = non_empty(&description.download_url) {
        add(source, iris::DCAT_DOWNLOAD_URL, Term::iri(url));
    }
    provenance(&mut add, source);
    if let Some(created) = &created {
        add(source, iris::DCT_CREATED, created.clone());
        add(source, iris::DCT_ISSUED, created.clone());
    }

    let rdf = &ids.distribution;
    add(rdf, iris::RDF_TYPE, Term::iri(iris::DCAT_DISTRIBUTION));
    add(rdf, iris::RDF_TYPE, Term::iri(iris::VOID_DATASET));
    if let Some(name) = name {
        add(rdf, iris::DCT_TITLE, Term::lang(name, "en"));
        add(rdf, iris::DCT_DESCRIPTION, Term::lang(format!("{} RDF distribution", name), "en"));
    }
    add(rdf, iris::DCT_SOURCE, source.clone());
    provenance(&mut add, rdf);
    add(rdf, iris::DCT_FORMAT, Term::iri(iris::FORMAT_TURTLE));
    if let Some(created) = created {
        add(rdf, iris::DCT_CREATED, created.clone());
        add(rdf, iris::DCT_ISSUED, created);
    }
    add(rdf, iris::DCAT_ACCESS_URL, endpoint);

    document.merge(triples)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DISTRIBUTION: &str = "https://w3id.org/d2s/drugbank/distribution";

    fn endpoint() -> Endpoint {
        Endpoint::new("https://ex.org/sparql#").unwrap()
    }

    fn has(doc: &MetadataDocument, s: &str, p: &str, o: Term) -> bool {
        doc.contains(&Triple::new(Term::iri(s), Term::iri(p), o))
    }

    fn iri(suffix: &str) -> String {
        format!("{}{}", DISTRIBUTION, suffix)
    }

    fn drugbank() -> DatasetDescription {
        DatasetDescription {
            name: "DrugBank".into(),
            description: "Drug data".into(),
            download_url: "https://www.drugbank.ca/releases/latest".into(),
            publisher_name: "IDS, Maastricht University".into(),
            publisher_url: "https://www.maastrichtuniversity.nl/ids".into(),
            created: "2019-01-01".into(),
            format: "application/xml".into(),
            homepage: "http://d2s.semanticscience.org/".into(),
            references: "https://www.ncbi.nlm.nih.gov/pubmed/29126136".into(),
            keywords: "drugs, targets,, ".into(),
            ..DatasetDescription::default()
        }
    }

    #[test]
    fn empty_answers_keep_the_resource_skeleton() {
        let description = DatasetDescription {
            license: String::new(),
            language: String::new(),
            created: String::new(),
            ..DatasetDescription::default()
        };
        let mut doc = MetadataDocument::new();
        // summary 2, version 5, source 1, distribution 5
        assert_eq!(describe_dataset(&description, &endpoint(), DISTRIBUTION, &mut doc), 13);
        assert!(has(&doc, DISTRIBUTION, iris::DCAT_ACCESS_URL, Term::iri("https://ex.org/sparql")));
        assert!(has(&doc, &iri("/summary"), iris::VOID_SPARQL_ENDPOINT, Term::iri("https://ex.org/sparql")));
        assert!(!doc.iter().any(|t| t.predicate == Term::iri(iris::DCT_PUBLISHER)));
    }

    #[test]
    fn full_description_links_every_resource() {
        let mut doc = MetadataDocument::new();
        let added = describe_dataset(&drugbank(), &endpoint(), DISTRIBUTION, &mut doc);
        // summary 9, publisher 3, version 11, source 11, distribution 13
        assert_eq!(added, 47);

        let summary = iri("/summary");
        let version = iri("/version/1");
        let source = iri("/version/1/source");
        let agent = iri("/agent/IDS%2C%20Maastricht%20University");

        assert!(has(&doc, &summary, iris::RDF_TYPE, Term::iri(iris::DCTYPES_DATASET)));
        assert!(has(&doc, &summary, iris::DCT_TITLE, Term::lang("DrugBank", "en")));
        assert!(has(&doc, &summary, iris::DCAT_KEYWORD, Term::plain("targets")));
        assert!(has(&doc, &summary, iris::DCT_PUBLISHER, Term::iri(agent.as_str())));
        assert!(has(&doc, &agent, iris::FOAF_NAME, Term::plain("IDS, Maastricht University")));

        assert!(has(&doc, &version, iris::DCT_IS_VERSION_OF, Term::iri(summary.as_str())));
        assert!(has(&doc, &version, iris::PAV_VERSION, Term::plain("1")));
        assert!(has(&doc, &version, iris::DCAT_HAS_DISTRIBUTION, Term::iri(source.as_str())));
        assert!(has(&doc, &version, iris::DCAT_HAS_DISTRIBUTION, Term::iri(DISTRIBUTION)));
        assert!(has(&doc, &version, iris::DCT_TITLE, Term::lang("DrugBank dataset version", "en")));

        assert!(has(&doc, &source, iris::DCT_FORMAT, Term::plain("application/xml")));
        assert!(has(&doc, &source, iris::DCT_CREATED, Term::typed("2019-01-01", iris::XSD_DATE)));
        assert!(has(&doc, &source, iris::DCT_CREATOR, Term::iri(agent.as_str())));

        assert!(has(&doc, DISTRIBUTION, iris::DCT_SOURCE, Term::iri(source.as_str())));
        assert!(has(&doc, DISTRIBUTION, iris::DCT_FORMAT, Term::iri(iris::FORMAT_TURTLE)));
        assert!(has(&doc, DISTRIBUTION, iris::DCT_LICENSE, Term::iri(DEFAULT_LICENSE)));
        assert!(has(&doc, DISTRIBUTION, iris::DCT_ISSUED, Term::typed("2019-01-01", iris::XSD_DATE)));
        assert!(has(
            &doc,
            DISTRIBUTION,
            iris::DCT_DESCRIPTION,
            Term::lang("DrugBank RDF distribution", "en")
        ));
    }

    #[test]
    fn trailing_slash_distribution_is_not_doubled() {
        let mut doc = MetadataDocument::new();
        describe_dataset(&drugbank(), &endpoint(), "https://ex.org/dist/", &mut doc);
        assert!(has(
            &doc,
            "https://ex.org/dist/version/1",
            iris::DCT_IS_VERSION_OF,
            Term::iri("https://ex.org/dist/summary")
        ));
    }

    #[test]
    fn unparsable_creation_date_is_left_out() {
        let description = DatasetDescription {
            created: "last spring".into(),
            ..drugbank()
        };
        let mut doc = MetadataDocument::new();
        describe_dataset(&description, &endpoint(), DISTRIBUTION, &mut doc);
        assert!(!doc.iter().any(|t| t.predicate == Term::iri(iris::DCT_CREATED)));
    }

    #[test]
    fn publisher_url_without_name_is_ignored() {
        let description = DatasetDescription {
            publisher_name: String::new(),
            ..drugbank()
        };
        let mut doc = MetadataDocument::new();
        describe_dataset(&description, &endpoint(), DISTRIBUTION, &mut doc);
        assert!(!doc.iter().any(|t| t.predicate == Term::iri(iris::DCT_CREATOR)));
        assert!(!doc.iter().any(|t| t.object == Term::iri("https://www.maastrichtuniversity.nl/ids")));
    }

    #[test]
    fn json_answers_keep_defaults() {
        let description: DatasetDescription = serde_json::from_str(
            r#"{"name": "Bio2RDF", "keyword": "life sciences", "downloadURL": "https://download.bio2rdf.org"}"#,
        )
        .unwrap();
        assert_eq!(description.language, DEFAULT_LANGUAGE);
        assert_eq!(description.download_url, "https://download.bio2rdf.org");
        assert_eq!(description.keyword_list().collect::<Vec<_>>(), vec!["life sciences"]);
        assert!(NaiveDate::parse_from_str(&description.created, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn every_question_names_a_field() {
        let mut description = DatasetDescription::default();
        for question in QUESTIONS.iter().chain([&DISTRIBUTION_QUESTION]) {
            assert!(description.set(question.id, "x"), "{}", question.id);
        }
        assert!(!description.set("colour", "x"));
        assert_eq!(description.distribution(), Some("x"));
    }

    #[test]
    fn creation_date_defaults_to_today() {
        let created = QUESTIONS.iter().find(|q| q.id == "created").unwrap();
        assert_eq!(created.default_answer(), Some(today()));
        assert_eq!(QUESTIONS[0].default_answer(), None);
    }
}
