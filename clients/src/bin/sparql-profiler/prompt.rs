//! Dataset description input: interactive questions or a JSON answer file.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sparql_profiler::dataset::{DatasetDescription, Question, DISTRIBUTION_QUESTION, QUESTIONS};

/// Asks every dataset question on `output` and reads the answers from
/// `input`. The distribution URI is asked first when `ask_distribution`
/// is set. An empty answer takes the question's default. End of input
/// answers the remaining questions with their defaults.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    ask_distribution: bool,
) -> Result<DatasetDescription> {
    let mut description = DatasetDescription::default();
    let distribution = ask_distribution.then_some(&DISTRIBUTION_QUESTION);
    for question in distribution.into_iter().chain(QUESTIONS) {
        let answer = ask_one(input, output, question)?;
        description.set(question.id, answer);
    }
    Ok(description)
}

fn ask_one<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &Question) -> Result<String> {
    let default = question.default_answer();
    match &default {
        Some(default) => write!(output, "[?] {} e.g. [{}]: ", question.prompt, default)?,
        None => write!(output, "[?] {}: ", question.prompt)?,
    }
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read answer from stdin")?;
    Ok(match line.trim() {
        "" => default.unwrap_or_default(),
        answer => answer.to_string(),
    })
}

/// Reads answers from a JSON object keyed by question id.
pub fn load(path: &Path) -> Result<DatasetDescription> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse dataset answers in {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sparql_profiler::dataset::{DEFAULT_LANGUAGE, DEFAULT_LICENSE};

    #[test]
    fn answers_fill_fields_in_order() {
        let mut input = "DrugBank\nDrug data\n\n\nIDS\nhttps://ids.example.org\n2019-01-01\n".as_bytes();
        let mut output = Vec::new();
        let description = ask(&mut input, &mut output, false).unwrap();

        assert_eq!(description.name, "DrugBank");
        assert_eq!(description.description, "Drug data");
        assert!(description.download_url.starts_with("https://www.drugbank.ca/"));
        assert_eq!(description.license, DEFAULT_LICENSE);
        assert_eq!(description.publisher_name, "IDS");
        assert_eq!(description.publisher_url, "https://ids.example.org");
        assert_eq!(description.created, "2019-01-01");
        // input ran out: defaults from here on
        assert_eq!(description.format, "application/xml");
        assert_eq!(description.language, DEFAULT_LANGUAGE);
        assert_eq!(description.keywords, "drug");
        assert_eq!(description.distribution(), None);

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("[?] ").count(), QUESTIONS.len());
        assert!(shown.contains(&format!("[{}]", DEFAULT_LICENSE)));
        assert!(!shown.contains(DISTRIBUTION_QUESTION.prompt));
    }

    #[test]
    fn distribution_uri_is_asked_first_when_missing() {
        let mut input = "https://w3id.org/d2s/chembl/distribution\nChEMBL\n".as_bytes();
        let mut output = Vec::new();
        let description = ask(&mut input, &mut output, true).unwrap();

        assert_eq!(description.distribution(), Some("https://w3id.org/d2s/chembl/distribution"));
        assert_eq!(description.name, "ChEMBL");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with(&format!("[?] {}", DISTRIBUTION_QUESTION.prompt)));
        assert_eq!(shown.matches("[?] ").count(), QUESTIONS.len() + 1);
    }
}
