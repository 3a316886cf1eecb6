//! Profile report types: per-query outcomes and report aggregation.

use crate::endpoint::GraphTarget;

/// What happened to one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The query succeeded and its triples were merged.
    Merged {
        /// Triples returned by the endpoint.
        returned: usize,
        /// Triples that were new to the document.
        added: usize,
    },
    /// The query failed; nothing was merged.
    Failed {
        /// Error detail.
        error: String,
    },
}

/// The outcome of one (graph, query) execution.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Graph the query was scoped to.
    pub graph: GraphTarget,
    /// Template name or aggregate query identifier.
    pub query: String,
    /// Result of the execution.
    pub status: OutcomeStatus,
}

impl QueryOutcome {
    /// Creates a successful outcome.
    pub fn merged(graph: GraphTarget, query: impl Into<String>, returned: usize, added: usize) -> Self {
        Self {
            graph,
            query: query.into(),
            status: OutcomeStatus::Merged { returned, added },
        }
    }

    /// Creates a failed outcome.
    pub fn failed(graph: GraphTarget, query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            graph,
            query: query.into(),
            status: OutcomeStatus::Failed {
                error: error.into(),
            },
        }
    }

    /// Returns true if this outcome represents a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Diagnostics of one profiling run.
///
/// Failures are reported here and in the logs, never in the document.
#[derive(Debug, Default)]
pub struct ProfileReport {
    /// Graphs that were profiled, in visiting order.
    pub graphs: Vec<GraphTarget>,
    /// Discovered graphs that were excluded by configuration.
    pub skipped: Vec<String>,
    /// One entry per executed query, in execution order.
    pub outcomes: Vec<QueryOutcome>,
}

impl ProfileReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome to this report.
    pub fn push(&mut self, outcome: QueryOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the count of failed queries.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Returns the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &QueryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Returns the number of triples newly added across all queries.
    pub fn merged_triple_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                OutcomeStatus::Merged { added, .. } => added,
                OutcomeStatus::Failed { .. } => 0,
            })
            .sum()
    }

    /// Returns true if every query succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_failures_and_additions() {
        let g = GraphTarget::Named("urn:g".into());
        let mut report = ProfileReport::new();
        report.push(QueryOutcome::merged(g.clone(), "a.rq", 5, 4));
        report.push(QueryOutcome::failed(g.clone(), "b.rq", "timeout"));
        report.push(QueryOutcome::merged(g, "c.rq", 2, 2));

        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.merged_triple_count(), 6);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().map(|o| o.query.as_str()).collect::<Vec<_>>(), vec!["b.rq"]);
    }
}
