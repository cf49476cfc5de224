use crate::error::SessionError;
use crate::models::{RankingMetric, RawResult, RelevanceReference, SearchResult, SessionStage};
use crate::normalize::Normalizer;
use crate::ranker::{score_results, sort_by_metric};
use crate::reference::build_reference;

/// Upper bound on how many results the user may mark relevant.
pub const MAX_SELECTIONS: usize = 5;

pub struct SkippedResult {
    pub rank: u32,
    pub reason: String,
}

pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedResult>,
}

/// One query session: `Idle → ResultsFetched → RelevanceMarked →
/// ReferenceBuilt → Scored → Sorted`. Transitions only move forward and no
/// stage may be skipped; an interrupted session is discarded and a new one
/// starts from `Idle`. The UI layer drives selection through discrete
/// `select`/`finish_selection` calls instead of owning a prompt loop.
pub struct Session<'a> {
    normalizer: &'a Normalizer,
    stage: SessionStage,
    query: String,
    results: Vec<SearchResult>,
    selected: Vec<u32>,
    reference: Option<RelevanceReference>,
}

impl<'a> Session<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self {
            normalizer,
            stage: SessionStage::Idle,
            query: String::new(),
            results: Vec::new(),
            selected: Vec::new(),
            reference: None,
        }
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected(&self) -> &[u32] {
        &self.selected
    }

    /// The reference, once built. Read-only for the rest of the session.
    pub fn reference(&self) -> Option<&RelevanceReference> {
        self.reference.as_ref()
    }

    /// Ingests fetched results and derives tokens and term vectors. Results
    /// without any text are valid and load with an empty token sequence; a
    /// result repeating an already-loaded rank is skipped and reported (rank
    /// is the identity key), never aborting the batch.
    pub fn load_results(
        &mut self,
        query: impl Into<String>,
        raw: Vec<RawResult>,
    ) -> Result<LoadReport, SessionError> {
        self.expect_stage(SessionStage::Idle)?;

        let mut skipped = Vec::new();
        for item in raw {
            if self.results.iter().any(|result| result.rank == item.rank) {
                skipped.push(SkippedResult {
                    rank: item.rank,
                    reason: "provider repeated this rank".to_string(),
                });
                continue;
            }
            self.results.push(SearchResult::from_raw(item, self.normalizer));
        }

        self.query = query.into();
        self.stage = SessionStage::ResultsFetched;

        Ok(LoadReport {
            loaded: self.results.len(),
            skipped,
        })
    }

    /// Marks one result relevant. Duplicates and unknown ranks are reported
    /// back without consuming a selection slot; the fifth accepted selection
    /// closes the window. Returns the number of slots still open.
    pub fn select(&mut self, rank: u32) -> Result<usize, SessionError> {
        if self.stage == SessionStage::RelevanceMarked {
            return Err(SessionError::SelectionClosed);
        }
        self.expect_stage(SessionStage::ResultsFetched)?;

        if self.selected.contains(&rank) {
            return Err(SessionError::DuplicateSelection(rank));
        }
        if !self.results.iter().any(|result| result.rank == rank) {
            return Err(SessionError::UnknownRank(rank));
        }

        self.selected.push(rank);
        if self.selected.len() == MAX_SELECTIONS {
            self.stage = SessionStage::RelevanceMarked;
        }
        Ok(MAX_SELECTIONS - self.selected.len())
    }

    /// The sentinel: stop selecting. Zero selections is a valid outcome.
    /// Calling this after the window auto-closed is a no-op.
    pub fn finish_selection(&mut self) -> Result<(), SessionError> {
        if self.stage == SessionStage::RelevanceMarked {
            return Ok(());
        }
        self.expect_stage(SessionStage::ResultsFetched)?;
        self.stage = SessionStage::RelevanceMarked;
        Ok(())
    }

    pub fn build_reference(&mut self) -> Result<&RelevanceReference, SessionError> {
        self.expect_stage(SessionStage::RelevanceMarked)?;

        let selected: Vec<&SearchResult> = self
            .selected
            .iter()
            .filter_map(|rank| self.results.iter().find(|result| result.rank == *rank))
            .collect();

        let reference = build_reference(&selected, self.normalizer);
        self.stage = SessionStage::ReferenceBuilt;
        Ok(&*self.reference.insert(reference))
    }

    /// Computes both similarity scores for every result.
    pub fn score(&mut self) -> Result<(), SessionError> {
        self.expect_stage(SessionStage::ReferenceBuilt)?;

        let reference = self.reference.take().unwrap_or_default();
        score_results(&mut self.results, &reference);
        self.reference = Some(reference);
        self.stage = SessionStage::Scored;
        Ok(())
    }

    /// Orders the results by the chosen metric. `None` (an unrecognized user
    /// choice) keeps provider order rather than failing.
    pub fn sort_by(&mut self, metric: Option<RankingMetric>) -> Result<&[SearchResult], SessionError> {
        self.expect_stage(SessionStage::Scored)?;

        if let Some(metric) = metric {
            sort_by_metric(&mut self.results, metric);
        }
        self.stage = SessionStage::Sorted;
        Ok(&self.results)
    }

    fn expect_stage(&self, expected: SessionStage) -> Result<(), SessionError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SessionError::StageMismatch {
                expected,
                actual: self.stage,
            })
        }
    }
}
