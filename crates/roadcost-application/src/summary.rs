use chrono::FixedOffset;
use roadcost_core::format::{format_inr, format_intervention_count, format_local_timestamp};
use roadcost_core::{AnalysisApi, AnalysisSummary, DocumentId, FailureDisplay, RetrievalState};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::DocumentSlot;

/// Retriever state tagged with the store generation it belongs to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetrievalSnapshot {
    pub document_id: Option<DocumentId>,
    pub generation: u64,
    pub state: RetrievalState,
}

/// Result of handing a store slot to [`SummaryRetriever::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// No identifier yet; nothing fetched.
    NoDocument,
    /// This generation was already requested; nothing fetched.
    Unchanged,
    /// A newer generation was already requested; nothing fetched.
    Outdated,
    /// The fetch finished and its result is now the current state.
    Applied,
    /// The fetch finished after a newer generation took over; result dropped.
    Discarded,
}

/// Fetches the analysis summary for the current document, once per identifier change.
pub struct SummaryRetriever {
    api: Arc<dyn AnalysisApi>,
    snapshot: watch::Sender<RetrievalSnapshot>,
}

/// Puts a generation that is still `Loading` back to `Idle` when a fetch
/// future is dropped before it applies its result.
struct LoadingGuard<'a> {
    snapshot: &'a watch::Sender<RetrievalSnapshot>,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let generation = self.generation;
        self.snapshot.send_if_modified(|snap| {
            if snap.generation == generation && snap.state.is_loading() {
                snap.state = RetrievalState::Idle;
                true
            } else {
                false
            }
        });
    }
}

impl SummaryRetriever {
    pub fn new(api: Arc<dyn AnalysisApi>) -> Self {
        let (snapshot, _) = watch::channel(RetrievalSnapshot::default());
        Self { api, snapshot }
    }

    /// Brings the retriever in line with `slot`.
    ///
    /// Fetches only when `slot` carries an identifier under a generation
    /// newer than any requested so far. The result is applied only if no
    /// newer generation was requested while the fetch was in flight.
    pub async fn refresh(&self, slot: &DocumentSlot) -> RefreshOutcome {
        let Some(document_id) = slot.document_id.clone() else {
            return RefreshOutcome::NoDocument;
        };

        let mut skipped = None;
        self.snapshot.send_if_modified(|snap| {
            if slot.generation < snap.generation {
                skipped = Some(RefreshOutcome::Outdated);
                return false;
            }
            if slot.generation == snap.generation {
                skipped = Some(RefreshOutcome::Unchanged);
                return false;
            }
            snap.document_id = Some(document_id.clone());
            snap.generation = slot.generation;
            snap.state = RetrievalState::Loading;
            true
        });
        if let Some(outcome) = skipped {
            return outcome;
        }

        let _loading = LoadingGuard {
            snapshot: &self.snapshot,
            generation: slot.generation,
        };
        tracing::debug!(document_id = %document_id, generation = slot.generation, "fetching analysis summary");

        let result = self.api.fetch_summary(&document_id).await;

        let state = match result {
            Ok(summary) => RetrievalState::Ready(summary),
            Err(err) => {
                tracing::warn!(document_id = %document_id, error = %err, "analysis summary fetch failed");
                RetrievalState::Failed(err.user_message())
            }
        };

        let applied = self.snapshot.send_if_modified(|snap| {
            if snap.generation != slot.generation {
                return false;
            }
            snap.state = state;
            true
        });

        if applied {
            RefreshOutcome::Applied
        } else {
            tracing::debug!(
                document_id = %document_id,
                generation = slot.generation,
                "discarding summary for a superseded document"
            );
            RefreshOutcome::Discarded
        }
    }

    /// Spawns a task that refreshes on every store change.
    ///
    /// Each change gets its own fetch task so a new identifier never waits
    /// behind a slow request for the previous one. The task ends when the
    /// store is dropped.
    pub fn follow(self: Arc<Self>, mut slots: watch::Receiver<DocumentSlot>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let slot = slots.borrow_and_update().clone();
                if slot.document_id.is_some() {
                    let retriever = self.clone();
                    tokio::spawn(async move {
                        retriever.refresh(&slot).await;
                    });
                }
                if slots.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    pub fn snapshot(&self) -> RetrievalSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RetrievalSnapshot> {
        self.snapshot.subscribe()
    }

    /// Renders the summary surface for the store's current slot.
    ///
    /// Reads local state only. A slot the retriever has not picked up yet
    /// renders as loading; the report link depends on the slot alone.
    pub fn panel(&self, slot: &DocumentSlot, display: FailureDisplay, offset: FixedOffset) -> SummaryPanel {
        let report_url = slot.document_id.as_ref().map(|id| self.api.report_url(id));
        if slot.document_id.is_none() {
            return SummaryPanel {
                report_url,
                body: SummaryBody::Idle,
            };
        }

        let snapshot = self.snapshot();
        if snapshot.generation != slot.generation {
            return SummaryPanel {
                report_url,
                body: SummaryBody::Loading,
            };
        }

        let body = match &snapshot.state {
            RetrievalState::Idle => SummaryBody::Idle,
            RetrievalState::Loading => SummaryBody::Loading,
            RetrievalState::Failed(message) => match display {
                FailureDisplay::Silent => SummaryBody::Idle,
                FailureDisplay::Banner => SummaryBody::Failed {
                    message: message.clone(),
                },
            },
            RetrievalState::Ready(summary) => SummaryBody::Ready(SummaryFigures::new(summary, offset)),
        };

        SummaryPanel { report_url, body }
    }
}

/// Display strings for a ready summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFigures {
    pub total_cost: String,
    pub interventions: String,
    pub started_at: String,
    pub report_ready: bool,
    pub warnings: Vec<String>,
}

impl SummaryFigures {
    pub fn new(summary: &AnalysisSummary, offset: FixedOffset) -> Self {
        Self {
            total_cost: format_inr(summary.total_cost),
            interventions: format_intervention_count(summary.total_interventions),
            started_at: format_local_timestamp(summary.analysis_started_at, offset),
            report_ready: summary.is_report_ready(),
            warnings: summary.warnings().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBody {
    Idle,
    Loading,
    Failed { message: String },
    Ready(SummaryFigures),
}

/// The summary surface: body plus the report link, which is present as soon
/// as an identifier is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPanel {
    pub report_url: Option<String>,
    pub body: SummaryBody,
}

impl fmt::Display for SummaryPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            SummaryBody::Idle => writeln!(f, "Upload a document to see its analysis summary.")?,
            SummaryBody::Loading => writeln!(f, "Loading analysis summary...")?,
            SummaryBody::Failed { message } => {
                writeln!(f, "Could not load the analysis summary: {message}")?
            }
            SummaryBody::Ready(figures) => {
                writeln!(f, "Total cost:   {}", figures.total_cost)?;
                writeln!(f, "Interventions: {}", figures.interventions)?;
                writeln!(f, "Started:      {}", figures.started_at)?;
                if !figures.report_ready {
                    writeln!(f, "Report is still being generated.")?;
                }
                for warning in &figures.warnings {
                    writeln!(f, "Warning: {warning}")?;
                }
            }
        }
        if let Some(url) = &self.report_url {
            writeln!(f, "Report: {url}")?;
        }
        Ok(())
    }
}
