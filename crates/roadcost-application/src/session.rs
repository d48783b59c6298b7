use roadcost_core::format::display_offset;
use roadcost_core::lifecycle::LifecycleView;
use roadcost_core::{AnalysisApi, ClientConfig, FileUpload, Result, UploadOutcome};
use roadcost_interaction::HttpAnalysisClient;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::store::{DocumentStore, OrchestratorState};
use crate::summary::{RefreshOutcome, SummaryPanel, SummaryRetriever};
use crate::upload::{UploadInitiator, UploadStatus};

/// Root orchestrator for one user session.
///
/// Owns the [`DocumentStore`] and wires the upload initiator's output into
/// the lifecycle tracker and the summary retriever. Holds no state of its
/// own beyond that wiring.
pub struct DocumentSession {
    api: Arc<dyn AnalysisApi>,
    config: ClientConfig,
    store: Arc<DocumentStore>,
    uploader: UploadInitiator,
    retriever: Arc<SummaryRetriever>,
}

impl DocumentSession {
    pub fn new(api: Arc<dyn AnalysisApi>, config: ClientConfig) -> Self {
        let store = Arc::new(DocumentStore::new());
        let uploader = UploadInitiator::new(api.clone(), store.clone());
        let retriever = Arc::new(SummaryRetriever::new(api.clone()));
        Self {
            api,
            config,
            store,
            uploader,
            retriever,
        }
    }

    /// Creates a session backed by the HTTP client for `config`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let api: Arc<dyn AnalysisApi> = Arc::new(HttpAnalysisClient::new(&config)?);
        Ok(Self::new(api, config))
    }

    pub fn api(&self) -> &Arc<dyn AnalysisApi> {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn uploader(&self) -> &UploadInitiator {
        &self.uploader
    }

    pub fn retriever(&self) -> &Arc<SummaryRetriever> {
        &self.retriever
    }

    pub fn state(&self) -> OrchestratorState {
        self.store.state()
    }

    pub async fn upload(&self, selection: Option<FileUpload>) -> Option<UploadOutcome> {
        self.uploader.upload(selection).await
    }

    /// Refreshes the summary for the current slot in the calling task.
    pub async fn sync_summary(&self) -> RefreshOutcome {
        let slot = self.store.current();
        self.retriever.refresh(&slot).await
    }

    /// Starts feeding every store change into the retriever in the background.
    pub fn spawn_summary_follower(&self) -> JoinHandle<()> {
        self.retriever.clone().follow(self.store.subscribe())
    }

    pub fn tracker(&self) -> LifecycleView {
        LifecycleView::new(self.store.current_id().as_ref())
    }

    pub fn summary_panel(&self) -> SummaryPanel {
        self.retriever.panel(
            &self.store.current(),
            self.config.summary_failure,
            display_offset(self.config.utc_offset_minutes),
        )
    }

    /// Everything the session shows, rendered from local state.
    pub async fn dashboard(&self) -> Dashboard {
        Dashboard {
            upload: self.uploader.status().await,
            tracker: self.tracker(),
            summary: self.summary_panel(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub upload: UploadStatus,
    pub tracker: LifecycleView,
    pub summary: SummaryPanel,
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.upload.uploading {
            writeln!(f, "Uploading...")?;
        }
        if let Some(message) = &self.upload.success_message {
            writeln!(f, "{message}")?;
        }
        if let Some(message) = &self.upload.error_message {
            writeln!(f, "Error: {message}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.tracker)?;
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}
