use roadcost_core::DocumentId;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// The session's coarse state: whether any document is being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorState {
    NoDocument,
    DocumentKnown(DocumentId),
}

/// What readers of the store observe.
///
/// `generation` increases by one on every accepted commit, so two slots with
/// the same generation always describe the same upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSlot {
    pub document_id: Option<DocumentId>,
    pub generation: u64,
    accepted_ticket: u64,
}

impl DocumentSlot {
    pub fn state(&self) -> OrchestratorState {
        match &self.document_id {
            Some(id) => OrchestratorState::DocumentKnown(id.clone()),
            None => OrchestratorState::NoDocument,
        }
    }
}

/// Dispatch-order tag taken by an upload before it goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The identifier is now current under this generation.
    Applied { generation: u64 },
    /// A newer upload already committed; the identifier was dropped.
    Superseded,
}

/// Single source of truth for the current document identifier.
///
/// [`DocumentStore::commit`] is the only way to change it. Readers either
/// take a [`DocumentSlot`] snapshot or subscribe to changes.
#[derive(Debug)]
pub struct DocumentStore {
    slot: watch::Sender<DocumentSlot>,
    next_ticket: AtomicU64,
}

impl DocumentStore {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(DocumentSlot::default());
        Self {
            slot,
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Reserves the next ticket. Call at dispatch time, before the network round trip.
    pub fn begin_upload(&self) -> UploadTicket {
        UploadTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Records a successful upload.
    ///
    /// Accepted only if `ticket` was issued after the ticket of the upload
    /// currently recorded, so an upload that was dispatched earlier but
    /// finished later cannot replace a newer identifier.
    pub fn commit(&self, ticket: UploadTicket, document_id: DocumentId) -> CommitOutcome {
        let mut outcome = CommitOutcome::Superseded;
        self.slot.send_if_modified(|slot| {
            if ticket.0 <= slot.accepted_ticket {
                return false;
            }
            slot.document_id = Some(document_id.clone());
            slot.generation += 1;
            slot.accepted_ticket = ticket.0;
            outcome = CommitOutcome::Applied {
                generation: slot.generation,
            };
            true
        });

        match &outcome {
            CommitOutcome::Applied { generation } => {
                tracing::info!(document_id = %document_id, generation, "document identifier updated");
            }
            CommitOutcome::Superseded => {
                tracing::warn!(
                    document_id = %document_id,
                    ticket = ticket.0,
                    "upload finished after a newer one; identifier discarded"
                );
            }
        }
        outcome
    }

    pub fn current(&self) -> DocumentSlot {
        self.slot.borrow().clone()
    }

    pub fn current_id(&self) -> Option<DocumentId> {
        self.slot.borrow().document_id.clone()
    }

    pub fn state(&self) -> OrchestratorState {
        self.slot.borrow().state()
    }

    /// Receiver that is notified on every accepted commit.
    pub fn subscribe(&self) -> watch::Receiver<DocumentSlot> {
        self.slot.subscribe()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
