//! Recording stand-in for the helpdesk, shared by the board and command tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::query::TicketQuery;
use crate::domain::stats::StatsSnapshot;
use crate::domain::suggestion::Suggestion;
use crate::domain::ticket::{Category, Priority, Status, Ticket, TicketDraft, TicketId};
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(TicketQuery),
    Stats,
    Classify(String),
    Create(TicketDraft),
    UpdateStatus(TicketId, Status),
}

#[derive(Default)]
pub struct RecordingHelpdesk {
    pub calls: Mutex<Vec<Call>>,
    pub tickets: Vec<Ticket>,
    pub suggestion: Suggestion,
    pub fail_classify: bool,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_list: bool,
    /// Holds the classify response until the sender fires.
    pub classify_gate: Mutex<Option<oneshot::Receiver<()>>>,
    /// Holds the create response until the sender fires.
    pub create_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RecordingHelpdesk {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }
}

async fn wait_for(gate: &Mutex<Option<oneshot::Receiver<()>>>) {
    let pending = gate.lock().unwrap().take();
    if let Some(pending) = pending {
        let _ = pending.await;
    }
}

fn unreachable_error() -> AppError {
    AppError::Http("connection refused".to_string())
}

pub fn sample_ticket() -> Ticket {
    Ticket {
        id: TicketId(5),
        title: "Printer offline".to_string(),
        description: "Floor 2".to_string(),
        category: Category::Technical,
        priority: Priority::Medium,
        status: Status::Open,
        created_at: None,
    }
}

#[async_trait]
impl HelpdeskService for RecordingHelpdesk {
    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>> {
        self.record(Call::List(query.clone()));
        if self.fail_list {
            return Err(unreachable_error());
        }
        Ok(self.tickets.clone())
    }

    async fn stats(&self) -> AppResult<StatsSnapshot> {
        self.record(Call::Stats);
        Ok(StatsSnapshot {
            total_tickets: self.tickets.len() as u64,
            ..StatsSnapshot::default()
        })
    }

    async fn classify(&self, description: &str) -> AppResult<Suggestion> {
        self.record(Call::Classify(description.to_string()));
        wait_for(&self.classify_gate).await;
        if self.fail_classify {
            return Err(unreachable_error());
        }
        Ok(self.suggestion)
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        self.record(Call::Create(draft.clone()));
        wait_for(&self.create_gate).await;
        if self.fail_create {
            return Err(AppError::Api {
                status: 500,
                body: "server error".to_string(),
            });
        }
        Ok(Ticket {
            id: TicketId(99),
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category,
            priority: draft.priority,
            status: Status::Open,
            created_at: None,
        })
    }

    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket> {
        self.record(Call::UpdateStatus(id, status));
        if self.fail_update {
            return Err(unreachable_error());
        }
        Ok(Ticket {
            status,
            id,
            ..sample_ticket()
        })
    }
}
