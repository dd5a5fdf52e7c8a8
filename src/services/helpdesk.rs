use async_trait::async_trait;

use crate::domain::query::TicketQuery;
use crate::domain::stats::StatsSnapshot;
use crate::domain::suggestion::Suggestion;
use crate::domain::ticket::{Status, Ticket, TicketDraft, TicketId};
use crate::error::AppResult;

#[async_trait]
pub trait HelpdeskService: Send + Sync {
    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>>;
    async fn stats(&self) -> AppResult<StatsSnapshot>;
    async fn classify(&self, description: &str) -> AppResult<Suggestion>;
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket>;
    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket>;
}
