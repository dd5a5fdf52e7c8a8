//! The ticket board: composer, filters, ticket list and stats held as one
//! view model. Each UI event maps to one method; methods that talk to the
//! helpdesk are async and return once the round-trip is done.

pub mod render;


use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::query::TicketQuery;
use crate::domain::stats::StatsSnapshot;
use crate::domain::ticket::{
    Category, Priority, Status, TITLE_MAX_CHARS, Ticket, TicketDraft, TicketId,
};
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

pub const SUBMIT_NOTICE: &str = "Ticket submitted successfully.";

/// Feature switches covering both the full dashboard and the bare form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    pub show_stats: bool,
    pub styled: bool,
    pub alert_on_submit: bool,
}

impl BoardOptions {
    pub fn rich() -> Self {
        Self {
            show_stats: true,
            styled: true,
            alert_on_submit: false,
        }
    }

    pub fn minimal() -> Self {
        Self {
            show_stats: false,
            styled: false,
            alert_on_submit: true,
        }
    }
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self::rich()
    }
}

/// Requests currently in flight. Published on a watch channel so a caller
/// can show progress while a handler is still awaiting the helpdesk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub classifying: bool,
    pub submitting: bool,
}

impl Activity {
    pub fn indicator(&self) -> Option<&'static str> {
        if self.submitting {
            Some("Submitting...")
        } else if self.classifying {
            Some("AI is analyzing your ticket...")
        } else {
            None
        }
    }
}

pub struct TicketBoard {
    service: Arc<dyn HelpdeskService>,
    options: BoardOptions,
    draft: TicketDraft,
    query: TicketQuery,
    tickets: Vec<Ticket>,
    stats: Option<StatsSnapshot>,
    activity: watch::Sender<Activity>,
    notice: Option<String>,
}

impl TicketBoard {
    pub fn new(service: Arc<dyn HelpdeskService>, options: BoardOptions) -> Self {
        Self {
            service,
            options,
            draft: TicketDraft::default(),
            query: TicketQuery::default(),
            tickets: Vec::new(),
            stats: None,
            activity: watch::channel(Activity::default()).0,
            notice: None,
        }
    }

    /// Start from an existing filter set instead of the empty one.
    pub fn with_query(mut self, query: TicketQuery) -> Self {
        self.query = query;
        self
    }

    pub fn options(&self) -> BoardOptions {
        self.options
    }

    pub fn draft(&self) -> &TicketDraft {
        &self.draft
    }

    pub fn query(&self) -> &TicketQuery {
        &self.query
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    pub fn activity(&self) -> Activity {
        *self.activity.borrow()
    }

    /// Receiver that sees every flag change, including while a request is pending.
    pub fn subscribe(&self) -> watch::Receiver<Activity> {
        self.activity.subscribe()
    }

    pub fn is_classifying(&self) -> bool {
        self.activity().classifying
    }

    pub fn is_submitting(&self) -> bool {
        self.activity().submitting
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft.category = category;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    /// Initial load. Unlike later refreshes, failures are reported.
    pub async fn mount(&mut self) -> AppResult<()> {
        self.tickets = self.service.list_tickets(&self.query).await?;
        if self.options.show_stats {
            self.stats = Some(self.service.stats().await?);
        }
        Ok(())
    }

    /// Description lost focus: ask the helpdesk for a category/priority hint.
    ///
    /// Only fields present in the suggestion are overwritten. A failed
    /// request leaves the composer as it was.
    pub async fn blur_description(&mut self) {
        if self.draft.description.is_empty() {
            return;
        }

        self.activity.send_modify(|activity| activity.classifying = true);
        match self.service.classify(&self.draft.description).await {
            Ok(suggestion) => {
                debug!(?suggestion, "received classification");
                if let Some(category) = suggestion.category {
                    self.draft.category = category;
                }
                if let Some(priority) = suggestion.priority {
                    self.draft.priority = priority;
                }
            }
            Err(err) => warn!(error = %err, "classification failed"),
        }
        self.activity.send_modify(|activity| activity.classifying = false);
    }

    pub async fn submit(&mut self) -> AppResult<Ticket> {
        validate_draft(&self.draft)?;

        self.activity.send_modify(|activity| activity.submitting = true);
        let result = self.service.create_ticket(&self.draft).await;
        self.activity.send_modify(|activity| activity.submitting = false);

        let ticket = match result {
            Ok(ticket) => ticket,
            Err(err) => {
                warn!(error = %err, "ticket creation failed");
                return Err(err);
            }
        };

        info!(id = %ticket.id, "ticket created");
        self.draft = TicketDraft::default();
        if self.options.alert_on_submit {
            self.notice = Some(SUBMIT_NOTICE.to_string());
        }
        self.refresh().await;
        Ok(ticket)
    }

    pub async fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refresh().await;
    }

    pub async fn set_status_filter(&mut self, status: Option<Status>) {
        self.query.status = status;
        self.refresh().await;
    }

    pub async fn set_category_filter(&mut self, category: Option<Category>) {
        self.query.category = category;
        self.refresh().await;
    }

    pub async fn set_priority_filter(&mut self, priority: Option<Priority>) {
        self.query.priority = priority;
        self.refresh().await;
    }

    /// Row status change. The list only reflects it after the refetch.
    pub async fn change_status(&mut self, id: TicketId, status: Status) -> AppResult<()> {
        if let Err(err) = self.service.update_status(id, status).await {
            warn!(%id, error = %err, "status update failed");
            return Err(err);
        }
        info!(%id, status = status.as_str(), "ticket status updated");
        self.refresh().await;
        Ok(())
    }

    /// Refetch list and stats, keeping the previous data on failure.
    pub async fn refresh(&mut self) {
        match self.service.list_tickets(&self.query).await {
            Ok(tickets) => self.tickets = tickets,
            Err(err) => warn!(error = %err, "failed to refresh tickets"),
        }
        if self.options.show_stats {
            match self.service.stats().await {
                Ok(stats) => self.stats = Some(stats),
                Err(err) => warn!(error = %err, "failed to refresh stats"),
            }
        }
    }
}

fn validate_draft(draft: &TicketDraft) -> AppResult<()> {
    if draft.title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if draft.title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    if draft.description.is_empty() {
        return Err(AppError::Validation("description is required".to_string()));
    }
    Ok(())
}
