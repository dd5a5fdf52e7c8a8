use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::query::TicketQuery;
use crate::domain::stats::StatsSnapshot;
use crate::domain::suggestion::{ClassifyResponse, Suggestion};
use crate::domain::ticket::{Status, Ticket, TicketDraft, TicketId};
use crate::error::{AppError, AppResult};
use crate::services::HelpdeskService;

/// Talks to the helpdesk REST API mounted under `base_url` (usually `.../api`).
pub struct HttpHelpdeskClient {
    http: Client,
    base_url: String,
}

impl HttpHelpdeskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn tickets_endpoint(&self) -> String {
        self.endpoint("tickets/")
    }

    fn ticket_endpoint(&self, id: TicketId) -> String {
        self.endpoint(&format!("tickets/{id}/"))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Http(format!("failed to call helpdesk: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Decode(format!("failed to parse helpdesk response: {err}")))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> AppResult<T> {
        self.send(request.header(CONTENT_TYPE, "application/json").json(body))
            .await
    }
}

#[async_trait]
impl HelpdeskService for HttpHelpdeskClient {
    async fn list_tickets(&self, query: &TicketQuery) -> AppResult<Vec<Ticket>> {
        let params = query.params();
        debug!(?params, "listing tickets");
        self.send(self.http.get(self.tickets_endpoint()).query(&params))
            .await
    }

    async fn stats(&self) -> AppResult<StatsSnapshot> {
        debug!("fetching ticket stats");
        self.send(self.http.get(self.endpoint("tickets/stats/")))
            .await
    }

    async fn classify(&self, description: &str) -> AppResult<Suggestion> {
        debug!(chars = description.chars().count(), "classifying description");
        let response: ClassifyResponse = self
            .send_json(
                self.http.post(self.endpoint("tickets/classify/")),
                &ClassifyRequest { description },
            )
            .await?;
        Ok(response.into())
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        debug!(title = %draft.title, "creating ticket");
        self.send_json(self.http.post(self.tickets_endpoint()), draft)
            .await
    }

    async fn update_status(&self, id: TicketId, status: Status) -> AppResult<Ticket> {
        debug!(%id, status = status.as_str(), "updating ticket status");
        self.send_json(
            self.http.patch(self.ticket_endpoint(id)),
            &StatusUpdateRequest { status },
        )
        .await
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    description: &'a str,
}

#[derive(Serialize)]
struct StatusUpdateRequest {
    status: Status,
}
