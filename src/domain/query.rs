use crate::domain::ticket::{Category, Priority, Status};

/// Filters scoping the ticket list. Matching happens on the helpdesk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketQuery {
    pub search: String,
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl TicketQuery {
    /// Query-string pairs for the list request. `search` is always present,
    /// unset filters are left out entirely rather than sent empty.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("search", self.search.clone())];
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        params
    }
}
