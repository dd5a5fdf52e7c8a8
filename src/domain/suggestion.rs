use serde::Deserialize;

use crate::domain::ticket::{Category, Priority};

/// Advisory triage hint returned by the classify endpoint.
///
/// Values outside the known enumerations are dropped, so a suggestion can
/// never push free text into the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Suggestion {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl Suggestion {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.priority.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassifyResponse {
    #[serde(default)]
    suggested_category: Option<String>,
    #[serde(default)]
    suggested_priority: Option<String>,
}

impl From<ClassifyResponse> for Suggestion {
    fn from(response: ClassifyResponse) -> Self {
        Self {
            category: response
                .suggested_category
                .as_deref()
                .and_then(Category::from_str),
            priority: response
                .suggested_priority
                .as_deref()
                .and_then(Priority::from_str),
        }
    }
}
