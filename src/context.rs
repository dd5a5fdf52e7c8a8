use std::sync::Arc;

use crate::board::{BoardOptions, TicketBoard};
use crate::config::AppConfig;
use crate::services::HelpdeskService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub helpdesk: Arc<dyn HelpdeskService>,
}

impl AppContext {
    pub fn new(config: AppConfig, helpdesk: Arc<dyn HelpdeskService>) -> Self {
        Self { config, helpdesk }
    }

    pub fn board(&self) -> TicketBoard {
        self.board_with(self.config.board)
    }

    pub fn board_with(&self, options: BoardOptions) -> TicketBoard {
        TicketBoard::new(self.helpdesk.clone(), options)
    }
}
