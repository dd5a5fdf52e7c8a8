use clap::Args;
use tracing::info;

use crate::board::TicketBoard;
use crate::board::render::{render_stats, render_tickets};
use crate::context::AppContext;
use crate::domain::query::TicketQuery;
use crate::domain::ticket::{Category, Priority, Status, Ticket, TicketId};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Substring matched against title and description by the helpdesk.
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long)]
    pub description: String,
    /// Overrides the suggested category.
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
    /// Overrides the suggested priority.
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    /// Skip the classification request.
    #[arg(long)]
    pub no_classify: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(value_parser = parse_ticket_id)]
    pub id: TicketId,
    #[arg(value_parser = parse_status)]
    pub status: Status,
}

pub async fn list(ctx: &AppContext, args: ListArgs) -> AppResult<()> {
    let query = TicketQuery {
        search: args.search,
        status: args.status,
        category: args.category,
        priority: args.priority,
    };
    let mut board = ctx.board().with_query(query);
    board.mount().await?;
    print!("{}", render_tickets(board.tickets(), board.options().styled));
    Ok(())
}

pub async fn stats(ctx: &AppContext) -> AppResult<()> {
    let stats = ctx.helpdesk.stats().await?;
    print!("{}", render_stats(&stats, ctx.config.board.styled));
    Ok(())
}

pub async fn classify(ctx: &AppContext, description: &str) -> AppResult<()> {
    let suggestion = ctx.helpdesk.classify(description).await?;
    if suggestion.is_empty() {
        println!("No suggestion for this description.");
        return Ok(());
    }
    println!(
        "Suggested category: {}",
        suggestion.category.map(|c| c.as_str()).unwrap_or("<none>")
    );
    println!(
        "Suggested priority: {}",
        suggestion.priority.map(|p| p.as_str()).unwrap_or("<none>")
    );
    Ok(())
}

pub async fn create(ctx: &AppContext, args: CreateArgs) -> AppResult<()> {
    let mut board = ctx.board();
    let ticket = compose(&mut board, args).await?;
    info!(id = %ticket.id, "created ticket from command line");
    if let Some(notice) = board.take_notice() {
        println!("{notice}");
    }
    println!(
        "Ticket #{} created ({}, {}).",
        ticket.id,
        ticket.category.as_str(),
        ticket.priority.as_str()
    );
    Ok(())
}

/// Fills the composer the way a user would: type, leave the description,
/// adjust the suggestion, submit. Explicit values win over the suggestion.
pub async fn compose(board: &mut TicketBoard, args: CreateArgs) -> AppResult<Ticket> {
    board.set_title(args.title);
    board.set_description(args.description);

    let fully_overridden = args.category.is_some() && args.priority.is_some();
    if !args.no_classify && !fully_overridden {
        board.blur_description().await;
    }
    if let Some(category) = args.category {
        board.set_category(category);
    }
    if let Some(priority) = args.priority {
        board.set_priority(priority);
    }

    board.submit().await
}

pub async fn set_status(ctx: &AppContext, args: StatusArgs) -> AppResult<()> {
    let ticket = ctx.helpdesk.update_status(args.id, args.status).await?;
    println!("Ticket #{} is now {}.", ticket.id, ticket.status.label());
    Ok(())
}

pub fn parse_status(value: &str) -> Result<Status, String> {
    Status::from_str(value).ok_or_else(|| {
        format!(
            "unknown status '{value}' (expected one of: {})",
            status_names()
        )
    })
}

pub fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_str(value).ok_or_else(|| {
        format!(
            "unknown category '{value}' (expected one of: {})",
            category_names()
        )
    })
}

pub fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::from_str(value).ok_or_else(|| {
        format!(
            "unknown priority '{value}' (expected one of: {})",
            priority_names()
        )
    })
}

pub fn status_names() -> String {
    join_names(Status::ALL.iter().map(Status::as_str))
}

pub fn category_names() -> String {
    join_names(Category::ALL.iter().map(Category::as_str))
}

pub fn priority_names() -> String {
    join_names(Priority::ALL.iter().map(Priority::as_str))
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

pub fn parse_ticket_id(value: &str) -> Result<TicketId, String> {
    TicketId::parse(value).ok_or_else(|| format!("invalid ticket id '{value}'"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::BoardOptions;
    use crate::domain::suggestion::Suggestion;
    use crate::domain::ticket::TicketDraft;
    use crate::testing::{Call, RecordingHelpdesk};

    fn create_args() -> CreateArgs {
        CreateArgs {
            title: "Double charge".to_string(),
            description: "I was billed twice this month".to_string(),
            category: None,
            priority: None,
            no_classify: false,
        }
    }

    fn suggesting_helpdesk() -> Arc<RecordingHelpdesk> {
        Arc::new(RecordingHelpdesk {
            suggestion: Suggestion {
                category: Some(Category::Billing),
                priority: Some(Priority::High),
            },
            ..RecordingHelpdesk::default()
        })
    }

    fn created_drafts(service: &RecordingHelpdesk) -> Vec<TicketDraft> {
        service
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(draft) => Some(draft),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn compose_uses_suggestion_when_no_overrides() {
        let service = suggesting_helpdesk();
        let mut board = TicketBoard::new(service.clone(), BoardOptions::rich());

        let ticket = compose(&mut board, create_args()).await.unwrap();

        assert_eq!(ticket.category, Category::Billing);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(
            service.calls()[0],
            Call::Classify("I was billed twice this month".to_string())
        );
    }

    #[tokio::test]
    async fn explicit_priority_beats_suggestion() {
        let service = suggesting_helpdesk();
        let mut board = TicketBoard::new(service.clone(), BoardOptions::rich());
        let args = CreateArgs {
            priority: Some(Priority::Low),
            ..create_args()
        };

        compose(&mut board, args).await.unwrap();

        assert_eq!(service.count(|call| matches!(call, Call::Classify(_))), 1);
        let drafts = created_drafts(&service);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].category, Category::Billing);
        assert_eq!(drafts[0].priority, Priority::Low);
    }

    #[tokio::test]
    async fn full_overrides_skip_classification() {
        let service = suggesting_helpdesk();
        let mut board = TicketBoard::new(service.clone(), BoardOptions::rich());
        let args = CreateArgs {
            category: Some(Category::Account),
            priority: Some(Priority::Critical),
            ..create_args()
        };

        compose(&mut board, args).await.unwrap();

        assert_eq!(service.count(|call| matches!(call, Call::Classify(_))), 0);
        let drafts = created_drafts(&service);
        assert_eq!(drafts[0].category, Category::Account);
        assert_eq!(drafts[0].priority, Priority::Critical);
    }

    #[tokio::test]
    async fn no_classify_flag_keeps_defaults() {
        let service = suggesting_helpdesk();
        let mut board = TicketBoard::new(service.clone(), BoardOptions::rich());
        let args = CreateArgs {
            no_classify: true,
            ..create_args()
        };

        let ticket = compose(&mut board, args).await.unwrap();

        assert_eq!(service.count(|call| matches!(call, Call::Classify(_))), 0);
        assert_eq!(ticket.category, Category::General);
        assert_eq!(ticket.priority, Priority::Low);
    }

    #[test]
    fn value_parsers_explain_failures() {
        assert_eq!(parse_status("Resolved"), Ok(Status::Resolved));
        assert!(
            parse_status("pending")
                .unwrap_err()
                .contains("open, in_progress, resolved, closed")
        );
        assert!(parse_category("refunds").unwrap_err().contains("billing"));
        assert!(parse_priority("urgent").is_err());
        assert_eq!(parse_ticket_id("#4"), Ok(TicketId(4)));
    }
}
