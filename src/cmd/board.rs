use clap::Args;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::board::render::render;
use crate::board::{BoardOptions, TicketBoard};
use crate::cmd::tickets::{
    category_names, parse_category, parse_priority, parse_status, parse_ticket_id,
    priority_names, status_names,
};
use crate::context::AppContext;
use crate::domain::ticket::{Category, Priority, Status, TicketId};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    /// Bare form: no stats dashboard, no colors, confirm each submission.
    #[arg(long)]
    pub minimal: bool,
    /// Disable colored badges.
    #[arg(long)]
    pub plain: bool,
}

fn help_text() -> String {
    format!(
        "Commands:
  title <text>                 set the ticket title
  desc <text>                  set the description and request a suggestion
  category <name>              one of: {categories}
  priority <name>              one of: {priorities}
  submit                       create the ticket
  search [text]                filter by text (empty clears)
  filter status|category|priority <value|all>
  set <id> <status>            change a ticket's status ({statuses})
  refresh                      reload tickets and stats
  show                         redraw the board
  help                         show this help
  quit                         leave",
        categories = category_names(),
        priorities = priority_names(),
        statuses = status_names(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Title(String),
    Description(String),
    Category(Category),
    Priority(Priority),
    Submit,
    Search(String),
    FilterStatus(Option<Status>),
    FilterCategory(Option<Category>),
    FilterPriority(Option<Priority>),
    SetStatus(TicketId, Status),
    Refresh,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BoardCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "title" => Ok(BoardCommand::Title(rest.to_string())),
        "desc" | "description" => Ok(BoardCommand::Description(rest.to_string())),
        "category" => parse_category(rest).map(BoardCommand::Category),
        "priority" => parse_priority(rest).map(BoardCommand::Priority),
        "submit" => Ok(BoardCommand::Submit),
        "search" => Ok(BoardCommand::Search(rest.to_string())),
        "filter" => parse_filter(rest),
        "set" => {
            let (id, status) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <id> <status>".to_string())?;
            Ok(BoardCommand::SetStatus(
                parse_ticket_id(id)?,
                parse_status(status.trim())?,
            ))
        }
        "refresh" => Ok(BoardCommand::Refresh),
        "show" | "" => Ok(BoardCommand::Show),
        "help" | "?" => Ok(BoardCommand::Help),
        "quit" | "exit" | "q" => Ok(BoardCommand::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

fn parse_filter(rest: &str) -> Result<BoardCommand, String> {
    let (field, value) = rest
        .split_once(char::is_whitespace)
        .map(|(field, value)| (field, value.trim()))
        .ok_or_else(|| "usage: filter status|category|priority <value|all>".to_string())?;
    let cleared = value.eq_ignore_ascii_case("all") || value.is_empty();

    match field.to_lowercase().as_str() {
        "status" if cleared => Ok(BoardCommand::FilterStatus(None)),
        "status" => parse_status(value).map(|s| BoardCommand::FilterStatus(Some(s))),
        "category" if cleared => Ok(BoardCommand::FilterCategory(None)),
        "category" => parse_category(value).map(|c| BoardCommand::FilterCategory(Some(c))),
        "priority" if cleared => Ok(BoardCommand::FilterPriority(None)),
        "priority" => parse_priority(value).map(|p| BoardCommand::FilterPriority(Some(p))),
        other => Err(format!("cannot filter by '{other}'")),
    }
}

pub async fn run(ctx: &AppContext, args: BoardArgs) -> AppResult<()> {
    let mut options = if args.minimal {
        BoardOptions::minimal()
    } else {
        ctx.config.board
    };
    if args.plain {
        options.styled = false;
    }

    let mut board = ctx.board_with(options);
    let mut activity = board.subscribe();
    let progress = tokio::spawn(async move {
        while activity.changed().await.is_ok() {
            if let Some(indicator) = activity.borrow_and_update().indicator() {
                eprintln!("{indicator}");
            }
        }
    });

    board.mount().await?;
    println!("{}", render(&board));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };
        if command == BoardCommand::Quit {
            break;
        }
        if command == BoardCommand::Help {
            println!("{}", help_text());
            continue;
        }

        // Submit and status failures are shown; the board keeps going.
        if let Err(err) = apply(&mut board, command).await {
            eprintln!("Error: {err}");
        }
        println!("{}", render(&board));
        board.take_notice();
    }

    progress.abort();
    Ok(())
}

pub async fn apply(board: &mut TicketBoard, command: BoardCommand) -> AppResult<()> {
    match command {
        BoardCommand::Title(title) => board.set_title(title),
        BoardCommand::Description(description) => {
            board.set_description(description);
            board.blur_description().await;
        }
        BoardCommand::Category(category) => board.set_category(category),
        BoardCommand::Priority(priority) => board.set_priority(priority),
        BoardCommand::Submit => {
            board.submit().await?;
        }
        BoardCommand::Search(search) => board.set_search(search).await,
        BoardCommand::FilterStatus(status) => board.set_status_filter(status).await,
        BoardCommand::FilterCategory(category) => board.set_category_filter(category).await,
        BoardCommand::FilterPriority(priority) => board.set_priority_filter(priority).await,
        BoardCommand::SetStatus(id, status) => board.change_status(id, status).await?,
        BoardCommand::Refresh => board.refresh().await,
        BoardCommand::Show | BoardCommand::Help | BoardCommand::Quit => {}
    }
    Ok(())
}
