use owo_colors::{AnsiColors, OwoColorize};

use crate::board::TicketBoard;
use crate::domain::stats::StatsSnapshot;
use crate::domain::ticket::{Category, Priority, Status, Ticket};

const HEADER: &str = "Support Ticket System";

pub fn render(board: &TicketBoard) -> String {
    let styled = board.options().styled;
    let mut out = format!(
        "{}\n{}\n",
        paint(HEADER, AnsiColors::Blue, styled),
        "=".repeat(HEADER.len())
    );
    if let Some(notice) = board.notice() {
        out.push_str(&paint(notice, AnsiColors::Green, styled));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_composer(board));
    if let Some(stats) = board.stats().filter(|_| board.options().show_stats) {
        out.push('\n');
        out.push_str(&render_stats(stats, styled));
    }
    out.push('\n');
    out.push_str(&render_filters(board));
    out.push('\n');
    out.push_str(&render_tickets(board.tickets(), styled));
    out
}

fn render_composer(board: &TicketBoard) -> String {
    let draft = board.draft();
    let mut lines = vec![
        "New ticket".to_string(),
        format!("  Title:       {}", or_placeholder(&draft.title)),
        format!("  Description: {}", or_placeholder(&draft.description)),
        format!(
            "  Category:    {}   Priority: {}",
            draft.category.label(),
            draft.priority.label()
        ),
    ];
    if let Some(indicator) = board.activity().indicator() {
        lines.push(format!("  {indicator}"));
    }
    join_lines(lines)
}

pub fn render_stats(stats: &StatsSnapshot, styled: bool) -> String {
    let mut lines = vec![format!(
        "Total: {}   Open: {}   Avg per day: {}   Critical: {}",
        stats.total_tickets,
        paint(&stats.open_tickets.to_string(), AnsiColors::Blue, styled),
        stats.avg_tickets_per_day,
        paint(
            &stats.priority_count(Priority::Critical).to_string(),
            AnsiColors::Red,
            styled
        ),
    )];
    let priorities = Priority::ALL
        .iter()
        .map(|priority| format!("{} {}", priority.as_str(), stats.priority_count(*priority)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("  By priority: {priorities}"));
    if !stats.category_breakdown.is_empty() {
        let categories = Category::ALL
            .iter()
            .map(|category| format!("{} {}", category.as_str(), stats.category_count(*category)))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  By category: {categories}"));
    }
    join_lines(lines)
}

fn render_filters(board: &TicketBoard) -> String {
    let query = board.query();
    let mut line = format!(
        "Search: {}   Status: {}",
        or_placeholder(&query.search),
        query.status.map(|status| status.label()).unwrap_or("All")
    );
    if let Some(category) = query.category {
        line.push_str(&format!("   Category: {}", category.label()));
    }
    if let Some(priority) = query.priority {
        line.push_str(&format!("   Priority: {}", priority.label()));
    }
    line.push('\n');
    line
}

pub fn render_tickets(tickets: &[Ticket], styled: bool) -> String {
    if tickets.is_empty() {
        return "No tickets found. Create your first ticket or adjust your filters.\n".to_string();
    }

    let mut lines = vec![format!("Tickets ({})", tickets.len())];
    for ticket in tickets {
        lines.push(format!(
            "  #{} {} {} {}",
            ticket.id,
            badge(ticket.category.as_str(), category_color(ticket.category), styled),
            badge(ticket.priority.as_str(), priority_color(ticket.priority), styled),
            ticket.title
        ));
        if !ticket.description.is_empty() {
            lines.push(format!("      {}", ticket.description));
        }
        lines.push(format!(
            "      Status: {}",
            paint(ticket.status.label(), status_color(ticket.status), styled)
        ));
    }
    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn badge(text: &str, color: AnsiColors, styled: bool) -> String {
    paint(&format!("[{}]", text.to_uppercase()), color, styled)
}

fn paint(text: &str, color: AnsiColors, styled: bool) -> String {
    if styled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn priority_color(priority: Priority) -> AnsiColors {
    match priority {
        Priority::Critical => AnsiColors::Red,
        Priority::High => AnsiColors::BrightRed,
        Priority::Medium => AnsiColors::Yellow,
        Priority::Low => AnsiColors::Green,
    }
}

fn category_color(category: Category) -> AnsiColors {
    match category {
        Category::Billing => AnsiColors::Magenta,
        Category::Technical => AnsiColors::Blue,
        Category::Account => AnsiColors::Cyan,
        Category::General => AnsiColors::White,
    }
}

fn status_color(status: Status) -> AnsiColors {
    match status {
        Status::Open => AnsiColors::Blue,
        Status::InProgress => AnsiColors::Yellow,
        Status::Resolved => AnsiColors::Green,
        Status::Closed => AnsiColors::BrightBlack,
    }
}
