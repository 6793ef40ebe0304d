use chrono_tz::Tz;
use colored::Colorize;

use crate::cli::commands::session::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::log_page::{LogPage, LogQuery, LogRow};
use crate::core::services::query_service::LogBrowser;

/// Execute the `actlog logs` command.
///
/// Shows one page of the activity log with optional date range and
/// username filters. Only actors allowed to manage options get data.
pub fn execute(query: LogQuery, actor: Option<&str>) -> Result<()> {
    let session = Session::open(actor, None)?;
    let tz = session.config.display.timezone()?;

    let page = LogBrowser::new(session.store.as_ref(), &session.host).browse(&session.ctx, query)?;

    output::header("Activity Logs");
    output::field("Start date", page.query.start_date.as_deref());
    output::field("End date", page.query.end_date.as_deref());
    output::field("Username", page.query.username.as_deref());
    println!();

    print_table(&page, tz);
    print_pagination(&page);

    Ok(())
}

fn print_table(page: &LogPage, tz: Tz) {
    println!(
        "  {:>6} {} {:<16} {} {:<15} {} {}",
        "ID".bold(),
        "│".dimmed(),
        "User".bold(),
        "│".dimmed(),
        "IP Address".bold(),
        "│".dimmed(),
        "Timestamp / Activity".bold(),
    );

    if page.is_empty() {
        println!("  {}", "No logs found.".dimmed());
        return;
    }

    for row in &page.rows {
        print_row(row, tz);
    }
}

/// Print a single log row; the activity goes on its own line.
fn print_row(row: &LogRow, tz: Tz) {
    println!(
        "  {:>6} {} {:<16} {} {:<15} {} {}",
        row.entry.id,
        "│".dimmed(),
        row.actor_name.cyan(),
        "│".dimmed(),
        row.entry.origin_address,
        "│".dimmed(),
        format_timestamp(row, tz).dimmed(),
    );
    println!("  {:>6}   {}", "", row.entry.message);
}

/// Render the stored UTC timestamp in the display timezone.
fn format_timestamp(row: &LogRow, tz: Tz) -> String {
    row.entry
        .created_at
        .with_timezone(&tz)
        .format("%B %d, %Y %-I:%M %p")
        .to_string()
}

fn print_pagination(page: &LogPage) {
    if !page.has_more_pages() {
        return;
    }
    println!();
    println!(
        "  Page {} of {} ({} entries)",
        page.current_page, page.total_pages, page.total
    );
    if page.current_page < page.total_pages {
        println!(
            "  {}",
            format!("Next: --page {}", page.current_page.saturating_add(1)).dimmed()
        );
    }
}
