//! Plain-text views of the session for the terminal.

use crate::session::{ChatHistory, MethodSummary, QueryLog};

pub const NO_HISTORY: &str = "No conversation yet.";
pub const NO_QUERIES: &str = "No queries yet to display.";

const BAR_WIDTH: usize = 30;

/// Numbered transcript of the session.
pub fn render_history(history: &ChatHistory) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }

    let mut output = String::new();
    for (n, turn) in history.numbered() {
        output.push_str(&format!("{}. You: {}\n", n, turn.query));
        output.push_str(&format!("   Assistant: {}\n", turn.response));
    }
    output
}

/// Query table followed by a per-method bar summary.
pub fn render_dashboard(log: &QueryLog, summary: &MethodSummary) -> String {
    if log.is_empty() {
        return NO_QUERIES.to_string();
    }

    let query_width = log
        .records()
        .iter()
        .map(|r| r.query.chars().count())
        .max()
        .unwrap_or(0)
        .max("Query".len());

    let mut output = String::new();
    output.push_str("Query Analytics\n\n");
    output.push_str(&format!(
        "{:<qw$}  {:<6}  {}\n",
        "Query",
        "Method",
        "Rating",
        qw = query_width
    ));
    output.push_str(&format!("{}\n", "-".repeat(query_width + 16)));

    for record in log.records() {
        let rating = record
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<qw$}  {:<6}  {}\n",
            record.query,
            record.method,
            rating,
            qw = query_width
        ));
    }

    output.push_str("\nNumber of Queries\n");
    let max = summary
        .counts()
        .iter()
        .map(|(_, n)| *n)
        .max()
        .unwrap_or(0)
        .max(1);
    for (policy, count) in summary.counts() {
        let bar = "#".repeat(count * BAR_WIDTH / max);
        output.push_str(&format!("{:<6}  {:<bw$}  {}\n", policy, bar, count, bw = BAR_WIDTH));
    }
    output
}
