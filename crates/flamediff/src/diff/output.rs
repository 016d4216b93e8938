//! Terminal output rendering for diff results.
//!
//! Provides a human-readable summary of a comparison with visual cues for
//! growth and shrinkage. Written to stderr by the CLI, never to the folded
//! output stream.

use colored::*;

use super::schema::{DiffResult, DiffRow};

/// Rows shown in the summary unless overridden
pub const DEFAULT_TOP_ROWS: usize = 10;

/// Render a human-readable summary of a diff result for the terminal
pub fn render_terminal_diff(result: &DiffResult, top: usize) -> String {
    let mut out = String::new();

    out.push_str(&render_header(result));
    out.push_str(&render_totals(result));
    out.push_str(&render_top_changes(result, top));
    out.push_str(&render_footer(result));

    out
}

fn render_header(result: &DiffResult) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&"Folded Profile Comparison".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Mode:     {}\n", result.mode));
    out.push_str(&format!(
        "Lines:    A {} parsed / {} skipped, B {} parsed / {} skipped\n",
        result.stats_a.parsed, result.stats_a.skipped, result.stats_b.parsed, result.stats_b.skipped
    ));
    out.push_str("---------------------------------------------------\n\n");
    out
}

fn render_totals(result: &DiffResult) -> String {
    let totals = result.totals;
    let change = totals.b - totals.a;
    let percent = if totals.a > 0.0 {
        change / totals.a * 100.0
    } else {
        0.0
    };
    format!(
        "{} Total Samples: {} -> {} ({:+.2}%)\n",
        get_delta_symbol(change),
        totals.a,
        totals.b,
        percent
    )
}

fn render_top_changes(result: &DiffResult, top: usize) -> String {
    let mut out = String::new();

    let mut changed: Vec<&DiffRow> = result.rows.iter().filter(|row| row.delta != 0.0).collect();
    if changed.is_empty() || top == 0 {
        return out;
    }

    changed.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));

    out.push_str("\nLargest Changes:\n");
    for row in changed.iter().take(top) {
        let line = format!(
            "  {} {}: {} -> {} ({:+}, {:.2}%)",
            get_delta_symbol(row.delta),
            shorten_stack(&row.stack),
            row.count_a,
            row.count_b,
            row.delta,
            row.relative_change_percent()
        );
        let line = if row.delta > 0.0 { line.red() } else { line.green() };
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

fn render_footer(result: &DiffResult) -> String {
    let mut out = String::new();
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(
        &format!("✅ {} rows written", result.rows.len())
            .green()
            .bold()
            .to_string(),
    );
    out.push('\n');
    out
}

fn get_delta_symbol(change: f64) -> &'static str {
    if change > 0.0 {
        "📈"
    } else if change < 0.0 {
        "📉"
    } else {
        "➡️"
    }
}

fn shorten_stack(stack: &str) -> String {
    let parts: Vec<&str> = stack.split(';').collect();
    if parts.len() <= 2 {
        stack.to_string()
    } else {
        format!("...;{};{}", parts[parts.len() - 2], parts[parts.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::schema::{DiffMode, IngestStats, Totals};

    fn sample_result() -> DiffResult {
        DiffResult {
            mode: DiffMode::Flat,
            totals: Totals { a: 15.0, b: 15.0 },
            stats_a: IngestStats { parsed: 2, skipped: 0 },
            stats_b: IngestStats { parsed: 2, skipped: 1 },
            rows: vec![
                DiffRow::new("main;a;b;c", 10.0, 12.0),
                DiffRow::new("main;d", 5.0, 0.0),
                DiffRow::new("main;e", 3.0, 3.0),
            ],
        }
    }

    #[test]
    fn test_shorten_stack() {
        assert_eq!(shorten_stack("a;b"), "a;b");
        assert_eq!(shorten_stack("main;a;b;c"), "...;b;c");
    }

    #[test]
    fn test_render_orders_by_absolute_delta() {
        colored::control::set_override(false);
        let out = render_terminal_diff(&sample_result(), 10);

        assert!(out.contains("Mode:     flat"));
        assert!(out.contains("Total Samples: 15 -> 15 (+0.00%)"));
        let removed = out.find("main;d: 5 -> 0").unwrap();
        let grown = out.find("...;b;c: 10 -> 12").unwrap();
        assert!(removed < grown);
        // Unchanged rows are not listed
        assert!(!out.contains("main;e:"));
        assert!(out.contains("3 rows written"));
    }

    #[test]
    fn test_render_respects_top() {
        colored::control::set_override(false);
        let out = render_terminal_diff(&sample_result(), 1);
        assert!(out.contains("main;d"));
        assert!(!out.contains("...;b;c"));
    }
}
