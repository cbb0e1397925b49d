//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use devmitra_ui::core::list::ListController;
use devmitra_ui::features::EntityPage;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_list(
    page: &EntityPage,
    list: &ListController,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&list.visible_records())
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => print!("{}", format_table(page, list)),
    }
    Ok(())
}

/// Table rendering: filter counts, visible rows, then a result footer.
#[must_use]
pub(crate) fn format_table(page: &EntityPage, list: &ListController) -> String {
    let mut out = String::new();
    let filters: Vec<String> = list
        .filter_options(page.filters)
        .into_iter()
        .map(|option| {
            let marker = if option.active { "*" } else { "" };
            format!("{}{marker} ({})", option.value, option.count)
        })
        .collect();
    let _ = writeln!(out, "{}  [{}]", page.heading, filters.join(", "));

    let view = list.view();
    if view.empty_state() {
        let _ = writeln!(out, "{}", page.empty_title);
        let _ = writeln!(out, "{}", page.empty_hint);
        return out;
    }

    let _ = writeln!(
        out,
        "{:<8} {:<12} {:<10} {:>6} {:<6} TITLE",
        "ID", "STATUS", "DATE", "METRIC", "ACTIVE"
    );
    for record in list.visible_records() {
        let date = record
            .timestamp
            .map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d").to_string());
        let metric = record
            .metric
            .map_or_else(|| "-".to_string(), |value| value.to_string());
        let active = if record.is_active { "yes" } else { "no" };
        let _ = writeln!(
            out,
            "{:<8} {:<12} {:<10} {:>6} {:<6} {}",
            record.id.as_str(),
            record.status,
            date,
            metric,
            active,
            record.title
        );
    }
    let _ = writeln!(out, "{} of {} shown", view.visible_count(), view.total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use devmitra_ui::core::list::{CardRecord, StatusFilter};
    use devmitra_ui::features::skills;

    fn skills_list() -> ListController {
        skills::PAGE
            .controller(vec![
                CardRecord::new("1", "Rust", "active").with_metric(90),
                CardRecord::new("2", "Go", "inactive").with_metric(60),
            ])
            .expect("valid snapshot")
    }

    #[test]
    fn table_lists_rows_with_counts_and_footer() {
        let table = format_table(&skills::PAGE, &skills_list());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].contains("all* (2)"));
        assert!(lines[0].contains("inactive (1)"));
        assert!(lines[2].starts_with("1 "));
        assert!(lines[2].ends_with("Rust"));
        assert_eq!(lines.last().copied(), Some("2 of 2 shown"));
    }

    #[test]
    fn empty_view_prints_empty_state() {
        let mut list = skills_list();
        list.set_search("zzz");
        list.set_filter(StatusFilter::from_value("active"));
        let table = format_table(&skills::PAGE, &list);
        assert!(table.contains(skills::PAGE.empty_title));
        assert!(!table.contains("TITLE"));
    }
}
