//! Offline list view over a JSON card snapshot.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::anyhow;
use devmitra_ui::core::list::{CardAttributes, CardRecord, ListController, SortKey, StatusFilter};
use devmitra_ui::features::EntityPage;

use crate::cli::{ListArgs, OutputFormat};
use crate::client::{CliError, CliResult};
use crate::output::render_list;

/// Decode a snapshot: a JSON array of rendered card attributes.
pub(crate) fn load_snapshot(reader: impl Read) -> CliResult<Vec<CardRecord>> {
    let attributes: Vec<CardAttributes> = serde_json::from_reader(reader)
        .map_err(|err| CliError::validation(format!("invalid card snapshot: {err}")))?;
    Ok(attributes.into_iter().map(CardRecord::from_attributes).collect())
}

fn read_snapshot(path: &Path) -> CliResult<Vec<CardRecord>> {
    if path.as_os_str() == "-" {
        return load_snapshot(io::stdin().lock());
    }
    let file = File::open(path).map_err(|err| {
        CliError::failure(anyhow!("failed to open snapshot '{}': {err}", path.display()))
    })?;
    load_snapshot(BufReader::new(file))
}

/// Build the controller for `page` and apply the requested query.
pub(crate) fn build_list(
    page: &EntityPage,
    records: Vec<CardRecord>,
    args: &ListArgs,
) -> CliResult<ListController> {
    let mut list = page
        .controller(records)
        .map_err(|err| CliError::validation(err.to_string()))?;

    if let Some(filter) = args.filter.as_deref() {
        if !page.filters.iter().any(|choice| choice.value == filter.trim()) {
            let known: Vec<&str> = page.filters.iter().map(|choice| choice.value).collect();
            return Err(CliError::validation(format!(
                "unknown filter '{filter}' (expected one of: {})",
                known.join(", ")
            )));
        }
        list.set_filter(StatusFilter::from_value(filter));
    }
    if let Some(sort) = args.sort.as_deref() {
        let key = SortKey::from_value(sort)
            .filter(|key| page.sorts.iter().any(|choice| choice.key == *key))
            .ok_or_else(|| {
                let known: Vec<&str> = page.sorts.iter().map(|choice| choice.key.as_value()).collect();
                CliError::validation(format!(
                    "unknown sort '{sort}' (expected one of: {})",
                    known.join(", ")
                ))
            })?;
        list.set_sort(Some(key));
    }
    if let Some(search) = &args.search {
        list.set_search(search.clone());
    }
    tracing::debug!(
        kind = %page.kind,
        visible = list.view().visible_count(),
        total = list.view().total,
        "list projected"
    );
    Ok(list)
}

pub(crate) fn handle_list(args: &ListArgs, output: OutputFormat) -> CliResult<()> {
    let page = EntityPage::for_kind(args.entity);
    let records = read_snapshot(&args.snapshot)?;
    let list = build_list(page, records, args)?;
    render_list(page, &list, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devmitra_api_models::EntityKind;
    use std::path::PathBuf;

    const SNAPSHOT: &str = r#"[
        {"id": "1", "title": "Alpha", "date": "2024-01-01", "status": "active"},
        {"id": "2", "title": "Beta", "date": "2024-02-01", "status": "completed"},
        {"id": "3", "title": "Gamma", "date": "2024-03-01", "status": "active",
         "secondary": ["Rust, Yew"]}
    ]"#;

    fn args(filter: Option<&str>, sort: Option<&str>, search: Option<&str>) -> ListArgs {
        ListArgs {
            entity: EntityKind::Project,
            snapshot: PathBuf::from("-"),
            search: search.map(str::to_string),
            filter: filter.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    fn titles(list: &ListController) -> Vec<&str> {
        list.visible_records()
            .into_iter()
            .map(|record| record.title.as_str())
            .collect()
    }

    #[test]
    fn active_filter_sorted_newest_first() {
        let records = load_snapshot(SNAPSHOT.as_bytes()).expect("snapshot");
        let list = build_list(
            EntityPage::for_kind(EntityKind::Project),
            records,
            &args(Some("active"), Some("newest"), None),
        )
        .expect("list");
        assert_eq!(titles(&list), vec!["Gamma", "Alpha"]);
    }

    #[test]
    fn search_matches_secondary_text_and_reports_empty_state() {
        let page = EntityPage::for_kind(EntityKind::Project);
        let records = load_snapshot(SNAPSHOT.as_bytes()).expect("snapshot");
        let list = build_list(page, records.clone(), &args(None, None, Some("yew"))).expect("list");
        assert_eq!(titles(&list), vec!["Gamma"]);

        let list = build_list(page, records, &args(None, None, Some("zzz"))).expect("list");
        assert!(list.view().empty_state());
        assert!(!list.view().grid_visible());
    }

    #[test]
    fn unknown_filter_and_sort_are_validation_errors() {
        let page = EntityPage::for_kind(EntityKind::Project);
        let records = load_snapshot(SNAPSHOT.as_bytes()).expect("snapshot");
        let err = build_list(page, records.clone(), &args(Some("archived"), None, None))
            .expect_err("unknown filter");
        assert!(matches!(err, CliError::Validation(message) if message.contains("archived")));

        let err = build_list(page, records, &args(None, Some("proficiency"), None))
            .expect_err("sort not offered on projects");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn snapshot_with_unknown_status_is_rejected() {
        let records = load_snapshot(
            r#"[{"id": "1", "title": "Alpha", "status": "archived"}]"#.as_bytes(),
        )
        .expect("snapshot");
        let err = build_list(
            EntityPage::for_kind(EntityKind::Project),
            records,
            &args(None, None, None),
        )
        .expect_err("invalid snapshot");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_snapshot_is_a_validation_error() {
        let err = load_snapshot("{".as_bytes()).expect_err("malformed");
        assert!(matches!(err, CliError::Validation(message) if message.starts_with("invalid card snapshot")));
    }
}
