//! List controller: search, filter and sort over a snapshot of rendered cards.
//!
//! # Design
//! - [`project`] is a pure function of records and query; rendering is a separate step.
//! - The controller owns the snapshot and the live query and recomputes on every input.
//! - Sorting is stable and descending keys compare in reverse, so ties keep snapshot order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wildcard filter value shown on the "All" button.
pub const FILTER_ALL: &str = "all";

/// Opaque identifier of a rendered card.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CardId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Raw card attributes as the server renders them (`data-*` values).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAttributes {
    /// `data-id`.
    pub id: String,
    /// `data-title`.
    pub title: String,
    #[serde(default)]
    /// `data-date`.
    pub date: Option<String>,
    #[serde(default)]
    /// `data-status`.
    pub status: String,
    #[serde(default)]
    /// `data-secondary` plus the text of any searchable child element.
    pub secondary: Vec<String>,
    #[serde(default)]
    /// `data-metric` (or the legacy `data-proficiency`).
    pub metric: Option<String>,
    #[serde(default)]
    /// `data-labels`, comma separated.
    pub labels: Option<String>,
    #[serde(default)]
    /// `data-active`.
    pub active: Option<String>,
}

/// A card as seen by the list controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Unique identifier within the view.
    pub id: CardId,
    /// Display title; searched and used for alphabetic sort.
    pub title: String,
    /// Date used for newest/oldest sort.
    pub timestamp: Option<NaiveDateTime>,
    /// Primary filter tag.
    pub status: String,
    /// Additional searchable strings (issuer, company, e-mail, ...).
    pub secondary_text: Vec<String>,
    /// Ordinal value used for metric sort (e.g. proficiency).
    pub metric: Option<i64>,
    /// Extra filter tags (e.g. contact-response priority).
    pub labels: Vec<String>,
    /// Last server-confirmed active flag.
    pub is_active: bool,
}

impl CardRecord {
    /// Minimal record with a title and status; other fields empty.
    #[must_use]
    pub fn new(id: impl Into<CardId>, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            timestamp: None,
            status: status.into(),
            secondary_text: Vec::new(),
            metric: None,
            labels: Vec::new(),
            is_active: true,
        }
    }

    /// Builder-style timestamp setter accepting the rendered date text.
    #[must_use]
    pub fn dated(mut self, raw: &str) -> Self {
        self.timestamp = parse_timestamp(raw);
        self
    }

    /// Builder-style metric setter.
    #[must_use]
    pub const fn with_metric(mut self, metric: i64) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Builder-style secondary text setter.
    #[must_use]
    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text.push(text.into());
        self
    }

    /// Builder-style label setter.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Build a record from rendered attributes.
    #[must_use]
    pub fn from_attributes(attributes: CardAttributes) -> Self {
        let CardAttributes {
            id,
            title,
            date,
            status,
            secondary,
            metric,
            labels,
            active,
        } = attributes;
        Self {
            id: CardId::new(id.trim()),
            title,
            timestamp: date.as_deref().and_then(parse_timestamp),
            status: status.trim().to_string(),
            secondary_text: secondary
                .into_iter()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .collect(),
            metric: metric.as_deref().and_then(parse_metric),
            labels: labels
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|label| !label.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            is_active: active.as_deref().is_none_or(parse_flag),
        }
    }

    /// Every filter tag carried by the record.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.status.as_str()).chain(self.labels.iter().map(String::as_str))
    }

    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self
                .secondary_text
                .iter()
                .any(|text| text.to_lowercase().contains(needle))
    }
}

/// Parse a rendered date (RFC 3339, ISO date-time, or ISO date).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_utc());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse the leading integer of a rendered metric ("85", "85%").
#[must_use]
pub fn parse_metric(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (sign, digits) = raw
        .strip_prefix('-')
        .map_or((1, raw), |rest| (-1, rest));
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(index, _)| index);
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off" | "inactive"
    )
}

/// Sort orders offered by the list toolbars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most recent first.
    Newest,
    /// Oldest first.
    Oldest,
    /// Title A to Z.
    TitleAsc,
    /// Title Z to A.
    TitleDesc,
    /// Highest metric first.
    MetricDesc,
    /// Lowest metric first.
    MetricAsc,
}

impl SortKey {
    /// Parse a sort `<select>` value. Unknown values yield `None`.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "newest" | "date-desc" => Some(Self::Newest),
            "oldest" | "date-asc" => Some(Self::Oldest),
            "title-az" | "name-az" | "name" | "title-asc" => Some(Self::TitleAsc),
            "title-za" | "name-za" | "title-desc" => Some(Self::TitleDesc),
            "proficiency" | "metric-desc" => Some(Self::MetricDesc),
            "lowest" | "metric-asc" => Some(Self::MetricAsc),
            _ => None,
        }
    }

    /// Canonical `<select>` value.
    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::TitleAsc => "title-az",
            Self::TitleDesc => "title-za",
            Self::MetricDesc => "proficiency",
            Self::MetricAsc => "lowest",
        }
    }

    /// Compare two records under this key.
    #[must_use]
    pub fn compare(self, left: &CardRecord, right: &CardRecord) -> Ordering {
        match self {
            Self::Newest => compare_present_first(left.timestamp, right.timestamp, true),
            Self::Oldest => compare_present_first(left.timestamp, right.timestamp, false),
            Self::TitleAsc => left.title.to_lowercase().cmp(&right.title.to_lowercase()),
            Self::TitleDesc => right.title.to_lowercase().cmp(&left.title.to_lowercase()),
            Self::MetricDesc => compare_present_first(left.metric, right.metric, true),
            Self::MetricAsc => compare_present_first(left.metric, right.metric, false),
        }
    }
}

// Missing values sort after present ones in both directions.
fn compare_present_first<T: Ord>(left: Option<T>, right: Option<T>, descending: bool) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => {
            if descending {
                right.cmp(&left)
            } else {
                left.cmp(&right)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Category filter applied to card tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Show every card.
    #[default]
    All,
    /// Show cards whose status or labels equal the tag.
    Tag(String),
}

impl StatusFilter {
    /// Parse a filter button value; blank and `all` map to [`StatusFilter::All`].
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == FILTER_ALL {
            Self::All
        } else {
            Self::Tag(value.to_string())
        }
    }

    /// Button value for this filter.
    #[must_use]
    pub fn as_value(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Tag(tag) => tag,
        }
    }

    /// Whether the record passes this filter.
    #[must_use]
    pub fn matches(&self, record: &CardRecord) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => record.tags().any(|candidate| candidate == tag),
        }
    }
}

/// Live list inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Raw search text; matched case-insensitively and untrimmed.
    pub search: String,
    /// Category filter.
    pub filter: StatusFilter,
    /// Sort order; `None` keeps snapshot order.
    pub sort: Option<SortKey>,
}

impl ListQuery {
    /// Query with the given sort and no search or filter.
    #[must_use]
    pub fn sorted(sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }

    /// Apply a `filter=` parameter from a page query string (`?filter=active`).
    #[must_use]
    pub fn with_query_string(mut self, query_string: &str) -> Self {
        let pairs = query_string.trim_start_matches('?').split('&');
        for pair in pairs {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == "filter" {
                let decoded = urlencoding::decode(&value.replace('+', " "))
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_else(|_| value.to_string());
                self.filter = StatusFilter::from_value(&decoded);
            }
        }
        self
    }

    /// Whether a record passes search and filter.
    #[must_use]
    pub fn matches(&self, record: &CardRecord) -> bool {
        self.filter.matches(record) && record.matches_search(&self.search.to_lowercase())
    }
}

/// Result of one filter/sort pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListView {
    /// Visible card ids in display order.
    pub visible_ids: Vec<CardId>,
    /// Number of cards in the snapshot.
    pub total: usize,
}

impl ListView {
    /// Number of visible cards.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_ids.len()
    }

    /// Whether the empty-state placeholder replaces the grid.
    #[must_use]
    pub const fn empty_state(&self) -> bool {
        self.visible_ids.is_empty()
    }

    /// Whether the grid container is rendered.
    #[must_use]
    pub const fn grid_visible(&self) -> bool {
        !self.empty_state()
    }

    /// Whether the card with `id` is shown.
    #[must_use]
    pub fn is_visible(&self, id: &CardId) -> bool {
        self.visible_ids.contains(id)
    }
}

/// Compute the visible, ordered subset of `records` for `query`.
#[must_use]
pub fn project(records: &[CardRecord], query: &ListQuery) -> ListView {
    let mut visible: Vec<&CardRecord> = records.iter().filter(|record| query.matches(record)).collect();
    if let Some(sort) = query.sort {
        visible.sort_by(|left, right| sort.compare(left, right));
    }
    ListView {
        visible_ids: visible.into_iter().map(|record| record.id.clone()).collect(),
        total: records.len(),
    }
}

/// Snapshot validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ListError {
    /// Two cards share an id.
    #[error("duplicate card id '{0}'")]
    DuplicateId(CardId),
    /// A card carries a tag the page does not offer.
    #[error("card '{id}' has unknown category '{tag}'")]
    UnknownTag {
        /// Offending card.
        id: CardId,
        /// Unknown tag value.
        tag: String,
    },
    /// The referenced card is not in the snapshot.
    #[error("card '{0}' is not in the list")]
    MissingCard(CardId),
}

/// Filter button description supplied by a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterChoice {
    /// Button value (`all` or a tag).
    pub value: &'static str,
    /// Button label.
    pub label: &'static str,
}

/// Filter button state ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    /// Button value.
    pub value: String,
    /// Button label.
    pub label: String,
    /// Number of cards the filter would show, ignoring search.
    pub count: usize,
    /// Whether this is the current filter.
    pub active: bool,
}

/// Stateful list controller for one page section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListController {
    records: Vec<CardRecord>,
    known_tags: BTreeSet<String>,
    query: ListQuery,
    view: ListView,
    controls: BTreeMap<CardId, bool>,
}

impl ListController {
    /// Snapshot `records`, validating ids and tags against `known_tags`.
    ///
    /// An empty `known_tags` set accepts any tag.
    ///
    /// # Errors
    /// Returns [`ListError::DuplicateId`] or [`ListError::UnknownTag`] when the
    /// snapshot breaks the page invariants.
    pub fn new<I, S>(records: Vec<CardRecord>, known_tags: I) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known_tags: BTreeSet<String> = known_tags.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(ListError::DuplicateId(record.id.clone()));
            }
            if let Some(tag) = unknown_tag(&known_tags, record) {
                return Err(ListError::UnknownTag {
                    id: record.id.clone(),
                    tag: tag.to_string(),
                });
            }
        }
        let query = ListQuery::default();
        let view = project(&records, &query);
        Ok(Self {
            records,
            known_tags,
            query,
            view,
            controls: BTreeMap::new(),
        })
    }

    /// Replace the whole query and recompute.
    #[must_use]
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self.refresh();
        self
    }

    /// Records in snapshot order.
    #[must_use]
    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn record(&self, id: &CardId) -> Option<&CardRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Current query.
    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Result of the last pass.
    #[must_use]
    pub const fn view(&self) -> &ListView {
        &self.view
    }

    /// Visible records in display order.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&CardRecord> {
        self.view
            .visible_ids
            .iter()
            .filter_map(|id| self.record(id))
            .collect()
    }

    /// Update the search text and recompute.
    pub fn set_search(&mut self, search: impl Into<String>) -> &ListView {
        self.query.search = search.into();
        self.refresh()
    }

    /// Update the category filter and recompute.
    pub fn set_filter(&mut self, filter: StatusFilter) -> &ListView {
        self.query.filter = filter;
        self.refresh()
    }

    /// Update the sort order and recompute.
    pub fn set_sort(&mut self, sort: Option<SortKey>) -> &ListView {
        self.query.sort = sort;
        self.refresh()
    }

    /// Recompute visibility and order for the current query.
    pub fn refresh(&mut self) -> &ListView {
        self.view = project(&self.records, &self.query);
        tracing::debug!(
            visible = self.view.visible_count(),
            total = self.view.total,
            filter = self.query.filter.as_value(),
            "list recomputed"
        );
        &self.view
    }

    /// Drop a record from the snapshot and recompute.
    pub fn remove(&mut self, id: &CardId) -> Option<CardRecord> {
        let index = self.records.iter().position(|record| &record.id == id)?;
        let removed = self.records.remove(index);
        self.controls.remove(id);
        self.refresh();
        Some(removed)
    }

    /// Replace the record with the same id, or append it, then recompute.
    ///
    /// # Errors
    /// Returns [`ListError::UnknownTag`] when the record carries a tag the page does not offer.
    pub fn upsert(&mut self, record: CardRecord) -> Result<(), ListError> {
        if let Some(tag) = unknown_tag(&self.known_tags, &record) {
            return Err(ListError::UnknownTag {
                id: record.id.clone(),
                tag: tag.to_string(),
            });
        }
        match self.records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.refresh();
        Ok(())
    }

    /// Commit a server-confirmed active flag. Returns `false` for unknown ids.
    pub fn set_active(&mut self, id: &CardId, is_active: bool) -> bool {
        let Some(record) = self.records.iter_mut().find(|record| &record.id == id) else {
            return false;
        };
        record.is_active = is_active;
        self.controls.remove(id);
        true
    }

    /// Move a record to another status tag and recompute.
    ///
    /// # Errors
    /// Returns [`ListError::MissingCard`] for unknown ids and
    /// [`ListError::UnknownTag`] when the tag is not offered by the page.
    pub fn set_status(&mut self, id: &CardId, status: &str) -> Result<(), ListError> {
        if !self.known_tags.is_empty() && !self.known_tags.contains(status) {
            return Err(ListError::UnknownTag {
                id: id.clone(),
                tag: status.to_string(),
            });
        }
        let record = self
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| ListError::MissingCard(id.clone()))?;
        record.status = status.to_string();
        self.refresh();
        Ok(())
    }

    /// Value currently displayed by the card's toggle control.
    #[must_use]
    pub fn toggle_value(&self, id: &CardId) -> Option<bool> {
        self.controls
            .get(id)
            .copied()
            .or_else(|| self.record(id).map(|record| record.is_active))
    }

    /// Show `value` on the card's toggle without committing it.
    pub(crate) fn show_toggle_value(&mut self, id: &CardId, value: bool) {
        self.controls.insert(id.clone(), value);
    }

    /// Number of cards a filter would show, ignoring the search text.
    #[must_use]
    pub fn count_for(&self, filter: &StatusFilter) -> usize {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .count()
    }

    /// Render-ready filter buttons for the page's choices.
    #[must_use]
    pub fn filter_options(&self, choices: &[FilterChoice]) -> Vec<FilterOption> {
        choices
            .iter()
            .map(|choice| {
                let filter = StatusFilter::from_value(choice.value);
                FilterOption {
                    value: choice.value.to_string(),
                    label: choice.label.to_string(),
                    count: self.count_for(&filter),
                    active: filter == self.query.filter,
                }
            })
            .collect()
    }
}

fn unknown_tag<'a>(known: &BTreeSet<String>, record: &'a CardRecord) -> Option<&'a str> {
    if known.is_empty() {
        return None;
    }
    record.tags().find(|tag| !known.contains(*tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CardRecord> {
        vec![
            CardRecord::new("1", "Alpha", "active").dated("2023-01-01"),
            CardRecord::new("2", "Beta", "inactive").dated("2024-06-01"),
            CardRecord::new("3", "Gamma", "active").dated("2022-03-01"),
        ]
    }

    fn titles(controller: &ListController) -> Vec<String> {
        controller
            .visible_records()
            .into_iter()
            .map(|record| record.title.clone())
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<CardId> {
        values.iter().map(|value| CardId::from(*value)).collect()
    }

    #[test]
    fn active_filter_sorted_newest_hides_beta() {
        let mut list = ListController::new(sample(), ["active", "inactive"]).unwrap();
        list.set_filter(StatusFilter::from_value("active"));
        list.set_sort(Some(SortKey::Newest));
        assert_eq!(titles(&list), vec!["Alpha", "Gamma"]);
        assert!(!list.view().is_visible(&CardId::from("2")));
        assert_eq!(list.view().visible_count(), 2);
    }

    #[test]
    fn upsert_replaces_in_place_or_appends() {
        let mut list = ListController::new(sample(), ["active", "inactive"]).unwrap();
        list.set_filter(StatusFilter::from_value("inactive"));
        list.upsert(CardRecord::new("1", "Alpha v2", "inactive")).unwrap();
        assert_eq!(titles(&list), vec!["Alpha v2", "Beta"]);
        assert_eq!(list.records()[0].title, "Alpha v2");

        list.upsert(CardRecord::new("4", "Delta", "inactive")).unwrap();
        assert_eq!(list.records().len(), 4);
        assert!(list.view().is_visible(&CardId::from("4")));
        assert!(matches!(
            list.upsert(CardRecord::new("5", "Epsilon", "archived")),
            Err(ListError::UnknownTag { .. })
        ));
        assert_eq!(list.records().len(), 4);
    }

    #[test]
    fn unmatched_search_shows_empty_state() {
        let mut list = ListController::new(sample(), ["active", "inactive"]).unwrap();
        let view = list.set_search("zzz");
        assert_eq!(view.visible_count(), 0);
        assert!(view.empty_state());
        assert!(!view.grid_visible());
    }

    #[test]
    fn filter_without_matches_hides_grid() {
        let mut list = ListController::new(sample(), Vec::<String>::new()).unwrap();
        let view = list.set_filter(StatusFilter::from_value("archived"));
        assert!(view.empty_state());
        assert_eq!(view.total, 3);
    }

    #[test]
    fn newest_and_oldest_are_mirror_images() {
        let records = sample();
        let newest = project(&records, &ListQuery::sorted(SortKey::Newest));
        let oldest = project(&records, &ListQuery::sorted(SortKey::Oldest));
        let mut reversed = oldest.visible_ids.clone();
        reversed.reverse();
        assert_eq!(newest.visible_ids, reversed);
        assert_eq!(newest.visible_ids, ids(&["2", "1", "3"]));
    }

    #[test]
    fn equal_keys_keep_snapshot_order_both_ways() {
        let records = vec![
            CardRecord::new("a", "Same", "active").with_metric(50),
            CardRecord::new("b", "same", "active").with_metric(50),
            CardRecord::new("c", "Other", "active").with_metric(90),
        ];
        let asc = project(&records, &ListQuery::sorted(SortKey::TitleAsc));
        assert_eq!(asc.visible_ids, ids(&["c", "a", "b"]));
        let desc = project(&records, &ListQuery::sorted(SortKey::TitleDesc));
        assert_eq!(desc.visible_ids, ids(&["a", "b", "c"]));
        let metric = project(&records, &ListQuery::sorted(SortKey::MetricDesc));
        assert_eq!(metric.visible_ids, ids(&["c", "a", "b"]));
        let lowest = project(&records, &ListQuery::sorted(SortKey::MetricAsc));
        assert_eq!(lowest.visible_ids, ids(&["a", "b", "c"]));
    }

    #[test]
    fn missing_dates_sort_last_in_both_directions() {
        let records = vec![
            CardRecord::new("undated", "U", "active"),
            CardRecord::new("old", "O", "active").dated("2020-01-01"),
            CardRecord::new("new", "N", "active").dated("2021-01-01T10:00:00Z"),
        ];
        let newest = project(&records, &ListQuery::sorted(SortKey::Newest));
        assert_eq!(newest.visible_ids, ids(&["new", "old", "undated"]));
        let oldest = project(&records, &ListQuery::sorted(SortKey::Oldest));
        assert_eq!(oldest.visible_ids, ids(&["old", "new", "undated"]));
    }

    #[test]
    fn search_covers_title_and_secondary_text_case_insensitively() {
        let records = vec![
            CardRecord::new("1", "Cloud Practitioner", "active").with_secondary("Amazon"),
            CardRecord::new("2", "Kubernetes Admin", "active").with_secondary("CNCF"),
        ];
        let mut list = ListController::new(records, ["active"]).unwrap();
        assert_eq!(list.set_search("AMAZON").visible_ids, ids(&["1"]));
        assert_eq!(list.set_search("admin").visible_ids, ids(&["2"]));
        assert_eq!(list.set_search("").visible_count(), 2);
    }

    #[test]
    fn visible_set_is_exactly_the_matching_set() {
        let records = sample();
        let query = ListQuery {
            search: "a".into(),
            filter: StatusFilter::from_value("active"),
            sort: None,
        };
        let view = project(&records, &query);
        for record in &records {
            assert_eq!(view.is_visible(&record.id), query.matches(record));
        }
    }

    #[test]
    fn repeated_refresh_is_idempotent() {
        let mut list = ListController::new(sample(), ["active", "inactive"]).unwrap();
        list.set_sort(Some(SortKey::TitleDesc));
        let first = list.view().clone();
        let second = list.refresh().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn labels_participate_in_filtering() {
        let records = vec![
            CardRecord::new("1", "Ana", "pending").with_label("urgent"),
            CardRecord::new("2", "Bo", "responded").with_label("normal"),
        ];
        let mut list =
            ListController::new(records, ["pending", "responded", "urgent", "normal"]).unwrap();
        assert_eq!(
            list.set_filter(StatusFilter::from_value("urgent")).visible_ids,
            ids(&["1"])
        );
        assert_eq!(
            list.set_filter(StatusFilter::from_value("responded")).visible_ids,
            ids(&["2"])
        );
    }

    #[test]
    fn snapshot_rejects_duplicates_and_unknown_tags() {
        let duplicate = vec![
            CardRecord::new("1", "A", "active"),
            CardRecord::new("1", "B", "active"),
        ];
        assert_eq!(
            ListController::new(duplicate, ["active"]),
            Err(ListError::DuplicateId(CardId::from("1")))
        );
        let unknown = vec![CardRecord::new("1", "A", "archived")];
        assert!(matches!(
            ListController::new(unknown, ["active"]),
            Err(ListError::UnknownTag { .. })
        ));
    }

    #[test]
    fn removing_the_last_card_yields_empty_state() {
        let mut list =
            ListController::new(vec![CardRecord::new("1", "Only", "active")], ["active"]).unwrap();
        assert!(list.remove(&CardId::from("1")).is_some());
        assert!(list.view().empty_state());
        assert!(list.remove(&CardId::from("1")).is_none());
        assert!(list.set_search("").visible_ids.is_empty());
    }

    #[test]
    fn attributes_are_parsed_like_rendered_markup() {
        let record = CardRecord::from_attributes(CardAttributes {
            id: " 42 ".into(),
            title: "Rust".into(),
            date: Some("2024-02-03".into()),
            status: "active".into(),
            secondary: vec!["  Systems ".into(), "   ".into()],
            metric: Some("85%".into()),
            labels: Some("core, backend,".into()),
            active: Some("False".into()),
        });
        assert_eq!(record.id, CardId::from("42"));
        assert_eq!(record.metric, Some(85));
        assert_eq!(record.secondary_text, vec!["Systems".to_string()]);
        assert_eq!(record.labels, vec!["core".to_string(), "backend".to_string()]);
        assert!(!record.is_active);
        assert_eq!(
            record.timestamp,
            NaiveDate::from_ymd_opt(2024, 2, 3).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn sort_values_cover_every_toolbar() {
        assert_eq!(SortKey::from_value("date-desc"), Some(SortKey::Newest));
        assert_eq!(SortKey::from_value("name"), Some(SortKey::TitleAsc));
        assert_eq!(SortKey::from_value("lowest"), Some(SortKey::MetricAsc));
        assert_eq!(SortKey::from_value("random"), None);
        assert_eq!(
            SortKey::from_value(SortKey::MetricDesc.as_value()),
            Some(SortKey::MetricDesc)
        );
    }

    #[test]
    fn query_string_sets_initial_filter() {
        let query = ListQuery::default().with_query_string("?page=2&filter=on-hold");
        assert_eq!(query.filter, StatusFilter::Tag("on-hold".into()));
        let query = ListQuery::default().with_query_string("?filter=all");
        assert_eq!(query.filter, StatusFilter::All);
    }

    #[test]
    fn filter_options_report_counts_and_active_button() {
        let mut list = ListController::new(sample(), ["active", "inactive"]).unwrap();
        list.set_filter(StatusFilter::from_value("inactive"));
        let options = list.filter_options(&[
            FilterChoice {
                value: "all",
                label: "All",
            },
            FilterChoice {
                value: "inactive",
                label: "Inactive",
            },
        ]);
        assert_eq!(options[0].count, 3);
        assert!(!options[0].active);
        assert_eq!(options[1].count, 1);
        assert!(options[1].active);
    }

    #[test]
    fn status_updates_are_validated_and_refiltered() {
        let records = vec![CardRecord::new("1", "Ana", "pending")];
        let mut list = ListController::new(records, ["pending", "responded"]).unwrap();
        list.set_filter(StatusFilter::from_value("pending"));
        list.set_status(&CardId::from("1"), "responded").unwrap();
        assert!(list.view().empty_state());
        assert!(list.set_status(&CardId::from("1"), "archived").is_err());
        assert_eq!(
            list.set_status(&CardId::from("9"), "pending"),
            Err(ListError::MissingCard(CardId::from("9")))
        );
    }

    #[test]
    fn metric_parsing_reads_leading_digits() {
        assert_eq!(parse_metric("90"), Some(90));
        assert_eq!(parse_metric(" 75 % "), Some(75));
        assert_eq!(parse_metric("-5"), Some(-5));
        assert_eq!(parse_metric("n/a"), None);
    }
}
