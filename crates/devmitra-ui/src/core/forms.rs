//! Create/edit form helpers shared by the entity pages.
//!
//! # Design
//! - Form values stay as strings in submission order; the server owns real validation.
//! - Client checks are limited to required fields and the draft/publish status rules.
//! - Save responses are reduced to one notice plus an optional redirect.

use std::cell::Cell;
use std::rc::Rc;

use devmitra_api_models::{EntityKind, FormSaveResponse};
use thiserror::Error;

use crate::core::notify::Notice;

/// Status a project receives when saved as a draft.
pub const STATUS_DRAFT: &str = "draft";
/// Status a draft project is promoted to when published.
pub const STATUS_ACTIVE: &str = "active";

/// Client-side form failures raised before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// One or more required fields are blank.
    #[error("Please fill in all required fields")]
    MissingFields(Vec<&'static str>),
}

/// Ordered form values as they will be posted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: Vec<(String, String)>,
}

impl FormValues {
    /// Empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name`, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Add another value under `name`, keeping earlier ones (multi-selects, repeated inputs).
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.fields.push((name.to_string(), value.into()));
    }

    /// Fields rewritten or added since `before` was captured, in order.
    ///
    /// Entries are compared by position, so repeated names that were left
    /// alone are not reported.
    #[must_use]
    pub fn changes_since(&self, before: &Self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(index, field)| before.fields.get(*index) != Some(*field))
            .map(|(_, field)| field.clone())
            .collect()
    }

    /// Builder-style [`Self::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Fields in submission order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Check that every field in `required` has non-blank content.
    ///
    /// # Errors
    /// Returns [`FormError::MissingFields`] listing the blank fields.
    pub fn require(&self, required: &[&'static str]) -> Result<(), FormError> {
        let missing: Vec<&'static str> = required
            .iter()
            .copied()
            .filter(|name| self.get(name).is_none_or(|value| value.trim().is_empty()))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Blank `field` when a checkbox such as "currently working" is ticked.
    pub fn clear_when(&mut self, checked: bool, field: &str) {
        if checked {
            self.set(field, "");
        }
    }
}

/// One submission at a time per form.
///
/// [`SubmitGuard::begin`] hands out a [`SubmitPermit`]; the form stays busy
/// until the permit is dropped, normally once the response has settled.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    busy: Cell<bool>,
}

impl SubmitGuard {
    /// Shared guard for one form.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Whether a submission is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claim the form. Returns `None` while an earlier submission is pending.
    #[must_use]
    pub fn begin(self: &Rc<Self>) -> Option<SubmitPermit> {
        if self.busy.replace(true) {
            tracing::debug!("submission ignored while a save is pending");
            return None;
        }
        Some(SubmitPermit {
            guard: Rc::clone(self),
        })
    }
}

/// Releases its [`SubmitGuard`] when dropped.
#[derive(Debug)]
pub struct SubmitPermit {
    guard: Rc<SubmitGuard>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.guard.busy.set(false);
    }
}

/// Fields the client insists on before posting a form.
#[must_use]
pub const fn required_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Project | EntityKind::Achievement => &["title"],
        EntityKind::Skill => &["name"],
        EntityKind::Experience => &["title", "company", "description"],
        EntityKind::Category => &["name", "slug"],
        EntityKind::Notification => &["title", "message"],
        EntityKind::ContactResponse => &["response"],
    }
}

/// Which submit button was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    /// Publish the entry.
    Publish,
    /// Save without publishing.
    SaveDraft,
}

impl SubmitIntent {
    /// Map a submit button value (`draft` or `publish`).
    #[must_use]
    pub fn from_button(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(STATUS_DRAFT) {
            Self::SaveDraft
        } else {
            Self::Publish
        }
    }

    /// Apply the project status rule: drafts force `draft`; publishing promotes
    /// an empty or `draft` status to `active` and keeps anything else.
    pub fn apply_status(self, form: &mut FormValues) {
        match self {
            Self::SaveDraft => form.set("status", STATUS_DRAFT),
            Self::Publish => {
                let current = form.get("status").unwrap_or_default().trim();
                if current.is_empty() || current == STATUS_DRAFT {
                    form.set("status", STATUS_ACTIVE);
                }
            }
        }
    }

    /// Apply the achievement draft flags (`is_draft`, `is_active`).
    pub fn apply_flags(self, form: &mut FormValues) {
        let draft = self == Self::SaveDraft;
        form.set("is_draft", if draft { "True" } else { "False" });
        form.set("is_active", if draft { "False" } else { "True" });
    }
}

/// Lowercase slug derived from a category name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// What the page does after a save request finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Message to show.
    pub notice: Notice,
    /// Page to navigate to, if the server supplied one.
    pub redirect_url: Option<String>,
}

/// Reduce a save response to a notice and redirect.
#[must_use]
pub fn save_outcome(kind: EntityKind, response: &FormSaveResponse, draft: bool) -> SaveOutcome {
    if response.success {
        let message = if draft {
            format!("{} saved as draft!", kind.label())
        } else {
            response
                .message
                .clone()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("{} saved successfully!", kind.label()))
        };
        return SaveOutcome {
            notice: Notice::success(message),
            redirect_url: response.redirect_url.clone(),
        };
    }
    let mut message = format!("Error saving {}:", kind.singular());
    let lines = response.error_lines();
    if lines.is_empty() {
        if let Some(detail) = response.message.as_deref() {
            message.push('\n');
            message.push_str(detail);
        }
    }
    for line in lines {
        message.push('\n');
        message.push_str(&line);
    }
    SaveOutcome {
        notice: Notice::error(message),
        redirect_url: None,
    }
}

/// Message shown when a save request never reaches the server.
#[must_use]
pub fn save_transport_failure(kind: EntityKind) -> Notice {
    Notice::error(format!(
        "An error occurred while saving the {}.",
        kind.singular()
    ))
}

/// Label shown next to the proficiency slider, clamped to 0..=100.
#[must_use]
pub fn proficiency_label(value: i64) -> String {
    format!("{}%", value.clamp(0, 100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NoticeKind;
    use std::collections::BTreeMap;

    #[test]
    fn required_fields_report_every_blank_value() {
        let form = FormValues::new().with("name", "Backend").with("slug", "  ");
        assert_eq!(
            form.require(required_fields(EntityKind::Category)),
            Err(FormError::MissingFields(vec!["slug"]))
        );
        let form = form.with("slug", "backend");
        assert!(form.require(required_fields(EntityKind::Category)).is_ok());
        assert_eq!(
            FormError::MissingFields(vec!["title"]).to_string(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn publishing_promotes_only_draft_or_empty_status() {
        let mut form = FormValues::new().with("status", "draft");
        SubmitIntent::Publish.apply_status(&mut form);
        assert_eq!(form.get("status"), Some("active"));

        let mut form = FormValues::new().with("status", "on-hold");
        SubmitIntent::Publish.apply_status(&mut form);
        assert_eq!(form.get("status"), Some("on-hold"));

        let mut form = FormValues::new();
        SubmitIntent::Publish.apply_status(&mut form);
        assert_eq!(form.get("status"), Some("active"));

        let mut form = FormValues::new().with("status", "completed");
        SubmitIntent::from_button("draft").apply_status(&mut form);
        assert_eq!(form.get("status"), Some("draft"));
    }

    #[test]
    fn draft_flags_follow_submit_button() {
        let mut form = FormValues::new();
        SubmitIntent::SaveDraft.apply_flags(&mut form);
        assert_eq!(form.get("is_draft"), Some("True"));
        assert_eq!(form.get("is_active"), Some("False"));
        SubmitIntent::from_button("publish").apply_flags(&mut form);
        assert_eq!(form.get("is_active"), Some("True"));
        assert_eq!(form.fields().len(), 2);
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("  Web Development & Design! "), "web-development-design");
        assert_eq!(slugify("C++ / Rust"), "c-rust");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn save_outcome_covers_draft_success_and_errors() {
        let ok = FormSaveResponse {
            success: true,
            message: Some("Project updated".into()),
            errors: BTreeMap::new(),
            redirect_url: Some("/projects/".into()),
            image_url: None,
        };
        let outcome = save_outcome(EntityKind::Project, &ok, false);
        assert_eq!(outcome.notice.message, "Project updated");
        assert_eq!(outcome.redirect_url.as_deref(), Some("/projects/"));
        assert_eq!(
            save_outcome(EntityKind::Project, &ok, true).notice.message,
            "Project saved as draft!"
        );

        let mut errors = BTreeMap::new();
        errors.insert("title".to_string(), vec!["Required".to_string()]);
        let failed = FormSaveResponse {
            success: false,
            message: None,
            errors,
            redirect_url: Some("/ignored/".into()),
            image_url: None,
        };
        let outcome = save_outcome(EntityKind::Project, &failed, false);
        assert_eq!(outcome.notice.kind, NoticeKind::Error);
        assert_eq!(outcome.notice.message, "Error saving project:\ntitle: Required");
        assert!(outcome.redirect_url.is_none());
    }

    #[test]
    fn checkbox_clears_dependent_field() {
        let mut form = FormValues::new().with("end_date", "2024-01-01");
        form.clear_when(false, "end_date");
        assert_eq!(form.get("end_date"), Some("2024-01-01"));
        form.clear_when(true, "end_date");
        assert_eq!(form.get("end_date"), Some(""));
    }

    #[test]
    fn second_submit_is_refused_until_the_first_settles() {
        let guard = SubmitGuard::shared();
        let permit = guard.begin().unwrap();
        assert!(guard.is_busy());
        assert!(guard.begin().is_none());
        assert!(guard.begin().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        let again = guard.begin();
        assert!(again.is_some());
        assert!(guard.begin().is_none());
    }

    #[test]
    fn only_rewritten_fields_are_reported_and_repeats_survive() {
        let mut form = FormValues::new();
        form.append("title", "Portfolio");
        form.append("skills", "Rust");
        form.append("skills", "Go");
        form.append("status", "draft");
        let before = form.clone();

        SubmitIntent::Publish.apply_status(&mut form);
        assert_eq!(
            form.changes_since(&before),
            vec![("status".to_string(), "active".to_string())]
        );
        let skills: Vec<_> = form
            .fields()
            .iter()
            .filter(|(name, _)| name == "skills")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(skills, ["Rust", "Go"]);

        let mut flags = before.clone();
        SubmitIntent::SaveDraft.apply_flags(&mut flags);
        assert_eq!(
            flags.changes_since(&before),
            vec![
                ("is_draft".to_string(), "True".to_string()),
                ("is_active".to_string(), "False".to_string()),
            ]
        );
        assert!(before.changes_since(&before).is_empty());
    }

    #[test]
    fn proficiency_label_is_clamped() {
        assert_eq!(proficiency_label(85), "85%");
        assert_eq!(proficiency_label(140), "100%");
        assert_eq!(proficiency_label(-3), "0%");
    }

    #[test]
    fn transport_failure_names_the_entity() {
        assert_eq!(
            save_transport_failure(EntityKind::Project).message,
            "An error occurred while saving the project."
        );
    }
}
