//! Edit modals for categories and notifications.
//!
//! # Design
//! - A draft is the modal form's content; it is filled from a lookup or from defaults.
//! - Category saves update the listed card in place; notification saves reload the page.

use devmitra_api_models::{
    CategoryCommand, CategoryData, CategoryReply, FormSaveResponse, NotificationData,
};

use crate::core::forms::FormValues;
use crate::core::list::CardRecord;
use crate::core::notify::Notice;

/// Colour given to new categories.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";
/// Icon given to new categories.
pub const DEFAULT_CATEGORY_ICON: &str = "fas fa-folder";
/// Notice type preselected for new notifications.
pub const DEFAULT_NOTIFICATION_TYPE: &str = "info";

/// Content of the category modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    /// Server id when editing.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Entity family.
    pub category_type: String,
    /// Free text.
    pub description: String,
    /// Icon class list.
    pub icon: String,
    /// CSS colour.
    pub color: String,
}

impl CategoryDraft {
    /// Empty draft for "Add category".
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            slug: String::new(),
            category_type: String::new(),
            description: String::new(),
            icon: DEFAULT_CATEGORY_ICON.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        }
    }

    /// Draft pre-filled from an `action=get` lookup.
    #[must_use]
    pub fn from_data(data: &CategoryData) -> Self {
        Self {
            id: Some(data.id.clone()),
            name: data.name.clone(),
            slug: data.slug.clone(),
            category_type: data.category_type.clone(),
            description: data.description.clone(),
            icon: data.icon.clone(),
            color: data.color.clone(),
        }
    }

    /// `action` the save posts.
    #[must_use]
    pub const fn command(&self) -> CategoryCommand {
        if self.id.is_some() {
            CategoryCommand::Update
        } else {
            CategoryCommand::Create
        }
    }

    /// Modal heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self.command() {
            CategoryCommand::Create => "Add New Category",
            CategoryCommand::Update => "Edit Category",
        }
    }

    /// Form fields written into the modal, hidden ones included.
    #[must_use]
    pub fn fields(&self) -> FormValues {
        FormValues::new()
            .with("action", self.command().as_str())
            .with("category_id", self.id.clone().unwrap_or_default())
            .with("name", self.name.as_str())
            .with("slug", self.slug.as_str())
            .with("category_type", self.category_type.as_str())
            .with("description", self.description.as_str())
            .with("icon", self.icon.as_str())
            .with("color", self.color.as_str())
    }
}

/// "1 Item" / "3 Items".
#[must_use]
pub fn item_count_label(count: u64) -> String {
    if count == 1 {
        "1 Item".to_string()
    } else {
        format!("{count} Items")
    }
}

/// List record for a saved category.
#[must_use]
pub fn category_record(data: &CategoryData) -> CardRecord {
    let mut record = CardRecord::new(data.id.as_str(), data.name.as_str(), data.category_type.as_str())
        .with_secondary(data.slug.as_str());
    if !data.description.trim().is_empty() {
        record = record.with_secondary(data.description.as_str());
    }
    record.metric = data.item_count.and_then(|count| i64::try_from(count).ok());
    record
}

/// Notice for a finished category save.
#[must_use]
pub fn category_save_notice(reply: &CategoryReply) -> Notice {
    let message = reply
        .message
        .clone()
        .filter(|message| !message.trim().is_empty());
    if reply.success {
        return Notice::success(message.unwrap_or_else(|| "Category saved successfully!".to_string()));
    }
    let mut lines = vec![message.unwrap_or_else(|| "Failed to save category".to_string())];
    lines.extend(
        reply
            .errors
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, errors)| format!("{field}: {}", errors.join(", "))),
    );
    Notice::error(lines.join("\n"))
}

/// Notice for a failed category lookup.
#[must_use]
pub fn category_lookup_failure(reply: &CategoryReply) -> Notice {
    Notice::error(
        reply
            .message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "Failed to load category".to_string()),
    )
}

/// Content of the notification modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Server id when editing.
    pub id: Option<String>,
    /// Heading.
    pub title: String,
    /// Body.
    pub message: String,
    /// Notice type.
    pub notification_type: String,
    /// Call-to-action link.
    pub link: String,
    /// Call-to-action text.
    pub link_text: String,
}

impl NotificationDraft {
    /// Empty draft for "Create notification".
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: None,
            title: String::new(),
            message: String::new(),
            notification_type: DEFAULT_NOTIFICATION_TYPE.to_string(),
            link: String::new(),
            link_text: String::new(),
        }
    }

    /// Draft pre-filled from the lookup endpoint.
    #[must_use]
    pub fn from_data(data: &NotificationData) -> Self {
        Self {
            id: Some(data.id.clone()),
            title: data.title.clone(),
            message: data.message.clone(),
            notification_type: data.notification_type.clone(),
            link: data.link.clone(),
            link_text: data.link_text.clone(),
        }
    }

    /// Modal heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.id.is_some() {
            "Edit Notification"
        } else {
            "Create Notification"
        }
    }

    /// Form fields written into the modal. A blank `notification_id` creates.
    #[must_use]
    pub fn fields(&self) -> FormValues {
        FormValues::new()
            .with("notification_id", self.id.clone().unwrap_or_default())
            .with("title", self.title.as_str())
            .with("message", self.message.as_str())
            .with("notification_type", self.notification_type.as_str())
            .with("link", self.link.as_str())
            .with("link_text", self.link_text.as_str())
    }
}

/// Alert text for a rejected notification save; `None` on success.
#[must_use]
pub fn notification_save_failure(response: &FormSaveResponse) -> Option<String> {
    (!response.success).then(|| {
        let reason = response
            .message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or("Unknown error");
        format!("Error saving notification: {reason}")
    })
}
