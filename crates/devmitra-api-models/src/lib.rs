#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared wire contract for the Dev Mitra admin endpoints.
//!
//! The dashboard server owns every entity; clients only ever send small
//! form-encoded mutations and read JSON acknowledgements back. Keeping the
//! routing table here lets the browser UI and the operator CLI agree on the
//! exact paths and field names without duplicating string literals.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header carrying the cross-site request forgery token.
pub const HEADER_CSRF: &str = "X-CSRFToken";
/// Header marking a request as an asynchronous page call.
pub const HEADER_REQUESTED_WITH: &str = "X-Requested-With";
/// Value sent with [`HEADER_REQUESTED_WITH`].
pub const REQUESTED_WITH_XHR: &str = "XMLHttpRequest";
/// Cookie holding the CSRF token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Hidden form field holding the CSRF token when no cookie is present.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";
/// Content type used for every action body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Entity families managed from the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Portfolio projects.
    Project,
    /// Skills with a proficiency percentage.
    Skill,
    /// Work experience entries.
    Experience,
    /// Certifications and awards.
    Achievement,
    /// Categories shared by the other entity kinds.
    Category,
    /// Site notifications.
    Notification,
    /// Messages received through the contact form.
    ContactResponse,
}

impl EntityKind {
    /// Every entity kind in dashboard navigation order.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Project,
            Self::Skill,
            Self::Experience,
            Self::Achievement,
            Self::Category,
            Self::Notification,
            Self::ContactResponse,
        ]
    }

    /// Lowercase singular noun used in messages ("skill").
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Skill => "skill",
            Self::Experience => "experience",
            Self::Achievement => "achievement",
            Self::Category => "category",
            Self::Notification => "notification",
            Self::ContactResponse => "response",
        }
    }

    /// Lowercase plural noun used in messages ("skills").
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Skill => "skills",
            Self::Experience => "experience entries",
            Self::Achievement => "achievements",
            Self::Category => "categories",
            Self::Notification => "notifications",
            Self::ContactResponse => "responses",
        }
    }

    /// Capitalised singular noun used at the start of messages ("Skill").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Skill => "Skill",
            Self::Experience => "Experience",
            Self::Achievement => "Achievement",
            Self::Category => "Category",
            Self::Notification => "Notification",
            Self::ContactResponse => "Response",
        }
    }

    /// Path segment owning the entity's management page.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Skill => "skills",
            Self::Experience => "experience",
            Self::Achievement => "achievements",
            Self::Category => "categories",
            Self::Notification => "notifications",
            Self::ContactResponse => "contact-responses",
        }
    }

    /// Form field naming the entity id in toggle and category bodies.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Project => "project_id",
            Self::Skill => "skill_id",
            Self::Experience => "experience_id",
            Self::Achievement => "achievement_id",
            Self::Category => "category_id",
            Self::Notification => "notification_id",
            Self::ContactResponse => "response_id",
        }
    }

    /// Whether the server exposes an active/inactive toggle for this kind.
    #[must_use]
    pub const fn supports_toggle(self) -> bool {
        matches!(
            self,
            Self::Project | Self::Skill | Self::Experience | Self::Achievement
        )
    }

    /// Whether the server exposes a delete endpoint for this kind.
    #[must_use]
    pub const fn supports_delete(self) -> bool {
        !matches!(self, Self::ContactResponse)
    }

    /// Path of the page that creates a new entity of this kind.
    #[must_use]
    pub fn create_path(self) -> String {
        format!("/{}/create/", self.segment())
    }
}

impl Display for EntityKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "project" | "projects" => Ok(Self::Project),
            "skill" | "skills" => Ok(Self::Skill),
            "experience" | "experiences" => Ok(Self::Experience),
            "achievement" | "achievements" => Ok(Self::Achievement),
            "category" | "categories" => Ok(Self::Category),
            "notification" | "notifications" => Ok(Self::Notification),
            "contact-response" | "contact-responses" | "response" | "responses" => {
                Ok(Self::ContactResponse)
            }
            other => Err(RouteError::UnknownKind(other.to_string())),
        }
    }
}

/// Mutation requested against a single entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityAction {
    /// Set the active flag to the given value.
    Toggle {
        /// Desired active flag.
        is_active: bool,
    },
    /// Permanently delete the entity.
    Delete,
    /// Mark a notification as read.
    MarkRead,
}

impl EntityAction {
    /// Short verb used in logs.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Toggle { .. } => "toggle",
            Self::Delete => "delete",
            Self::MarkRead => "mark_read",
        }
    }
}

/// Routing failures raised before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The entity kind has no endpoint for the requested action.
    #[error("{action} is not available for {kind} entries")]
    Unsupported {
        /// Entity kind the action targeted.
        kind: EntityKind,
        /// Action verb that has no endpoint.
        action: &'static str,
    },
    /// The entity id was blank.
    #[error("entity id must not be empty")]
    EmptyId,
    /// The entity kind string did not match any known kind.
    #[error("unknown entity kind '{0}'")]
    UnknownKind(String),
    /// A details form or profile file name did not match any section.
    #[error("unknown form '{0}'")]
    UnknownForm(String),
}

/// Fully resolved POST target plus its form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoute {
    /// Absolute path on the dashboard server.
    pub path: String,
    /// Form fields in submission order.
    pub form: Vec<(String, String)>,
}

impl ActionRoute {
    /// Encode the form fields as an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn encode_form(&self) -> String {
        self.form
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Resolve the endpoint for an action against one entity.
///
/// # Errors
/// Returns [`RouteError::EmptyId`] for blank ids and [`RouteError::Unsupported`]
/// when the server has no endpoint for the kind/action pair.
pub fn route_action(
    kind: EntityKind,
    id: &str,
    action: EntityAction,
) -> Result<ActionRoute, RouteError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(RouteError::EmptyId);
    }
    let unsupported = || RouteError::Unsupported {
        kind,
        action: action.verb(),
    };
    match action {
        EntityAction::Toggle { is_active } => {
            if !kind.supports_toggle() {
                return Err(unsupported());
            }
            Ok(ActionRoute {
                path: format!("/{}/", kind.segment()),
                form: vec![
                    (kind.id_field().to_string(), id.to_string()),
                    ("is_active".to_string(), is_active.to_string()),
                ],
            })
        }
        EntityAction::Delete => match kind {
            EntityKind::Category => Ok(ActionRoute {
                path: format!("/{}/", kind.segment()),
                form: vec![
                    ("action".to_string(), "delete".to_string()),
                    (kind.id_field().to_string(), id.to_string()),
                ],
            }),
            EntityKind::Notification => Ok(ActionRoute {
                path: format!("/notifications/delete/{id}/"),
                form: Vec::new(),
            }),
            EntityKind::ContactResponse => Err(unsupported()),
            _ => Ok(ActionRoute {
                path: format!("/{}/{id}/delete/", kind.segment()),
                form: Vec::new(),
            }),
        },
        EntityAction::MarkRead => match kind {
            EntityKind::Notification => Ok(ActionRoute {
                path: format!("/notifications/mark-read/{id}/"),
                form: Vec::new(),
            }),
            _ => Err(unsupported()),
        },
    }
}

/// Endpoint that marks every unread notification as read.
#[must_use]
pub fn mark_all_read_route() -> ActionRoute {
    ActionRoute {
        path: "/notifications/mark-all-read/".to_string(),
        form: Vec::new(),
    }
}

/// Resolve the `action=get` lookup that pre-fills the category editor.
///
/// # Errors
/// Returns [`RouteError::EmptyId`] for blank ids.
pub fn category_lookup_route(id: &str) -> Result<ActionRoute, RouteError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(RouteError::EmptyId);
    }
    Ok(ActionRoute {
        path: category_save_path(),
        form: vec![
            ("action".to_string(), "get".to_string()),
            (EntityKind::Category.id_field().to_string(), id.to_string()),
        ],
    })
}

/// Page that accepts category `create` and `update` form posts.
#[must_use]
pub fn category_save_path() -> String {
    format!("/{}/", EntityKind::Category.segment())
}

/// `action` value posted by the category editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCommand {
    /// New category.
    Create,
    /// Existing category.
    Update,
}

impl CategoryCommand {
    /// Form value of the hidden `action` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Read-only lookup for the notification editor (an HTTP GET).
///
/// # Errors
/// Returns [`RouteError::EmptyId`] for blank ids.
pub fn notification_lookup_path(id: &str) -> Result<String, RouteError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(RouteError::EmptyId);
    }
    Ok(format!("/notifications/get/{id}/"))
}

/// Endpoint that creates or updates a notification from its editor form.
pub const NOTIFICATION_SAVE_PATH: &str = "/notifications/save/";

/// Sections of the profile details page; each posts its own `form_type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetailForm {
    /// Name, contact and bio.
    PersonalInfo,
    /// Social profile links.
    SocialLinks,
    /// Meta title, description and keywords.
    Seo,
    /// Availability and work preferences.
    Preferences,
    /// Video resume link.
    VideoResume,
}

impl DetailForm {
    /// Every details section.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::PersonalInfo,
            Self::SocialLinks,
            Self::Seo,
            Self::Preferences,
            Self::VideoResume,
        ]
    }

    /// Value of the posted `form_type` field.
    #[must_use]
    pub const fn form_type(self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::SocialLinks => "social_links",
            Self::Seo => "seo",
            Self::Preferences => "preferences",
            Self::VideoResume => "video_resume",
        }
    }
}

impl FromStr for DetailForm {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().replace('-', "_");
        Self::all()
            .into_iter()
            .find(|form| form.form_type() == value)
            .ok_or(RouteError::UnknownForm(value))
    }
}

/// Files attached to the profile: uploaded on change, deleted after a prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileFile {
    /// Profile picture.
    ProfileImage,
    /// Resume document.
    Resume,
    /// Cover letter document.
    CoverLetter,
}

impl ProfileFile {
    /// Every profile file slot.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::ProfileImage, Self::Resume, Self::CoverLetter]
    }

    /// Multipart field carrying the file.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ProfileImage => "profile_image",
            Self::Resume => "resume",
            Self::CoverLetter => "cover_letter",
        }
    }

    /// `form_type` posted with an upload.
    #[must_use]
    pub const fn upload_form_type(self) -> &'static str {
        match self {
            Self::ProfileImage => "profile_image",
            Self::Resume => "upload_resume",
            Self::CoverLetter => "upload_cover_letter",
        }
    }

    /// `form_type` posted to delete the stored file.
    #[must_use]
    pub const fn delete_form_type(self) -> &'static str {
        match self {
            Self::ProfileImage => "delete_profile_image",
            Self::Resume => "delete_resume",
            Self::CoverLetter => "delete_cover_letter",
        }
    }

    /// Lowercase noun used in messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::ProfileImage => "profile image",
            Self::Resume => "resume",
            Self::CoverLetter => "cover letter",
        }
    }
}

impl FromStr for ProfileFile {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().replace('-', "_");
        Self::all()
            .into_iter()
            .find(|file| file.field() == value)
            .ok_or(RouteError::UnknownForm(value))
    }
}

/// Body of a profile file deletion.
#[must_use]
pub fn profile_delete_form(file: ProfileFile) -> Vec<(String, String)> {
    vec![("form_type".to_string(), file.delete_form_type().to_string())]
}

/// JSON acknowledgement returned by toggle, delete and mark-read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActionAck {
    /// Whether the server applied the mutation.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Failure reason reported by delete endpoints.
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable status message.
    pub message: Option<String>,
}

impl ActionAck {
    /// Successful acknowledgement without a message.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            error: None,
            message: None,
        }
    }

    /// Failed acknowledgement carrying a server-side error string.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Server-supplied explanation, preferring `error` over `message`.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// JSON response returned by create/update form endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormSaveResponse {
    /// Whether the form was saved.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Confirmation or failure message.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    /// Field-level validation errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page to navigate to after a successful save.
    pub redirect_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Stored image location after a profile image upload.
    pub image_url: Option<String>,
}

impl FormSaveResponse {
    /// One `field: message, message` line per field with errors.
    #[must_use]
    pub fn error_lines(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect()
    }
}

/// Category as returned by the categories page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryData {
    /// Server id (numeric or string).
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Entity family the category groups (`project`, `skill`, ...).
    pub category_type: String,
    /// Human label of `category_type`; absent on lookups.
    #[serde(default)]
    pub category_type_display: Option<String>,
    /// Free text.
    #[serde(default)]
    pub description: String,
    /// Icon class list.
    #[serde(default)]
    pub icon: String,
    /// CSS colour.
    #[serde(default)]
    pub color: String,
    /// Number of entries in the category; absent on lookups.
    #[serde(default)]
    pub item_count: Option<u64>,
}

/// Reply of the categories page to `get`, `create` and `update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryReply {
    /// Whether the command succeeded.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Confirmation or failure message.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    /// Field-level validation errors.
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// The category after the command.
    pub category: Option<CategoryData>,
}

/// Notification as returned by the lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationData {
    /// Server id.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// `info`, `success`, `warning` or `error`.
    pub notification_type: String,
    /// Optional call-to-action link.
    #[serde(default)]
    pub link: String,
    /// Text of the call-to-action link.
    #[serde(default)]
    pub link_text: String,
}

/// Reply of the notification lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationReply {
    /// Whether the notification was found.
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Failure message.
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// The notification.
    pub notification: Option<NotificationData>,
}

// Django primary keys arrive as JSON numbers; cards carry them as strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(value) => value.to_string(),
        RawId::Text(value) => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggle_routes_post_to_the_management_page() {
        let route = route_action(
            EntityKind::Skill,
            "12",
            EntityAction::Toggle { is_active: false },
        )
        .unwrap();
        assert_eq!(route.path, "/skills/");
        assert_eq!(route.encode_form(), "skill_id=12&is_active=false");
    }

    #[test]
    fn delete_routes_follow_each_kind() {
        let project = route_action(EntityKind::Project, "7", EntityAction::Delete).unwrap();
        assert_eq!(project.path, "/projects/7/delete/");
        assert!(project.form.is_empty());

        let category = route_action(EntityKind::Category, "3", EntityAction::Delete).unwrap();
        assert_eq!(category.path, "/categories/");
        assert_eq!(category.encode_form(), "action=delete&category_id=3");

        let notification =
            route_action(EntityKind::Notification, "9", EntityAction::Delete).unwrap();
        assert_eq!(notification.path, "/notifications/delete/9/");
    }

    #[test]
    fn unsupported_pairs_are_rejected() {
        assert_eq!(
            route_action(
                EntityKind::Category,
                "1",
                EntityAction::Toggle { is_active: true }
            ),
            Err(RouteError::Unsupported {
                kind: EntityKind::Category,
                action: "toggle",
            })
        );
        assert!(route_action(EntityKind::Skill, "1", EntityAction::MarkRead).is_err());
        assert!(route_action(EntityKind::ContactResponse, "1", EntityAction::Delete).is_err());
        assert_eq!(
            route_action(EntityKind::Skill, "  ", EntityAction::Delete),
            Err(RouteError::EmptyId)
        );
    }

    #[test]
    fn form_values_are_percent_encoded() {
        let route = ActionRoute {
            path: "/".into(),
            form: vec![("name".into(), "a b&c".into())],
        };
        assert_eq!(route.encode_form(), "name=a%20b%26c");
    }

    #[test]
    fn entity_kind_parses_singular_and_plural() {
        assert_eq!("skills".parse::<EntityKind>(), Ok(EntityKind::Skill));
        assert_eq!(
            "Contact-Responses".parse::<EntityKind>(),
            Ok(EntityKind::ContactResponse)
        );
        assert!("widgets".parse::<EntityKind>().is_err());
    }

    #[test]
    fn ack_reason_prefers_error_then_message() {
        let ack: ActionAck =
            serde_json::from_value(json!({"success": false, "error": "Skill not found"})).unwrap();
        assert_eq!(ack.reason(), Some("Skill not found"));

        let ack: ActionAck =
            serde_json::from_value(json!({"success": false, "message": "Invalid request"}))
                .unwrap();
        assert_eq!(ack.reason(), Some("Invalid request"));

        let ack: ActionAck = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(ack.success);
        assert_eq!(ack.reason(), None);
    }

    #[test]
    fn editor_routes_match_the_dashboard() {
        let lookup = category_lookup_route(" 4 ").unwrap();
        assert_eq!(lookup.path, "/categories/");
        assert_eq!(lookup.encode_form(), "action=get&category_id=4");
        assert_eq!(category_lookup_route(""), Err(RouteError::EmptyId));
        assert_eq!(CategoryCommand::Update.as_str(), "update");
        assert_eq!(
            notification_lookup_path("12").as_deref(),
            Ok("/notifications/get/12/")
        );
        assert!(notification_lookup_path(" ").is_err());
    }

    #[test]
    fn profile_sections_use_the_server_form_types() {
        assert_eq!("social-links".parse::<DetailForm>(), Ok(DetailForm::SocialLinks));
        assert_eq!(DetailForm::VideoResume.form_type(), "video_resume");
        assert!("avatar".parse::<DetailForm>().is_err());

        let resume: ProfileFile = "resume".parse().unwrap();
        assert_eq!(resume.upload_form_type(), "upload_resume");
        assert_eq!(ProfileFile::ProfileImage.upload_form_type(), "profile_image");
        assert_eq!(
            profile_delete_form(ProfileFile::CoverLetter),
            vec![("form_type".to_string(), "delete_cover_letter".to_string())]
        );
    }

    #[test]
    fn category_reply_accepts_numeric_ids() {
        let reply: CategoryReply = serde_json::from_value(json!({
            "success": true,
            "message": "Category updated successfully!",
            "category": {
                "id": 7,
                "name": "Backend",
                "slug": "backend",
                "category_type": "skill",
                "category_type_display": "Skill",
                "description": "",
                "icon": "fas fa-server",
                "color": "#10b981",
                "item_count": 1
            }
        }))
        .unwrap();
        let category = reply.category.unwrap();
        assert_eq!(category.id, "7");
        assert_eq!(category.item_count, Some(1));

        let reply: NotificationReply = serde_json::from_value(json!({
            "success": true,
            "notification": {"id": "3", "title": "Hi", "message": "Body", "notification_type": "info"}
        }))
        .unwrap();
        assert_eq!(reply.notification.unwrap().link, "");
    }

    #[test]
    fn profile_upload_reply_carries_image_url() {
        let response: FormSaveResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Profile image updated successfully!",
            "image_url": "/media/profile/me.png"
        }))
        .unwrap();
        assert_eq!(response.image_url.as_deref(), Some("/media/profile/me.png"));
    }

    #[test]
    fn form_response_lists_field_errors() {
        let response: FormSaveResponse = serde_json::from_value(json!({
            "success": false,
            "errors": {"title": ["This field is required."], "slug": ["Taken", "Too short"]}
        }))
        .unwrap();
        assert_eq!(
            response.error_lines(),
            vec![
                "slug: Taken, Too short".to_string(),
                "title: This field is required.".to_string()
            ]
        );
        assert!(response.redirect_url.is_none());
    }
}
