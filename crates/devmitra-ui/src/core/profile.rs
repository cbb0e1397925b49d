//! Profile details page: per-section saves and the profile file slots.
//!
//! # Design
//! - Every section posts its own `form_type` to the page URL and shows one notice.
//! - File slots upload as soon as a file is picked; deletes need a confirmation.
//! - What the page does afterwards is returned as a [`FileEffect`] for the host to apply.

use devmitra_api_models::{DetailForm, FormSaveResponse, ProfileFile};

use crate::core::notify::Notice;

/// Image shown once the profile picture is removed.
pub const PROFILE_PLACEHOLDER: &str = "https://via.placeholder.com/200";

/// Delay before reloading after a document upload or delete.
pub const RELOAD_DELAY_MS: u32 = 1_000;

fn server_message(response: &FormSaveResponse) -> Option<String> {
    response
        .message
        .as_deref()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

const fn section_copy(form: DetailForm) -> (&'static str, &'static str) {
    match form {
        DetailForm::PersonalInfo => (
            "Personal information updated successfully!",
            "Failed to update information",
        ),
        DetailForm::SocialLinks => (
            "Social links updated successfully!",
            "Failed to update links",
        ),
        DetailForm::Seo => (
            "SEO settings updated successfully!",
            "Failed to update SEO settings",
        ),
        DetailForm::Preferences => (
            "Preferences updated successfully!",
            "Failed to update preferences",
        ),
        DetailForm::VideoResume => (
            "Video resume link updated successfully!",
            "Failed to update video link",
        ),
    }
}

/// Notice for a finished section save.
#[must_use]
pub fn section_notice(form: DetailForm, response: &FormSaveResponse) -> Notice {
    let (saved, failed) = section_copy(form);
    match (response.success, server_message(response)) {
        (true, message) => Notice::success(message.unwrap_or_else(|| saved.to_string())),
        (false, message) => Notice::error(message.unwrap_or_else(|| failed.to_string())),
    }
}

/// Page change that follows a profile file request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEffect {
    /// Nothing beyond the notice.
    Nothing,
    /// Point the profile preview at the stored image.
    ShowImage(String),
    /// Put the placeholder back in the profile preview.
    ResetImage,
    /// Reload after [`RELOAD_DELAY_MS`] so the document list is re-rendered.
    Reload,
}

/// Notice plus page change for a profile file request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Message to show.
    pub notice: Notice,
    /// Follow-up page change.
    pub effect: FileEffect,
}

/// Confirmation asked before a stored file is removed.
#[must_use]
pub fn delete_prompt(file: ProfileFile) -> String {
    format!("Are you sure you want to delete your {}?", file.noun())
}

fn upload_failure_copy(file: ProfileFile) -> &'static str {
    match file {
        ProfileFile::ProfileImage => "Failed to upload image",
        ProfileFile::Resume => "Failed to upload resume",
        ProfileFile::CoverLetter => "Failed to upload cover letter",
    }
}

fn sentence_case(noun: &str) -> String {
    let mut chars = noun.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Reduce an upload reply.
#[must_use]
pub fn upload_outcome(file: ProfileFile, response: &FormSaveResponse) -> FileOutcome {
    let message = server_message(response);
    if !response.success {
        return FileOutcome {
            notice: Notice::error(message.unwrap_or_else(|| upload_failure_copy(file).to_string())),
            effect: FileEffect::Nothing,
        };
    }
    let effect = match file {
        ProfileFile::ProfileImage => response
            .image_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .map_or(FileEffect::Nothing, FileEffect::ShowImage),
        ProfileFile::Resume | ProfileFile::CoverLetter => FileEffect::Reload,
    };
    FileOutcome {
        notice: Notice::success(message.unwrap_or_else(|| {
            format!("{} uploaded successfully!", sentence_case(file.noun()))
        })),
        effect,
    }
}

/// Reduce a delete reply.
#[must_use]
pub fn delete_outcome(file: ProfileFile, response: &FormSaveResponse) -> FileOutcome {
    let message = server_message(response);
    if !response.success {
        let failed = match file {
            ProfileFile::ProfileImage => "Failed to delete image".to_string(),
            other => format!("Failed to delete {}", other.noun()),
        };
        return FileOutcome {
            notice: Notice::error(message.unwrap_or(failed)),
            effect: FileEffect::Nothing,
        };
    }
    FileOutcome {
        notice: Notice::success(message.unwrap_or_else(|| {
            format!("{} deleted successfully!", sentence_case(file.noun()))
        })),
        effect: match file {
            ProfileFile::ProfileImage => FileEffect::ResetImage,
            ProfileFile::Resume | ProfileFile::CoverLetter => FileEffect::Reload,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::NoticeKind;

    fn reply(success: bool, message: Option<&str>) -> FormSaveResponse {
        FormSaveResponse {
            success,
            message: message.map(str::to_string),
            ..FormSaveResponse::default()
        }
    }

    #[test]
    fn section_saves_prefer_the_server_message() {
        let notice = section_notice(DetailForm::Seo, &reply(true, None));
        assert_eq!(notice.message, "SEO settings updated successfully!");
        let notice = section_notice(DetailForm::Seo, &reply(true, Some("Saved SEO")));
        assert_eq!(notice.message, "Saved SEO");
        let notice = section_notice(DetailForm::SocialLinks, &reply(false, Some("  ")));
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Failed to update links");
    }

    #[test]
    fn image_upload_updates_preview_and_documents_reload() {
        let mut response = reply(true, None);
        response.image_url = Some("/media/me.png".into());
        let outcome = upload_outcome(ProfileFile::ProfileImage, &response);
        assert_eq!(outcome.effect, FileEffect::ShowImage("/media/me.png".into()));
        assert_eq!(outcome.notice.message, "Profile image uploaded successfully!");

        let outcome = upload_outcome(ProfileFile::Resume, &reply(true, None));
        assert_eq!(outcome.effect, FileEffect::Reload);

        let outcome = upload_outcome(ProfileFile::CoverLetter, &reply(false, None));
        assert_eq!(outcome.effect, FileEffect::Nothing);
        assert_eq!(outcome.notice.message, "Failed to upload cover letter");
    }

    #[test]
    fn deletes_confirm_then_reset_or_reload() {
        assert_eq!(
            delete_prompt(ProfileFile::ProfileImage),
            "Are you sure you want to delete your profile image?"
        );
        let outcome = delete_outcome(ProfileFile::ProfileImage, &reply(true, None));
        assert_eq!(outcome.effect, FileEffect::ResetImage);
        assert_eq!(outcome.notice.message, "Profile image deleted successfully!");

        let outcome = delete_outcome(
            ProfileFile::Resume,
            &reply(false, Some("No resume to delete")),
        );
        assert_eq!(outcome.notice.message, "No resume to delete");
        assert_eq!(outcome.effect, FileEffect::Nothing);
        assert_eq!(
            delete_outcome(ProfileFile::ProfileImage, &reply(false, None)).notice.message,
            "Failed to delete image"
        );
    }
}
