//! Image upload areas with local previews.
//!
//! # Design
//! - One queue per upload area; single-slot areas replace, multi-slot areas append.
//! - Only `image/*` files are accepted; everything else is reported back to the caller.
//! - Previews are `data:` URLs so they render without another request.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Upload failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The file is not an image.
    #[error("'{name}' is not an image ({mime})")]
    NotAnImage {
        /// File name.
        name: String,
        /// Reported MIME type.
        mime: String,
    },
    /// No file at the given position.
    #[error("no upload at position {0}")]
    OutOfRange(usize),
}

/// How many files an upload area holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// One file (thumbnail, icon, logo); a new file replaces the old one.
    Single,
    /// Any number of files (screenshots).
    Multiple,
}

/// File picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// Browser-reported MIME type.
    pub mime: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Whether the browser reports an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Inline preview URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Rendered preview tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Position used by the remove button.
    pub index: usize,
    /// File name used as alt text.
    pub name: String,
    /// Inline image source.
    pub src: String,
}

/// Files held by one upload area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadQueue {
    mode: UploadMode,
    files: Vec<UploadFile>,
}

impl UploadQueue {
    /// Empty queue.
    #[must_use]
    pub const fn new(mode: UploadMode) -> Self {
        Self {
            mode,
            files: Vec::new(),
        }
    }

    /// Area mode.
    #[must_use]
    pub const fn mode(&self) -> UploadMode {
        self.mode
    }

    /// Held files in display order.
    #[must_use]
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    /// Whether the area is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Offer picked or dropped files. Images are kept; the rest are returned as errors.
    ///
    /// A single-slot area keeps only the first image offered.
    pub fn offer(&mut self, files: Vec<UploadFile>) -> Vec<UploadError> {
        let mut rejected = Vec::new();
        for file in files {
            if !file.is_image() {
                rejected.push(UploadError::NotAnImage {
                    name: file.name,
                    mime: file.mime,
                });
                continue;
            }
            match self.mode {
                UploadMode::Single => {
                    self.files = vec![file];
                    return rejected;
                }
                UploadMode::Multiple => self.files.push(file),
            }
        }
        rejected
    }

    /// Remove the file at `index`; later files shift down.
    ///
    /// # Errors
    /// Returns [`UploadError::OutOfRange`] for an unknown position.
    pub fn remove(&mut self, index: usize) -> Result<UploadFile, UploadError> {
        if index < self.files.len() {
            Ok(self.files.remove(index))
        } else {
            Err(UploadError::OutOfRange(index))
        }
    }

    /// Drop every file.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Preview tiles in display order.
    #[must_use]
    pub fn previews(&self) -> Vec<Preview> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, file)| Preview {
                index,
                name: file.name.clone(),
                src: file.data_url(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> UploadFile {
        UploadFile {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn non_images_are_rejected() {
        let mut queue = UploadQueue::new(UploadMode::Multiple);
        let rejected = queue.offer(vec![
            image("a.png"),
            UploadFile {
                name: "notes.txt".into(),
                mime: "text/plain".into(),
                bytes: Vec::new(),
            },
        ]);
        assert_eq!(queue.files().len(), 1);
        assert!(matches!(rejected.as_slice(), [UploadError::NotAnImage { name, .. }] if name == "notes.txt"));
    }

    #[test]
    fn single_slot_replaces_previous_file() {
        let mut queue = UploadQueue::new(UploadMode::Single);
        assert!(queue.offer(vec![image("old.png")]).is_empty());
        assert!(queue.offer(vec![image("new.png"), image("extra.png")]).is_empty());
        assert_eq!(queue.files().len(), 1);
        assert_eq!(queue.files()[0].name, "new.png");
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn removal_reindexes_previews() {
        let mut queue = UploadQueue::new(UploadMode::Multiple);
        queue.offer(vec![image("a.png"), image("b.png"), image("c.png")]);
        assert_eq!(queue.remove(1).map(|file| file.name), Ok("b.png".to_string()));
        let previews = queue.previews();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[1].index, 1);
        assert_eq!(previews[1].name, "c.png");
        assert_eq!(queue.remove(5), Err(UploadError::OutOfRange(5)));
    }

    #[test]
    fn data_url_encodes_bytes() {
        assert_eq!(image("a.png").data_url(), "data:image/png;base64,AQID");
    }
}
