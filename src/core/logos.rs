//! Logo references: where the carousel's images come from.
//!
//! A reference is an opaque locator.  Local paths are decoded with the
//! [`image`] crate; anything that can't be opened (missing file, URL,
//! unsupported format) is reported as a failed load and the page falls back
//! to a placeholder.

use std::fmt;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use image::RgbaImage;
use thiserror::Error;

/// File extensions picked up when scanning a logo directory.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Image locator for one carousel slot.  Order matters, duplicates are fine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogoReference(String);

impl LogoReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogoReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The demo list used when nothing else is configured.
pub fn default_logos() -> Vec<LogoReference> {
    (1..=5)
        .map(|i| LogoReference::new(format!("assets/logos/logo{i}.png")))
        .collect()
}

// ───────────────────────────────────────── discovery ─────────

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("logo directory {0} does not exist")]
    MissingDir(PathBuf),
    #[error("failed to scan logo directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

/// Collect image files directly under `dir` (and its subdirectories),
/// sorted by path.  `.gitignore`d and hidden files are skipped.
pub fn discover(dir: &Path) -> Result<Vec<LogoReference>, LogoError> {
    if !dir.is_dir() {
        return Err(LogoError::MissingDir(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| LogoError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if has_image_extension(entry.path()) {
            found.push(LogoReference::new(entry.path().to_string_lossy()));
        }
    }
    found.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    Ok(found)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

// ───────────────────────────────────────── decoding ──────────

/// A decoded logo, downscaled for display.
#[derive(Debug, Clone)]
pub struct DecodedLogo {
    /// Natural size of the source image.
    pub width: u32,
    pub height: u32,
    /// Copy that fits inside `max_px × max_px`.
    pub thumbnail: RgbaImage,
}

/// Open and decode the image behind `reference`.
pub fn decode(reference: &LogoReference, max_px: u32) -> image::ImageResult<DecodedLogo> {
    let img = image::open(reference.as_str())?;
    let (width, height) = (img.width(), img.height());
    let thumbnail = if width > max_px || height > max_px {
        img.thumbnail(max_px, max_px).to_rgba8()
    } else {
        img.to_rgba8()
    };
    Ok(DecodedLogo {
        width,
        height,
        thumbnail,
    })
}
