//! Utility functions for file naming

use crate::config::TitlePolicy;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Characters replaced by [`sanitize_file_stem`]
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn an item title into a file stem according to `policy`
///
/// [`TitlePolicy::Verbatim`] returns the title untouched, so a title such as
/// `a/b` produces a path inside a subdirectory of the output directory.
pub fn file_stem(title: &str, policy: TitlePolicy) -> Cow<'_, str> {
    match policy {
        TitlePolicy::Verbatim => Cow::Borrowed(title),
        TitlePolicy::Sanitize => sanitize_file_stem(title),
    }
}

/// Replace characters that are unsafe in a file name with `_`
///
/// Path separators, characters reserved on Windows and control characters are
/// replaced. Stems that would resolve to the current or parent directory (or
/// are empty) become `_`.
///
/// # Examples
///
/// ```
/// use feed_fetch::utils::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("Show: S01/E02"), "Show_ S01_E02");
/// assert_eq!(sanitize_file_stem(".."), "_");
/// assert_eq!(sanitize_file_stem("plain"), "plain");
/// ```
pub fn sanitize_file_stem(title: &str) -> Cow<'_, str> {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Cow::Owned("_".to_string());
    }

    let unsafe_char = |c: char| RESERVED_CHARS.contains(&c) || c.is_control();
    if trimmed.len() == title.len() && !title.contains(unsafe_char) {
        return Cow::Borrowed(title);
    }

    Cow::Owned(
        trimmed
            .chars()
            .map(|c| if unsafe_char(c) { '_' } else { c })
            .collect(),
    )
}

/// `<dir>/<stem>.<extension>`
///
/// The extension is appended rather than set, so dots already in the stem survive.
pub fn artifact_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", stem, extension))
}
