//! Attachment ingestion into month-sharded folders.
//!
//! Uploads land in `root/YYYY/MM/Attachment/{unix_millis}_{sanitized_name}` and
//! are handed back as a logical access path,
//! `/attachments/YYYY/MM/Attachment/{percent-encoded name}`, which never exposes
//! the physical root. Attachment metadata lives only in the filesystem.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::config::AppConfig;
use crate::error::{NoteError, NoteResult};
use crate::store::layout::{ATTACHMENT_DIR_NAME, attachment_dir};

/// Logical prefix an external server maps onto the notes root
pub const ACCESS_PREFIX: &str = "/attachments";

/// Characters that may not appear in a stored file name
const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Percent-encode set for one URL path segment: keep unreserved characters and
/// the sub-delimiters that are legal inside a segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Upper bound on millisecond bumps when a stored name is already taken
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// Replace `\ / : * ? " < > |` with `_`, leaving everything else untouched
pub fn sanitize_filename(name: &str) -> String {
    name.chars().map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c }).collect()
}

/// `{millis}_{sanitized_name}`
pub fn stored_filename(unix_millis: i64, sanitized_name: &str) -> String {
    format!("{}_{}", unix_millis, sanitized_name)
}

/// Logical access path for a stored attachment of the given month
pub fn access_path(date: NaiveDate, stored_name: &str) -> String {
    format!(
        "{}/{:04}/{:02}/{}/{}",
        ACCESS_PREFIX,
        date.year(),
        date.month(),
        ATTACHMENT_DIR_NAME,
        utf8_percent_encode(stored_name, PATH_SEGMENT)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentManager {
    root: PathBuf,
}

impl AttachmentManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(config.resolved_root()?))
    }

    /// Create the attachment folder for `date`'s month if missing
    pub fn ensure_dir(&self, date: NaiveDate) -> NoteResult<PathBuf> {
        let dir = attachment_dir(&self.root, date);
        fs::create_dir_all(&dir)
            .map_err(|e| NoteError::io("create attachment directory", &dir, e))?;
        Ok(dir)
    }

    /// Store `content` under a unique name and return its access path.
    ///
    /// The year and month come from `now` in its own time zone; the name prefix
    /// is `now` in Unix milliseconds. Files are created with create-new
    /// semantics. If the name is already taken (two uploads of the same name in
    /// one millisecond) the prefix is bumped by one millisecond and creation
    /// retried, so an existing attachment is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the folder cannot be created or the file
    /// cannot be written. A partially written file is left in place.
    pub fn save<Tz: TimeZone>(
        &self,
        content: &[u8],
        original_name: &str,
        now: &DateTime<Tz>,
    ) -> NoteResult<String> {
        let date = now.date_naive();
        let dir = self.ensure_dir(date)?;
        let sanitized = sanitize_filename(original_name);
        let base_millis = now.timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let stored_name = stored_filename(base_millis + attempt, &sanitized);
            let path = dir.join(&stored_name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("Attachment name {} taken, retrying", stored_name);
                    continue;
                }
                Err(e) => return Err(NoteError::io("create attachment", &path, e)),
            };
            file.write_all(content).map_err(|e| NoteError::io("write attachment", &path, e))?;

            log::debug!("Saved attachment {} ({} bytes)", path.display(), content.len());
            return Ok(access_path(date, &stored_name));
        }

        Err(NoteError::io(
            "find a free attachment name in",
            &dir,
            io::Error::from(io::ErrorKind::AlreadyExists),
        ))
    }

    /// Map a logical access path back onto the physical root.
    ///
    /// Each segment is percent-decoded and must be a plain file or directory
    /// name; `..`, `.`, empty segments and decoded separators are rejected so
    /// the result always stays inside the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not start with `/attachments/`, is
    /// not valid UTF-8 after decoding, or would escape the root.
    pub fn resolve_access_path(&self, access_path: &str) -> Result<PathBuf> {
        let relative = access_path
            .strip_prefix(ACCESS_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| anyhow!("Not an attachment path: {}", access_path))?;

        let mut resolved = self.root.clone();
        for segment in relative.split('/') {
            let decoded = percent_decode_str(segment)
                .decode_utf8()
                .map_err(|e| anyhow!("Attachment path is not valid UTF-8: {}", e))?;
            validate_segment(&decoded)?;
            resolved.push(decoded.as_ref());
        }
        Ok(resolved)
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() || segment.contains(['/', '\\']) {
        bail!("Invalid attachment path segment: {:?}", segment);
    }
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => bail!("Attachment path segment escapes the root: {:?}", segment),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use tempfile::TempDir;

    use super::*;

    fn utc_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my:notes?.png"), "my_notes_.png");
        assert_eq!(sanitize_filename(r#"a\b/c:d*e?f"g<h>i|j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("holiday photo é.jpg"), "holiday photo é.jpg");
    }

    #[test]
    fn test_save_names_and_access_path() {
        let dir = TempDir::new().unwrap();
        let manager = AttachmentManager::new(dir.path());

        let path = manager.save(b"png bytes", "my:notes?.png", &utc_millis(1_700_000_000_000)).unwrap();

        assert_eq!(path, "/attachments/2023/11/Attachment/1700000000000_my_notes_.png");
        let stored = dir.path().join("2023/11/Attachment/1700000000000_my_notes_.png");
        assert_eq!(fs::read(stored).unwrap(), b"png bytes");
    }

    #[test]
    fn test_access_path_percent_encodes_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            access_path(date, "1_my file #1 é.png"),
            "/attachments/2024/01/Attachment/1_my%20file%20%231%20%C3%A9.png"
        );
    }

    #[test]
    fn test_month_follows_the_callers_time_zone() {
        let dir = TempDir::new().unwrap();
        let manager = AttachmentManager::new(dir.path());
        // 2023-11-30T23:30:00Z is already December in UTC+02:00
        let now = utc_millis(1_701_387_000_000).with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

        let path = manager.save(b"x", "a.txt", &now).unwrap();
        assert_eq!(path, "/attachments/2023/12/Attachment/1701387000000_a.txt");
    }

    #[test]
    fn test_same_millisecond_same_name_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let manager = AttachmentManager::new(dir.path());
        let now = utc_millis(1_700_000_000_000);

        let first = manager.save(b"first", "a.txt", &now).unwrap();
        let second = manager.save(b"second", "a.txt", &now).unwrap();

        assert_ne!(first, second);
        assert_eq!(second, "/attachments/2023/11/Attachment/1700000000001_a.txt");
        let attachments = dir.path().join("2023/11/Attachment");
        assert_eq!(fs::read(attachments.join("1700000000000_a.txt")).unwrap(), b"first");
        assert_eq!(fs::read(attachments.join("1700000000001_a.txt")).unwrap(), b"second");
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let manager = AttachmentManager::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let first = manager.ensure_dir(date).unwrap();
        let second = manager.ensure_dir(date).unwrap();
        assert_eq!(first, second);
        assert!(second.is_dir());
    }

    #[test]
    fn test_resolve_access_path_round_trip() {
        let manager = AttachmentManager::new("/notes");
        let resolved = manager
            .resolve_access_path("/attachments/2024/01/Attachment/1_my%20file%20%C3%A9.png")
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/notes/2024/01/Attachment/1_my file é.png"));
    }

    #[test]
    fn test_resolve_access_path_rejects_traversal() {
        let manager = AttachmentManager::new("/notes");
        assert!(manager.resolve_access_path("/attachments/../etc/passwd").is_err());
        assert!(manager.resolve_access_path("/attachments/2024/%2E%2E/secret").is_err());
        assert!(manager.resolve_access_path("/attachments/2024/a%2Fb").is_err());
        assert!(manager.resolve_access_path("/attachments/2024//x").is_err());
        assert!(manager.resolve_access_path("/files/2024/01/x").is_err());
    }
}
