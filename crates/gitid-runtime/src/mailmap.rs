use crate::Result;
use gitid_types::AuditResult;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// One remap: commits authored as `wrong_email` become `correct_email`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailmapEntry {
    pub correct_email: String,
    pub wrong_email: String,
}

/// Remap table handed to the rewrite tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mailmap {
    entries: Vec<MailmapEntry>,
}

impl Mailmap {
    /// One entry per distinct wrong email, in first-seen order.
    ///
    /// Emails differing only by case collapse into one entry.
    pub fn from_mismatches<'a>(
        correct_email: &str,
        mismatches: impl IntoIterator<Item = &'a AuditResult>,
    ) -> Self {
        let mut entries: Vec<MailmapEntry> = Vec::new();
        for result in mismatches {
            let wrong = result.commit.author_email.trim();
            if wrong.is_empty() || entries.iter().any(|e| e.wrong_email.eq_ignore_ascii_case(wrong)) {
                continue;
            }
            entries.push(MailmapEntry {
                correct_email: correct_email.to_string(),
                wrong_email: wrong.to_string(),
            });
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[MailmapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `<correct> <wrong>` per line, no comments
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("<{}> <{}>\n", e.correct_email, e.wrong_email))
            .collect()
    }

    /// Write to a private temp file in `dir`, deleted when the handle drops
    pub fn write_temp(&self, dir: &Path) -> Result<NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("gitid-mailmap-")
            .suffix(".txt")
            .tempfile_in(dir)?;
        file.write_all(self.render().as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}
