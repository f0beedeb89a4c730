//! Generated directory index.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::http::path_bytes;
use crate::http::response::escape_html;

/// Characters left unescaped in link targets: unreserved marks plus `/`.
const LINK_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Percent-encoded from the raw name bytes, so names that are not
    /// UTF-8 still resolve when followed.
    fn link(&self) -> String {
        let mut target = path_bytes::to_bytes(&self.name).into_owned();
        if self.is_dir {
            target.push(b'/');
        }
        percent_encode(&target, LINK_SET).to_string()
    }

    fn label(&self) -> String {
        let suffix = match (self.is_symlink, self.is_dir) {
            (true, _) => "@",
            (false, true) => "/",
            (false, false) => "",
        };
        escape_html(&format!("{}{suffix}", self.name.to_string_lossy()))
    }
}

/// Read `dir` and return its entries sorted case-insensitively.
///
/// Symlinks are followed when deciding whether an entry is a directory.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry
            .file_type()
            .await
            .map(|t| t.is_symlink())
            .unwrap_or(false);
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);

        entries.push(ListingEntry {
            name: entry.file_name(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_key(|e| e.name.to_string_lossy().to_lowercase());
    Ok(entries)
}

/// Render the listing page. `display_path` is the decoded request path.
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut lines = vec![
        "<!DOCTYPE HTML>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{title}</title>\n</head>"),
        format!("<body>\n<h1>{title}</h1>"),
        "<hr>\n<ul>".to_string(),
    ];
    lines.extend(
        entries
            .iter()
            .map(|e| format!("<li><a href=\"{}\">{}</a></li>", e.link(), e.label())),
    );
    lines.push("</ul>\n<hr>\n</body>\n</html>\n".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: OsString::from(name),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn renders_title_and_links() {
        let page = render(
            "/docs/",
            &[entry("a b.txt", false, false), entry("sub", true, false)],
        );
        assert!(page.starts_with("<!DOCTYPE HTML>\n<html lang=\"en\">"));
        assert!(page.contains("<title>Directory listing for /docs/</title>"));
        assert!(page.contains("<h1>Directory listing for /docs/</h1>"));
        assert!(page.contains("<li><a href=\"a%20b.txt\">a b.txt</a></li>"));
        assert!(page.contains("<li><a href=\"sub/\">sub/</a></li>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn escapes_names_and_marks_symlinks() {
        let page = render("/<x>/", &[entry("<b>&", false, true)]);
        assert!(page.contains("Directory listing for /&lt;x&gt;/"));
        assert!(page.contains("<a href=\"%3Cb%3E%26\">&lt;b&gt;&amp;@</a>"));
    }

    #[tokio::test]
    async fn reads_and_sorts_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("beta.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("Alpha.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("gamma")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.to_str().unwrap()).collect();
        assert_eq!(names, ["Alpha.txt", "beta.txt", "gamma"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(&dir.path().join("nope")).await.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn links_non_unicode_names_by_raw_bytes() {
        let name = path_bytes::from_bytes(b"caf\xe9.txt");
        let page = render(
            "/",
            &[ListingEntry {
                name,
                is_dir: false,
                is_symlink: false,
            }],
        );
        assert!(page.contains("href=\"caf%E9.txt\""));
    }
}
