//! Seed Resolver — turns a creation request into an initial review list.
//!
//! Resolution order: uploaded buffer → named catalog file → default catalog
//! file → hardcoded fallback pair. `resolve` never fails: a source that is
//! missing, unparseable, or empty is logged and treated as absent, and the
//! next tier is tried.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Well-known default catalog file inside the data directory.
pub const DEFAULT_CATALOG_FILE: &str = "sample-reviews-200.json";

/// Terminal fallback when even the default catalog is unreadable.
const FALLBACK_REVIEWS: [&str; 2] = ["Excellent service!", "Very professional."];

/// The seed sources supplied by one create request, highest priority
/// first. Both may be present; an unusable upload falls through to the
/// named file before the default catalog is consulted.
#[derive(Debug, Clone, Default)]
pub struct SeedSource {
    /// Raw bytes from a multipart `reviewFile` upload.
    pub upload: Option<Vec<u8>>,
    /// Name of a file in the server-side catalog directory.
    pub file_name: Option<String>,
}

/// Expected shape of every catalog file and uploaded seed file.
#[derive(Debug, Deserialize)]
struct ReviewFile {
    reviews: Vec<String>,
}

/// Read-only directory of seedable review files.
#[derive(Debug, Clone)]
pub struct ReviewCatalog {
    data_dir: PathBuf,
}

impl ReviewCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the request's sources into a non-empty review list.
    /// Infallible by contract: degrades tier by tier and ends at a
    /// hardcoded pair.
    pub fn resolve(&self, source: SeedSource) -> Vec<String> {
        if let Some(bytes) = source.upload {
            info!("Seeding reviews from uploaded file buffer");
            match parse_reviews(&bytes) {
                Some(reviews) => return reviews,
                None => warn!("Uploaded seed file unusable, trying next source"),
            }
        }

        if let Some(name) = source.file_name.as_deref().filter(|n| !n.is_empty()) {
            let path = self.data_dir.join(name);
            match read_reviews(&path) {
                Some(reviews) => {
                    info!("Seeded reviews from catalog file {name}");
                    return reviews;
                }
                None => warn!("Catalog file {name} unusable, falling back to default catalog"),
            }
        }

        self.default_reviews()
    }

    /// Names of `.json` files available for seeding.
    pub fn list_files(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn default_reviews(&self) -> Vec<String> {
        let path = self.data_dir.join(DEFAULT_CATALOG_FILE);
        match read_reviews(&path) {
            Some(reviews) => reviews,
            None => {
                warn!(
                    "Default catalog {} unreadable, using hardcoded fallback",
                    path.display()
                );
                FALLBACK_REVIEWS.iter().map(|s| s.to_string()).collect()
            }
        }
    }
}

/// Parses `{ "reviews": [...] }` bytes; `None` on parse failure or an
/// empty array so the caller can fall through to the next tier.
fn parse_reviews(bytes: &[u8]) -> Option<Vec<String>> {
    match serde_json::from_slice::<ReviewFile>(bytes) {
        Ok(file) if !file.reviews.is_empty() => Some(file.reviews),
        Ok(_) => {
            warn!("Seed file parsed but contained no reviews");
            None
        }
        Err(e) => {
            warn!("Failed to parse seed file: {e}");
            None
        }
    }
}

fn read_reviews(path: &Path) -> Option<Vec<String>> {
    let bytes = std::fs::read(path).ok()?;
    parse_reviews(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_with_default(dir: &TempDir) -> ReviewCatalog {
        std::fs::write(
            dir.path().join(DEFAULT_CATALOG_FILE),
            r#"{"reviews": ["A", "B"]}"#,
        )
        .unwrap();
        ReviewCatalog::new(dir.path())
    }

    fn write_hotel_file(dir: &TempDir) {
        std::fs::write(
            dir.path().join("hotel.json"),
            r#"{"reviews": ["Great stay"]}"#,
        )
        .unwrap();
    }

    fn upload(bytes: &[u8]) -> SeedSource {
        SeedSource {
            upload: Some(bytes.to_vec()),
            file_name: None,
        }
    }

    fn named(name: &str) -> SeedSource {
        SeedSource {
            upload: None,
            file_name: Some(name.to_string()),
        }
    }

    #[test]
    fn uploaded_buffer_is_returned_unmodified_in_order() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);

        let reviews = catalog.resolve(upload(br#"{"reviews": ["first", "second", "third"]}"#));
        assert_eq!(reviews, vec!["first", "second", "third"]);
    }

    #[test]
    fn upload_wins_over_named_source_when_both_supplied() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);
        write_hotel_file(&dir);

        let reviews = catalog.resolve(SeedSource {
            upload: Some(br#"{"reviews": ["from upload"]}"#.to_vec()),
            file_name: Some("hotel.json".to_string()),
        });
        assert_eq!(reviews, vec!["from upload"]);
    }

    #[test]
    fn unusable_upload_falls_through_to_named_source() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);
        write_hotel_file(&dir);

        // Parses, but has no usable reviews array — tier 2 must be tried.
        let reviews = catalog.resolve(SeedSource {
            upload: Some(br#"{"notreviews": []}"#.to_vec()),
            file_name: Some("hotel.json".to_string()),
        });
        assert_eq!(reviews, vec!["Great stay"]);
    }

    #[test]
    fn unparseable_upload_with_named_source_falls_through_to_it() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);
        write_hotel_file(&dir);

        let reviews = catalog.resolve(SeedSource {
            upload: Some(b"not json".to_vec()),
            file_name: Some("hotel.json".to_string()),
        });
        assert_eq!(reviews, vec!["Great stay"]);
    }

    #[test]
    fn unparseable_upload_without_named_source_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);

        let reviews = catalog.resolve(upload(b"not json"));
        assert_eq!(reviews, vec!["A", "B"]);
    }

    #[test]
    fn upload_with_empty_reviews_array_falls_back() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);

        let reviews = catalog.resolve(upload(b"{\"reviews\": []}"));
        assert_eq!(reviews, vec!["A", "B"]);
    }

    #[test]
    fn named_file_is_read_from_the_catalog_directory() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);
        write_hotel_file(&dir);

        let reviews = catalog.resolve(named("hotel.json"));
        assert_eq!(reviews, vec!["Great stay"]);
    }

    #[test]
    fn missing_named_file_falls_back_to_default_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);

        let reviews = catalog.resolve(named("missing.json"));
        assert_eq!(reviews, vec!["A", "B"]);
    }

    #[test]
    fn empty_source_reads_the_default_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);

        let reviews = catalog.resolve(SeedSource::default());
        assert_eq!(reviews, vec!["A", "B"]);
    }

    #[test]
    fn unreadable_default_catalog_yields_hardcoded_fallback() {
        let dir = TempDir::new().unwrap();
        let catalog = ReviewCatalog::new(dir.path()); // no default file written

        let reviews = catalog.resolve(SeedSource::default());
        assert_eq!(reviews, vec!["Excellent service!", "Very professional."]);
    }

    #[test]
    fn list_files_returns_only_json_names_sorted() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_default(&dir);
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let files = catalog.list_files().unwrap();
        assert_eq!(files, vec!["a.json", "b.json", DEFAULT_CATALOG_FILE]);
    }
}
