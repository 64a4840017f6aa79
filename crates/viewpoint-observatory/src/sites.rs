//! Site-list CSV ingest: `url,domain,category,rank_*` with blank ranks/categories permitted.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::Site;
use crate::util::normalize_url;

#[derive(Debug, Deserialize)]
struct SiteRow {
    url: String,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "rank_cz", alias = "rank")]
    rank: Option<i64>,
}

/// Load sites from a CSV file with header `url,domain,category,rank_*`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as CSV.
pub fn load_sites_csv(path: impl AsRef<Path>) -> Result<Vec<Site>, ConfigError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| match e.kind() {
        csv::ErrorKind::Io(_) => ConfigError::SitesRead {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
        },
        _ => ConfigError::Csv(e),
    })?;

    let mut sites = Vec::new();
    for result in reader.deserialize() {
        let row: SiteRow = result?;
        sites.push(Site {
            url: normalize_url(&row.url),
            domain: row.domain.trim().to_string(),
            category: row.category.filter(|c| !c.trim().is_empty()),
            rank: row.rank,
        });
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_sites_with_blank_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.csv");
        std::fs::write(
            &path,
            "url,domain,category,rank_cz\nidnes.cz,idnes.cz,news,1\nexample.com/,example.com,,\n",
        )
        .unwrap();

        let sites = load_sites_csv(&path).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].url, "https://idnes.cz");
        assert_eq!(sites[0].category.as_deref(), Some("news"));
        assert_eq!(sites[0].rank, Some(1));
        assert_eq!(sites[1].url, "https://example.com");
        assert_eq!(sites[1].category, None);
        assert_eq!(sites[1].rank, None);
    }
}
