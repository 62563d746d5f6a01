//! Batch input files
//!
//! Both batch commands take a JSON array file: product records for
//! `register_batch`, bare UUID strings for `get_offers_batch`.

use std::path::Path;

use anyhow::{Context, bail};
use offers_client::Product;
use uuid::Uuid;

/// Parse a JSON file into a list of products.
pub fn parse_products(path: &Path) -> anyhow::Result<Vec<Product>> {
    let value = read_array(path)?;
    serde_json::from_value(value)
        .with_context(|| format!("parsing product records from {}", path.display()))
}

/// Parse a JSON file into a list of product ids.
pub fn parse_ids(path: &Path) -> anyhow::Result<Vec<Uuid>> {
    let value = read_array(path)?;
    serde_json::from_value(value).with_context(|| format!("parsing ids from {}", path.display()))
}

fn read_array(path: &Path) -> anyhow::Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    if !value.is_array() {
        bail!("{} must contain a JSON array", path.display());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_a_product_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "products.json",
            r#"[{"id": "ad4c8529-0804-4053-a8d7-5e8b972422c7", "name": "Widget", "description": "A widget"}]"#,
        );

        let products = parse_products(&path).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
    }

    #[test]
    fn parses_an_id_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "ids.json",
            r#"["ad4c8529-0804-4053-a8d7-5e8b972422c7", "bd4c8529-0804-4053-a8d7-5e8b972422c8"]"#,
        );

        let ids = parse_ids(&path).unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn rejects_a_non_array_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", r#"{"id": "x"}"#);

        let err = parse_ids(&path).unwrap_err();
        assert!(err.to_string().contains("must contain a JSON array"));
    }

    #[test]
    fn rejects_a_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "products.json", r#"[{"name": "no id"}]"#);

        assert!(parse_products(&path).is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = parse_ids(&path).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
