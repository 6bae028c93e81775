//! HTML corpus crawler.
//!
//! Parses a directory of HTML pages and records which other pages in the
//! same directory each one links to. Self-links and links that point
//! outside the corpus (dangling links) are dropped, so the resulting
//! [`Corpus`] carries intra-corpus edges only.

use crate::{Corpus, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Build a [`Corpus`] from a directory of `.html` files.
///
/// Each file becomes a page named by its filename. `href` targets naming
/// another file in the same directory become links; everything else is
/// pruned. Files are visited in sorted filename order, so the resulting
/// page order (and with it any seeded sampling run) is deterministic.
pub fn crawl_directory(dir: impl AsRef<Path>) -> Result<Corpus> {
    let href = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("href pattern is valid");

    // filename -> raw link targets
    let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path)?;
        let links = href
            .captures_iter(&contents)
            .map(|capture| capture[1].to_string())
            .filter(|target| target != name)
            .collect();
        raw.insert(name.to_string(), links);
    }

    let total_links = raw.values().map(BTreeSet::len).sum();
    let mut corpus = Corpus::with_capacity(raw.len(), total_links);
    for name in raw.keys() {
        corpus.add_page(name.as_str());
    }
    for (name, links) in &raw {
        for target in links {
            // Only keep links that resolve to another page in the corpus
            if raw.contains_key(target) {
                corpus.add_link(name.as_str(), target.as_str());
            }
        }
    }

    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageId;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("surfrank_html_tests").join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_crawl_extracts_intra_corpus_links() {
        let dir = scratch_dir("basic");
        fs::write(
            dir.join("1.html"),
            r#"<html><body><a href="2.html">two</a></body></html>"#,
        )
        .unwrap();
        fs::write(
            dir.join("2.html"),
            r#"<html><body><a href="1.html">one</a><a href="3.html">three</a></body></html>"#,
        )
        .unwrap();
        fs::write(dir.join("3.html"), "<html><body>no links</body></html>").unwrap();

        let corpus = crawl_directory(&dir).unwrap();

        assert_eq!(corpus.page_count(), 3);
        assert_eq!(corpus.link_count(), 3);
        assert_eq!(corpus.out_degree(&PageId::from("2.html")), 2);
        assert_eq!(corpus.out_degree(&PageId::from("3.html")), 0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_dangling_and_self_links_pruned() {
        let dir = scratch_dir("pruning");
        fs::write(
            dir.join("1.html"),
            r#"<a href="1.html">self</a><a href="missing.html">gone</a><a href="https://example.com/">out</a><a href="2.html">ok</a>"#,
        )
        .unwrap();
        fs::write(dir.join("2.html"), "<html></html>").unwrap();

        let corpus = crawl_directory(&dir).unwrap();

        let links = corpus.links_from(&PageId::from("1.html"));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "2.html");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_non_html_files_ignored() {
        let dir = scratch_dir("mixed");
        fs::write(dir.join("1.html"), r#"<a href="notes.txt">txt</a>"#).unwrap();
        fs::write(dir.join("notes.txt"), "not a page").unwrap();

        let corpus = crawl_directory(&dir).unwrap();

        assert_eq!(corpus.page_count(), 1);
        assert_eq!(corpus.link_count(), 0);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_directory_errors() {
        let result = crawl_directory("/definitely/not/a/real/dir");
        assert!(result.is_err());
    }
}
