// src/index/search.rs
// =============================================================================
// Scores indexed images against a query.
//
// score(doc) = sum over query terms found in doc of (1 + ln tf) * idf
//
// The store looks up the TermEntry rows for the query terms; rank() turns
// them into an ordered list of document ids and hits() joins the ids back
// to their stored documents.
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::build::{IndexedImage, TermEntry};

/// One search result, as printed by `search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub file_url: String,
    pub alt: String,
    pub caption: String,
    pub page_url: String,
    pub domain: String,
    pub format: String,
    pub snippet: String,
    pub score: f64,
}

// Document ids with their scores, best first, at most `limit` of them
pub fn rank(entries: &[TermEntry], limit: usize) -> Vec<(String, f64)> {
    let mut scores: HashMap<&str, f64> = HashMap::new();

    for entry in entries {
        for posting in &entry.docs {
            let tf = f64::from(posting.tf.max(1));
            *scores.entry(posting.doc_id.as_str()).or_default() += (1.0 + tf.ln()) * entry.idf;
        }
    }

    let mut ranked: Vec<(String, f64)> = scores
        .into_iter()
        .map(|(id, score)| (id.to_string(), score))
        .collect();

    // Highest score first; equal scores in id order so output is stable
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(limit);
    ranked
}

// Joins ranked ids to their documents, dropping ids with no document
pub fn hits(ranked: &[(String, f64)], documents: Vec<IndexedImage>) -> Vec<SearchHit> {
    let mut by_id: HashMap<String, IndexedImage> = documents
        .into_iter()
        .map(|doc| (doc.id.clone(), doc))
        .collect();

    ranked
        .iter()
        .filter_map(|(id, score)| {
            let doc = by_id.remove(id)?;
            Some(SearchHit {
                id: doc.id,
                file_url: doc.file_url,
                alt: doc.alt_text,
                caption: doc.caption_text,
                page_url: doc.page_url,
                domain: doc.domain_name,
                format: doc.format,
                snippet: doc.snippet,
                score: *score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::Posting;

    fn entry(term: &str, idf: f64, docs: &[(&str, u32)]) -> TermEntry {
        TermEntry {
            term: term.to_string(),
            idf,
            docs: docs
                .iter()
                .map(|(id, tf)| Posting { doc_id: id.to_string(), tf: *tf })
                .collect(),
        }
    }

    fn document(id: &str) -> IndexedImage {
        IndexedImage {
            id: id.to_string(),
            file_url: id.to_string(),
            alt_text: "alt".to_string(),
            caption_text: String::new(),
            page_url: "https://x.test/".to_string(),
            domain_name: "x.test".to_string(),
            format: "png".to_string(),
            length: 3,
            snippet: "alt".to_string(),
        }
    }

    #[test]
    fn test_scores_sum_over_terms() {
        let entries = [
            entry("red", 1.0, &[("a", 1), ("b", 1)]),
            entry("bike", 2.0, &[("b", 1)]),
        ];
        let ranked = rank(&entries, 10);
        assert_eq!(ranked[0].0, "b");
        assert!((ranked[0].1 - 3.0).abs() < 1e-9);
        assert_eq!(ranked[1].0, "a");
        assert!((ranked[1].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_term_frequency_is_log_scaled() {
        let entries = [entry("cat", 1.0, &[("a", 4)])];
        let ranked = rank(&entries, 10);
        assert!((ranked[0].1 - (1.0 + 4f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_limit_and_tie_order() {
        let entries = [entry("sky", 1.0, &[("c", 1), ("a", 1), ("b", 1)])];
        let ranked = rank(&entries, 2);
        let ids: Vec<_> = ranked.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_no_entries_no_results() {
        assert!(rank(&[], 25).is_empty());
    }

    #[test]
    fn test_hits_keep_rank_order_and_skip_missing() {
        let ranked = vec![
            ("b".to_string(), 2.0),
            ("missing".to_string(), 1.5),
            ("a".to_string(), 1.0),
        ];
        let results = hits(&ranked, vec![document("a"), document("b")]);
        let ids: Vec<_> = results.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(results[0].score, 2.0);
        assert_eq!(results[0].alt, "alt");
    }
}
