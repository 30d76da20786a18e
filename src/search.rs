//! Keyword-overlap relevance ranking.
//!
//! The query is lower-cased and split on whitespace. A document scores one
//! point for every query token found anywhere in its lower-cased content.
//! Matching is plain substring containment: `"go"` matches `"good"`, and a
//! token repeated in the query counts once per repetition.
//!
//! Ranking is a pure function of `(query, documents)`. Ties keep the
//! documents' input order.

use anyhow::Result;
use std::time::Duration;

use crate::config::Config;
use crate::documents::DocumentStore;
use crate::models::{ScoredDocument, SourceDocument};

/// Number of documents passed on as context.
pub const MAX_CONTEXT_DOCUMENTS: usize = 3;

/// Separator placed between excerpts in the joined context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Score a single document against pre-split, lower-cased tokens.
fn score(tokens: &[String], content: &str) -> u32 {
    let content = content.to_lowercase();
    tokens
        .iter()
        .filter(|token| content.contains(token.as_str()))
        .count() as u32
}

/// Split a query into lower-cased whitespace tokens, keeping duplicates.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Rank documents by keyword overlap with `query`.
///
/// Returns at most [`MAX_CONTEXT_DOCUMENTS`] documents, highest score
/// first. Documents that match no token are dropped.
pub fn rank(query: &str, documents: &[SourceDocument]) -> Vec<ScoredDocument> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredDocument> = documents
        .iter()
        .filter_map(|doc| {
            let s = score(&tokens, &doc.content);
            (s > 0).then(|| ScoredDocument {
                path: doc.path.clone(),
                content: doc.content.clone(),
                score: s,
            })
        })
        .collect();

    // sort_by is stable, so equal scores keep encounter order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_CONTEXT_DOCUMENTS);
    scored
}

/// Join ranked documents into one context string.
pub fn join_context(ranked: &[ScoredDocument]) -> String {
    ranked
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Rank and join in one step, logging which documents were picked.
pub fn search_documents(query: &str, documents: &[SourceDocument]) -> String {
    let ranked = rank(query, documents);
    let paths: Vec<&str> = ranked.iter().map(|d| d.path.as_str()).collect();
    tracing::debug!(matched = ranked.len(), paths = ?paths, "ranked context documents");
    join_context(&ranked)
}

/// `folio rank`: load the configured documents and print the ranking.
pub async fn run_rank(config: &Config, query: &str, show_context: bool) -> Result<()> {
    let timeout = Duration::from_secs(config.completion.timeout_secs);
    let store = DocumentStore::from_config(&config.documents, timeout).await?;
    let ranked = rank(query, store.documents());

    if ranked.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, doc) in ranked.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, doc.score, doc.path);
    }

    if show_context {
        println!();
        println!("{}", join_context(&ranked));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str, content: &str) -> SourceDocument {
        SourceDocument {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn corpus() -> Vec<SourceDocument> {
        vec![
            doc("a.md", "Python and SQL at DENSO"),
            doc("b.md", "MSc in Data and AI, Grenoble"),
            doc("c.md", "Python, machine learning, data pipelines"),
            doc("d.md", "Hobbies: climbing"),
            doc("e.md", "Data visualisation with Python and Power BI"),
        ]
    }

    #[test]
    fn test_orders_by_score_descending() {
        let ranked = rank("python data", &corpus());
        let paths: Vec<&str> = ranked.iter().map(|d| d.path.as_str()).collect();
        // c and e match both tokens; a matches python only, b data only
        assert_eq!(paths, vec!["c.md", "e.md", "a.md"]);
        assert_eq!(ranked[0].score, 2);
        assert_eq!(ranked[2].score, 1);
    }

    #[test]
    fn test_caps_at_three() {
        let docs: Vec<SourceDocument> = (0..10)
            .map(|i| doc(&format!("{}.md", i), "rust everywhere"))
            .collect();
        let ranked = rank("rust", &docs);
        assert_eq!(ranked.len(), MAX_CONTEXT_DOCUMENTS);
        // stable: first three in input order
        assert_eq!(ranked[0].path, "0.md");
        assert_eq!(ranked[2].path, "2.md");
    }

    #[test]
    fn test_search_documents_joins_top_matches() {
        let context = search_documents("python data", &corpus());
        assert_eq!(
            context,
            [
                "Python, machine learning, data pipelines",
                "Data visualisation with Python and Power BI",
                "Python and SQL at DENSO",
            ]
            .join(CONTEXT_SEPARATOR)
        );
    }

    #[test]
    fn test_drops_zero_scores() {
        let ranked = rank("kubernetes", &corpus());
        assert!(ranked.is_empty());
        assert_eq!(search_documents("kubernetes", &corpus()), "");
    }

    #[test]
    fn test_fewer_than_cap() {
        let ranked = rank("climbing", &corpus());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].path, "d.md");
    }

    #[test]
    fn test_duplicate_tokens_inflate_score() {
        let docs = vec![doc("x", "sql"), doc("y", "python")];
        let ranked = rank("python sql sql", &docs);
        assert_eq!(ranked[0].path, "x");
        assert_eq!(ranked[0].score, 2);
        assert_eq!(ranked[1].score, 1);
    }

    #[test]
    fn test_substring_over_match() {
        let docs = vec![doc("x", "Good communication")];
        assert_eq!(rank("go", &docs)[0].score, 1);
    }

    #[test]
    fn test_case_insensitive() {
        let docs = vec![doc("x", "PYTHON")];
        assert_eq!(rank("Python", &docs).len(), 1);
    }

    #[test]
    fn test_empty_query() {
        assert!(rank("", &corpus()).is_empty());
        assert!(rank("   \t ", &corpus()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let docs = corpus();
        let first = rank("python data ai sql", &docs);
        for _ in 0..5 {
            assert_eq!(rank("python data ai sql", &docs), first);
        }
    }

    #[test]
    fn test_ranking_properties_hold() {
        let docs = corpus();
        for query in ["python", "data python ai", "msc", "the and a", "zzz", ""] {
            let ranked = rank(query, &docs);
            assert!(ranked.len() <= MAX_CONTEXT_DOCUMENTS);
            assert!(ranked.iter().all(|d| d.score >= 1));
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_join_context_separator() {
        let ranked = rank("python", &corpus());
        let joined = join_context(&ranked);
        assert_eq!(joined.matches(CONTEXT_SEPARATOR).count(), ranked.len() - 1);
        assert!(joined.starts_with("Python and SQL at DENSO"));
    }
}
