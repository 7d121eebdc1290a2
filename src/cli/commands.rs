use crate::config::{SearchConfig, Settings};
use crate::corpus::Corpus;
use crate::indexer::{Lemmatizer, Tokenizer};
use crate::search::{HybridRanker, SearchParams, SearchResponse};
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Build the shared text pipeline from settings
pub fn build_tokenizer(settings: &Settings) -> Result<Tokenizer> {
    let lemmatizer = match &settings.corpus.lemmas_path {
        Some(path) => Lemmatizer::new().with_lemma_file(path)?,
        None => Lemmatizer::new(),
    };
    Ok(Tokenizer::new(lemmatizer))
}

/// Load the corpus and build everything a search needs
pub fn load_ranker(settings: &Settings) -> Result<HybridRanker> {
    let started = Instant::now();
    let tokenizer = Arc::new(build_tokenizer(settings)?);
    let corpus = Corpus::load(&settings.corpus.path, tokenizer.normalizer())?;

    if corpus.is_empty() {
        return Err(Error::Corpus(format!(
            "Corpus at {} contains no recipes",
            settings.corpus.path.display()
        )));
    }

    let ranker = HybridRanker::from_corpus(corpus, tokenizer);
    info!(
        "Ready to search {} recipes ({} ms)",
        ranker.corpus().len(),
        started.elapsed().as_millis()
    );
    Ok(ranker)
}

/// Run one search and print the results
pub fn search(
    ranker: &HybridRanker,
    params: SearchParams,
    defaults: &SearchConfig,
    json: bool,
) -> Result<()> {
    let request = params.into_request(defaults)?;
    let response = ranker.search(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_search_results(&response);
    }

    Ok(())
}

/// Clean raw recipes and write them out as a corpus
pub fn prepare(input: &Path, output: &Path, tokenizer: &Tokenizer) -> Result<()> {
    let raw = Corpus::load_raw(input)?;
    let total = raw.len();
    let corpus = Corpus::prepare(raw, tokenizer);

    if corpus.is_empty() {
        return Err(Error::Validation(format!(
            "No usable recipes in {}",
            input.display()
        )));
    }

    corpus.save_jsonl(output)?;

    println!("✓ Prepared corpus: {}", output.display());
    println!("  Recipes: {} of {}", corpus.len(), total);
    Ok(())
}

/// Print corpus and index figures
pub fn stats(ranker: &HybridRanker) -> Result<()> {
    let stats = ranker.index().stats();
    let sources = count_sources(ranker.corpus());

    println!("Recipes:            {}", stats.documents);
    println!("Vocabulary:         {}", stats.vocabulary);
    println!("Avg document length: {:.2}", stats.average_doc_length);
    println!("\nSources:");
    for (source, count) in sources {
        let label = if source.is_empty() { "(none)" } else { source };
        println!("  {:<20} {}", label, count);
    }

    Ok(())
}

// Helper functions

fn count_sources(corpus: &Corpus) -> Vec<(&str, usize)> {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for record in corpus.records() {
        *counts.entry(record.source.as_str()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

fn print_search_results(response: &SearchResponse) {
    if response.results.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", response.count);
    println!("{:<8} {:<50} {:<12}", "Score", "Title", "Source");
    println!("{}", "-".repeat(72));

    for hit in &response.results {
        println!(
            "{:<8.4} {:<50} {:<12}",
            hit.score,
            truncate(&hit.title, 48),
            truncate(&hit.source, 12)
        );
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorpusConfig;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("crème brûlée tart", 8), "crème...");
    }

    #[test]
    fn test_prepare_then_load() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.jsonl");
        let output = dir.path().join("recipes.jsonl");
        let lines = [
            json!({"title": "Toast", "ingredients": "bread, butter", "instructions": "Toast.", "source": "github"}),
            json!({"title": "Tea", "ingredients": ["water", "tea leaves"], "instructions": ["Steep."]}),
            json!({"title": null, "ingredients": "salt"}),
        ];
        let content: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        std::fs::write(&input, content.join("\n")).unwrap();

        prepare(&input, &output, &Tokenizer::default()).unwrap();

        let settings = Settings {
            corpus: CorpusConfig {
                path: output,
                lemmas_path: None,
            },
            search: SearchConfig::default(),
        };
        let ranker = load_ranker(&settings).unwrap();
        assert_eq!(ranker.corpus().len(), 2);
        assert_eq!(count_sources(ranker.corpus()), vec![("", 1), ("github", 1)]);
    }

    #[test]
    fn test_load_ranker_rejects_empty_corpus() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jsonl");
        std::fs::write(&path, "\n").unwrap();

        let settings = Settings {
            corpus: CorpusConfig {
                path,
                lemmas_path: None,
            },
            search: SearchConfig::default(),
        };
        assert!(matches!(load_ranker(&settings), Err(Error::Corpus(_))));
    }
}
