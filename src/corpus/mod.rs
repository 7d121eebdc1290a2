//! The recipe corpus: loaded once at startup, read-only afterwards.
//!
//! Files are either a JSON array or JSON Lines (one object per line).

use crate::error::{Error, Result};
use crate::indexer::{Bm25Index, Normalizer, RawRecipe, RecipeRecord, Tokenizer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<RecipeRecord>,
    /// Ingredient lines per record after term normalization
    normalized_lines: Vec<Vec<String>>,
}

impl Corpus {
    pub fn new(records: Vec<RecipeRecord>, normalizer: &Normalizer) -> Self {
        let normalized_lines = records
            .iter()
            .map(|record| {
                record
                    .parsed_ingredient_lines
                    .iter()
                    .map(|line| normalizer.normalize_term(line))
                    .collect()
            })
            .collect();

        Self {
            records,
            normalized_lines,
        }
    }

    /// Clean raw recipes into a corpus, dropping incomplete ones
    pub fn prepare<I>(raw: I, tokenizer: &Tokenizer) -> Self
    where
        I: IntoIterator<Item = RawRecipe>,
    {
        let mut dropped = 0usize;
        let records: Vec<RecipeRecord> = raw
            .into_iter()
            .filter_map(|recipe| {
                let prepared = RecipeRecord::prepare(recipe, tokenizer);
                if prepared.is_none() {
                    dropped += 1;
                }
                prepared
            })
            .collect();

        if dropped > 0 {
            warn!("Dropped {} recipes missing a title or ingredients", dropped);
        }
        info!("Prepared {} recipes", records.len());

        Self::new(records, tokenizer.normalizer())
    }

    /// Load prepared records from disk
    pub fn load(path: impl AsRef<Path>, normalizer: &Normalizer) -> Result<Self> {
        let path = path.as_ref();
        let records: Vec<RecipeRecord> = read_records(path)?;
        info!("Loaded {} recipes from {:?}", records.len(), path);
        Ok(Self::new(records, normalizer))
    }

    /// Load unprepared source recipes from disk
    pub fn load_raw(path: impl AsRef<Path>) -> Result<Vec<RawRecipe>> {
        read_records(path.as_ref())
    }

    /// Write the prepared records as JSON Lines
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        for record in &self.records {
            write_line(&mut writer, record)?;
        }
        writer.flush()?;

        info!("Wrote {} recipes to {:?}", self.records.len(), path);
        Ok(())
    }

    /// Build the lexical index over every record's `clean_text`
    pub fn build_index(&self) -> Bm25Index {
        Bm25Index::build(self.records.iter().map(|record| record.index_tokens()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&RecipeRecord> {
        self.records.get(index)
    }

    /// Normalized ingredient lines of the record at `index`
    pub fn normalized_lines(&self, index: usize) -> &[String] {
        self.normalized_lines
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn write_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(Error::Corpus(format!("Corpus file not found: {}", path.display())));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim_start().starts_with('[') {
        debug!("Reading {:?} as a JSON array", path);
        return Ok(serde_json::from_str(&content)?);
    }

    debug!("Reading {:?} as JSON Lines", path);
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line).map_err(|e| {
                Error::Corpus(format!("{}:{}: {}", path.display(), number + 1, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn raw(title: &str, ingredients: serde_json::Value) -> RawRecipe {
        RawRecipe {
            title: Some(title.to_string()),
            ingredients,
            instructions: json!(["Cook."]),
            source: None,
        }
    }

    #[test]
    fn test_prepare_drops_incomplete() {
        let tokenizer = Tokenizer::default();
        let corpus = Corpus::prepare(
            vec![
                raw("Toast", json!(["Bread", "Butter"])),
                RawRecipe::default(),
                raw("Omelette", json!("eggs, salt")),
            ],
            &tokenizer,
        );
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().title, "Omelette");
    }

    #[test]
    fn test_normalized_lines_cached() {
        let tokenizer = Tokenizer::default();
        let corpus = Corpus::prepare(
            vec![raw("Salad", json!(["1 Green-Onion, sliced", "Rocket!"]))],
            &tokenizer,
        );
        assert_eq!(corpus.normalized_lines(0), ["1 green onion sliced", "rocket"]);
        assert!(corpus.normalized_lines(5).is_empty());
    }

    #[test]
    fn test_save_and_load_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("recipes.jsonl");
        let tokenizer = Tokenizer::default();

        let corpus = Corpus::prepare(
            vec![
                raw("Toast", json!(["Bread", "Butter"])),
                raw("Omelette", json!("eggs, salt")),
            ],
            &tokenizer,
        );
        corpus.save_jsonl(&path).unwrap();

        let loaded = Corpus::load(&path, tokenizer.normalizer()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(0).unwrap().clean_text, corpus.get(0).unwrap().clean_text);
        assert_eq!(loaded.get(1).unwrap().raw_ingredients, json!("eggs, salt"));
    }

    #[test]
    fn test_load_raw_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.json");
        std::fs::write(
            &path,
            r#"[{"title": "Toast", "ingredients": "bread, butter", "instructions": "Toast it."}]"#,
        )
        .unwrap();

        let raw = Corpus::load_raw(&path).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].title.as_deref(), Some("Toast"));
        assert!(raw[0].source.is_none());
    }

    #[test]
    fn test_load_reports_bad_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"title\": \"Toast\"}\n\nnot json\n").unwrap();

        match Corpus::load_raw(&path) {
            Err(Error::Corpus(msg)) => assert!(msg.contains(":3:"), "{msg}"),
            other => panic!("expected corpus error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = Corpus::load(dir.path().join("nope.jsonl"), &Normalizer::new());
        assert!(matches!(result, Err(Error::Corpus(_))));
    }
}
