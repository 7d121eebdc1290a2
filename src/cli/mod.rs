// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipe-search")]
#[command(about = "Recipe search - rank recipes by query and ingredients on hand", long_about = None)]
pub struct Cli {
    /// Prepared corpus file (JSON Lines or JSON array)
    #[arg(long, global = true, env = "RECIPE_CORPUS_PATH")]
    pub corpus: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the corpus
    Search {
        /// Free-text query
        query: Option<String>,

        /// Ingredients on hand, comma-separated
        #[arg(short, long)]
        ingredients: Option<String>,

        /// Ingredients to avoid, comma-separated
        #[arg(short, long)]
        exclude: Option<String>,

        /// Weight of the keyword signal, 0 to 1
        #[arg(long)]
        alpha: Option<String>,

        /// Weight of the ingredient signal, 0 to 1
        #[arg(long)]
        beta: Option<String>,

        /// Number of results, 1 to 20
        #[arg(short = 'k', long)]
        top_k: Option<String>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean raw recipes into a searchable corpus
    Prepare {
        /// Raw recipes (JSON Lines or JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output corpus file (JSON Lines)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show corpus and index statistics
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from([
            "recipe-search",
            "search",
            "fried rice",
            "--ingredients",
            "eggs,rice",
            "-k",
            "5",
        ]);
        match cli.command {
            Commands::Search {
                query,
                ingredients,
                top_k,
                json,
                ..
            } => {
                assert_eq!(query.as_deref(), Some("fried rice"));
                assert_eq!(ingredients.as_deref(), Some("eggs,rice"));
                assert_eq!(top_k.as_deref(), Some("5"));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_prepare() {
        let cli = Cli::parse_from([
            "recipe-search",
            "--corpus",
            "/tmp/c.jsonl",
            "prepare",
            "-i",
            "raw.json",
            "-o",
            "out.jsonl",
        ]);
        assert_eq!(cli.corpus, Some(PathBuf::from("/tmp/c.jsonl")));
        assert!(matches!(cli.command, Commands::Prepare { .. }));
    }
}
