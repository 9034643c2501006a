use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use invert_core::config::DEFAULT_CONTEXT_WINDOW;
use invert_core::corpus::{load_stoplist, DirectoryCorpus};
use invert_core::persist::{save_meta, save_postings, save_word_list, IndexPaths, MetaFile};
use invert_core::{EngineConfig, InvertedIndex, Stoplist};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod repl;

use repl::Session;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query a positional TF-IDF inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Directory of plain-text documents
    #[arg(long)]
    corpus: PathBuf,
    /// Stoplist file, one word per line
    #[arg(long)]
    stoplist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the corpus and write the word list, postings and meta files
    Build {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Output directory for wordlist.txt, postings.txt and meta.json
        #[arg(long)]
        output: PathBuf,
    },
    /// Build the index in memory and answer queries
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Also write the dump files here before answering queries
        #[arg(long)]
        output: Option<PathBuf>,
        /// Context window width in tokens
        #[arg(long, default_value_t = DEFAULT_CONTEXT_WINDOW)]
        window: usize,
        /// Line that ends the interactive session
        #[arg(long, default_value = "ZZZ")]
        sentinel: String,
        /// Answer a single query and exit
        #[arg(long)]
        query: Option<String>,
        /// Print outcomes as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, output } => {
            let (index, _) = build_index(&corpus)?;
            dump_index(&index, &output)
        }
        Commands::Query { corpus, output, window, sentinel, query, json } => {
            let config = EngineConfig::new(window)?;
            let (index, corpus) = build_index(&corpus)?;
            if let Some(output) = output {
                dump_index(&index, &output)?;
            }
            let session = Session { index: &index, corpus: &corpus, config, sentinel, json };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match query {
                Some(q) => session.answer(&mut out, &q)?,
                None => session.run(io::stdin().lock(), &mut out)?,
            }
            out.flush()?;
            Ok(())
        }
    }
}

fn build_index(args: &CorpusArgs) -> Result<(InvertedIndex, DirectoryCorpus)> {
    let corpus = DirectoryCorpus::open(&args.corpus)?;
    let stoplist = match &args.stoplist {
        Some(path) => load_stoplist(path),
        None => Stoplist::new(),
    };
    let index = corpus.build_index(stoplist);
    if index.num_docs() == 0 {
        tracing::warn!(corpus = %args.corpus.display(), "no documents were indexed");
    }
    Ok((index, corpus))
}

fn dump_index(index: &InvertedIndex, output: &Path) -> Result<()> {
    let paths = IndexPaths::new(output);
    save_word_list(&paths, index).context("writing word list")?;
    save_postings(&paths, index).context("writing postings")?;
    let meta = MetaFile {
        num_docs: index.num_docs(),
        num_terms: index.num_terms(),
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(&paths, &meta)?;
    tracing::info!(output = %output.display(), num_terms = meta.num_terms, "index dump complete");
    Ok(())
}
