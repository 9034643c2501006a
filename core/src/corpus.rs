//! Corpus and stoplist sources.

use crate::index::{IndexBuilder, InvertedIndex};
use crate::snippet::DocumentSource;
use crate::tokenizer::Stoplist;
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Read a stoplist with one word per line. An unreadable file yields an empty stoplist.
pub fn load_stoplist<P: AsRef<Path>>(path: P) -> Stoplist {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => {
            let stoplist: Stoplist = text.lines().collect();
            tracing::info!(path = %path.display(), words = stoplist.len(), "loaded stoplist");
            stoplist
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unable to read stoplist, continuing without one");
            Stoplist::new()
        }
    }
}

/// A flat directory of plain-text documents, named by file base name.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
}

impl DirectoryCorpus {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            bail!("corpus directory {} does not exist", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path { &self.root }

    /// Non-hidden, non-directory entries directly under the root, sorted by name.
    pub fn document_names(&self) -> Vec<String> {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable corpus entry");
                    None
                }
            })
            .filter(|e| !e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_owned))
            .filter(|name| !name.starts_with('.'))
            .collect()
    }

    fn document_path(&self, name: &str) -> io::Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(io::Error::new(io::ErrorKind::InvalidInput, format!("invalid document name `{name}`"))),
        }
    }

    pub fn read_document(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.document_path(name)?)
    }

    /// Scan every document once. Documents that cannot be read are logged and left out.
    pub fn build_index(&self, stoplist: Stoplist) -> InvertedIndex {
        let mut builder = IndexBuilder::new(stoplist);
        for name in self.document_names() {
            match self.read_document(&name) {
                Ok(text) => {
                    builder.add_document(name, text.lines());
                }
                Err(err) => {
                    tracing::warn!(document = %name, error = %err, "unable to read document, skipping");
                }
            }
        }
        builder.finish()
    }
}

impl DocumentSource for DirectoryCorpus {
    fn open(&self, document: &str) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.document_path(document)?)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Documents held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: BTreeMap<String, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(name.into(), text.into());
    }

    pub fn build_index(&self, stoplist: Stoplist) -> InvertedIndex {
        InvertedIndex::build(stoplist, self.docs.iter().map(|(name, text)| (name.clone(), text.lines())))
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for MemoryCorpus {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut corpus = MemoryCorpus::new();
        for (name, text) in iter {
            corpus.insert(name, text);
        }
        corpus
    }
}

impl DocumentSource for MemoryCorpus {
    fn open(&self, document: &str) -> io::Result<Box<dyn BufRead + '_>> {
        let text = self
            .docs
            .get(document)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no document `{document}`")))?;
        Ok(Box::new(text.as_bytes()))
    }
}
