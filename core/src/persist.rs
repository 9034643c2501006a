use crate::InvertedIndex;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn word_list(&self) -> PathBuf { self.root.join("wordlist.txt") }
    pub fn postings(&self) -> PathBuf { self.root.join("postings.txt") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(f))
}

/// `term df` per line, sorted by term.
pub fn write_word_list<W: Write>(out: &mut W, index: &InvertedIndex) -> Result<()> {
    for (term, df) in index.word_list() {
        writeln!(out, "{term} {df}")?;
    }
    Ok(())
}

/// Per term: the term, then `document [count]: [p1, p2, ...]` per document, then a blank line.
pub fn write_postings<W: Write>(out: &mut W, index: &InvertedIndex) -> Result<()> {
    for (term, _) in index.word_list() {
        writeln!(out, "{term}")?;
        let mut lines: Vec<(&str, &[u32])> = index
            .postings(term)
            .unwrap_or(&[])
            .iter()
            .filter_map(|p| index.doc(p.doc_id).map(|d| (d.name.as_str(), p.positions.as_slice())))
            .collect();
        lines.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for (document, positions) in lines {
            writeln!(out, "{document} [{}]: {positions:?}", positions.len())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn save_word_list(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    let mut f = create(&paths.word_list())?;
    write_word_list(&mut f, index)?;
    f.flush()?;
    Ok(())
}

pub fn save_postings(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    let mut f = create(&paths.postings())?;
    write_postings(&mut f, index)?;
    f.flush()?;
    Ok(())
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    let mut f = create(&paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    f.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stoplist;

    #[test]
    fn postings_dump_format() {
        let index = InvertedIndex::build(
            ["the"].into_iter().collect::<Stoplist>(),
            [("b", vec!["cat the cat"]), ("a", vec!["dog cat"])],
        );
        let mut out = Vec::new();
        write_postings(&mut out, &index).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "cat\na [1]: [1]\nb [2]: [0, 2]\n\ndog\na [1]: [0]\n\n");

        let mut out = Vec::new();
        write_word_list(&mut out, &index).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "cat 2\ndog 1\n");
    }
}
