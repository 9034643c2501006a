use anyhow::Result;
use invert_core::query::TermReport;
use invert_core::{evaluate, DocumentSource, EngineConfig, InvertedIndex, QueryOutcome, SnippetExtractor};
use std::io::{BufRead, Write};

pub struct Session<'a> {
    pub index: &'a InvertedIndex,
    pub corpus: &'a dyn DocumentSource,
    pub config: EngineConfig,
    pub sentinel: String,
    pub json: bool,
}

impl Session<'_> {
    /// Prompt for queries until the sentinel line or end of input.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> Result<()> {
        loop {
            write!(out, "\n\nEnter your query: ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let query = line.trim_end_matches(['\n', '\r']);
            if query == self.sentinel {
                break;
            }
            self.answer(out, query)?;
        }
        writeln!(out, "\nThank you for trying out the system")?;
        Ok(())
    }

    pub fn answer<W: Write>(&self, out: &mut W, query: &str) -> Result<()> {
        let outcome = evaluate(self.index, query);
        tracing::debug!(query, "evaluated query");
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
            return Ok(());
        }
        match &outcome {
            QueryOutcome::SingleTerm(report) => self.render_report(out, report)?,
            QueryOutcome::Ranked { hits, .. } => {
                for hit in hits {
                    writeln!(out, "{} {}", hit.document, hit.score)?;
                }
            }
            other => {
                if let Some(msg) = other.message() {
                    writeln!(out, "{msg}")?;
                }
            }
        }
        Ok(())
    }

    fn render_report<W: Write>(&self, out: &mut W, report: &TermReport) -> Result<()> {
        write!(out, "\nIDF = {}", report.idf)?;
        let extractor = SnippetExtractor::new(self.index, self.corpus, &self.config);
        for hit in &report.hits {
            writeln!(out, "\n\n{}[{}]: {:?}", hit.document, hit.positions.len(), hit.positions)?;
            writeln!(out, "TF = {}", hit.tf)?;
            writeln!(out, "TF.IDF = {}", hit.tf_idf)?;
            writeln!(out, "Context is as follows: ")?;
            match extractor.snippet(&report.term, &hit.document) {
                Ok(words) => writeln!(out, "{}", words.join(" "))?,
                Err(err) => {
                    tracing::warn!(document = %hit.document, error = %err, "unable to render context");
                    writeln!(out, "<context unavailable: {err}>")?;
                }
            }
        }
        Ok(())
    }
}
