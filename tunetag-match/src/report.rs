//! Match result reporting
//!
//! Text output keeps the winning file name (or the `None` sentinel) on the
//! last line so a calling process can read it without parsing the rest.
//! JSON output mirrors the web bridge's response body.

use serde::Serialize;
use std::io::{self, Write};
use tunetag_common::{Aggregation, BestMatch, ScoredCandidate, TagVector};

/// Printed when no candidate qualifies
pub const NO_MATCH_SENTINEL: &str = "None";

/// Outcome of one matching run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub selected_stickers: Vec<String>,
    pub skipped_stickers: Vec<String>,
    pub input_tags: TagVector,
    pub matched_file: Option<String>,
    pub score: Option<u32>,
    pub match_count: Option<usize>,
    pub message: String,
}

impl MatchReport {
    pub fn new(selected: Vec<String>, aggregation: Aggregation, best: Option<BestMatch>) -> Self {
        let message = match &best {
            Some(_) => "Found a matching music file",
            None => "No matching file found",
        }
        .to_string();

        Self {
            selected_stickers: selected,
            skipped_stickers: aggregation.skipped,
            input_tags: aggregation.tag_vector,
            score: best.as_ref().map(|b| b.score),
            match_count: best.as_ref().map(|b| b.match_count),
            matched_file: best.map(|b| b.identifier),
            message,
        }
    }

    /// Winning file name, or the sentinel
    pub fn result_line(&self) -> &str {
        self.matched_file.as_deref().unwrap_or(NO_MATCH_SENTINEL)
    }

    /// Human-readable report; the last line is the result
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Selected stickers: [{}]", self.selected_stickers.join(", "))?;
        writeln!(out, "Generated input tags: {}", self.input_tags)?;
        match &self.matched_file {
            Some(file) => writeln!(out, "Best match: {}", file)?,
            None => writeln!(out, "{}", self.message)?,
        }
        writeln!(out, "{}", self.result_line())
    }

    /// JSON report (pretty-printed)
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Top `limit` ranked candidates, one per line
pub fn write_ranking<W: Write>(
    out: &mut W,
    ranking: &[ScoredCandidate],
    limit: usize,
) -> io::Result<()> {
    for (position, candidate) in ranking.iter().take(limit).enumerate() {
        writeln!(
            out,
            "{:>3}. {} (score {}, matches {})",
            position + 1,
            candidate.identifier,
            candidate.score,
            candidate.match_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunetag_common::{Catalog, MatchSelector, TagAggregator};

    fn report(selected: &[&str], candidates: &[&str]) -> MatchReport {
        let catalog = Catalog::reference();
        let selected: Vec<String> = selected.iter().map(|s| s.to_string()).collect();
        let aggregation = TagAggregator::new(&catalog).aggregate_detailed(&selected);
        let best = MatchSelector::default().select_best(&aggregation.tag_vector, candidates);
        MatchReport::new(selected, aggregation, best)
    }

    #[test]
    fn test_text_report_with_match() {
        let report = report(&["logo1", "kb2"], &["sunny,spring,beach,pink,elephant.mid"]);
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Selected stickers: [logo1, kb2]\n\
             Generated input tags: [sunny, spring, beach, pink, elephant]\n\
             Best match: sunny,spring,beach,pink,elephant.mid\n\
             sunny,spring,beach,pink,elephant.mid\n"
        );
    }

    #[test]
    fn test_text_report_without_match_ends_with_sentinel() {
        let report = report(&["logo1"], &[]);
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[lines.len() - 2], "No matching file found");
        assert_eq!(lines.last(), Some(&"None"));
    }

    #[test]
    fn test_json_report_shape() {
        let report = report(&["kb1", "ghost", "b2"], &["rainy,winter,desert,blue,cat.mid"]);
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["matchedFile"], "rainy,winter,desert,blue,cat.mid");
        assert_eq!(value["score"], 17);
        assert_eq!(value["matchCount"], 5);
        assert_eq!(value["skippedStickers"], serde_json::json!(["ghost"]));
        assert_eq!(
            value["inputTags"],
            serde_json::json!(["rainy", "winter", "desert", "blue", "cat"])
        );
        assert_eq!(value["selectedStickers"], serde_json::json!(["kb1", "ghost", "b2"]));
    }

    #[test]
    fn test_json_report_null_match() {
        let report = report(&[], &["bad.mid"]);
        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["matchedFile"].is_null());
        assert!(value["score"].is_null());
        assert_eq!(value["message"], "No matching file found");
    }

    #[test]
    fn test_write_ranking_limit() {
        let catalog = Catalog::reference();
        let target = TagAggregator::new(&catalog).aggregate(&["logo1", "kb2"]);
        let ranking = MatchSelector::default().rank(
            &target,
            [
                "sunny,spring,beach,pink,elephant.mid",
                "rainy,spring,desert,blue,cat.mid",
                "rainy,winter,desert,blue,cat.mid",
            ],
        );

        let mut out = Vec::new();
        write_ranking(&mut out, &ranking, 2).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "  1. sunny,spring,beach,pink,elephant.mid (score 17, matches 5)\n  \
             2. rainy,spring,desert,blue,cat.mid (score 5, matches 1)\n"
        );
    }
}
