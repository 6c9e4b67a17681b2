//! tunetag-match library
//!
//! Glue between the command line and the matching core: candidate folder
//! scanning, result reporting and playback hand-off.

pub mod playback;
pub mod report;
pub mod scanner;

use report::MatchReport;
use tunetag_common::{Catalog, MatchSelector, TagAggregator};

/// Split a comma-separated sticker list, trimming entries and dropping empties
pub fn parse_sticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Aggregate the selection and pick the best candidate
///
/// Pure function of its inputs: no I/O, no shared state.
pub fn match_candidates<S: AsRef<str>>(
    catalog: &Catalog,
    selector: &MatchSelector,
    selected: &[String],
    candidates: &[S],
) -> MatchReport {
    let aggregation = TagAggregator::new(catalog).aggregate_detailed(selected);
    let best = selector.select_best(&aggregation.tag_vector, candidates);
    MatchReport::new(selected.to_vec(), aggregation, best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sticker_list() {
        assert_eq!(parse_sticker_list("logo1,kb2,b6"), vec!["logo1", "kb2", "b6"]);
        assert_eq!(parse_sticker_list(" logo1 , ,kb2,"), vec!["logo1", "kb2"]);
        assert!(parse_sticker_list("").is_empty());
        assert!(parse_sticker_list(" , ").is_empty());
    }

    #[test]
    fn test_match_candidates() {
        let catalog = Catalog::reference();
        let selector = MatchSelector::default();
        let selected = parse_sticker_list("logo1,kb2");

        let report = match_candidates(
            &catalog,
            &selector,
            &selected,
            &[
                "sunny,spring,beach,pink,cat.mid",
                "sunny,spring,beach,pink,elephant.mid",
                "notes.txt",
            ],
        );

        assert_eq!(
            report.matched_file.as_deref(),
            Some("sunny,spring,beach,pink,elephant.mid")
        );
        assert_eq!(report.score, Some(17));
        assert_eq!(report.result_line(), "sunny,spring,beach,pink,elephant.mid");
    }
}
