//! Rendering lookups for the terminal.

use steno_lookup_core::{Lookup, Segmentation};

/// One line per segmentation: `1. KAT/HAT  (cat=KAT | hat=HAT)`.
pub fn render_segmentation(rank: usize, seg: &Segmentation) -> String {
    let parts: Vec<String> = seg
        .segments()
        .iter()
        .map(|s| format!("{}={}", s.text, s.steno))
        .collect();
    let cost = seg.cost();
    format!(
        "{}. {}  ({})  [{} strokes, {} keys]",
        rank,
        seg.strokes(),
        parts.join(" | "),
        cost.strokes,
        cost.keys
    )
}

/// Plain-text report for a whole lookup, showing at most `limit` results.
pub fn render_text(lookup: &Lookup, limit: Option<usize>) -> String {
    if lookup.is_empty() {
        let mut out = String::from("(no strokes found)");
        if !lookup.unmatched.is_empty() {
            out.push_str(&format!("\nunmatched: {}", lookup.unmatched.join(", ")));
        }
        return out;
    }
    let shown = limit.unwrap_or(usize::MAX);
    let mut lines: Vec<String> = lookup
        .segmentations
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, seg)| render_segmentation(i + 1, seg))
        .collect();
    if lookup.segmentations.len() > shown {
        lines.push(format!("... {} more", lookup.segmentations.len() - shown));
    }
    lines.join("\n")
}

/// Ranked segmentations as JSON, at most `limit` of them.
pub fn render_json(lookup: &Lookup, limit: Option<usize>) -> serde_json::Result<String> {
    let shown = limit.unwrap_or(usize::MAX).min(lookup.segmentations.len());
    serde_json::to_string(&lookup.segmentations[..shown])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;

    #[test]
    fn text_lists_ranked_results() {
        let lookup = Engine::demo().lookup("New York").unwrap();
        let text = render_text(&lookup, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "1. TPHAORBG  (New York=TPHAORBG)  [1 strokes, 8 keys]"
        );
        assert!(lines[1].starts_with("2. TPHU/KWRORBG"));
    }

    #[test]
    fn text_reports_limit_and_failures() {
        let engine = Engine::demo();
        let text = render_text(&engine.lookup("New York").unwrap(), Some(1));
        assert!(text.ends_with("... 1 more"));

        let text = render_text(&engine.lookup("cat dog").unwrap(), None);
        assert_eq!(text, "(no strokes found)\nunmatched: dog");
    }

    #[test]
    fn json_respects_limit() {
        let lookup = Engine::demo().lookup("New York").unwrap();
        assert_eq!(
            render_json(&lookup, Some(1)).unwrap(),
            r#"[[{"text":"New York","steno":["TPHAORBG"]}]]"#
        );
    }
}
