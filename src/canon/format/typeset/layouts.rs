//! The three page-layout strategies and their shared markup scrubbers.

use std::sync::OnceLock;

use regex::Regex;

use super::PageLayout;

static STACKED_PATTERN: OnceLock<Regex> = OnceLock::new();
static PREFIXED_PATTERN: OnceLock<Regex> = OnceLock::new();
static BRACKET_MARKER: OnceLock<Regex> = OnceLock::new();
static SUP_SPAN: OnceLock<Regex> = OnceLock::new();
static TAG: OnceLock<Regex> = OnceLock::new();
static NUMERIC_ENTITY: OnceLock<Regex> = OnceLock::new();

/// Verse number in a paragraph of its own, body in the indented paragraph
/// that follows.
#[derive(Debug)]
pub struct Stacked;

impl PageLayout for Stacked {
    const DEBUG_NAME: &'static str = "stacked";

    fn candidates(content: &str) -> Vec<(u32, String)> {
        let re = STACKED_PATTERN.get_or_init(|| {
            Regex::new(
                r"(?is)<p class=MsoNormal>(\d+)\s*</p>\s*<p class=MsoNormal[^>]*style='margin-left:[^']*'>(.+?)</p>",
            )
            .expect("Invalid stacked pattern")
        });
        re.captures_iter(content)
            .filter_map(|cap| {
                let verse = cap[1].parse().ok()?;
                Some((verse, cap[2].to_string()))
            })
            .collect()
    }
}

/// Verse number leading the body paragraph itself.
#[derive(Debug)]
pub struct Prefixed;

impl PageLayout for Prefixed {
    const DEBUG_NAME: &'static str = "prefixed";

    fn candidates(content: &str) -> Vec<(u32, String)> {
        let re = PREFIXED_PATTERN.get_or_init(|| {
            Regex::new(r"(?s)<p class=MsoNormal[^>]*>(\d+)\s+([^<]+)")
                .expect("Invalid prefixed pattern")
        });
        re.captures_iter(content)
            .filter_map(|cap| {
                let verse = cap[1].parse().ok()?;
                Some((verse, cap[2].to_string()))
            })
            .collect()
    }
}

/// Inline `[N]` markers; each verse runs to the next marker or to the
/// trailing `<center>` navigation block.
#[derive(Debug)]
pub struct Bracketed;

impl PageLayout for Bracketed {
    const DEBUG_NAME: &'static str = "bracketed";

    fn candidates(content: &str) -> Vec<(u32, String)> {
        let re = BRACKET_MARKER
            .get_or_init(|| Regex::new(r"\[(\d+)\]").expect("Invalid bracket pattern"));

        let markers: Vec<(u32, usize, usize)> = re
            .captures_iter(content)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                let verse = cap[1].parse().ok()?;
                Some((verse, whole.end(), whole.start()))
            })
            .collect();

        let mut out = Vec::with_capacity(markers.len());
        for (i, &(verse, body_start, _)) in markers.iter().enumerate() {
            let body_end = markers
                .get(i + 1)
                .map(|&(_, _, next_start)| next_start)
                .unwrap_or(content.len());
            let mut body = &content[body_start..body_end];
            // The navigation block ends the last verse on the page.
            if let Some(center) = body.find("<center>") {
                body = &body[..center];
            }
            out.push((verse, body.to_string()));
        }
        out
    }
}

/// Removes superscript footnote spans.
pub(super) fn strip_sup(text: &str) -> String {
    let re = SUP_SPAN
        .get_or_init(|| Regex::new(r"(?is)<sup>.*?</sup>").expect("Invalid sup pattern"));
    re.replace_all(text, "").into_owned()
}

/// Removes every remaining tag.
pub(super) fn strip_tags(text: &str) -> String {
    let re = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid tag pattern"));
    re.replace_all(text, "").into_owned()
}

/// Removes leftover numeric character references.
pub(super) fn strip_numeric_entities(text: &str) -> String {
    let re = NUMERIC_ENTITY
        .get_or_init(|| Regex::new(r"&#\d+;").expect("Invalid entity pattern"));
    re.replace_all(text, "").into_owned()
}
