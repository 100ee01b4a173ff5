//! Page lookup inside a document tree.

use crate::model::{Document, Section};

/// Finds the section or subsection displayed for `page_id`.
///
/// Sections are scanned in order. A section matches when its own URL equals
/// `page_id` or when one of its immediate subsections does; the first match
/// wins. If the matched section has subsections, the subsection with the
/// exact URL is returned, falling back to the section itself when the match
/// came from the section's own URL.
///
/// Only two levels are searched. An absent `page_id`, an empty document or
/// an unknown page all yield `None`.
///
/// # Examples
///
/// ```
/// use docview_core::{Document, Section, resolve_page};
///
/// let doc = Document::new(
///     "1.x",
///     vec![
///         Section::new("a"),
///         Section::new("b").with_sub_sections(vec![Section::new("b1")]),
///     ],
/// );
///
/// assert_eq!(resolve_page(&doc, Some("b1")).unwrap().url, "b1");
/// assert_eq!(resolve_page(&doc, Some("b")).unwrap().url, "b");
/// assert!(resolve_page(&doc, Some("missing")).is_none());
/// ```
pub fn resolve_page<'a>(document: &'a Document, page_id: Option<&str>) -> Option<&'a Section> {
    let page_id = page_id?;

    let matched = document.sections.iter().find(|section| {
        section.url == page_id || section.sub_sections().iter().any(|sub| sub.url == page_id)
    })?;

    if matched.has_sub_sections() {
        return matched
            .sub_sections()
            .iter()
            .find(|sub| sub.url == page_id)
            .or(Some(matched));
    }

    Some(matched)
}
