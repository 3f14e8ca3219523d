//! Splitting a document into per-transaction sections.

use std::iter::FusedIterator;

use super::rules::patterns::SECTION_MARKER;

/// Lazy iterator over the transaction sections of a document.
///
/// A section starts at the beginning of a line carrying a serial-number
/// marker and runs up to the next such line. Text before the first marker
/// is preamble and is never yielded.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    text: &'a str,
    /// Start and marker end of the section yielded next.
    current: Option<(usize, usize)>,
}

impl<'a> Sections<'a> {
    fn new(text: &'a str) -> Self {
        let current = SECTION_MARKER.find(text).map(|m| (m.start(), m.end()));
        Self { text, current }
    }

    /// Document text before the first marker, or all of it without markers.
    pub fn preamble(&self) -> &'a str {
        match SECTION_MARKER.find(self.text) {
            Some(first) => &self.text[..first.start()],
            None => self.text,
        }
    }
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, marker_end) = self.current?;

            let section = match SECTION_MARKER.find_at(self.text, marker_end) {
                Some(next) => {
                    self.current = Some((next.start(), next.end()));
                    &self.text[start..next.start()]
                }
                None => {
                    self.current = None;
                    &self.text[start..]
                }
            };

            if !section.trim().is_empty() {
                return Some(section);
            }
        }
    }
}

impl FusedIterator for Sections<'_> {}

/// Split document text into transaction sections.
pub fn segment_sections(text: &str) -> Sections<'_> {
    Sections::new(text)
}
