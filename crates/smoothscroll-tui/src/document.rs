use std::path::Path;

use anyhow::{Context, Result};
use smoothscroll_core::Viewport;

/// A text document split into lines, with section headings indexed
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    lines: Vec<String>,
    /// Line indices of section headings
    headings: Vec<usize>,
}

impl Document {
    pub fn from_text(title: impl Into<String>, text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(|l| l.replace('\t', "    ")).collect();
        let headings = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_heading(line))
            .map(|(idx, _)| idx)
            .collect();
        Self {
            title: title.into(),
            lines,
            headings,
        }
    }

    /// Read a UTF-8 text file
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_text(title, &text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn headings(&self) -> &[usize] {
        &self.headings
    }

    pub fn is_heading(&self, line: usize) -> bool {
        self.headings.binary_search(&line).is_ok()
    }

    /// First heading strictly below `line`
    pub fn heading_after(&self, line: usize) -> Option<usize> {
        let idx = self.headings.partition_point(|&h| h <= line);
        self.headings.get(idx).copied()
    }

    /// Last heading strictly above `line`
    pub fn heading_before(&self, line: usize) -> Option<usize> {
        let idx = self.headings.partition_point(|&h| h < line);
        idx.checked_sub(1).map(|i| self.headings[i])
    }

    /// Case-insensitive search starting next to `from`, wrapping around
    pub fn find(&self, query: &str, from: usize, forward: bool) -> Option<usize> {
        if query.is_empty() || self.lines.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        let len = self.lines.len();
        let from = from.min(len - 1);

        (1..=len)
            .map(|step| {
                if forward {
                    (from + step) % len
                } else {
                    (from + len - step % len) % len
                }
            })
            .find(|&idx| self.lines[idx].to_lowercase().contains(&needle))
    }
}

/// Markdown-style headings: one to six '#' followed by a space
fn is_heading(line: &str) -> bool {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && line[hashes..].starts_with(' ')
}

/// Vertical window onto a document, measured in lines
///
/// Offsets are fractional while an animation is running; rendering rounds
/// them to the nearest line. Every write is clamped to the scrollable range.
#[derive(Debug, Clone, Default)]
pub struct DocumentViewport {
    x: f64,
    y: f64,
    content_height: usize,
    height: u16,
}

impl DocumentViewport {
    pub fn new(content_height: usize) -> Self {
        Self {
            content_height,
            ..Default::default()
        }
    }

    /// Update the visible height (on resize); re-clamps the offset
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.y = self.clamp_y(self.y);
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn max_scroll(&self) -> f64 {
        self.content_height.saturating_sub(self.height as usize) as f64
    }

    /// First visible line
    pub fn top_line(&self) -> usize {
        self.y.round() as usize
    }

    /// First visible column
    pub fn top_column(&self) -> u16 {
        self.x.round().min(u16::MAX as f64) as u16
    }

    /// Pan horizontally by whole columns
    pub fn pan_by(&mut self, columns: i32) {
        let x = self.x.round() + columns as f64;
        let y = self.y;
        self.scroll_to(x, y);
    }

    /// Move by whole lines without animation
    pub fn scroll_by(&mut self, lines: i32) {
        let y = self.y.round() + lines as f64;
        let x = self.x;
        self.scroll_to(x, y);
    }

    /// Scroll position as a percentage of the scrollable range
    pub fn percent(&self) -> u16 {
        let max = self.max_scroll();
        if max <= 0.0 {
            100
        } else {
            ((self.y / max) * 100.0).round() as u16
        }
    }

    fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(0.0, self.max_scroll())
    }
}

impl Viewport for DocumentViewport {
    fn scroll_x(&self) -> f64 {
        self.x
    }

    fn scroll_y(&self) -> f64 {
        self.y
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.x = x.max(0.0);
        self.y = self.clamp_y(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Title\nintro\n\n## Usage\nrun it\n#not-a-heading\n## Notes\nend";

    #[test]
    fn test_headings_indexed() {
        let doc = Document::from_text("sample", SAMPLE);
        assert_eq!(doc.headings(), &[0, 3, 6]);
        assert!(doc.is_heading(3));
        assert!(!doc.is_heading(5));
    }

    #[test]
    fn test_heading_navigation() {
        let doc = Document::from_text("sample", SAMPLE);
        assert_eq!(doc.heading_after(0), Some(3));
        assert_eq!(doc.heading_after(4), Some(6));
        assert_eq!(doc.heading_after(6), None);
        assert_eq!(doc.heading_before(6), Some(3));
        assert_eq!(doc.heading_before(4), Some(3));
        assert_eq!(doc.heading_before(0), None);
    }

    #[test]
    fn test_find_wraps_around() {
        let doc = Document::from_text("sample", SAMPLE);
        assert_eq!(doc.find("RUN", 0, true), Some(4));
        assert_eq!(doc.find("intro", 4, true), Some(1));
        assert_eq!(doc.find("notes", 7, false), Some(6));
        assert_eq!(doc.find("title", 1, false), Some(0));
        assert_eq!(doc.find("missing", 0, true), None);
        assert_eq!(doc.find("", 0, true), None);
    }

    #[test]
    fn test_find_single_match_returns_itself() {
        let doc = Document::from_text("sample", SAMPLE);
        assert_eq!(doc.find("end", 7, true), Some(7));
        assert_eq!(doc.find("end", 7, false), Some(7));
    }

    #[test]
    fn test_viewport_clamps_writes() {
        let mut vp = DocumentViewport::new(100);
        vp.set_height(20);
        assert_eq!(vp.max_scroll(), 80.0);

        vp.scroll_to(0.0, 500.0);
        assert_eq!(vp.scroll_y(), 80.0);
        vp.scroll_to(0.0, -12.0);
        assert_eq!(vp.scroll_y(), 0.0);

        vp.scroll_to(0.0, 10.4);
        assert_eq!(vp.top_line(), 10);
        vp.scroll_by(3);
        assert_eq!(vp.scroll_y(), 13.0);
    }

    #[test]
    fn test_viewport_short_content() {
        let mut vp = DocumentViewport::new(5);
        vp.set_height(20);
        assert_eq!(vp.max_scroll(), 0.0);
        vp.scroll_by(10);
        assert_eq!(vp.scroll_y(), 0.0);
        assert_eq!(vp.percent(), 100);
    }

    #[test]
    fn test_pan_keeps_vertical_offset() {
        let mut vp = DocumentViewport::new(100);
        vp.set_height(10);
        vp.scroll_to(0.0, 30.0);
        vp.pan_by(8);
        assert_eq!(vp.top_column(), 8);
        vp.pan_by(-20);
        assert_eq!(vp.top_column(), 0);
        assert_eq!(vp.scroll_y(), 30.0);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut vp = DocumentViewport::new(100);
        vp.set_height(10);
        vp.scroll_to(0.0, 90.0);
        vp.set_height(50);
        assert_eq!(vp.scroll_y(), 50.0);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let err = Document::load(Path::new("/nonexistent/smoothscroll.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
