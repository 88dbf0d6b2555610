//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Options for rendering a recovered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum heading level (1-6); deeper headings are clamped
    pub max_heading_level: u8,

    /// Include YAML frontmatter with the title and block counts
    pub include_frontmatter: bool,

    /// Emit `# title` first when no heading carries the document title
    pub title_heading: bool,

    /// Character to use for unordered list markers (`-`, `*` or `+`)
    pub list_marker: char,

    /// Backslash-escape text that would otherwise read back as another
    /// block kind
    pub escape_special_chars: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the leading title heading.
    pub fn with_title_heading(mut self, include: bool) -> Self {
        self.title_heading = include;
        self
    }

    /// Set the list marker character. Anything other than `*` or `+` falls
    /// back to `-`.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = match marker {
            '*' | '+' => marker,
            _ => '-',
        };
        self
    }

    /// Enable or disable marker escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// The effective unordered list marker.
    pub(crate) fn bullet(&self) -> char {
        match self.list_marker {
            '*' | '+' => self.list_marker,
            _ => '-',
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            title_heading: false,
            list_marker: '-',
            escape_special_chars: true,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .with_list_marker('*');

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.bullet(), '*');
    }

    #[test]
    fn test_invalid_list_marker_falls_back() {
        assert_eq!(RenderOptions::new().with_list_marker('x').bullet(), '-');

        let options: RenderOptions = serde_json::from_str(r##"{"list_marker": "#"}"##).unwrap();
        assert_eq!(options.bullet(), '-');
        assert_eq!(options.max_heading_level, 6);
    }
}
