use dbcompare_recon::config::parse_hex_color;

/// Presentation options for tabular reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStyle {
    /// Fill for differing cells, as 0xRRGGBB.
    pub highlight: u32,
    /// Bold the header and section rows.
    pub bold_headers: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            highlight: 0xFF0000,
            bold_headers: true,
        }
    }
}

impl ReportStyle {
    /// Parse `RRGGBB` or `#RRGGBB`, by the same rule job files are validated with.
    pub fn parse_color(s: &str) -> Option<u32> {
        parse_hex_color(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_highlight_is_red() {
        assert_eq!(ReportStyle::default().highlight, 0xFF0000);
    }

    #[test]
    fn parse_color_accepts_hash_prefix() {
        assert_eq!(ReportStyle::parse_color("#00ff00"), Some(0x00FF00));
        assert_eq!(ReportStyle::parse_color("FFFF00"), Some(0xFFFF00));
        assert_eq!(ReportStyle::parse_color("red"), None);
        assert_eq!(ReportStyle::parse_color("#12345"), None);
        assert_eq!(ReportStyle::parse_color("+ABCDE"), None);
    }
}
