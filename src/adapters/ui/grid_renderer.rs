//! Terminal renderer for the annotated grid: colored cells, legend, stats.
//!
//! Periods run down, days across. Each occupied cell is painted with its
//! category color and shows the (truncated) first course title, with a `+N`
//! suffix when several courses share the cell.

use crate::domain::{AnnotatedGrid, CellId, ColorConfig, DomainError, WeekCategory};
use crate::ports::GridRenderer;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::io::Write;

/// Printable width of one grid cell, in terminal columns.
const CELL_WIDTH: usize = 14;

/// Column headers, day 1..=7.
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Course titles longer than this many characters are truncated.
const TITLE_MAX_CHARS: usize = 10;
const TITLE_KEEP_CHARS: usize = 8;

/// Renders to stdout with crossterm.
pub struct TerminalGridRenderer;

impl TerminalGridRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_to(
        &self,
        out: &mut impl Write,
        grid: &AnnotatedGrid,
        colors: &ColorConfig,
    ) -> std::io::Result<()> {
        if grid.cells.is_empty() {
            queue!(out, Print("no occupied cells to display\n"))?;
            self.render_legend(out, colors)?;
            out.flush()?;
            return Ok(());
        }

        // Header row.
        queue!(out, Print(format!("{:>4} ", "")))?;
        for label in DAY_LABELS {
            queue!(out, Print(pad_display(label, CELL_WIDTH)), Print(" "))?;
        }
        queue!(out, Print("\n"))?;

        for period in 1..=grid.max_period() {
            queue!(out, Print(format!("{:>4} ", format!("P{period}"))))?;
            for day in 1..=7u8 {
                match grid.cells.get(&CellId { day, period }) {
                    Some(cell) => {
                        let mut text = truncate_title(
                            cell.courses.first().map(|c| c.title.as_str()).unwrap_or(""),
                        );
                        if cell.courses.len() > 1 {
                            text.push_str(&format!("+{}", cell.courses.len() - 1));
                        }
                        queue!(
                            out,
                            SetBackgroundColor(hex_to_color(&cell.color)),
                            SetForegroundColor(Color::Black),
                            Print(pad_display(&text, CELL_WIDTH)),
                            ResetColor,
                            Print(" ")
                        )?;
                    }
                    None => {
                        queue!(out, Print(pad_display("", CELL_WIDTH)), Print(" "))?;
                    }
                }
            }
            queue!(out, Print("\n"))?;
        }

        queue!(out, Print("\n"))?;
        self.render_legend(out, colors)?;
        self.render_stats(out, grid)?;
        out.flush()
    }

    fn render_legend(&self, out: &mut impl Write, colors: &ColorConfig) -> std::io::Result<()> {
        queue!(out, Print("legend: "))?;
        for category in WeekCategory::ALL {
            queue!(
                out,
                SetBackgroundColor(hex_to_color(colors.resolve(category))),
                Print("  "),
                ResetColor,
                Print(format!(" {}  ", category.label()))
            )?;
        }
        queue!(out, Print("\n"))
    }

    fn render_stats(&self, out: &mut impl Write, grid: &AnnotatedGrid) -> std::io::Result<()> {
        queue!(out, Print("cells:  "))?;
        for category in WeekCategory::ALL {
            queue!(
                out,
                Print(format!("{}: {}  ", category.label(), grid.stats.count(category)))
            )?;
        }
        queue!(out, Print(format!("total: {}\n", grid.stats.total)))
    }
}

impl Default for TerminalGridRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GridRenderer for TerminalGridRenderer {
    fn render(&self, grid: &AnnotatedGrid, colors: &ColorConfig) -> Result<(), DomainError> {
        let mut out = std::io::stdout();
        self.render_to(&mut out, grid, colors)
            .map_err(|e| DomainError::Render(e.to_string()))
    }
}

/// Parse `#rrggbb` into a terminal color. Bad values degrade to the terminal
/// default rather than failing the render. The hex-digit gate also keeps the
/// byte-offset slices below on char boundaries for multibyte garbage from a
/// hand-edited color file.
fn hex_to_color(hex: &str) -> Color {
    let digits = match hex.strip_prefix('#') {
        Some(d) if d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()) => d,
        _ => return Color::Reset,
    };
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16);
    match (parse(0..2), parse(2..4), parse(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb { r, g, b },
        _ => Color::Reset,
    }
}

/// Terminal display width of a char: CJK glyphs take two columns. Coarse
/// cutoff, sized for the CJK course titles this grid shows; some narrow
/// codepoints above U+2E80 (halfwidth katakana) over-count, which only
/// widens their padding.
fn char_width(c: char) -> usize {
    if c >= '\u{2E80}' { 2 } else { 1 }
}

fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Truncate a course title the way the schedule grid always has: anything over
/// ten characters keeps the first eight plus an ellipsis.
fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let mut t: String = title.chars().take(TITLE_KEEP_CHARS).collect();
        t.push_str("...");
        t
    } else {
        title.to_string()
    }
}

/// Pad (or trim) to `width` terminal columns, accounting for wide glyphs.
fn pad_display(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{self, ColorConfig, CourseRecord};

    #[test]
    fn hex_parsing() {
        assert_eq!(
            hex_to_color("#ff9966"),
            Color::Rgb {
                r: 0xff,
                g: 0x99,
                b: 0x66
            }
        );
        assert_eq!(hex_to_color("ff9966"), Color::Reset);
        assert_eq!(hex_to_color("#zzzzzz"), Color::Reset);
        assert_eq!(hex_to_color("#fff"), Color::Reset);
    }

    #[test]
    fn multibyte_color_values_degrade_to_reset() {
        // Six bytes but two chars; must not reach the byte-offset slicing.
        assert_eq!(hex_to_color("#日日"), Color::Reset);
        assert_eq!(hex_to_color("#ab日"), Color::Reset);
        assert_eq!(hex_to_color("#ééé"), Color::Reset);
    }

    #[test]
    fn corrupt_color_file_value_still_renders() {
        // ColorStoreJson accepts any string, so a hand-edited colors.json can
        // carry garbage; the render must degrade, not crash.
        let mut colors = ColorConfig::default();
        colors.set(crate::domain::WeekCategory::Weeks1to8, "#日日");
        let courses = vec![CourseRecord::new("A", "星期一第1-1节{1-8周}")];
        let grid = domain::annotate(&courses, &colors);

        let mut buf = Vec::new();
        TerminalGridRenderer::new()
            .render_to(&mut buf, &grid, &colors)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("total: 1"));
    }

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(truncate_title("短名"), "短名");
        assert_eq!(
            truncate_title("面向对象程序设计实践课程"),
            "面向对象程序设计..."
        );
    }

    #[test]
    fn padding_accounts_for_wide_glyphs() {
        assert_eq!(display_width("数学"), 4);
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("数学", 4), "数学");
        // Trims instead of overflowing the cell.
        assert_eq!(pad_display("数学分析", 4), "数学");
    }

    #[test]
    fn renders_headers_legend_and_stats() {
        let courses = vec![CourseRecord::new("A", "星期一第1-2节{1-8周}")];
        let grid = domain::annotate(&courses, &ColorConfig::default());

        let mut buf = Vec::new();
        TerminalGridRenderer::new()
            .render_to(&mut buf, &grid, &ColorConfig::default())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Mon"));
        assert!(text.contains("P1"));
        assert!(text.contains("legend:"));
        assert!(text.contains("total: 2"));
    }

    #[test]
    fn empty_grid_renders_notice() {
        let grid = domain::annotate(&[], &ColorConfig::default());
        let mut buf = Vec::new();
        TerminalGridRenderer::new()
            .render_to(&mut buf, &grid, &ColorConfig::default())
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("no occupied cells"));
    }
}
