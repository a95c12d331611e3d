//! Display and output formatting utilities

use crate::config::DisplayConfig;
use crate::driver::Renderer;
use crate::error::Result;
use crate::game_of_life::grid::DISPLAY_EXTENT;
use crate::game_of_life::{BoundingBox, Cell, CellSet};
use std::io::Write;

const ALIVE: char = '█';
const DEAD: char = '·';
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Regions wider or taller than this are clipped from their top-left corner
pub const MAX_RENDER_EXTENT: u64 = 1024;

/// Window onto the plane: `width` x `height` characters with the origin in
/// the middle, shifted by the pan offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub pan_x: i64,
    pub pan_y: i64,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pan_x: 0,
            pan_y: 0,
        }
    }

    /// Move the view by whole cells. Content shifts right/down for positive values.
    pub fn pan(&mut self, dx: i64, dy: i64) {
        self.pan_x = self.pan_x.saturating_add(dx);
        self.pan_y = self.pan_y.saturating_add(dy);
    }

    /// Plane coordinates covered by the viewport
    pub fn region(&self) -> BoundingBox {
        let min = Cell::new(
            (-(self.width as i64 / 2)).saturating_sub(self.pan_x),
            (-(self.height as i64 / 2)).saturating_sub(self.pan_y),
        );
        let max = Cell::new(
            min.x.saturating_add(self.width as i64 - 1),
            min.y.saturating_add(self.height as i64 - 1),
        );
        BoundingBox { min, max }
    }
}

impl From<&DisplayConfig> for Viewport {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pan_x: config.pan_x,
            pan_y: config.pan_y,
        }
    }
}

/// Format live sets for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format the cells of `snapshot` inside `region`, one text line per row
    pub fn format_region(snapshot: &CellSet, region: &BoundingBox) -> String {
        let region = region.clipped(MAX_RENDER_EXTENT, MAX_RENDER_EXTENT);
        let mut output = String::new();
        for y in region.min.y..=region.max.y {
            for x in region.min.x..=region.max.x {
                output.push(if snapshot.contains(&Cell::new(x, y)) { ALIVE } else { DEAD });
            }
            output.push('\n');
        }
        output
    }

    /// Format the live region from its top-left corner, at most
    /// `DISPLAY_EXTENT` cells each way. Empty string for an empty set.
    pub fn format_live_region(snapshot: &CellSet) -> String {
        BoundingBox::enclosing(snapshot.iter())
            .map(|bbox| {
                let clipped = bbox.clipped(DISPLAY_EXTENT, DISPLAY_EXTENT);
                Self::format_region(snapshot, &clipped)
            })
            .unwrap_or_default()
    }

    /// Format a region with the x coordinate of each column and y of each row
    pub fn format_with_coords(snapshot: &CellSet, region: &BoundingBox) -> String {
        let region = region.clipped(MAX_RENDER_EXTENT, MAX_RENDER_EXTENT);
        let mut output = String::new();

        // Header with column numbers
        output.push_str("     ");
        for x in region.min.x..=region.max.x {
            output.push_str(&format!("{:2}", x.rem_euclid(10)));
        }
        output.push('\n');

        // Rows with row numbers
        for y in region.min.y..=region.max.y {
            output.push_str(&format!("{:4} ", y));
            for x in region.min.x..=region.max.x {
                output.push_str(if snapshot.contains(&Cell::new(x, y)) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line population summary
    pub fn format_stats(generation: u64, snapshot: &CellSet) -> String {
        match BoundingBox::enclosing(snapshot.iter()) {
            Some(bbox) => format!(
                "Generation {} | Living: {} | Extent: {}x{} from {}",
                generation,
                snapshot.len(),
                bbox.width(),
                bbox.height(),
                bbox.min
            ),
            None => format!("Generation {} | Living: 0", generation),
        }
    }
}

/// Draws each frame of the viewport onto a writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
    clear_screen: bool,
    frames: u64,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            clear_screen: false,
            frames: 0,
        }
    }

    /// Redraw in place instead of appending frames
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, generation: u64, snapshot: &CellSet) -> Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        writeln!(
            self.out,
            "{}",
            ColorOutput::header(&GridFormatter::format_stats(generation, snapshot))
        )?;
        write!(
            self.out,
            "{}",
            GridFormatter::format_region(snapshot, &self.viewport.region())
        )?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }

    pub fn header(text: &str) -> String {
        Self::colored(text, Color::Cyan)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i64, i64)]) -> CellSet {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_viewport_region() {
        let mut viewport = Viewport::new(5, 4);
        let region = viewport.region();
        assert_eq!(region.min, Cell::new(-2, -2));
        assert_eq!(region.max, Cell::new(2, 1));

        viewport.pan(3, -1);
        let region = viewport.region();
        assert_eq!(region.min, Cell::new(-5, -1));
        assert_eq!(region.width(), 5);
        assert_eq!(region.height(), 4);
    }

    #[test]
    fn test_grid_formatting() {
        let live = cells(&[(0, 0), (1, 1), (-1, 1)]);
        let region = BoundingBox {
            min: Cell::new(-1, 0),
            max: Cell::new(1, 1),
        };

        assert_eq!(GridFormatter::format_region(&live, &region), "·█·\n█·█\n");
        assert_eq!(GridFormatter::format_live_region(&live), "·█·\n█·█\n");
        assert_eq!(GridFormatter::format_live_region(&CellSet::new()), "");

        let with_coords = GridFormatter::format_with_coords(&live, &region);
        assert!(with_coords.contains(" 9 0 1"));
        assert!(with_coords.contains("   1 ██··██"));
    }

    #[test]
    fn test_far_apart_cells_render_bounded() {
        let live = cells(&[(0, 0), (5_000_000, 0)]);

        let rendered = GridFormatter::format_live_region(&live);
        assert_eq!(rendered.chars().count(), DISPLAY_EXTENT as usize + 1);
        assert!(rendered.starts_with(ALIVE));

        let huge = BoundingBox {
            min: Cell::new(0, 0),
            max: Cell::new(5_000_000, 5_000_000),
        };
        let rendered = GridFormatter::format_region(&live, &huge);
        let extent = MAX_RENDER_EXTENT as usize;
        assert_eq!(rendered.chars().count(), (extent + 1) * extent);
    }

    #[test]
    fn test_stats() {
        let live = cells(&[(0, 0), (2, -1)]);
        assert_eq!(
            GridFormatter::format_stats(4, &live),
            "Generation 4 | Living: 2 | Extent: 3x2 from (0, -1)"
        );
        assert_eq!(GridFormatter::format_stats(0, &CellSet::new()), "Generation 0 | Living: 0");
    }

    #[test]
    fn test_terminal_renderer() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Viewport::new(3, 3));
        renderer.render(2, &cells(&[(-1, 0), (0, 0), (1, 0)])).unwrap();

        assert_eq!(renderer.frames(), 1);
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Generation 2"));
        assert!(output.ends_with("···\n███\n···\n"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Yellow);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
