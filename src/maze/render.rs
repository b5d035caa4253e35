use std::{io::Write, path::Path};

use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};
use unicode_truncate::UnicodeTruncateStr;

use super::{Cell, Direction, Maze};
use crate::error::MazeError;

impl Maze {
    /// Draws the maze as text.
    ///
    /// Each row becomes a wall line (the west wall glyph of every cell followed by its north wall)
    /// and a content line (the west wall followed by the cell content centered in `scale`
    /// columns). A bottom border closes the drawing.
    pub fn render(&self) -> String {
        let mut out = format!("Maze ({} x {}):\n", self.width(), self.height());
        for row in self.rows() {
            for cell in row {
                out.push_str(Self::corner_glyph(cell));
                let top = if cell.wall(Direction::North) {
                    Cell::WALL_HORIZONTAL
                } else {
                    " "
                };
                out.push_str(&top.repeat(self.scale));
            }
            out.push_str(Cell::WALL_VERTICAL);
            out.push('\n');

            for cell in row {
                out.push_str(if cell.wall(Direction::West) {
                    Cell::WALL_VERTICAL
                } else {
                    " "
                });
                out.push_str(&self.pad_content(cell.content()));
            }
            out.push_str(Cell::WALL_VERTICAL);
            out.push('\n');
        }
        out.push_str(Cell::WALL_VERTICAL);
        out.push_str(&Cell::WALL_HORIZONTAL.repeat((self.scale + 1) * self.width() - 1));
        out.push_str(Cell::WALL_VERTICAL);
        out.push('\n');
        out
    }

    /// The glyph in front of a cell on its wall line.
    fn corner_glyph(cell: &Cell) -> &'static str {
        if cell.wall(Direction::West) {
            Cell::WALL_VERTICAL
        } else {
            Cell::WALL_HORIZONTAL
        }
    }

    /// Centers `content` in `scale` columns, leaning right when the padding is uneven.
    /// Content wider than the cell is cut.
    fn pad_content(&self, content: &str) -> String {
        let (content, width) = content.unicode_truncate(self.scale);
        let left = (self.scale - width + 1) / 2;
        let right = self.scale - width - left;
        let padded = format!("{}{}{}", " ".repeat(left), content, " ".repeat(right));

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                padded.width(),
                self.scale,
                "Cell content must fill exactly `scale` columns."
            );
        }

        padded
    }

    /// Writes the text snapshot to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MazeError> {
        std::fs::write(path.as_ref(), self.render())?;
        tracing::info!("[render] saved snapshot to {}", path.as_ref().display());
        Ok(())
    }

    /// Writes the snapshot to a terminal with walls, path markers and unvisited cells colored.
    pub fn display(&self, out: &mut impl Write) -> std::io::Result<()> {
        let snapshot = self.render();
        let mut lines = snapshot.lines();
        if let Some(header) = lines.next() {
            queue!(
                out,
                style::PrintStyledContent(header.attribute(Attribute::Bold)),
                style::Print('\n')
            )?;
        }
        for line in lines {
            for ch in line.chars() {
                let styled = match ch {
                    '|' | '-' => ch.with(Color::DarkGrey),
                    '*' => ch.with(Color::Yellow).attribute(Attribute::Bold),
                    '/' => ch.with(Color::Blue),
                    _ => ch.stylize(),
                };
                queue!(out, style::PrintStyledContent(styled))?;
            }
            queue!(out, style::Print('\n'))?;
        }
        out.flush()
    }
}
