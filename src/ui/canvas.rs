//! Canvas - the cell grid an element tree is painted onto

use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    Command,
};
use unicode_width::UnicodeWidthChar;

use super::element::Rect;

/// One character cell
#[derive(Clone, Copy, PartialEq, Debug)]
struct Cell {
    ch: char,
    dim: bool,
    /// Right half of a double-width character
    continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            dim: false,
            continuation: false,
        }
    }
}

/// Fixed-size grid of cells
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set one cell; out-of-bounds writes are dropped
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, dim: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell {
                ch,
                dim,
                continuation: false,
            };
        }
    }

    /// Write a line of text at the top-left of `area`, clipped to its width
    pub fn put_str(&mut self, area: Rect, s: &str, dim: bool) {
        let limit = area.x.saturating_add(area.width);
        let mut x = area.x;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > limit {
                break;
            }
            self.put_char(x, area.y, ch, dim);
            for extra in 1..w {
                if let Some(i) = self.index(x + extra, area.y) {
                    self.cells[i] = Cell {
                        ch: ' ',
                        dim,
                        continuation: true,
                    };
                }
            }
            x += w;
        }
    }

    pub fn is_dim(&self, x: u16, y: u16) -> bool {
        self.index(x, y).map(|i| self.cells[i].dim).unwrap_or(false)
    }

    fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Rows as plain text, without color
    pub fn plain_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                self.row(y)
                    .iter()
                    .filter(|c| !c.continuation)
                    .map(|c| c.ch)
                    .collect()
            })
            .collect()
    }

    /// Rows joined with `\n` (no trailing newline), dim runs wrapped in
    /// `dim_color` and reset before each line break.
    pub fn to_ansi(&self, dim_color: Color) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize * 16);
        let mut line_buffer = String::with_capacity(self.width as usize);

        for y in 0..self.height {
            if y > 0 {
                out.push('\n');
            }

            let mut current_dim = false;
            for cell in self.row(y).iter().filter(|c| !c.continuation) {
                if cell.dim != current_dim {
                    out.push_str(&line_buffer);
                    line_buffer.clear();
                    push_color(&mut out, cell.dim, dim_color);
                    current_dim = cell.dim;
                }
                line_buffer.push(cell.ch);
            }
            out.push_str(&line_buffer);
            line_buffer.clear();

            if current_dim {
                push_color(&mut out, false, dim_color);
            }
        }

        out
    }
}

fn push_color(out: &mut String, dim: bool, dim_color: Color) {
    // Writing into a String cannot fail
    let _ = if dim {
        SetForegroundColor(dim_color).write_ansi(out)
    } else {
        ResetColor.write_ansi(out)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put_str(Rect::new(1, 0, 2, 1), "abc", false);
        assert_eq!(canvas.plain_lines(), vec![" ab "]);

        // Out of bounds writes are ignored
        canvas.put_char(9, 9, 'x', false);
        assert_eq!(canvas.plain_lines(), vec![" ab "]);
    }

    #[test]
    fn test_wide_chars() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put_str(Rect::new(0, 0, 4, 1), "日x", false);
        assert_eq!(canvas.plain_lines(), vec!["日x "]);

        // A wide char that would straddle the edge is not written
        let mut canvas = Canvas::new(2, 1);
        canvas.put_str(Rect::new(1, 0, 1, 1), "日", false);
        assert_eq!(canvas.plain_lines(), vec!["  "]);
    }

    #[test]
    fn test_to_ansi_runs() {
        let mut canvas = Canvas::new(3, 2);
        canvas.put_char(0, 0, 'a', false);
        canvas.put_char(1, 0, 'b', true);
        canvas.put_char(2, 0, 'c', true);
        canvas.put_char(0, 1, 'd', false);

        let mut dim = String::new();
        SetForegroundColor(Color::DarkGrey).write_ansi(&mut dim).unwrap();
        let mut reset = String::new();
        ResetColor.write_ansi(&mut reset).unwrap();

        let ansi = canvas.to_ansi(Color::DarkGrey);
        assert_eq!(ansi, format!("a{}bc{}\nd  ", dim, reset));
        assert!(!ansi.ends_with('\n'));
    }
}
