//! Redraw controller - repaints the dashboard in place
//!
//! Every frame is drawn over the previous one instead of scrolling:
//!
//! ```text
//! present()
//!     ↓
//! cleanup      → move to the previous frame's home, erase prompt lines
//!     ↓
//! write frame  → inside a synchronized update
//!     ↓
//! record home  → offset back to this frame's first line
//! ```
//!
//! Anything printed between frames must go through [`RedrawState::print`] or
//! [`RedrawState::read_line`] so the next cleanup erases exactly those lines.

use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveUp,
    queue,
    terminal::{Clear, ClearType},
};

use super::compositor::Frame;

/// Begin a render frame (synchronized update)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    Ok(())
}

/// End a render frame and flush
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026l")?;
    out.flush()?;
    Ok(())
}

/// Execute a render operation with frame guards, ensuring the update is
/// closed on error
fn with_frame<W: Write, F, R>(out: &mut W, f: F) -> io::Result<R>
where
    F: FnOnce(&mut W) -> io::Result<R>,
{
    begin_frame(out)?;
    let result = f(out);
    let _ = end_frame(out);
    result
}

/// Cursor offset from a frame's last line back to its first
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HomeOffset {
    lines_up: u16,
}

impl HomeOffset {
    pub fn new(lines_up: u16) -> Self {
        Self { lines_up }
    }

    pub fn lines_up(&self) -> u16 {
        self.lines_up
    }

    /// Carriage return, then up `lines_up` lines
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "\r")?;
        // MoveUp(0) still moves one line on most terminals
        if self.lines_up > 0 {
            queue!(out, MoveUp(self.lines_up))?;
        }
        Ok(())
    }
}

/// Cursor bookkeeping between frames
#[derive(Clone, Debug, Default)]
pub struct RedrawState {
    /// Home of the last frame; `None` before the first one
    home: Option<HomeOffset>,
    /// Lines printed since the last frame (prompt and echoed input)
    extra_lines: usize,
}

impl RedrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home(&self) -> Option<HomeOffset> {
        self.home
    }

    pub fn extra_lines(&self) -> usize {
        self.extra_lines
    }

    /// Return to the last frame's home and erase what was printed since
    pub fn cleanup<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(home) = self.home {
            home.write_to(out)?;
        }

        if self.extra_lines > 0 {
            write!(out, "\r")?;
            queue!(out, Clear(ClearType::CurrentLine))?;
            for _ in 0..self.extra_lines + 1 {
                queue!(out, MoveUp(1), Clear(ClearType::CurrentLine))?;
            }
        }

        self.extra_lines = 0;
        Ok(())
    }

    /// Clean up and draw `frame` in place of the previous one
    pub fn present<W: Write>(&mut self, out: &mut W, frame: &Frame) -> io::Result<()> {
        with_frame(out, |out| {
            self.cleanup(out)?;
            out.write_all(frame.text().as_bytes())
        })?;
        self.home = Some(frame.home_offset());
        Ok(())
    }

    /// Print text between frames, counting its newlines
    pub fn print<W: Write>(&mut self, out: &mut W, s: &str) -> io::Result<()> {
        out.write_all(s.as_bytes())?;
        out.flush()?;
        self.extra_lines += s.matches('\n').count();
        Ok(())
    }

    /// Read one line of operator input; the echoed newline counts as a
    /// printed line. Returns `None` at end of input.
    pub fn read_line<R: BufRead>(&mut self, input: &mut R) -> io::Result<Option<String>> {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.extra_lines += 1;

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::element::{text, vbox};
    use crossterm::style::Color;

    const UP: &str = "\x1b[1A";
    const CLEAR_LINE: &str = "\x1b[2K";

    fn frame(height: usize) -> Frame {
        let lines = (0..height).map(|i| text(format!("line {}", i))).collect();
        Frame::render(&vbox(lines), 10, Color::DarkGrey)
    }

    fn output(buf: &[u8]) -> String {
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn test_first_frame_has_no_cleanup() {
        let mut state = RedrawState::new();
        let mut out = Vec::new();
        state.present(&mut out, &frame(5)).unwrap();

        let s = output(&out);
        assert_eq!(s, format!("\x1b[?2026h{}\x1b[?2026l", frame(5).text()));
        assert_eq!(state.home(), Some(HomeOffset::new(4)));
    }

    #[test]
    fn test_next_frame_starts_at_home() {
        let mut state = RedrawState::new();
        let mut out = Vec::new();
        state.present(&mut out, &frame(5)).unwrap();

        out.clear();
        state.present(&mut out, &frame(5)).unwrap();
        let s = output(&out);
        assert!(s.starts_with("\x1b[?2026h\r\x1b[4A"));
        assert!(!s.contains(CLEAR_LINE));
        assert_eq!(state.extra_lines(), 0);
    }

    #[test]
    fn test_prompt_lines_are_erased() {
        let mut state = RedrawState::new();
        let mut out = Vec::new();
        state.present(&mut out, &frame(5)).unwrap();

        state.print(&mut out, "> press enter\n").unwrap();
        let mut input = io::Cursor::new("step\n");
        assert_eq!(state.read_line(&mut input).unwrap().as_deref(), Some("step"));
        assert_eq!(state.extra_lines(), 2);

        out.clear();
        state.cleanup(&mut out).unwrap();
        let s = output(&out);
        assert!(s.starts_with("\r\x1b[4A\r"));
        assert_eq!(s.matches(UP).count(), 3);
        assert_eq!(s.matches(CLEAR_LINE).count(), 4);
        assert_eq!(state.extra_lines(), 0);

        // A second cleanup has nothing left to erase
        out.clear();
        state.cleanup(&mut out).unwrap();
        assert_eq!(output(&out), "\r\x1b[4A");
    }

    #[test]
    fn test_bookkeeping_resets_every_cycle() {
        let mut state = RedrawState::new();
        let mut out = Vec::new();
        let mut input = io::Cursor::new("\n\n\nq\n");

        for _ in 0..4 {
            state.present(&mut out, &frame(3)).unwrap();
            assert_eq!(state.extra_lines(), 0);
            assert_eq!(state.home(), Some(HomeOffset::new(2)));

            state.print(&mut out, "prompt\n").unwrap();
            state.read_line(&mut input).unwrap();
            assert_eq!(state.extra_lines(), 2);
        }
    }

    #[test]
    fn test_read_line_end_of_input() {
        let mut state = RedrawState::new();
        let mut input = io::Cursor::new("");
        assert_eq!(state.read_line(&mut input).unwrap(), None);
        assert_eq!(state.extra_lines(), 0);

        let mut input = io::Cursor::new("quit\r\n");
        assert_eq!(state.read_line(&mut input).unwrap().as_deref(), Some("quit"));
    }

    #[test]
    fn test_single_line_frame_home() {
        let mut out = Vec::new();
        HomeOffset::new(0).write_to(&mut out).unwrap();
        assert_eq!(output(&out), "\r");
    }
}
