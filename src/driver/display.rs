//! Terminal display sink

use crate::math::V3;
use crossterm::{
    cursor, execute, queue,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

/// Rows kept free below the frame for telemetry.
pub const STATUS_ROWS: u16 = 2;

/// Text shown under the frame: camera position, then frame rate.
pub fn telemetry(position: &V3, fps: u32) -> [String; 2] {
    [
        format!("{:.2} {:.2} {:.2}", position.x, position.y, position.z),
        format!("{}fps", fps),
    ]
}

/// Raw-mode alternate screen that the frame is drawn onto.
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(ClearType::All))?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            width,
            height: height.saturating_sub(STATUS_ROWS),
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        })
    }

    /// Cells available for the frame, status rows excluded.
    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Polls the terminal size at most every 100ms, returns true on change.
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((width, height)) = terminal::size() {
            let height = height.saturating_sub(STATUS_ROWS);
            if width != self.width || height != self.height {
                self.width = width;
                self.height = height;
                return true;
            }
        }
        false
    }

    /// Draws the frame from the top-left corner followed by the status lines.
    /// Each row is positioned explicitly since raw mode does not return the
    /// carriage on `\n`.
    pub fn present(&mut self, frame: &[u8], status: &[String]) -> io::Result<()> {
        let mut row: u16 = 0;
        for line in frame.split(|&c| c == b'\n').filter(|l| !l.is_empty()) {
            queue!(self.buffer, cursor::MoveTo(0, row))?;
            self.buffer.write_all(line)?;
            row = row.saturating_add(1);
        }
        for line in status {
            queue!(
                self.buffer,
                cursor::MoveTo(0, row),
                terminal::Clear(ClearType::UntilNewLine)
            )?;
            self.buffer.write_all(line.as_bytes())?;
            row = row.saturating_add(1);
        }
        self.buffer.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::v;

    #[test]
    fn test_telemetry() {
        let [pos, fps] = telemetry(&v(-5., 0.25, 12.), 59);
        assert_eq!(pos, "-5.00 0.25 12.00");
        assert_eq!(fps, "59fps");
    }
}
