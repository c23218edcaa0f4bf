//! Terminal session guard and the crossterm bar-chart renderer.
//!
//! [`TerminalSession`] owns raw mode and the alternate screen and restores
//! both on drop, including during a panic unwind. [`TerminalRenderer`]
//! draws into any `Write`; only a renderer created with
//! [`TerminalRenderer::stdout`] owns a session and polls keyboard input.
//!
//! Screen layout, top to bottom:
//!
//! ```text
//! Quick sort [sorting]  Time: 1.37s  Exchanges: 412  q: quit
//!        ▼         ▼
//!  ▄ █ ▂ █ ▆ █ ▃ ▅ █ ▇
//!  █ █ █ █ █ █ █ █ █ █
//! ```

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use web_time::Duration;

use crate::layout::{cell_glyph, height_eighths, layout_bars};
use crate::renderer::{FrameView, Renderer};

const BAR_COLOR: Color = Color::White;
const HIGHLIGHT_COLOR: Color = Color::DarkCyan;
const MARKER_COLOR: Color = Color::Red;
const MARKER: char = '▼';
/// Header row plus marker row.
const CHROME_ROWS: u16 = 2;

/// Raw mode + alternate screen, restored on drop.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, and hide the cursor.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        tracing::debug!("terminal session entered");
        Ok(Self { active: true })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leave the alternate screen and raw mode. Idempotent.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = io::stdout();
        let screen = execute!(out, Show, LeaveAlternateScreen);
        let raw = terminal::disable_raw_mode();
        tracing::debug!("terminal session restored");
        screen.and(raw)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Whether `key` asks to quit: `q`, `Esc` or `Ctrl+C`.
#[must_use]
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// First screen row, cut to fit. The status sits right after the label so
/// narrow terminals still show whether the sort is done.
#[must_use]
pub fn header_line(frame: &FrameView<'_>, cols: u16) -> String {
    let status = if frame.finished { "done" } else { "sorting" };
    let line = format!(
        "{} [{}]  Time: {:.2}s  Exchanges: {}  q: quit",
        frame.label,
        status,
        frame.elapsed.as_secs_f64(),
        frame.exchanges,
    );
    line.chars().take(cols as usize).collect()
}

/// Bar-chart renderer over a crossterm-capable writer.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    session: Option<TerminalSession>,
    dirty: bool,
}

impl TerminalRenderer<Stdout> {
    /// Take over the controlling terminal.
    pub fn stdout() -> io::Result<Self> {
        let session = TerminalSession::enter()?;
        let (cols, rows) = terminal::size()?;
        tracing::info!(cols, rows, "terminal renderer ready");
        Ok(Self {
            out: io::stdout(),
            cols,
            rows,
            session: Some(session),
            dirty: false,
        })
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Draw into `out` as if it were a `cols` x `rows` terminal. No raw mode,
    /// no input polling.
    #[must_use]
    pub fn with_writer(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            session: None,
            dirty: false,
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.session.as_ref().is_some_and(TerminalSession::is_active)
    }

    /// Restore the terminal now instead of on drop.
    pub fn restore(&mut self) -> io::Result<()> {
        match self.session.as_mut() {
            Some(session) => session.restore(),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        tracing::debug!(cols, rows, "terminal resized");
        self.cols = cols;
        self.rows = rows;
        self.dirty = true;
        queue!(self.out, Clear(ClearType::All))
    }

    fn draw_plot(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        let plot_rows = self.rows - CHROME_ROWS;
        let bars = layout_bars(frame.values, frame.highlight, self.cols);
        let max = frame.values.iter().copied().max().unwrap_or(0);
        let heights: Vec<u32> = bars
            .iter()
            .map(|bar| height_eighths(bar.value, max, plot_rows))
            .collect();

        queue!(
            self.out,
            MoveTo(0, 1),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(MARKER_COLOR)
        )?;
        for bar in bars.iter().filter(|bar| bar.highlighted) {
            queue!(self.out, MoveTo(bar.x + bar.width.saturating_sub(1) / 2, 1), Print(MARKER))?;
        }

        let mut segment = String::with_capacity(self.cols as usize * 3);
        for row in 0..plot_rows {
            let level = plot_rows - 1 - row;
            queue!(self.out, MoveTo(0, row + CHROME_ROWS))?;
            let mut color = None;
            for (bar, &height) in bars.iter().zip(&heights) {
                let wanted = if bar.highlighted {
                    HIGHLIGHT_COLOR
                } else {
                    BAR_COLOR
                };
                if color != Some(wanted) {
                    if !segment.is_empty() {
                        queue!(self.out, Print(&segment))?;
                        segment.clear();
                    }
                    queue!(self.out, SetForegroundColor(wanted))?;
                    color = Some(wanted);
                }
                let glyph = cell_glyph(height, level);
                // a one-column gap separates bars that are wide enough
                let fill = if bar.width >= 2 { bar.width - 1 } else { bar.width };
                segment.extend(std::iter::repeat_n(glyph, fill as usize));
                if fill < bar.width {
                    segment.push(' ');
                }
            }
            if !segment.is_empty() {
                queue!(self.out, Print(&segment))?;
                segment.clear();
            }
            queue!(self.out, Clear(ClearType::UntilNewLine))?;
        }
        queue!(self.out, ResetColor)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_frame(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            ResetColor,
            Print(header_line(frame, self.cols))
        )?;
        if self.rows > CHROME_ROWS {
            self.draw_plot(frame)?;
        }
        self.dirty = false;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn close_requested(&mut self) -> io::Result<bool> {
        if !self.is_interactive() {
            return Ok(false);
        }
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && is_quit_key(&key) => {
                    tracing::info!(code = ?key.code, "quit requested");
                    return Ok(true);
                }
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                _ => {}
            }
        }
        Ok(false)
    }

    fn needs_redraw(&mut self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(values: &'a [u32], highlight: Option<(usize, usize)>) -> FrameView<'a> {
        FrameView {
            values,
            highlight,
            elapsed: Duration::from_millis(1234),
            label: "Bubble sort",
            exchanges: 7,
            finished: false,
        }
    }

    fn rendered(values: &[u32], highlight: Option<(usize, usize)>, cols: u16, rows: u16) -> String {
        let mut r = TerminalRenderer::with_writer(Vec::new(), cols, rows);
        r.draw_frame(&view(values, highlight)).unwrap();
        r.present().unwrap();
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn header_shows_label_time_and_count() {
        let values = [1, 2];
        let line = header_line(&view(&values, None), 200);
        assert!(line.starts_with("Bubble sort [sorting]  Time: 1.23s  Exchanges: 7"));
        assert!(line.ends_with("q: quit"));
    }

    #[test]
    fn narrow_header_keeps_the_status() {
        let values = [1, 2];
        let done = FrameView {
            finished: true,
            ..view(&values, None)
        };
        assert_eq!(header_line(&done, 20), "Bubble sort [done]  ");
        assert_eq!(header_line(&view(&values, None), 21), "Bubble sort [sorting]");

        let out = rendered(&[3, 1, 2], None, 24, 4);
        assert!(out.contains("[sorting]"), "{out}");
    }

    #[test]
    fn header_is_cut_to_width() {
        let values = [1];
        assert_eq!(header_line(&view(&values, None), 6), "Bubble");
    }

    #[test]
    fn draws_header_marker_and_bars() {
        let out = rendered(&[3, 1, 2], Some((0, 1)), 12, 6);
        assert!(out.contains("Bubble sort"));
        assert_eq!(out.matches(MARKER).count(), 2);
        assert!(out.contains('█'));
    }

    #[test]
    fn tiny_terminal_draws_header_only() {
        let out = rendered(&[3, 1, 2], Some((0, 1)), 20, 2);
        assert!(out.contains("Bubble"));
        assert!(!out.contains(MARKER));
        assert!(!out.contains('█'));
    }

    #[test]
    fn offscreen_renderer_never_requests_close() {
        let mut r = TerminalRenderer::with_writer(Vec::new(), 10, 10);
        assert!(!r.is_interactive());
        assert!(!r.close_requested().unwrap());
        assert!(!r.needs_redraw());
    }
}
