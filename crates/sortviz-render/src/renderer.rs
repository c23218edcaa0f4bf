//! The drawing capability the render loop needs from its host.

use std::io;
use std::thread;

use web_time::Duration;

/// Everything one frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    /// The full sequence as of the last consumed exchange.
    pub values: &'a [u32],
    /// Positions of the last exchange, if any.
    pub highlight: Option<(usize, usize)>,
    /// Run time so far; frozen once the sort has finished.
    pub elapsed: Duration,
    pub label: &'a str,
    pub exchanges: u64,
    pub finished: bool,
}

impl FrameView<'_> {
    /// Whether position `index` is one of the two exchanged positions.
    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlight.is_some_and(|(i, j)| index == i || index == j)
    }
}

/// Host surface driven by [`render_loop::run`](crate::render_loop::run).
///
/// One iteration calls [`close_requested`](Self::close_requested), then at
/// most one [`draw_frame`](Self::draw_frame) + [`present`](Self::present)
/// pair, then [`frame_wait`](Self::frame_wait) with what is left of the
/// frame interval.
pub trait Renderer {
    fn draw_frame(&mut self, frame: &FrameView<'_>) -> io::Result<()>;

    fn present(&mut self) -> io::Result<()>;

    /// Sleep out the rest of the frame. Unpaced hosts override this.
    fn frame_wait(&mut self, remaining: Duration) {
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }

    /// Poll the host for a quit request. Must not block.
    fn close_requested(&mut self) -> io::Result<bool>;

    /// Whether the surface lost its contents (e.g. after a resize) and the
    /// current state should be drawn again without a new event.
    fn needs_redraw(&mut self) -> bool {
        false
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_frame(&mut self, frame: &FrameView<'_>) -> io::Result<()> {
        (**self).draw_frame(frame)
    }

    fn present(&mut self) -> io::Result<()> {
        (**self).present()
    }

    fn frame_wait(&mut self, remaining: Duration) {
        (**self).frame_wait(remaining);
    }

    fn close_requested(&mut self) -> io::Result<bool> {
        (**self).close_requested()
    }

    fn needs_redraw(&mut self) -> bool {
        (**self).needs_redraw()
    }
}
