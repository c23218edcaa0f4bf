//! Bar-chart geometry, independent of any terminal.
//!
//! With fewer values than columns each value gets an equal-width bar. With
//! more values than columns each column stands for a contiguous run of
//! values and shows the tallest of them; a column is highlighted when any
//! value in its run is.
//!
//! Heights are measured in eighths of a cell so the terminal renderer can
//! use the partial block glyphs for the top of each bar.

/// Glyphs for 0..=8 eighths of a cell, bottom-aligned.
pub const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One drawn bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub x: u16,
    pub width: u16,
    /// First sequence position the bar stands for.
    pub index: usize,
    pub value: u32,
    pub highlighted: bool,
}

/// Lay out one bar per value (or per run of values) across `cols` columns.
#[must_use]
pub fn layout_bars(values: &[u32], highlight: Option<(usize, usize)>, cols: u16) -> Vec<Bar> {
    let n = values.len();
    let cols = cols as usize;
    if n == 0 || cols == 0 {
        return Vec::new();
    }
    let is_hot = |range: std::ops::Range<usize>| {
        highlight.is_some_and(|(i, j)| range.contains(&i) || range.contains(&j))
    };

    if n <= cols {
        let width = cols / n;
        return values
            .iter()
            .enumerate()
            .map(|(index, &value)| Bar {
                x: (index * width) as u16,
                width: width as u16,
                index,
                value,
                highlighted: is_hot(index..index + 1),
            })
            .collect();
    }

    (0..cols)
        .map(|col| {
            let start = col * n / cols;
            let end = ((col + 1) * n / cols).max(start + 1);
            let value = values[start..end].iter().copied().max().unwrap_or(0);
            Bar {
                x: col as u16,
                width: 1,
                index: start,
                value,
                highlighted: is_hot(start..end),
            }
        })
        .collect()
}

/// Bar height in eighths of a cell for a plot `rows` cells tall.
#[must_use]
pub fn height_eighths(value: u32, max: u32, rows: u16) -> u32 {
    if max == 0 {
        return 0;
    }
    let scaled = u64::from(value.min(max)) * u64::from(rows) * 8 / u64::from(max);
    scaled as u32
}

/// Glyph for the cell `level` rows above the baseline of a bar of the given
/// height.
#[must_use]
pub fn cell_glyph(height_eighths: u32, level: u16) -> char {
    let floor = u32::from(level) * 8;
    let fill = height_eighths.saturating_sub(floor).min(8);
    EIGHTHS[fill as usize]
}
