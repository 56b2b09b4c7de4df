//! Printing renderings as colored text.

use std::io;

use crossterm::QueueableCommand as _;
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};

use orrery_render::Rendering;

/// Character whose foreground paints the upper half of a cell and whose background paints
/// the lower half.
const UPPER_HALF_BLOCK: &str = "▀";

/// Writes `rendering` to `out` using 24-bit color escape sequences, two pixel rows per line
/// of text.
///
/// If the image has an odd number of rows, the lower half of the last line keeps the
/// terminal's own background.
pub fn terminal_print_once<W: io::Write + ?Sized>(
    out: &mut W,
    rendering: &Rendering,
) -> io::Result<()> {
    let rows: Vec<&[[u8; 3]]> = rendering.buffer.rows_top_down().collect();
    for pair in rows.chunks(2) {
        let (upper, lower) = match *pair {
            [upper, lower] => (upper, Some(lower)),
            [upper] => (upper, None),
            _ => unreachable!(),
        };
        for (x, &top) in upper.iter().enumerate() {
            out.queue(SetColors(Colors {
                foreground: Some(to_color(top)),
                background: lower.map(|row| to_color(row[x])),
            }))?;
            out.queue(Print(UPPER_HALF_BLOCK))?;
        }
        out.queue(ResetColor)?;
        out.queue(Print("\n"))?;
    }
    out.flush()
}

fn to_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}
