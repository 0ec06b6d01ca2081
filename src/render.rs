use crossterm::style::{style, Stylize};
use std::fmt::{self, Write};

use crate::board::{Board, CELLS, SIDE};
use crate::error::{PuzzleError, Result};

pub(crate) fn write_grid(f: &mut impl Write, tiles: &[u8]) -> fmt::Result {
    for row in tiles.chunks(SIDE) {
        write!(f, "[")?;
        for &val in row {
            write!(f, " {:2}", val)?;
        }
        writeln!(f, " ]")?;
    }
    Ok(())
}

/// Four lines of `[ nn nn nn nn ]`.
pub fn grid(tiles: &[u8]) -> Result<String> {
    if tiles.len() != CELLS {
        return Err(PuzzleError::InvalidBoard(format!(
            "cannot render {} cells, expected {}",
            tiles.len(),
            CELLS
        )));
    }
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_grid(&mut out, tiles);
    Ok(out)
}

/// Like [`grid`], with cells already matching `target` in green and the
/// blank dimmed.
pub fn styled_grid(board: &Board, target: &Board) -> String {
    let mut out = String::new();
    for (row, want) in board.tiles().chunks(SIDE).zip(target.tiles().chunks(SIDE)) {
        out.push('[');
        for (&val, &goal) in row.iter().zip(want) {
            let cell = style(format!("{:2}", val));
            let styled = if val == 0 {
                cell.dim()
            } else if val == goal {
                cell.green().bold()
            } else {
                cell
            };
            let _ = write!(out, " {}", styled);
        }
        out.push_str(" ]\n");
    }
    out
}
