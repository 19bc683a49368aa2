use core::fmt::{self, Write};

use crate::*;

const FRAME: char = '│';
const RULE: char = '—';

/// Text view of the grid framed by one-based row and column rulers.
#[derive(Debug)]
pub struct BoardText<'a, G> {
    engine: &'a PlayEngine<G>,
}

impl<G: MineGenerator> PlayEngine<G> {
    pub fn render(&self) -> BoardText<'_, G> {
        BoardText { engine: self }
    }
}

impl<G: MineGenerator> fmt::Display for BoardText<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {FRAME}")?;
        for column in 1..=LIMIT {
            write!(f, "{column}")?;
        }
        writeln!(f, "{FRAME}")?;
        write_rule(f)?;

        for row in 0..LIMIT {
            write!(f, "{}{FRAME}", row + 1)?;
            for column in 0..LIMIT {
                f.write_char(self.engine.cell_at((row, column)).glyph())?;
            }
            writeln!(f, "{FRAME}")?;
        }

        write_rule(f)
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{RULE}{FRAME}")?;
    for _ in 0..LIMIT {
        f.write_char(RULE)?;
    }
    writeln!(f, "{FRAME}")
}
