// THEORY:
// The `MoveScript` module handles the textual move format exchanged between
// a solver and anything that replays its answer. The format is minimal:
// an entry count on the first line, then one line per entry holding a decimal
// slot-select index (row-major cell index) and a token string over the
// alphabet `{R, L, U, D}`, one swap per character. Applying a script walks
// it through a `MoveSimulator`, so the move preconditions and the table
// invariant are enforced by the same code path interactive use goes through.

use std::fmt;

use crate::core_modules::simulator::{Direction, MoveSimulator};
use crate::{Error, Result};

/// One scripted selection plus the moves applied from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Row-major cell index of the slot to select.
    pub select_index: usize,
    /// The moves applied after the selection, in order.
    pub directions: Vec<Direction>,
}

/// A parsed move script: an ordered list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveScript {
    pub entries: Vec<ScriptEntry>,
}

impl MoveScript {
    /// Parses the interchange text form. Blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(number, line)| (number + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (count_line, count_text) = lines.next().ok_or(Error::MalformedScript {
            line: 1,
            reason: "missing entry count".to_string(),
        })?;
        let count: usize = count_text.parse().map_err(|_| Error::MalformedScript {
            line: count_line,
            reason: format!("entry count '{count_text}' is not a number"),
        })?;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let (line, entry_text) = lines.next().ok_or(Error::MalformedScript {
                line: count_line,
                reason: format!("expected {count} entries, found {}", entries.len()),
            })?;

            let mut fields = entry_text.split_whitespace();
            let index_text = fields.next().ok_or(Error::MalformedScript {
                line,
                reason: "missing select index".to_string(),
            })?;
            let select_index: usize = index_text.parse().map_err(|_| Error::MalformedScript {
                line,
                reason: format!("select index '{index_text}' is not a number"),
            })?;
            let token_text = fields.next().ok_or(Error::MalformedScript {
                line,
                reason: "missing direction token string".to_string(),
            })?;
            if fields.next().is_some() {
                return Err(Error::MalformedScript {
                    line,
                    reason: "trailing fields after the direction tokens".to_string(),
                });
            }

            let directions = token_text
                .chars()
                .map(Direction::from_token)
                .collect::<Result<Vec<_>>>()?;
            entries.push(ScriptEntry {
                select_index,
                directions,
            });
        }

        Ok(Self { entries })
    }

    /// Replays the script through `simulator`: select, then one step per
    /// token. Stops at the first failing move, leaving the grid in its last
    /// valid state.
    pub fn apply(&self, simulator: &mut MoveSimulator) -> Result<()> {
        for entry in &self.entries {
            simulator.select_index(entry.select_index);
            for direction in &entry.directions {
                simulator.step(*direction)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for MoveScript {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.entries.len())?;
        for entry in &self.entries {
            write!(formatter, "{} ", entry.select_index)?;
            for direction in &entry.directions {
                write!(formatter, "{}", direction.token())?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }
}
