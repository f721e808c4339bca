//! Text-level parsing of grid files
//!
//! A grid file is three runs of non-blank lines (x samples, y samples, field
//! values) separated by one or more blank lines. Numbers inside a block are
//! separated by any whitespace, including newlines.

use crate::error::{Block, GridError};

/// A run of non-blank lines, keeping 1-based file line numbers for error reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock<'a> {
    lines: Vec<(usize, &'a str)>,
}

impl<'a> TextBlock<'a> {
    /// Iterate over (line number, token) pairs
    pub fn tokens(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .flat_map(|&(line, text)| text.split_whitespace().map(move |tok| (line, tok)))
    }

    /// First line of the block in the file
    pub fn first_line(&self) -> usize {
        self.lines.first().map(|(n, _)| *n).unwrap_or(0)
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split file content into blocks on blank lines
///
/// A line holding only whitespace counts as blank. `\r\n` endings are handled
/// by `str::lines`.
pub fn split_blocks(content: &str) -> Vec<TextBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current = TextBlock::default();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.lines.push((idx + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse every token of a block as `f64`
pub fn parse_numbers(block: &TextBlock<'_>, which: Block) -> Result<Vec<f64>, GridError> {
    block
        .tokens()
        .map(|(line, token)| {
            token.parse::<f64>().map_err(|_| GridError::Parse {
                block: which,
                line,
                token: token.to_string(),
            })
        })
        .collect()
}
