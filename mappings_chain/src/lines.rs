use std::io::{BufRead, BufReader, Read};
use anyhow::{anyhow, Context, Result};

/// Iterates over the lines of the reader, giving back 1-based line numbers.
///
/// A trailing `\r` is removed from every line.
pub(crate) fn numbered_lines(reader: impl Read) -> impl Iterator<Item=Result<(usize, String)>> {
	BufReader::new(reader)
		.lines()
		.enumerate()
		.map(|(line_number, line)| {
			let line_number = line_number + 1;
			let mut line = line.with_context(|| anyhow!("got a reader error on line {line_number}"))?;
			if line.ends_with('\r') {
				line.pop();
			}
			Ok((line_number, line))
		})
}
