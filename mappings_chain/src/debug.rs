//! Writes a [`MappingTable`] as plain text, for looking at it.
//!
//! Each sub-table is written as its own file (`classes.txt`, `fields.txt`, `methods.txt`), with one `key->value`
//! line per entry, sorted by key. Nothing reads these files back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::debug;
use crate::table::{MappingTable, Table};

/// Writes the three files into the directory, creating it if needed.
pub fn write_dir(mappings: &MappingTable, dir: impl AsRef<Path>) -> Result<()> {
	let dir = dir.as_ref();

	std::fs::create_dir_all(dir)
		.with_context(|| anyhow!("failed to create directory {dir:?}"))?;

	for (name, table) in [
		("classes.txt", &mappings.classes),
		("fields.txt", &mappings.fields),
		("methods.txt", &mappings.methods),
	] {
		let path = dir.join(name);
		let file = File::create(&path)
			.with_context(|| anyhow!("failed to create {path:?}"))?;

		write(table, file)
			.with_context(|| anyhow!("failed to write {path:?}"))?;

		debug!("wrote {} entries to {path:?}", table.len());
	}

	Ok(())
}

/// Writes one sub-table to the writer.
pub fn write(table: &Table, w: impl Write) -> Result<()> {
	// the buffering makes it much faster
	let mut w = BufWriter::new(w);

	let mut entries: Vec<_> = table.iter().collect();
	entries.sort_unstable_by_key(|(key, _)| *key);

	for (key, value) in entries {
		writeln!(w, "{key}->{value}")?;
	}

	w.flush()?;
	Ok(())
}

/// Writes one sub-table into a `String`.
///
/// This is of most use in test cases.
pub fn write_string(table: &Table) -> Result<String> {
	let mut vec = Vec::new();
	write(table, &mut vec)?;
	String::from_utf8(vec).context("failed to convert written mappings to utf8")
}
