//! Reading of the comma separated id to name tables (`fields.csv`, `methods.csv`).
//!
//! The first row is a header and is skipped. Every other row starts with the opaque id (like `field_70170_p`),
//! followed by the readable name. Any further columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use crate::lines::numbered_lines;

/// A table from opaque ids to readable names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameOverlay(pub IndexMap<String, String>);

impl NameOverlay {
	pub fn new() -> NameOverlay {
		NameOverlay::default()
	}

	/// Gets the readable name for the id, or gives back the id itself.
	pub fn get_or_id<'a>(&'a self, id: &'a str) -> &'a str {
		self.0.get(id).map_or(id, String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

pub fn read_file(path: impl AsRef<Path>) -> Result<NameOverlay> {
	read(File::open(&path)?)
		.with_context(|| anyhow!("failed to read name overlay {:?}", path.as_ref()))
}

/// Reads a name overlay from the given reader.
///
/// ```
/// let input = "\
/// searge,name,side,desc
/// field_1_a,health,0,The health
/// ";
/// let overlay = mappings_chain::overlay::read(input.as_bytes()).unwrap();
///
/// assert_eq!(overlay.get_or_id("field_1_a"), "health");
/// assert_eq!(overlay.get_or_id("field_2_b"), "field_2_b");
/// ```
pub fn read(reader: impl Read) -> Result<NameOverlay> {
	let mut lines = numbered_lines(reader);

	lines.next().context("no header line")??;

	let mut overlay = NameOverlay::new();

	for line in lines {
		let (line_number, line) = line?;

		let mut fields = line.split(',');
		match (fields.next(), fields.next()) {
			(Some(id), Some(name)) => {
				overlay.0.insert(id.to_owned(), name.to_owned());
			},
			_ => bail!("expected at least two fields in line {line_number}: {line:?}"),
		}
	}

	Ok(overlay)
}
