//! Fixed class entries added to a table before it's chained with another one.
//!
//! Both sides of a chain get a patch with the same source names, so that these classes are chained onto each other
//! even though neither of the source tables knows them.

use log::debug;
use crate::table::MappingTable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPatch {
	entries: Vec<(String, String)>,
}

impl ClassPatch {
	pub fn new() -> ClassPatch {
		ClassPatch::default()
	}

	pub fn with(mut self, src: impl Into<String>, dst: impl Into<String>) -> ClassPatch {
		self.entries.push((src.into(), dst.into()));
		self
	}

	pub fn entries(&self) -> &[(String, String)] {
		&self.entries
	}

	/// Gives back the table with the entries of this patch added, overriding existing class entries.
	pub fn apply(&self, mut mappings: MappingTable) -> MappingTable {
		for (src, dst) in &self.entries {
			if let Some(old) = mappings.classes.insert(src.clone(), dst.clone()) {
				debug!("class patch replaced {src:?} -> {old:?} with {dst:?}");
			}
		}
		mappings
	}
}
