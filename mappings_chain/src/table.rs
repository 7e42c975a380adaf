//! The [`MappingTable`], a directed translation of class, field and method names from one namespace to another.
//!
//! The three sub-tables use string keys:
//! - classes: `a/b/C` to `x/y/Z`,
//! - fields: `a/b/C:field` to `x/y/Z:newField`,
//! - methods: `a/b/C:method(La/b/C;)V` to `x/y/Z:newMethod(Lx/y/Z;)V`.
//!
//! Class names used in the keys are always names of the source namespace. An entry may reference a class that has no
//! entry in the class table, such a class just isn't renamed.

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use crate::descriptor::ClassRemapper;

/// One sub-table of a [`MappingTable`].
pub type Table = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
	pub classes: Table,
	pub fields: Table,
	pub methods: Table,
}

impl ClassRemapper for MappingTable {
	fn map_class_fail(&self, class: &str) -> Option<&str> {
		self.classes.map_class_fail(class)
	}
}

/// Creates the key of a field, `owner:name`.
pub fn field_key(owner: &str, name: &str) -> String {
	format!("{owner}:{name}")
}

/// Creates the key of a method, `owner:name(desc)ret`.
pub fn method_key(owner: &str, name: &str, desc: &str) -> String {
	format!("{owner}:{name}{desc}")
}

/// Splits a field or method key into the owner and the member part.
///
/// ```
/// use mappings_chain::table::split_member_key;
///
/// assert_eq!(split_member_key("a/B:foo(I)V").unwrap(), ("a/B", "foo(I)V"));
/// assert!(split_member_key("a/B").is_err());
/// ```
pub fn split_member_key(key: &str) -> Result<(&str, &str)> {
	key.split_once(':')
		.with_context(|| anyhow!("member key {key:?} has no owner class part"))
}

impl MappingTable {
	pub fn new() -> MappingTable {
		MappingTable::default()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
	}

	/// Swaps source and target namespace.
	///
	/// If two keys of a sub-table share a value, only the pair inserted last survives.
	pub fn invert(&self) -> MappingTable {
		fn invert_table(table: &Table) -> Table {
			table.iter()
				.map(|(a, b)| (b.clone(), a.clone()))
				.collect()
		}

		MappingTable {
			classes: invert_table(&self.classes),
			fields: invert_table(&self.fields),
			methods: invert_table(&self.methods),
		}
	}

	/// Chains this table (`A -> B`) with another one (`B -> C`), giving `A -> C`.
	///
	/// For entries that have no continuation in `other`, `default_if_missing` decides: if `true` the intermediate name
	/// is kept, if `false` the entry is dropped.
	pub fn chain(&self, other: &MappingTable, default_if_missing: bool) -> MappingTable {
		fn chain_table(a_to_b: &Table, b_to_c: &Table, default_if_missing: bool) -> Table {
			a_to_b.iter()
				.filter_map(|(a, b)| {
					match b_to_c.get(b) {
						Some(c) => Some((a.clone(), c.clone())),
						None if default_if_missing => Some((a.clone(), b.clone())),
						None => None,
					}
				})
				.collect()
		}

		MappingTable {
			classes: chain_table(&self.classes, &other.classes, default_if_missing),
			fields: chain_table(&self.fields, &other.fields, default_if_missing),
			methods: chain_table(&self.methods, &other.methods, default_if_missing),
		}
	}
}
