//! Looking up new names for the symbols found in source code.
//!
//! The parsing of the source code, and resolving which class, field or method an identifier refers to is not done
//! here. Whatever does that gives a [`Binding`] to the [`SymbolRemapper`], which answers with the new name.
//!
//! # Dubious mappings
//! If a method can't be found by its name and descriptor, a method of the same name is taken, ignoring the
//! descriptor. This is wrong for overloaded methods, so every such case is logged as a warning.

use std::ops::Range;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::{IndexMap, IndexSet};
use log::warn;
use crate::descriptor::{name_part, signature_part};
use crate::table::{split_member_key, MappingTable};

/// The mappings of one class, with the member names grouped below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
	/// The name of the class in the target namespace.
	pub name: String,
	/// Field name to new field name.
	pub fields: IndexMap<String, String>,
	/// Method name and descriptor to new method name.
	pub methods: IndexMap<(String, String), String>,
}

impl ClassEntry {
	fn new(name: &str) -> ClassEntry {
		ClassEntry {
			name: name.to_owned(),
			fields: IndexMap::new(),
			methods: IndexMap::new(),
		}
	}
}

/// A [`MappingTable`] regrouped by classes.
///
/// Members of classes without an entry in the class table get a class entry that keeps the class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
	pub classes: IndexMap<String, ClassEntry>,
}

impl MappingSet {
	pub fn new(mappings: &MappingTable) -> Result<MappingSet> {
		let mut classes: IndexMap<String, ClassEntry> = IndexMap::new();

		for (src, dst) in &mappings.classes {
			classes.entry(src.clone())
				.or_insert_with(|| ClassEntry::new(src))
				.name = dst.clone();
		}

		for (src, dst) in &mappings.fields {
			let (owner, name) = split_member_key(src)?;
			let (_, name_dst) = split_member_key(dst)?;

			classes.entry(owner.to_owned())
				.or_insert_with(|| ClassEntry::new(owner))
				.fields.insert(name.to_owned(), name_dst.to_owned());
		}

		for (src, dst) in &mappings.methods {
			let (owner, member) = split_member_key(src)?;
			let (_, member_dst) = split_member_key(dst)?;

			let desc = signature_part(member);
			if desc.is_empty() {
				bail!("method key {src:?} has no descriptor");
			}

			classes.entry(owner.to_owned())
				.or_insert_with(|| ClassEntry::new(owner))
				.methods.insert((name_part(member).to_owned(), desc.to_owned()), name_part(member_dst).to_owned());
		}

		Ok(MappingSet { classes })
	}

	pub fn get(&self, class: &str) -> Option<&ClassEntry> {
		self.classes.get(class)
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}
}

/// Gives the direct super classes and interfaces of a class.
///
/// Used so that members inherited from another class are found.
pub trait SuperClassProvider {
	fn get_super_classes(&self, class: &str) -> Option<&IndexSet<String>>;
}

impl SuperClassProvider for IndexMap<String, IndexSet<String>> {
	fn get_super_classes(&self, class: &str) -> Option<&IndexSet<String>> {
		self.get(class)
	}
}

pub struct NoSuperClassProvider;

impl SuperClassProvider for NoSuperClassProvider {
	fn get_super_classes(&self, _class: &str) -> Option<&IndexSet<String>> {
		None
	}
}

/// What an identifier in the source code refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'a> {
	Class {
		binary_name: &'a str,
	},
	/// A variable. If it's not a field, the `declaring_class` is `None`.
	Field {
		declaring_class: Option<&'a str>,
		name: &'a str,
	},
	Method {
		declaring_class: &'a str,
		name: &'a str,
		descriptor: &'a str,
		constructor: bool,
	},
}

/// An identifier in some source text, with the binding it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
	/// Byte range of the identifier in the text.
	pub span: Range<usize>,
	pub binding: Binding<'a>,
}

#[derive(Debug)]
pub struct SymbolRemapper<'m, 'i, I> {
	mappings: &'m MappingSet,
	inheritance: &'i I,
}

impl<'m, 'i, I: SuperClassProvider> SymbolRemapper<'m, 'i, I> {
	pub fn new(mappings: &'m MappingSet, inheritance: &'i I) -> SymbolRemapper<'m, 'i, I> {
		SymbolRemapper { mappings, inheritance }
	}

	pub fn map_class(&self, class: &str) -> Option<&'m str> {
		self.mappings.get(class)
			.map(|entry| entry.name.as_str())
	}

	/// Finds the new name of a field, looking into super classes if the class itself doesn't have it.
	pub fn map_field(&self, class: &str, name: &str) -> Option<&'m str> {
		if let Some(new_name) = self.mappings.get(class).and_then(|entry| entry.fields.get(name)) {
			return Some(new_name.as_str());
		}

		self.inheritance.get_super_classes(class)?
			.iter()
			.find_map(|super_class| self.map_field(super_class, name))
	}

	/// Finds the new name of a method, looking into super classes if the class itself doesn't have it.
	pub fn map_method(&self, class: &str, name: &str, desc: &str) -> Option<&'m str> {
		let found = self.mappings.get(class)
			.and_then(|entry| entry.methods.get(&(name.to_owned(), desc.to_owned())));
		if let Some(new_name) = found {
			return Some(new_name.as_str());
		}

		self.inheritance.get_super_classes(class)?
			.iter()
			.find_map(|super_class| self.map_method(super_class, name, desc))
	}

	/// Finds any method with the given name, ignoring the descriptor.
	fn recover_method(&self, class: &str, name: &str) -> Option<(&'m (String, String), &'m str)> {
		let found = self.mappings.get(class)
			.and_then(|entry| entry.methods.iter().find(|((method_name, _), _)| method_name == name));
		if let Some((key, new_name)) = found {
			return Some((key, new_name.as_str()));
		}

		self.inheritance.get_super_classes(class)?
			.iter()
			.find_map(|super_class| self.recover_method(super_class, name))
	}

	/// The name a constructor of the class gets, that is the simple name of the class in the target namespace.
	pub fn constructor_name<'a>(&self, class: &'a str) -> &'a str
	where
		'm: 'a,
	{
		simple_name(self.map_class(class).unwrap_or(class))
	}

	/// Gives back the new identifier, if it's different from the current one.
	pub fn rename(&self, binding: &Binding, identifier: &str) -> Option<String> {
		let new_name = match *binding {
			Binding::Class { binary_name } => simple_name(self.map_class(binary_name)?),
			Binding::Field { declaring_class, name } => self.map_field(declaring_class?, name)?,
			Binding::Method { declaring_class, constructor: true, .. } => self.constructor_name(declaring_class),
			Binding::Method { declaring_class, name, descriptor, constructor: false } => {
				match self.map_method(declaring_class, name, descriptor) {
					Some(new_name) => new_name,
					None => {
						let ((found_name, found_desc), new_name) = self.recover_method(declaring_class, name)?;
						warn!("recovered dubious mapping for {declaring_class}.{name}{descriptor}: \
							using {found_name}{found_desc} -> {new_name}");
						new_name
					},
				}
			},
		};

		(new_name != identifier).then(|| new_name.to_owned())
	}

	/// Applies the renames of all the occurrences to the text.
	///
	/// The spans of the occurrences may not overlap.
	pub fn apply_renames(&self, text: &str, occurrences: &[Occurrence]) -> Result<String> {
		let mut sorted: Vec<&Occurrence> = occurrences.iter().collect();
		sorted.sort_by_key(|occurrence| occurrence.span.start);

		let mut s = String::with_capacity(text.len());
		let mut position = 0;
		let mut previous_end = 0;

		for occurrence in sorted {
			let span = occurrence.span.clone();
			if span.start < previous_end {
				bail!("occurrence {occurrence:?} overlaps with a previous one");
			}
			previous_end = span.end;

			let identifier = text.get(span.clone())
				.with_context(|| anyhow!("occurrence {occurrence:?} is out of bounds or not on a char boundary"))?;

			if let Some(new_name) = self.rename(&occurrence.binding, identifier) {
				s.push_str(&text[position..span.start]);
				s.push_str(&new_name);
				position = span.end;
			}
		}

		s.push_str(&text[position..]);
		Ok(s)
	}
}

/// The part of a binary class name after the package and the outer classes.
///
/// ```
/// use mappings_chain::remapper::simple_name;
///
/// assert_eq!(simple_name("net/minecraft/Foo$Bar"), "Bar");
/// assert_eq!(simple_name("net/minecraft/Foo"), "Foo");
/// assert_eq!(simple_name("Foo"), "Foo");
/// ```
pub fn simple_name(class: &str) -> &str {
	let name = class.rsplit_once('/').map_or(class, |(_, name)| name);
	name.rsplit_once('$').map_or(name, |(_, name)| name)
}
