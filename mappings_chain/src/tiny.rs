//! Reading of the tab separated "Tiny" (v1) format, as found in `mappings/mappings.tiny` of yarn jars.
//!
//! ```text
//! v1	official	intermediary	named
//! CLASS	a	net/minecraft/class_1	net/minecraft/util/Timer
//! FIELD	a	F	b	field_1	tickDelta
//! METHOD	a	(F)V	c	method_1	tick
//! ```
//! The header names the namespaces after the first column. Class rows have one name per namespace, field and method
//! rows first give the owner class and the descriptor (both in the first namespace), then one name per namespace.
//!
//! Rows with other tags are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, Context, Result};
use log::trace;
use crate::descriptor::{remap_descriptor, ClassRemapper};
use crate::lines::numbered_lines;
use crate::table::{field_key, method_key, MappingTable};

const CLASS: &str = "CLASS";
const FIELD: &str = "FIELD";
const METHOD: &str = "METHOD";

/// The number of columns in front of the names in class rows.
const CLASS_COLUMNS: usize = 1;
/// The number of columns in front of the names in field and method rows.
const MEMBER_COLUMNS: usize = 3;

pub fn read_file(path: impl AsRef<Path>, from: &str, to: &str) -> Result<MappingTable> {
	read(File::open(&path)?, from, to)
		.with_context(|| anyhow!("failed to read mappings file {:?} as tiny file", path.as_ref()))
}

#[derive(Debug)]
struct RawMethod {
	key: String,
	owner_dst: String,
	name_dst: String,
	desc: String,
}

#[allow(clippy::tabs_in_doc_comments)]
/// Reads the tiny format from the given reader, taking the names of the namespaces `from` and `to`.
///
/// ```
/// let input = "\
/// v1	official	named
/// CLASS	a	net/Foo
/// METHOD	a	(La;)V	b	bar
/// ";
///
/// let mappings = mappings_chain::tiny::read(input.as_bytes(), "official", "named").unwrap();
///
/// assert_eq!(mappings.classes["a"], "net/Foo");
/// assert_eq!(mappings.methods["a:b(La;)V"], "net/Foo:bar(Lnet/Foo;)V");
/// ```
pub fn read(reader: impl Read, from: &str, to: &str) -> Result<MappingTable> {
	let mut lines = numbered_lines(reader);

	let (header_line_number, header) = lines.next().context("no header line")??;
	let namespaces: Vec<&str> = header.split('\t').skip(1).collect();

	let column = |namespace: &str| -> Result<usize> {
		namespaces.iter()
			.position(|x| *x == namespace)
			.with_context(|| anyhow!("cannot find namespace {namespace:?} in header line {header_line_number}, only got {namespaces:?}"))
	};
	let from_column = column(from)?;
	let to_column = column(to)?;

	let mut mappings = MappingTable::new();
	let mut methods = Vec::new();

	for line in lines {
		let (line_number, line) = line?;

		parse_line(&line, from_column, to_column, &mut mappings, &mut methods)
			.with_context(|| anyhow!("invalid tiny line {line:?} in line {line_number}"))?;
	}

	for RawMethod { key, owner_dst, name_dst, desc } in methods {
		let desc_dst = remap_descriptor(&desc, &mappings.classes)
			.with_context(|| anyhow!("failed to map descriptor of method {key:?}"))?;

		mappings.methods.insert(key, method_key(&owner_dst, &name_dst, &desc_dst));
	}

	trace!("read {} classes, {} fields, {} methods from tiny file", mappings.classes.len(), mappings.fields.len(), mappings.methods.len());

	Ok(mappings)
}

fn parse_line(line: &str, from: usize, to: usize, mappings: &mut MappingTable, methods: &mut Vec<RawMethod>) -> Result<()> {
	let fields: Vec<&str> = line.split('\t').collect();

	let get = |index: usize| -> Result<&str> {
		fields.get(index)
			.copied()
			.with_context(|| anyhow!("expected at least {} fields, got {}", index + 1, fields.len()))
	};

	match fields[0] {
		CLASS => {
			let src = get(from + CLASS_COLUMNS)?;
			let dst = get(to + CLASS_COLUMNS)?;
			mappings.classes.insert(src.to_owned(), dst.to_owned());
		},
		FIELD => {
			let owner_src = get(1)?;
			let src = get(from + MEMBER_COLUMNS)?;
			let dst = get(to + MEMBER_COLUMNS)?;

			// class rows always come before the member rows using them
			let owner_dst = mappings.classes.map_class(owner_src);

			let key = field_key(owner_src, src);
			let value = field_key(owner_dst, dst);
			mappings.fields.insert(key, value);
		},
		METHOD => {
			let owner_src = get(1)?;
			let desc = get(2)?;
			let src = get(from + MEMBER_COLUMNS)?;
			let dst = get(to + MEMBER_COLUMNS)?;

			methods.push(RawMethod {
				key: method_key(owner_src, src, desc),
				owner_dst: mappings.classes.map_class(owner_src).to_owned(),
				name_dst: dst.to_owned(),
				desc: desc.to_owned(),
			});
		},
		_ => {},
	}

	Ok(())
}
