//! Reading of the TSRG format.
//!
//! ```text
//! a net/minecraft/util/Timer
//! 	a field_74281_c
//! 	a (F)V func_74275_a
//! ```
//! A line without indentation starts a class. The lines indented by one tab below it are either fields
//! (`src dst`) or methods (`src desc dst`). The destination names may be opaque ids, which are looked up in a
//! [`NameOverlay`].

use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{anyhow, bail, Context, Result};
use crate::descriptor::remap_descriptor;
use crate::lines::numbered_lines;
use crate::overlay::NameOverlay;
use crate::table::{field_key, method_key, MappingTable};

pub fn read_file(path: impl AsRef<Path>, field_names: &NameOverlay, method_names: &NameOverlay) -> Result<MappingTable> {
	read(File::open(&path)?, field_names, method_names)
		.with_context(|| anyhow!("failed to read mappings file {:?} as tsrg file", path.as_ref()))
}

#[derive(Debug)]
struct RawMethod {
	key: String,
	owner_dst: String,
	name_dst: String,
	desc: String,
}

#[allow(clippy::tabs_in_doc_comments)]
/// Reads the TSRG format from the given reader.
///
/// The method descriptors of the values get their class names mapped with the classes of the same file.
/// ```
/// use mappings_chain::overlay::NameOverlay;
/// let input = "\
/// a/B b/C
/// 	f1 f2
/// 	m (La/B;)V func_1_a
/// ";
///
/// let mappings = mappings_chain::tsrg::read(input.as_bytes(), &NameOverlay::new(), &NameOverlay::new()).unwrap();
///
/// assert_eq!(mappings.classes["a/B"], "b/C");
/// assert_eq!(mappings.fields["a/B:f1"], "b/C:f2");
/// assert_eq!(mappings.methods["a/B:m(La/B;)V"], "b/C:func_1_a(Lb/C;)V");
/// ```
pub fn read(reader: impl Read, field_names: &NameOverlay, method_names: &NameOverlay) -> Result<MappingTable> {
	let mut mappings = MappingTable::new();
	let mut methods = Vec::new();

	let mut current_class: Option<(String, String)> = None;

	for line in numbered_lines(reader) {
		let (line_number, line) = line?;

		parse_line(&line, &mut current_class, &mut mappings, &mut methods, field_names, method_names)
			.with_context(|| anyhow!("invalid tsrg line {line:?} in line {line_number}"))?;
	}

	// all classes are known now, so the descriptors can be mapped
	for RawMethod { key, owner_dst, name_dst, desc } in methods {
		let desc_dst = remap_descriptor(&desc, &mappings.classes)
			.with_context(|| anyhow!("failed to map descriptor of method {key:?}"))?;

		mappings.methods.insert(key, method_key(&owner_dst, &name_dst, &desc_dst));
	}

	Ok(mappings)
}

fn parse_line(
	line: &str,
	current_class: &mut Option<(String, String)>,
	mappings: &mut MappingTable,
	methods: &mut Vec<RawMethod>,
	field_names: &NameOverlay,
	method_names: &NameOverlay,
) -> Result<()> {
	if let Some(member) = line.strip_prefix('\t') {
		let Some((class_src, class_dst)) = current_class.as_ref() else {
			bail!("member line is not in a class");
		};

		match member.split(' ').collect::<Vec<_>>().as_slice() {
			[src, dst] if is_token(src) && is_token(dst) => {
				let dst = field_names.get_or_id(dst);
				mappings.fields.insert(field_key(class_src, src), field_key(class_dst, dst));
			},
			[src, desc, dst] if is_token(src) && desc.starts_with('(') && is_token(dst) => {
				methods.push(RawMethod {
					key: method_key(class_src, src, desc),
					owner_dst: class_dst.clone(),
					name_dst: method_names.get_or_id(dst).to_owned(),
					desc: (*desc).to_owned(),
				});
			},
			slice => bail!("illegal number of arguments ({}) for member mapping, expected 2 or 3, got {slice:?}", slice.len()),
		}
	} else {
		match line.split(' ').collect::<Vec<_>>().as_slice() {
			[src, dst] if is_token(src) && is_token(dst) => {
				mappings.classes.insert((*src).to_owned(), (*dst).to_owned());
				*current_class = Some(((*src).to_owned(), (*dst).to_owned()));
			},
			slice => bail!("illegal number of arguments ({}) for class mapping, expected 2, got {slice:?}", slice.len()),
		}
	}

	Ok(())
}

/// Tokens may not be empty, and may not contain a tab (which would mean a deeper indentation).
fn is_token(s: &str) -> bool {
	!s.is_empty() && !s.contains('\t')
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;
	use crate::overlay::NameOverlay;

	#[test]
	fn class_and_field() -> Result<()> {
		let mappings = super::read("a/B b/C\n\tf1 f2\n".as_bytes(), &NameOverlay::new(), &NameOverlay::new())?;

		assert_eq!(mappings.classes, IndexMap::from([("a/B".to_owned(), "b/C".to_owned())]));
		assert_eq!(mappings.fields, IndexMap::from([("a/B:f1".to_owned(), "b/C:f2".to_owned())]));
		assert!(mappings.methods.is_empty());
		Ok(())
	}

	#[test]
	fn descriptors_use_classes_declared_later() -> Result<()> {
		let input = "a net/A\n\tb (Lc;)La; func_1_b\nc net/C\n";
		let mappings = super::read(input.as_bytes(), &NameOverlay::new(), &NameOverlay::new())?;

		assert_eq!(mappings.methods["a:b(Lc;)La;"], "net/A:func_1_b(Lnet/C;)Lnet/A;");
		Ok(())
	}

	#[test]
	fn bad_shapes() {
		let read = |s: &str| super::read(s.as_bytes(), &NameOverlay::new(), &NameOverlay::new());

		assert!(read("\tf1 f2\n").is_err(), "member before any class");
		assert!(read("a/B\n").is_err(), "class with one token");
		assert!(read("a/B b/C d/E\n").is_err(), "class with three tokens");
		assert!(read("a/B b/C\n\tx\n").is_err(), "member with one token");
		assert!(read("a/B b/C\n\ta b c d\n").is_err(), "member with four tokens");
		assert!(read("a/B b/C\n\t\tf1 f2\n").is_err(), "too deep indentation");
		assert!(read("a/B b/C\n\n").is_err(), "empty line");
	}
}
