//! Reading and rewriting of method descriptors.
//!
//! A method descriptor looks like `(ILjava/lang/String;[La/B;)La/C;`. Only the class names inside the `L...;` parts
//! are ever changed, everything else (primitives, array markers, the parenthesis) is copied over.

use anyhow::{bail, Result};
use indexmap::IndexMap;

/// Something that can answer "what is the new name of this class?".
///
/// Implemented for the plain class tables used everywhere in this crate.
pub trait ClassRemapper {
	/// Maps a class name to a new one, if the mapping exists.
	fn map_class_fail(&self, class: &str) -> Option<&str>;

	/// Maps a class name to a new one, if the mapping doesn't exist, returns the old one.
	///
	/// Do not implement this yourself.
	fn map_class<'a>(&'a self, class: &'a str) -> &'a str {
		self.map_class_fail(class).unwrap_or(class)
	}
}

impl ClassRemapper for IndexMap<String, String> {
	fn map_class_fail(&self, class: &str) -> Option<&str> {
		self.get(class).map(String::as_str)
	}
}

/// Returns the descriptor part of a `name(desc)ret` string, that is everything starting at the first `(`.
///
/// If there's no `(`, an empty string is returned.
/// ```
/// use mappings_chain::descriptor::signature_part;
///
/// assert_eq!(signature_part("foo(ILa/B;)V"), "(ILa/B;)V");
/// assert_eq!(signature_part("foo"), "");
/// ```
pub fn signature_part(name_and_desc: &str) -> &str {
	name_and_desc.find('(')
		.map_or("", |index| &name_and_desc[index..])
}

/// Returns the name part of a `name(desc)ret` string, that is everything before the first `(`.
pub fn name_part(name_and_desc: &str) -> &str {
	name_and_desc.find('(')
		.map_or(name_and_desc, |index| &name_and_desc[..index])
}

/// Maps all class names in a method descriptor.
///
/// Class names are only looked for after the first `(`, so the input may also be a `name(desc)ret` string, and
/// an `L` in the name isn't mistaken for the start of a class name.
///
/// Class names without a mapping are kept as they are.
/// ```
/// use indexmap::IndexMap;
/// use mappings_chain::descriptor::remap_descriptor;
///
/// let classes = IndexMap::from([("a/B".to_owned(), "x/Y".to_owned())]);
///
/// assert_eq!(remap_descriptor("(La/B;[La/C;)La/B;", &classes).unwrap(), "(Lx/Y;[La/C;)Lx/Y;");
/// ```
pub fn remap_descriptor(desc: &str, classes: &(impl ClassRemapper + ?Sized)) -> Result<String> {
	let mut s = String::with_capacity(desc.len());
	let mut started = false;

	let mut iter = desc.chars();

	while let Some(ch) = iter.next() {
		s.push(ch);

		if ch == '(' {
			started = true;
		}

		if started && ch == 'L' {
			let mut class_name = String::new();
			let mut terminated = false;
			for ch in iter.by_ref() {
				if ch == ';' {
					terminated = true;
					break;
				}
				class_name.push(ch);
			}
			if !terminated {
				bail!("descriptor {desc:?} has a missing semicolon somewhere");
			}

			s.push_str(classes.map_class(&class_name));
			s.push(';');
		}
	}

	Ok(s)
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;
	use crate::descriptor::{name_part, remap_descriptor, signature_part};

	fn classes() -> IndexMap<String, String> {
		IndexMap::from([
			("a/B".to_owned(), "x/Y".to_owned()),
			("L".to_owned(), "renamedL".to_owned()),
		])
	}

	#[test]
	fn primitives_stay() -> Result<()> {
		assert_eq!(remap_descriptor("(I)V", &classes())?, "(I)V");
		assert_eq!(remap_descriptor("(IJZ[[D)[B", &classes())?, "(IJZ[[D)[B");
		Ok(())
	}

	#[test]
	fn substitution() -> Result<()> {
		assert_eq!(remap_descriptor("(La/B;)La/B;", &classes())?, "(Lx/Y;)Lx/Y;");
		assert_eq!(remap_descriptor("([[La/B;I)V", &classes())?, "([[Lx/Y;I)V");
		Ok(())
	}

	#[test]
	fn fallback_without_entry() -> Result<()> {
		assert_eq!(remap_descriptor("(La/B;)V", &IndexMap::new())?, "(La/B;)V");
		assert_eq!(remap_descriptor("(Ljava/lang/String;)La/B;", &classes())?, "(Ljava/lang/String;)Lx/Y;");
		Ok(())
	}

	#[test]
	fn name_before_parenthesis_untouched() -> Result<()> {
		assert_eq!(remap_descriptor("getLevel(LL;)V", &classes())?, "getLevel(LrenamedL;)V");
		Ok(())
	}

	#[test]
	fn missing_semicolon() {
		assert!(remap_descriptor("(La/B)V", &classes()).is_err());
	}

	#[test]
	fn split_name_and_desc() {
		assert_eq!(signature_part("func_1234_a(La/B;)V"), "(La/B;)V");
		assert_eq!(name_part("func_1234_a(La/B;)V"), "func_1234_a");
		assert_eq!(name_part("noDesc"), "noDesc");
	}
}
