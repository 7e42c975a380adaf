use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use pretty_assertions::assert_eq;
use mappings_chain::remapper::{Binding, MappingSet, NoSuperClassProvider, Occurrence, SymbolRemapper};
use mappings_chain::table::{MappingTable, Table};

fn entries(entries: &[(&str, &str)]) -> Table {
	entries.iter()
		.map(|&(a, b)| (a.to_owned(), b.to_owned()))
		.collect()
}

fn mappings() -> MappingTable {
	MappingTable {
		classes: entries(&[
			("mcp/Entity", "yarn/Entity"),
			("mcp/Entity$Inner", "yarn/Entity$Nested"),
		]),
		fields: entries(&[
			("mcp/Entity:posX", "yarn/Entity:x"),
			("mcp/Unmapped:count", "mcp/Unmapped:size"),
		]),
		methods: entries(&[
			("mcp/Entity:onUpdate()V", "yarn/Entity:tick()V"),
			("mcp/Entity:move(DDD)V", "yarn/Entity:moveBy(DDD)V"),
		]),
	}
}

#[test]
fn mapping_set_groups_members() -> Result<()> {
	let set = MappingSet::new(&mappings())?;

	assert_eq!(set.len(), 3);
	let entity = set.get("mcp/Entity").expect("entity is mapped");
	assert_eq!(entity.name, "yarn/Entity");
	assert_eq!(entity.fields["posX"], "x");
	assert_eq!(entity.methods[&("onUpdate".to_owned(), "()V".to_owned())], "tick");

	let unmapped = set.get("mcp/Unmapped").expect("member owner gets an entry");
	assert_eq!(unmapped.name, "mcp/Unmapped");
	Ok(())
}

#[test]
fn mapping_set_rejects_bad_keys() {
	let mut mappings = MappingTable::new();
	mappings.methods.insert("a:noDescriptor".to_owned(), "b:other".to_owned());
	assert!(MappingSet::new(&mappings).is_err());

	let mut mappings = MappingTable::new();
	mappings.fields.insert("noOwner".to_owned(), "b:other".to_owned());
	assert!(MappingSet::new(&mappings).is_err());
}

#[test]
fn rename_bindings() -> Result<()> {
	let set = MappingSet::new(&mappings())?;
	let remapper = SymbolRemapper::new(&set, &NoSuperClassProvider);

	let rename = |binding: Binding, identifier: &str| remapper.rename(&binding, identifier);

	assert_eq!(rename(Binding::Class { binary_name: "mcp/Entity" }, "Entity"), None, "same simple name");
	assert_eq!(rename(Binding::Class { binary_name: "mcp/Entity$Inner" }, "Inner"), Some("Nested".to_owned()));
	assert_eq!(rename(Binding::Field { declaring_class: Some("mcp/Entity"), name: "posX" }, "posX"), Some("x".to_owned()));
	assert_eq!(rename(Binding::Field { declaring_class: None, name: "posX" }, "posX"), None, "local variable");
	assert_eq!(rename(Binding::Method {
		declaring_class: "mcp/Entity",
		name: "onUpdate",
		descriptor: "()V",
		constructor: false,
	}, "onUpdate"), Some("tick".to_owned()));
	assert_eq!(rename(Binding::Method {
		declaring_class: "mcp/Entity$Inner",
		name: "<init>",
		descriptor: "()V",
		constructor: true,
	}, "Inner"), Some("Nested".to_owned()));
	assert_eq!(rename(Binding::Method {
		declaring_class: "other/Thing",
		name: "<init>",
		descriptor: "()V",
		constructor: true,
	}, "Thing"), None, "unmapped constructor keeps its name");
	Ok(())
}

#[test]
fn recover_by_name_only() -> Result<()> {
	let set = MappingSet::new(&mappings())?;
	let remapper = SymbolRemapper::new(&set, &NoSuperClassProvider);

	let binding = Binding::Method {
		declaring_class: "mcp/Entity",
		name: "move",
		descriptor: "(FFF)V",
		constructor: false,
	};
	assert_eq!(remapper.map_method("mcp/Entity", "move", "(FFF)V"), None);
	assert_eq!(remapper.rename(&binding, "move"), Some("moveBy".to_owned()));

	let binding = Binding::Method {
		declaring_class: "mcp/Entity",
		name: "missing",
		descriptor: "()V",
		constructor: false,
	};
	assert_eq!(remapper.rename(&binding, "missing"), None);
	Ok(())
}

#[test]
fn inherited_members() -> Result<()> {
	let set = MappingSet::new(&mappings())?;
	let inheritance = IndexMap::from([
		("mod/Zombie".to_owned(), IndexSet::from(["mod/Monster".to_owned()])),
		("mod/Monster".to_owned(), IndexSet::from(["java/lang/Object".to_owned(), "mcp/Entity".to_owned()])),
	]);
	let remapper = SymbolRemapper::new(&set, &inheritance);

	assert_eq!(remapper.map_field("mod/Zombie", "posX"), Some("x"));
	assert_eq!(remapper.map_method("mod/Zombie", "onUpdate", "()V"), Some("tick"));
	assert_eq!(remapper.map_method("mod/Zombie", "onUpdate", "(I)V"), None);
	assert_eq!(remapper.map_class("mod/Zombie"), None);
	Ok(())
}

#[test]
fn apply_renames_to_text() -> Result<()> {
	let set = MappingSet::new(&mappings())?;
	let remapper = SymbolRemapper::new(&set, &NoSuperClassProvider);

	let text = "entity.onUpdate(); x = entity.posX; int posX = 0;";
	let find = |needle: &str, from: usize| -> std::ops::Range<usize> {
		let start = from + text[from..].find(needle).expect("needle is in text");
		start..start + needle.len()
	};

	let occurrences = [
		Occurrence {
			span: find("posX", 20),
			binding: Binding::Field { declaring_class: Some("mcp/Entity"), name: "posX" },
		},
		Occurrence {
			span: find("onUpdate", 0),
			binding: Binding::Method { declaring_class: "mcp/Entity", name: "onUpdate", descriptor: "()V", constructor: false },
		},
		Occurrence {
			span: find("posX", 36),
			binding: Binding::Field { declaring_class: None, name: "posX" },
		},
	];

	let remapped = remapper.apply_renames(text, &occurrences)?;
	assert_eq!(remapped, "entity.tick(); x = entity.x; int posX = 0;");
	Ok(())
}

#[test]
fn apply_renames_rejects_overlaps() -> Result<()> {
	let set = MappingSet::new(&mappings())?;
	let remapper = SymbolRemapper::new(&set, &NoSuperClassProvider);

	let binding = Binding::Field { declaring_class: Some("mcp/Entity"), name: "posX" };
	let occurrences = [
		Occurrence { span: 0..4, binding },
		Occurrence { span: 2..6, binding },
	];
	assert!(remapper.apply_renames("posXposX", &occurrences).is_err());
	assert!(remapper.apply_renames("pos", &occurrences[..1]).is_err(), "out of bounds");
	Ok(())
}
