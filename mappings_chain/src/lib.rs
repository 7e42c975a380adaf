//! Crate for reading symbol mappings in several formats, and for inverting and chaining them.
//!
//! All formats read into a [`MappingTable`][table::MappingTable], which maps class, field and method names from one
//! namespace to another. The readers are:
//! - [`tsrg`], for `.tsrg` files, using the id to name tables read by [`overlay`],
//! - [`tiny`], for the tab separated tiny (v1) files.
//!
//! Tables can be inverted and chained using [`MappingTable::invert`][table::MappingTable::invert] and
//! [`MappingTable::chain`][table::MappingTable::chain], and written for inspection with [`debug`].
//!
//! The [`remapper`] module then answers what name a symbol in source code gets.

mod lines;

pub mod descriptor;
pub mod table;

pub mod overlay;
pub mod tsrg;
pub mod tiny;

pub mod debug;
pub mod patch;
pub mod remapper;
