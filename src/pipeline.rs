use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use walkdir::WalkDir;
use mappings_chain::patch::ClassPatch;
use mappings_chain::table::MappingTable;
use crate::config::Config;
use crate::download::{self, Downloader};

/// Maps the client/server marker annotations of forge onto a common name.
pub(crate) fn forge_dist_markers() -> ClassPatch {
	ClassPatch::new()
		.with("O_O", "net/minecraftforge/api/distmarker/OnlyIn")
		.with("o_o", "net/minecraftforge/api/distmarker/Dist")
}

/// Maps the client/server marker annotations of fabric onto a common name.
pub(crate) fn fabric_env_markers() -> ClassPatch {
	ClassPatch::new()
		.with("O_O", "net/fabricmc/api/Environment")
		.with("o_o", "net/fabricmc/api/EnvType")
}

/// Both tables read, and the composed one.
#[derive(Debug)]
pub(crate) struct Composed {
	pub(crate) mcp: MappingTable,
	pub(crate) yarn: MappingTable,
	/// From the source namespace to the target namespace of the [`Config`].
	pub(crate) mappings: MappingTable,
}

impl Composed {
	pub(crate) fn write_debug(&self, cache: &Path) -> Result<()> {
		mappings_chain::debug::write_dir(&self.mappings, cache.join("chained_mapping"))?;
		mappings_chain::debug::write_dir(&self.mcp, cache.join("mcp"))?;
		mappings_chain::debug::write_dir(&self.yarn, cache.join("yarn"))?;
		Ok(())
	}
}

/// Reads the mcp mappings, going from obfuscated names to mcp names.
async fn read_mcp(config: &Config, downloader: &Downloader) -> Result<MappingTable> {
	let csv = downloader.download(&download::mcp_csv_url(config)).await?;
	let tsrg = downloader.download(&download::tsrg_url(config)).await?;

	let field_names = mappings_chain::overlay::read(download::extract(&csv, "fields.csv")?.as_slice())
		.context("failed to read fields.csv")?;
	let method_names = mappings_chain::overlay::read(download::extract(&csv, "methods.csv")?.as_slice())
		.context("failed to read methods.csv")?;

	mappings_chain::tsrg::read_file(&tsrg, &field_names, &method_names)
}

/// Reads the yarn mappings, going from obfuscated names to yarn names.
async fn read_yarn(config: &Config, downloader: &Downloader) -> Result<MappingTable> {
	let jar = downloader.download(&download::yarn_url(config)).await?;

	mappings_chain::tiny::read(download::extract(&jar, "mappings/mappings.tiny")?.as_slice(), "official", "named")
		.with_context(|| anyhow!("failed to read mappings/mappings.tiny of {jar:?}"))
}

pub(crate) async fn compose(config: &Config, downloader: &Downloader) -> Result<Composed> {
	let mut mcp = read_mcp(config, downloader).await?;
	let mut yarn = read_yarn(config, downloader).await?;

	info!("read {} mcp classes and {} yarn classes", mcp.classes.len(), yarn.classes.len());

	if config.remap_client_server_marker {
		mcp = forge_dist_markers().apply(mcp);
		yarn = fabric_env_markers().apply(yarn);
	}

	let mappings = compose_tables(&mcp, &yarn, config.mcp_to_yarn);

	check_class_count(&mappings, config.minimum_class_count);

	Ok(Composed { mcp, yarn, mappings })
}

/// Chains `obfuscated -> mcp` and `obfuscated -> yarn` into `mcp -> yarn`, or `yarn -> mcp`.
///
/// Only names present in both tables survive.
pub(crate) fn compose_tables(mcp: &MappingTable, yarn: &MappingTable, mcp_to_yarn: bool) -> MappingTable {
	let mcp_to_yarn_mappings = mcp.invert().chain(yarn, false);

	if mcp_to_yarn {
		mcp_to_yarn_mappings
	} else {
		mcp_to_yarn_mappings.invert()
	}
}

/// Returns `false` and warns if there are fewer classes than expected.
pub(crate) fn check_class_count(mappings: &MappingTable, minimum: usize) -> bool {
	let count = mappings.classes.len();
	if count < minimum {
		warn!("only {count} classes were mapped, expected at least {minimum}. \
			Maybe the mappings were downloaded incompletely, try to delete the cache.");
		false
	} else {
		true
	}
}

/// Checks that the classpath and the source root exist, and gives back the source files.
pub(crate) fn check_sources(source_root: &Path, classpath: &[PathBuf]) -> Result<Vec<PathBuf>> {
	for entry in classpath {
		if !entry.exists() {
			bail!("classpath entry {entry:?} doesn't exist");
		}
	}

	if !source_root.is_dir() {
		bail!("source root {source_root:?} is not a directory");
	}

	let mut files = Vec::new();
	for entry in WalkDir::new(source_root) {
		let entry = entry.with_context(|| anyhow!("failed to walk {source_root:?}"))?;

		if entry.file_type().is_file() && entry.path().extension().is_some_and(|extension| extension == "java") {
			files.push(entry.into_path());
		}
	}

	debug!("found {} source files in {source_root:?}", files.len());

	Ok(files)
}
