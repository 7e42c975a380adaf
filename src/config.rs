use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

const DEFAULT_MINIMUM_CLASS_COUNT: usize = 2000;

/// The json configuration file.
///
/// ```json
/// {
///     "mcpGameVersion": "1.14.4",
///     "mcpChannel": "snapshot",
///     "mcpBuild": "20190719",
///     "yarnGameVersion": "1.14.4",
///     "yarnBuild": "9",
///     "mcpSourceCode": "mcp/src/main/java",
///     "yarnSourceCode": "yarn/src/main/java",
///     "mcpSourceClasspath": ["libs/forge.jar"],
///     "yarnSourceClasspath": ["libs/fabric.jar"],
///     "mcpToYarn": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Config {
	pub(crate) mcp_game_version: String,
	pub(crate) mcp_channel: String,
	pub(crate) mcp_build: String,

	pub(crate) yarn_game_version: String,
	pub(crate) yarn_build: String,

	pub(crate) mcp_source_code: PathBuf,
	pub(crate) yarn_source_code: PathBuf,

	#[serde(default)]
	pub(crate) mcp_source_classpath: Vec<PathBuf>,
	#[serde(default)]
	pub(crate) yarn_source_classpath: Vec<PathBuf>,

	#[serde(default = "default_true")]
	pub(crate) mcp_to_yarn: bool,
	#[serde(default = "default_true")]
	pub(crate) remap_client_server_marker: bool,
	#[serde(default = "default_minimum_class_count")]
	pub(crate) minimum_class_count: usize,
}

fn default_true() -> bool {
	true
}

fn default_minimum_class_count() -> usize {
	DEFAULT_MINIMUM_CLASS_COUNT
}

impl Config {
	pub(crate) fn read(path: &Path) -> Result<Config> {
		let file = File::open(path)
			.with_context(|| anyhow!("cannot find config file {path:?}"))?;

		serde_json::from_reader(BufReader::new(file))
			.with_context(|| anyhow!("failed to parse config file {path:?}"))
	}

	/// The cache directory used if none is given: `<config file stem>_cache`, next to the config file.
	pub(crate) fn default_cache_dir(path: &Path) -> PathBuf {
		let stem = path.file_stem()
			.map(|stem| stem.to_string_lossy().into_owned())
			.unwrap_or_else(|| "devoldefy".to_owned());

		path.with_file_name(format!("{stem}_cache"))
	}

	pub(crate) fn source_root(&self) -> &Path {
		if self.mcp_to_yarn { &self.mcp_source_code } else { &self.yarn_source_code }
	}

	pub(crate) fn target_root(&self) -> &Path {
		if self.mcp_to_yarn { &self.yarn_source_code } else { &self.mcp_source_code }
	}

	pub(crate) fn classpath(&self) -> &[PathBuf] {
		if self.mcp_to_yarn { &self.mcp_source_classpath } else { &self.yarn_source_classpath }
	}

	pub(crate) fn source_namespace(&self) -> &'static str {
		if self.mcp_to_yarn { "mcp" } else { "yarn" }
	}

	pub(crate) fn target_namespace(&self) -> &'static str {
		if self.mcp_to_yarn { "yarn" } else { "mcp" }
	}
}
