use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;
use log::{debug, info};
use reqwest::{Client, Response};
use zip::ZipArchive;
use crate::config::Config;

/// Downloads files into a cache directory, not downloading files already present there.
#[derive(Debug)]
pub(crate) struct Downloader {
	client: Client,
	cache: PathBuf,
}

impl Downloader {
	pub(crate) fn new(cache: impl Into<PathBuf>) -> Downloader {
		Downloader {
			client: Client::new(),
			cache: cache.into(),
		}
	}

	pub(crate) fn cache(&self) -> &Path {
		&self.cache
	}

	async fn get(&self, url: &str) -> Result<Response> {
		let response = self.client.get(url).send().await?;

		if response.status().is_success() {
			Ok(response)
		} else {
			bail!("Got a \"{}\" for {url:?}", response.status());
		}
	}

	/// Downloads the url into the cache directory, into a file named like the part of the url after the last `/`.
	///
	/// If that file already exists, it's not downloaded again.
	pub(crate) async fn download(&self, url: &str) -> Result<PathBuf> {
		let file_name = cache_file_name(url)?;
		let path = self.cache.join(file_name);

		if path.exists() {
			debug!("using cached {path:?} for {url:?}");
			return Ok(path);
		}

		info!("downloading {url}");

		tokio::fs::create_dir_all(&self.cache).await
			.with_context(|| anyhow!("failed to create cache directory {:?}", self.cache))?;

		let body: Bytes = self.get(url).await?.bytes().await
			.with_context(|| anyhow!("failed to download {url:?}"))?;

		tokio::fs::write(&path, &body).await
			.with_context(|| anyhow!("failed to write {} bytes from {url:?} to {path:?}", body.len()))?;

		Ok(path)
	}
}

fn cache_file_name(url: &str) -> Result<&str> {
	match url.rsplit_once('/') {
		Some((_, name)) if !name.is_empty() => Ok(name),
		_ => bail!("url {url:?} doesn't end in a file name"),
	}
}

/// Reads a single entry out of a zip (or jar) file.
pub(crate) fn extract(archive: &Path, entry: &str) -> Result<Vec<u8>> {
	let file = File::open(archive)
		.with_context(|| anyhow!("failed to open {archive:?}"))?;

	let mut zip = ZipArchive::new(file)
		.with_context(|| anyhow!("{archive:?} is not a zip file, try to delete it from the cache"))?;

	let mut file = zip.by_name(entry)
		.with_context(|| anyhow!("cannot find {entry:?} in {archive:?}"))?;

	let mut vec = Vec::new();
	file.read_to_end(&mut vec)
		.with_context(|| anyhow!("failed to read {entry:?} from {archive:?}"))?;

	Ok(vec)
}

pub(crate) fn mcp_csv_url(config: &Config) -> String {
	format!(
		"http://export.mcpbot.bspk.rs/mcp_{channel}_nodoc/{build}-{version}/mcp_{channel}_nodoc-{build}-{version}.zip",
		channel = config.mcp_channel,
		build = config.mcp_build,
		version = config.mcp_game_version,
	)
}

/// Note that the tsrg file is selected by the yarn game version.
pub(crate) fn tsrg_url(config: &Config) -> String {
	format!(
		"https://raw.githubusercontent.com/MinecraftForge/MCPConfig/master/versions/{version}/joined.tsrg",
		version = config.yarn_game_version,
	)
}

pub(crate) fn yarn_url(config: &Config) -> String {
	format!(
		"http://maven.modmuss50.me/net/fabricmc/yarn/{version}+build.{build}/yarn-{version}+build.{build}.jar",
		version = config.yarn_game_version,
		build = config.yarn_build,
	)
}

#[cfg(test)]
mod testing {
	use std::io::Write;
	use anyhow::Result;
	use pretty_assertions::assert_eq;
	use zip::write::SimpleFileOptions;
	use zip::ZipWriter;
	use crate::config::Config;

	fn config() -> Result<Config> {
		Ok(serde_json::from_str(r#"{
			"mcpGameVersion": "1.14.3",
			"mcpChannel": "snapshot",
			"mcpBuild": "20190719",
			"yarnGameVersion": "1.14.4",
			"yarnBuild": "9",
			"mcpSourceCode": "a",
			"yarnSourceCode": "b"
		}"#)?)
	}

	#[test]
	fn urls() -> Result<()> {
		let config = config()?;

		assert_eq!(
			super::mcp_csv_url(&config),
			"http://export.mcpbot.bspk.rs/mcp_snapshot_nodoc/20190719-1.14.3/mcp_snapshot_nodoc-20190719-1.14.3.zip"
		);
		assert_eq!(
			super::tsrg_url(&config),
			"https://raw.githubusercontent.com/MinecraftForge/MCPConfig/master/versions/1.14.4/joined.tsrg"
		);
		assert_eq!(
			super::yarn_url(&config),
			"http://maven.modmuss50.me/net/fabricmc/yarn/1.14.4+build.9/yarn-1.14.4+build.9.jar"
		);
		Ok(())
	}

	#[test]
	fn cache_file_names() -> Result<()> {
		assert_eq!(super::cache_file_name("https://example.org/a/joined.tsrg")?, "joined.tsrg");
		assert!(super::cache_file_name("https://example.org/a/").is_err());
		Ok(())
	}

	#[test]
	fn extract_entry() -> Result<()> {
		let path = std::env::temp_dir().join(format!("devoldefy_extract_{}.jar", std::process::id()));

		let mut zip = ZipWriter::new(std::fs::File::create(&path)?);
		zip.start_file("mappings/mappings.tiny", SimpleFileOptions::default())?;
		zip.write_all(b"v1\tofficial\tnamed\n")?;
		zip.finish()?;

		assert_eq!(super::extract(&path, "mappings/mappings.tiny")?, b"v1\tofficial\tnamed\n");
		assert!(super::extract(&path, "fields.csv").is_err());

		std::fs::remove_file(&path)?;
		Ok(())
	}
}
