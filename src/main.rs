use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use mappings_chain::remapper::{Binding, MappingSet, NoSuperClassProvider, SymbolRemapper};
use crate::config::Config;
use crate::download::Downloader;

mod config;
mod download;
mod pipeline;

/// Ports source code between the mcp and yarn names, by chaining both mappings through the obfuscated names.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
	/// Show more log output, can be given multiple times
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Args)]
struct ConfigArgs {
	/// The json config file
	#[arg(short, long)]
	config: PathBuf,

	/// Where to cache downloaded files and write the debug mappings to, defaults to `<config name>_cache`
	#[arg(long)]
	cache: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Compose the mappings, write the debug mappings and check the sources
	Compose {
		#[command(flatten)]
		config: ConfigArgs,
	},
	/// Compose the mappings and look up the new name of a single symbol
	Lookup {
		#[command(flatten)]
		config: ConfigArgs,

		#[command(subcommand)]
		query: Query,
	},
}

#[derive(Debug, Subcommand)]
enum Query {
	Class {
		name: String,
	},
	Field {
		class: String,
		name: String,
	},
	Method {
		class: String,
		name: String,
		desc: String,
	},
}

fn setup_logger(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

fn load(args: &ConfigArgs) -> Result<(Config, Downloader)> {
	let config = Config::read(&args.config)?;
	let cache = args.cache.clone()
		.unwrap_or_else(|| Config::default_cache_dir(&args.config));

	Ok((config, Downloader::new(cache)))
}

async fn compose(args: &ConfigArgs) -> Result<()> {
	let (config, downloader) = load(args)?;

	let composed = pipeline::compose(&config, &downloader).await?;
	composed.write_debug(downloader.cache())?;

	let files = pipeline::check_sources(config.source_root(), config.classpath())?;

	let set = MappingSet::new(&composed.mappings)?;

	info!(
		"mapped {} classes, {} fields and {} methods from {} to {}",
		composed.mappings.classes.len(),
		composed.mappings.fields.len(),
		composed.mappings.methods.len(),
		config.source_namespace(),
		config.target_namespace(),
	);
	info!(
		"{} source files in {:?} are ready to be rewritten into {:?}, using {} classes with members",
		files.len(),
		config.source_root(),
		config.target_root(),
		set.len(),
	);

	Ok(())
}

async fn lookup(args: &ConfigArgs, query: &Query) -> Result<()> {
	let (config, downloader) = load(args)?;

	let composed = pipeline::compose(&config, &downloader).await?;
	let set = MappingSet::new(&composed.mappings)?;
	let remapper = SymbolRemapper::new(&set, &NoSuperClassProvider);

	let result = match query {
		Query::Class { name } => remapper.map_class(name).map(str::to_owned),
		Query::Field { class, name } => remapper.map_field(class, name).map(str::to_owned),
		Query::Method { class, name, desc } => {
			let binding = Binding::Method {
				declaring_class: class,
				name,
				descriptor: desc,
				constructor: name == "<init>",
			};
			remapper.rename(&binding, name)
		},
	};

	match result {
		Some(new_name) => println!("{new_name}"),
		None => println!("unmapped"),
	}

	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_logger(cli.verbose)?;

	match &cli.command {
		Command::Compose { config } => compose(config).await,
		Command::Lookup { config, query } => lookup(config, query).await,
	}
}
