use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use jsonconf::config::{ConfigStore, FromValue, Loader};
use jsonconf::logging::init_tracing;

/// Exit status for a plain `get` that finds nothing.
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "jsonconf", version)]
#[command(about = "Query a JSON configuration file", long_about = None)]
struct Cli {
    /// Config file name (default: config.json, or config.<ENVIRONMENT>.json)
    #[arg(short, long)]
    file: Option<String>,

    /// Directory to search, in order; repeatable (default: executable dir, then cwd)
    #[arg(short, long = "dir")]
    dirs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one value as JSON
    Get {
        key: String,

        /// Look the key up inside this group
        #[arg(short, long)]
        group: Option<String>,

        /// Type to read the value as
        #[arg(long = "as", value_enum, default_value_t = Kind::Value)]
        kind: Kind,

        /// Exit with an error naming the key when it is missing
        #[arg(long)]
        required: bool,
    },
    /// List keys at the root or inside a group
    Keys {
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Print the whole document
    Dump,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Bool,
    String,
    Int,
    Float,
    Value,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing("warn");
    let cli = Cli::parse();

    let mut loader = match cli.file {
        Some(file) => Loader::new(file),
        None => Loader::from_env(),
    };
    if !cli.dirs.is_empty() {
        loader = loader.with_search_dirs(cli.dirs);
    }

    let store = ConfigStore::load(loader).context("Failed to load configuration")?;

    match cli.command {
        Command::Get {
            key,
            group,
            kind,
            required,
        } => {
            let group = group.as_deref();
            let found = match kind {
                Kind::Bool => fetch::<bool>(&store, group, &key, required),
                Kind::String => fetch::<String>(&store, group, &key, required),
                Kind::Int => fetch::<i64>(&store, group, &key, required),
                Kind::Float => fetch::<f64>(&store, group, &key, required),
                Kind::Value => fetch::<Value>(&store, group, &key, required),
            };
            match found {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => return Ok(ExitCode::from(EXIT_NOT_FOUND)),
            }
        }
        Command::Keys { group } => {
            let mut keys = match group.as_deref() {
                Some(group) => store.group_keys(group),
                None => store.keys(),
            };
            keys.sort();
            for key in keys {
                println!("{key}");
            }
        }
        Command::Dump => {
            println!("{}", serde_json::to_string_pretty(&*store.snapshot())?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn fetch<T>(store: &ConfigStore, group: Option<&str>, key: &str, required: bool) -> Option<Value>
where
    T: FromValue + Into<Value>,
{
    let value: Option<T> = match (group, required) {
        (Some(group), true) => Some(store.required().group_get(group, key)),
        (Some(group), false) => store.group_get(group, key),
        (None, true) => Some(store.required().get(key)),
        (None, false) => store.get(key),
    };
    value.map(Into::into)
}
