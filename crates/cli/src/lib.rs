// The verbosity stuff is cribbed from https://github.com/clap-rs/clap-verbosity-flag/blob/c621a6a8a7c0b6df8f1464a985a5d076b4915693/src/lib.rs and updated for tracing

#![deny(unused_crate_dependencies)]

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use stac::Item;
use stac_populator::{Client, CollectionDescriptor, Config, Format, Populator};
use std::{io::Write, path::Path, time::Duration};
use tracing::metadata::Level;
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// stac-populator: Populate a SpatioTemporal Asset Catalog (STAC) API
#[derive(Debug, Parser)]
pub struct StacPopulator {
    #[command(subcommand)]
    command: Command,

    /// The format of collection descriptor files.
    ///
    /// If not provided, the format will be inferred from the file extension.
    /// Possible values (default: json):
    ///
    /// - json
    /// - yaml
    #[arg(
        short = 'f',
        long = "descriptor-format",
        global = true,
        verbatim_doc_comment
    )]
    descriptor_format: Option<Format>,

    /// Skip TLS certificate verification.
    ///
    /// Only use this with hosts that you trust.
    #[arg(short = 'k', long = "insecure", global = true)]
    insecure: bool,

    /// Request timeout, in seconds.
    ///
    /// By default, requests never time out.
    #[arg(long = "timeout", global = true)]
    timeout: Option<u64>,

    /// Don't update collections or items that already exist on the host.
    #[arg(long = "no-update", global = true)]
    no_update: bool,

    /// Whether to print compact JSON output.
    ///
    /// By default, JSON output is pretty-printed.
    #[arg(short = 'c', long = "compact-json", global = true)]
    compact_json: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::verbose_help(),
        long_help = ErrorLevel::verbose_long_help(),
    )]
    verbose: u8,

    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        help = ErrorLevel::quiet_help(),
        long_help = ErrorLevel::quiet_long_help(),
        conflicts_with = "verbose",
    )]
    quiet: u8,
}

/// A stac-populator subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Checks that a url is a well-formed http(s) or ftp(s) url.
    ///
    /// No requests are made.
    ValidateUrl {
        /// The url to check.
        url: String,
    },

    /// Checks that a GET on a url succeeds.
    Reachable {
        /// The url to check.
        url: String,
    },

    /// Prints whether a collection exists on a STAC API.
    Exists {
        /// The root url of the STAC API.
        host: String,

        /// The collection id.
        collection_id: String,
    },

    /// Builds a STAC collection from a collection descriptor.
    Create {
        /// The collection descriptor (JSON or YAML).
        descriptor: String,

        /// The output file.
        ///
        /// To write to standard output, pass `-` or don't provide an argument at all.
        outfile: Option<String>,

        /// The collection id.
        ///
        /// Defaults to the descriptor's `id`.
        #[arg(long = "id")]
        id: Option<String>,
    },

    /// Creates or updates a collection, and then its items, on a STAC API.
    Publish {
        /// The root url of the STAC API.
        host: String,

        /// The collection descriptor (JSON or YAML).
        descriptor: String,

        /// STAC item files to create or update in the collection.
        #[arg(long = "item")]
        items: Vec<String>,
    },
}

#[derive(Copy, Clone, Debug, Default)]
struct ErrorLevel;

impl StacPopulator {
    /// Runs this command.
    ///
    /// If `init_tracing_subscriber` is `false`, it is expected that the caller
    /// is setting up the appropriate logging.
    pub fn run(self, init_tracing_subscriber: bool) -> Result<()> {
        if init_tracing_subscriber {
            if let Some(level) = self.log_level() {
                tracing_subscriber::registry()
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(std::io::stderr.with_max_level(level)),
                    )
                    .init();
            }
        }
        match self.command {
            Command::ValidateUrl { ref url } => {
                if stac_populator::url_validate(url) {
                    Ok(())
                } else {
                    Err(anyhow!("url is not appropriately formatted: {url}"))
                }
            }
            Command::Reachable { ref url } => {
                if self.client()?.host_reachable(url) {
                    Ok(())
                } else {
                    Err(anyhow!("url is not reachable: {url}"))
                }
            }
            Command::Exists {
                ref host,
                ref collection_id,
            } => {
                let exists = self.client()?.collection_exists(host, collection_id);
                println!("{exists}");
                Ok(())
            }
            Command::Create {
                ref descriptor,
                ref outfile,
                ref id,
            } => {
                let descriptor = self.descriptor(descriptor)?;
                let id = id
                    .as_deref()
                    .or(descriptor.id())
                    .ok_or_else(|| anyhow!("no collection id in the descriptor, use --id"))?;
                let collection = stac_populator::create_stac_collection(id, &descriptor)?;
                self.put(outfile.as_deref(), &collection)
            }
            Command::Publish {
                ref host,
                ref descriptor,
                ref items,
            } => {
                let descriptor = self.descriptor(descriptor)?;
                let items = items
                    .iter()
                    .map(|path| Format::Json.from_path::<Item>(path))
                    .collect::<stac_populator::Result<Vec<_>>>()?;
                let mut populator = Populator::new(host, descriptor, self.client()?)?;
                let _ = populator.publish_collection()?;
                let count = populator.ingest(items)?;
                tracing::info!(
                    "published collection={} with {count} item(s) to {host}",
                    populator.collection_id()
                );
                Ok(())
            }
        }
    }

    /// Returns the client configuration set by the global arguments.
    pub fn config(&self) -> Config {
        Config {
            accept_invalid_certs: self.insecure,
            timeout: self.timeout.map(Duration::from_secs),
            update: !self.no_update,
        }
    }

    pub fn log_level(&self) -> Option<Level> {
        level_enum(self.verbosity())
    }

    fn verbosity(&self) -> i8 {
        level_value(ErrorLevel::default()) - (self.quiet as i8) + (self.verbose as i8)
    }

    fn client(&self) -> Result<Client> {
        Client::with_config(self.config()).map_err(Into::into)
    }

    fn descriptor(&self, path: &str) -> Result<CollectionDescriptor> {
        let descriptor = if let Some(format) = self.descriptor_format {
            format.from_path(path)?
        } else {
            CollectionDescriptor::from_path(path)?
        };
        Ok(descriptor)
    }

    fn put(&self, outfile: Option<&str>, value: &stac::Collection) -> Result<()> {
        let mut bytes = if self.compact_json {
            serde_json::to_vec(value)?
        } else {
            serde_json::to_vec_pretty(value)?
        };
        bytes.push(b'\n');
        match outfile {
            Some(outfile) if outfile != "-" => {
                std::fs::write(Path::new(outfile), bytes)?;
                Ok(())
            }
            _ => {
                std::io::stdout().write_all(&bytes)?;
                Ok(())
            }
        }
    }
}

impl ErrorLevel {
    fn default() -> Option<Level> {
        Some(Level::ERROR)
    }

    fn verbose_help() -> Option<&'static str> {
        Some("Increase verbosity")
    }

    fn verbose_long_help() -> Option<&'static str> {
        None
    }

    fn quiet_help() -> Option<&'static str> {
        Some("Decrease verbosity")
    }

    fn quiet_long_help() -> Option<&'static str> {
        None
    }
}

fn level_enum(verbosity: i8) -> Option<Level> {
    match verbosity {
        i8::MIN..=-1 => None,
        0 => Some(Level::ERROR),
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        4..=i8::MAX => Some(Level::TRACE),
    }
}

fn level_value(level: Option<Level>) -> i8 {
    match level {
        None => -1,
        Some(Level::ERROR) => 0,
        Some(Level::WARN) => 1,
        Some(Level::INFO) => 2,
        Some(Level::DEBUG) => 3,
        Some(Level::TRACE) => 4,
    }
}

#[cfg(test)]
use {assert_cmd as _, mockito as _, rstest as _, tempfile as _};
