use crate::{
    utils::{
        logger::{LogLevel, Logger},
        signature::get_signature,
        version::get_version,
    },
    versions::{
        render::DEFAULT_MOUNT_ID,
        run::{RenderOptions, VersionSource, print_versions, render_page},
    },
};
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io;

mod types;
mod utils;
mod versions;

#[derive(Parser)]
#[command(name = "systemaddons-versions")]
#[command(author = "Mozilla Services")]
#[command(about = "Render the Firefox system add-ons versions page from Kinto records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the versions page into a static HTML file
    Render {
        /// Kinto server root, e.g. https://kinto-ota.dev.mozaws.net/v1
        #[arg(long)]
        server: Option<String>,
        /// Read records from a saved response instead of the server
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Host page carrying the templates. Defaults to the built-in page.
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// File to write the rendered page to
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
        /// Id of the element the versions are mounted into
        #[arg(long, default_value = DEFAULT_MOUNT_ID)]
        mount: String,
    },

    /// Print the versions and their system add-ons
    List {
        /// Kinto server root, e.g. https://kinto-ota.dev.mozaws.net/v1
        #[arg(long)]
        server: Option<String>,
        /// Read records from a saved response instead of the server
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let version = get_version();
    let signature = get_signature(&version);

    let version_static: &'static str = Box::leak(format!("v{}", version).into_boxed_str());
    let signature_static: &'static str = Box::leak(signature.into_boxed_str());

    let mut cmd = Cli::command();
    cmd = cmd.version(version_static).before_help(signature_static);

    let raw_args: Vec<String> = std::env::args().collect();
    if raw_args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", signature_static);
        return Ok(());
    }

    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches).map_err(io::Error::other)?;

    let result = match cli.command {
        Commands::Render {
            server,
            input,
            template,
            output,
            mount,
        } => {
            let options = RenderOptions {
                source: VersionSource::from_args(server.as_deref(), input),
                template,
                output,
                mount,
            };
            render_page(&options).await
        }

        Commands::List { server, input } => {
            print_versions(&VersionSource::from_args(server.as_deref(), input)).await
        }
    };

    if let Err(e) = result {
        Logger::new().log_message(LogLevel::Error, &e);
        return Err(io::Error::other(e));
    }

    Ok(())
}
