//! # Overprint CLI
//!
//! Command-line interface for filling scanned carrier application forms.
//!
//! ## Usage
//!
//! ```bash
//! # Run the editor
//! overprint serve --listen 0.0.0.0:8080 --assets ./assets/templates
//!
//! # List available forms
//! overprint templates
//!
//! # Resolve a form state to field values
//! overprint resolve lg-hanpass --set applicationType=transfer --set phoneNumber=01012345678
//!
//! # Write a print document with embedded page images
//! overprint print kt-asia --set name=홍길동 --inline-images -o kt.html
//!
//! # Show or advance the LG Story room rotation
//! overprint room --advance
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, prelude::*};

use overprint::{
    OverprintError,
    assets::PageLoader,
    config::{self, ServerConfig},
    form::{FieldSequence, FormInput},
    overlay::OverlayView,
    print::{self, ImageMode, PrintComposer, readiness::ReadinessGate},
    room::{Advance, FileRoomStore, MemoryRoomStore, RoomCounter, room_number},
    server,
    templates::{self, FormContext, Template, TemplateInfo},
};

/// Overprint - overlay form filler for scanned application forms
#[derive(Parser, Debug)]
#[command(name = "overprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP editor
    Serve {
        /// Address to listen on
        #[arg(long, env = "OVERPRINT_LISTEN", default_value = config::DEFAULT_LISTEN)]
        listen: String,

        /// Directory holding the scanned form pages
        #[arg(long, env = "OVERPRINT_ASSETS", default_value = config::DEFAULT_ASSETS)]
        assets: PathBuf,

        /// Room rotation state file (defaults to the platform data dir)
        #[arg(long, env = "OVERPRINT_STATE")]
        state: Option<PathBuf>,

        /// Keep the room rotation in memory only
        #[arg(long)]
        no_state: bool,
    },

    /// List available forms
    Templates {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a form state and print active fields with their values
    Resolve {
        /// Template id
        id: String,

        /// Input value as NAME=VALUE (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_pair)]
        set: Vec<(String, String)>,
    },

    /// Render the on-screen overlay for a form state as HTML
    Preview {
        /// Template id
        id: String,

        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_pair)]
        set: Vec<(String, String)>,

        /// Display scale (defaults to the template's preview scale)
        #[arg(long)]
        scale: Option<f64>,

        /// Draw field outlines
        #[arg(long)]
        debug: bool,

        #[arg(long, env = "OVERPRINT_ASSETS", default_value = config::DEFAULT_ASSETS)]
        assets: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compose the A4 print document for a form state
    Print {
        /// Template id
        id: String,

        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_pair)]
        set: Vec<(String, String)>,

        /// Embed page images so the document is self-contained
        #[arg(long)]
        inline_images: bool,

        /// Open the print dialog when the document loads
        #[arg(long)]
        auto_print: bool,

        #[arg(long, env = "OVERPRINT_ASSETS", default_value = config::DEFAULT_ASSETS)]
        assets: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the room rotation, optionally advancing it
    Room {
        #[arg(long, env = "OVERPRINT_STATE")]
        state: Option<PathBuf>,

        /// Move to the next room
        #[arg(long)]
        advance: bool,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("overprint=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), OverprintError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            assets,
            state,
            no_state,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                asset_dir: assets,
                state_path: if no_state { None } else { state.or_else(config::default_state_path) },
            };
            tokio::runtime::Runtime::new()?.block_on(server::serve(config))
        }

        Commands::Templates { json } => {
            let infos: Vec<TemplateInfo> = templates::all().iter().map(|t| TemplateInfo::of(*t)).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&infos)?);
                return Ok(());
            }
            for info in infos {
                println!(
                    "  {:<18} {:<6} {} ({} page{})",
                    info.id,
                    info.carrier_label,
                    info.title,
                    info.pages,
                    if info.pages == 1 { "" } else { "s" }
                );
            }
            Ok(())
        }

        Commands::Resolve { id, set } => {
            let template = lookup(&id)?;
            let input = cli_input(template, set);
            let resolved = template.resolve(&input);
            for field in resolved.fields.iter() {
                println!(
                    "  {:<18} p{} top {:>6} left {:>6}  {:?}",
                    field.id,
                    field.page,
                    field.top,
                    field.left,
                    resolved.values.get(&field.id)
                );
            }
            let focus = FieldSequence::new(template.inputs(), &input);
            println!("\nFocus order: {}", focus.names().join(" → "));
            Ok(())
        }

        Commands::Preview {
            id,
            set,
            scale,
            debug,
            assets,
            output,
        } => {
            let template = lookup(&id)?;
            let input = cli_input(template, set);
            let resolved = template.resolve(&input);
            let loader = PageLoader::with_asset_dir(&assets)?;
            let state = tokio::runtime::Runtime::new()?.block_on(loader.load_all(&template.page_images()));
            let html = OverlayView::new(&resolved, scale.unwrap_or(template.preview_scale()))
                .debug(debug)
                .render(&state);
            write_output(output.as_deref(), &html)
        }

        Commands::Print {
            id,
            set,
            inline_images,
            auto_print,
            assets,
            output,
        } => {
            let template = lookup(&id)?;
            let input = cli_input(template, set);
            let resolved = template.resolve(&input);
            let loader = PageLoader::with_asset_dir(&assets)?;
            let pages = tokio::runtime::Runtime::new()?
                .block_on(ReadinessGate::default().wait(&loader, &template.page_images()))?;
            let mode = if inline_images { ImageMode::Inline } else { ImageMode::Linked };
            let html = PrintComposer::new(&resolved)
                .auto_print(auto_print)
                .compose_pages(&pages, mode);
            eprintln!("{} page(s), {}", pages.len(), print::page_size_label());
            write_output(output.as_deref(), &html)
        }

        Commands::Room { state, advance } => {
            let counter: Arc<dyn RoomCounter> = match state.or_else(config::default_state_path) {
                Some(path) => Arc::new(FileRoomStore::new(path)),
                None => Arc::new(MemoryRoomStore::default()),
            };
            let index = counter.peek()?;
            if !advance {
                println!("Room {} (index {})", room_number(index), index);
                return Ok(());
            }
            match counter.advance(index)? {
                Advance::Advanced { index: next } => {
                    println!("Room {} → {}", room_number(index), room_number(next));
                    Ok(())
                }
                Advance::Conflict { current } => Err(OverprintError::Room(format!(
                    "rotation moved to {} while advancing",
                    room_number(current)
                ))),
            }
        }
    }
}

fn lookup(id: &str) -> Result<&'static dyn Template, OverprintError> {
    templates::by_id(id).ok_or_else(|| OverprintError::UnknownTemplate(id.to_string()))
}

/// Normalized form state from `--set` pairs plus the template's defaults.
fn cli_input(template: &dyn Template, set: Vec<(String, String)>) -> FormInput {
    let raw: FormInput = set.into_iter().collect();
    let ctx = FormContext::new(overprint::format::today(), None);
    raw.normalize(template.inputs()).or_defaults(&template.defaults(&ctx))
}

fn write_output(path: Option<&Path>, html: &str) -> Result<(), OverprintError> {
    match path {
        Some(path) => {
            std::fs::write(path, html)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}
