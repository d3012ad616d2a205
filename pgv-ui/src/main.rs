//! pgv-ui - Interactive gallery browser
//!
//! Connects to a photo service, loads the first page of the configured
//! gallery and drives the browsing session from stdin. The terminal loop
//! stands in for the grid, navigation-bar and viewer renderers: it prints
//! the session snapshot after every action and logs events as they arrive.

use anyhow::Result;
use clap::Parser;
use pgv_common::config::{ClientConfig, TomlConfig};
use pgv_ui::filter::GalleryFilter;
use pgv_ui::loader::PageLoader;
use pgv_ui::session::{GallerySession, LoadRequest};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Browse a paginated photo collection from the terminal
#[derive(Debug, Parser)]
#[command(name = "pgv-ui", version)]
struct Args {
    /// Base URL of the photo service
    #[arg(long)]
    base_url: Option<String>,

    /// Collection path of the gallery
    #[arg(long)]
    path: Option<String>,

    /// Additional query constraint, as KEY=VALUE (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting PGV gallery browser (pgv-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let file = match TomlConfig::load() {
        Ok(file) => file,
        Err(e) => {
            warn!("Ignoring config file: {}", e);
            TomlConfig::default()
        }
    };
    let config = ClientConfig::resolve(args.base_url.as_deref(), args.path.as_deref(), &file);
    info!("Photo service: {}{}", config.base_url, config.gallery_path);

    let mut filter = GalleryFilter::new(&config.gallery_path);
    for param in &args.params {
        match param.split_once('=') {
            Some((key, value)) => filter = filter.with_param(key, value),
            None => warn!("Ignoring malformed --param {:?} (expected KEY=VALUE)", param),
        }
    }

    let loader = PageLoader::new(&config.base_url)?;
    let session = Arc::new(GallerySession::new(loader, filter));

    // Renderer stand-in: log every session event as it happens
    let mut events = session.events().subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(event = event.event_type(), "{}", serde_json::to_string(&event).unwrap_or_default());
        }
    });

    session.load(LoadRequest::first_page()).await;
    print_snapshot(&session);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "n" | "next" => session.next().await,
            "p" | "prev" | "previous" => session.previous().await,
            "s" | "show" => match rest.parse::<usize>() {
                Ok(index) => session.show(index),
                Err(_) => {
                    println!("usage: show <index>");
                    continue;
                }
            },
            "t" | "toggle" => session.toggle(),
            "g" | "go" => {
                let cursor = session
                    .snapshot()
                    .links
                    .iter()
                    .find(|link| link.name == rest)
                    .map(|link| link.cursor.clone());
                match cursor {
                    Some(cursor) => session.open_link(cursor).await,
                    None => {
                        println!("no link named {:?} on this page", rest);
                        continue;
                    }
                }
            }
            "f" | "filter" => {
                if rest.is_empty() {
                    println!("usage: filter <path>");
                    continue;
                }
                session.set_filter(GalleryFilter::new(rest)).await;
            }
            "d" | "dump" => {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
                continue;
            }
            "h" | "help" => {
                print_help();
                continue;
            }
            "q" | "quit" => break,
            other => {
                println!("unknown command {:?} (h for help)", other);
                continue;
            }
        }

        print_snapshot(&session);
    }

    session.close();
    info!("Session closed");
    Ok(())
}

fn print_snapshot(session: &GallerySession) {
    let snapshot = session.snapshot();

    println!("{} images", snapshot.images.len());
    for (i, image) in snapshot.images.iter().enumerate() {
        let marker = if snapshot.viewer.visible && snapshot.viewer.index == i {
            '>'
        } else {
            ' '
        };
        println!("{} [{}] {} {}", marker, i, image.id, image.view_url);
    }

    if !snapshot.links.is_empty() {
        let names: Vec<&str> = snapshot.links.iter().map(|l| l.name.as_str()).collect();
        println!("links: {}", names.join(", "));
    }

    if snapshot.viewer.visible {
        if let Some(url) = &snapshot.viewer.url {
            println!("viewing [{}] {}", snapshot.viewer.index, url);
        }
    }
}

fn print_help() {
    println!("commands: next (n), previous (p), show <index> (s), toggle (t),");
    println!("          go <link> (g), filter <path> (f), dump (d), help (h), quit (q)");
}
