//! Common logging initializer
//!
//! Everything goes through `tracing`, filtered by `RUST_LOG`.  Output is either a compact
//! line-based format or a hierarchical tree of spans, plus an optional log file rotated daily.
//!

use std::path::PathBuf;

use eyre::Result;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

#[tracing::instrument]
pub fn init_logging(name: &'static str, use_tree: bool, use_file: Option<PathBuf>) -> Result<()> {
    // Filters come from `RUST_LOG`
    //
    let filter = EnvFilter::from_default_env();

    // Tree of spans on stderr
    //
    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_verbose_entry(true)
                .with_verbose_exit(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    // Otherwise plain lines on stderr, stdout is for results.
    //
    let plain = if use_tree {
        None
    } else {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
    };

    // Copy to a file
    //
    let file = use_file.map(|dir| {
        // One file per day, no colours
        //
        let file_appender = tracing_appender::rolling::daily(dir, name);
        fmt::layer().with_ansi(false).with_writer(file_appender)
    });

    // Disabled layers are `None`
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(plain)
        .with(file)
        .try_init()?;

    Ok(())
}
