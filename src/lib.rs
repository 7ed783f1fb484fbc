//! # Cluml
//!
//! Core of a UML class-diagram editor: a diagram model with classes,
//! interfaces and five kinds of association, orthogonally routed association
//! lines, undo history, SVG export and a rule-based sanity checker.
//!
//! ## Architecture
//!
//! Cluml is organized as a workspace with multiple crates:
//!
//! 1. **cluml-core** - Geometry, error taxonomy, editor session, text sanitizing
//! 2. **cluml-settings** - Configuration files and validation
//! 3. **cluml-diagram** - Components, node chains, diagrams, traversal, sanity checks
//! 4. **cluml** - Command-line tool that integrates all crates
//!
//! ## Features
//!
//! - **Diagram model**: Classes, interfaces, association, inheritance,
//!   composition, aggregation and containment
//! - **Association routing**: Bend points, managed corners, attachment to class sides
//! - **Sanity checks**: Coded findings for members, names, multiplicities and cycles
//! - **Persistence**: JSON documents holding several diagram tabs

pub mod commands;

pub use cluml_core::{ComponentId, EditorSession, Error, Result, Vector};
pub use cluml_diagram::{
    render_svg, ComponentType, Diagram, Diagrams, EditorOptions, EditorState, SanityErrorInfo,
};
pub use cluml_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support, `warn` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
