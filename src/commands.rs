//! Implementations of the `cluml` subcommands.
//!
//! Each command works on an [`EditorState`] loaded from a document file and
//! returns its output as a string; the binary decides where it goes.

use anyhow::{Context, Result};
use cluml_diagram::{render_svg, EditorOptions, EditorState, SanityErrorInfo};
use cluml_settings::Config;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Editor options described by the configuration.
pub fn editor_options(config: &Config) -> EditorOptions {
    EditorOptions {
        canvas_width: config.editor.canvas_width,
        canvas_height: config.editor.canvas_height,
        grid: config.editor.grid,
        snap: config.editor.snap,
        undo_depth: config.editor.undo_depth,
    }
}

/// Loads a document into a fresh editor configured by `config`.
pub fn open_document(path: &Path, config: &Config) -> Result<EditorState> {
    let mut state = EditorState::new(config.session(), editor_options(config));
    state.load_from_file(path)?;
    Ok(state)
}

/// Findings of one diagram tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramReport {
    pub diagram: String,
    pub findings: Vec<SanityErrorInfo>,
}

/// Runs the sanity check on every diagram of the document. The active
/// diagram is restored afterwards.
pub fn check_document(state: &mut EditorState) -> Result<Vec<DiagramReport>> {
    let active = state.document.active().name.clone();
    let names: Vec<String> = state.document.iter().map(|d| d.name.clone()).collect();

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        state.select_diagram(&name)?;
        reports.push(DiagramReport {
            findings: state.sanity_check(),
            diagram: name,
        });
    }
    state.select_diagram(&active)?;

    let total: usize = reports.iter().map(|r| r.findings.len()).sum();
    tracing::info!("Sanity check found {} problems", total);
    Ok(reports)
}

/// Plain-text listing of findings, one per line.
pub fn format_reports(reports: &[DiagramReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for finding in &report.findings {
            let _ = writeln!(
                out,
                "{}: {} {} {}: {}",
                report.diagram,
                finding.error_code,
                finding.element_type,
                finding.element_name,
                finding.description
            );
        }
    }
    out
}

pub fn reports_to_json(reports: &[DiagramReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Failed to serialize findings")
}

/// SVG of the named diagram, or of the active one.
pub fn render_document(state: &mut EditorState, diagram: Option<&str>) -> Result<String> {
    if let Some(name) = diagram {
        state
            .select_diagram(name)
            .with_context(|| format!("No diagram named {}", name))?;
    }
    Ok(render_svg(state.document.active()))
}

/// Summary of the document: its id and one line per diagram.
pub fn describe_document(state: &EditorState) -> String {
    let document = &state.document;
    let mut out = String::new();
    let _ = writeln!(out, "Document {}", document.id());
    let _ = writeln!(
        out,
        "Grid {}{}",
        document.grid,
        if document.snap { " (snap)" } else { "" }
    );
    for diagram in document.iter() {
        let _ = writeln!(
            out,
            "{} ({}x{}): {} classes, {} associations",
            diagram.name,
            diagram.width,
            diagram.height,
            diagram.classes().count(),
            diagram.associations().count()
        );
    }
    out
}
