//! Per-repository wiki panes: structure, review, file and graph.

use super::{Badge, Block, Tone, View, build_file_tree};
use crate::models::{FileDoc, GraphResponse, RepoStructure, ReviewResult};

pub const REVIEW_BREADCRUMB: &str = "Repo overview & AI review";
pub const REVIEW_TITLE: &str = "AI Review for this repository";
pub const NO_SUMMARY: &str = "No review summary available.";
pub const NO_ISSUES: &str = "No significant issues detected in the code.";
pub const NO_FILES: &str = "No files were analyzed.";
pub const NO_DOT_CODE: &str = "(no dot_code)";
pub const GRAPH_BREADCRUMB: &str = "Graph overview";
pub const GRAPH_TITLE: &str = "Graph overview (SVG from Graphviz)";

/// File tree sidebar. A backend error replaces the tree with an error box.
pub fn structure_view(structure: &RepoStructure) -> View {
    let mut view = View::new();
    view.push(Block::heading("Files"));

    if let Some(error) = &structure.error {
        view.push(Block::notice(Tone::Error, error.clone()));
    } else if structure.files.is_empty() {
        view.push(Block::paragraph(NO_FILES));
    } else {
        view.push(Block::Tree {
            dirs: build_file_tree(&structure.files),
        });
    }
    view
}

/// Repository-wide AI review.
pub fn review_view(review: &ReviewResult) -> View {
    let mut view = View::new();
    view.push(Block::breadcrumb(REVIEW_BREADCRUMB))
        .push(Block::title(REVIEW_TITLE))
        .push(Block::paragraph(
            review
                .summary
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(NO_SUMMARY),
        ));

    if let Some(error) = &review.error {
        view.push(Block::notice(Tone::Error, format!("Review error: {error}")));
        return view;
    }

    if review.issues.is_empty() {
        view.push(Block::notice(Tone::Success, NO_ISSUES));
        return view;
    }

    view.push(Block::heading("Detected issues & suggestions"));
    for issue in &review.issues {
        let location = issue.location();
        let children = issue
            .suggestion
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| Block::paragraph(s.clone()))
            .collect();
        view.push(Block::Panel {
            title: issue.display_title().to_string(),
            meta: (!location.is_empty()).then_some(location),
            badge: Some(Badge::severity(issue.severity)),
            children,
        });
    }
    view
}

/// Documentation page for one file.
///
/// Each section is omitted when empty; the DOT block is always present.
pub fn file_view(path: &str, doc: &FileDoc) -> View {
    let mut view = View::new();
    view.push(Block::breadcrumb(path)).push(Block::title(path));

    if let Some(error) = &doc.error {
        view.push(Block::notice(
            Tone::Error,
            format!("Failed to analyze file: {error}"),
        ));
        return view;
    }

    if let Some(description) = doc.description.as_deref().filter(|d| !d.is_empty()) {
        view.push(Block::paragraph(description));
    }

    if !doc.imports.is_empty() {
        view.push(Block::heading("Imports / Dependencies"))
            .push(Block::List {
                label: None,
                items: doc.imports.clone(),
            });
    }

    if !doc.classes.is_empty() {
        view.push(Block::heading("Classes"));
        for class in &doc.classes {
            let mut children = Vec::new();
            if !class.methods.is_empty() {
                children.push(Block::List {
                    label: Some("Methods:".to_string()),
                    items: class.methods.clone(),
                });
            }
            view.push(Block::Panel {
                title: class.signature(),
                meta: None,
                badge: None,
                children,
            });
        }
    }

    if !doc.functions.is_empty() {
        view.push(Block::heading("Functions"));
        for function in &doc.functions {
            let children = function
                .description
                .iter()
                .filter(|d| !d.is_empty())
                .map(|d| Block::paragraph(d.clone()))
                .collect();
            view.push(Block::Panel {
                title: function.signature(),
                meta: None,
                badge: None,
                children,
            });
        }
    }

    view.push(Block::heading("Graphviz DOT")).push(Block::Code {
        text: doc
            .dot_code
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DOT_CODE)
            .to_string(),
    });
    view
}

/// Whole-repository graph.
///
/// Returns the alert text instead of a view when the backend reported an
/// error; the current pane should then be left as it was.
pub fn graph_view(graph: &GraphResponse) -> Result<View, String> {
    if let Some(alert) = graph.alert() {
        return Err(alert);
    }
    let mut view = View::new();
    view.push(Block::breadcrumb(GRAPH_BREADCRUMB))
        .push(Block::title(GRAPH_TITLE))
        .push(Block::Svg {
            markup: graph.diagram.clone().unwrap_or_default(),
        });
    Ok(view)
}
