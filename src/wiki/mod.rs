//! Wiki page for one repository.
//!
//! A [`WikiSession`] owns the sidebar and the single content pane. Each
//! navigation fetches one resource and rebuilds the affected pane from
//! scratch.

use thiserror::Error;

use crate::client::{BackendApi, ClientError};
use crate::models::RepoStructure;
use crate::view::View;
use crate::view::wiki::{file_view, graph_view, review_view, structure_view};

/// What the content pane currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiPane {
    Structure,
    Review,
    File(String),
    Graph,
}

/// Per-page state shared by every view of one repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WikiContext {
    pub repo_id: String,
    /// Last successfully loaded structure.
    pub structure: Option<RepoStructure>,
}

impl WikiContext {
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            structure: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum WikiError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Backend-reported failure shown as an alert; panes are unchanged.
    #[error("{0}")]
    Alert(String),
}

pub struct WikiSession<'a> {
    backend: &'a dyn BackendApi,
    context: WikiContext,
    pane: Option<WikiPane>,
    sidebar: View,
    content: View,
    diagram: Option<String>,
}

impl<'a> WikiSession<'a> {
    pub fn new(backend: &'a dyn BackendApi, repo_id: impl Into<String>) -> Self {
        Self {
            backend,
            context: WikiContext::new(repo_id),
            pane: None,
            sidebar: View::new(),
            content: View::new(),
            diagram: None,
        }
    }

    pub fn context(&self) -> &WikiContext {
        &self.context
    }

    pub fn pane(&self) -> Option<&WikiPane> {
        self.pane.as_ref()
    }

    pub fn sidebar(&self) -> &View {
        &self.sidebar
    }

    pub fn content(&self) -> &View {
        &self.content
    }

    /// SVG markup of the last graph shown.
    pub fn diagram(&self) -> Option<&str> {
        self.diagram.as_deref()
    }

    /// Fetch the file listing and rebuild the sidebar.
    ///
    /// A backend `error` renders inline; only transport failures are `Err`.
    pub async fn load_structure(&mut self) -> Result<(), WikiError> {
        let structure = self.backend.structure(&self.context.repo_id).await?;
        self.sidebar = structure_view(&structure);
        if structure.error.is_none() {
            self.context.structure = Some(structure);
        }
        Ok(())
    }

    /// Fetch the AI review into the content pane.
    ///
    /// Transport failures are logged and leave the pane untouched.
    pub async fn load_review(&mut self) {
        match self.backend.review(&self.context.repo_id).await {
            Ok(review) => {
                self.content = review_view(&review);
                self.pane = Some(WikiPane::Review);
            }
            Err(e) => {
                tracing::error!(repo_id = %self.context.repo_id, error = %e, "error loading repo review");
            }
        }
    }

    /// Fetch and show the documentation page for `path`.
    ///
    /// Files flagged with an analysis error are still fetched; the page
    /// then carries the error message.
    pub async fn open_file(&mut self, path: &str) -> Result<(), WikiError> {
        if self
            .context
            .structure
            .as_ref()
            .is_some_and(|s| s.has_error(path))
        {
            tracing::debug!(path, "opening file flagged with an analysis error");
        }
        let doc = self.backend.file_doc(&self.context.repo_id, path).await?;
        self.content = file_view(path, &doc);
        self.pane = Some(WikiPane::File(path.to_string()));
        Ok(())
    }

    /// Fetch and show the whole-repository graph.
    ///
    /// On a backend error the alert text comes back as
    /// [`WikiError::Alert`] and the current pane stays as it was.
    pub async fn show_graph(&mut self) -> Result<(), WikiError> {
        let graph = self.backend.graph(&self.context.repo_id).await?;
        let view = graph_view(&graph).map_err(WikiError::Alert)?;
        self.content = view;
        self.diagram = graph.diagram;
        self.pane = Some(WikiPane::Graph);
        Ok(())
    }

    /// Initial page load: sidebar, then the review.
    ///
    /// The review loads even when the structure request fails; that
    /// failure is returned afterwards.
    pub async fn open(&mut self) -> Result<(), WikiError> {
        let structure = self.load_structure().await;
        self.pane = Some(WikiPane::Structure);
        self.load_review().await;
        structure
    }
}
