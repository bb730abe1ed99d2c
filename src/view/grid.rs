//! Home grid: the add tile followed by one card per cached repository.
//!
//! The same function renders the full list and search results.

use serde::Serialize;

use super::{Badge, Block, View};
use crate::client::repo_page_url;
use crate::constants::APP_NAME;
use crate::models::RepoDescriptor;

/// Entry in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tile", rename_all = "snake_case")]
pub enum Tile {
    /// The static "add a repository" tile. Always first.
    Add { hint: String },
    Repo(RepoCard),
}

/// One cached repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoCard {
    pub id: String,
    pub name: String,
    pub path: String,
    /// `Processed: N, Failed: M`
    pub stats: String,
    pub badge: Badge,
    /// Web view of the repository's wiki page.
    pub url: String,
    /// Command that removes this card.
    pub delete_hint: String,
}

impl RepoCard {
    pub fn new(repo: &RepoDescriptor, base_url: &str) -> Self {
        Self {
            id: repo.id.clone(),
            name: repo.name.clone(),
            path: repo.path.clone(),
            stats: format!("Processed: {}, Failed: {}", repo.processed(), repo.failed()),
            badge: Badge::source(repo.source),
            url: repo_page_url(base_url, &repo.id),
            delete_hint: format!("{APP_NAME} remove {}", repo.id),
        }
    }
}

/// Grid view for `repos`, in list order.
pub fn render_grid(repos: &[RepoDescriptor], base_url: &str) -> View {
    let mut tiles = Vec::with_capacity(repos.len() + 1);
    tiles.push(Tile::Add {
        hint: format!("{APP_NAME} add local <dir>  |  {APP_NAME} add git <url>"),
    });
    tiles.extend(repos.iter().map(|r| Tile::Repo(RepoCard::new(r, base_url))));

    let mut view = View::new();
    view.push(Block::Grid { tiles });
    view
}

/// Confirmation question asked before removing a card.
pub fn delete_prompt(name: &str) -> String {
    format!("Remove repo \"{name}\" from the list?")
}
