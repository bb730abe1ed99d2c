//! Terminal renderer: styled flowing text, one block after another.

use colored::{ColoredString, Colorize};

use crate::output::ViewRenderer;
use crate::view::{Badge, Block, Tile, Tone, TreeDir, View};

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl ViewRenderer for TerminalRenderer {
    fn render(&self, view: &View) -> String {
        let mut output = String::new();
        for block in &view.blocks {
            render_block(&mut output, block, "");
        }
        output
    }
}

fn render_block(out: &mut String, block: &Block, indent: &str) {
    match block {
        Block::Breadcrumb { text } => {
            out.push_str(&format!("{indent}{} {}\n", "›".dimmed(), text.dimmed()));
        }
        Block::Title { text } => {
            out.push_str(&format!("{indent}{}\n\n", text.bold()));
        }
        Block::Heading { text } => {
            out.push_str(&format!("\n{indent}{}\n", text.cyan().bold()));
        }
        Block::Paragraph { text } => {
            for line in text.lines() {
                out.push_str(&format!("{indent}{line}\n"));
            }
        }
        Block::Notice { tone, text } => {
            out.push_str(&format!("{indent}{} {}\n", tone_icon(*tone), tinted(text, *tone)));
        }
        Block::List { label, items } => {
            if let Some(label) = label {
                out.push_str(&format!("{indent}{}\n", label.dimmed()));
            }
            for item in items {
                out.push_str(&format!("{indent}  {} {item}\n", "•".dimmed()));
            }
        }
        Block::Panel {
            title,
            meta,
            badge,
            children,
        } => {
            out.push_str(&format!("{indent} {} {}", "▸".cyan(), title.bold()));
            if let Some(meta) = meta {
                out.push_str(&format!("  {}", meta.dimmed()));
            }
            out.push('\n');
            let inner = format!("{indent}   ");
            for child in children {
                render_block(out, child, &inner);
            }
            if let Some(badge) = badge {
                out.push_str(&format!("{inner}{}\n", badge_text(badge)));
            }
            out.push('\n');
        }
        Block::Code { text } => {
            for line in text.lines() {
                out.push_str(&format!("{indent}{} {line}\n", "│".dimmed()));
            }
            if text.is_empty() {
                out.push_str(&format!("{indent}{}\n", "│".dimmed()));
            }
        }
        Block::Svg { markup } => {
            out.push_str(markup);
            if !markup.ends_with('\n') {
                out.push('\n');
            }
        }
        Block::Tree { dirs } => render_tree(out, dirs, indent),
        Block::Grid { tiles } => render_grid(out, tiles, indent),
    }
}

fn render_tree(out: &mut String, dirs: &[TreeDir], indent: &str) {
    for dir in dirs {
        out.push_str(&format!("{indent}{}\n", dir.label.to_uppercase().dimmed()));
        for leaf in &dir.files {
            out.push_str(&format!("{indent}  {}", leaf.name));
            if leaf.has_error {
                out.push_str(&format!(" {}", badge_text(&Badge::error())));
            }
            out.push('\n');
        }
        out.push('\n');
    }
}

fn render_grid(out: &mut String, tiles: &[Tile], indent: &str) {
    for tile in tiles {
        match tile {
            Tile::Add { hint } => {
                out.push_str(&format!("{indent} {} {}\n", "+".green().bold(), "Add repository".bold()));
                out.push_str(&format!("{indent}   {}\n\n", hint.dimmed()));
            }
            Tile::Repo(card) => {
                out.push_str(&format!(
                    "{indent} {} {}  {}\n",
                    "▸".cyan(),
                    card.name.bold(),
                    badge_text(&card.badge)
                ));
                if !card.path.is_empty() {
                    out.push_str(&format!("{indent}   {}\n", card.path));
                }
                out.push_str(&format!("{indent}   {}\n", card.stats.dimmed()));
                out.push_str(&format!("{indent}   {} {}\n", "➜".cyan(), card.url));
                out.push_str(&format!("{indent}   {} {}\n\n", "✕".dimmed(), card.delete_hint.dimmed()));
            }
        }
    }
}

fn tone_icon(tone: Tone) -> ColoredString {
    match tone {
        Tone::Error => "✖".red().bold(),
        Tone::Warning => "⚠".yellow().bold(),
        Tone::Success => "✔".green().bold(),
        Tone::Info => "ℹ".blue().bold(),
        Tone::Neutral => "•".normal(),
    }
}

fn tinted(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Error => text.red(),
        Tone::Warning => text.yellow(),
        Tone::Success => text.green(),
        Tone::Info => text.blue(),
        Tone::Neutral => text.normal(),
    }
}

fn badge_text(badge: &Badge) -> ColoredString {
    let label = format!("[{}]", badge.text);
    match badge.tone {
        Tone::Error => label.red().bold(),
        Tone::Warning => label.yellow().bold(),
        Tone::Success => label.green().bold(),
        Tone::Info => label.blue().bold(),
        Tone::Neutral => label.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FileEntry, Issue, RepoDescriptor, RepoSource, RepoStructure, RepoSummary, ReviewResult, Severity,
    };
    use crate::view::render_grid as grid_view;
    use crate::view::wiki::{review_view, structure_view};

    #[test]
    fn render_empty() {
        assert_eq!(TerminalRenderer.render(&View::new()), "");
    }

    #[test]
    fn render_grid_cards() {
        let repos = vec![RepoDescriptor {
            id: "x1".into(),
            name: "proj".into(),
            path: "proj".into(),
            summary: Some(RepoSummary {
                processed: Some(5),
                failed: Some(1),
            }),
            source: RepoSource::Local,
        }];
        let output = TerminalRenderer.render(&grid_view(&repos, "http://127.0.0.1:5000"));
        assert!(output.contains("Add repository"));
        assert!(output.contains("proj"));
        assert!(output.contains("Processed: 5, Failed: 1"));
        assert!(output.contains("[Local]"));
        assert!(output.contains("http://127.0.0.1:5000/repo/x1"));
        assert!(output.contains("codewiki remove x1"));
        assert!(output.find("Add repository") < output.find("Processed"));
    }

    #[test]
    fn render_tree_with_error_badge() {
        let view = structure_view(&RepoStructure {
            files: vec![FileEntry {
                path: "a/b.py".into(),
                has_error: true,
            }],
            error: None,
        });
        let output = TerminalRenderer.render(&view);
        assert!(output.contains("b.py"));
        assert!(output.contains("[ERROR]"));
    }

    #[test]
    fn render_review_issue() {
        let view = review_view(&ReviewResult {
            summary: Some("One problem.".into()),
            issues: vec![Issue {
                title: Some("Unused import".into()),
                severity: Severity::Style,
                file: Some("app.py".into()),
                line: Some(3),
                suggestion: Some("Remove it".into()),
            }],
            error: None,
        });
        let output = TerminalRenderer.render(&view);
        assert!(output.contains("AI Review for this repository"));
        assert!(output.contains("Unused import"));
        assert!(output.contains("app.py (line 3)"));
        assert!(output.contains("Remove it"));
        assert!(output.contains("[STYLE]"));
    }

    #[test]
    fn render_code_block_lines() {
        let mut view = View::new();
        view.push(Block::Code {
            text: "digraph {\n  a -> b\n}".into(),
        });
        let output = TerminalRenderer.render(&view);
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("a -> b"));
    }
}
