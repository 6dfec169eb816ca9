// src/render/target.rs
// =============================================================================
// Where rendered markup ends up.
//
// The renderer only builds strings. This is the one place that performs the
// write, and it happens once per run:
// - Stdout: print the fragment
// - File: write the fragment to a file
// - Container: replace the children of the element with a given id inside an
//   existing HTML page, leaving the rest of the page untouched
//
// Container replacement works on the parsed document, not on the raw text.
// Comments, <script> bodies and attribute values can contain anything that
// looks like a tag, and only the parser knows which tags are real.
//
// Rust concepts used:
// - scraper's Html keeps the DOM in a `tree` field (an ego-tree Tree)
// - Node ids are plain copyable handles, so we can collect them first and
//   mutate the tree afterwards without fighting the borrow checker
// =============================================================================

use anyhow::{anyhow, Context, Result};
use scraper::{Html, Selector};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    Stdout,
    File(PathBuf),
    Container { page: PathBuf, id: String },
}

impl RenderTarget {
    pub fn write(&self, markup: &str) -> Result<()> {
        match self {
            RenderTarget::Stdout => {
                println!("{}", markup);
            }
            RenderTarget::File(path) => {
                fs::write(path, markup)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "wrote gallery fragment");
            }
            RenderTarget::Container { page, id } => {
                let html = fs::read_to_string(page)
                    .with_context(|| format!("Failed to read {}", page.display()))?;
                // Built completely before the file is touched
                let updated = replace_container(&html, id, markup)?;
                fs::write(page, updated)
                    .with_context(|| format!("Failed to write {}", page.display()))?;
                tracing::info!(page = %page.display(), container = %id, "updated gallery container");
            }
        }
        Ok(())
    }
}

/// Replaces the children of the element whose id is `id` with `markup`,
/// and serializes the whole page again.
pub fn replace_container(page: &str, id: &str, markup: &str) -> Result<String> {
    let mut document = Html::parse_document(page);

    let css = format!("[id=\"{}\"]", id);
    let selector =
        Selector::parse(&css).map_err(|e| anyhow!("Invalid container id '{}': {:?}", id, e))?;

    // Only the id is kept, so the immutable borrow from select() ends here
    let container = document
        .select(&selector)
        .next()
        .map(|element| element.id())
        .ok_or_else(|| anyhow!("No element with id '{}' in page", id))?;

    // Detach the old children
    let old_children: Vec<_> = document
        .tree
        .get(container)
        .map(|node| node.children().map(|child| child.id()).collect())
        .unwrap_or_default();
    for child in old_children {
        if let Some(mut node) = document.tree.get_mut(child) {
            node.detach();
        }
    }

    // Parse the markup as a body fragment; its nodes hang off a wrapper <html>
    let fragment = Html::parse_fragment(markup);

    // Copy the fragment's nodes under the container, depth first.
    // Each entry pairs a source node with the node its children go under.
    let mut pending = vec![(fragment.root_element().id(), container)];
    while let Some((source, parent)) = pending.pop() {
        let Some(source_node) = fragment.tree.get(source) else {
            continue;
        };
        for child in source_node.children() {
            let Some(mut parent_node) = document.tree.get_mut(parent) else {
                continue;
            };
            let copied = parent_node.append(child.value().clone()).id();
            pending.push((child.id(), copied));
        }
    }

    Ok(document.html())
}
