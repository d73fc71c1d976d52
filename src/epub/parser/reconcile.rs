use crate::epub::chapter::ChapterPage;
use crate::epub::manifest::Manifest;
use crate::epub::parser::EpubParser;
use crate::epub::spine::Spine;
use crate::epub::toc::{NavNode, NavTree};
use crate::errors::IngestResult;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::OnceLock;

impl EpubParser<'_> {
    /// Merges spine order with navigation titles into the ordered chapter list.
    ///
    /// Spine items whose file has no navigation entry (such as an untitled
    /// cover page) do not become chapters.
    pub(super) fn reconcile(
        &self,
        manifest: &Manifest,
        spine: &Spine,
        toc: &NavTree,
    ) -> IngestResult<Vec<ChapterPage>> {
        let nav_map = nav_map(toc);
        let mut chapters: Vec<ChapterPage> = Vec::new();

        for entry in spine {
            let Some(item) = manifest.by_id(entry.idref()) else {
                log::warn!("Skipping spine entry `{}` not found in the manifest", entry.idref());
                continue;
            };
            let Some(node) = nav_map.get(item.path()) else {
                log::warn!("Skipping spine item `{}` without a navigation entry", item.path());
                continue;
            };

            let previous_order = chapters.last().map(ChapterPage::order);
            if previous_order.is_some_and(|previous| previous >= node.play_order()) {
                log::warn!(
                    "Chapter `{}` has play order {} out of sequence",
                    item.path(),
                    node.play_order(),
                );
            }

            log::debug!("Adding chapter `{}` as `{}`", item.path(), node.title());
            chapters.push(ChapterPage {
                idref: item.id().to_owned(),
                href: item.href().to_owned(),
                path: item.path().to_owned(),
                order: node.play_order(),
                title: node.title().to_owned(),
                content: self.read_asset(item.path())?,
                sanitized: OnceLock::new(),
            });
        }
        Ok(chapters)
    }
}

/// Maps archive paths to navigation nodes, points before targets.
///
/// When several nodes point to the same file (differing only by fragment),
/// the first node wins.
fn nav_map(toc: &NavTree) -> HashMap<&str, &NavNode> {
    let mut map = HashMap::new();

    for node in toc.points().chain(toc.targets()) {
        if node.path().is_empty() {
            continue;
        }
        match map.entry(node.path()) {
            Entry::Vacant(entry) => {
                log::debug!("Adding `{}` to the navigation map", node.path());
                entry.insert(node);
            }
            Entry::Occupied(_) => {
                log::warn!(
                    "Skipping navigation entry `{}` as its file is already mapped",
                    node.href()
                );
            }
        }
    }
    map
}
