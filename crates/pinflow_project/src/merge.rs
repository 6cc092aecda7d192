//! Patch merging - collapses all patches into one namespace
//!
//! Patches are folded in document order with a two-level shallow merge:
//! top-level keys are combined key by key, and for a key present in more
//! than one patch the inner maps are combined again one level deep. On an
//! id collision the later patch's entity replaces the earlier one while
//! keeping the earlier position. The patch's own `id` does not survive.

use crate::model::{Link, Node, Patch, Pin, Project};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The union of every patch in a project
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedPatch {
    nodes: IndexMap<String, Node>,
    pins: IndexMap<String, Pin>,
    links: IndexMap<String, Link>,
    extra: Map<String, Value>,
}

impl MergedPatch {
    /// Create an empty merged patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another patch into this one, later entries winning
    pub fn merge(&mut self, patch: &Patch) {
        let source = patch.id.as_deref().unwrap_or("<anonymous>");

        merge_entities(&mut self.nodes, &patch.nodes, "node", source);
        merge_entities(&mut self.pins, &patch.pins, "pin", source);
        merge_entities(&mut self.links, &patch.links, "link", source);

        for (key, incoming) in &patch.extra {
            if key == "id" {
                continue;
            }
            match self.extra.get_mut(key) {
                Some(existing) => merge_value(existing, incoming),
                None => {
                    self.extra.insert(key.clone(), incoming.clone());
                }
            }
        }
    }

    /// All nodes keyed by id
    pub fn nodes(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    /// All pin instances keyed by id
    pub fn pins(&self) -> &IndexMap<String, Pin> {
        &self.pins
    }

    /// All links keyed by id
    pub fn links(&self) -> &IndexMap<String, Link> {
        &self.links
    }

    /// Other merged top-level keys
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Get a pin instance by id
    pub fn pin_by_id(&self, id: &str) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get pin count
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Get link count
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

/// Merge every patch of the project in document order
pub fn merge_patches(project: &Project) -> MergedPatch {
    let merged = project
        .patches
        .values()
        .fold(MergedPatch::new(), |mut merged, patch| {
            merged.merge(patch);
            merged
        });

    log::debug!(
        "Merged {} patches: {} nodes, {} pins, {} links",
        project.patches.len(),
        merged.node_count(),
        merged.pin_count(),
        merged.link_count(),
    );

    merged
}

fn merge_entities<T: Clone>(
    target: &mut IndexMap<String, T>,
    incoming: &IndexMap<String, T>,
    kind: &str,
    source: &str,
) {
    for (id, entity) in incoming {
        if target.insert(id.clone(), entity.clone()).is_some() {
            log::debug!("Patch '{}' overrides {} '{}'", source, kind, id);
        }
    }
}

/// One-level merge: objects combine key by key, anything else is replaced
fn merge_value(existing: &mut Value, incoming: &Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                existing.insert(key.clone(), value.clone());
            }
        }
        (existing, incoming) => *existing = incoming.clone(),
    }
}
