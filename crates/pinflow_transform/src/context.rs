//! Resolution context shared by the type and link resolvers
//!
//! Built once per transform: the merged patch plus a borrow of the project
//! for its node type table.

use pinflow_project::{merge_patches, MergedPatch, NodeType, Project};

/// Merged view of a project used for all lookups
#[derive(Clone, Debug)]
pub struct ProjectContext<'a> {
    pub(crate) project: &'a Project,
    pub(crate) merged: MergedPatch,
    /// Stand-in for node types that cannot be found
    pub(crate) empty_node_type: NodeType,
}

impl<'a> ProjectContext<'a> {
    /// Merge the project's patches and build the context
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            merged: merge_patches(project),
            empty_node_type: NodeType::default(),
        }
    }

    /// The source project
    pub fn project(&self) -> &'a Project {
        self.project
    }

    /// The merged patch
    pub fn merged(&self) -> &MergedPatch {
        &self.merged
    }
}
