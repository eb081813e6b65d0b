//! Hook system for extension points.
//!
//! Hooks are named extension points declared by the host (or by an extension
//! during registration). Extensions attach handlers to them; the render layer
//! runs them in one of three modes:
//!
//! - **series**: every handler in registration order, results collected
//! - **waterfall**: each handler receives the previous handler's output
//! - **parallel**: all handlers started together, the run waits for all

mod handler;
mod registry;

pub use handler::{HookHandler, HookInput};
pub use registry::{Hook, HookRegistry};

/// Hooks the admin shell creates in `bootstrap_admin`.
pub mod names {
    /// Add columns to the content manager list view table.
    pub const INJECT_COLUMN_IN_TABLE: &str = "Admin/CM/pages/ListView/inject-column-in-table";
    /// Alter the collection type links in the content manager sidebar.
    pub const MUTATE_COLLECTION_TYPES_LINKS: &str =
        "Admin/CM/pages/App/mutate-collection-types-links";
    /// Alter the single type links in the content manager sidebar.
    pub const MUTATE_SINGLE_TYPES_LINKS: &str = "Admin/CM/pages/App/mutate-single-types-links";
    /// Alter the edit view layout.
    pub const MUTATE_EDIT_VIEW_LAYOUT: &str = "Admin/CM/pages/EditView/mutate-edit-view-layout";

    /// All built-in hook names, in creation order.
    pub const BUILTIN: &[&str] = &[
        INJECT_COLUMN_IN_TABLE,
        MUTATE_COLLECTION_TYPES_LINKS,
        MUTATE_SINGLE_TYPES_LINKS,
        MUTATE_EDIT_VIEW_LAYOUT,
    ];
}
