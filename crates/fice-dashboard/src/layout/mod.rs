//! Layout system for the dashboard.
//!
//! A layout is the ordered list of widgets (each with a collapsed flag)
//! that determines what the dashboard shows. Role defaults come from
//! [`model`], persistence from [`store`], and drag-and-drop moves from
//! [`reorder`].

pub mod model;
pub mod reorder;
pub mod store;

pub use model::{
    default_layout, default_layout_for_role, DashboardLayout, WidgetKey, WidgetState,
    LAYOUT_VERSION,
};
pub use reorder::{array_move, reorder};
pub use store::{LayoutStore, LAYOUT_KEY};
