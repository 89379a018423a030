//! Layered DAG rendering of an agent run: root normalization, rank
//! assignment, grid layout, pan/zoom viewport, minimap, and the node
//! inspector.

mod component;
mod inspector;
mod layout;
mod minimap;
mod normalize;
mod rank;
pub mod text;
mod types;
mod viewport;

pub use component::{GraphCanvas, Minimap, Scene};
pub(crate) use component::window_size;
pub use inspector::InspectorPanel;
pub use layout::{Layout, content_bounds};
pub use normalize::{ROOT_ID, with_root};
pub use rank::compute_ranks;
pub use types::{Bounds, Graph, Node, NormalizedGraph, Point, ToolCall};
pub use viewport::Viewport;
