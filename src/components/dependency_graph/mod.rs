//! Interactive force-directed viewer for the healthcare-technology
//! ecosystem dependency graph.

mod component;
mod data;
mod detail;
mod events;
mod render;
mod state;
mod types;

pub use component::DependencyGraphCanvas;
pub use types::{Category, Entity, EntityDetail, Relationship};
