//! Domain types for the ecosystem dependency graph.

/// Which part of the ecosystem an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Technology,
	Process,
	Human,
}

impl Category {
	/// Fill color for the node circle.
	pub fn fill_color(self) -> &'static str {
		match self {
			Category::Technology => "#3498db",
			Category::Process => "#2ecc71",
			Category::Human => "#e74c3c",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Category::Technology => "Technology",
			Category::Process => "Process",
			Category::Human => "Human",
		}
	}
}

/// A node in the diagram: a technology, process, or human actor.
///
/// Entities are static after load; only their layout position and (for
/// technology entities) the operational flag ever change.
#[derive(Clone, Copy, Debug)]
pub struct Entity {
	pub id: &'static str,
	pub name: &'static str,
	pub description: &'static str,
	pub category: Category,
}

/// A directed dependency edge between two entities, by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relationship {
	pub source: &'static str,
	pub target: &'static str,
}

/// Everything the detail overlay shows for a clicked entity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDetail {
	pub name: String,
	pub description: String,
	/// Omitted from the overlay when no mitigation is registered.
	pub risk_strategy: Option<String>,
	/// Names of entities connected in either direction, in the encounter
	/// order of the relationship table. Duplicate relationships would
	/// produce duplicate names.
	pub dependencies: Vec<String>,
}
