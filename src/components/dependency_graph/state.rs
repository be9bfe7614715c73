//! Headless viewer state: layout simulation, view transform, and the
//! dispatch entry point for all interaction events.
//!
//! Nothing in this module touches the DOM, so the whole interaction model
//! runs under native `cargo test`.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::data;
use super::events::{ViewerAction, ViewerEvent};
use super::types::{Category, Entity, EntityDetail, Relationship};

pub const NODE_RADIUS: f64 = 20.0;
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 5.0;
/// Opacity applied to entities and edges outside the isolated neighborhood.
pub const DIMMED_ALPHA: f64 = 0.2;
/// Period of the operational re-roll timer.
pub const STATUS_PERIOD_MS: i32 = 3000;
/// Probability that a technology entity rolls operational on a status tick.
pub const OPERATIONAL_BIAS: f64 = 0.9;

const SEED_RING_RADIUS: f64 = 100.0;
/// Pointer movement below this many pixels still counts as a plain click.
const CLICK_SLOP: f64 = 3.0;

/// Per-node payload handed to the layout engine.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub catalog_idx: usize,
	pub name: &'static str,
	pub color: &'static str,
	pub icon: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// Membership sets for the double-click isolation mode. Binary: a node or
/// edge is either fully visible or dimmed to [`DIMMED_ALPHA`].
#[derive(Clone, Debug, Default)]
pub struct Isolation {
	pub nodes: HashSet<DefaultNodeIdx>,
	/// Positions into the edge table of edges incident to the isolated node.
	pub edges: HashSet<usize>,
}

pub struct DependencyGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub isolation: Option<Isolation>,
	/// Last clicked node, drawn above overlapping siblings.
	pub raised: Option<DefaultNodeIdx>,
	/// Operational flag per catalog entry; only technology entities ever
	/// hold a value.
	pub operational: Vec<Option<bool>>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	entities: &'static [Entity],
	relationships: &'static [Relationship],
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	suppress_click: bool,
}

impl DependencyGraphState {
	pub fn new(width: f64, height: f64) -> Self {
		Self::with_tables(data::ENTITIES, data::RELATIONSHIPS, width, height)
	}

	/// Build the simulation from explicit tables. Relationships with an
	/// endpoint that resolves to no entity are skipped with a warning
	/// rather than failing.
	pub fn with_tables(
		entities: &'static [Entity],
		relationships: &'static [Relationship],
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		for (i, entity) in entities.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / entities.len() as f64;
			let (x, y) = (
				(SEED_RING_RADIUS * angle.cos()) as f32,
				(SEED_RING_RADIUS * angle.sin()) as f32,
			);
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					catalog_idx: i,
					name: entity.name,
					color: entity.category.fill_color(),
					icon: data::icon(entity.id),
				},
			});
			id_to_idx.insert(entity.id, idx);
		}

		for rel in relationships {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(rel.source), id_to_idx.get(rel.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			} else {
				warn!(
					"skipping relationship with unresolvable endpoint: {} -> {}",
					rel.source, rel.target
				);
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			isolation: None,
			raised: None,
			operational: vec![None; entities.len()],
			width,
			height,
			animation_running: true,
			entities,
			relationships,
			suppress_click: false,
		}
	}

	/// All events funnel through here; see `events` for the vocabulary.
	pub fn dispatch(&mut self, event: ViewerEvent) -> ViewerAction {
		match event {
			ViewerEvent::PointerDown { x, y } => {
				if let Some(idx) = self.node_at_position(x, y) {
					self.drag = DragState {
						active: true,
						node_idx: Some(idx),
						start_x: x,
						start_y: y,
						moved: false,
					};
				} else {
					self.pan = PanState {
						active: true,
						start_x: x,
						start_y: y,
						transform_start_x: self.transform.x,
						transform_start_y: self.transform.y,
						moved: false,
					};
				}
			}
			ViewerEvent::PointerMove { x, y } => {
				if self.drag.active {
					if let Some(idx) = self.drag.node_idx {
						if (x - self.drag.start_x).abs() > CLICK_SLOP
							|| (y - self.drag.start_y).abs() > CLICK_SLOP
						{
							self.drag.moved = true;
						}
						let (gx, gy) = self.screen_to_graph(x, y);
						self.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.x = gx as f32;
								node.data.y = gy as f32;
								node.data.is_anchor = true;
							}
						});
					}
				} else if self.pan.active {
					if (x - self.pan.start_x).abs() > CLICK_SLOP
						|| (y - self.pan.start_y).abs() > CLICK_SLOP
					{
						self.pan.moved = true;
					}
					self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
					self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
				}
			}
			ViewerEvent::PointerUp | ViewerEvent::PointerLeave => {
				self.suppress_click =
					(self.drag.active && self.drag.moved) || (self.pan.active && self.pan.moved);
				self.release_drag();
				self.pan.active = false;
			}
			ViewerEvent::Click { x, y } => {
				if std::mem::take(&mut self.suppress_click) {
					return ViewerAction::None;
				}
				if let Some(idx) = self.node_at_position(x, y) {
					self.raised = Some(idx);
					if let Some(catalog_idx) = self.catalog_idx_of(idx) {
						return ViewerAction::OpenDetail(self.entity_detail(catalog_idx));
					}
				} else {
					self.isolation = None;
				}
			}
			ViewerEvent::DoubleClick { x, y } => {
				if let Some(idx) = self.node_at_position(x, y) {
					self.isolation = Some(self.closed_neighborhood(idx));
				}
			}
			ViewerEvent::Zoom { x, y, factor } => {
				let new_k = (self.transform.k * factor).clamp(MIN_SCALE, MAX_SCALE);
				let ratio = new_k / self.transform.k;
				self.transform.x = x - (x - self.transform.x) * ratio;
				self.transform.y = y - (y - self.transform.y) * ratio;
				self.transform.k = new_k;
			}
			ViewerEvent::Frame { dt } => {
				self.graph.update(dt);
			}
			ViewerEvent::StatusTick { rolls } => {
				let mut rolls = rolls.into_iter();
				for (i, entity) in self.entities.iter().enumerate() {
					if entity.category != Category::Technology {
						continue;
					}
					let Some(roll) = rolls.next() else { break };
					self.operational[i] = Some(roll);
				}
			}
		}
		ViewerAction::None
	}

	fn release_drag(&mut self) {
		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				// Unpin so the solver resumes free movement.
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
		}
		self.drag.active = false;
		self.drag.node_idx = None;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < NODE_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	fn catalog_idx_of(&self, idx: DefaultNodeIdx) -> Option<usize> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.catalog_idx);
			}
		});
		found
	}

	/// Overlay content for an entity: description, optional mitigation, and
	/// the names of everything connected to it in either direction, in
	/// relationship-table order.
	fn entity_detail(&self, catalog_idx: usize) -> EntityDetail {
		let entity = &self.entities[catalog_idx];
		let by_id = |id: &str| self.entities.iter().find(|e| e.id == id);
		let mut dependencies = Vec::new();
		for rel in self.relationships {
			let other = if rel.source == entity.id {
				by_id(rel.target)
			} else if rel.target == entity.id {
				by_id(rel.source)
			} else {
				None
			};
			if let Some(other) = other {
				dependencies.push(other.name.to_string());
			}
		}
		EntityDetail {
			name: entity.name.to_string(),
			description: entity.description.to_string(),
			risk_strategy: data::risk_strategy(entity.id).map(str::to_string),
			dependencies,
		}
	}

	/// The node itself plus everything one relationship edge away, and the
	/// incident edges.
	fn closed_neighborhood(&self, idx: DefaultNodeIdx) -> Isolation {
		let mut iso = Isolation::default();
		iso.nodes.insert(idx);
		for (pos, &(src, tgt)) in self.edges.iter().enumerate() {
			if src == idx || tgt == idx {
				iso.nodes.insert(src);
				iso.nodes.insert(tgt);
				iso.edges.insert(pos);
			}
		}
		iso
	}

	/// Resolvable edges in relationship-table order.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx)] {
		&self.edges
	}

	pub fn node_alpha(&self, idx: DefaultNodeIdx) -> f64 {
		match &self.isolation {
			Some(iso) if !iso.nodes.contains(&idx) => DIMMED_ALPHA,
			_ => 1.0,
		}
	}

	pub fn edge_alpha(&self, pos: usize) -> f64 {
		match &self.isolation {
			Some(iso) if !iso.edges.contains(&pos) => DIMMED_ALPHA,
			_ => 1.0,
		}
	}

	/// Whether the status ticker last rolled this entity non-operational.
	pub fn is_degraded(&self, catalog_idx: usize) -> bool {
		self.operational.get(catalog_idx).copied().flatten() == Some(false)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> DependencyGraphState {
		DependencyGraphState::new(800.0, 600.0)
	}

	fn idx_of(s: &DependencyGraphState, id: &str) -> DefaultNodeIdx {
		let catalog_idx = data::ENTITIES.iter().position(|e| e.id == id).unwrap();
		let mut found = None;
		s.graph.visit_nodes(|node| {
			if node.data.user_data.catalog_idx == catalog_idx {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	fn screen_pos(s: &DependencyGraphState, id: &str) -> (f64, f64) {
		let idx = idx_of(s, id);
		let mut pos = (0.0, 0.0);
		s.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = (node.x() as f64, node.y() as f64);
			}
		});
		(
			pos.0 * s.transform.k + s.transform.x,
			pos.1 * s.transform.k + s.transform.y,
		)
	}

	#[test]
	fn click_on_node_opens_detail_in_table_order() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "data-sharing");
		let action = s.dispatch(ViewerEvent::Click { x, y });
		let ViewerAction::OpenDetail(detail) = action else {
			panic!("expected detail overlay");
		};
		assert_eq!(detail.name, "Real-Time Data Sharing");
		assert_eq!(detail.risk_strategy, None);
		assert_eq!(
			detail.dependencies,
			[
				"AI-Driven Analytics",
				"IoT-Enabled Monitoring",
				"Blockchain for Data Integrity",
				"Healthcare Providers",
			]
		);
		assert_eq!(s.raised, Some(idx_of(&s, "data-sharing")));
	}

	#[test]
	fn click_on_ai_lists_data_sharing_and_risk_strategy() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "ai");
		let ViewerAction::OpenDetail(detail) = s.dispatch(ViewerEvent::Click { x, y }) else {
			panic!("expected detail overlay");
		};
		assert_eq!(
			detail.risk_strategy.as_deref(),
			Some("AI-Driven Threat Detection")
		);
		assert_eq!(detail.dependencies, ["Real-Time Data Sharing"]);
	}

	#[test]
	fn double_click_isolates_closed_neighborhood() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "cyber");
		assert_eq!(
			s.dispatch(ViewerEvent::DoubleClick { x, y }),
			ViewerAction::None
		);

		let iso = s.isolation.clone().expect("isolation mode engaged");
		let expected: HashSet<_> = ["cyber", "privacy", "it-specialists"]
			.iter()
			.map(|id| idx_of(&s, id))
			.collect();
		assert_eq!(iso.nodes, expected);
		// cyber -> privacy and cyber -> it-specialists
		assert_eq!(iso.edges, HashSet::from([4, 11]));

		let member = idx_of(&s, "privacy");
		let outsider = idx_of(&s, "providers");
		assert_eq!(s.node_alpha(member), 1.0);
		assert_eq!(s.node_alpha(outsider), DIMMED_ALPHA);
		assert_eq!(s.edge_alpha(4), 1.0);
		assert_eq!(s.edge_alpha(0), DIMMED_ALPHA);
	}

	#[test]
	fn empty_canvas_click_clears_isolation() {
		let mut s = state();
		let (x, y) = screen_pos(&s, "ai");
		let _ = s.dispatch(ViewerEvent::DoubleClick { x, y });
		assert!(s.isolation.is_some());

		// Far corner, no node within hit range.
		assert_eq!(
			s.dispatch(ViewerEvent::Click { x: 1.0, y: 1.0 }),
			ViewerAction::None
		);
		assert!(s.isolation.is_none());
		let any = idx_of(&s, "providers");
		assert_eq!(s.node_alpha(any), 1.0);
		assert_eq!(s.edge_alpha(0), 1.0);
	}

	#[test]
	fn drag_pins_node_to_pointer_and_releases_on_drag_end() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		let (x, y) = screen_pos(&s, "iot");
		let idx = idx_of(&s, "iot");

		let _ = s.dispatch(ViewerEvent::PointerDown { x, y });
		assert!(s.drag.active);
		let _ = s.dispatch(ViewerEvent::PointerMove { x: 333.0, y: 222.0 });

		let mut pinned = None;
		s.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = Some((node.x() as f64, node.y() as f64, node.data.is_anchor));
			}
		});
		let (px, py, anchored) = pinned.unwrap();
		assert!(anchored);
		assert!((px - 333.0).abs() < 0.001 && (py - 222.0).abs() < 0.001);

		let _ = s.dispatch(ViewerEvent::PointerUp);
		let mut anchored = true;
		s.graph.visit_nodes(|node| {
			if node.index() == idx {
				anchored = node.data.is_anchor;
			}
		});
		assert!(!anchored);

		// The mouseup is followed by a browser click; a real drag must not
		// pop the overlay.
		assert_eq!(
			s.dispatch(ViewerEvent::Click { x: 333.0, y: 222.0 }),
			ViewerAction::None
		);
	}

	#[test]
	fn background_drag_pans_the_view() {
		let mut s = state();
		let (tx, ty) = (s.transform.x, s.transform.y);
		let _ = s.dispatch(ViewerEvent::PointerDown { x: 5.0, y: 5.0 });
		assert!(s.pan.active && !s.drag.active);
		let _ = s.dispatch(ViewerEvent::PointerMove { x: 45.0, y: 25.0 });
		assert_eq!((s.transform.x, s.transform.y), (tx + 40.0, ty + 20.0));
		let _ = s.dispatch(ViewerEvent::PointerUp);
		assert!(!s.pan.active);
	}

	#[test]
	fn zoom_scale_clamps_to_range() {
		let mut s = state();
		let _ = s.dispatch(ViewerEvent::Zoom { x: 400.0, y: 300.0, factor: 10.0 });
		assert_eq!(s.transform.k, MAX_SCALE);
		let _ = s.dispatch(ViewerEvent::Zoom { x: 400.0, y: 300.0, factor: 10.0 });
		assert_eq!(s.transform.k, MAX_SCALE);
		let _ = s.dispatch(ViewerEvent::Zoom { x: 400.0, y: 300.0, factor: 0.001 });
		assert_eq!(s.transform.k, MIN_SCALE);
	}

	#[test]
	fn zoom_is_anchored_at_the_pointer() {
		let mut s = state();
		s.transform = ViewTransform { x: 0.0, y: 0.0, k: 1.0 };
		let _ = s.dispatch(ViewerEvent::Zoom { x: 100.0, y: 50.0, factor: 2.0 });
		// The graph point under the pointer stays under the pointer.
		let (gx, gy) = s.screen_to_graph(100.0, 50.0);
		assert!((gx - 100.0).abs() < 0.001 && (gy - 50.0).abs() < 0.001);
	}

	#[test]
	fn status_tick_targets_technology_entities_only() {
		let mut s = state();
		let rolls = vec![true, false, true, true, false];
		let _ = s.dispatch(ViewerEvent::StatusTick { rolls });

		for (i, entity) in data::ENTITIES.iter().enumerate() {
			match entity.category {
				Category::Technology => assert!(s.operational[i].is_some(), "{}", entity.id),
				_ => assert!(s.operational[i].is_none(), "{}", entity.id),
			}
		}
		let iot = data::ENTITIES.iter().position(|e| e.id == "iot").unwrap();
		assert_eq!(s.operational[iot], Some(false));
		assert!(s.is_degraded(iot));

		let _ = s.dispatch(ViewerEvent::StatusTick {
			rolls: vec![true; 5],
		});
		assert_eq!(s.operational[iot], Some(true));
		assert!(!s.is_degraded(iot));
	}

	#[test]
	fn frames_advance_the_layout() {
		let mut s = state();
		let before = screen_pos(&s, "ai");
		for _ in 0..10 {
			let _ = s.dispatch(ViewerEvent::Frame { dt: 0.016 });
		}
		let after = screen_pos(&s, "ai");
		assert_ne!(before, after);
	}

	#[test]
	fn unresolvable_relationship_is_skipped_not_fatal() {
		static ENTITIES: &[Entity] = &[
			Entity {
				id: "a",
				name: "A",
				description: "first",
				category: Category::Technology,
			},
			Entity {
				id: "b",
				name: "B",
				description: "second",
				category: Category::Process,
			},
		];
		static RELATIONSHIPS: &[Relationship] = &[
			Relationship { source: "a", target: "b" },
			Relationship { source: "a", target: "ghost" },
		];
		let s = DependencyGraphState::with_tables(ENTITIES, RELATIONSHIPS, 800.0, 600.0);
		assert_eq!(s.edges().len(), 1);
	}
}
