use crate::output::EventRecord;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use photonsim_data::{Category, TrackId};
use std::collections::HashMap;

/// A categorized track in the forest.
pub struct CategoryNode {
    pub track_id: TrackId,
    pub category: Category,
    pub sub_id: i32,
    pub particle_name: String,
    /// Photons whose innermost label is this track.
    pub photon_count: usize,
}

/// Categorized tracks of one event linked by category parent.
pub struct CategoryForest {
    pub graph: DiGraph<CategoryNode, ()>,
    id_map: HashMap<TrackId, NodeIndex>,
}

impl Default for CategoryForest {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryForest {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_map: HashMap::new(),
        }
    }

    /// Builds the forest from an exported event.
    ///
    /// # Parameters
    /// - `record`: The event whose categorized tracks become nodes
    ///
    /// # Returns
    /// A forest with one edge per category-parent link, photon counts taken
    /// from the record's label groups.
    pub fn build(record: &EventRecord) -> Self {
        let mut forest = Self::new();

        let mut photon_counts: HashMap<TrackId, usize> = HashMap::new();
        for label in &record.labels {
            *photon_counts.entry(label.track_id).or_insert(0) += label.photon_indices.len();
        }

        for track in &record.tracks {
            let Some(category) = Category::from_code(track.category) else {
                continue;
            };
            if !category.is_categorized() {
                continue;
            }
            let idx = forest.graph.add_node(CategoryNode {
                track_id: track.track_id,
                category,
                sub_id: track.sub_id,
                particle_name: track.particle_name.clone(),
                photon_count: photon_counts.get(&track.track_id).copied().unwrap_or(0),
            });
            forest.id_map.insert(track.track_id, idx);
        }

        for track in &record.tracks {
            if let (Some(&p_idx), Some(&c_idx)) = (
                forest.id_map.get(&track.category_parent_track_id),
                forest.id_map.get(&track.track_id),
            ) {
                if p_idx != c_idx {
                    forest.graph.add_edge(p_idx, c_idx, ());
                }
            }
        }

        forest
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Tracks with no categorized parent in this event.
    pub fn roots(&self) -> Vec<TrackId> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].track_id)
            .collect()
    }

    /// Categorized children of `id`, sorted by track id.
    pub fn children(&self, id: TrackId) -> Vec<TrackId> {
        let Some(&idx) = self.id_map.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<TrackId> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|c| self.graph[c].track_id)
            .collect();
        children.sort_unstable();
        children
    }

    /// Export the forest to Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph Genealogy {\n");
        dot.push_str("  node [shape=box, style=filled, fontname=\"Arial\"];\n");

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let color = match node.category {
                Category::Primary => "#ffcdd2",
                Category::DecayElectron => "#c8e6c9",
                Category::SecondaryPion => "#bbdefb",
                Category::GammaShower => "#fff9c4",
                Category::Uncategorized => "#eeeeee",
            };
            dot.push_str(&format!(
                "  \"{}\" [label=\"{} #{} ({})\\nPhotons: {}\", fillcolor=\"{}\"];\n",
                node.track_id,
                node.category.name(),
                node.sub_id,
                node.particle_name,
                node.photon_count,
                color
            ));
        }

        for edge in self.graph.edge_indices() {
            if let Some((from, to)) = self.graph.edge_endpoints(edge) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\";\n",
                    self.graph[from].track_id, self.graph[to].track_id
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }
}
