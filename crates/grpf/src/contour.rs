//! Contour tracing and winding-number classification.
//!
//! After refinement, the candidate edges cluster into connected components,
//! one per suspected zero or pole. The discrete argument principle is then
//! applied to the boundary of each component's candidate-triangle union: the
//! quantized phase jumps summed along that closed boundary equal four times
//! the winding number of f around the enclosed point.

use std::collections::{HashMap, HashSet};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use grpf_core::signed_jump;
use grpf_geometry::{MeshStore, MeshTriangle};

use crate::select::edge_to_triangles;

/// A classified candidate region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Arithmetic mean of the region's candidate-edge endpoints, in user
    /// coordinates.
    pub location: Complex64,
    /// Quantized winding number: positive for roots, negative for poles;
    /// magnitude above one marks co-located zeros or poles.
    pub winding: i32,
    /// Vertex identities of the candidate-edge endpoints, sorted.
    pub vertices: Vec<usize>,
}

/// Groups candidate edges into regions and classifies each by its winding
/// number. Regions whose winding comes out zero are dropped as false
/// positives of a too-coarse sampling.
///
/// Regions are emitted in discovery order, which is stable for a given mesh
/// (components are grown from the sorted candidate-edge list).
#[must_use]
pub fn classify_regions(
    store: &MeshStore,
    triangles: &[MeshTriangle],
    candidate_edges: &[(usize, usize)],
) -> Vec<Region> {
    if candidate_edges.is_empty() {
        return Vec::new();
    }

    let adjacency = edge_to_triangles(triangles);
    let mut regions = Vec::new();

    for component in connected_components(candidate_edges) {
        // Every triangle attached to one of the component's reversal edges.
        let mut seen = HashSet::new();
        let mut region_triangles = Vec::new();
        for edge in &component {
            if let Some(incident) = adjacency.get(edge) {
                for &t in incident {
                    if seen.insert(t) {
                        region_triangles.push(t);
                    }
                }
            }
        }

        let boundary = boundary_edges(&region_triangles, triangles);
        let total = directed_phase_sum(store, &boundary);

        if total.rem_euclid(4) != 0 {
            log::debug!("region phase sum {total} is not a multiple of four");
        }
        #[allow(clippy::cast_possible_truncation)]
        let winding = (f64::from(total) / 4.0).round() as i32;
        if winding == 0 {
            continue;
        }

        let mut vertices: Vec<usize> = component
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        vertices.sort_unstable();

        #[allow(clippy::cast_precision_loss)]
        let location = vertices
            .iter()
            .map(|&v| store.user_position(v))
            .sum::<Complex64>()
            / vertices.len() as f64;

        regions.push(Region {
            location,
            winding,
            vertices,
        });
    }

    regions
}

/// Splits the candidate-edge graph into connected components, each returned
/// as its list of edges. Components come out in first-seen order of the
/// input list.
fn connected_components(edges: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, &(a, b)) in edges.iter().enumerate() {
        incident.entry(a).or_default().push(index);
        incident.entry(b).or_default().push(index);
    }

    let mut assigned = vec![false; edges.len()];
    let mut components = Vec::new();

    for start in 0..edges.len() {
        if assigned[start] {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = vec![start];
        assigned[start] = true;
        while let Some(index) = queue.pop() {
            component.push(edges[index]);
            let (a, b) = edges[index];
            for vertex in [a, b] {
                for &other in &incident[&vertex] {
                    if !assigned[other] {
                        assigned[other] = true;
                        queue.push(other);
                    }
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }

    components
}

/// Edges of the region's triangle union that are used by exactly one region
/// triangle: the closed boundary of the region.
fn boundary_edges(
    region_triangles: &[usize],
    triangles: &[MeshTriangle],
) -> Vec<(usize, usize)> {
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for &t in region_triangles {
        for key in triangles[t].edge_keys() {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    let mut boundary: Vec<(usize, usize)> = counts
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(key, _)| key)
        .collect();
    boundary.sort_unstable();
    boundary
}

/// Sums the signed quantized phase jumps along the boundary, traversed as
/// closed loops oriented counter-clockwise.
///
/// The boundary of a triangle union has even degree at every vertex, so it
/// decomposes into closed walks; each walk is pinched into simple loops and
/// each loop's contribution is negated when the traversal came out
/// clockwise (by signed area in mapped coordinates).
fn directed_phase_sum(store: &MeshStore, boundary: &[(usize, usize)]) -> i32 {
    let mut incident: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for (index, &(a, b)) in boundary.iter().enumerate() {
        incident.entry(a).or_default().push((b, index));
        incident.entry(b).or_default().push((a, index));
    }

    let mut used = vec![false; boundary.len()];
    let mut total = 0;

    for start_index in 0..boundary.len() {
        if used[start_index] {
            continue;
        }
        let start = boundary[start_index].0;
        let mut walk = vec![start];
        let mut current = start;
        loop {
            let next = incident[&current]
                .iter()
                .find(|&&(_, edge)| !used[edge])
                .copied();
            let Some((next_vertex, edge)) = next else {
                break;
            };
            used[edge] = true;
            walk.push(next_vertex);
            current = next_vertex;
            if current == start && incident[&current].iter().all(|&(_, e)| used[e]) {
                break;
            }
        }

        for cycle in simple_loops(&walk) {
            let mut sum = 0;
            for i in 0..cycle.len() {
                let from = cycle[i];
                let to = cycle[(i + 1) % cycle.len()];
                if let Some(jump) = signed_jump(store.quadrant(from), store.quadrant(to)) {
                    sum += jump;
                }
            }
            if signed_area(store, &cycle) < 0.0 {
                sum = -sum;
            }
            total += sum;
        }
    }

    total
}

/// Pinches a closed walk into simple loops: whenever a vertex repeats, the
/// vertices since its first occurrence form one loop and are popped.
fn simple_loops(walk: &[usize]) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();

    for &v in walk {
        if let Some(&at) = position.get(&v) {
            let cycle = stack.split_off(at);
            for u in &cycle {
                position.remove(u);
            }
            position.insert(v, stack.len());
            stack.push(v);
            if cycle.len() >= 3 {
                loops.push(cycle);
            }
        } else {
            position.insert(v, stack.len());
            stack.push(v);
        }
    }

    loops
}

/// Twice-signed-area shoelace sum over mapped positions; positive means the
/// loop runs counter-clockwise.
fn signed_area(store: &MeshStore, cycle: &[usize]) -> f64 {
    let mut area = 0.0;
    for i in 0..cycle.len() {
        let p = store.mapped_position(cycle[i]);
        let q = store.mapped_position(cycle[(i + 1) % cycle.len()]);
        area += p.x * q.y - q.x * p.y;
    }
    area
}
