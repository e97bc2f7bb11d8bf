use crate::grid::{Grid, NodeId};
use crate::hash_table::HashTable;
use log::debug;

/// Reveal every concealed obstacle within `radius` (Euclidean, inclusive)
/// of `center`.
///
/// Returns the nodes revealed by this call mapped to their class. Cells that
/// are already discovered or are not hidden obstacles are left untouched, so
/// a second call with the same arguments returns an empty table.
pub fn discover_around(grid: &mut Grid, center: NodeId, radius: f64) -> HashTable<NodeId, u32> {
    let mut revealed = HashTable::new();
    if grid.cols == 0 || grid.rows == 0 || radius.is_nan() || radius < 0.0 {
        return revealed;
    }

    let origin = grid.position(center);
    let cx = origin.x as f64;
    let cy = origin.y as f64;

    // Bounding box clipped to the grid
    let min_x = (cx - radius).floor().max(0.0) as i32;
    let max_x = (cx + radius).ceil().min((grid.cols - 1) as f64) as i32;
    let min_y = (cy - radius).floor().max(0.0) as i32;
    let max_y = (cy + radius).ceil().min((grid.rows - 1) as f64) as i32;

    for x in min_x..=max_x {
        for y in min_y..=max_y {
            let id = grid.get_id(x, y);
            let node = grid.node_mut(id);
            if !node.is_hidden_obstacle() || node.discovered {
                continue;
            }
            if node.position.distance(&origin) <= radius {
                node.discover();
                revealed.put(id, node.node_type);
            }
        }
    }

    if !revealed.is_empty() {
        debug!(
            "Discovered {} obstacle(s) within {} of {}",
            revealed.len(),
            radius,
            origin
        );
    }
    revealed
}
