use crate::grid::{Grid, NodeId};
use crate::hash_table::HashTable;

/// Hidden-obstacle class id -> nodes currently carrying that class.
///
/// A class leaves the index when the wizard clears it and is never re-added.
#[derive(Clone, Debug, Default)]
pub struct ObstacleIndex {
    classes: HashTable<u32, Vec<NodeId>>,
}

impl ObstacleIndex {
    pub fn new() -> Self {
        ObstacleIndex {
            classes: HashTable::new(),
        }
    }

    /// Index every hidden-obstacle node of `grid`
    pub fn from_grid(grid: &Grid) -> Self {
        let mut index = Self::new();
        for (id, node) in grid.nodes() {
            if node.is_hidden_obstacle() {
                index.insert(node.node_type, id);
            }
        }
        index
    }

    pub fn insert(&mut self, class: u32, node: NodeId) {
        self.classes.get_or_insert_with_default(class).push(node);
    }

    pub fn nodes_of(&self, class: u32) -> Option<&[NodeId]> {
        self.classes.get(&class).map(Vec::as_slice)
    }

    pub fn contains(&self, class: u32) -> bool {
        self.classes.contains_key(&class)
    }

    /// Sorted list of indexed classes
    pub fn classes(&self) -> Vec<u32> {
        let mut classes: Vec<u32> = self.classes.keys().copied().collect();
        classes.sort_unstable();
        classes
    }

    /// Remove a class, returning its nodes. `None` for unknown or
    /// already-cleared classes.
    pub fn take(&mut self, class: u32) -> Option<Vec<NodeId>> {
        self.classes.remove(&class)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_groups_by_class() {
        let mut grid = Grid::new(3, 2);
        grid.set_type(0, 2);
        grid.set_type(2, 3);
        grid.set_type(4, 2);
        grid.set_type(5, 1);

        let index = ObstacleIndex::from_grid(&grid);
        assert_eq!(index.classes(), vec![2, 3]);
        assert_eq!(index.nodes_of(2), Some(&[0, 4][..]));
        assert_eq!(index.nodes_of(3), Some(&[2][..]));
        assert_eq!(index.nodes_of(1), None);
    }

    #[test]
    fn test_take_is_one_shot() {
        let mut index = ObstacleIndex::new();
        index.insert(7, 1);
        assert_eq!(index.take(7), Some(vec![1]));
        assert_eq!(index.take(7), None);
        assert!(index.is_empty());
    }
}
