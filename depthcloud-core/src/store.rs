//! Owner of the current point cloud.

use crate::types::PointCloud;

/// Holds at most one "current" point cloud.
///
/// `replace` is the only mutator: consumers see either the whole old cloud or
/// the whole new one, never a partial write. A failed generation never reaches
/// `replace`, so the prior cloud stays renderable.
#[derive(Debug, Default)]
pub struct CloudStore {
    current: Option<PointCloud>,
}

impl CloudStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly generated cloud, dropping the previous one.
    pub fn replace(&mut self, cloud: PointCloud) {
        self.current = Some(cloud);
    }

    /// The current cloud, if one has been generated.
    pub fn current(&self) -> Option<&PointCloud> {
        self.current.as_ref()
    }

    /// Vertex count of the current cloud, 0 when absent.
    pub fn count(&self) -> usize {
        self.current.as_ref().map_or(0, PointCloud::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointVertex;
    use glam::Vec3;

    fn cloud_of(n: usize, max_depth: f32) -> PointCloud {
        PointCloud {
            vertices: vec![PointVertex::new(Vec3::ZERO, Vec3::ONE); n],
            max_depth,
        }
    }

    #[test]
    fn test_empty_store_counts_zero() {
        let store = CloudStore::new();
        assert_eq!(store.count(), 0);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_replace_swaps_wholesale() {
        let mut store = CloudStore::new();
        store.replace(cloud_of(3, 1.0));
        assert_eq!(store.count(), 3);

        store.replace(cloud_of(7, 2.0));
        assert_eq!(store.count(), 7);
        assert_eq!(store.current().unwrap().max_depth, 2.0);
    }
}
