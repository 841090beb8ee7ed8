use crate::error::Result;
use crate::operations::query::WireWireIntersect;
use crate::tessellation::TessellationParams;
use crate::topology::{TopologyStore, WireId};

/// Clusters wires into geometrically connected groups.
///
/// Greedy single pass: each wire joins the first existing group containing
/// a wire it intersects, otherwise it starts a new group. Groups are never
/// merged, so a wire bridging two earlier groups only joins the first one.
pub struct GroupConnected {
    wires: Vec<WireId>,
    tolerance: f64,
    params: TessellationParams,
}

impl GroupConnected {
    /// Creates a new `GroupConnected` operation.
    #[must_use]
    pub fn new(wires: Vec<WireId>, tolerance: f64) -> Self {
        Self {
            wires,
            tolerance,
            params: TessellationParams::default(),
        }
    }

    /// Overrides the tessellation used for curved edges.
    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the grouping.
    ///
    /// # Errors
    ///
    /// Returns an error if a wire is missing from the store.
    pub fn execute(&self, store: &TopologyStore) -> Result<Vec<Vec<WireId>>> {
        let mut groups: Vec<Vec<WireId>> = Vec::new();

        for &wire in &self.wires {
            let mut target = None;
            'groups: for (index, group) in groups.iter().enumerate() {
                for &member in group {
                    let touches = WireWireIntersect::new(wire, member, self.tolerance)
                        .with_params(self.params)
                        .execute(store)?;
                    if touches {
                        target = Some(index);
                        break 'groups;
                    }
                }
            }
            match target {
                Some(index) => groups[index].push(wire),
                None => groups.push(vec![wire]),
            }
        }

        tracing::debug!(
            wires = self.wires.len(),
            groups = groups.len(),
            "grouped wires by connectivity"
        );
        Ok(groups)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, POINT_TOLERANCE};
    use crate::operations::creation::MakeWire;

    fn unit_square(store: &mut TopologyStore, x: f64, y: f64) -> WireId {
        MakeWire::new(
            vec![
                Point3::new(x, y, 0.0),
                Point3::new(x + 1.0, y, 0.0),
                Point3::new(x + 1.0, y + 1.0, 0.0),
                Point3::new(x, y + 1.0, 0.0),
            ],
            true,
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn disjoint_squares_form_two_groups() {
        let mut store = TopologyStore::new();
        let a = unit_square(&mut store, 0.0, 0.0);
        let b = unit_square(&mut store, 3.0, 0.0);
        let groups = GroupConnected::new(vec![a, b], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();
        assert_eq!(groups, vec![vec![a], vec![b]]);
    }

    #[test]
    fn squares_sharing_an_edge_form_one_group() {
        let mut store = TopologyStore::new();
        let a = unit_square(&mut store, 0.0, 0.0);
        let b = unit_square(&mut store, 1.0, 0.0);
        let groups = GroupConnected::new(vec![a, b], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();
        assert_eq!(groups, vec![vec![a, b]]);
    }

    #[test]
    fn bridge_joins_first_group_only() {
        let mut store = TopologyStore::new();
        let a = unit_square(&mut store, 0.0, 0.0);
        let b = unit_square(&mut store, 3.0, 0.0);
        let bridge = MakeWire::new(
            vec![Point3::new(1.0, 0.5, 0.0), Point3::new(3.0, 0.5, 0.0)],
            false,
        )
        .execute(&mut store)
        .unwrap();
        let groups = GroupConnected::new(vec![a, b, bridge], POINT_TOLERANCE)
            .execute(&store)
            .unwrap();
        assert_eq!(groups, vec![vec![a, bridge], vec![b]]);
    }
}
