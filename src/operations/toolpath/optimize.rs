use std::time::Instant;

use crate::error::{OperationError, Result};
use crate::math::{distance_3d, Point3};
use crate::topology::{TopologyStore, WireId};

/// A wire placed in the cut order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedWire {
    /// The wire to cut.
    pub wire: WireId,
    /// Whether the wire is cut against its stored direction.
    pub reversed: bool,
    /// Where the tool enters the wire.
    pub entry: Point3,
    /// Where the tool leaves the wire.
    pub exit: Point3,
}

/// Result of [`OptimizePath`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    /// Wires in visiting order.
    pub steps: Vec<PlannedWire>,
    /// Total rapid travel from the start point through every wire.
    pub rapid_distance: f64,
    /// `true` when the time budget ran out and the tail is unordered.
    pub truncated: bool,
}

impl PathPlan {
    /// Wire ids in visiting order.
    #[must_use]
    pub fn wires(&self) -> Vec<WireId> {
        self.steps.iter().map(|s| s.wire).collect()
    }

    /// Tool position after the last wire.
    #[must_use]
    pub fn end_point(&self) -> Option<Point3> {
        self.steps.last().map(|s| s.exit)
    }

    /// Creates the wires in cutting direction, reversing where planned.
    ///
    /// Wires that are not reversed are returned as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if a planned wire is missing from the store.
    pub fn render(&self, store: &mut TopologyStore) -> Result<Vec<WireId>> {
        let mut out = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if step.reversed {
                let data = store.wire(step.wire)?.reversed();
                out.push(store.add_wire(data));
            } else {
                out.push(step.wire);
            }
        }
        Ok(out)
    }
}

/// A wire waiting to be placed, with its stored endpoints.
struct Candidate {
    wire: WireId,
    start: Point3,
    end: Point3,
    /// Cut end → start unless flipped.
    reverse: bool,
}

impl Candidate {
    fn entry(&self) -> Point3 {
        if self.reverse {
            self.end
        } else {
            self.start
        }
    }

    fn exit(&self) -> Point3 {
        if self.reverse {
            self.start
        } else {
            self.end
        }
    }

    /// Places the wire, optionally flipped against its default direction.
    fn plan(&self, flip: bool) -> PlannedWire {
        let reversed = self.reverse != flip;
        let (entry, exit) = if reversed {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        };
        PlannedWire {
            wire: self.wire,
            reversed,
            entry,
            exit,
        }
    }
}

/// Orders wires by greedy nearest neighbour under a soft time budget.
///
/// Keeps the rapid (non-cutting) travel between the end of one wire and
/// the start of the next short. The problem is an open-path TSP variant;
/// this is a greedy construction, not an exact solver, and the first
/// nearest wire found is always taken.
///
/// From the current tool position the wire whose entry point is nearest
/// is cut next, and the tool moves to its exit point. With `reverse`
/// every wire is entered at its last point. With
/// [`with_bidirectional`](Self::with_bidirectional) either end may be the
/// entry, whichever is nearer.
///
/// The elapsed time is checked after each placement; once it exceeds the
/// budget the remaining wires are appended in input order and a warning
/// is logged. The result always contains every input wire exactly once.
pub struct OptimizePath {
    wires: Vec<WireId>,
    start_point: Point3,
    reverse: bool,
    bidirectional: bool,
    time_limit_seconds: f64,
}

impl OptimizePath {
    /// Creates a new `OptimizePath` operation.
    #[must_use]
    pub fn new(
        wires: Vec<WireId>,
        start_point: Point3,
        reverse: bool,
        time_limit_seconds: f64,
    ) -> Self {
        Self {
            wires,
            start_point,
            reverse,
            bidirectional: false,
            time_limit_seconds,
        }
    }

    /// Allows entering each wire from either end.
    #[must_use]
    pub fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Executes the optimization.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a negative or NaN time
    /// limit and a topology error if a wire is missing or empty.
    pub fn execute(&self, store: &TopologyStore) -> Result<PathPlan> {
        if self.time_limit_seconds.is_nan() || self.time_limit_seconds < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "time limit must be non-negative, got {}",
                self.time_limit_seconds
            ))
            .into());
        }

        let mut remaining = Vec::with_capacity(self.wires.len());
        for &wire in &self.wires {
            let (start, end) = store.wire_endpoints(wire)?;
            remaining.push(Candidate {
                wire,
                start,
                end,
                reverse: self.reverse,
            });
        }

        if remaining.len() < 2 {
            let steps = remaining.iter().map(|c| c.plan(false)).collect();
            return Ok(self.finish(steps, false));
        }

        let started = Instant::now();
        let mut steps = Vec::with_capacity(remaining.len());
        let mut position = self.start_point;
        let mut truncated = false;

        while !remaining.is_empty() {
            let (index, flip) = self.nearest(&remaining, &position);
            let planned = remaining.remove(index).plan(flip);
            position = planned.exit;
            steps.push(planned);

            let elapsed = started.elapsed().as_secs_f64();
            if !remaining.is_empty() && elapsed > self.time_limit_seconds {
                tracing::warn!(
                    elapsed,
                    limit = self.time_limit_seconds,
                    unordered = remaining.len(),
                    "path optimization time limit exceeded, appending remaining wires unordered"
                );
                steps.extend(remaining.drain(..).map(|c| c.plan(false)));
                truncated = true;
            }
        }

        Ok(self.finish(steps, truncated))
    }

    /// Index of the nearest candidate and whether it is entered from its exit.
    /// The first candidate found at the minimum distance wins.
    fn nearest(&self, remaining: &[Candidate], position: &Point3) -> (usize, bool) {
        let mut best = (0, false);
        let mut best_distance = f64::INFINITY;
        for (index, candidate) in remaining.iter().enumerate() {
            let d = distance_3d(position, &candidate.entry());
            if d < best_distance {
                best_distance = d;
                best = (index, false);
            }
            if self.bidirectional {
                let d = distance_3d(position, &candidate.exit());
                if d < best_distance {
                    best_distance = d;
                    best = (index, true);
                }
            }
        }
        best
    }

    fn finish(&self, steps: Vec<PlannedWire>, truncated: bool) -> PathPlan {
        let mut position = self.start_point;
        let mut rapid_distance = 0.0;
        for step in &steps {
            rapid_distance += distance_3d(&position, &step.entry);
            position = step.exit;
        }
        tracing::debug!(
            wires = steps.len(),
            rapid_distance,
            truncated,
            "ordered wires"
        );
        PathPlan {
            steps,
            rapid_distance,
            truncated,
        }
    }
}
