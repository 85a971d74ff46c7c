//! Task graph over completion events.
//!
//! Nodes are event ids, edges run from a prerequisite to the work that
//! depends on it. Queues record submissions here when graph recording is
//! enabled; tests use it to check ordering.

use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::event::EventId;

/// Error types for task graph operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("task {0} not found")]
    NodeNotFound(EventId),
    #[error("edge {from} -> {to} would create a cycle")]
    CycleDetected { from: EventId, to: EventId },
    #[error("task {0} already recorded")]
    Duplicate(EventId),
}

#[derive(Debug, Clone)]
struct TaskNode {
    label: String,
    parents: Vec<EventId>,
    children: Vec<EventId>,
}

/// A directed acyclic graph of submitted work.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    nodes: BTreeMap<EventId, TaskNode>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task. Fails if the id is already present.
    pub fn add_node(&mut self, id: EventId, label: impl Into<String>) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::Duplicate(id));
        }
        self.nodes.insert(
            id,
            TaskNode {
                label: label.into(),
                parents: Vec::new(),
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Record that `to` depends on `from`.
    pub fn add_edge(&mut self, from: EventId, to: EventId) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&from) {
            return Err(GraphError::NodeNotFound(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::NodeNotFound(to));
        }
        // If `to` can already reach `from`, the new edge closes a cycle.
        if self.can_reach(to, from) {
            return Err(GraphError::CycleDetected { from, to });
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            if !node.children.contains(&to) {
                node.children.push(to);
            }
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            if !node.parents.contains(&from) {
                node.parents.push(from);
            }
        }
        Ok(())
    }

    /// Record a task together with its prerequisites. Prerequisites that were
    /// never recorded (e.g. events from another queue) are skipped.
    pub fn record(
        &mut self,
        id: EventId,
        label: impl Into<String>,
        dependencies: &[EventId],
    ) -> Result<(), GraphError> {
        self.add_node(id, label)?;
        for &dep in dependencies {
            if self.nodes.contains_key(&dep) {
                self.add_edge(dep, id)?;
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn label(&self, id: EventId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.label.as_str())
    }

    /// Direct prerequisites of a task
    pub fn parents(&self, id: EventId) -> &[EventId] {
        self.nodes.get(&id).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Direct dependents of a task
    pub fn children(&self, id: EventId) -> &[EventId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks with no prerequisites, in id order.
    pub fn roots(&self) -> Vec<EventId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parents.is_empty())
            .map(|(&id, _)| id)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.children.len()).sum()
    }

    /// True if `later` transitively depends on `earlier`.
    pub fn is_ordered_after(&self, later: EventId, earlier: EventId) -> bool {
        later != earlier && self.can_reach(earlier, later)
    }

    /// Kahn's algorithm; ties broken by id so the order is deterministic.
    pub fn topological_order(&self) -> Vec<EventId> {
        let mut in_degree: BTreeMap<EventId, usize> = self
            .nodes
            .iter()
            .map(|(&id, n)| (id, n.parents.len()))
            .collect();
        let mut ready: VecDeque<EventId> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(&id, _)| id)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(id) = ready.pop_front() {
            order.push(id);
            let mut newly_ready = Vec::new();
            for &child in self.children(id) {
                if let Some(d) = in_degree.get_mut(&child) {
                    *d -= 1;
                    if *d == 0 {
                        newly_ready.push(child);
                    }
                }
            }
            newly_ready.sort_unstable();
            ready.extend(newly_ready);
        }
        order
    }

    /// Check if `from` can reach `to` through existing edges
    fn can_reach(&self, from: EventId, to: EventId) -> bool {
        if from == to {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            for &child in self.children(current) {
                if child == to {
                    return true;
                }
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> EventId {
        EventId::from_raw(n)
    }

    #[test]
    fn test_record_and_order() {
        let mut g = TaskGraph::new();
        g.record(id(1), "sgemm", &[]).unwrap();
        g.record(id(2), "saxpy", &[id(1)]).unwrap();
        g.record(id(3), "sscal", &[id(1)]).unwrap();
        g.record(id(4), "join", &[id(2), id(3)]).unwrap();

        assert_eq!(g.roots(), vec![id(1)]);
        assert_eq!(g.parents(id(4)), &[id(2), id(3)]);
        assert_eq!(g.topological_order(), vec![id(1), id(2), id(3), id(4)]);
        assert!(g.is_ordered_after(id(4), id(1)));
        assert!(!g.is_ordered_after(id(2), id(3)));
        assert!(!g.is_ordered_after(id(1), id(1)));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut g = TaskGraph::new();
        g.record(id(1), "a", &[]).unwrap();
        g.record(id(2), "b", &[id(1)]).unwrap();
        assert_eq!(
            g.add_edge(id(2), id(1)),
            Err(GraphError::CycleDetected { from: id(2), to: id(1) })
        );
        assert!(matches!(
            g.add_edge(id(1), id(1)),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_unknown_dependencies_skipped() {
        let mut g = TaskGraph::new();
        g.record(id(7), "foreign", &[id(3)]).unwrap();
        assert!(g.parents(id(7)).is_empty());
        assert_eq!(g.record(id(7), "again", &[]), Err(GraphError::Duplicate(id(7))));
    }
}
