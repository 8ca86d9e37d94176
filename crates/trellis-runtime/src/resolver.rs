//! Dependency resolution - deterministic initialization order with cycle
//! tolerance.
//!
//! Depth-first postorder over the tenant's enabled configs: dependencies
//! flush before dependents, ties preserve the original configuration
//! order, and a back-edge into an in-progress node is dropped (and
//! reported) instead of failing the whole tenant's plugin load. One
//! misconfigured dependency graph must not prevent the other plugins
//! from loading.

use std::collections::{HashMap, HashSet};
use trellis_core::{PluginConfig, PluginDependency, PluginId};

/// A dependency edge that closed a cycle and was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    /// The node whose edge pointed back into the traversal.
    pub plugin_id: PluginId,
    /// The in-progress node the edge pointed at.
    pub depends_on: PluginId,
}

/// Outcome of dependency resolution.
#[derive(Debug)]
pub struct Resolution {
    /// The input configs, reordered so every dependency precedes its
    /// dependents. Every input node appears exactly once.
    pub ordered: Vec<PluginConfig>,
    /// Back-edges dropped during traversal, one per detected cycle
    /// entry. Callers log one warning per edge.
    pub cycles: Vec<CycleEdge>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Resolve the initialization order for a tenant's enabled configs.
///
/// Edges referencing plugins absent from `configs` are ignored — the
/// graph is restricted to the nodes actually present.
#[must_use]
pub fn resolve(configs: Vec<PluginConfig>, edges: &[PluginDependency]) -> Resolution {
    let present: HashSet<PluginId> = configs.iter().map(|c| c.plugin_id.clone()).collect();

    // Adjacency restricted to present nodes, edge-list order preserved.
    let mut deps: HashMap<PluginId, Vec<PluginId>> = HashMap::new();
    for edge in edges {
        if present.contains(&edge.plugin_id) && present.contains(&edge.depends_on) {
            deps.entry(edge.plugin_id.clone())
                .or_default()
                .push(edge.depends_on.clone());
        }
    }

    let mut marks: HashMap<PluginId, Mark> = HashMap::new();
    let mut ordered_ids: Vec<PluginId> = Vec::with_capacity(configs.len());
    let mut cycles: Vec<CycleEdge> = Vec::new();

    for config in &configs {
        if !marks.contains_key(&config.plugin_id) {
            visit(
                &config.plugin_id,
                &deps,
                &mut marks,
                &mut ordered_ids,
                &mut cycles,
            );
        }
    }

    // Reattach the config records in resolved order.
    let mut by_id: HashMap<PluginId, PluginConfig> = configs
        .into_iter()
        .map(|c| (c.plugin_id.clone(), c))
        .collect();
    let ordered = ordered_ids
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect();

    Resolution { ordered, cycles }
}

fn visit(
    node: &PluginId,
    deps: &HashMap<PluginId, Vec<PluginId>>,
    marks: &mut HashMap<PluginId, Mark>,
    ordered: &mut Vec<PluginId>,
    cycles: &mut Vec<CycleEdge>,
) {
    marks.insert(node.clone(), Mark::InProgress);

    if let Some(targets) = deps.get(node) {
        for dep in targets {
            match marks.get(dep) {
                None => visit(dep, deps, marks, ordered, cycles),
                // Back-edge: record it and do not re-enter the cycle.
                Some(Mark::InProgress) => cycles.push(CycleEdge {
                    plugin_id: node.clone(),
                    depends_on: dep.clone(),
                }),
                Some(Mark::Done) => {},
            }
        }
    }

    marks.insert(node.clone(), Mark::Done);
    ordered.push(node.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs(ids: &[&str]) -> Vec<PluginConfig> {
        ids.iter().map(|id| PluginConfig::new(*id, "acme")).collect()
    }

    fn ids(resolution: &Resolution) -> Vec<&str> {
        resolution
            .ordered
            .iter()
            .map(|c| c.plugin_id.as_str())
            .collect()
    }

    #[test]
    fn chain_resolves_dependencies_first() {
        // C depends on B depends on A; configured as [C, B, A].
        let edges = [
            PluginDependency::new("c", "b"),
            PluginDependency::new("b", "a"),
        ];
        let resolution = resolve(configs(&["c", "b", "a"]), &edges);

        assert_eq!(ids(&resolution), vec!["a", "b", "c"]);
        assert!(resolution.cycles.is_empty());
    }

    #[test]
    fn unconstrained_nodes_keep_config_order() {
        let resolution = resolve(configs(&["gamma", "alpha", "beta"]), &[]);
        assert_eq!(ids(&resolution), vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn edges_to_absent_plugins_are_ignored() {
        let edges = [
            PluginDependency::new("b", "not-enabled"),
            PluginDependency::new("not-enabled", "a"),
        ];
        let resolution = resolve(configs(&["b", "a"]), &edges);

        assert_eq!(ids(&resolution), vec!["b", "a"]);
        assert!(resolution.cycles.is_empty());
    }

    #[test]
    fn two_node_cycle_terminates_with_one_report() {
        let edges = [
            PluginDependency::new("x", "y"),
            PluginDependency::new("y", "x"),
        ];
        let resolution = resolve(configs(&["x", "y"]), &edges);

        let mut seen = ids(&resolution);
        seen.sort_unstable();
        assert_eq!(seen, vec!["x", "y"]);
        assert_eq!(resolution.cycles.len(), 1);
        assert_eq!(resolution.cycles[0].depends_on.as_str(), "x");
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let edges = [PluginDependency::new("a", "a")];
        let resolution = resolve(configs(&["a"]), &edges);

        assert_eq!(ids(&resolution), vec!["a"]);
        assert_eq!(
            resolution.cycles,
            vec![CycleEdge {
                plugin_id: PluginId::new("a"),
                depends_on: PluginId::new("a"),
            }]
        );
    }

    #[test]
    fn cycle_does_not_disturb_unrelated_plugins() {
        let edges = [
            PluginDependency::new("x", "y"),
            PluginDependency::new("y", "x"),
            PluginDependency::new("c", "b"),
        ];
        let resolution = resolve(configs(&["x", "c", "y", "b"]), &edges);

        let order = ids(&resolution);
        assert_eq!(order.len(), 4);
        let pos = |id: &str| order.iter().position(|o| *o == id).unwrap();
        assert!(pos("b") < pos("c"));
        assert_eq!(resolution.cycles.len(), 1);
    }

    #[test]
    fn diamond_is_deterministic() {
        // d depends on b and c; b and c both depend on a.
        let edges = [
            PluginDependency::new("d", "b"),
            PluginDependency::new("d", "c"),
            PluginDependency::new("b", "a"),
            PluginDependency::new("c", "a"),
        ];
        let first = resolve(configs(&["d", "c", "b", "a"]), &edges);
        let second = resolve(configs(&["d", "c", "b", "a"]), &edges);

        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn every_node_appears_exactly_once() {
        let edges = [
            PluginDependency::new("b", "a"),
            PluginDependency::new("c", "a"),
            PluginDependency::new("c", "b"),
            PluginDependency::new("a", "c"), // closes a cycle
        ];
        let resolution = resolve(configs(&["a", "b", "c"]), &edges);

        let mut seen = ids(&resolution);
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }
}
