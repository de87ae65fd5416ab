//! Layered build ordering
//!
//! Packages are grouped into layers: every package in a layer only depends on
//! packages in earlier layers, so a layer can be built in parallel once the
//! previous one has finished.

use crate::core::{ArborError, ArborResult};
use crate::graph::DependencyGraph;
use std::collections::{BTreeSet, HashMap};

/// Order `names` into dependency-respecting layers.
///
/// Only edges between two members of `names` are considered; dependencies on
/// anything else are assumed to be satisfied already. Within a layer, names are
/// sorted by their position in `original_order`, with names missing from it
/// placed last (by name). A cycle among the remaining names is reported as
/// [`ArborError::CycleDetected`], with those names in the same order.
pub fn order<F, I, S>(
    names: &BTreeSet<String>,
    dependency_of: F,
    original_order: &[String],
) -> ArborResult<Vec<Vec<String>>>
where
    F: Fn(&str) -> I,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let position: HashMap<&str, usize> = original_order
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect();
    let sort_key = |name: &String| {
        let index = position.get(name.as_str()).copied().unwrap_or(usize::MAX);
        (index, name.clone())
    };

    let mut in_degree: HashMap<&str, usize> =
        names.iter().map(|name| (name.as_str(), 0)).collect();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

    for name in names {
        let mut seen = BTreeSet::new();
        for dependency in dependency_of(name.as_str()) {
            let Some(dependency) = names.get(dependency.as_ref()) else {
                continue;
            };
            let dependency = dependency.as_str();
            if !seen.insert(dependency) {
                continue;
            }
            *in_degree.entry(name.as_str()).or_default() += 1;
            dependents.entry(dependency).or_default().push(name.as_str());
        }
    }

    let mut layers = Vec::new();
    let mut ready: Vec<String> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| name.to_string())
        .collect();
    let mut placed = 0;

    while !ready.is_empty() {
        ready.sort_by_key(sort_key);

        let mut next = Vec::new();
        for name in &ready {
            for dependent in dependents.get(name.as_str()).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(dependent.to_string());
                    }
                }
            }
        }

        placed += ready.len();
        layers.push(std::mem::replace(&mut ready, next));
    }

    if placed < names.len() {
        let mut remaining: Vec<String> = in_degree
            .into_iter()
            .filter(|(_, degree)| *degree > 0)
            .map(|(name, _)| name.to_string())
            .collect();
        remaining.sort_by_key(sort_key);
        return Err(ArborError::CycleDetected(remaining));
    }

    tracing::debug!(layers = layers.len(), packages = placed, "Scheduled build layers");
    Ok(layers)
}

/// Order a subset of a graph's packages using its internal edges and
/// manifest order.
pub fn schedule(
    graph: &DependencyGraph,
    names: &BTreeSet<String>,
) -> ArborResult<Vec<Vec<String>>> {
    let original_order = graph.names();
    order(
        names,
        |name| {
            graph
                .get(name)
                .map(|package| package.internal_dependencies.iter().cloned().collect())
                .unwrap_or_else(Vec::new)
        },
        &original_order,
    )
}
