//! Incremental rebuild classification
//!
//! Decides which packages of a finalized graph must be rebuilt and which can
//! reuse their published artifact.

use crate::graph::DependencyGraph;
use crate::package::Package;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of classifying a set of candidate packages.
///
/// The two sets are disjoint and together cover every candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub to_build: BTreeSet<String>,
    pub to_reuse: BTreeSet<String>,
}

impl Classification {
    /// Every classified package
    pub fn candidates(&self) -> BTreeSet<String> {
        self.to_build.union(&self.to_reuse).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_build.is_empty() && self.to_reuse.is_empty()
    }
}

/// A package must be rebuilt when nothing has been published for it, or when
/// the published artifact was built from a different revision.
pub fn needs_rebuild(package: &Package) -> bool {
    match &package.published_candidate {
        Some(candidate) => !candidate.built_from(&package.revision),
        None => true,
    }
}

/// Rebuild classifier over one finalized graph.
pub struct RebuildClassifier<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> RebuildClassifier<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Classify `roots` and everything they depend on.
    ///
    /// An empty `roots` selects every package. Unknown root names are logged and
    /// skipped. With `propagate_reverse`, anything among the candidates that
    /// depends on a package being rebuilt is rebuilt as well; dependents outside
    /// the candidate set are never pulled in.
    pub fn build_list(&self, roots: &[String], propagate_reverse: bool) -> Classification {
        let candidates = self.candidates(roots);

        let decisions: Vec<(&String, bool)> = candidates
            .par_iter()
            .map(|name| (name, self.graph.get(name).map(needs_rebuild).unwrap_or(true)))
            .collect();

        let mut classification = Classification::default();
        for (name, rebuild) in decisions {
            if rebuild {
                classification.to_build.insert(name.clone());
            } else {
                classification.to_reuse.insert(name.clone());
            }
        }

        tracing::debug!(
            changed = classification.to_build.len(),
            unchanged = classification.to_reuse.len(),
            "Classified candidates"
        );

        if propagate_reverse {
            self.propagate(&candidates, &mut classification);
        }

        tracing::info!(
            graph = %self.graph.name(),
            to_build = classification.to_build.len(),
            to_reuse = classification.to_reuse.len(),
            "Computed build list"
        );
        classification
    }

    fn candidates(&self, roots: &[String]) -> BTreeSet<String> {
        if roots.is_empty() {
            return self.graph.names().into_iter().collect();
        }

        let mut candidates = BTreeSet::new();
        for root in roots {
            if !self.graph.contains(root) {
                tracing::warn!(package = %root, "Unknown package requested, skipping");
                continue;
            }
            candidates.insert(root.clone());
            candidates.extend(self.graph.transitive_dependencies(root).iter().cloned());
        }
        candidates
    }

    /// Move every candidate that transitively depends on a rebuilt package
    /// into `to_build`, until nothing changes.
    fn propagate(&self, candidates: &BTreeSet<String>, classification: &mut Classification) {
        let mut worklist: Vec<String> = classification.to_build.iter().cloned().collect();

        while let Some(name) = worklist.pop() {
            for dependent in self.graph.transitive_reverse_dependencies(&name).iter() {
                if !candidates.contains(dependent) {
                    continue;
                }
                if classification.to_build.insert(dependent.clone()) {
                    classification.to_reuse.remove(dependent);
                    tracing::debug!(package = %dependent, because = %name, "Rebuilding dependent");
                    worklist.push(dependent.clone());
                }
            }
        }
    }
}
