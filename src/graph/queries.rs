//! Install and source queries over a finalized graph

use crate::core::{ArborError, ArborResult};
use crate::graph::DependencyGraph;
use crate::resolver::{Pin, VersionResolver};
use std::collections::BTreeSet;

impl DependencyGraph {
    fn require(&self, name: &str) -> ArborResult<&crate::package::Package> {
        self.get(name)
            .ok_or_else(|| ArborError::UnknownPackage(name.to_string()))
    }

    /// System packages needed to build `names`: their own external
    /// dependencies plus those of their direct internal dependencies.
    pub fn install_dependencies(&self, names: &[String]) -> ArborResult<BTreeSet<String>> {
        let mut install = BTreeSet::new();
        for name in names {
            let package = self.require(name)?;
            install.extend(package.external_dependencies.iter().cloned());
            for dependency in &package.internal_dependencies {
                install.extend(self.require(dependency)?.external_dependencies.iter().cloned());
            }
        }
        Ok(install)
    }

    /// Published artifacts `names` build against: one pin per direct internal
    /// dependency, using the published candidates only.
    pub fn source_pins(&self, names: &[String]) -> ArborResult<Vec<Pin>> {
        let nothing_built = BTreeSet::new();
        let resolver = VersionResolver::new(self, &nothing_built)?;

        let mut pins: Vec<Pin> = Vec::new();
        for name in names {
            for pin in resolver.pins_for(self.require(name)?)? {
                if !pins.contains(&pin) {
                    pins.push(pin);
                }
            }
        }
        pins.sort_by(|a, b| a.artifact_name.cmp(&b.artifact_name));
        Ok(pins)
    }
}
