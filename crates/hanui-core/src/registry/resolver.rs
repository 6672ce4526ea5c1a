//! Transitive resolution of registry dependencies into an install plan

use super::schema::Registry;
use crate::error::HanuiError;
use std::collections::{BTreeSet, HashSet};

/// Request value that selects every component in the registry
pub const ALL_COMPONENTS: &str = "all";

/// The resolved, deduplicated set of components plus aggregated package lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallPlan {
    /// Components in resolution order, each appearing once
    components: Vec<String>,
    scheduled: HashSet<String>,
    pub dependencies: BTreeSet<String>,
    pub dev_dependencies: BTreeSet<String>,
}

impl InstallPlan {
    /// Schedule a component; returns false when it was already scheduled
    fn schedule(&mut self, name: &str) -> bool {
        if self.scheduled.insert(name.to_string()) {
            self.components.push(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scheduled.contains(name)
    }

    /// Component names as a set (order independent comparison)
    pub fn install_set(&self) -> BTreeSet<String> {
        self.components.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn has_packages(&self) -> bool {
        !self.dependencies.is_empty() || !self.dev_dependencies.is_empty()
    }
}

/// True when the request is the `all` sentinel rather than component names
fn is_all_request(registry: &Registry, requested: &[String]) -> bool {
    !registry.contains(ALL_COMPONENTS) && requested.iter().any(|r| r == ALL_COMPONENTS)
}

/// Resolve `requested` and everything reachable through `registryDependencies`
///
/// Every unknown name (requested or referenced) is reported together in one
/// [`HanuiError::UnknownComponents`].
pub fn resolve(registry: &Registry, requested: &[String]) -> Result<InstallPlan, HanuiError> {
    let mut plan = InstallPlan::default();

    if is_all_request(registry, requested) {
        for component in registry.components() {
            plan.schedule(&component.name);
            plan.dependencies.extend(component.dependencies.iter().cloned());
            plan.dev_dependencies
                .extend(component.dev_dependencies.iter().cloned());
        }
        return Ok(plan);
    }

    let mut unknown: Vec<String> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for name in requested {
        if plan.schedule(name) {
            pending.push(name.clone());
        }
    }

    // Each name is pushed at most once because `schedule` guards the worklist
    let mut cursor = 0;
    while cursor < pending.len() {
        let name = pending[cursor].clone();
        cursor += 1;

        let Some(component) = registry.get(&name) else {
            if !unknown.contains(&name) {
                unknown.push(name);
            }
            continue;
        };

        plan.dependencies.extend(component.dependencies.iter().cloned());
        plan.dev_dependencies
            .extend(component.dev_dependencies.iter().cloned());

        for dep in &component.registry_dependencies {
            if plan.schedule(dep) {
                pending.push(dep.clone());
            }
        }
    }

    if !unknown.is_empty() {
        return Err(HanuiError::UnknownComponents {
            names: unknown,
            available: registry.names(),
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::schema::{RegistryComponent, RegistryFile};
    use pretty_assertions::assert_eq;

    fn component(name: &str, registry_deps: &[&str], deps: &[&str]) -> RegistryComponent {
        RegistryComponent {
            name: name.to_string(),
            files: vec![RegistryFile::new(format!("components/{}.tsx", name))],
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            registry_dependencies: registry_deps.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_transitive_closure() {
        let registry: Registry = [
            component("dialog", &["button", "overlay"], &["@radix-ui/react-dialog"]),
            component("button", &["slot"], &["class-variance-authority"]),
            component("overlay", &[], &[]),
            component("slot", &[], &["@radix-ui/react-slot"]),
            component("unrelated", &[], &["left-pad"]),
        ]
        .into_iter()
        .collect();

        let plan = resolve(&registry, &names(&["dialog"])).unwrap();
        assert_eq!(plan.install_set(), set(&["dialog", "button", "overlay", "slot"]));
        assert_eq!(
            plan.dependencies,
            set(&[
                "@radix-ui/react-dialog",
                "class-variance-authority",
                "@radix-ui/react-slot"
            ])
        );
        assert!(!plan.contains("unrelated"));
    }

    #[test]
    fn test_diamond_processed_once() {
        let registry: Registry = [
            component("a", &["c"], &[]),
            component("b", &["c"], &[]),
            component("c", &[], &["clsx"]),
        ]
        .into_iter()
        .collect();

        let plan = resolve(&registry, &names(&["a", "b"])).unwrap();
        assert_eq!(plan.components(), &names(&["a", "b", "c"])[..]);
        assert_eq!(plan.components().iter().filter(|c| *c == "c").count(), 1);
    }

    #[test]
    fn test_cycles_terminate() {
        let registry: Registry = [
            component("self", &["self"], &[]),
            component("ping", &["pong"], &[]),
            component("pong", &["ping"], &[]),
        ]
        .into_iter()
        .collect();

        let plan = resolve(&registry, &names(&["self", "ping"])).unwrap();
        assert_eq!(plan.install_set(), set(&["self", "ping", "pong"]));
    }

    #[test]
    fn test_repeated_request_deduplicated() {
        let registry: Registry = [component("button", &[], &[])].into_iter().collect();
        let plan = resolve(&registry, &names(&["button", "button"])).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_unknown_names_aggregated() {
        let registry: Registry = [component("button", &[], &[])].into_iter().collect();

        let err = resolve(&registry, &names(&["nope", "button", "missing"])).unwrap_err();
        match err {
            HanuiError::UnknownComponents { names, available } => {
                assert_eq!(names, vec!["nope".to_string(), "missing".to_string()]);
                assert_eq!(available, vec!["button".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_transitive_reference_reported() {
        let registry: Registry = [
            component("card", &["ghost"], &[]),
            component("list", &["phantom"], &[]),
        ]
        .into_iter()
        .collect();

        let err = resolve(&registry, &names(&["card", "list", "bogus"])).unwrap_err();
        let HanuiError::UnknownComponents { names, .. } = err else {
            panic!("expected UnknownComponents");
        };
        let found: BTreeSet<String> = names.into_iter().collect();
        assert_eq!(found, set(&["bogus", "ghost", "phantom"]));
    }

    #[test]
    fn test_all_sentinel_selects_everything() {
        let registry: Registry = [
            component("a", &[], &["x"]),
            component("b", &[], &["y"]),
        ]
        .into_iter()
        .collect();

        let plan = resolve(&registry, &names(&["all"])).unwrap();
        assert_eq!(plan.install_set(), set(&["a", "b"]));
        assert_eq!(plan.dependencies, set(&["x", "y"]));
    }

    #[test]
    fn test_component_named_all_is_not_sentinel() {
        let registry: Registry = [component("all", &[], &[]), component("b", &[], &[])]
            .into_iter()
            .collect();
        let plan = resolve(&registry, &names(&["all"])).unwrap();
        assert_eq!(plan.install_set(), set(&["all"]));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let registry: Registry = [
            component("a", &["b"], &["x"]),
            component("b", &[], &["y"]),
        ]
        .into_iter()
        .collect();
        let request = names(&["a"]);
        assert_eq!(resolve(&registry, &request).unwrap(), resolve(&registry, &request).unwrap());
    }
}
