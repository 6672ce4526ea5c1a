//! Component registry: manifest types, loading, and dependency resolution

pub mod loader;
pub mod resolver;
pub mod schema;

pub use loader::{RegistryLoader, RegistrySource};
pub use resolver::{resolve, InstallPlan, ALL_COMPONENTS};
pub use schema::{ComponentKind, FileKind, Registry, RegistryComponent, RegistryFile};
