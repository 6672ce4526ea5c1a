//! `create-hanui-app` project generation

pub mod manifest;
pub mod scaffold;

pub use manifest::{locate_template_dir, TemplateEntry, TemplateManifest, TEMPLATE_DIR_ENV};
pub use scaffold::{
    to_package_name, validate_project_name, GenerateReport, ProjectConfig, ProjectGenerator,
};
