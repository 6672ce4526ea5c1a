//! Component installation: file materialization, import rewriting, and
//! package manager dispatch

pub mod materializer;
pub mod package_manager;
pub mod rewrite;

pub use materializer::{
    find_local_source, target_path, ContentOrigin, FailedWrite, MaterializeOptions,
    MaterializeReport, Materializer, MissingSource, WrittenFile,
};
pub use package_manager::{
    add_to_package_json, detect_package_manager, parse_package_spec, PackageInstaller,
    PackageManager,
};
pub use rewrite::{ImportRewriter, ImportRule, RewriteAliases};
