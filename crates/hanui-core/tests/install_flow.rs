//! End-to-end add flow against a temporary monorepo layout
//!
//! The project lives at `<root>/apps/web`, so the registry at
//! `<root>/packages/registry` and the sources at `<root>/packages/react/src`
//! are found locally. Remote URLs point at a closed local port.

use hanui_core::install::{
    detect_package_manager, MaterializeOptions, Materializer, PackageManager, RewriteAliases,
};
use hanui_core::registry::{resolve, RegistryLoader, RegistrySource};
use hanui_core::{Framework, HanuiError};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:9";

const REGISTRY: &str = r#"{
  "button": {
    "type": "component",
    "files": [{ "path": "components/button.tsx", "type": "component" }],
    "dependencies": [],
    "registryDependencies": []
  },
  "card": {
    "type": "component",
    "files": [{ "path": "components/card.tsx", "type": "component" }],
    "dependencies": ["clsx"],
    "registryDependencies": ["button"]
  },
  "dialog": {
    "type": "component",
    "files": [{ "path": "components/dialog.tsx", "type": "component" }],
    "dependencies": ["@radix-ui/react-dialog@^1.1.0"],
    "registryDependencies": ["button"]
  }
}"#;

struct Workspace {
    root: TempDir,
    project: PathBuf,
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn workspace() -> Workspace {
    let root = TempDir::new().unwrap();
    let base = root.path();
    write(&base.join("packages/registry/registry.json"), REGISTRY);
    write(
        &base.join("packages/react/src/components/button.tsx"),
        "export const Button = () => null;\n",
    );
    write(
        &base.join("packages/react/src/components/card.tsx"),
        "import { cn } from '../lib/utils';\nexport const Card = () => null;\n",
    );
    write(
        &base.join("packages/react/src/components/dialog.tsx"),
        "export const Dialog = () => null;\n",
    );

    let project = base.join("apps/web");
    write(&project.join("package.json"), "{ \"name\": \"web\" }\n");

    Workspace {
        root,
        project,
    }
}

fn loader(project: &Path) -> RegistryLoader {
    RegistryLoader::new(Framework::React, project)
        .with_registry_url(format!("{}/registry.json", UNREACHABLE))
        .with_source_base_url(UNREACHABLE)
}

fn options(project: &Path, overwrite: bool) -> MaterializeOptions {
    MaterializeOptions {
        cwd: project.to_path_buf(),
        components_path: PathBuf::from("components/hanui"),
        overwrite,
        aliases: RewriteAliases::default(),
    }
}

#[tokio::test]
async fn test_card_installs_button_and_card() {
    let ws = workspace();
    let loader = loader(&ws.project);
    let (registry, source) = loader.fetch_registry().await.unwrap();
    assert!(matches!(source, RegistrySource::Local(_)));

    let plan = resolve(&registry, &["card".to_string()]).unwrap();
    assert_eq!(
        plan.install_set(),
        BTreeSet::from(["button".to_string(), "card".to_string()])
    );
    assert_eq!(
        plan.dependencies,
        BTreeSet::from(["clsx".to_string()])
    );

    let report = Materializer::new(&loader, options(&ws.project, false))
        .materialize_plan(&registry, &plan)
        .await;

    assert!(report.failed.is_empty());
    assert!(report.missing.is_empty());
    assert_eq!(report.written.len(), 2);

    let dir = ws.project.join("components/hanui");
    assert!(dir.join("button.tsx").is_file());
    // Local sources are copied verbatim
    assert_eq!(
        std::fs::read_to_string(dir.join("card.tsx")).unwrap(),
        "import { cn } from '../lib/utils';\nexport const Card = () => null;\n"
    );
}

#[tokio::test]
async fn test_existing_file_kept_unless_overwrite() {
    let ws = workspace();
    let target = ws.project.join("components/hanui/button.tsx");
    write(&target, "// customized\n");

    let loader = loader(&ws.project);
    let (registry, _) = loader.fetch_registry().await.unwrap();
    let plan = resolve(&registry, &["button".to_string()]).unwrap();

    let report = Materializer::new(&loader, options(&ws.project, false))
        .materialize_plan(&registry, &plan)
        .await;
    assert_eq!(report.conflicts, vec![target.clone()]);
    assert!(report.written.is_empty());
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "// customized\n");

    let report = Materializer::new(&loader, options(&ws.project, true))
        .materialize_plan(&registry, &plan)
        .await;
    assert!(report.conflicts.is_empty());
    assert_eq!(report.written.len(), 1);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "export const Button = () => null;\n"
    );
}

#[tokio::test]
async fn test_shared_dependency_written_once() {
    let ws = workspace();
    let loader = loader(&ws.project);
    let (registry, _) = loader.fetch_registry().await.unwrap();

    let plan = resolve(&registry, &["card".to_string(), "dialog".to_string()]).unwrap();
    assert_eq!(plan.len(), 3);

    let report = Materializer::new(&loader, options(&ws.project, false))
        .materialize_plan(&registry, &plan)
        .await;

    let buttons = report
        .written
        .iter()
        .filter(|w| w.component == "button")
        .count();
    assert_eq!(buttons, 1);
    assert!(report.conflicts.is_empty());
    assert_eq!(
        plan.dependencies,
        BTreeSet::from([
            "@radix-ui/react-dialog@^1.1.0".to_string(),
            "clsx".to_string()
        ])
    );
}

#[tokio::test]
async fn test_unknown_names_reported_together() {
    let ws = workspace();
    let (registry, _) = loader(&ws.project).fetch_registry().await.unwrap();

    let err = resolve(
        &registry,
        &["card".to_string(), "nope".to_string(), "missing".to_string()],
    )
    .unwrap_err();
    match err {
        HanuiError::UnknownComponents { names, available } => {
            let names: BTreeSet<String> = names.into_iter().collect();
            assert_eq!(
                names,
                BTreeSet::from(["missing".to_string(), "nope".to_string()])
            );
            assert_eq!(available, vec!["button", "card", "dialog"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_source_is_reported_not_fatal() {
    let ws = workspace();
    std::fs::remove_file(ws.root.path().join("packages/react/src/components/button.tsx")).unwrap();

    let loader = loader(&ws.project);
    let (registry, _) = loader.fetch_registry().await.unwrap();
    let plan = resolve(&registry, &["card".to_string()]).unwrap();

    let report = Materializer::new(&loader, options(&ws.project, false))
        .materialize_plan(&registry, &plan)
        .await;

    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].component, "button");
    assert_eq!(report.written.len(), 1);
    assert!(ws.project.join("components/hanui/card.tsx").is_file());
}

#[test]
fn test_package_manager_detection() {
    let ws = workspace();
    assert_eq!(detect_package_manager(&ws.project), PackageManager::Npm);

    write(&ws.project.join("pnpm-lock.yaml"), "lockfileVersion: '9.0'\n");
    assert_eq!(detect_package_manager(&ws.project), PackageManager::Pnpm);
}
