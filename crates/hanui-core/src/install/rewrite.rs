//! Import path rewriting for downloaded component sources
//!
//! Files in the registry's source tree import each other through relative
//! paths. Once relocated into a consumer project those paths break, so a fixed,
//! ordered set of pattern rules maps them onto the project's aliases.

use regex::Regex;
use std::sync::LazyLock;

/// `from '../lib/utils'`, `from "../../lib/utils"`, ...
static UTILS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from ['"](\.\./)+lib/utils['"]"#).expect("utils import pattern is valid")
});

/// `from './Button'` (PascalCase sibling component)
static SIBLING_COMPONENT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from ['"]\./([A-Z][a-zA-Z0-9]*)['"]"#)
        .expect("sibling component import pattern is valid")
});

/// Import aliases of the consumer project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteAliases {
    pub utils: String,
    pub components: String,
}

impl Default for RewriteAliases {
    fn default() -> Self {
        Self {
            utils: "@/lib/utils".to_string(),
            components: "@/components/hanui".to_string(),
        }
    }
}

/// A single pattern/replacement pair
#[derive(Debug, Clone)]
pub struct ImportRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: String,
}

impl ImportRule {
    pub fn new(name: &'static str, pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            name,
            pattern,
            replacement: replacement.into(),
        }
    }

    pub fn apply(&self, content: &str) -> String {
        self.pattern
            .replace_all(content, self.replacement.as_str())
            .into_owned()
    }
}

/// Ordered rule set, applied first to last
#[derive(Debug, Clone, Default)]
pub struct ImportRewriter {
    rules: Vec<ImportRule>,
}

/// Escape `$` so an alias is inserted literally into a replacement template
fn literal(alias: &str) -> String {
    alias.replace('$', "$$")
}

impl ImportRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: ImportRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Relative `lib/utils` imports become the utils alias
    pub fn with_utils_rule(self, utils_alias: &str) -> Self {
        self.with_rule(ImportRule::new(
            "utils",
            UTILS_IMPORT.clone(),
            format!("from '{}'", literal(utils_alias)),
        ))
    }

    /// `./Component` sibling imports become `<components alias>/Component`
    pub fn with_sibling_component_rule(self, components_alias: &str) -> Self {
        let alias = literal(components_alias.trim_end_matches('/'));
        self.with_rule(ImportRule::new(
            "sibling-component",
            SIBLING_COMPONENT_IMPORT.clone(),
            format!("from '{}/${{1}}'", alias),
        ))
    }

    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    pub fn rewrite(&self, content: &str) -> String {
        self.rules
            .iter()
            .fold(content.to_string(), |acc, rule| rule.apply(&acc))
    }
}
