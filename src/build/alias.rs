//! Import path aliases.
//!
//! # Responsibilities
//! - Map symbolic prefixes (`@`) to source directories
//! - Rewrite import specifiers, optionally against a project root
//!
//! # Design Decisions
//! - The longest matching key wins, so `@views` shadows `@`
//! - A key only matches whole path components: `@vue/x` is not `@`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::build::BuildError;

/// Import alias table (`@` → `./src`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    /// Sorted longest key first, so `@components` is tried before `@`.
    entries: Vec<(String, String)>,
}

impl AliasMap {
    pub fn new<I, K, V>(aliases: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = Vec::new();
        for (key, target) in aliases {
            let (key, target) = (key.into(), target.into());
            let invalid = |reason: &str| BuildError::InvalidAlias {
                key: key.clone(),
                target: target.clone(),
                reason: reason.to_string(),
            };
            if key.is_empty() || key.contains('/') {
                return Err(invalid("alias key must be non-empty and contain no `/`"));
            }
            if target.trim().is_empty() {
                return Err(invalid("alias target must not be empty"));
            }
            entries.push((key, target.trim_end_matches('/').to_string()));
        }
        entries.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Ok(Self { entries })
    }

    pub fn from_config(aliases: &BTreeMap<String, String>) -> Result<Self, BuildError> {
        Self::new(aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite an aliased import specifier; `None` if no alias applies.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        self.entries.iter().find_map(|(key, target)| {
            if specifier == key {
                Some(target.clone())
            } else {
                specifier
                    .strip_prefix(key.as_str())
                    .and_then(|rest| rest.strip_prefix('/'))
                    .map(|rest| format!("{target}/{rest}"))
            }
        })
    }

    /// Resolve against a project root; non-aliased specifiers are joined as-is.
    pub fn resolve_from(&self, root: &Path, specifier: &str) -> PathBuf {
        let resolved = self.resolve(specifier);
        let relative = resolved.as_deref().unwrap_or(specifier);
        let relative = relative.strip_prefix("./").unwrap_or(relative);
        root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_at_alias() {
        let aliases = AliasMap::new([("@", "./src/")]).unwrap();
        assert_eq!(
            aliases.resolve("@/views/LabsView.vue").as_deref(),
            Some("./src/views/LabsView.vue")
        );
        assert_eq!(aliases.resolve("@").as_deref(), Some("./src"));
        assert_eq!(aliases.resolve("vue-router"), None);
        // `@vue/...` scoped packages are not the `@` alias.
        assert_eq!(aliases.resolve("@vue/runtime-core"), None);
    }

    #[test]
    fn test_longest_key_wins() {
        let aliases = AliasMap::new([("@", "./src"), ("@views", "./src/views")]).unwrap();
        assert_eq!(
            aliases.resolve("@views/DevTools.vue").as_deref(),
            Some("./src/views/DevTools.vue")
        );
        assert_eq!(aliases.resolve("@/router/index.js").as_deref(), Some("./src/router/index.js"));
    }

    #[test]
    fn test_resolve_from_root() {
        let aliases = AliasMap::new([("@", "./src")]).unwrap();
        assert_eq!(
            aliases.resolve_from(Path::new("/project"), "@/views/LocalMap.vue"),
            PathBuf::from("/project/src/views/LocalMap.vue")
        );
        assert_eq!(
            aliases.resolve_from(Path::new("/project"), "./main.js"),
            PathBuf::from("/project/main.js")
        );
    }

    #[test]
    fn test_invalid_aliases() {
        assert!(AliasMap::new([("", "./src")]).is_err());
        assert!(AliasMap::new([("@/x", "./src")]).is_err());
        assert!(AliasMap::new([("@", " ")]).is_err());
    }
}
