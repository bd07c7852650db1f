//! Pattern-based asset matching.
//!
//! Patterns are regular expressions tested against full asset names
//! (unanchored, so `\.css$` matches every stylesheet). Any in-memory match
//! suppresses disk search; disk search only runs when memory has none.

use crate::error::{EmbedError, Result};
use crate::registry::store::{read_text, Registry};
use crate::registry::template::{CompositeTemplate, Template};
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// Compile `pattern`, mapping failure to `InvalidPattern`.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| EmbedError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl Registry {
    /// Names of registered blobs matching `pattern`, sorted.
    ///
    /// With `disk_search` and no registered match, returns the matching
    /// file names found below the disk root instead.
    pub fn matching_blob_names(&self, disk_search: bool, pattern: &str) -> Result<Vec<String>> {
        let pat = compile(pattern)?;
        let names = matching(self.blob_names(), &pat);
        self.names_or_disk(names, disk_search, &pat)
    }

    /// Names of registered templates matching `pattern`, sorted.
    ///
    /// Disk fallback behaves as in [`Registry::matching_blob_names`].
    pub fn matching_template_names(
        &self,
        disk_search: bool,
        pattern: &str,
    ) -> Result<Vec<String>> {
        let pat = compile(pattern)?;
        let names = matching(self.template_names(), &pat);
        self.names_or_disk(names, disk_search, &pat)
    }

    /// Build a composite template called `base_name` out of every registered
    /// template whose name matches `pattern`.
    ///
    /// Each match is added under the final component of its name, so
    /// `views/index.hbs` becomes `index.hbs`. With `disk_search` and no
    /// registered match, matching files below the disk root are parsed and
    /// added the same way.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` for a bad pattern, `NameCollision` when two
    /// matches share a final component, and `ParseError` for an unparsable
    /// disk file.
    pub fn matching_templates(
        &self,
        disk_search: bool,
        base_name: &str,
        pattern: &str,
    ) -> Result<CompositeTemplate> {
        let pat = compile(pattern)?;
        let mut composite = CompositeTemplate::new(base_name)?;

        for name in matching(self.template_names(), &pat) {
            let template = Arc::clone(&self.templates[&name]);
            composite.add(short_name(&name), template)?;
        }

        if !composite.is_empty() || !disk_search {
            return Ok(composite);
        }

        tracing::debug!(
            "No registered templates match {}, searching {}",
            pattern,
            self.disk_root.display()
        );
        for (name, path) in self.disk_names()? {
            if !pat.is_match(&name) {
                continue;
            }
            let short = short_name(&name);
            let text = read_text(&path, &name)?;
            composite.add(short.clone(), Arc::new(Template::parse(short, text)?))?;
        }

        Ok(composite)
    }

    fn names_or_disk(
        &self,
        names: Vec<String>,
        disk_search: bool,
        pat: &Regex,
    ) -> Result<Vec<String>> {
        if !names.is_empty() || !disk_search {
            return Ok(names);
        }

        tracing::debug!(
            "No registered assets match {}, searching {}",
            pat.as_str(),
            self.disk_root.display()
        );
        let mut names: Vec<String> = self
            .disk_names()?
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| pat.is_match(name))
            .collect();
        names.sort_unstable();
        Ok(names)
    }
}

fn matching(names: Vec<&str>, pat: &Regex) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| pat.is_match(name))
        .map(str::to_string)
        .collect()
}

fn short_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn disk_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("views/partials")).unwrap();
        fs::create_dir_all(temp.path().join(".cache")).unwrap();
        fs::write(temp.path().join("views/index.hbs"), "index {{> nav.hbs}}").unwrap();
        fs::write(temp.path().join("views/partials/nav.hbs"), "nav").unwrap();
        fs::write(temp.path().join("views/style.css"), "body {}").unwrap();
        fs::write(temp.path().join(".cache/old.hbs"), "stale").unwrap();
        temp
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let registry = Registry::new();
        let err = registry.matching_blob_names(false, "([").unwrap_err();
        assert!(matches!(err, EmbedError::InvalidPattern { ref pattern, .. } if pattern == "(["));
        assert!(registry.matching_templates(false, "base", "([").is_err());
    }

    #[test]
    fn empty_registry_without_disk_is_empty() {
        let registry = Registry::new();
        assert!(registry.matching_blob_names(false, "x").unwrap().is_empty());
        assert!(registry.matching_template_names(false, "x").unwrap().is_empty());
        assert!(registry.matching_templates(false, "base", "x").unwrap().is_empty());
    }

    #[test]
    fn blob_names_match_in_memory() {
        let mut registry = Registry::new();
        registry.add_blob("static/app.js", "");
        registry.add_blob("static/site.css", "");
        registry.add_blob("static/print.css", "");

        let names = registry.matching_blob_names(false, r"\.css$").unwrap();
        assert_eq!(names, vec!["static/print.css", "static/site.css"]);
    }

    #[test]
    fn disk_search_finds_visible_files() {
        let temp = disk_tree();
        let registry = Registry::with_disk_root(temp.path());

        let names = registry.matching_blob_names(true, r"\.hbs$").unwrap();
        assert_eq!(names, vec!["views/index.hbs", "views/partials/nav.hbs"]);
    }

    #[test]
    fn memory_match_suppresses_disk_search() {
        let temp = disk_tree();
        let mut registry = Registry::with_disk_root(temp.path());
        registry.add_blob("bundled/one.hbs", "");

        let names = registry.matching_blob_names(true, r"\.hbs$").unwrap();
        assert_eq!(names, vec!["bundled/one.hbs"]);
    }

    #[test]
    fn matching_templates_merges_by_short_name() {
        let mut registry = Registry::new();
        registry.add_template("views/layout.hbs", "<{{> body.hbs}}>").unwrap();
        registry.add_template("views/body.hbs", "{{text}}").unwrap();
        registry.add_template("mail/welcome.hbs", "unrelated").unwrap();

        let composite = registry.matching_templates(false, "page", "^views/").unwrap();
        assert_eq!(composite.member_names(), vec!["body.hbs", "layout.hbs"]);
        assert_eq!(
            composite
                .render("layout.hbs", &json!({ "text": "hi" }))
                .unwrap(),
            "<hi>"
        );
    }

    #[test]
    fn matching_templates_shares_registry_entries() {
        let mut registry = Registry::new();
        registry.add_template("a/x.hbs", "x").unwrap();

        let composite = registry.matching_templates(false, "page", "x").unwrap();
        let shared = registry.template("a/x.hbs", false).unwrap();
        assert!(Arc::ptr_eq(composite.get("x.hbs").unwrap(), &shared));
    }

    #[test]
    fn matching_templates_collision_is_reported() {
        let mut registry = Registry::new();
        registry.add_template("en/mail.hbs", "hello").unwrap();
        registry.add_template("fr/mail.hbs", "bonjour").unwrap();

        let err = registry.matching_templates(false, "page", "mail").unwrap_err();
        assert!(matches!(err, EmbedError::NameCollision { ref name, .. } if name == "mail.hbs"));
    }

    #[test]
    fn matching_templates_falls_back_to_disk() {
        let temp = disk_tree();
        let registry = Registry::with_disk_root(temp.path());

        let composite = registry.matching_templates(true, "page", r"\.hbs$").unwrap();
        assert_eq!(composite.member_names(), vec!["index.hbs", "nav.hbs"]);
        assert_eq!(
            composite.render("index.hbs", &json!({})).unwrap(),
            "index nav"
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn matching_templates_memory_suppresses_disk() {
        let temp = disk_tree();
        let mut registry = Registry::with_disk_root(temp.path());
        registry.add_template("only.hbs", "mem").unwrap();

        let composite = registry.matching_templates(true, "page", r"\.hbs$").unwrap();
        assert_eq!(composite.member_names(), vec!["only.hbs"]);
    }

    #[test]
    fn matching_does_not_mutate_registry() {
        let mut registry = Registry::new();
        registry.add_template("a.hbs", "a").unwrap();
        let before = registry.template_names().len();

        let _ = registry.matching_templates(false, "page", "a").unwrap();
        assert_eq!(registry.template_names().len(), before);
        assert!(!registry.has_template("page"));
    }

    #[test]
    fn short_name_takes_final_component() {
        assert_eq!(short_name("views/partials/nav.hbs"), "nav.hbs");
        assert_eq!(short_name("plain"), "plain");
    }
}
