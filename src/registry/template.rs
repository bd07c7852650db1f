//! Parsed templates and composite template namespaces.
//!
//! Parsing and rendering are delegated to [`handlebars`]; this module only
//! tracks which named templates exist and how they are grouped.

use crate::error::{EmbedError, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named, parsed text template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
    compiled: handlebars::Template,
}

impl Template {
    /// Parse `text` as a template called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the template syntax is invalid.
    pub fn parse(name: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = text.into();
        let compiled =
            handlebars::Template::compile(&source).map_err(|e| EmbedError::ParseError {
                name: name.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            name,
            source,
            compiled,
        })
    }

    /// The template's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The text the template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render this template on its own against `data`.
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        let mut hb = engine();
        hb.register_template(&self.name, self.compiled.clone());
        hb.render(&self.name, data).map_err(|e| EmbedError::Render {
            name: self.name.clone(),
            message: e.to_string(),
        })
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.source == other.source
    }
}

/// An on-demand namespace of templates built around an (empty) base template.
///
/// Members are shared with the registry they came from, not copied. Every
/// member can include any other as a partial (`{{> name}}`).
#[derive(Debug, Clone)]
pub struct CompositeTemplate {
    base: Arc<Template>,
    members: BTreeMap<String, Arc<Template>>,
}

impl CompositeTemplate {
    /// Create a composite whose base template is empty.
    pub fn new(base_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: Arc::new(Template::parse(base_name, "")?),
            members: BTreeMap::new(),
        })
    }

    /// Name of the base template.
    pub fn base_name(&self) -> &str {
        self.base.name()
    }

    /// Add `template` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `NameCollision` if `name` is already defined in this composite;
    /// the composite is left unchanged.
    pub fn add(&mut self, name: impl Into<String>, template: Arc<Template>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(EmbedError::NameCollision {
                name,
                composite: self.base.name().to_string(),
            });
        }
        self.members.insert(name, template);
        Ok(())
    }

    /// Whether `name` is defined, including the base template.
    pub fn contains(&self, name: &str) -> bool {
        name == self.base.name() || self.members.contains_key(name)
    }

    /// Look up a member by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Template>> {
        if name == self.base.name() {
            Some(&self.base)
        } else {
            self.members.get(name)
        }
    }

    /// Names of the merged sub-templates, sorted, excluding the base.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.keys().map(|s| s.as_str()).collect()
    }

    /// Number of templates defined, including the base.
    pub fn len(&self) -> usize {
        self.members.len() + 1
    }

    /// Whether no sub-templates have been merged.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Render the member called `name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name and `Render` if expansion fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        if !self.contains(name) {
            return Err(EmbedError::NotFound {
                name: name.to_string(),
            });
        }

        let mut hb = engine();
        hb.register_template(self.base.name(), self.base.compiled.clone());
        for (member, template) in &self.members {
            hb.register_template(member, template.compiled.clone());
        }
        hb.render(name, data).map_err(|e| EmbedError::Render {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Render the base template.
    pub fn render_base<T: Serialize>(&self, data: &T) -> Result<String> {
        self.render(self.base.name(), data)
    }
}

fn engine() -> Handlebars<'static> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb
}
