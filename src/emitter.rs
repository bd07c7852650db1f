//! Rust source generation for embedded assets.
//!
//! [`Emitter::emit`] walks an asset directory and writes a Rust source file
//! whose `init` function rebuilds the same [`Registry`](crate::registry::Registry)
//! contents at startup, so the asset files need not ship with the binary:
//!
//! ```text
//! // Embedded assets for the `assets` module.
//! // @generated by embedgen. Do not edit.
//!
//! use embedgen::Registry;
//!
//! pub fn init(registry: &mut Registry) {
//!     registry.add_template("www/index.hbs", "<h1>{{title}}</h1>\n").expect("invalid embedded template");
//! }
//! ```
//!
//! Asset names are relative to the *parent* of the scanned directory, so
//! scanning `www/` registers `www/index.hbs`.
//!
//! The destination is written in place. A failure part-way through leaves a
//! partially written file behind.

use crate::error::{EmbedError, Result};
use crate::registry::AssetMode;
use crate::walker;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Default path of the registry type imported by generated code.
pub const DEFAULT_REGISTRY_PATH: &str = "embedgen::Registry";

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// Absolute path of the written file.
    pub dst: PathBuf,
    /// Registered asset names, in walk order.
    pub assets: Vec<String>,
}

/// Generates Rust source that registers a directory's assets.
#[derive(Debug, Clone)]
pub struct Emitter {
    mode: AssetMode,
    registry_path: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(AssetMode::Template)
    }
}

impl Emitter {
    /// Create an emitter that registers assets in `mode`.
    pub fn new(mode: AssetMode) -> Self {
        Self {
            mode,
            registry_path: DEFAULT_REGISTRY_PATH.to_string(),
        }
    }

    /// Set the path the generated code imports the registry type from.
    pub fn registry_path(mut self, path: impl Into<String>) -> Self {
        self.registry_path = path.into();
        self
    }

    /// Walk `dir` and write the generated source to `dst`, truncating any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns `IoAt` if the tree cannot be walked, a file cannot be read, or
    /// `dst` cannot be written; `InvalidUtf8` for non-UTF-8 content in
    /// template mode.
    pub fn emit(&self, dir: &Path, dst: &Path) -> Result<EmitReport> {
        let dst = absolute(dst)?;
        let dir = absolute(dir)?;
        let files = walker::children(&dir)?;
        let name_root = dir.parent().unwrap_or(&dir).to_path_buf();

        tracing::debug!(
            "Generating {} {} assets from {} into {}",
            files.len(),
            self.mode,
            dir.display(),
            dst.display()
        );

        let file = fs::File::create(&dst).map_err(|e| EmbedError::io_at(&dst, e))?;
        let mut out = BufWriter::new(file);
        let write_err = |e| EmbedError::io_at(&dst, e);

        out.write_all(self.header(&module_name(&dst)).as_bytes())
            .map_err(write_err)?;

        let mut assets = Vec::with_capacity(files.len());
        for path in &files {
            let content = fs::read(path).map_err(|e| EmbedError::io_at(path, e))?;
            let name = walker::asset_name(path.strip_prefix(&name_root).unwrap_or(path));
            let statement = self.statement(&name, &content, path)?;
            tracing::debug!("Embedding {} ({} bytes)", name, content.len());
            out.write_all(statement.as_bytes()).map_err(write_err)?;
            assets.push(name);
        }

        out.write_all(b"}\n").map_err(write_err)?;
        out.flush().map_err(write_err)?;

        tracing::debug!(
            "Wrote {} asset{} to {}",
            assets.len(),
            if assets.len() == 1 { "" } else { "s" },
            dst.display()
        );
        Ok(EmitReport { dst, assets })
    }

    fn header(&self, module: &str) -> String {
        // A bare type name is already in scope, and `use Name;` is rejected
        // in 2018+ editions.
        let (import, type_name) = match self.registry_path.rsplit_once("::") {
            Some((_, type_name)) => (format!("use {};\n\n", self.registry_path), type_name),
            None => (String::new(), self.registry_path.as_str()),
        };
        format!(
            "// Embedded assets for the `{module}` module.\n\
             // @generated by embedgen. Do not edit.\n\
             \n\
             {import}\
             /// Register every embedded asset with `registry`.\n\
             pub fn init(registry: &mut {type_name}) {{\n"
        )
    }

    fn statement(&self, name: &str, content: &[u8], path: &Path) -> Result<String> {
        match self.mode {
            AssetMode::Template => {
                let text = std::str::from_utf8(content).map_err(|_| EmbedError::InvalidUtf8 {
                    path: path.to_path_buf(),
                })?;
                Ok(format!(
                    "    registry.add_template({}, {}).expect(\"invalid embedded template\");\n",
                    string_literal(name),
                    string_literal(text)
                ))
            }
            AssetMode::Blob => Ok(format!(
                "    registry.add_blob({}, {});\n",
                string_literal(name),
                byte_string_literal(content)
            )),
        }
    }
}

/// Render `s` as a Rust string literal.
pub fn string_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Render `bytes` as a Rust byte-string literal.
pub fn byte_string_literal(bytes: &[u8]) -> String {
    format!("b\"{}\"", bytes.escape_ascii())
}

/// Resolve `path` against the current directory and lexically remove `.`
/// and `..` components.
fn absolute(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path).map_err(|e| EmbedError::io_at(path, e))?;
    let mut clean = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other.as_os_str()),
        }
    }
    Ok(clean)
}

/// Name of the directory containing `dst`.
fn module_name(dst: &Path) -> String {
    dst.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "assets".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let assets = temp.path().join("assets");
        let out_dir = temp.path().join("generated");
        fs::create_dir_all(&assets).unwrap();
        fs::create_dir_all(&out_dir).unwrap();
        (temp, assets, out_dir.join("assets.rs"))
    }

    #[test]
    fn emits_visible_files_relative_to_parent() {
        let (_temp, assets, dst) = setup();
        fs::write(assets.join("a.txt"), "hello").unwrap();
        fs::write(assets.join(".hidden"), "secret").unwrap();

        let report = Emitter::default().emit(&assets, &dst).unwrap();
        assert_eq!(report.assets, vec!["assets/a.txt"]);

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(generated.contains(
            "    registry.add_template(\"assets/a.txt\", \"hello\").expect(\"invalid embedded template\");\n"
        ));
        assert!(!generated.contains("hidden"));
        assert!(!generated.contains("secret"));
        assert_eq!(generated.matches("registry.add_template(").count(), 1);
    }

    #[test]
    fn header_names_module_and_import() {
        let (_temp, assets, dst) = setup();
        Emitter::default().emit(&assets, &dst).unwrap();

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(generated.starts_with("// Embedded assets for the `generated` module.\n"));
        assert!(generated.contains("use embedgen::Registry;\n"));
        assert!(generated.contains("pub fn init(registry: &mut Registry) {\n"));
        assert!(generated.ends_with("}\n"));
    }

    #[test]
    fn custom_registry_path() {
        let (_temp, assets, dst) = setup();
        Emitter::default()
            .registry_path("crate::store::AssetStore")
            .emit(&assets, &dst)
            .unwrap();

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(generated.contains("use crate::store::AssetStore;\n"));
        assert!(generated.contains("pub fn init(registry: &mut AssetStore) {\n"));
    }

    #[test]
    fn single_segment_registry_path_skips_import() {
        let (_temp, assets, dst) = setup();
        Emitter::default()
            .registry_path("AssetStore")
            .emit(&assets, &dst)
            .unwrap();

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(!generated.contains("use "));
        assert!(generated.contains(
            "// @generated by embedgen. Do not edit.\n\n/// Register every embedded asset"
        ));
        assert!(generated.contains("pub fn init(registry: &mut AssetStore) {\n"));
    }

    #[test]
    fn escapes_template_text() {
        let (_temp, assets, dst) = setup();
        fs::write(assets.join("q.hbs"), "say \"hi\"\n\\path\t").unwrap();
        Emitter::default().emit(&assets, &dst).unwrap();

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(generated.contains(r#""say \"hi\"\n\\path\t""#));
    }

    #[test]
    fn blob_mode_emits_byte_strings() {
        let (_temp, assets, dst) = setup();
        fs::write(assets.join("logo.png"), b"\x89PNG\r\n\"").unwrap();

        Emitter::new(AssetMode::Blob).emit(&assets, &dst).unwrap();
        let generated = fs::read_to_string(&dst).unwrap();
        assert!(generated
            .contains(r#"    registry.add_blob("assets/logo.png", b"\x89PNG\r\n\"");"#));
    }

    #[test]
    fn template_mode_rejects_binary() {
        let (_temp, assets, dst) = setup();
        fs::write(assets.join("logo.png"), b"\xff\xfe").unwrap();

        let err = Emitter::default().emit(&assets, &dst).unwrap_err();
        assert!(matches!(err, EmbedError::InvalidUtf8 { .. }));
    }

    #[test]
    fn nested_files_keep_directory_names() {
        let (_temp, assets, dst) = setup();
        fs::create_dir_all(assets.join("css")).unwrap();
        fs::write(assets.join("css/site.css"), "body {}").unwrap();

        let report = Emitter::new(AssetMode::Blob).emit(&assets, &dst).unwrap();
        assert_eq!(report.assets, vec!["assets/css/site.css"]);
    }

    #[test]
    fn truncates_existing_destination() {
        let (_temp, assets, dst) = setup();
        fs::write(&dst, "old contents that should disappear").unwrap();
        Emitter::default().emit(&assets, &dst).unwrap();

        let generated = fs::read_to_string(&dst).unwrap();
        assert!(!generated.contains("old contents"));
    }

    #[test]
    fn missing_source_dir_fails_before_writing() {
        let (temp, _assets, dst) = setup();
        let err = Emitter::default()
            .emit(&temp.path().join("nope"), &dst)
            .unwrap_err();
        assert!(matches!(err, EmbedError::IoAt { .. }));
        assert!(!dst.exists());
    }

    #[test]
    fn unwritable_destination_fails() {
        let (temp, assets, _dst) = setup();
        let dst = temp.path().join("no/such/dir/out.rs");
        let err = Emitter::default().emit(&assets, &dst).unwrap_err();
        assert!(matches!(err, EmbedError::IoAt { .. }));
    }

    #[test]
    fn absolute_removes_dot_components() {
        let abs = absolute(Path::new("/a/./b/../c")).unwrap();
        assert_eq!(abs, PathBuf::from("/a/c"));
    }

    #[test]
    fn literal_helpers() {
        assert_eq!(string_literal("a\"b"), r#""a\"b""#);
        assert_eq!(byte_string_literal(&[0, b'a', b'\'']), r#"b"\x00a\'""#);
    }
}
