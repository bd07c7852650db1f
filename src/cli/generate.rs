//! Generate command implementation.
//!
//! Resolves settings from `embedgen.yml` and command-line flags, then runs
//! the [`Emitter`].

use std::path::{Path, PathBuf};

use crate::cli::args::usage;
use crate::cli::command::{Command, CommandResult, EXIT_INVALID_TYPE, EXIT_USAGE};
use crate::config::{find_config, load_config_file, GenerateConfig};
use crate::emitter::{Emitter, DEFAULT_REGISTRY_PATH};
use crate::error::Result;
use crate::registry::AssetMode;
use crate::ui::UserInterface;

/// The generate command implementation.
pub struct GenerateCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    overrides: GenerateConfig,
}

impl GenerateCommand {
    /// Create a new generate command.
    ///
    /// `config_path` is an explicit config file; without one, `embedgen.yml`
    /// in `working_dir` is used if present.
    pub fn new(
        working_dir: &Path,
        config_path: Option<PathBuf>,
        overrides: GenerateConfig,
    ) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path,
            overrides,
        }
    }

    fn resolve_config(&self) -> Result<GenerateConfig> {
        let path = self
            .config_path
            .clone()
            .or_else(|| find_config(&self.working_dir));

        let file_config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            }
            None => GenerateConfig::default(),
        };

        Ok(file_config.merge(self.overrides.clone()))
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.resolve_config()?;

        let Some(dst) = config.dst else {
            ui.error("No destination file given; pass --dst <FILE>");
            ui.message(&usage());
            return Ok(CommandResult::failure(EXIT_USAGE));
        };

        let mode = match config.asset_type.as_deref() {
            None => AssetMode::default(),
            Some(raw) => match raw.parse::<AssetMode>() {
                Ok(mode) => mode,
                Err(e) => {
                    ui.error(&format!("{}; expected 'template' or 'blob'", e));
                    ui.message(&usage());
                    return Ok(CommandResult::failure(EXIT_INVALID_TYPE));
                }
            },
        };

        let dir = config.dir.unwrap_or_else(|| self.working_dir.clone());
        let registry_path = config
            .registry_path
            .unwrap_or_else(|| DEFAULT_REGISTRY_PATH.to_string());

        let report = Emitter::new(mode)
            .registry_path(registry_path)
            .emit(&dir, &dst)?;

        if ui.output_mode().shows_details() {
            for name in &report.assets {
                ui.message(&format!("  {}", name));
            }
        }
        if report.assets.is_empty() {
            ui.warning(&format!("No assets found in {}", dir.display()));
        }
        ui.success(&format!(
            "Embedded {} {} asset{} into {}",
            report.assets.len(),
            mode,
            if report.assets.len() == 1 { "" } else { "s" },
            report.dst.display()
        ));

        Ok(CommandResult::success())
    }
}
