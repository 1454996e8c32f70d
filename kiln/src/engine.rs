//! The file system and document factory a generation run works with.

use std::path::Path;

use log::{debug, info};

use crate::config::Config;
use crate::document::DocumentFactory;
use crate::error::Result;
use crate::io::{Directory, FileSystem, DEFAULT_OUTPUT_PATH};
use crate::metadata::{settings_from_yaml, MetadataStack};
use crate::path::normalize::{absolute_directory, expand_tilde};
use crate::path::DirectoryPath;

/// Everything a consumer module needs: where files live and how documents
/// are made.
///
/// # Examples
///
/// ```
/// use kiln::config::{Config, ConfigBuilder};
/// use kiln::Engine;
/// use std::path::Path;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { root_path: Some("site".into()), ..Default::default() })
///     .build()
///     .unwrap();
///
/// let engine = Engine::from_config(&config, Path::new("/work")).unwrap();
/// assert_eq!(engine.file_system().root_path().to_string(), "/work/site");
/// assert_eq!(engine.file_system().output_path().to_string(), "/work/site/output");
/// ```
#[derive(Debug)]
pub struct Engine {
    file_system: FileSystem,
    documents: DocumentFactory,
    clean_output: bool,
}

impl Engine {
    /// Assemble an engine from parts.
    #[must_use]
    pub fn new(file_system: FileSystem, documents: DocumentFactory) -> Self {
        Self {
            file_system,
            documents,
            clean_output: false,
        }
    }

    /// Build an engine backed by the local disk.
    ///
    /// A relative root resolves against `working_dir`; relative output and
    /// input paths stay relative to the root. `~` expands everywhere.
    ///
    /// # Errors
    ///
    /// Fails when a configured path is malformed, or `working_dir` is needed
    /// and is not absolute.
    pub fn from_config(config: &Config, working_dir: &Path) -> Result<Self> {
        let root_text = config.root_path.as_deref().unwrap_or(".");
        let root = absolute_directory(root_text, working_dir)?;
        let mut file_system = FileSystem::local(root.clone())?;

        let output_text = config.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH);
        let output = DirectoryPath::new(&expand_tilde(output_text)?)?;
        file_system.set_output_path(root.combine(&output)?)?;

        if let Some(inputs) = &config.input_paths {
            let inputs = inputs
                .iter()
                .map(|raw| DirectoryPath::new(&expand_tilde(raw)?))
                .collect::<Result<Vec<_>>>()?;
            file_system.set_input_paths(inputs);
        }

        debug!("Engine file system: {file_system:?}");

        let documents = DocumentFactory::new(settings_from_yaml(&config.settings));
        Ok(Self {
            file_system,
            documents,
            clean_output: config.should_clean_output(),
        })
    }

    /// Empty the output directory before writing.
    #[must_use]
    pub fn with_clean_output(mut self, clean: bool) -> Self {
        self.clean_output = clean;
        self
    }

    /// The file system.
    #[must_use]
    pub fn file_system(&self) -> &FileSystem {
        &self.file_system
    }

    /// Mutable access, for registering providers or adjusting paths.
    pub fn file_system_mut(&mut self) -> &mut FileSystem {
        &mut self.file_system
    }

    /// The document factory.
    #[must_use]
    pub fn documents(&self) -> &DocumentFactory {
        &self.documents
    }

    /// The settings every document starts from.
    #[must_use]
    pub fn settings(&self) -> &MetadataStack {
        self.documents.settings()
    }

    /// Whether [`prepare_output`](Self::prepare_output) empties the output
    /// directory.
    #[must_use]
    pub fn clean_output(&self) -> bool {
        self.clean_output
    }

    /// Make sure the output directory exists, cleaning it first if
    /// configured.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub fn prepare_output(&self) -> Result<()> {
        if self.clean_output {
            return self.file_system.clean_output_directory();
        }
        let output = self.file_system.get_output_directory(None)?;
        if !output.exists() {
            info!("Creating output directory {}", output.path());
            output.create()?;
        }
        Ok(())
    }
}
