//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::sync::Arc;

use crate::application::services::TranslateService;
use crate::config::Settings;
use crate::domain::{TranslateOptions, Translator};
use crate::infrastructure::traits::{FileSystem, RealFileSystem, TreeLoader};
use crate::infrastructure::xml::{LoaderOptions, XmlTreeLoader};

/// Container holding the settings and I/O boundaries shared by all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Source document loader
    pub loader: Arc<dyn TreeLoader>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let loader = XmlTreeLoader::new(LoaderOptions {
            trim_text: settings.loader.trim_text,
        });
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(loader))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        loader: Arc<dyn TreeLoader>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            loader,
        }
    }

    /// Translator configured from settings.
    pub fn translator(&self) -> Translator {
        Translator::new(TranslateOptions {
            abs_operands: self.settings.translate.abs_operands,
        })
    }

    pub fn translate_service(&self) -> TranslateService {
        TranslateService::new(self.fs.clone(), self.loader.clone(), self.translator())
            .with_trailing_newline(self.settings.output.trailing_newline)
    }
}
