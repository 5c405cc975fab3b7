//! Orchestration-engine specific connection scripts.
//!
//! Each engine has a [`ScriptWriter`]; writers are looked up by the engine
//! identifier of the cluster template through a [`ScriptRegistry`].

mod kubernetes;
mod swarm;
mod template;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use coecreds_core::Cluster;

use crate::BundleError;

pub use kubernetes::{KubernetesWriter, KUBECONFIG_FILE};
pub use swarm::SwarmWriter;
pub use template::TemplateRenderer;

/// Script file name to script content.
pub type Scripts = BTreeMap<String, Vec<u8>>;

/// Shell preamble that sets `DIR` to the directory containing the sourced script.
pub(crate) const POSIX_SOURCE_DIR: &str = r#"__COECREDS_ENV_SOURCE="$_"
if [ -n "$BASH_SOURCE" ]; then
  __COECREDS_ENV_SOURCE="${BASH_SOURCE[0]}"
fi
DIR="$(cd "$(dirname "${__COECREDS_ENV_SOURCE:-$0}")" > /dev/null && \pwd)"
unset __COECREDS_ENV_SOURCE 2> /dev/null

"#;

/// Generates the connection scripts for one orchestration engine.
pub trait ScriptWriter: Send + Sync {
    /// Render every script for `cluster`.
    fn generate(&self, cluster: &Cluster, renderer: &TemplateRenderer)
        -> Result<Scripts, BundleError>;
}

/// Registered script writers, keyed by orchestration engine identifier.
pub struct ScriptRegistry {
    writers: HashMap<String, Arc<dyn ScriptWriter>>,
    renderer: TemplateRenderer,
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ScriptRegistry {
    /// Create a registry with no writers.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Create a registry with the built-in swarm and kubernetes writers.
    pub fn with_defaults() -> Self {
        let swarm: Arc<dyn ScriptWriter> = Arc::new(SwarmWriter);
        let mut registry = Self::new();
        registry.register_shared("swarm", swarm.clone());
        registry.register_shared("swarm-mode", swarm);
        registry.register("kubernetes", KubernetesWriter);
        registry
    }

    /// Register `writer` for the engine identifier `coe`, replacing any previous one.
    pub fn register(&mut self, coe: impl Into<String>, writer: impl ScriptWriter + 'static) {
        self.register_shared(coe, Arc::new(writer));
    }

    /// Register an already shared writer for `coe`.
    pub fn register_shared(&mut self, coe: impl Into<String>, writer: Arc<dyn ScriptWriter>) {
        self.writers.insert(coe.into(), writer);
    }

    /// Returns true if a writer is registered for `coe`.
    pub fn is_supported(&self, coe: &str) -> bool {
        self.writers.contains_key(coe)
    }

    /// Registered engine identifiers, sorted.
    pub fn engines(&self) -> Vec<&str> {
        let mut engines: Vec<&str> = self.writers.keys().map(String::as_str).collect();
        engines.sort_unstable();
        engines
    }

    /// Resolve the writer for `coe`.
    pub fn writer_for<'a>(&'a self, coe: &'a str) -> Result<SelectedWriter<'a>, BundleError> {
        let writer = self
            .writers
            .get(coe)
            .ok_or_else(|| BundleError::UnsupportedCoe(coe.to_string()))?;

        Ok(SelectedWriter {
            coe,
            writer: writer.as_ref(),
            renderer: &self.renderer,
        })
    }

    /// Render the scripts for `cluster` running engine `coe`.
    pub fn generate(&self, coe: &str, cluster: &Cluster) -> Result<Scripts, BundleError> {
        self.writer_for(coe)?.render(cluster)
    }
}

/// A writer resolved from the registry, ready to render.
pub struct SelectedWriter<'a> {
    coe: &'a str,
    writer: &'a dyn ScriptWriter,
    renderer: &'a TemplateRenderer,
}

impl SelectedWriter<'_> {
    /// Engine identifier the writer was resolved for.
    pub fn coe(&self) -> &str {
        self.coe
    }

    /// Render every script for `cluster`.
    pub fn render(&self, cluster: &Cluster) -> Result<Scripts, BundleError> {
        self.writer.generate(cluster, self.renderer)
    }
}
