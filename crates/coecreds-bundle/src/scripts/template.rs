//! Template substitution for connection scripts.
//!
//! Scripts are plain text with `{{ name }}` placeholders. Only variable
//! substitution is used; referencing an unknown variable is an error.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::BundleError;

/// Renders script templates.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Create a renderer with strict undefined handling.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render `source` with `ctx`, naming it `name` in errors.
    pub fn render<S: Serialize>(
        &self,
        name: &str,
        source: &str,
        ctx: S,
    ) -> Result<Vec<u8>, BundleError> {
        self.env
            .render_str(source, ctx)
            .map(String::into_bytes)
            .map_err(|e| BundleError::Template {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_substitutes_and_keeps_trailing_newline() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("t", "HOST={{ host }}\n", context! { host => "tcp://1.2.3.4:2376" })
            .unwrap();
        assert_eq!(out, b"HOST=tcp://1.2.3.4:2376\n");
    }

    #[test]
    fn test_shell_syntax_passes_through() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("t", "X=\"${BASH_SOURCE[0]}\" %~dp0 $env:Y\n", context! {})
            .unwrap();
        assert_eq!(out, b"X=\"${BASH_SOURCE[0]}\" %~dp0 $env:Y\n");
    }

    #[test]
    fn test_undefined_variable_is_error() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render("docker.env", "{{ missing }}", context! {});
        assert!(matches!(result, Err(BundleError::Template { name, .. }) if name == "docker.env"));
    }
}
