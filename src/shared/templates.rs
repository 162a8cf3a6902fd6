//! HTML template rendering backed by minijinja.
//!
//! Templates live under `templates/pages/` and are loaded once into a
//! process-wide environment on first render.

use std::path::Path;
use std::sync::OnceLock;

use minijinja::Environment;
use serde::Serialize;

use crate::shared::constants::category_label;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATE_DIR: &str = "templates/pages";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_filter("category_label", |slug: String| {
        category_label(&slug).to_string()
    });

    let template_path = Path::new(TEMPLATE_DIR);
    if let Ok(entries) = std::fs::read_dir(template_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                let name = path
                    .file_stem()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                if let Ok(content) = std::fs::read_to_string(&path) {
                    let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
                    let static_content: &'static str = Box::leak(content.into_boxed_str());
                    if let Err(e) = env.add_template(static_name, static_content) {
                        tracing::warn!("Failed to load template {}: {}", name, e);
                    } else {
                        tracing::debug!("Loaded template: {}", name);
                    }
                }
            }
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
pub fn render_page<S: Serialize>(name: &str, context: S) -> Result<String, TemplateError> {
    let env = get_environment();
    let template = env
        .get_template(name)
        .map_err(|_| TemplateError::NotFound(name.to_string()))?;
    template
        .render(context)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
