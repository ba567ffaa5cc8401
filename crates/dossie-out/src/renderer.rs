//! Template rendering for the dossier.
//!
//! Handlebars with HTML escaping disabled (the output is Markdown, not HTML)
//! and two helpers:
//! - join: join an array with a separator
//! - default: fallback for null or empty values

use dossie_core::DossieError;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde::Serialize;

use crate::templates::TemplatesFile;

/// Compiled renderer with registered helpers
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    templates: TemplatesFile,
}

impl TemplateRenderer {
    /// Compile every template in the file
    pub fn new(templates: TemplatesFile) -> Result<Self, DossieError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("join", Box::new(JoinHelper));
        handlebars.register_helper("default", Box::new(DefaultHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| DossieError::Configuration(format!("template {}: {}", name, e)))?;
        }

        Ok(TemplateRenderer { handlebars, templates })
    }

    /// Renderer over the built-in templates
    pub fn builtin() -> Result<Self, DossieError> {
        Self::new(TemplatesFile::builtin()?)
    }

    /// Load from a file path
    pub fn load(path: &str) -> Result<Self, DossieError> {
        Self::new(TemplatesFile::load(path)?)
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(
        &self,
        template_name: &str,
        data: &T,
    ) -> Result<String, DossieError> {
        if self.templates.get(template_name).is_none() {
            return Err(DossieError::Configuration(format!(
                "unknown template: {}",
                template_name
            )));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| DossieError::Render(e.to_string()))
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Join an array with a separator
struct JoinHelper;

impl HelperDef for JoinHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let array = h.param(0).and_then(|v| v.value().as_array());

        let separator = h
            .param(1)
            .and_then(|v| v.value().as_str())
            .unwrap_or(", ");

        if let Some(arr) = array {
            let strings: Vec<String> = arr
                .iter()
                .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
                .collect();
            out.write(&strings.join(separator))?;
        }

        Ok(())
    }
}

/// Default value helper; empty strings count as missing
struct DefaultHelper;

impl HelperDef for DefaultHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let default = h
            .param(1)
            .and_then(|v| v.value().as_str())
            .unwrap_or("");

        match value {
            Some(v) if v.is_null() => out.write(default)?,
            Some(v) => match v.as_str() {
                Some("") => out.write(default)?,
                Some(s) => out.write(s)?,
                None => out.write(&v.to_string())?,
            },
            None => out.write(default)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_templates() -> TemplatesFile {
        TemplatesFile::from_yaml(
            r#"
version: "1.0"
templates:
  list:
    description: List items
    template: "Items: {{join items \" / \"}}"
  fallback:
    description: Default value
    template: "Tom: {{default tone \"-\"}}"
  raw:
    description: Unescaped text
    template: "{{text}}"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_join_helper() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        let result = renderer.render("list", &json!({ "items": ["a", "b", 3] })).unwrap();
        assert_eq!(result, "Items: a / b / 3");
    }

    #[test]
    fn test_default_helper() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        assert_eq!(renderer.render("fallback", &json!({})).unwrap(), "Tom: -");
        assert_eq!(renderer.render("fallback", &json!({ "tone": "" })).unwrap(), "Tom: -");
        assert_eq!(
            renderer.render("fallback", &json!({ "tone": "direto" })).unwrap(),
            "Tom: direto"
        );
    }

    #[test]
    fn test_no_html_escaping() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        let text = "\"Giselle\" & <Coppélia>";
        assert_eq!(renderer.render("raw", &json!({ "text": text })).unwrap(), text);
    }

    #[test]
    fn test_unknown_template() {
        let renderer = TemplateRenderer::new(test_templates()).unwrap();
        assert!(renderer.render("nope", &json!({})).unwrap_err().is_configuration());
    }

    #[test]
    fn test_broken_template_rejected_at_load() {
        let file = TemplatesFile::from_yaml(
            r#"
version: "1.0"
templates:
  broken:
    template: "{{#if x}}unclosed"
"#,
        )
        .unwrap();
        assert!(TemplateRenderer::new(file).is_err());
    }
}
