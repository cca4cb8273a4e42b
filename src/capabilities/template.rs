//! # Template-field capability.
//!
//! A node that implements [`Templated`] publishes:
//! - an ordered list of field names eligible for substitution;
//! - an optional rendering hint per field, read by display tooling only;
//! - mutable access to those fields, the one declared mutation channel.
//!
//! [`render_template_fields`] walks the declared fields and renders every string
//! inside them through a [`Render`] engine, recursing into arrays and objects.
//! Non-string scalars are left untouched.
//!
//! ```text
//! op_args   = ["{{ ds }}", 3, {"path": "/data/{{ ds }}"}]
//!                  │               │
//!                  ▼               ▼
//! op_args   = ["2024-01-01", 3, {"path": "/data/2024-01-01"}]
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::error::DecorateError;

/// Display-format tag for a template field.
///
/// Has no effect on execution; syntax highlighters and log formatters use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderHint {
    /// Source-code-like literal (argument lists, mappings).
    Py,
    Json,
    Sql,
    Bash,
}

impl RenderHint {
    /// Short tag understood by rendering tools.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderHint::Py => "py",
            RenderHint::Json => "json",
            RenderHint::Sql => "sql",
            RenderHint::Bash => "bash",
        }
    }
}

impl fmt::Display for RenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable view of one declared template field.
#[derive(Debug)]
pub enum TemplateFieldMut<'a> {
    Sequence(&'a mut Vec<Value>),
    Mapping(&'a mut Map<String, Value>),
    Scalar(&'a mut Value),
}

/// # Declares which fields a templating engine may rewrite.
pub trait Templated {
    /// Field names eligible for substitution, in declaration order.
    fn template_fields(&self) -> &'static [&'static str];

    /// Rendering hint per field. Fields without an entry have no hint.
    fn template_fields_renderers(&self) -> &'static [(&'static str, RenderHint)] {
        &[]
    }

    /// Mutable access to a declared field; `None` for undeclared names.
    fn template_field_mut(&mut self, field: &str) -> Option<TemplateFieldMut<'_>>;

    /// Looks up the rendering hint for `field`.
    fn render_hint(&self, field: &str) -> Option<RenderHint> {
        self.template_fields_renderers()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, hint)| *hint)
    }
}

/// # Templating engine boundary.
///
/// Renders one template string against a context.
pub trait Render {
    fn render_str(&self, template: &str, context: &Map<String, Value>) -> Result<String, String>;
}

/// Renders every declared template field of `node` in place.
///
/// Stops at the first failure with [`DecorateError::Template`]; fields rendered
/// before the failure keep their new values.
pub fn render_template_fields<T, R>(
    node: &mut T,
    renderer: &R,
    context: &Map<String, Value>,
) -> Result<(), DecorateError>
where
    T: Templated + ?Sized,
    R: Render + ?Sized,
{
    for &field in node.template_fields() {
        let Some(target) = node.template_field_mut(field) else {
            continue;
        };
        let wrap = |reason: String| DecorateError::Template {
            field: field.to_string(),
            reason,
        };
        match target {
            TemplateFieldMut::Sequence(items) => {
                for item in items.iter_mut() {
                    render_value(item, renderer, context).map_err(wrap)?;
                }
            }
            TemplateFieldMut::Mapping(map) => {
                for value in map.values_mut() {
                    render_value(value, renderer, context).map_err(wrap)?;
                }
            }
            TemplateFieldMut::Scalar(value) => {
                render_value(value, renderer, context).map_err(wrap)?;
            }
        }
        tracing::trace!(field, "template field rendered");
    }
    Ok(())
}

/// Renders every string inside `value`, recursing into containers.
pub fn render_value<R: Render + ?Sized>(
    value: &mut Value,
    renderer: &R,
    context: &Map<String, Value>,
) -> Result<(), String> {
    match value {
        Value::String(s) => {
            *s = renderer.render_str(s, context)?;
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                render_value(item, renderer, context)?;
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                render_value(v, renderer, context)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// [`Render`] backed by a `minijinja` environment.
#[cfg(feature = "minijinja")]
#[derive(Debug)]
pub struct JinjaRenderer {
    env: minijinja::Environment<'static>,
}

#[cfg(feature = "minijinja")]
impl Default for JinjaRenderer {
    fn default() -> Self {
        Self {
            env: minijinja::Environment::new(),
        }
    }
}

#[cfg(feature = "minijinja")]
impl JinjaRenderer {
    /// Creates a renderer with the default filters and tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer around a preconfigured environment (filters, globals).
    pub fn with_env(env: minijinja::Environment<'static>) -> Self {
        Self { env }
    }
}

#[cfg(feature = "minijinja")]
impl Render for JinjaRenderer {
    fn render_str(&self, template: &str, context: &Map<String, Value>) -> Result<String, String> {
        self.env
            .render_str(template, context)
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Replaces `{{ key }}` with the context value for `key`.
    struct Substitute;

    impl Render for Substitute {
        fn render_str(
            &self,
            template: &str,
            context: &Map<String, Value>,
        ) -> Result<String, String> {
            let mut out = template.to_string();
            for (k, v) in context {
                let needle = format!("{{{{ {k} }}}}");
                let with = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                out = out.replace(&needle, &with);
            }
            if out.contains("{{") {
                return Err(format!("unresolved placeholder in {template:?}"));
            }
            Ok(out)
        }
    }

    struct Node {
        args: Vec<Value>,
        kwargs: Map<String, Value>,
        title: Value,
        untouched: Value,
    }

    impl Templated for Node {
        fn template_fields(&self) -> &'static [&'static str] {
            &["args", "kwargs", "title"]
        }

        fn template_fields_renderers(&self) -> &'static [(&'static str, RenderHint)] {
            &[("args", RenderHint::Json)]
        }

        fn template_field_mut(&mut self, field: &str) -> Option<TemplateFieldMut<'_>> {
            match field {
                "args" => Some(TemplateFieldMut::Sequence(&mut self.args)),
                "kwargs" => Some(TemplateFieldMut::Mapping(&mut self.kwargs)),
                "title" => Some(TemplateFieldMut::Scalar(&mut self.title)),
                _ => None,
            }
        }
    }

    fn node() -> Node {
        let Value::Object(kwargs) = json!({"path": "/data/{{ ds }}", "n": 2}) else {
            unreachable!()
        };
        Node {
            args: vec![json!("{{ ds }}"), json!(3), json!(["{{ ds }}", null])],
            kwargs,
            title: json!("run {{ ds }}"),
            untouched: json!("{{ ds }}"),
        }
    }

    fn context() -> Map<String, Value> {
        let mut ctx = Map::new();
        ctx.insert("ds".into(), json!("2024-01-01"));
        ctx
    }

    #[test]
    fn test_renders_strings_in_declared_fields_only() {
        let mut n = node();
        render_template_fields(&mut n, &Substitute, &context()).unwrap();

        assert_eq!(
            n.args,
            vec![json!("2024-01-01"), json!(3), json!(["2024-01-01", null])]
        );
        assert_eq!(n.kwargs["path"], json!("/data/2024-01-01"));
        assert_eq!(n.kwargs["n"], json!(2));
        assert_eq!(n.title, json!("run 2024-01-01"));
        assert_eq!(n.untouched, json!("{{ ds }}"));
    }

    #[test]
    fn test_render_failure_names_the_field() {
        let mut n = node();
        let err = render_template_fields(&mut n, &Substitute, &Map::new()).unwrap_err();
        assert!(matches!(err, DecorateError::Template { ref field, .. } if field == "args"));
    }

    #[test]
    fn test_scalar_field_failure_names_the_field() {
        let mut n = node();
        n.title = json!("{{ missing }}");
        let err = render_template_fields(&mut n, &Substitute, &context()).unwrap_err();
        assert!(matches!(err, DecorateError::Template { ref field, .. } if field == "title"));
        assert_eq!(n.args[0], json!("2024-01-01"));
    }

    #[test]
    fn test_render_hint_lookup() {
        let n = node();
        assert_eq!(n.render_hint("args"), Some(RenderHint::Json));
        assert_eq!(n.render_hint("kwargs"), None);
        assert_eq!(RenderHint::Py.to_string(), "py");
    }

    #[cfg(feature = "minijinja")]
    #[test]
    fn test_jinja_renderer() {
        let mut value = json!({"greeting": "hello {{ name | upper }}", "count": 1});
        let mut ctx = Map::new();
        ctx.insert("name".into(), json!("ada"));

        render_value(&mut value, &JinjaRenderer::new(), &ctx).unwrap();
        assert_eq!(value, json!({"greeting": "hello ADA", "count": 1}));
    }
}
