use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera};

use crate::assets::AssetLoader;
use crate::models::AnalysisSession;

const DASHBOARD_TEMPLATE: &str = "dashboard.html";
const NOTICE_TEMPLATE: &str = "notice.html";

/// Error type for template rendering
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("Template not found: {0}")]
    NotFound(String),
}

/// Renders dashboard pages with Tera
pub struct PageRenderer {
    assets: Arc<AssetLoader>,
}

impl PageRenderer {
    pub fn new(assets: Arc<AssetLoader>) -> Self {
        let templates = assets.list_templates();
        tracing::info!(templates = templates.len(), "Page renderer initialized");
        Self { assets }
    }

    /// Register custom Tera filters
    fn register_filters(tera: &mut Tera) {
        tera.register_filter(
            "truncate",
            |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let s = tera::try_get_value!("truncate", "value", String, value);
                let len = args.get("length").and_then(|v| v.as_u64()).unwrap_or(50) as usize;

                if s.chars().count() <= len {
                    Ok(tera::Value::String(s))
                } else {
                    let truncated =
                        s.chars().take(len.saturating_sub(3)).collect::<String>() + "...";
                    Ok(tera::Value::String(truncated))
                }
            },
        );

        tera.register_filter(
            "format_time",
            |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let ts = tera::try_get_value!("format_time", "value", i64, value);
                let fmt = args
                    .get("format")
                    .and_then(|v| v.as_str())
                    .unwrap_or("%H:%M");

                use chrono::{TimeZone, Utc};
                if let Some(dt) = Utc.timestamp_opt(ts, 0).single() {
                    Ok(tera::Value::String(dt.format(fmt).to_string()))
                } else {
                    Ok(tera::Value::String("--:--".to_string()))
                }
            },
        );
    }

    /// Render a named template with the given context.
    ///
    /// Templates are loaded fresh on every call so an external
    /// TEMPLATES_DIR can be edited while the server runs.
    fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        let source = self
            .assets
            .read_template_string(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        let mut tera = Tera::default();
        tera.add_raw_template(name, &source)?;
        Self::register_filters(&mut tera);

        Ok(tera.render(name, context)?)
    }

    /// Full dashboard page for an analysis session
    pub fn render_dashboard(&self, session: &AnalysisSession) -> Result<String, TemplateError> {
        let view = &session.view;
        let mut context = Context::new();
        context.insert("pigment_id", &session.pigment_id);
        context.insert("fingerprint", &session.fingerprint);
        context.insert("generated_at", &session.generated_at.timestamp());
        context.insert("view", view);
        context.insert("method_tabs", &[&view.euclidean, &view.cosine, &view.knn]);

        self.render(DASHBOARD_TEMPLATE, &context)
    }

    /// Page with a single notice, used when no dashboard can be shown.
    ///
    /// Falls back to a minimal inline page if the notice template itself
    /// cannot be rendered.
    pub fn render_notice(&self, title: &str, message: &str) -> String {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("message", message);

        match self.render(NOTICE_TEMPLATE, &context) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, "Notice template failed, using inline page");
                let mut escaped = Context::new();
                escaped.insert("t", title);
                escaped.insert("m", message);
                Tera::one_off(
                    "<!DOCTYPE html><html><body><h1>{{ t }}</h1><p>{{ m }}</p></body></html>",
                    &escaped,
                    true,
                )
                .unwrap_or_else(|_| "<!DOCTYPE html><html><body><h1>Error</h1></body></html>".to_string())
            }
        }
    }
}
