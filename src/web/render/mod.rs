use rust_embed::RustEmbed;
use tera::{Context, Tera};
use thiserror::Error;

use crate::dashboard::state::SharedDashboard;

pub mod page;
pub mod uptime_bar;

pub use page::DashboardPage;

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

#[derive(RustEmbed)]
#[folder = "templates"]
pub struct Templates;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template {0} is not valid UTF-8")]
    InvalidEncoding(String),
    #[error("Templating error: {0}")]
    Template(#[from] tera::Error),
}

/// Tera's HTML escaping with `/` left readable, so URLs and "97/100" render
/// as written.
pub fn escape_markup(input: &str) -> String {
    tera::escape_html(input).replace("&#x2F;", "/")
}

/// Renders dashboard pages from the embedded templates.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut sources = Vec::new();
        for name in Templates::iter() {
            let Some(file) = Templates::get(&name) else {
                continue;
            };
            let source = String::from_utf8(file.data.into_owned())
                .map_err(|_| RenderError::InvalidEncoding(name.to_string()))?;
            sources.push((name.to_string(), source));
        }

        let mut tera = Tera::default();
        // Names end in `.html`, so Tera's autoescaping applies to all of them.
        tera.add_raw_templates(sources)?;
        tera.set_escape_fn(escape_markup);
        Ok(Self { tera })
    }

    pub fn render(&self, page: &DashboardPage) -> Result<String, RenderError> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(DASHBOARD_TEMPLATE, &context)?)
    }

    /// Builds the page from shared state and renders it. The state lock is
    /// released before templating.
    pub async fn render_shared(
        &self,
        dashboard: &SharedDashboard,
        locale: &str,
        request_url: &str,
    ) -> Result<String, RenderError> {
        let page = {
            let mut state = dashboard.lock().await;
            DashboardPage::build(&mut state, locale, request_url)
        };
        self.render(&page)
    }
}
