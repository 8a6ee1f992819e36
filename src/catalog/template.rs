use crate::error::CatalogError;
use tera::{Context, Tera};

const SYSTEM_TEMPLATE: &str = "system";
const TASK_TEMPLATE: &str = "task";

const DEFAULT_SYSTEM: &str = "\
You are {{ persona.name }}, {{ persona.role }}.
Your goal: {{ persona.goal }}.
{{ persona.backstory }}
You are talking with {{ username }}. Stay in character at all times and never mention being an AI model.";

const DEFAULT_TASK: &str = "\
Activity: {{ activity.title }}
{{ activity.brief }}
{% if history %}
Conversation so far (oldest first):
{% for line in history %}{{ line }}
{% endfor %}{% endif %}
{{ username }} says: \"{{ user_input }}\"

Reply to {{ username }} directly as {{ persona.name }}.";

/// Tera templates for persona system prompts and task descriptions.
pub struct PromptTemplates {
    tera: Tera,
}

impl PromptTemplates {
    pub fn new() -> Result<Self, CatalogError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(SYSTEM_TEMPLATE, DEFAULT_SYSTEM), (TASK_TEMPLATE, DEFAULT_TASK)])
            .map_err(|e| CatalogError::Render(e.to_string()))?;
        Ok(Self { tera })
    }

    pub fn render_system(&self, context: &Context) -> Result<String, CatalogError> {
        self.render(SYSTEM_TEMPLATE, context)
    }

    pub fn render_task(&self, context: &Context) -> Result<String, CatalogError> {
        self.render(TASK_TEMPLATE, context)
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, CatalogError> {
        self.tera
            .render(name, context)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| CatalogError::Render(format!("{name}: {e}")))
    }
}
