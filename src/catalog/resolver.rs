use super::definitions::{ActivityDefinition, CatalogFile, PersonaDefinition};
use super::template::PromptTemplates;
use super::{ResolveError, ResolvedTask, TaskQuery, TaskResolver};
use crate::activity::TaskSpec;
use crate::agent::AgentHandle;
use crate::error::CatalogError;
use anyhow::Context as _;
use std::collections::HashMap;
use std::path::Path;
use tera::Context;

/// Config-driven lookup table of personas and activity templates.
pub struct CatalogResolver {
    personas: HashMap<String, PersonaDefinition>,
    activities: HashMap<String, ActivityDefinition>,
    templates: PromptTemplates,
}

impl CatalogResolver {
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        Ok(Self {
            personas: file
                .personas
                .into_iter()
                .map(|persona| (persona.id.clone(), persona))
                .collect(),
            activities: file
                .activities
                .into_iter()
                .map(|activity| (activity.id.clone(), activity))
                .collect(),
            templates: PromptTemplates::new()?,
        })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_file(CatalogFile::parse(super::BUILTIN_CATALOG)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog {}", path.display()))?;
        let file = CatalogFile::parse(&contents)
            .with_context(|| format!("parse catalog {}", path.display()))?;
        Ok(Self::from_file(file)?)
    }

    pub fn persona_count(&self) -> usize {
        self.personas.len()
    }

    pub fn activity(&self, id: &str) -> Option<&ActivityDefinition> {
        self.activities.get(id)
    }

    fn agent_handle(
        &self,
        persona: &PersonaDefinition,
        username: &str,
    ) -> Result<AgentHandle, CatalogError> {
        let mut ctx = Context::new();
        ctx.insert("persona", persona);
        ctx.insert("username", username);
        Ok(AgentHandle {
            persona_id: persona.id.clone(),
            display_name: persona.name.clone(),
            system_prompt: self.templates.render_system(&ctx)?,
            model: persona.model.clone(),
            temperature: persona.temperature,
        })
    }

    fn task_spec(
        &self,
        persona: &PersonaDefinition,
        activity: &ActivityDefinition,
        query: &TaskQuery<'_>,
    ) -> Result<TaskSpec, CatalogError> {
        let mut ctx = Context::new();
        ctx.insert("persona", persona);
        ctx.insert("activity", activity);
        ctx.insert("username", query.username);
        ctx.insert("user_input", query.user_input);
        ctx.insert("history", query.history);
        Ok(TaskSpec::new(
            self.templates.render_task(&ctx)?,
            activity.expected_output.clone(),
        ))
    }
}

impl TaskResolver for CatalogResolver {
    fn resolve(&self, query: &TaskQuery<'_>) -> Result<ResolvedTask, ResolveError> {
        let Some(persona) = self.personas.get(query.persona_id) else {
            return Err(ResolveError::PersonaNotFound(query.persona_id.to_string()));
        };
        let agent = self.agent_handle(persona, query.username)?;

        let Some(activity) = self.activities.get(query.activity_id) else {
            tracing::debug!(
                activity = query.activity_id,
                "activity missing from catalog"
            );
            return Ok(ResolvedTask {
                spec: TaskSpec::default(),
                agent,
            });
        };

        Ok(ResolvedTask {
            spec: self.task_spec(persona, activity, query)?,
            agent,
        })
    }
}
