use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A configured character identity backed by one generation agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDefinition {
    pub id: String,
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// A named mini-interaction template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: String,
    /// Persona the activity was written for; informational only.
    #[serde(default)]
    pub persona: Option<String>,
    pub title: String,
    pub brief: String,
    #[serde(default)]
    pub expected_output: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub personas: Vec<PersonaDefinition>,
    #[serde(default)]
    pub activities: Vec<ActivityDefinition>,
}

impl CatalogFile {
    pub fn parse(contents: &str) -> Result<Self, CatalogError> {
        let file: Self = toml::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string()))?;
        file.check_unique()?;
        Ok(file)
    }

    fn check_unique(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for persona in &self.personas {
            if !seen.insert(persona.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "persona",
                    id: persona.id.clone(),
                });
            }
        }
        seen.clear();
        for activity in &self.activities {
            if !seen.insert(activity.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "activity",
                    id: activity.id.clone(),
                });
            }
        }
        Ok(())
    }
}
