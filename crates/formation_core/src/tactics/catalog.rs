//! Named formation templates the matcher scores clusterings against.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Expected player count per depth line, goalkeeper line first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormationTemplate {
    pub name: String,
    pub lines: Vec<usize>,
}

impl FormationTemplate {
    pub fn new(name: impl Into<String>, lines: &[usize]) -> Self {
        Self {
            name: name.into(),
            lines: lines.to_vec(),
        }
    }

    /// Total players the template expects (goalkeeper included).
    pub fn expected_players(&self) -> usize {
        self.lines.iter().sum()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("template name must not be empty".to_string());
        }
        match self.lines.first() {
            None => Err(format!("template {} has no lines", self.name)),
            Some(&gk) if gk != 1 => Err(format!(
                "template {} must start with a single goalkeeper, got {gk}",
                self.name
            )),
            _ if self.lines.contains(&0) => {
                Err(format!("template {} has an empty line", self.name))
            }
            _ => Ok(()),
        }
    }
}

/// Ordered template list. Order matters: earlier entries win score ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FormationCatalog(pub Vec<FormationTemplate>);

impl FormationCatalog {
    pub fn new(templates: Vec<FormationTemplate>) -> Self {
        Self(templates)
    }

    /// The nine common eleven-a-side shapes.
    pub fn standard() -> Self {
        Self(vec![
            FormationTemplate::new("4-4-2", &[1, 4, 4, 2]),
            FormationTemplate::new("4-3-3", &[1, 4, 3, 3]),
            FormationTemplate::new("3-5-2", &[1, 3, 5, 2]),
            FormationTemplate::new("4-2-3-1", &[1, 4, 2, 3, 1]),
            FormationTemplate::new("3-4-3", &[1, 3, 4, 3]),
            FormationTemplate::new("5-3-2", &[1, 5, 3, 2]),
            FormationTemplate::new("4-5-1", &[1, 4, 5, 1]),
            FormationTemplate::new("5-4-1", &[1, 5, 4, 1]),
            FormationTemplate::new("3-4-2-1", &[1, 3, 4, 2, 1]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormationTemplate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FormationTemplate> {
        self.0.iter().find(|t| t.name == name)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.0.is_empty() {
            return Err("formation catalog is empty".to_string());
        }
        let mut seen = HashSet::new();
        for template in &self.0 {
            template.validate()?;
            if !seen.insert(template.name.as_str()) {
                return Err(format!("duplicate template name {}", template.name));
            }
        }
        Ok(())
    }
}

impl Default for FormationCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
