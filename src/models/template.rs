use serde::{Deserialize, Serialize};

pub const DEFAULT_WORDS: u32 = 250;

const BUNDLED_TEMPLATE: &str = include_str!("../../data/default_template.json");

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("section {index} (\"{title}\"): words must be a positive integer")]
    ZeroWords { index: usize, title: String },
}

/// One desired report section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    #[serde(default)]
    pub guidance: String,
    #[serde(default = "default_words")]
    pub words: u32,
}

fn default_words() -> u32 {
    DEFAULT_WORDS
}

/// Ordered list of sections to generate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

impl Template {
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let template: Template = serde_json::from_str(raw)?;
        template.validate()?;
        Ok(template)
    }

    /// The default template compiled into the binary.
    pub fn bundled() -> Result<Self, TemplateError> {
        Self::parse(BUNDLED_TEMPLATE)
    }

    /// User-supplied text wins when it has any content; blank input means default.
    pub fn load(user_supplied: Option<&str>) -> Result<Self, TemplateError> {
        match user_supplied.map(str::trim) {
            Some(raw) if !raw.is_empty() => Self::parse(raw),
            _ => Self::bundled(),
        }
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), TemplateError> {
        for (index, section) in self.sections.iter().enumerate() {
            if section.words == 0 {
                return Err(TemplateError::ZeroWords {
                    index,
                    title: section.title.clone(),
                });
            }
        }
        Ok(())
    }
}
