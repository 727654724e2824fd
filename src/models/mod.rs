pub mod sections;
pub mod template;

pub use sections::{GeneratedSection, GeneratedSections};
pub use template::{SectionSpec, Template, TemplateError};
