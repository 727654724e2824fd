// Template context structures for Askama templates.

mod report;

pub use self::report::{IndexTemplate, ResultTemplate, SectionView};
