/// Title-to-body mapping produced by generation.
///
/// Iterates in insertion order. Re-inserting an existing title replaces the
/// body but keeps the entry where it was first inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedSections {
    entries: Vec<GeneratedSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSection {
    pub title: String,
    pub body: String,
}

impl GeneratedSections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let title = title.into();
        let body = body.into();
        match self.entries.iter_mut().find(|e| e.title == title) {
            Some(existing) => existing.body = body,
            None => self.entries.push(GeneratedSection { title, body }),
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.body.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedSection> {
        self.entries.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for GeneratedSections {
    type Item = GeneratedSection;
    type IntoIter = std::vec::IntoIter<GeneratedSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
