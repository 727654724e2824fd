use askama::Template;

/// A generated section as shown on the result page.
pub struct SectionView {
    pub title: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub flash: Option<String>,
    pub template_preview: String,
    pub section_count: usize,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub sections: Vec<SectionView>,
    pub download_path: String,
    pub file_name: String,
}
