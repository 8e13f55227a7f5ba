/// Plain text of a document, one entry per page in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pages: Vec<String>,
}

impl ExtractedText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with no separator.
    pub fn concatenated(&self) -> String {
        self.pages.concat()
    }

    /// Every page followed by a newline.
    pub fn newline_terminated(&self) -> String {
        let capacity = self.pages.iter().map(|p| p.len() + 1).sum();
        self.pages
            .iter()
            .fold(String::with_capacity(capacity), |mut acc, page| {
                acc.push_str(page);
                acc.push('\n');
                acc
            })
    }
}
