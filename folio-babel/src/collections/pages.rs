//! Static pages (about, book, ...)

use super::{BuildContext, Collection};
use crate::error::Result;
use crate::images::ImageRefTable;
use crate::markup::{body, parse_html, prune_chrome, Element, MarkupNode};
use crate::record::{DocumentRecord, RecordKind};
use crate::slug::slug_from_source;
use crate::source::SourceDocument;

#[derive(Debug, Clone)]
pub struct PageCollection {
    /// Source names converted as pages.
    pub pages: Vec<String>,
}

impl Default for PageCollection {
    fn default() -> Self {
        PageCollection::new(["about", "book", "alligators"])
    }
}

impl PageCollection {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PageCollection {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

/// `<main>` when the page has one, otherwise `<body>`.
fn content_root(document: &MarkupNode) -> &Element {
    let body = body(document);
    body.find_tag("main").unwrap_or(body)
}

/// First `<h1>`, then `<title>`.
fn page_title(document: &MarkupNode) -> Option<String> {
    let root = document.as_element()?;
    [root.find_tag("h1"), root.find_tag("title")]
        .into_iter()
        .flatten()
        .map(|el| el.text_content().split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|title| !title.is_empty())
}

impl Collection for PageCollection {
    fn name(&self) -> &str {
        "pages"
    }

    fn description(&self) -> &str {
        "Standalone site pages"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Page
    }

    fn accepts(&self, source_name: &str) -> bool {
        self.pages.iter().any(|page| page == source_name)
    }

    fn build(&self, source: &SourceDocument, ctx: &BuildContext) -> Result<Vec<DocumentRecord>> {
        let options = &ctx.options;
        let document = parse_html(&source.html);
        let title = page_title(&document).unwrap_or_else(|| source.name.clone());

        let refs = ImageRefTable::from_scrape_meta(&source.meta, &options.converter.asset_pattern);
        let pruned = prune_chrome(content_root(&document), &options.chrome);
        let result = ctx.converter.convert_element(&pruned, &refs);
        ctx.report_unresolved(source, &result.unresolved);

        let mut record = DocumentRecord::new(RecordKind::Page, slug_from_source(&source.name, ""), title);
        record.locale = options.locale.clone();
        record.description = result
            .excerpt
            .unwrap_or_else(|| options.converter.describer.title(&record.title));
        record.featured_image = options
            .images
            .content_images(&source.meta)
            .first()
            .and_then(|img| img.local.as_deref())
            .map(|local| ctx.image_path(local));
        record.body = result.body;

        Ok(vec![record])
    }
}
