use scraper::{ElementRef, Selector};

use crate::config::SelectorConfig;
use crate::error::ExtractError;

/// Compiled form of [`SelectorConfig`].
#[derive(Debug, Clone)]
pub struct Selectors {
    pub post: Selector,
    pub time: Selector,
    pub social_context: Selector,
    pub classifier_text: Selector,
    pub body_text: Selector,
    pub cell: Selector,
    pub author_link: Selector,
    pub replies: Selector,
    pub reposts: Selector,
    pub likes: Selector,
    pub views: Selector,
}

impl Selectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            post: compile("post", &config.post)?,
            time: compile("time", &config.time)?,
            social_context: compile("social context", &config.social_context)?,
            classifier_text: compile("classifier text", &config.classifier_text)?,
            body_text: compile("body text", &config.body_text)?,
            cell: compile("cell", &config.cell)?,
            author_link: compile("author link", &config.author_link)?,
            replies: compile("replies", &config.replies)?,
            reposts: compile("reposts", &config.reposts)?,
            likes: compile("likes", &config.likes)?,
            views: compile("views", &config.views)?,
        })
    }
}

fn compile(name: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        name,
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// First descendant of `element` matching `selector`.
pub fn first<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Concatenated text of the first match, like `textContent`.
pub fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(element, selector).map(|e| e.text().collect())
}

/// `element` itself or its nearest ancestor matching `selector`.
pub fn closest<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|e| selector.matches(e))
}

/// Previous sibling that is an element, skipping text and comments.
pub fn previous_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.prev_siblings().find_map(ElementRef::wrap)
}
