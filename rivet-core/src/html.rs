//! Parsed HTML backend built on [`scraper`].
//!
//! Mounting a parsed page runs the same pass a browser would, which lets
//! server-side tooling inspect or validate markup before it ships.

use scraper::{ElementRef, Html};

use crate::{selector::Selector, source};

impl source::Element for ElementRef<'_> {
    fn attr(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_owned)
    }
}

impl<'a> source::Scope for ElementRef<'a> {
    type Element = Self;

    fn query_all(&self, selector: &Selector<'_>) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .collect()
    }
}

impl<'a> source::Scope for &'a Html {
    type Element = ElementRef<'a>;

    fn query_all(&self, selector: &Selector<'_>) -> Vec<ElementRef<'a>> {
        let html: &'a Html = *self;
        html.tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .collect()
    }
}
