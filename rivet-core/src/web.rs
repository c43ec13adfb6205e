//! Browser DOM backend.

use std::thread_local;

use wasm_bindgen::{intern, JsCast};

use crate::{selector::Selector, source};

thread_local! {
    static DOCUMENT: Option<web_sys::Document> = if cfg!(target_family = "wasm") {
        web_sys::window()
            .and_then(|window| window.document())
    } else {
        None
    };
}

/// The page's `window.document`, if running in a browser.
pub fn document() -> Option<web_sys::Document> {
    DOCUMENT.with(Clone::clone)
}

pub fn is_web() -> bool {
    document().is_some()
}

impl source::Element for web_sys::Element {
    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(intern(name))
    }
}

impl source::Scope for web_sys::Element {
    type Element = Self;

    fn query_all(&self, selector: &Selector<'_>) -> Vec<Self> {
        elements(self.query_selector_all(&selector.to_css()))
    }
}

impl source::Scope for web_sys::Document {
    type Element = web_sys::Element;

    fn query_all(&self, selector: &Selector<'_>) -> Vec<web_sys::Element> {
        elements(self.query_selector_all(&selector.to_css()))
    }
}

fn elements(list: Result<web_sys::NodeList, wasm_bindgen::JsValue>) -> Vec<web_sys::Element> {
    let list = list.expect("attribute selector rejected by the browser");
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into().ok())
        .collect()
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::document;
    use crate::{collect_refs, mount, Attributes, Mounter, RefValue};

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture(html: &str) -> web_sys::Element {
        let document = document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn refs_from_live_dom() {
        let root = fixture(
            r#"<div data-mounts="list">
                <span data-ref="item">a</span>
                <span data-ref="item">b</span>
                <h2 data-ref="title"></h2>
            </div>"#,
        );
        let target = root.first_element_child().unwrap();

        let refs = collect_refs(&target);
        assert!(matches!(refs.get("title"), Some(RefValue::Single(_))));
        let items = refs.all("item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text_content().as_deref(), Some("a"));
        assert_eq!(items[1].text_content().as_deref(), Some("b"));
    }

    #[wasm_bindgen_test]
    fn mount_namespaced_attribute() {
        let root = fixture(r#"<p v:mount="w"><i v:ref="x"></i></p>"#);
        let mounter = Mounter::with_attributes(Attributes::new().mounts("v:mount").refs("v:ref"));

        let mut refs_seen = vec![];
        let count = mounter
            .mount(&root, "w", |_, _, refs| refs_seen.push(refs.len()))
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(refs_seen, vec![1]);
    }

    #[wasm_bindgen_test]
    fn mount_quoted_name() {
        let root = fixture(r#"<p data-mounts='say "hi"' data-props='{"n": 1}'></p>"#);

        let mut seen = vec![];
        mount(&root, r#"say "hi""#, |el, props, _| {
            seen.push((el.tag_name(), props["n"].as_i64()));
        })
        .unwrap();

        assert_eq!(seen, vec![("P".to_string(), Some(1))]);
    }
}
