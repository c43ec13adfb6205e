#![warn(clippy::use_self)]

//! Attach behavior to server-rendered markup.
//!
//! ```no_run
//! rivet::mount("counter", |root, props, refs| {
//!     let start = props["start"].as_i64().unwrap_or(0);
//!     if let Some(label) = refs.one("label") {
//!         label.set_text_content(Some(&start.to_string()));
//!     }
//!     let _ = root;
//! })
//! .unwrap();
//! ```

pub use rivet_core::{
    attrs, collect_refs, get_props, get_refs, read_props, refs, tree, Attributes, Element,
    Mounter, ParseError, Props, RefValue, Refs, Scope, Selector,
};

#[cfg(feature = "html")]
pub use rivet_core::html;

pub use rivet_core::web::{document, is_web};

pub mod prelude {
    pub use crate::{Element as _, Props, RefValue, Refs, Scope as _};
}

/// Page-level refs, as handed to browser mount callbacks.
pub type DomRefs = Refs<web_sys::Element>;

/// Invokes `f` for every element of the page whose `data-mounts` equals `name`,
/// in document order, and returns how many were mounted.
///
/// Each call receives the element, its `data-props` and its `data-ref`
/// descendants. The first element with malformed props aborts the pass with a
/// [`ParseError`]; elements after it are not mounted.
///
/// # Panics
///
/// Outside a browser environment.
pub fn mount<F>(name: &str, f: F) -> Result<usize, ParseError>
where
    F: FnMut(web_sys::Element, Props, DomRefs),
{
    let document = document().expect("mounting only works in browser environments");
    rivet_core::mount(&document, name, f)
}

/// Like [`mount`], but searches only within `root`'s descendants.
pub fn mount_within<F>(root: &web_sys::Element, name: &str, f: F) -> Result<usize, ParseError>
where
    F: FnMut(web_sys::Element, Props, DomRefs),
{
    rivet_core::mount(root, name, f)
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use wasm_bindgen::{prelude::*, JsCast};
    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn body(html: &str) -> web_sys::HtmlElement {
        let body = document().unwrap().body().unwrap();
        body.set_inner_html(html);
        body
    }

    #[wasm_bindgen_test]
    fn mounts_whole_document() {
        body(
            r#"<div data-mounts="toggle" data-props='{"on": true}'><b data-ref="state"></b></div>
               <div data-mounts="toggle"></div>"#,
        );

        let mut props_seen = vec![];
        let count = mount("toggle", |_, props, refs| {
            props_seen.push((props["on"].as_bool(), refs.len()));
        })
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(props_seen, vec![(Some(true), 1), (None, 0)]);
    }

    #[wasm_bindgen_test]
    fn fails_fast_on_bad_props() {
        body(
            r#"<i data-mounts="x"></i><i data-mounts="x" data-props="{bad"></i><i data-mounts="x"></i>"#,
        );

        let mut calls = 0;
        let err = mount("x", |_, _, _| calls += 1).unwrap_err();
        assert_eq!(err.text, "{bad");
        assert_eq!(calls, 1);
    }

    #[wasm_bindgen_test]
    fn callbacks_wire_events() {
        body(r#"<p data-mounts="clicker"><button data-ref="button"></button></p>"#);

        let clicks = Rc::new(Cell::new(0));
        mount("clicker", |_, _, refs| {
            let clicks = clicks.clone();
            let closure = Closure::<dyn Fn()>::new(move || clicks.set(clicks.get() + 1));
            refs.one("button")
                .unwrap()
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .unwrap();
            closure.forget();
        })
        .unwrap();

        let button = document()
            .unwrap()
            .query_selector("[data-ref=button]")
            .unwrap()
            .unwrap()
            .unchecked_into::<web_sys::HtmlElement>();
        button.click();
        button.click();
        assert_eq!(clicks.get(), 2);
    }
}
