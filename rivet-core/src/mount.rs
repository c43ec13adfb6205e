use tracing::{debug, trace};

use crate::{
    attrs::Attributes,
    error::ParseError,
    props::Props,
    refs::Refs,
    selector::Selector,
    source::{Element, Scope},
};

/// Runs mount passes against a configurable attribute contract.
///
/// The free functions [`read_props`], [`collect_refs`] and [`mount`] use
/// [`Attributes::default`].
#[derive(Clone, Default, Debug)]
pub struct Mounter {
    attrs: Attributes,
}

impl Mounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attrs: Attributes) -> Self {
        Self { attrs }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    /// Parses the element's props attribute, defaulting to `{}` when it is
    /// missing or empty.
    pub fn read_props<E: Element>(&self, element: &E) -> Result<Props, ParseError> {
        let text = element.attr(&self.attrs.props);
        trace!(attr = %self.attrs.props, text = ?text, "reading props");

        Props::parse(text.as_deref()).map_err(|source| ParseError {
            attr: self.attrs.props.clone(),
            text: text.unwrap_or_default(),
            source,
        })
    }

    /// Groups the descendants of `root` by their ref key.
    ///
    /// `root` itself is never collected, and descendants with an empty key are
    /// skipped.
    pub fn collect_refs<E: Element>(&self, root: &E) -> Refs<E> {
        let attr = self.attrs.refs.as_str();
        let mut refs = Refs::new();

        for element in root.query_all(&Selector::Has(attr)) {
            match element.attr(attr) {
                Some(key) if !key.is_empty() => refs.insert(key, element),
                _ => {}
            }
        }
        refs
    }

    /// Invokes `f` for every element in `scope` mounted as `name`, in document
    /// order, and returns how many were mounted.
    ///
    /// Stops at the first element with malformed props: `f` has run for every
    /// element before it and for none after it.
    pub fn mount<S, F>(&self, scope: &S, name: &str, mut f: F) -> Result<usize, ParseError>
    where
        S: Scope,
        F: FnMut(S::Element, Props, Refs<S::Element>),
    {
        let targets = scope.query_all(&Selector::Equals(&self.attrs.mounts, name));
        let count = targets.len();
        debug!(mount = name, count, "mounting");

        for element in targets {
            let props = self.read_props(&element)?;
            let refs = self.collect_refs(&element);
            f(element, props, refs);
        }
        Ok(count)
    }

    /// Like [`Self::mount`], but visits every mount point regardless of name.
    ///
    /// Elements whose mount attribute is empty are skipped.
    pub fn mount_all<S, F>(&self, scope: &S, mut f: F) -> Result<usize, ParseError>
    where
        S: Scope,
        F: FnMut(&str, S::Element, Props, Refs<S::Element>),
    {
        let attr = self.attrs.mounts.as_str();
        let mut count = 0;

        for element in scope.query_all(&Selector::Has(attr)) {
            let Some(name) = element.attr(attr).filter(|name| !name.is_empty()) else {
                trace!(attr, "skipping empty mount name");
                continue;
            };

            let props = self.read_props(&element)?;
            let refs = self.collect_refs(&element);
            f(&name, element, props, refs);
            count += 1;
        }

        debug!(count, "mounted all");
        Ok(count)
    }
}

pub fn read_props<E: Element>(element: &E) -> Result<Props, ParseError> {
    Mounter::default().read_props(element)
}

pub fn collect_refs<E: Element>(root: &E) -> Refs<E> {
    Mounter::default().collect_refs(root)
}

/// Mounts `f` on every element of `scope` whose `data-mounts` equals `name`.
///
/// See [`Mounter::mount`].
pub fn mount<S, F>(scope: &S, name: &str, f: F) -> Result<usize, ParseError>
where
    S: Scope,
    F: FnMut(S::Element, Props, Refs<S::Element>),
{
    Mounter::default().mount(scope, name, f)
}
