use crate::selector::Selector;

/// Read-only view of a node that can carry attributes.
///
/// Implementations never mutate the host document on behalf of this crate.
pub trait Element: Scope<Element = Self> + Clone {
    fn attr(&self, name: &str) -> Option<String>;
}

/// Something that can be searched for elements: a document, or an element's subtree.
pub trait Scope {
    type Element: Element;

    /// Returns every matching element in document order.
    ///
    /// When `self` is an element, only its descendants are considered; the element
    /// itself is never part of the result.
    fn query_all(&self, selector: &Selector<'_>) -> Vec<Self::Element>;
}
