#![warn(clippy::use_self)]

//! Convention-based mounting for server-rendered markup.
//!
//! Markup opts into behavior with three attributes:
//!
//! - `data-mounts="name"` marks a mount point,
//! - `data-props='{"json": true}'` carries its configuration,
//! - `data-ref="key"` tags descendants so the mount callback can find them.
//!
//! [`mount`] finds every mount point for a name and hands each one to a callback
//! together with its parsed [`Props`] and collected [`Refs`]. Any document that
//! implements [`Scope`] and [`Element`] can be mounted: the browser DOM ([`web`]),
//! parsed HTML (`html` feature) or the in-memory [`tree`].

pub mod attrs;
pub mod refs;
pub mod tree;
pub mod web;

#[cfg(feature = "html")]
pub mod html;

mod error;
mod mount;
mod props;
mod selector;
mod source;

pub use self::{
    attrs::Attributes,
    error::ParseError,
    mount::{collect_refs, mount, read_props, Mounter},
    props::Props,
    refs::{RefValue, Refs},
    selector::Selector,
    source::{Element, Scope},
};

pub use self::mount::{collect_refs as get_refs, read_props as get_props};
