use serde::Deserialize;

pub const PROPS: &str = "data-props";
pub const REFS: &str = "data-ref";
pub const MOUNTS: &str = "data-mounts";

/// Names of the attributes that make up the markup contract.
#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case")]
pub struct Attributes {
    /// JSON configuration of a mount point.
    pub props: String,
    /// Reference key of a descendant.
    pub refs: String,
    /// Mount name of a mount point.
    pub mounts: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            props: PROPS.to_string(),
            refs: REFS.to_string(),
            mounts: MOUNTS.to_string(),
        }
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(mut self, name: impl Into<String>) -> Self {
        self.props = name.into();
        self
    }

    pub fn refs(mut self, name: impl Into<String>) -> Self {
        self.refs = name.into();
        self
    }

    pub fn mounts(mut self, name: impl Into<String>) -> Self {
        self.mounts = name.into();
        self
    }
}
