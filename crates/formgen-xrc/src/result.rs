//! Outcome of transforming one design node into XML.

/// What the caller does with the element it created for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XrcResult {
    /// The node has no XRC form; the caller removes the element.
    NotSupported,
    /// The element was filled in. Children go directly under it.
    Updated,
    /// The element became a `sizeritem` wrapper. Children go under the
    /// wrapper's inner `object`.
    SizerItemCreated,
    /// A form XRC can't describe. The element holds a placeholder comment and
    /// is kept only when comments are requested.
    FormNotSupported,
}

impl XrcResult {
    pub fn is_supported(self) -> bool {
        matches!(self, XrcResult::Updated | XrcResult::SizerItemCreated)
    }
}
