//! # Tag-Path Resolution
//!
//! Recovers the dotted serialization path of a field from a reference to it.
//! The resolver walks the root's declared fields depth-first, in declaration
//! order, building a candidate path at every level and comparing each leaf's
//! identity against the target. The first match wins, so the result is
//! deterministic for a given type.
//!
//! Resolution never fails. A target that is not reachable from the root
//! (a field of another instance, a local variable used for comparison)
//! yields `None`; [`TagResolver::label`] turns that into a readable
//! fallback instead.
//!
//! Recursion depth is bounded by the static nesting depth of the declared
//! types, not by input data.

use std::fmt;

use crate::field::{ConfigScalar, FieldId, FieldRef, Tagged};
use crate::scheme::TagScheme;

/// Resolves field references against one root value under one scheme.
#[derive(Clone, Copy)]
pub struct TagResolver<'a> {
    scheme: TagScheme,
    root: FieldRef<'a>,
}

impl<'a> TagResolver<'a> {
    /// Resolver rooted at a structure.
    pub fn new<C: Tagged>(scheme: TagScheme, root: &'a C) -> Self {
        Self {
            scheme,
            root: FieldRef::Nested(root),
        }
    }

    /// Resolver rooted at an arbitrary field view. A scalar root matches
    /// only itself, at the empty path.
    pub fn for_value(scheme: TagScheme, root: FieldRef<'a>) -> Self {
        Self { scheme, root }
    }

    /// The naming scheme in use.
    pub fn scheme(&self) -> TagScheme {
        self.scheme
    }

    /// Tag path of `target`, or `None` when it is not part of the root.
    ///
    /// A match on the root itself yields `Some("")`.
    pub fn resolve<T: ConfigScalar>(&self, target: &T) -> Option<String> {
        self.resolve_id(FieldId::of(target))
    }

    /// Tag path of the field with the given identity.
    pub fn resolve_id(&self, target: FieldId) -> Option<String> {
        find(self.scheme, self.root, target, "")
    }

    /// Display name of `target` for messages: its tag path when resolvable,
    /// otherwise `entry holding value <value>`.
    pub fn label<T: ConfigScalar>(&self, target: &T) -> String {
        self.resolve(target)
            .unwrap_or_else(|| format!("entry holding value {target:?}"))
    }
}

impl fmt::Debug for TagResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagResolver")
            .field("scheme", &self.scheme)
            .field("root", &self.root)
            .finish()
    }
}

/// One-shot resolution of `target` within `root`.
pub fn resolve<C: Tagged, T: ConfigScalar>(
    scheme: TagScheme,
    root: &C,
    target: &T,
) -> Option<String> {
    TagResolver::new(scheme, root).resolve(target)
}

fn find(scheme: TagScheme, value: FieldRef<'_>, target: FieldId, path: &str) -> Option<String> {
    match value {
        FieldRef::Scalar(leaf) => (FieldId::of_dyn(leaf) == target).then(|| path.to_string()),
        FieldRef::Nested(node) => node.fields().into_iter().find_map(|field| {
            let child = scheme.join(path, field.local_tag(scheme.key()));
            find(scheme, field.value(), target, &child)
        }),
    }
}
