//! # Declared Field Registry
//!
//! Configuration structures describe their own shape through [`Tagged`]:
//! each structure lists its fields in declaration order together with the
//! serialization tags declared for them. The registry is written once, next
//! to the type definition (usually through [`impl_tagged!`](crate::impl_tagged)),
//! and is what the resolver walks to turn a field reference back into a
//! dotted key path.
//!
//! ## Identity
//!
//! A field is identified by its address paired with its [`TypeId`]. The
//! address alone is ambiguous: a structure's first field shares the address
//! of the structure, and a nested structure's first leaf shares it again.
//! Pairing with the type keeps identity exact. Identity is stable for as long
//! as the root is borrowed, which the borrow checker enforces for every
//! resolver and checker built on top of it.
//!
//! ## Compile-Time Usage Contract
//!
//! Leaves implement [`ConfigScalar`]; structures implement [`Tagged`]. Asking
//! for the tag path of a structure is rejected at compile time:
//!
//! ```compile_fail
//! use confcheck_core::{impl_tagged, resolve, TagScheme};
//!
//! struct Inner { name: String }
//! struct Outer { inner: Inner }
//! impl_tagged!(Inner { scalar name ["yaml" = "name"] });
//! impl_tagged!(Outer { nested inner ["yaml" = "inner"] });
//!
//! let outer = Outer { inner: Inner { name: String::new() } };
//! // ERROR: `Inner` does not implement `ConfigScalar`
//! let _ = resolve(TagScheme::YAML, &outer, &outer.inner);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Tags declared on one field: `(key, tag)` pairs such as
/// `("yaml", "listen_port,omitempty")`.
pub type TagList = &'static [(&'static str, &'static str)];

/// A leaf value whose tag path can be requested.
///
/// Implemented for strings, booleans, every integer and float width,
/// `char`, `Duration`, `PathBuf`, and `Vec`/`Option` of any scalar. Leaf
/// enums defined by callers opt in with an empty impl.
pub trait ConfigScalar: Any + fmt::Debug {}

macro_rules! impl_config_scalar {
    ($($ty:ty),* $(,)?) => {
        $(impl ConfigScalar for $ty {})*
    };
}

impl_config_scalar!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, Duration, PathBuf,
);

impl<T: ConfigScalar> ConfigScalar for Vec<T> {}
impl<T: ConfigScalar> ConfigScalar for Option<T> {}

/// A structure that lists its fields and their declared tags.
pub trait Tagged {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

impl<T: Tagged + ?Sized> Tagged for Box<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// An unset optional section contributes no fields.
impl<T: Tagged> Tagged for Option<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            Some(inner) => inner.fields(),
            None => Vec::new(),
        }
    }
}

/// Borrowed view of one field's value.
#[derive(Clone, Copy)]
pub enum FieldRef<'a> {
    /// A leaf, compared by identity during resolution.
    Scalar(&'a dyn Any),
    /// A structure, descended into during resolution.
    Nested(&'a dyn Tagged),
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Scalar(leaf) => write!(f, "Scalar({:?})", FieldId::of_dyn(*leaf)),
            FieldRef::Nested(node) => write!(f, "Nested({} fields)", node.fields().len()),
        }
    }
}

/// One declared field: its tags and a view of its value.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    tags: TagList,
    value: FieldRef<'a>,
}

impl<'a> Field<'a> {
    /// Declare a leaf field.
    pub fn scalar<T: ConfigScalar>(tags: TagList, value: &'a T) -> Self {
        Self {
            tags,
            value: FieldRef::Scalar(value),
        }
    }

    /// Declare a structure-typed field (including `Box` and `Option` of one).
    pub fn nested<T: Tagged>(tags: TagList, value: &'a T) -> Self {
        Self {
            tags,
            value: FieldRef::Nested(value),
        }
    }

    /// All declared `(key, tag)` pairs.
    pub fn tags(&self) -> TagList {
        self.tags
    }

    /// The field's value view.
    pub fn value(&self) -> FieldRef<'a> {
        self.value
    }

    /// The raw tag declared under `key`, or `""` when none is declared.
    pub fn tag(&self, key: &str) -> &'static str {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tag)| *tag)
            .unwrap_or("")
    }

    /// The path component under `key`: the first comma-delimited segment of
    /// the tag. Options such as `omitempty` are dropped.
    pub fn local_tag(&self, key: &str) -> &'static str {
        self.tag(key).split(',').next().unwrap_or("")
    }
}

/// Identity of a field: address plus concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    addr: usize,
    type_id: TypeId,
}

impl FieldId {
    /// Identity of a typed reference.
    pub fn of<T: Any>(value: &T) -> Self {
        Self {
            addr: value as *const T as *const () as usize,
            type_id: TypeId::of::<T>(),
        }
    }

    /// Identity of a type-erased reference. Uses the concrete type behind the
    /// trait object, so it agrees with [`FieldId::of`] for the same field.
    pub fn of_dyn(value: &dyn Any) -> Self {
        Self {
            addr: value as *const dyn Any as *const () as usize,
            type_id: Any::type_id(value),
        }
    }
}

/// Implement [`Tagged`] for a structure from a field list.
///
/// Each entry is `scalar <field> [<key> = <tag>, ...]` or
/// `nested <field> [<key> = <tag>, ...]`, listed in declaration order.
///
/// ```
/// use confcheck_core::{impl_tagged, Tagged};
///
/// struct Tls { cert_file: String }
/// struct Server { port: i64, tls: Option<Tls> }
///
/// impl_tagged!(Tls { scalar cert_file ["yaml" = "cert_file", "json" = "certFile"] });
/// impl_tagged!(Server {
///     scalar port ["yaml" = "port,omitempty", "json" = "port"],
///     nested tls ["yaml" = "tls", "json" = "tls"],
/// });
///
/// let server = Server { port: 8080, tls: None };
/// assert_eq!(server.fields().len(), 2);
/// ```
#[macro_export]
macro_rules! impl_tagged {
    ($ty:ty { $( $kind:ident $field:ident [ $( $key:literal = $tag:literal ),* $(,)? ] ),* $(,)? }) => {
        impl $crate::Tagged for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $( $crate::Field::$kind(&[ $( ($key, $tag) ),* ], &self.$field) ),*
                ]
            }
        }
    };
}
