//! Binding identification keys.
//!
//! A [`BindingKey`] is the pair (abstract type, name) under which a binding
//! is stored. The empty name is the default binding for a type.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies one binding in a container.
///
/// Equality and hashing only consider the [`TypeId`] and the name; the type
/// name is carried along for messages.
///
/// # Examples
///
/// ```rust
/// use service_locator::BindingKey;
///
/// let default = BindingKey::of::<String>();
/// assert_eq!(default.name(), "");
/// assert!(default.is_default());
///
/// let primary = BindingKey::named::<String>("primary");
/// assert_ne!(default, primary);
/// ```
#[derive(Clone)]
pub struct BindingKey {
    type_id: TypeId,
    type_name: &'static str,
    name: String,
}

impl BindingKey {
    /// Key of the default binding for `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::named::<T>("")
    }

    /// Key of the binding for `T` registered under `name`.
    #[inline]
    pub fn named<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            name: name.into(),
        }
    }

    /// The abstract type's [`TypeId`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human-readable name of the abstract type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Binding name (`""` for the default binding).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the unnamed binding of a type.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for BindingKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for BindingKey {}

impl Hash for BindingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingKey({}, name={:?})", self.type_name, self.name)
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            write!(f, "{}", self.type_name)
        } else {
            write!(f, "{} (name={:?})", self.type_name, self.name)
        }
    }
}
