//! Owner identities.
//!
//! A machine tracks one current state per *owner*. Owners are told apart by
//! identity, never by value: two sessions that happen to compare equal are
//! still two sessions. [`Owner::owner_key`] produces the identity used as the
//! registry key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of an owner inside a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKey {
    /// Address of the owning value
    Address(usize),
    /// Issued token
    Token(Uuid),
}

impl OwnerKey {
    /// Key a value by its address.
    ///
    /// Only meaningful while the value stays where it is. Zero-sized values
    /// may all share one address; give those an [`OwnerToken`] instead.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self::Address((value as *const T).cast::<()>() as usize)
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(addr) => write!(f, "addr:{addr:#x}"),
            Self::Token(id) => write!(f, "token:{id}"),
        }
    }
}

/// A context that runs a state machine.
///
/// The provided method keys an owner by its address, which is what most
/// embedders want:
///
/// ```rust
/// use statewise::registry::{Owner, OwnerKey};
///
/// #[derive(PartialEq)]
/// struct Session {
///     user: String,
/// }
///
/// impl Owner for Session {}
///
/// let a = Session { user: "ann".into() };
/// let b = Session { user: "ann".into() };
///
/// assert!(a == b);
/// assert_ne!(a.owner_key(), b.owner_key());
/// assert_eq!(a.owner_key(), OwnerKey::of(&a));
/// ```
pub trait Owner {
    /// Identity used to track this owner's current state.
    fn owner_key(&self) -> OwnerKey {
        OwnerKey::of(self)
    }
}

/// Clones of one `Arc` share an identity: the shared allocation.
impl<T: ?Sized> Owner for Arc<T> {
    fn owner_key(&self) -> OwnerKey {
        OwnerKey::of::<T>(self)
    }
}

/// Opaque owner handle backed by a random UUID.
///
/// Useful when owners move around in memory or are not values at all. Each
/// call to [`OwnerToken::new`] issues a fresh identity; copies of a token
/// keep it.
///
/// ```rust
/// use statewise::registry::{Owner, OwnerToken};
///
/// let token = OwnerToken::new();
/// let copy = token;
///
/// assert_eq!(token.owner_key(), copy.owner_key());
/// assert_ne!(token.owner_key(), OwnerToken::new().owner_key());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerToken(Uuid);

impl OwnerToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for OwnerToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Owner for OwnerToken {
    fn owner_key(&self) -> OwnerKey {
        OwnerKey::Token(self.0)
    }
}

impl fmt::Display for OwnerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq)]
    struct Conn {
        port: u16,
    }

    impl Owner for Conn {}

    #[test]
    fn equal_values_have_distinct_keys() {
        let a = Conn { port: 80 };
        let b = Conn { port: 80 };
        assert!(a == b);
        assert_ne!(a.owner_key(), b.owner_key());
    }

    #[test]
    fn same_value_has_stable_key() {
        let a = Conn { port: 22 };
        assert_eq!(a.owner_key(), a.owner_key());
        assert_eq!(a.port, 22);
    }

    #[test]
    fn arc_clones_share_key() {
        let shared = Arc::new(Conn { port: 443 });
        let clone = Arc::clone(&shared);
        let other = Arc::new(Conn { port: 443 });

        assert_eq!(shared.owner_key(), clone.owner_key());
        assert_ne!(shared.owner_key(), other.owner_key());
    }

    #[test]
    fn tokens_are_unique() {
        let a = OwnerToken::new();
        let b = OwnerToken::default();
        assert_ne!(a, b);
        assert_eq!(a.owner_key(), OwnerKey::Token(a.id()));
    }

    #[test]
    fn key_display_names_kind() {
        let token = OwnerToken::new();
        assert_eq!(token.owner_key().to_string(), format!("token:{token}"));
        assert!(OwnerKey::Address(0x10).to_string().starts_with("addr:0x10"));
    }

    #[test]
    fn key_roundtrips_through_json() {
        let key = OwnerToken::new().owner_key();
        let json = serde_json::to_string(&key).unwrap();
        let parsed: OwnerKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }
}
