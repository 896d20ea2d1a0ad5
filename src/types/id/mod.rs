//! ID with type-safe markers for each resource.
//!
//! Discord transmits snowflakes as JSON strings. [`Id`] accepts either a
//! string or an integer when deserializing and always serializes back to a
//! string.

pub mod marker;

use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Unexpected, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU64,
    str::FromStr,
};

/// ID of a resource, such as the ID of a [user] or [guild].
///
/// IDs are backed by a [`NonZeroU64`] and carry a zero-sized marker so an
/// ID of one resource type can't be used in place of another.
///
/// [user]: marker::UserMarker
/// [guild]: marker::GuildMarker
pub struct Id<T> {
    phantom: PhantomData<fn(T) -> T>,
    value: NonZeroU64,
}

impl<T> Id<T> {
    /// Create a new ID, panicking if the value is zero.
    ///
    /// # Panics
    ///
    /// Panics if the value is 0.
    #[track_caller]
    pub const fn new(n: u64) -> Self {
        if let Some(id) = Self::new_checked(n) {
            id
        } else {
            panic!("value is zero");
        }
    }

    /// Create a new ID if the provided value is not zero.
    pub const fn new_checked(n: u64) -> Option<Self> {
        if let Some(value) = NonZeroU64::new(n) {
            Some(Self::from_nonzero(value))
        } else {
            None
        }
    }

    /// Create an ID from a non-zero value.
    pub const fn from_nonzero(value: NonZeroU64) -> Self {
        Self {
            phantom: PhantomData,
            value,
        }
    }

    /// Return the inner primitive value.
    pub const fn get(self) -> u64 {
        self.value.get()
    }

    /// Cast an ID from one type to another.
    pub const fn cast<New>(self) -> Id<New> {
        Id::from_nonzero(self.value)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = std::any::type_name::<T>();

        // `type_name` gives the full path; only print the marker name.
        if let Some(position) = type_name.rfind("::") {
            if let Some(slice) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(slice)?;
                f.write_str(">")?;
            }
        }

        f.write_str("(")?;
        Debug::fmt(&self.value, f)?;

        f.write_str(")")
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value.get(), f)
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> PartialEq<u64> for Id<T> {
    fn eq(&self, other: &u64) -> bool {
        self.value.get() == *other
    }
}

impl<T> Hash for Id<T> {
    fn hash<U: Hasher>(&self, state: &mut U) {
        state.write_u64(self.value.get());
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> From<NonZeroU64> for Id<T> {
    fn from(value: NonZeroU64) -> Self {
        Self::from_nonzero(value)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id: Id<T>) -> Self {
        id.get()
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NonZeroU64::from_str(s).map(Self::from_nonzero)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T> {
            phantom: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a discord snowflake")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Id::new_checked(value)
                    .ok_or_else(|| DeError::invalid_value(Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                let unsigned = u64::try_from(value)
                    .map_err(|_| DeError::invalid_value(Unexpected::Signed(value), &self))?;

                self.visit_u64(unsigned)
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value
                    .parse()
                    .map_err(|_| DeError::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(IdVisitor {
            phantom: PhantomData,
        })
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        marker::{GuildMarker, UserMarker},
        Id,
    };
    use serde_test::Token;
    use static_assertions::assert_impl_all;
    use std::{collections::HashSet, fmt::Debug, hash::Hash};

    assert_impl_all!(
        Id<UserMarker>: Clone,
        Copy,
        Debug,
        Eq,
        Hash,
        Ord,
        Send,
        Sync
    );

    #[test]
    fn new_checked_rejects_zero() {
        assert!(Id::<UserMarker>::new_checked(0).is_none());
        assert_eq!(Id::<UserMarker>::new_checked(5).map(Id::get), Some(5));
    }

    #[test]
    fn serializes_as_string() {
        serde_test::assert_tokens(&Id::<GuildMarker>::new(114_941_315_417_899_012), &[
            Token::Str("114941315417899012"),
        ]);
    }

    #[test]
    fn deserializes_from_integer() {
        serde_test::assert_de_tokens(&Id::<GuildMarker>::new(123), &[Token::U64(123)]);
    }

    #[test]
    fn rejects_zero_string() {
        serde_test::assert_de_tokens_error::<Id<GuildMarker>>(
            &[Token::Str("0")],
            "invalid value: string \"0\", expected a discord snowflake",
        );
    }

    #[test]
    fn debug_prints_marker_name() {
        let id = Id::<UserMarker>::new(42);
        assert_eq!(format!("{id:?}"), "Id<UserMarker>(42)");
    }

    #[test]
    fn cast_keeps_value() {
        let user: Id<UserMarker> = Id::new(7);
        let guild: Id<GuildMarker> = user.cast();
        assert_eq!(guild.get(), 7);
    }

    #[test]
    fn usable_as_set_key() {
        let mut ids = HashSet::new();
        assert!(ids.insert(Id::<UserMarker>::new(1)));
        assert!(!ids.insert(Id::<UserMarker>::new(1)));
    }
}
