// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID newtypes
//!
//! [`define_id!`] generates string newtypes in two flavors: prefixed IDs
//! with random generation (`pub struct Name("pfx-")`) and plain wrappers
//! around caller-supplied strings (`pub struct Name`).

/// Define a string-backed newtype ID.
///
/// With a prefix literal, `new()` generates `{prefix}{nanoid}` and
/// `from_string()` wraps an existing string. Without a prefix, `new()`
/// wraps the given string directly.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct InstanceId("ins-");
/// }
/// define_id! {
///     pub struct TimerId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $crate::define_id! {
            @common
            $(#[$meta])*
            pub struct $name;
        }

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generate a new random ID with the type prefix.
            pub fn new() -> Self {
                Self(format!("{}{}", Self::PREFIX, nanoid::nanoid!(12)))
            }

            /// Wrap an existing string (for parsing/deserialization).
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The ID without its type prefix.
            pub fn suffix(&self) -> &str {
                self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $crate::define_id! {
            @common
            $(#[$meta])*
            pub struct $name;
        }

        impl $name {
            /// Wrap the given string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }
        }
    };
    (
        @common
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for one module instance.
    ///
    /// A fresh ID is generated each time a statement's instance is created,
    /// so events from a replaced instance can never be mistaken for events
    /// from the current one.
    pub struct InstanceId("ins-");
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
