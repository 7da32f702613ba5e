//! Closed enumerations.
//!
//! A closed enumeration is a finite, ordered set of named singleton
//! variants. The set is fixed when the type is declared: every variant gets a
//! zero-based ordinal in declaration order and a symbolic name from a
//! constant table, so there is no registration step, no "not yet closed"
//! state and no runtime name lookup by introspection.
//!
//! Types are usually declared with [`closed_enum!`](crate::closed_enum),
//! which generates the enum, its [`ClosedEnum`] table, `Display`, `FromStr`
//! and serde support (variants serialize as their symbolic name).

use thiserror::Error;

/// A finite, ordered set of named variants fixed at compile time.
pub trait ClosedEnum: Copy + Eq + Sized + 'static {
    /// Every variant, in ordinal order.
    const VARIANTS: &'static [Self];

    /// Symbolic name of this variant.
    fn name(self) -> &'static str;

    /// Zero-based position of this variant in declaration order.
    fn ordinal(self) -> usize;

    /// All variants in declaration order.
    fn all() -> &'static [Self] {
        Self::VARIANTS
    }

    /// Find the variant whose symbolic name is exactly `name`.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }

    /// Find the variant with the given ordinal.
    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::VARIANTS.get(ordinal).copied()
    }
}

/// Returned when a symbolic name matches no variant of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {type_name} '{name}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub name: String,
    pub expected: String,
}

impl UnknownVariant {
    /// Build the error for `T`, listing its valid names.
    pub fn new<T: ClosedEnum>(type_name: &'static str, name: &str) -> Self {
        let expected = T::all()
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            type_name,
            name: name.to_string(),
            expected,
        }
    }
}

/// Check that a variant table is consistent: ordinals match table positions
/// and symbolic names are unique and non-empty.
pub fn verify_table<T: ClosedEnum>() -> std::result::Result<(), String> {
    for (idx, variant) in T::all().iter().enumerate() {
        if variant.ordinal() != idx {
            return Err(format!(
                "variant '{}' has ordinal {} but sits at position {}",
                variant.name(),
                variant.ordinal(),
                idx
            ));
        }
        if variant.name().is_empty() {
            return Err(format!("variant at position {} has an empty name", idx));
        }
        if T::all()[..idx].iter().any(|v| v.name() == variant.name()) {
            return Err(format!("duplicate variant name '{}'", variant.name()));
        }
    }
    Ok(())
}

/// Declare a closed enumeration.
///
/// ```
/// a3s_forge_core::closed_enum! {
///     /// Disk image formats.
///     pub enum DiskFormat {
///         Raw => "raw",
///         Qcow2 => "qcow2",
///     }
/// }
///
/// use a3s_forge_core::enumeration::ClosedEnum;
/// assert_eq!(DiskFormat::Qcow2.ordinal(), 1);
/// assert_eq!(DiskFormat::from_name("raw"), Some(DiskFormat::Raw));
/// ```
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::enumeration::ClosedEnum for $name {
            const VARIANTS: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol ),+
                }
            }

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::enumeration::ClosedEnum::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::enumeration::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::enumeration::ClosedEnum>::from_name(s)
                    .ok_or_else(|| $crate::enumeration::UnknownVariant::new::<Self>(stringify!($name), s))
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str($crate::enumeration::ClosedEnum::name(*self))
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let name = <::std::string::String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                name.parse().map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}
