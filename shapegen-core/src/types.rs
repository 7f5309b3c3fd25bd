//! Pointer and scalar vocabulary.
//!
//! These types name the markers the generated code references from the
//! runtime library. They are never emitted as definitions, only as
//! references through [`crate::RuntimeTypeLibrary`].

use std::fmt;

/// Declared multiplicity and optionality of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one value.
    One,
    /// Zero or one value.
    AtMostOne,
    /// Zero or more values.
    Many,
    /// One or more values.
    AtLeastOne,
}

impl Cardinality {
    /// Derives the cardinality from the source's multiplicity and required flags.
    ///
    /// # Arguments
    /// * `many` - Whether the pointer is multi-valued
    /// * `required` - Whether at least one value must be present
    #[must_use]
    pub const fn from_flags(many: bool, required: bool) -> Self {
        match (many, required) {
            (false, true) => Self::One,
            (false, false) => Self::AtMostOne,
            (true, true) => Self::AtLeastOne,
            (true, false) => Self::Many,
        }
    }

    /// Returns the runtime library member name for this cardinality.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::AtMostOne => "AtMostOne",
            Self::Many => "Many",
            Self::AtLeastOne => "AtLeastOne",
        }
    }

    /// Returns true if more than one value may be present.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Many | Self::AtLeastOne)
    }

    /// Returns true if at least one value must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::One | Self::AtLeastOne)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Descriptor kind of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Scalar-valued field.
    Property,
    /// Object-valued field.
    Link,
    /// Computed expression.
    Computable,
}

impl PointerKind {
    /// Parses a pointer kind from the source's spelling.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "property" => Some(Self::Property),
            "link" => Some(Self::Link),
            "computable" => Some(Self::Computable),
            _ => None,
        }
    }

    /// Returns the runtime library member name for this kind.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Link => "link",
            Self::Computable => "computable",
        }
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Closest generated-language representation of a material scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarRepr {
    /// Numeric family.
    Number,
    /// Text and identifier family.
    String,
    /// Boolean.
    Boolean,
    /// Arbitrary precision integer.
    BigInt,
    /// Opaque byte sequence.
    Binary,
    /// Anything without a direct counterpart.
    Unknown,
}

impl ScalarRepr {
    /// Maps a material scalar's qualified name to its representation.
    #[must_use]
    pub fn from_scalar_name(name: &str) -> Self {
        match name {
            "std::int16" | "std::int32" | "std::int64" | "std::float32" | "std::float64" => {
                Self::Number
            }
            "std::str" | "std::uuid" | "std::json" => Self::String,
            "std::bool" => Self::Boolean,
            "std::bigint" => Self::BigInt,
            "std::bytes" => Self::Binary,
            // decimal, datetime, duration and the cal:: family have no
            // lossless primitive counterpart.
            _ => Self::Unknown,
        }
    }

    /// Returns the TypeScript type expression.
    #[must_use]
    pub const fn ts_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::BigInt => "BigInt",
            Self::Binary => "Buffer",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScalarRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ts_type())
    }
}
