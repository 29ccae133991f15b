//! Built-in value types of the encoded signature grammar.

use std::fmt;

/// Primitive value type named by a type code in a decorated signature.
///
/// Names are the keywords of the binding's target language, which is what the
/// emitted declarations are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive
{
    Void,
    Char,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
    Bool,
    Long,
    ULong,
}

/// Code table of the signature grammar.
///
/// Order carries no meaning here. The lexer sorts a copy by code length before
/// matching so that two-character codes always win over shorter ones.
pub const TYPE_CODES: &[(&str, Primitive)] = &[
    ("X", Primitive::Void),
    ("D", Primitive::Char),
    ("E", Primitive::Byte),
    ("F", Primitive::Short),
    ("G", Primitive::UShort),
    ("H", Primitive::Int),
    ("I", Primitive::UInt),
    ("M", Primitive::Float),
    ("N", Primitive::Double),
    ("_N", Primitive::Bool),
    ("_J", Primitive::Long),
    ("_K", Primitive::ULong),
];

impl Primitive
{
    /// Every primitive, in table order.
    pub const ALL: [Primitive; 12] = [
        Primitive::Void,
        Primitive::Char,
        Primitive::Byte,
        Primitive::Short,
        Primitive::UShort,
        Primitive::Int,
        Primitive::UInt,
        Primitive::Float,
        Primitive::Double,
        Primitive::Bool,
        Primitive::Long,
        Primitive::ULong,
    ];

    /// Keyword used for this type in rendered declarations.
    pub fn name(self) -> &'static str
    {
        match self {
            Primitive::Void => "void",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::UShort => "ushort",
            Primitive::Int => "int",
            Primitive::UInt => "uint",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bool => "bool",
            Primitive::Long => "long",
            Primitive::ULong => "ulong",
        }
    }

    /// Encoded form of this type in a decorated name.
    pub fn code(self) -> &'static str
    {
        TYPE_CODES
            .iter()
            .find(|(_, primitive)| *primitive == self)
            .map_or("", |(code, _)| code)
    }
}

impl fmt::Display for Primitive
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}
