//! Decoded signature types.

use std::fmt;

use super::primitive::Primitive;

/// One type decoded from a signature: a primitive plus pointer indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedType
{
    primitive: Primitive,
    pointer_depth: u32,
}

impl DecodedType
{
    /// Construct from a primitive and its number of pointer markers.
    pub fn new(primitive: Primitive, pointer_depth: u32) -> Self
    {
        Self {
            primitive,
            pointer_depth,
        }
    }

    /// Construct a value (non-pointer) type.
    pub fn value(primitive: Primitive) -> Self
    {
        Self::new(primitive, 0)
    }

    pub fn primitive(&self) -> Primitive
    {
        self.primitive
    }

    /// Keyword of the underlying primitive, without indirection markers.
    pub fn primitive_name(&self) -> &'static str
    {
        self.primitive.name()
    }

    pub fn pointer_depth(&self) -> u32
    {
        self.pointer_depth
    }

    /// Whether this type is a pointer of any depth.
    pub fn is_pointer(&self) -> bool
    {
        self.pointer_depth > 0
    }
}

impl fmt::Display for DecodedType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.primitive.name())?;
        for _ in 0..self.pointer_depth {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// A routine decoded from one export-listing line.
///
/// Lives only as long as it takes to turn it into a binding declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExport
{
    /// Ordinal assigned by the listing tool; bindings link by ordinal.
    pub ordinal: u32,
    /// Undecorated identifier exactly as it appeared in the decorated name.
    pub raw_identifier: String,
    /// First type of the encoded run.
    pub return_type: DecodedType,
    /// Remaining types of the encoded run, in declaration order.
    pub parameters: Vec<DecodedType>,
}

impl DecodedExport
{
    /// Whether any type in the signature, return type included, is a pointer.
    pub fn requires_unsafe(&self) -> bool
    {
        self.return_type.is_pointer() || self.parameters.iter().any(DecodedType::is_pointer)
    }
}
