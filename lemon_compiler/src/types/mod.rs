//! Predefined data types
//!
//! Types are identified by a small `Copy` handle ([`DataType`]) that resolves
//! to an immutable, process-wide [`DataTypeDefinition`]. Identity comparisons
//! are plain handle comparisons.

pub mod cast;

pub use cast::{implicit_cast_cost, CANNOT_CAST};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad type class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClass {
    Void,
    Integer,
    Float,
}

/// Integer semantics; separates literal constants and booleans from plain integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerSemantics {
    Default,
    Constant,
    Boolean,
}

/// Immutable description of one predefined type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeDefinition {
    pub name: &'static str,
    pub class: TypeClass,
    pub bytes: u8,
    pub signed: bool,
    pub semantics: IntegerSemantics,
}

impl DataTypeDefinition {
    const fn integer(name: &'static str, bytes: u8, signed: bool) -> Self {
        Self {
            name,
            class: TypeClass::Integer,
            bytes,
            signed,
            semantics: IntegerSemantics::Default,
        }
    }

    /// Width encoded as log2 of the byte count (0 for one byte, 3 for eight)
    pub fn size_class(&self) -> u8 {
        match self.bytes {
            0 | 1 => 0,
            2 => 1,
            4 => 2,
            _ => 3,
        }
    }
}

static DEFINITIONS: [DataTypeDefinition; 13] = [
    DataTypeDefinition {
        name: "void",
        class: TypeClass::Void,
        bytes: 0,
        signed: false,
        semantics: IntegerSemantics::Default,
    },
    DataTypeDefinition {
        name: "bool",
        class: TypeClass::Integer,
        bytes: 1,
        signed: false,
        semantics: IntegerSemantics::Boolean,
    },
    DataTypeDefinition::integer("u8", 1, false),
    DataTypeDefinition::integer("u16", 2, false),
    DataTypeDefinition::integer("u32", 4, false),
    DataTypeDefinition::integer("u64", 8, false),
    DataTypeDefinition::integer("s8", 1, true),
    DataTypeDefinition::integer("s16", 2, true),
    DataTypeDefinition::integer("s32", 4, true),
    DataTypeDefinition::integer("s64", 8, true),
    DataTypeDefinition {
        name: "const_int",
        class: TypeClass::Integer,
        bytes: 8,
        signed: true,
        semantics: IntegerSemantics::Constant,
    },
    DataTypeDefinition {
        name: "float",
        class: TypeClass::Float,
        bytes: 4,
        signed: true,
        semantics: IntegerSemantics::Default,
    },
    DataTypeDefinition {
        name: "double",
        class: TypeClass::Float,
        bytes: 8,
        signed: true,
        semantics: IntegerSemantics::Default,
    },
];

/// Handle to a predefined type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    Void,
    Bool,
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
    ConstInt,
    Float,
    Double,
}

impl DataType {
    pub const ALL: [DataType; 13] = [
        DataType::Void,
        DataType::Bool,
        DataType::U8,
        DataType::U16,
        DataType::U32,
        DataType::U64,
        DataType::S8,
        DataType::S16,
        DataType::S32,
        DataType::S64,
        DataType::ConstInt,
        DataType::Float,
        DataType::Double,
    ];

    pub fn definition(self) -> &'static DataTypeDefinition {
        &DEFINITIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn class(self) -> TypeClass {
        self.definition().class
    }

    pub fn bytes(self) -> u8 {
        self.definition().bytes
    }

    pub fn is_integer(self) -> bool {
        self.class() == TypeClass::Integer
    }

    pub fn is_void(self) -> bool {
        self.class() == TypeClass::Void
    }

    /// Look up a predefined type by its source name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|data_type| data_type.name() == name)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| format!("Unknown data type '{}'", name))
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.name().to_string()
    }
}
