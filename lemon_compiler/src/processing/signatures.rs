//! Binary operator signature catalogs and overload cost keys

use crate::symbols::{FunctionId, GlobalsLookup};
use crate::tokens::OperatorCategory;
use crate::types::{cast::implicit_cast_cost, DataType};

/// Integer widths each catalog is instantiated over, in catalog order
const CATALOG_TYPES: [DataType; 8] = [
    DataType::S64,
    DataType::U64,
    DataType::S32,
    DataType::U32,
    DataType::S16,
    DataType::U16,
    DataType::S8,
    DataType::U8,
];

/// Pair costs at or above this mean at least one side cannot be cast
const NO_SIGNATURE: u16 = 0xFF00;

/// Overload keys at or above this mean at least one argument cannot be cast
const NO_OVERLOAD: u32 = 0xFF00_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarySignature {
    pub left: DataType,
    pub right: DataType,
    pub result: DataType,
}

impl BinarySignature {
    const fn new(left: DataType, right: DataType, result: DataType) -> Self {
        Self {
            left,
            right,
            result,
        }
    }
}

/// Signatures an operator category may resolve to; empty for `Other`
pub fn catalog(category: OperatorCategory) -> Vec<BinarySignature> {
    CATALOG_TYPES
        .iter()
        .filter_map(|&t| match category {
            OperatorCategory::Assignment | OperatorCategory::Symmetric => {
                Some(BinarySignature::new(t, t, t))
            }
            OperatorCategory::Comparison => Some(BinarySignature::new(t, t, DataType::Bool)),
            OperatorCategory::Ternary => Some(BinarySignature::new(DataType::Bool, t, t)),
            OperatorCategory::Other => None,
        })
        .collect()
}

/// Both side costs packed into 16 bits, the worse one in the high byte
pub fn pair_cost(signature: &BinarySignature, left: DataType, right: DataType) -> u16 {
    let left_cost = implicit_cast_cost(left, signature.left);
    let right_cost = implicit_cast_cost(right, signature.right);
    let (high, low) = if left_cost >= right_cost {
        (left_cost, right_cost)
    } else {
        (right_cost, left_cost)
    };
    (u16::from(high) << 8) | u16::from(low)
}

/// Cheapest signature of `category` for the operand types; ties keep catalog order.
///
/// Assignments only consider signatures whose left side equals `left` exactly.
pub fn best_signature(
    category: OperatorCategory,
    left: DataType,
    right: DataType,
) -> Option<BinarySignature> {
    let mut best_cost = NO_SIGNATURE;
    let mut best = None;

    for signature in catalog(category) {
        if category == OperatorCategory::Assignment && signature.left != left {
            continue;
        }
        let cost = pair_cost(&signature, left, right);
        if cost < best_cost {
            best_cost = cost;
            best = Some(signature);
        }
    }
    best
}

/// Sort key comparing a call's argument types against one overload's parameters.
///
/// Per-parameter costs are sorted worst first and the top four packed one byte
/// each from the high end. Count mismatches yield `u32::MAX`.
pub fn overload_cost(arguments: &[DataType], parameters: &[DataType]) -> u32 {
    if arguments.len() != parameters.len() {
        return u32::MAX;
    }

    let mut costs: Vec<u8> = arguments
        .iter()
        .zip(parameters)
        .map(|(&argument, &parameter)| implicit_cast_cost(argument, parameter))
        .collect();
    costs.sort_unstable_by(|a, b| b.cmp(a));

    costs
        .iter()
        .take(4)
        .enumerate()
        .fold(0u32, |key, (index, &cost)| key | (u32::from(cost) << (24 - index * 8)))
}

/// Cheapest overload among `candidates`; ties keep registration order
pub fn select_overload(
    globals: &GlobalsLookup,
    candidates: &[FunctionId],
    arguments: &[DataType],
) -> Option<FunctionId> {
    let mut best_key = NO_OVERLOAD;
    let mut best = None;

    for &id in candidates {
        let Some(function) = globals.function(id) else {
            continue;
        };
        let parameters: Vec<DataType> = function.parameters.iter().map(|p| p.data_type).collect();
        let key = overload_cost(arguments, &parameters);
        if key < best_key {
            best_key = key;
            best = Some(id);
        }
    }
    best
}
