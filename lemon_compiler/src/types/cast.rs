//! Implicit cast cost metric used by signature and overload selection

use super::{DataType, IntegerSemantics, TypeClass};

/// Cost returned when no implicit cast exists
pub const CANNOT_CAST: u8 = 0xFF;

/// How far `original` is from `target`; 0 means identical, [`CANNOT_CAST`] impossible.
///
/// Same-width conversions cost 1 (2 when dropping the sign). Widening costs
/// `0x10` (`0x20` when dropping the sign) plus the distance between the two
/// size classes; narrowing costs `0x30` (`0x40`) minus that distance.
pub fn implicit_cast_cost(original: DataType, target: DataType) -> u8 {
    if original == target {
        return 0;
    }

    let from = original.definition();
    let to = target.definition();
    if from.class != TypeClass::Integer || to.class != TypeClass::Integer {
        return CANNOT_CAST;
    }

    if from.semantics == IntegerSemantics::Constant || to.semantics == IntegerSemantics::Constant {
        return 1;
    }

    let drops_sign = from.signed && !to.signed;
    if from.bytes == to.bytes {
        return if drops_sign { 0x02 } else { 0x01 };
    }

    let distance = from.size_class().abs_diff(to.size_class());
    if from.bytes < to.bytes {
        (if drops_sign { 0x20 } else { 0x10 }) + distance
    } else {
        (if drops_sign { 0x40 } else { 0x30 }) - distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_constant() {
        assert_eq!(implicit_cast_cost(DataType::S32, DataType::S32), 0);
        assert_eq!(implicit_cast_cost(DataType::Float, DataType::Float), 0);
        assert_eq!(implicit_cast_cost(DataType::ConstInt, DataType::U8), 1);
        assert_eq!(implicit_cast_cost(DataType::S64, DataType::ConstInt), 1);
    }

    #[test]
    fn test_same_width() {
        assert_eq!(implicit_cast_cost(DataType::U32, DataType::S32), 1);
        assert_eq!(implicit_cast_cost(DataType::S32, DataType::U32), 2);
        assert_eq!(implicit_cast_cost(DataType::Bool, DataType::U8), 1);
    }

    #[test]
    fn test_widening_is_cheaper_than_narrowing() {
        assert_eq!(implicit_cast_cost(DataType::U8, DataType::U32), 0x12);
        assert_eq!(implicit_cast_cost(DataType::S8, DataType::U16), 0x21);
        assert_eq!(implicit_cast_cost(DataType::U32, DataType::U8), 0x2E);
        assert_eq!(implicit_cast_cost(DataType::U32, DataType::U16), 0x2F);
        assert_eq!(implicit_cast_cost(DataType::S64, DataType::U8), 0x3D);

        assert!(
            implicit_cast_cost(DataType::S8, DataType::S32)
                < implicit_cast_cost(DataType::S32, DataType::S8)
        );
    }

    #[test]
    fn test_narrowing_further_costs_less() {
        assert!(
            implicit_cast_cost(DataType::U32, DataType::U8)
                < implicit_cast_cost(DataType::U32, DataType::U16)
        );
        assert_eq!(implicit_cast_cost(DataType::S32, DataType::U16), 0x3F);
    }

    #[test]
    fn test_cross_class_is_impossible() {
        assert_eq!(implicit_cast_cost(DataType::Float, DataType::S32), CANNOT_CAST);
        assert_eq!(implicit_cast_cost(DataType::U8, DataType::Double), CANNOT_CAST);
        assert_eq!(implicit_cast_cost(DataType::Void, DataType::U8), CANNOT_CAST);
    }
}
