//! CPL scalar types.
use std::fmt::{self, Display, Formatter};

/// The type of a declared variable or of an arithmetic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Int,
    Float,
}
impl Scalar {
    /// The type of a binary operation on operands of type `self` and `other`:
    /// `float` if either side is a float, `int` otherwise.
    pub fn promote(self, other: Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Int, Scalar::Int) => Scalar::Int,
            _ => Scalar::Float,
        }
    }
}
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Int => f.write_str("int"),
            Scalar::Float => f.write_str("float"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_with_int_stays_int() {
        assert_eq!(Scalar::Int, Scalar::Int.promote(Scalar::Int));
    }

    #[test]
    fn any_float_operand_promotes_to_float() {
        assert_eq!(Scalar::Float, Scalar::Int.promote(Scalar::Float));
        assert_eq!(Scalar::Float, Scalar::Float.promote(Scalar::Int));
        assert_eq!(Scalar::Float, Scalar::Float.promote(Scalar::Float));
    }
}
