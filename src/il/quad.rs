//! Quadruple code: the textual intermediate language emitted by the compiler.
use std::fmt::{self, Display, Formatter};

use crate::{
    ast::{ArithOp, Literal, Scalar},
    listing::Listing,
};

pub type QuadListing = Listing<Quad>;

/// A complete compiled program, always terminated by [`Quad::Halt`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuadProgram {
    instructions: QuadListing,
}
impl QuadProgram {
    /// Wraps a listing, appending the final `HALT`.
    pub fn new(mut instructions: QuadListing) -> Self {
        instructions.push(Quad::Halt);
        Self { instructions }
    }

    pub fn instructions(&self) -> &QuadListing {
        &self.instructions
    }

    /// The program rendered as one string per instruction.
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }
}
impl Display for QuadProgram {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for instr in self.instructions.iter() {
            writeln!(f, "{}", instr)?;
        }
        Ok(())
    }
}

/// A storage location: either a declared variable or a generated temporary.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Name {
    Var(String),
    Temp(usize),
}
impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name::Var(var) => f.write_str(var),
            Name::Temp(temp) => write!(f, "t{}", temp),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Label(pub usize);
impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// An instruction operand. Constants are written inline.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Const(Literal),
    Name(Name),
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Const(lit) => write!(f, "{}", lit),
            Value::Name(name) => write!(f, "{}", name),
        }
    }
}
impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        Value::Const(lit)
    }
}
impl From<Name> for Value {
    fn from(name: Name) -> Self {
        Value::Name(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lss,
    Grt,
    Eql,
    Nql,
}
impl Display for CmpOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            CmpOp::Lss => "LSS",
            CmpOp::Grt => "GRT",
            CmpOp::Eql => "EQL",
            CmpOp::Nql => "NQL",
        })
    }
}

/// A single quad instruction. The [`Scalar`] of typed instructions selects
/// between the `I` and `R` opcode families.
#[derive(Debug, Clone, PartialEq)]
pub enum Quad {
    /// Copy a value into a name.
    Assign(Scalar, Name, Value),
    /// Read a value from standard input.
    Input(Scalar, Name),
    /// Write a value to standard output.
    Print(Scalar, Value),
    /// `name = lhs op rhs`
    Arith(Scalar, ArithOp, Name, Value, Value),
    /// `name = lhs cmp rhs`, storing 1 when the comparison holds and 0 otherwise.
    Compare(Scalar, CmpOp, Name, Value, Value),
    IntToReal(Name, Value),
    RealToInt(Name, Value),
    Jump(Label),
    /// Jump to the label if the value is zero.
    JumpIfZero(Label, Value),
    Label(Label),
    Halt,
}
impl Display for Quad {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Quad::Assign(ty, target, value) => {
                write!(f, "{}ASN {} {}", prefix(*ty), target, value)
            }
            Quad::Input(ty, target) => write!(f, "{}INP {}", prefix(*ty), target),
            Quad::Print(ty, value) => write!(f, "{}PRT {}", prefix(*ty), value),
            Quad::Arith(ty, op, target, lhs, rhs) => {
                let mnemonic = match op {
                    ArithOp::Add => "ADD",
                    ArithOp::Subtract => "SUB",
                    ArithOp::Multiply => "MLT",
                    ArithOp::Divide => "DIV",
                };
                write!(f, "{}{} {} {} {}", prefix(*ty), mnemonic, target, lhs, rhs)
            }
            Quad::Compare(ty, op, target, lhs, rhs) => {
                write!(f, "{}{} {} {} {}", prefix(*ty), op, target, lhs, rhs)
            }
            Quad::IntToReal(target, value) => write!(f, "ITOR {} {}", target, value),
            Quad::RealToInt(target, value) => write!(f, "RTOI {} {}", target, value),
            Quad::Jump(label) => write!(f, "JUMP {}", label),
            Quad::JumpIfZero(label, value) => write!(f, "JMPZ {} {}", label, value),
            Quad::Label(label) => write!(f, "{}:", label),
            Quad::Halt => f.write_str("HALT"),
        }
    }
}

fn prefix(scalar: Scalar) -> char {
    match scalar {
        Scalar::Int => 'I',
        Scalar::Float => 'R',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Name {
        Name::Var(name.to_owned())
    }

    #[test]
    fn renders_typed_opcodes() {
        let cases = [
            (
                Quad::Assign(Scalar::Int, var("x"), Value::Const(Literal::Integer(3))),
                "IASN x 3",
            ),
            (
                Quad::Assign(Scalar::Float, var("y"), Value::Const(Literal::Float(2.0))),
                "RASN y 2.0",
            ),
            (Quad::Input(Scalar::Float, var("y")), "RINP y"),
            (Quad::Print(Scalar::Int, Name::Temp(4).into()), "IPRT t4"),
            (
                Quad::Arith(
                    Scalar::Float,
                    ArithOp::Multiply,
                    Name::Temp(1),
                    var("a").into(),
                    Value::Const(Literal::Float(1.5)),
                ),
                "RMLT t1 a 1.5",
            ),
            (
                Quad::Arith(
                    Scalar::Int,
                    ArithOp::Divide,
                    var("q"),
                    var("a").into(),
                    var("b").into(),
                ),
                "IDIV q a b",
            ),
            (
                Quad::Compare(
                    Scalar::Int,
                    CmpOp::Nql,
                    Name::Temp(2),
                    var("a").into(),
                    Value::Const(Literal::Integer(0)),
                ),
                "INQL t2 a 0",
            ),
            (
                Quad::Compare(
                    Scalar::Float,
                    CmpOp::Grt,
                    Name::Temp(2),
                    var("a").into(),
                    var("b").into(),
                ),
                "RGRT t2 a b",
            ),
        ];

        for (quad, expected) in cases {
            assert_eq!(expected, quad.to_string());
        }
    }

    #[test]
    fn renders_untyped_opcodes() {
        assert_eq!("ITOR f i", Quad::IntToReal(var("f"), var("i").into()).to_string());
        assert_eq!("RTOI i f", Quad::RealToInt(var("i"), var("f").into()).to_string());
        assert_eq!("JUMP L3", Quad::Jump(Label(3)).to_string());
        assert_eq!(
            "JMPZ L1 t7",
            Quad::JumpIfZero(Label(1), Name::Temp(7).into()).to_string()
        );
        assert_eq!("L12:", Quad::Label(Label(12)).to_string());
        assert_eq!("HALT", Quad::Halt.to_string());
    }

    #[test]
    fn program_ends_with_halt() {
        let mut listing = QuadListing::new();
        listing.push(Quad::Input(Scalar::Int, var("x")));
        let program = QuadProgram::new(listing);

        assert_eq!(vec!["IINP x", "HALT"], program.lines());
        assert_eq!("IINP x\nHALT\n", program.to_string());
    }

    #[test]
    fn empty_program_is_just_halt() {
        let program = QuadProgram::new(QuadListing::new());
        assert_eq!(1, program.instructions().len());
        assert_eq!("HALT\n", program.to_string());
    }
}
