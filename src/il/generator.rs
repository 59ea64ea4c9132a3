use log::{debug, trace};

use crate::{
    ast::*,
    semantic::{AddSpan, SemanticError, SymbolTable},
};

use super::{label_generator::*, name_generator::*, quad::*};

type GenResult<T> = Result<T, SemanticError>;

/// Lowers a parsed program to quad code.
///
/// Statements that reference undeclared identifiers are left out of the
/// program; their errors are collected in [`Generated::errors`].
pub fn generate(program: Program, symbols: &SymbolTable) -> Generated {
    QuadGenerator::generate(program, symbols)
}

/// The outcome of code generation: the program, and any statements that had to be skipped.
#[derive(Debug)]
pub struct Generated {
    pub program: QuadProgram,
    pub errors: Vec<SemanticError>,
}
impl Generated {
    pub fn into_result(self) -> Result<QuadProgram, Vec<SemanticError>> {
        if self.errors.is_empty() {
            Ok(self.program)
        } else {
            Err(self.errors)
        }
    }
}

/// Where the value of an expression can be found.
#[derive(Debug)]
enum Location {
    /// A constant or a variable, usable as an operand as is.
    Inline(Value),
    /// A name that the expression's code writes to.
    Stored(Name),
}
impl Location {
    fn into_value(self) -> Value {
        match self {
            Location::Inline(value) => value,
            Location::Stored(name) => Value::Name(name),
        }
    }
}

/// The result of lowering an expression.
#[derive(Debug)]
struct Emitted {
    code: QuadListing,
    scalar: Scalar,
    location: Location,
    /// Whether the expression wrote its result straight into the slot offered by its parent.
    consumed_slot: bool,
}
impl Emitted {
    fn inline(value: Value, scalar: Scalar) -> Self {
        Self {
            code: QuadListing::new(),
            scalar,
            location: Location::Inline(value),
            consumed_slot: false,
        }
    }

    fn stored(code: QuadListing, scalar: Scalar, name: Name, consumed_slot: bool) -> Self {
        Self {
            code,
            scalar,
            location: Location::Stored(name),
            consumed_slot,
        }
    }

    fn into_parts(self) -> (QuadListing, Value) {
        (self.code, self.location.into_value())
    }
}

struct QuadGenerator<'s> {
    symbols: &'s SymbolTable,
    name_generator: NameGenerator,
    label_generator: LabelGenerator,
    errors: Vec<SemanticError>,
}
impl<'s> QuadGenerator<'s> {
    fn generate(program: Program, symbols: &'s SymbolTable) -> Generated {
        let mut gen = Self {
            symbols,
            name_generator: NameGenerator::new(),
            label_generator: LabelGenerator::new(),
            errors: vec![],
        };

        let code = gen.lower_block(program.body);
        trace!("generated {} instruction(s)", code.len());

        Generated {
            program: QuadProgram::new(code),
            errors: gen.errors,
        }
    }

    fn lower_block(&mut self, block: Block) -> QuadListing {
        let mut code = QuadListing::new();
        for stmt in block.statements {
            code.append(self.lower_stmt_or_report(stmt));
        }
        code
    }

    /// Lower a statement. If that fails, the error is recorded and the statement emits nothing.
    fn lower_stmt_or_report(&mut self, stmt: Statement) -> QuadListing {
        match self.lower_stmt(stmt) {
            Ok(code) => code,
            Err(err) => {
                debug!("dropping statement: {}", err);
                self.errors.push(err);
                QuadListing::new()
            }
        }
    }

    fn lower_stmt(&mut self, stmt: Statement) -> GenResult<QuadListing> {
        match stmt {
            Statement::Assign(assign) => self.lower_assign(assign),
            Statement::Input(target) => self.lower_input(target),
            Statement::Output(expr) => self.lower_output(expr),
            Statement::If(if_stmt) => self.lower_if(*if_stmt),
            Statement::While(while_stmt) => self.lower_while(*while_stmt),
            Statement::Block(block) => Ok(self.lower_block(block)),
        }
    }

    /// Lower an assignment. The target is offered to the expression as its destination,
    /// so that `x = a + b` becomes a single instruction.
    fn lower_assign(&mut self, assign: Assign) -> GenResult<QuadListing> {
        let target_type = self.lookup(&assign.target)?;
        let target = Name::Var(assign.target.name);

        let value = self.lower_expr(assign.value, Some(&target))?;
        if value.consumed_slot {
            return Ok(value.code);
        }

        let (mut code, value) = value.into_parts();
        code.push(Quad::Assign(target_type, target, value));
        Ok(code)
    }

    fn lower_input(&mut self, target: Ident) -> GenResult<QuadListing> {
        let scalar = self.lookup(&target)?;

        let mut code = QuadListing::new();
        code.push(Quad::Input(scalar, Name::Var(target.name)));
        Ok(code)
    }

    fn lower_output(&mut self, expr: Expr) -> GenResult<QuadListing> {
        let value = self.lower_expr(expr, None)?;
        let scalar = value.scalar;

        let (mut code, value) = value.into_parts();
        code.push(Quad::Print(scalar, value));
        Ok(code)
    }

    /// Lower an if-statement to a conditional jump over the first branch.
    /// A negated condition is not evaluated as such: the branches trade places instead.
    fn lower_if(&mut self, if_stmt: If) -> GenResult<QuadListing> {
        let (condition, swapped) = match if_stmt.condition {
            BoolExpr::Not(inner) => (*inner, true),
            condition => (condition, false),
        };

        let cond = self.lower_bool(condition);
        let then_code = self.lower_stmt_or_report(if_stmt.then_branch);
        let else_code = self.lower_stmt_or_report(if_stmt.else_branch);
        let (mut code, cond) = cond?.into_parts();

        let (first, second) = if swapped {
            (else_code, then_code)
        } else {
            (then_code, else_code)
        };

        let false_lbl = self.label_generator.next_label();
        let exit_lbl = self.label_generator.next_label();

        code.push(Quad::JumpIfZero(false_lbl, cond));
        code.append(first);
        code.push(Quad::Jump(exit_lbl));
        code.push(Quad::Label(false_lbl));
        code.append(second);
        code.push(Quad::Label(exit_lbl));
        Ok(code)
    }

    fn lower_while(&mut self, while_stmt: While) -> GenResult<QuadListing> {
        let entry_lbl = self.label_generator.next_label();
        let exit_lbl = self.label_generator.next_label();

        let cond = self.lower_bool(while_stmt.condition);
        let body = self.lower_stmt_or_report(while_stmt.body);
        let (cond_code, cond) = cond?.into_parts();

        let mut code = QuadListing::new();
        code.push(Quad::Label(entry_lbl));
        code.append(cond_code);
        code.push(Quad::JumpIfZero(exit_lbl, cond));
        code.append(body);
        code.push(Quad::Jump(entry_lbl));
        code.push(Quad::Label(exit_lbl));
        Ok(code)
    }

    /// Lower a condition to code that leaves 0 or 1 in an integer temporary.
    fn lower_bool(&mut self, expr: BoolExpr) -> GenResult<Emitted> {
        match expr {
            BoolExpr::Or(lhs, rhs) => {
                let lhs = self.lower_bool(*lhs)?;
                let rhs = self.lower_bool(*rhs)?;
                Ok(self.lower_disjunction(lhs, rhs))
            }
            BoolExpr::And(lhs, rhs) => {
                let lhs = self.lower_bool(*lhs)?;
                let rhs = self.lower_bool(*rhs)?;
                Ok(self.lower_conjunction(lhs, rhs))
            }
            BoolExpr::Not(inner) => {
                let (mut code, inner) = self.lower_bool(*inner)?.into_parts();
                let result = self.next_temp();
                code.push(Quad::Compare(
                    Scalar::Int,
                    CmpOp::Eql,
                    result.clone(),
                    inner,
                    Literal::Integer(0).into(),
                ));
                Ok(Emitted::stored(code, Scalar::Int, result, false))
            }
            BoolExpr::Rel(rel) => self.lower_relational(*rel),
        }
    }

    fn lower_relational(&mut self, rel: RelExpr) -> GenResult<Emitted> {
        let lhs = self.lower_expr(rel.lhs, None)?;
        let rhs = self.lower_expr(rel.rhs, None)?;
        let scalar = lhs.scalar.promote(rhs.scalar);

        let (mut code, lhs) = lhs.into_parts();
        let (rhs_code, rhs) = rhs.into_parts();
        code.append(rhs_code);

        let (op, or_equal) = match rel.op {
            RelOp::Equal => (CmpOp::Eql, false),
            RelOp::NotEqual => (CmpOp::Nql, false),
            RelOp::LessThan => (CmpOp::Lss, false),
            RelOp::GreaterThan => (CmpOp::Grt, false),
            RelOp::LessThanEqual => (CmpOp::Lss, true),
            RelOp::GreaterThanEqual => (CmpOp::Grt, true),
        };

        let mut result = if or_equal {
            // `a <= b` is evaluated as `a == b || a < b`, reusing the operands computed above.
            let equal = self.compare(scalar, CmpOp::Eql, lhs.clone(), rhs.clone());
            let strict = self.compare(scalar, op, lhs, rhs);
            self.lower_disjunction(equal, strict)
        } else {
            self.compare(scalar, op, lhs, rhs)
        };

        code.append(result.code);
        result.code = code;
        Ok(result)
    }

    /// A single comparison into a fresh temporary.
    fn compare(&mut self, scalar: Scalar, op: CmpOp, lhs: Value, rhs: Value) -> Emitted {
        let result = self.next_temp();
        let mut code = QuadListing::new();
        code.push(Quad::Compare(scalar, op, result.clone(), lhs, rhs));
        Emitted::stored(code, Scalar::Int, result, false)
    }

    /// `lhs || rhs`: the right-hand side is skipped when the left-hand side holds.
    fn lower_disjunction(&mut self, lhs: Emitted, rhs: Emitted) -> Emitted {
        let result = self.next_temp();
        let rhs_lbl = self.label_generator.next_label();
        let true_lbl = self.label_generator.next_label();
        let false_lbl = self.label_generator.next_label();
        let exit_lbl = self.label_generator.next_label();

        let (mut code, lhs) = lhs.into_parts();
        let (rhs_code, rhs) = rhs.into_parts();

        code.push(Quad::JumpIfZero(rhs_lbl, lhs));
        code.push(Quad::Jump(true_lbl));
        code.push(Quad::Label(rhs_lbl));
        code.append(rhs_code);
        code.push(Quad::JumpIfZero(false_lbl, rhs));
        code.push(Quad::Label(true_lbl));
        self.emit_truth_tail(&mut code, &result, false_lbl, exit_lbl);

        Emitted::stored(code, Scalar::Int, result, false)
    }

    /// `lhs && rhs`: the right-hand side is skipped when the left-hand side fails.
    fn lower_conjunction(&mut self, lhs: Emitted, rhs: Emitted) -> Emitted {
        let result = self.next_temp();
        let false_lbl = self.label_generator.next_label();
        let skip_lbl = self.label_generator.next_label();

        let (mut code, lhs) = lhs.into_parts();
        let (rhs_code, rhs) = rhs.into_parts();

        code.push(Quad::JumpIfZero(false_lbl, lhs));
        code.append(rhs_code);
        code.push(Quad::JumpIfZero(false_lbl, rhs));
        self.emit_truth_tail(&mut code, &result, false_lbl, skip_lbl);

        Emitted::stored(code, Scalar::Int, result, false)
    }

    /// Stores 1 in `result` on fallthrough, or 0 when entered through `false_lbl`.
    fn emit_truth_tail(
        &self,
        code: &mut QuadListing,
        result: &Name,
        false_lbl: Label,
        exit_lbl: Label,
    ) {
        let flag = |value| Value::from(Literal::Integer(value));

        code.push(Quad::Assign(Scalar::Int, result.clone(), flag(1)));
        code.push(Quad::Jump(exit_lbl));
        code.push(Quad::Label(false_lbl));
        code.push(Quad::Assign(Scalar::Int, result.clone(), flag(0)));
        code.push(Quad::Label(exit_lbl));
    }

    /// Lower an arithmetic expression. When `slot` is given, the expression may write its
    /// result there instead of allocating a temporary.
    fn lower_expr(&mut self, expr: Expr, slot: Option<&Name>) -> GenResult<Emitted> {
        match expr {
            Expr::Literal(lit) => Ok(Emitted::inline(lit.into(), lit.scalar())),
            Expr::Identifier(id) => {
                let scalar = self.lookup(&id)?;
                Ok(Emitted::inline(Value::Name(Name::Var(id.name)), scalar))
            }
            Expr::Binary(bin) => self.lower_binary(*bin, slot),
            Expr::Cast(cast) => self.lower_cast(*cast, slot),
        }
    }

    fn lower_binary(&mut self, bin: BinExpr, slot: Option<&Name>) -> GenResult<Emitted> {
        let lhs = self.lower_expr(bin.lhs, None)?;
        let rhs = self.lower_expr(bin.rhs, None)?;
        let scalar = lhs.scalar.promote(rhs.scalar);
        let (target, consumed_slot) = self.destination(slot);

        let (mut code, lhs) = lhs.into_parts();
        let (rhs_code, rhs) = rhs.into_parts();
        code.append(rhs_code);
        code.push(Quad::Arith(scalar, bin.op, target.clone(), lhs, rhs));

        Ok(Emitted::stored(code, scalar, target, consumed_slot))
    }

    fn lower_cast(&mut self, cast: CastExpr, slot: Option<&Name>) -> GenResult<Emitted> {
        let inner = self.lower_expr(cast.expr, None)?;
        let source = inner.scalar;
        let (target, consumed_slot) = self.destination(slot);

        let (mut code, value) = inner.into_parts();
        code.push(match (source, cast.target) {
            (Scalar::Int, Scalar::Float) => Quad::IntToReal(target.clone(), value),
            (Scalar::Float, Scalar::Int) => Quad::RealToInt(target.clone(), value),
            (scalar, _) => Quad::Assign(scalar, target.clone(), value),
        });

        Ok(Emitted::stored(code, cast.target, target, consumed_slot))
    }

    /// The name an expression should write to, and whether that name is the parent's slot.
    fn destination(&mut self, slot: Option<&Name>) -> (Name, bool) {
        match slot {
            Some(name) => (name.clone(), true),
            None => (self.next_temp(), false),
        }
    }

    /// A fresh temporary. Indices whose name is taken by a declared variable are skipped.
    fn next_temp(&mut self) -> Name {
        loop {
            let temp = self.name_generator.next_temp();
            if !self.symbols.contains(&temp.to_string()) {
                return temp;
            }
            trace!("skipping {}, which is a declared variable", temp);
        }
    }

    fn lookup(&self, id: &Ident) -> GenResult<Scalar> {
        self.symbols.lookup(&id.name).add_span(id.span)
    }
}
