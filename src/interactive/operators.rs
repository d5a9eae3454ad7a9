//! Operator overloading for pipeline nodes.
//!
//! Every operator resolves the pending method first, then appends the
//! operation. Another node used as an operand contributes its own resolved
//! expression.

use super::node::Interactive;
use crate::kwargs::Kwargs;
use crate::transform::{Arg, BinaryOp, Ufunc, UnaryOp};
use std::ops;

impl Interactive {
    /// Appends a binary operation; with `reverse` the operand goes on the left.
    pub fn apply_operator(&self, op: BinaryOp, operand: impl Into<Arg>, reverse: bool) -> Interactive {
        let transform = self.resolved_transform().binary(op, operand, reverse);
        self.derive(transform, false, Kwargs::new())
    }

    pub fn apply_unary(&self, op: UnaryOp) -> Interactive {
        let transform = self.resolved_transform().unary(op);
        self.derive(transform, false, Kwargs::new())
    }

    pub fn pos(&self) -> Interactive {
        self.apply_unary(UnaryOp::Pos)
    }

    pub fn abs(&self) -> Interactive {
        self.apply_unary(UnaryOp::Abs)
    }

    /// Rounds half to even, to `ndigits` decimals when given.
    pub fn round(&self, ndigits: Option<i32>) -> Interactive {
        self.apply_unary(UnaryOp::Round(ndigits))
    }

    pub fn logical_not(&self) -> Interactive {
        self.apply_unary(UnaryOp::Not)
    }

    pub fn index(&self, key: impl Into<Arg>) -> Interactive {
        let transform = self.resolved_transform().index(key);
        self.derive(transform, false, Kwargs::new())
    }

    pub fn ufunc(&self, func: Ufunc) -> Interactive {
        let transform = self.resolved_transform().ufunc(func);
        self.derive(transform, false, Kwargs::new())
    }

    pub fn gt(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Gt, other, false)
    }

    pub fn ge(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Ge, other, false)
    }

    pub fn lt(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Lt, other, false)
    }

    pub fn le(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Le, other, false)
    }

    pub fn equal(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Eq, other, false)
    }

    pub fn not_equal(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Ne, other, false)
    }

    pub fn pow(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Pow, other, false)
    }

    pub fn floordiv(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::FloorDiv, other, false)
    }

    pub fn radd(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Add, other, true)
    }

    pub fn rsub(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Sub, other, true)
    }

    pub fn rmul(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Mul, other, true)
    }

    pub fn rtruediv(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::TrueDiv, other, true)
    }

    pub fn rfloordiv(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::FloorDiv, other, true)
    }

    pub fn rmod(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Mod, other, true)
    }

    pub fn rpow(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Pow, other, true)
    }

    pub fn rand(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::And, other, true)
    }

    pub fn ror(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Or, other, true)
    }

    pub fn rxor(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::Xor, other, true)
    }

    pub fn rlshift(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::LShift, other, true)
    }

    pub fn rrshift(&self, other: impl Into<Arg>) -> Interactive {
        self.apply_operator(BinaryOp::RShift, other, true)
    }
}

macro_rules! binary_operator {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<R: Into<Arg>> ops::$trait<R> for Interactive {
                type Output = Interactive;

                fn $method(self, rhs: R) -> Interactive {
                    self.apply_operator(BinaryOp::$op, rhs, false)
                }
            }

            impl<R: Into<Arg>> ops::$trait<R> for &Interactive {
                type Output = Interactive;

                fn $method(self, rhs: R) -> Interactive {
                    self.apply_operator(BinaryOp::$op, rhs, false)
                }
            }

            impl ops::$trait<Interactive> for f64 {
                type Output = Interactive;

                fn $method(self, rhs: Interactive) -> Interactive {
                    rhs.apply_operator(BinaryOp::$op, self, true)
                }
            }

            impl ops::$trait<&Interactive> for f64 {
                type Output = Interactive;

                fn $method(self, rhs: &Interactive) -> Interactive {
                    rhs.apply_operator(BinaryOp::$op, self, true)
                }
            }

            impl ops::$trait<Interactive> for i64 {
                type Output = Interactive;

                fn $method(self, rhs: Interactive) -> Interactive {
                    rhs.apply_operator(BinaryOp::$op, self, true)
                }
            }

            impl ops::$trait<&Interactive> for i64 {
                type Output = Interactive;

                fn $method(self, rhs: &Interactive) -> Interactive {
                    rhs.apply_operator(BinaryOp::$op, self, true)
                }
            }
        )*
    };
}

binary_operator!(
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => TrueDiv,
    Rem::rem => Mod,
    BitAnd::bitand => And,
    BitOr::bitor => Or,
    BitXor::bitxor => Xor,
    Shl::shl => LShift,
    Shr::shr => RShift,
);

impl ops::Neg for Interactive {
    type Output = Interactive;

    fn neg(self) -> Interactive {
        self.apply_unary(UnaryOp::Neg)
    }
}

impl ops::Neg for &Interactive {
    type Output = Interactive;

    fn neg(self) -> Interactive {
        self.apply_unary(UnaryOp::Neg)
    }
}

/// `!w` is bitwise or element-wise inversion (`~`), not logical not.
impl ops::Not for Interactive {
    type Output = Interactive;

    fn not(self) -> Interactive {
        self.apply_unary(UnaryOp::Invert)
    }
}

impl ops::Not for &Interactive {
    type Output = Interactive;

    fn not(self) -> Interactive {
        self.apply_unary(UnaryOp::Invert)
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::{Frame, Series, Value};
    use crate::interactive::Interactive;
    use crate::transform::{BinaryOp, OpKind};

    fn node() -> Interactive {
        let frame = Frame::new(vec![("A", vec![1.into(), 2.into(), 3.into()])]).unwrap();
        Interactive::new(frame).unwrap()
    }

    #[test]
    fn test_operator_resolves_pending_method() {
        let w = node();
        let shifted = w.attr("A").unwrap() + 1;
        assert_eq!(shifted.pending_method(), None);
        assert_eq!(shifted.transform().ops.len(), 2);
        assert_eq!(shifted.transform().to_string(), "(df_dim('*').A + 1)");
    }

    #[test]
    fn test_reflected_subtraction() {
        let w = node();
        let reflected = 10_i64 - w.attr("A").unwrap();
        let last = reflected.transform().ops.last().unwrap();
        assert_eq!(
            last.kind,
            OpKind::Binary {
                op: BinaryOp::Sub,
                reverse: true
            }
        );
        let expected = Value::Series(Series::from_f64("A", vec![9.0, 8.0, 7.0]));
        assert_eq!(reflected.eval().unwrap(), expected);
    }

    #[test]
    fn test_node_operand_uses_resolved_expression() {
        let w = node();
        let a = w.attr("A").unwrap();
        let doubled = &a + &a;
        assert_eq!(doubled.eval().unwrap(), (&a * 2).eval().unwrap());
    }
}
