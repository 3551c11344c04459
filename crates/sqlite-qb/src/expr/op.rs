//! Operator tables and the precedence ladder.

/// Binding strength of an expression node. Higher binds tighter.
///
/// Only used to decide where parentheses go when nodes are composed; it has
/// no effect on evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(u8);

impl Precedence {
    /// Raw SQL fragments: always parenthesized as operands.
    pub const RAW: Self = Self(0);
    pub const OR: Self = Self(1);
    pub const AND: Self = Self(2);
    /// `NOT x`, `x ISNULL`, `x NOTNULL`, `x NOT NULL`
    pub const NOT: Self = Self(3);
    /// `= <> IS IS NOT`, `BETWEEN`, `IN`, `LIKE GLOB REGEXP MATCH`
    pub const EQUALITY: Self = Self(4);
    /// `< <= > >=`
    pub const ORDERING: Self = Self(5);
    /// `<< >> & |`
    pub const BITWISE: Self = Self(6);
    /// binary `+ -`
    pub const ADDITIVE: Self = Self(7);
    /// `* / %`
    pub const MULTIPLICATIVE: Self = Self(8);
    /// `|| -> ->>`
    pub const CONCAT: Self = Self(9);
    /// unary `~ + -`
    pub const UNARY: Self = Self(10);
    pub const COLLATE: Self = Self(11);
    /// Literals, columns, parameters, calls and anything self-delimiting.
    pub const UNBREAKABLE: Self = Self(u8::MAX);

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `~x`
    BitNot,
    /// `+x`
    Plus,
    /// `-x`
    Minus,
    /// `NOT x`
    Not,
}

impl UnaryOp {
    /// Operator text including any trailing space.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::BitNot => "~",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "NOT ",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            UnaryOp::Not => Precedence::NOT,
            _ => Precedence::UNARY,
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Concat,
    /// `->`
    Extract,
    /// `->>`
    ExtractText,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Is,
    IsNot,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Concat => "||",
            BinaryOp::Extract => "->",
            BinaryOp::ExtractText => "->>",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Concat | BinaryOp::Extract | BinaryOp::ExtractText => Precedence::CONCAT,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => Precedence::MULTIPLICATIVE,
            BinaryOp::Add | BinaryOp::Sub => Precedence::ADDITIVE,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitAnd | BinaryOp::BitOr => {
                Precedence::BITWISE
            }
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => Precedence::ORDERING,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Is | BinaryOp::IsNot => Precedence::EQUALITY,
            BinaryOp::And => Precedence::AND,
            BinaryOp::Or => Precedence::OR,
        }
    }
}

/// Postfix null tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    /// `x ISNULL`
    IsNull,
    /// `x NOTNULL`
    NotNull,
    /// `x NOT NULL`
    NotSpaceNull,
}

impl PostfixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            PostfixOp::IsNull => "ISNULL",
            PostfixOp::NotNull => "NOTNULL",
            PostfixOp::NotSpaceNull => "NOT NULL",
        }
    }
}

/// Pattern matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOp {
    Like,
    Glob,
    Regexp,
    Match,
}

impl MatchOp {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchOp::Like => "LIKE",
            MatchOp::Glob => "GLOB",
            MatchOp::Regexp => "REGEXP",
            MatchOp::Match => "MATCH",
        }
    }
}
