//! Precedence tags attached to emitted expressions

/// Binding strength of an emitted expression, tightest first
///
/// The derived ordering follows declaration order, so `a < b` means `a` binds
/// tighter than `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Order {
    Atomic,
    FunctionCall,
    LogicalNot,
    /// `+ - * /` share one level
    Arithmetic,
    Relational,
    /// Never produced: logical operators wrap both operands and are tagged
    /// `Atomic`. Kept so the scale matches the runtime's operator tiers.
    LogicalAnd,
    LogicalOr,
    /// Loosest level; also never produced
    None,
}

impl Order {
    /// Whether an operand of this order must be parenthesized when placed
    /// directly inside an operator of order `outer`
    #[must_use]
    pub fn needs_parens_within(self, outer: Order) -> bool {
        self >= outer
    }
}
