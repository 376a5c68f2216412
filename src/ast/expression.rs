use super::span::SourceRange;

#[derive(Debug, Clone)]
pub enum Expression {
    IntLiteral(IntLiteral),
    Identifier(Identifier),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

impl Expression {
    pub fn position(&self) -> SourceRange {
        match self {
            Expression::IntLiteral(lit) => lit.position,
            Expression::Identifier(ident) => ident.position,
            Expression::Unary(unary) => unary.position,
            Expression::Binary(bin) => bin.position,
        }
    }

    pub fn with_position(mut self, position: SourceRange) -> Self {
        match &mut self {
            Expression::IntLiteral(lit) => lit.position = position,
            Expression::Identifier(ident) => ident.position = position,
            Expression::Unary(unary) => unary.position = position,
            Expression::Binary(bin) => bin.position = position,
        }
        self
    }

    fn placeholder() -> Self {
        Expression::IntLiteral(IntLiteral {
            value: 0,
            position: SourceRange::default(),
        })
    }
}

/// Structural equality; source ranges are ignored.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Expression::IntLiteral(a), Expression::IntLiteral(b)) if a.value == b.value => {}
                (Expression::Identifier(a), Expression::Identifier(b)) if a.name == b.name => {}
                (Expression::Unary(a), Expression::Unary(b)) if a.op == b.op => {
                    pending.push((a.operand.as_ref(), b.operand.as_ref()));
                }
                (Expression::Binary(a), Expression::Binary(b)) if a.op == b.op => {
                    pending.push((a.left.as_ref(), b.left.as_ref()));
                    pending.push((a.right.as_ref(), b.right.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expression {}

#[derive(Debug, Clone)]
pub struct IntLiteral {
    pub value: i64,
    pub position: SourceRange,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: String,
    pub position: SourceRange,
}

/// Prefix operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOpKind {
    /// `!`
    Not,
    /// `&`
    AddressOf,
    /// `*`
    Deref,
}

impl UnaryOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOpKind::Not => "!",
            UnaryOpKind::AddressOf => "&",
            UnaryOpKind::Deref => "*",
        }
    }
}

/// Binary operator kinds, from tightest to loosest binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOpKind {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Mod => "%",
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Shl => "<<",
            BinOpKind::Shr => ">>",
            BinOpKind::Lt => "<",
            BinOpKind::Le => "<=",
            BinOpKind::Gt => ">",
            BinOpKind::Ge => ">=",
            BinOpKind::Eq => "==",
            BinOpKind::Ne => "!=",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
        }
    }
}

/// Prefix operation expression
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: UnaryOpKind,
    pub operand: Box<Expression>,
    pub position: SourceRange,
}

impl UnaryExpr {
    /// Build a node spanning the operator at `op_position` and its operand.
    pub fn new(op: UnaryOpKind, op_position: SourceRange, operand: Expression) -> Self {
        let position = op_position.merge(operand.position());
        Self {
            op,
            operand: Box::new(operand),
            position,
        }
    }
}

/// Binary operation expression
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: BinOpKind,
    pub right: Box<Expression>,
    pub position: SourceRange,
}

impl BinaryExpr {
    /// Build a node whose range spans both operands.
    pub fn new(left: Expression, op: BinOpKind, right: Expression) -> Self {
        let position = left.position().merge(right.position());
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            position,
        }
    }
}

// Operator chains can nest far deeper than the call stack allows, so nested
// operator nodes are moved onto a heap stack and dropped one at a time.

fn detach(slot: &mut Expression, pending: &mut Vec<Expression>) {
    if matches!(slot, Expression::Unary(_) | Expression::Binary(_)) {
        pending.push(std::mem::replace(slot, Expression::placeholder()));
    }
}

fn drop_detached(mut pending: Vec<Expression>) {
    while let Some(mut expr) = pending.pop() {
        match &mut expr {
            Expression::Unary(unary) => detach(&mut unary.operand, &mut pending),
            Expression::Binary(bin) => {
                detach(&mut bin.left, &mut pending);
                detach(&mut bin.right, &mut pending);
            }
            Expression::IntLiteral(_) | Expression::Identifier(_) => {}
        }
    }
}

impl Drop for UnaryExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.operand, &mut pending);
        drop_detached(pending);
    }
}

impl Drop for BinaryExpr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.left, &mut pending);
        detach(&mut self.right, &mut pending);
        drop_detached(pending);
    }
}
