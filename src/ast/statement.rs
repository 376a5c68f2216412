use super::expression::Expression;
use super::span::SourceRange;
use super::ty::Type;

#[derive(Debug, Clone)]
pub enum Statement {
    VarDecl(VarDecl),
}

impl Statement {
    pub fn position(&self) -> SourceRange {
        match self {
            Statement::VarDecl(decl) => decl.position,
        }
    }
}

/// Structural equality; source ranges are ignored.
impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Statement::VarDecl(a), Statement::VarDecl(b)) => {
                a.ty == b.ty && a.name == b.name && a.initializer == b.initializer
            }
        }
    }
}

impl Eq for Statement {}

/// `<type> <name> [= <initializer>];`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ty: Type,
    pub name: String,
    pub initializer: Option<Expression>,
    pub position: SourceRange,
}
