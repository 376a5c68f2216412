use std::fmt;
use std::hash::{Hash, Hasher};

/// Syntactic types: `void` with any number of pointer suffixes
///
/// Pointer chains can be arbitrarily long, so every trait that would walk the
/// chain recursively is implemented with a loop instead.
pub enum Type {
    Void,
    Pointer(Box<Type>),
}

impl Type {
    pub fn pointer(pointee: Type) -> Self {
        Type::Pointer(Box::new(pointee))
    }

    /// Wrap `void` in `depth` pointer suffixes.
    pub fn with_depth(depth: usize) -> Self {
        (0..depth).fold(Type::Void, |pointee, _| Type::pointer(pointee))
    }

    /// Number of `*` suffixes wrapped around the base type.
    pub fn pointer_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(inner) = current.pointee() {
            depth += 1;
            current = inner;
        }
        depth
    }

    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer(inner) => Some(inner.as_ref()),
            Type::Void => None,
        }
    }
}

impl Drop for Type {
    fn drop(&mut self) {
        let mut next = match self {
            Type::Pointer(inner) => std::mem::replace(inner.as_mut(), Type::Void),
            Type::Void => return,
        };
        // each replaced node is dropped with a `Void` pointee
        while let Type::Pointer(inner) = &mut next {
            let pointee = std::mem::replace(inner.as_mut(), Type::Void);
            next = pointee;
        }
    }
}

impl Clone for Type {
    fn clone(&self) -> Self {
        Type::with_depth(self.pointer_depth())
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.pointer_depth() == other.pointer_depth()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pointer_depth().hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.pointer_depth();
        for _ in 0..depth {
            f.write_str("Pointer(")?;
        }
        f.write_str("Void")?;
        for _ in 0..depth {
            f.write_str(")")?;
        }
        Ok(())
    }
}
