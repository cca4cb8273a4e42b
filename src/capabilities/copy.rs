//! # Shallow-copy capability and node duplication.
//!
//! Some node attributes must be shared, not duplicated, when a node is cloned: a
//! wrapped callable may hold handles that have no meaningful deep copy. A node
//! declares those attributes through [`ShallowCopyAttrs`]; every other attribute is
//! deep-copied.
//!
//! [`duplicate`] is the generic cloning routine. It turns the declaration into a
//! [`CopyPlan`] and lets the node copy each attribute according to that plan.
//!
//! ```text
//! shallow_copy_attrs = ["python_callable"]
//!
//! original ── python_callable ──► Arc<dyn Callable> ◄── python_callable ── clone
//! original ── op_args ──► [..]             clone ── op_args ──► [..] (own copy)
//! ```

use crate::error::DecorateError;

/// How a single attribute is carried over to a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Share the referenced object.
    Shallow,
    /// Duplicate the contents.
    Deep,
}

/// # Declares attributes that are shared by reference on duplication.
pub trait ShallowCopyAttrs {
    fn shallow_copy_attrs(&self) -> &'static [&'static str];
}

/// Per-attribute copy decisions derived from a [`ShallowCopyAttrs`] declaration.
#[derive(Debug, Clone, Copy)]
pub struct CopyPlan {
    shallow: &'static [&'static str],
}

impl CopyPlan {
    /// Builds a plan that shares exactly the `shallow` attributes.
    pub fn new(shallow: &'static [&'static str]) -> Self {
        Self { shallow }
    }

    /// Builds the plan a node declares for itself.
    pub fn for_node<T: ShallowCopyAttrs + ?Sized>(node: &T) -> Self {
        Self::new(node.shallow_copy_attrs())
    }

    /// A plan that deep-copies everything.
    pub fn deep() -> Self {
        Self::new(&[])
    }

    /// Copy mode for `attr`.
    pub fn mode(&self, attr: &str) -> CopyMode {
        if self.shallow.iter().any(|s| *s == attr) {
            CopyMode::Shallow
        } else {
            CopyMode::Deep
        }
    }
}

/// # Node that can be duplicated under a [`CopyPlan`].
///
/// Implementations must consult `plan` for every attribute and fail with
/// [`DecorateError::NotDeepCopyable`] when asked to deep-copy something that can
/// only be shared.
pub trait Duplicate: ShallowCopyAttrs + Sized {
    fn duplicate_with(&self, plan: &CopyPlan) -> Result<Self, DecorateError>;
}

/// Duplicates `node` following its own shallow-copy declaration.
pub fn duplicate<T: Duplicate>(node: &T) -> Result<T, DecorateError> {
    node.duplicate_with(&CopyPlan::for_node(node))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_modes() {
        let plan = CopyPlan::new(&["handle"]);
        assert_eq!(plan.mode("handle"), CopyMode::Shallow);
        assert_eq!(plan.mode("payload"), CopyMode::Deep);
        assert_eq!(CopyPlan::deep().mode("handle"), CopyMode::Deep);
    }
}
