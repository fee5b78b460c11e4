//! Resolution contexts: the data a resolver reads from, and the state a
//! surface walk carries through recursion.

use serde_json::Value;

use crate::interpreter::error::RenderWarning;
use crate::types::{ChildReference, JsonPointer};

/// An immutable pairing of the root data tree and optional scoped data.
///
/// Lookups try the scoped tree first and fall back to the root only when the
/// path is absent from the scoped tree as a whole. There is no merging at
/// intermediate segments.
#[derive(Debug, Clone, Copy)]
pub struct ResolverContext<'a> {
    root: &'a Value,
    scoped: Option<&'a Value>,
}

impl<'a> ResolverContext<'a> {
    /// Create a context over the root data tree.
    pub fn new(root: &'a Value) -> Self {
        Self { root, scoped: None }
    }

    /// Create a child context with the same root and the given scoped data.
    ///
    /// The parent is left untouched.
    pub fn with_scoped_data<'b>(&self, scoped: &'b Value) -> ResolverContext<'b>
    where
        'a: 'b,
    {
        ResolverContext {
            root: self.root,
            scoped: Some(scoped),
        }
    }

    /// The root data tree.
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// The scoped data tree, if any.
    pub fn scoped(&self) -> Option<&'a Value> {
        self.scoped
    }

    /// Look a pointer up, scoped data first.
    pub fn lookup(&self, pointer: &JsonPointer) -> Option<&'a Value> {
        self.scoped
            .and_then(|scoped| pointer.lookup(scoped))
            .or_else(|| pointer.lookup(self.root))
    }
}

/// One component on the render stack.
#[derive(Debug)]
struct Frame {
    id: String,
    scoped: Option<Value>,
    /// Template children this frame expanded, if any.
    expansion: Option<Vec<ChildReference>>,
}

/// State carried through one recursive surface walk.
///
/// The context tracks:
/// - The chain of components currently being rendered, with their scoped
///   data and template expansions, for cycle detection
/// - Recursion depth against a configurable limit
/// - Warnings collected during the walk
#[derive(Debug)]
pub struct RenderContext {
    /// Components being rendered, outermost first.
    stack: Vec<Frame>,
    /// Maximum allowed depth.
    max_depth: usize,
    /// Warnings collected during the walk.
    warnings: Vec<RenderWarning>,
}

impl RenderContext {
    /// Create a context with the given depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
            warnings: Vec::new(),
        }
    }

    /// Enter a component.
    ///
    /// Returns a warning instead if:
    /// - The maximum depth would be exceeded
    /// - The same component is already being rendered with the same scoped
    ///   data, which would recurse forever
    pub fn push(&mut self, id: &str, scoped: Option<&Value>) -> Result<(), RenderWarning> {
        if self.stack.len() >= self.max_depth {
            return Err(RenderWarning::MaxDepthExceeded {
                component: id.to_string(),
                max_depth: self.max_depth,
            });
        }
        if self.is_active(id, scoped) {
            let mut chain = self.chain();
            chain.push(id.to_string());
            return Err(RenderWarning::CyclicComponent { chain });
        }
        self.stack.push(Frame {
            id: id.to_string(),
            scoped: scoped.cloned(),
            expansion: None,
        });
        Ok(())
    }

    /// Record the template children the innermost component expands to.
    ///
    /// A template whose source list falls back to data outside its own scope
    /// can expand to the very list an ancestor with the same id already
    /// expanded. Each instance would then expand that list again, so the
    /// expansion is refused with a warning instead. Empty lists are always
    /// accepted.
    pub fn expand(&mut self, children: &[ChildReference]) -> Result<(), RenderWarning> {
        let Some((current, ancestors)) = self.stack.split_last() else {
            return Ok(());
        };
        let repeated = !children.is_empty()
            && ancestors.iter().any(|frame| {
                frame.id == current.id && frame.expansion.as_deref() == Some(children)
            });
        if repeated {
            return Err(RenderWarning::CyclicComponent {
                chain: self.chain(),
            });
        }
        if let Some(current) = self.stack.last_mut() {
            current.expansion = Some(children.to_vec());
        }
        Ok(())
    }

    /// Leave the innermost component.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Check if a component is already being rendered with this scope.
    pub fn is_active(&self, id: &str, scoped: Option<&Value>) -> bool {
        self.stack
            .iter()
            .any(|frame| frame.id == id && frame.scoped.as_ref() == scoped)
    }

    /// Current recursion depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Record a warning. Duplicates are kept once.
    pub fn add_warning(&mut self, warning: RenderWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Drain all collected warnings.
    pub fn into_warnings(self) -> Vec<RenderWarning> {
        self.warnings
    }

    /// Ids of the components being rendered, outermost first.
    fn chain(&self) -> Vec<String> {
        self.stack.iter().map(|frame| frame.id.clone()).collect()
    }
}
