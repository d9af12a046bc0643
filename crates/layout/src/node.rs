//! Expression tree shared by every layout stage.
//!
//! A tree is a `LayoutNode<D>` where `D` is the datum the most recent pass
//! produced. The parser builds `LayoutNode<Unscaled>` (an [`Expr`]); each pass
//! consumes a tree of one stage and returns a tree of the next, so a pass can
//! never run before its prerequisite.

use std::fmt;

/// Deepest tree the passes accept. Every pass recurses once per level.
pub const MAX_DEPTH: usize = 128;

/// Stage datum of a freshly parsed tree: nothing has been computed yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unscaled;

/// A parsed expression, ready for the scale pass.
pub type Expr = LayoutNode<Unscaled>;

/// A node of an expression tree at stage `D`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode<D> {
    kind: NodeKind<D>,
    data: D,
}

/// The node variants. Children are exclusively owned.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind<D> {
    /// A single character glyph.
    Character(char),
    /// Two terms side by side on a shared baseline.
    Concatenation {
        left: Box<LayoutNode<D>>,
        right: Box<LayoutNode<D>>,
    },
    /// Numerator over denominator with a rule between them.
    Fraction {
        numerator: Box<LayoutNode<D>>,
        denominator: Box<LayoutNode<D>>,
    },
    /// A base with an optional superscript and an optional subscript.
    SuperSubscript {
        base: Box<LayoutNode<D>>,
        superscript: Option<Box<LayoutNode<D>>>,
        subscript: Option<Box<LayoutNode<D>>>,
    },
    /// A child wrapped in stretchable parentheses.
    Parenthesized(Box<LayoutNode<D>>),
}

impl<D> LayoutNode<D> {
    pub(crate) fn from_parts(kind: NodeKind<D>, data: D) -> Self {
        Self { kind, data }
    }

    pub(crate) fn into_parts(self) -> (NodeKind<D>, D) {
        (self.kind, self.data)
    }

    /// Source text of the subtree, rebuilt on each call.
    ///
    /// Characters appear as themselves, juxtaposition as plain adjacency, a
    /// fraction as `num/den`, parentheses as `(child)`, and scripts as
    /// `base^sup_sub` where an absent script drops its marker entirely
    /// (`x^2`, `x_i`). Braces used only for grouping are not reproduced.
    pub fn value(&self) -> String {
        self.to_string()
    }

    pub fn kind(&self) -> &NodeKind<D> {
        &self.kind
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Children in rendering order. Absent scripts are skipped.
    pub fn children(&self) -> Vec<&LayoutNode<D>> {
        match &self.kind {
            NodeKind::Character(_) => Vec::new(),
            NodeKind::Concatenation { left, right } => vec![left.as_ref(), right.as_ref()],
            NodeKind::Fraction {
                numerator,
                denominator,
            } => vec![numerator.as_ref(), denominator.as_ref()],
            NodeKind::SuperSubscript {
                base,
                superscript,
                subscript,
            } => {
                let mut children = vec![base.as_ref()];
                children.extend(superscript.as_deref());
                children.extend(subscript.as_deref());
                children
            }
            NodeKind::Parenthesized(child) => vec![child.as_ref()],
        }
    }

    /// Number of `Fraction` nodes in this subtree, this node included.
    pub fn count_divisions(&self) -> usize {
        let own = usize::from(self.is_fraction());
        own + self
            .children()
            .into_iter()
            .map(LayoutNode::count_divisions)
            .sum::<usize>()
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self.kind, NodeKind::Fraction { .. })
    }

    /// Total number of nodes in the subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Nesting depth; a leaf has depth 1.
    ///
    /// Walks with an explicit stack, so it is safe to call on trees deeper
    /// than [`MAX_DEPTH`].
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children().into_iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Character(_) => "Character",
            NodeKind::Concatenation { .. } => "Concatenation",
            NodeKind::Fraction { .. } => "Fraction",
            NodeKind::SuperSubscript { .. } => "SuperSubscript",
            NodeKind::Parenthesized(_) => "Parenthesized",
        }
    }
}

impl LayoutNode<Unscaled> {
    pub fn character(c: char) -> Self {
        Self::from_parts(NodeKind::Character(c), Unscaled)
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Self::from_parts(
            NodeKind::Concatenation {
                left: Box::new(left),
                right: Box::new(right),
            },
            Unscaled,
        )
    }

    /// Join a run of terms left to right as a balanced tree, so a run of `n`
    /// terms adds only about `log2(n)` levels.
    ///
    /// Grouping does not change the layout: widths add, heights and divider
    /// offsets take the maximum, and every term is aligned to the run's
    /// divider whichever way the run is split.
    ///
    /// Returns `None` for an empty run.
    pub fn concat_all(mut terms: Vec<Expr>) -> Option<Self> {
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            n => {
                let right = terms.split_off((n + 1) / 2);
                Some(Self::concat(
                    Self::concat_all(terms)?,
                    Self::concat_all(right)?,
                ))
            }
        }
    }

    pub fn fraction(numerator: Expr, denominator: Expr) -> Self {
        Self::from_parts(
            NodeKind::Fraction {
                numerator: Box::new(numerator),
                denominator: Box::new(denominator),
            },
            Unscaled,
        )
    }

    /// Attach scripts to `base`. The result does not depend on the order the
    /// scripts appeared in the source.
    ///
    /// The node's [`value`](LayoutNode::value) reads `base^sup_sub`; an absent
    /// script leaves out its marker, so `x^2` and `x_i` rather than `x^2_`
    /// and `x^_i`.
    pub fn scripts(base: Expr, superscript: Option<Expr>, subscript: Option<Expr>) -> Self {
        Self::from_parts(
            NodeKind::SuperSubscript {
                base: Box::new(base),
                superscript: superscript.map(Box::new),
                subscript: subscript.map(Box::new),
            },
            Unscaled,
        )
    }

    pub fn superscript(base: Expr, superscript: Expr) -> Self {
        Self::scripts(base, Some(superscript), None)
    }

    pub fn subscript(base: Expr, subscript: Expr) -> Self {
        Self::scripts(base, None, Some(subscript))
    }

    pub fn parenthesized(child: Expr) -> Self {
        Self::from_parts(NodeKind::Parenthesized(Box::new(child)), Unscaled)
    }

    /// Concatenate a run of characters.
    ///
    /// Returns `None` for an empty string.
    pub fn text(s: &str) -> Option<Self> {
        Self::concat_all(s.chars().map(Self::character).collect())
    }
}

impl<D> fmt::Display for LayoutNode<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Character(c) => write!(f, "{c}"),
            NodeKind::Concatenation { left, right } => write!(f, "{left}{right}"),
            NodeKind::Fraction {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
            NodeKind::SuperSubscript {
                base,
                superscript,
                subscript,
            } => {
                write!(f, "{base}")?;
                if let Some(sup) = superscript {
                    write!(f, "^{sup}")?;
                }
                if let Some(sub) = subscript {
                    write!(f, "_{sub}")?;
                }
                Ok(())
            }
            NodeKind::Parenthesized(child) => write!(f, "({child})"),
        }
    }
}
