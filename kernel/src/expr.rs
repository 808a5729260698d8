//! Expression trees in an index-addressed arena.
//!
//! Expressions are a closed tagged-variant type processed by exhaustive
//! matching, so an unsupported shape is an explicit error path, never a
//! runtime type probe. Nodes live in an arena and address each other by
//! stable [`ExprId`] indices; rewrites splice children in place and may
//! leave orphaned nodes behind (the arena is working storage, not a
//! canonical serialization).

/// Stable index of a node within an [`ExprArena`].
pub type ExprId = usize;

/// An argument position in a lifted atom: either a schema/quantifier
/// variable or a concrete object name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// Unbound variable, resolved during grounding.
    Variable(String),
    /// Concrete object name.
    Object(String),
}

/// A lifted atomic formula: predicate applied to terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub predicate: String,
    pub terms: Vec<Term>,
}

impl Atom {
    /// Build an atom over concrete objects only.
    #[must_use]
    pub fn ground(predicate: impl Into<String>, objects: &[&str]) -> Self {
        Self {
            predicate: predicate.into(),
            terms: objects.iter().map(|o| Term::Object((*o).into())).collect(),
        }
    }

    /// Whether every term is a concrete object.
    #[must_use]
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(|t| matches!(t, Term::Object(_)))
    }
}

/// A typed schema parameter or quantified variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// The closed set of expression node kinds.
///
/// After normalization the translator only accepts `TriviallyTrue`, `Atom`,
/// `Not`, and `And`; the remaining kinds exist so front-end input can be
/// normalized (or rejected) explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// Contributes nothing; the identity of conjunction.
    TriviallyTrue,
    /// An atomic predicate application.
    Atom(Atom),
    /// Negation of a subtree.
    Not(ExprId),
    /// Conjunction of subtrees.
    And(Vec<ExprId>),
    /// Disjunction of subtrees (unsupported post-normalization).
    Or(Vec<ExprId>),
    /// Implication (expanded away by normalization).
    Imply(ExprId, ExprId),
    /// Existential quantification (unsupported post-normalization).
    Exists { variable: Parameter, body: ExprId },
    /// Universal quantification (eliminated by the deconstructor).
    Forall { variable: Parameter, body: ExprId },
}

/// One arena slot: a node kind plus a back-link to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExprNode {
    kind: ExprKind,
    parent: Option<ExprId>,
}

/// A child-replacement failure during an in-place splice.
///
/// Both variants indicate a structurally invalid tree (stale parent links or
/// a parent kind with no child slots), not a recoverable runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceError {
    /// The parent node kind cannot hold children.
    NoChildSlot,
    /// The parent exists but none of its child slots reference the old node.
    ChildNotFound,
}

/// An expression tree stored as an arena of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
    root: ExprId,
}

impl ExprArena {
    /// An arena whose root is a single `TriviallyTrue` node.
    #[must_use]
    pub fn truth() -> Self {
        Self {
            nodes: vec![ExprNode {
                kind: ExprKind::TriviallyTrue,
                parent: None,
            }],
            root: 0,
        }
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> ExprId {
        self.root
    }

    /// Re-root the arena at an existing node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range (construction bug, not input data).
    pub fn set_root(&mut self, id: ExprId) {
        assert!(id < self.nodes.len(), "set_root out of range");
        self.nodes[id].parent = None;
        self.root = id;
    }

    /// The kind of node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.nodes[id].kind
    }

    /// The parent of node `id` (`None` for the root or orphans).
    #[must_use]
    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    fn alloc(&mut self, kind: ExprKind) -> ExprId {
        let id = self.nodes.len();
        self.nodes.push(ExprNode { kind, parent: None });
        id
    }

    fn link(&mut self, child: ExprId, parent: ExprId) {
        self.nodes[child].parent = Some(parent);
    }

    /// Allocate a `TriviallyTrue` node.
    pub fn truth_node(&mut self) -> ExprId {
        self.alloc(ExprKind::TriviallyTrue)
    }

    /// Allocate an atom node.
    pub fn atom(&mut self, atom: Atom) -> ExprId {
        self.alloc(ExprKind::Atom(atom))
    }

    /// Allocate a negation over `child`.
    pub fn not(&mut self, child: ExprId) -> ExprId {
        let id = self.alloc(ExprKind::Not(child));
        self.link(child, id);
        id
    }

    /// Allocate a conjunction over `children`.
    pub fn and(&mut self, children: Vec<ExprId>) -> ExprId {
        let id = self.alloc(ExprKind::And(children.clone()));
        for c in children {
            self.link(c, id);
        }
        id
    }

    /// Allocate a disjunction over `children`.
    pub fn or(&mut self, children: Vec<ExprId>) -> ExprId {
        let id = self.alloc(ExprKind::Or(children.clone()));
        for c in children {
            self.link(c, id);
        }
        id
    }

    /// Allocate an implication `antecedent → consequent`.
    pub fn imply(&mut self, antecedent: ExprId, consequent: ExprId) -> ExprId {
        let id = self.alloc(ExprKind::Imply(antecedent, consequent));
        self.link(antecedent, id);
        self.link(consequent, id);
        id
    }

    /// Allocate a universal quantifier over `body`.
    pub fn forall(&mut self, variable: Parameter, body: ExprId) -> ExprId {
        let id = self.alloc(ExprKind::Forall { variable, body });
        self.link(body, id);
        id
    }

    /// Allocate an existential quantifier over `body`.
    pub fn exists(&mut self, variable: Parameter, body: ExprId) -> ExprId {
        let id = self.alloc(ExprKind::Exists { variable, body });
        self.link(body, id);
        id
    }

    /// Depth-first search from the root for the first remaining `Forall`.
    #[must_use]
    pub fn find_forall(&self) -> Option<ExprId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match &self.nodes[id].kind {
                ExprKind::Forall { .. } => return Some(id),
                ExprKind::TriviallyTrue | ExprKind::Atom(_) => {}
                ExprKind::Not(c) => stack.push(*c),
                ExprKind::And(cs) | ExprKind::Or(cs) => stack.extend(cs.iter().copied()),
                ExprKind::Imply(a, b) => {
                    stack.push(*a);
                    stack.push(*b);
                }
                ExprKind::Exists { body, .. } => stack.push(*body),
            }
        }
        None
    }

    /// Replace `old` with `new` in `parent`'s child slots (or re-root when
    /// `parent` is `None`). The old subtree becomes an orphan.
    ///
    /// # Errors
    ///
    /// [`SpliceError`] when the parent has no child slots or no slot
    /// references `old` -- both mean the tree structure is invalid.
    pub fn replace_child(
        &mut self,
        parent: Option<ExprId>,
        old: ExprId,
        new: ExprId,
    ) -> Result<(), SpliceError> {
        let Some(parent) = parent else {
            self.set_root(new);
            return Ok(());
        };
        let found = match &mut self.nodes[parent].kind {
            ExprKind::TriviallyTrue | ExprKind::Atom(_) => return Err(SpliceError::NoChildSlot),
            ExprKind::Not(c) => {
                if *c == old {
                    *c = new;
                    true
                } else {
                    false
                }
            }
            ExprKind::And(cs) | ExprKind::Or(cs) => {
                let mut hit = false;
                for c in cs.iter_mut() {
                    if *c == old {
                        *c = new;
                        hit = true;
                    }
                }
                hit
            }
            ExprKind::Imply(a, b) => {
                let mut hit = false;
                if *a == old {
                    *a = new;
                    hit = true;
                }
                if *b == old {
                    *b = new;
                    hit = true;
                }
                hit
            }
            ExprKind::Exists { body, .. } | ExprKind::Forall { body, .. } => {
                if *body == old {
                    *body = new;
                    true
                } else {
                    false
                }
            }
        };
        if !found {
            return Err(SpliceError::ChildNotFound);
        }
        self.link(new, parent);
        self.nodes[old].parent = None;
        Ok(())
    }

    /// Deep-copy the subtree at `subtree` into this arena, substituting the
    /// variable `var` with the object `object` in every atom. An inner
    /// quantifier binding the same variable name shadows the substitution
    /// below it.
    ///
    /// The copy's root is returned unlinked (parent `None`); callers splice
    /// it wherever it belongs.
    pub fn instantiate(&mut self, subtree: ExprId, var: &str, object: &str) -> ExprId {
        self.instantiate_inner(subtree, var, object, true)
    }

    fn instantiate_inner(
        &mut self,
        id: ExprId,
        var: &str,
        object: &str,
        active: bool,
    ) -> ExprId {
        let kind = self.nodes[id].kind.clone();
        match kind {
            ExprKind::TriviallyTrue => self.truth_node(),
            ExprKind::Atom(mut atom) => {
                if active {
                    for term in &mut atom.terms {
                        if matches!(term, Term::Variable(v) if v == var) {
                            *term = Term::Object(object.to_string());
                        }
                    }
                }
                self.atom(atom)
            }
            ExprKind::Not(c) => {
                let c = self.instantiate_inner(c, var, object, active);
                self.not(c)
            }
            ExprKind::And(cs) => {
                let cs = cs
                    .into_iter()
                    .map(|c| self.instantiate_inner(c, var, object, active))
                    .collect();
                self.and(cs)
            }
            ExprKind::Or(cs) => {
                let cs = cs
                    .into_iter()
                    .map(|c| self.instantiate_inner(c, var, object, active))
                    .collect();
                self.or(cs)
            }
            ExprKind::Imply(a, b) => {
                let a = self.instantiate_inner(a, var, object, active);
                let b = self.instantiate_inner(b, var, object, active);
                self.imply(a, b)
            }
            ExprKind::Exists { variable, body } => {
                let inner_active = active && variable.name != var;
                let body = self.instantiate_inner(body, var, object, inner_active);
                self.exists(variable, body)
            }
            ExprKind::Forall { variable, body } => {
                let inner_active = active && variable.name != var;
                let body = self.instantiate_inner(body, var, object, inner_active);
                self.forall(variable, body)
            }
        }
    }

    /// Rebuild the whole tree with every binding `(variable, object)`
    /// applied at once, into a fresh arena. Used by schema grounding.
    #[must_use]
    pub fn substituted(&self, bindings: &[(String, String)]) -> ExprArena {
        let mut out = ExprArena::truth();
        let root = Self::substituted_inner(self, self.root, bindings, &mut out);
        out.set_root(root);
        out
    }

    fn substituted_inner(
        arena: &ExprArena,
        id: ExprId,
        bindings: &[(String, String)],
        out: &mut ExprArena,
    ) -> ExprId {
        match &arena.nodes[id].kind {
            ExprKind::TriviallyTrue => out.truth_node(),
            ExprKind::Atom(atom) => {
                let mut atom = atom.clone();
                for term in &mut atom.terms {
                    if let Term::Variable(v) = term {
                        if let Some((_, object)) = bindings.iter().find(|(var, _)| var == v) {
                            *term = Term::Object(object.clone());
                        }
                    }
                }
                out.atom(atom)
            }
            ExprKind::Not(c) => {
                let c = Self::substituted_inner(arena, *c, bindings, out);
                out.not(c)
            }
            ExprKind::And(cs) => {
                let cs = cs
                    .iter()
                    .map(|c| Self::substituted_inner(arena, *c, bindings, out))
                    .collect();
                out.and(cs)
            }
            ExprKind::Or(cs) => {
                let cs = cs
                    .iter()
                    .map(|c| Self::substituted_inner(arena, *c, bindings, out))
                    .collect();
                out.or(cs)
            }
            ExprKind::Imply(a, b) => {
                let a = Self::substituted_inner(arena, *a, bindings, out);
                let b = Self::substituted_inner(arena, *b, bindings, out);
                out.imply(a, b)
            }
            ExprKind::Exists { variable, body } => {
                // Shadowed bindings are dropped below the quantifier.
                let inner: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|(var, _)| *var != variable.name)
                    .cloned()
                    .collect();
                let body = Self::substituted_inner(arena, *body, &inner, out);
                out.exists(variable.clone(), body)
            }
            ExprKind::Forall { variable, body } => {
                let inner: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|(var, _)| *var != variable.name)
                    .cloned()
                    .collect();
                let body = Self::substituted_inner(arena, *body, &inner, out);
                out.forall(variable.clone(), body)
            }
        }
    }

    /// Rewrite into negation-normal conjunctive shape: implications
    /// expanded, negations pushed to the leaves (De Morgan, quantifier
    /// duality, double-negation elimination), conjunctions flattened, and
    /// trivially-true conjuncts dropped.
    ///
    /// Normalization does not eliminate quantifiers or disjunctions; a
    /// disjunction surviving into extraction is reported there as an
    /// unsupported expression.
    #[must_use]
    pub fn normalized(&self) -> ExprArena {
        let mut out = ExprArena::truth();
        let root = self.normalize_inner(self.root, false, &mut out);
        out.set_root(root);
        out
    }

    fn normalize_inner(&self, id: ExprId, negated: bool, out: &mut ExprArena) -> ExprId {
        match &self.nodes[id].kind {
            ExprKind::TriviallyTrue => {
                let t = out.truth_node();
                if negated {
                    out.not(t)
                } else {
                    t
                }
            }
            ExprKind::Atom(atom) => {
                let a = out.atom(atom.clone());
                if negated {
                    out.not(a)
                } else {
                    a
                }
            }
            ExprKind::Not(c) => self.normalize_inner(*c, !negated, out),
            ExprKind::And(cs) => {
                if negated {
                    // ¬(a ∧ b) ≡ ¬a ∨ ¬b
                    let children = cs
                        .iter()
                        .map(|c| self.normalize_inner(*c, true, out))
                        .collect();
                    out.or(children)
                } else {
                    let mut conjuncts = Vec::new();
                    for c in cs {
                        let n = self.normalize_inner(*c, false, out);
                        Self::push_conjunct(out, n, &mut conjuncts);
                    }
                    Self::seal_conjunction(out, conjuncts)
                }
            }
            ExprKind::Or(cs) => {
                if negated {
                    // ¬(a ∨ b) ≡ ¬a ∧ ¬b
                    let mut conjuncts = Vec::new();
                    for c in cs {
                        let n = self.normalize_inner(*c, true, out);
                        Self::push_conjunct(out, n, &mut conjuncts);
                    }
                    Self::seal_conjunction(out, conjuncts)
                } else {
                    let children = cs
                        .iter()
                        .map(|c| self.normalize_inner(*c, false, out))
                        .collect();
                    out.or(children)
                }
            }
            ExprKind::Imply(a, b) => {
                if negated {
                    // ¬(a → b) ≡ a ∧ ¬b
                    let mut conjuncts = Vec::new();
                    let na = self.normalize_inner(*a, false, out);
                    Self::push_conjunct(out, na, &mut conjuncts);
                    let nb = self.normalize_inner(*b, true, out);
                    Self::push_conjunct(out, nb, &mut conjuncts);
                    Self::seal_conjunction(out, conjuncts)
                } else {
                    // a → b ≡ ¬a ∨ b
                    let na = self.normalize_inner(*a, true, out);
                    let nb = self.normalize_inner(*b, false, out);
                    out.or(vec![na, nb])
                }
            }
            ExprKind::Exists { variable, body } => {
                let body = self.normalize_inner(*body, negated, out);
                if negated {
                    out.forall(variable.clone(), body)
                } else {
                    out.exists(variable.clone(), body)
                }
            }
            ExprKind::Forall { variable, body } => {
                let body = self.normalize_inner(*body, negated, out);
                if negated {
                    out.exists(variable.clone(), body)
                } else {
                    out.forall(variable.clone(), body)
                }
            }
        }
    }

    /// Append a normalized child to a conjunct list, splicing nested
    /// conjunctions flat and dropping trivially-true children.
    fn push_conjunct(out: &mut ExprArena, id: ExprId, conjuncts: &mut Vec<ExprId>) {
        match out.nodes[id].kind.clone() {
            ExprKind::TriviallyTrue => {}
            ExprKind::And(cs) => {
                for c in cs {
                    Self::push_conjunct(out, c, conjuncts);
                }
            }
            _ => conjuncts.push(id),
        }
    }

    fn seal_conjunction(out: &mut ExprArena, conjuncts: Vec<ExprId>) -> ExprId {
        match conjuncts.len() {
            0 => out.truth_node(),
            1 => conjuncts[0],
            _ => out.and(conjuncts),
        }
    }
}
