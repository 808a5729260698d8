//! The propositional data model: facts, ground operators, declarations.

pub mod declaration;
pub mod fact;
pub mod operator;

pub use declaration::{Declaration, DeclarationError};
pub use fact::{Fact, FactId, FactTable, NEGATION_PREFIX};
pub use operator::{Operator, OperatorId};
