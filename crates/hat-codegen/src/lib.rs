//! Hat code generator
//!
//! Turns a visual automation program (events, conditions, actions and
//! nested expressions) into source text for the Hat automation runtime.

pub mod error;
pub mod model;
pub mod order;
pub mod policy;
pub mod generator;
mod expression;
mod statement;
mod automation;
pub mod workspace;
pub mod validate;

pub use error::CodegenError;
pub use generator::{CodeGenerator, Emitted, GeneratorConfig};
pub use model::*;
pub use order::Order;
pub use policy::{Quoting, SlotType};
