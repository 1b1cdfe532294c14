// lambdatron-reader - Reader pipeline and value model for Lambdatron

//! # lambdatron-reader
//!
//! Reader pipeline (lexer, parser, reader-macro expander) and value model
//! for the Lambdatron programming language. Produces evaluator-ready
//! [`Value`] trees from source text.

pub mod error;
pub mod expand;
pub mod intern;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod symbol;
pub mod value;

pub use error::{ReadError, ReadErrorKind};
pub use expand::{CORE_NS, NsResolver, expand};
pub use im::{HashMap, Vector};
pub use intern::{InternStore, InternedStr};
pub use keyword::Keyword;
pub use lexer::{Lexer, Token};
pub use parser::{Parser, read, read_all};
pub use symbol::Symbol;
pub use value::{Closure, FnArity, HostFn, Seq, SeqView, SpecialTag, Value, Var, VarSlot};
