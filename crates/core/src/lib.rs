pub mod ast;
pub mod interner;
pub mod token;

pub use interner::{intern, Symbol};
pub use token::*;
