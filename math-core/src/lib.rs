pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod repl;
pub mod utils;
