pub mod cursor;
pub mod lexer;
pub mod parser;

pub use cursor::TokenCursor;
pub use lexer::{tokenize, Lexer};
pub use parser::{ParseReport, Parser};
pub use ucalc_ast::{Token, TokenKind};
