pub mod error_assertions;
pub mod parser_fixtures;
