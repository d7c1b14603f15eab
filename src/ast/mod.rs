/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser
///
/// Submodules:
/// - ast: The `Node` variant, its textual form and operator display names
pub mod ast;
