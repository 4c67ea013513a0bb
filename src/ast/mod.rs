/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root
/// - declarations: Function declarations, parameters and bodies
/// - expressions: Definitions for the expression variants
/// - types: Type annotations as written in source
pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod types;
