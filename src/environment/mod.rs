/// Environment module
/// Contains the type catalog, runtime values, named definitions and the
/// scope arena shared by the analyzer and the interpreter
///
/// Submodules:
/// - environment: Core environment definitions
pub mod environment;
