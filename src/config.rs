use crate::{
    source::{AssignedSymbol, RandomSymbol, SymbolSource},
    types::Symbol,
};

/// Configuration entry-point for instantiating rounds and loops.
///
/// A concrete `Config` binds a symbol type to the policy workers use to
/// choose symbols of that type.
pub trait Config: Sized + 'static {
    /// The symbol type targets and buffers are made of.
    type Symbol: Symbol;
    /// The policy each worker consults to produce its contribution.
    type Source: SymbolSource<Self>;
}

/// Character symbols where every worker emits the symbol of its own position.
#[derive(Debug, Clone, Copy)]
pub struct AssignedChars;

impl Config for AssignedChars {
    type Symbol = char;
    type Source = AssignedSymbol;
}

/// Character symbols drawn uniformly from the target's own characters.
#[derive(Debug, Clone, Copy)]
pub struct RandomChars;

impl Config for RandomChars {
    type Symbol = char;
    type Source = RandomSymbol;
}
