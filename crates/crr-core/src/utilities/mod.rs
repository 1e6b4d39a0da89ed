//! Small helpers shared by the `Display` and `FromStr` impls of the
//! workspace.

/// Number formatting helpers.
pub mod data_formatters;

/// Tag normalisation for string parsing.
pub mod data_parsers;
