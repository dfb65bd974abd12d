//! ksploc - string localizer for Kerbal Space Program mods
//!
//! ksploc finds hard-coded display text in a mod's C# sources and part
//! `.cfg` files, replaces it with `#<prefix>_...` localization keys and
//! writes the matching `en-us` catalog.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and validation
//! - `core`: Scanner, classifiers, key registry, rewriters and the run pipeline
//! - `utils`: Shared text helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
