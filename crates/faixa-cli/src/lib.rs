//! Library side of the `faixa` command-line tool.

pub mod blocks;
pub mod logging;
