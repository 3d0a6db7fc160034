//! Built-in upstream handlers served behind the guard.

pub mod echo;
