//! The `utils` module collects small helpers shared by the library and the
//! demo binary.

pub mod logging;
