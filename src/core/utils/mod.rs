#[macro_use]
pub mod logging;
#[macro_use]
pub mod safety;
