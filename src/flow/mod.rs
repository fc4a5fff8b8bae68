pub mod block;
pub mod import;
pub mod sample;
pub mod validate;

pub use block::*;
pub use import::*;
pub use sample::*;
pub use validate::*;
