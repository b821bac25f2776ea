
pub mod builtin;
pub mod environment;

pub mod prelude {
    pub use super::{
        builtin::*,
        environment::*
    };
}
