//! Text-to-record builders for the Slurm command line tools.

pub mod aggregate;
pub mod builder;
pub mod classifier;
pub mod gres;
pub mod join;
pub mod primitive;

pub mod prelude {
    #[rustfmt::skip]
    pub use super::{
        builder::*,
        gres::GresDialect,
    };
}
