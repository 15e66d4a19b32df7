pub mod query;
pub mod sample;

#[rustfmt::skip]
pub use self::{
    query::Query,
    sample::{IntoSamples, Sample},
};
pub(crate) use self::sample::push_positive;
