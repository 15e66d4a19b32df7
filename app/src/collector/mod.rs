mod context;
mod registry;

#[rustfmt::skip]
pub use self::{
    context::CollectContext,
    registry::{CollectorDescriptor, Registry},
};
