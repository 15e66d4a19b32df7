mod collection_cycle;

pub mod prelude {
    #[rustfmt::skip]
    pub use super::collection_cycle::{CollectionCycle, CollectorFailure, CycleReport};
}
