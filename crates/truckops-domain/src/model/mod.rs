pub mod load;

pub use load::{Load, NewLoad, RateSample};
