mod assigner;
mod normalize;
mod overrides;

pub use assigner::*;
pub use normalize::*;
pub use overrides::*;
