#![doc = include_str!("../README.md")]

mod code;
mod collate;
mod directory;
mod error;
mod model;
mod pipeline;
mod prefix;
mod sleep;
mod store;

pub use crate::code::*;
pub use crate::collate::*;
pub use crate::directory::*;
pub use crate::error::*;
pub use crate::model::*;
pub use crate::pipeline::*;
pub use crate::prefix::*;
pub use crate::sleep::*;
pub use crate::store::*;
