pub use cgmath;
pub use cgmath::{InnerSpace, MetricSpace, Zero};
pub use float_cmp::ApproxEq;
pub use itertools::Itertools;
pub use num_traits::clamp;

pub use logging;
pub use logging::prelude::*;
pub use logging::prelude::{
    my_crit as crit, my_debug as debug, my_error as error, my_info as info, my_trace as trace,
    my_warn as warn,
};

pub use lazy_static::lazy_static;
pub use parking_lot;
pub use smallvec::SmallVec;
pub use thiserror::{self, Error};

pub use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

pub type F = f32;
pub type Vector2 = cgmath::Vector2<F>;

pub type BoxedResult<T> = Result<T, Box<dyn std::error::Error>>;

pub mod input;
pub mod panic;
