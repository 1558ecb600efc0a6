use common::*;

use crate::body::{PointHandle, StickHandle};

#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("Point {point:?} is not an endpoint of stick {stick:?}")]
    NotAnEndpoint {
        stick: StickHandle,
        point: PointHandle,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum CarError {
    #[error("Reference edge must be a chassis stick index below {max}, not {index}")]
    BadReferenceEdge { index: usize, max: usize },
}
