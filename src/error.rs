/*

    Declare errors raised while loading and building a scene.

    Geometric queries never fail, they report a miss instead.

    @date: Oct, 2025
    @author: bartu
*/

use thiserror::Error;

use crate::numeric::Float;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene file: {0}")]
    Json(#[from] serde_json::Error),

    // token is e.g. "t3", owner names the referencing object
    #[error("unknown transformation '{token}' referenced by {owner}")]
    UnknownTransform { token: String, owner: String },

    #[error("transformation {kind} #{id} expects {expected} values, got {got}")]
    TransformArity {
        kind: &'static str,
        id: usize,
        expected: usize,
        got: usize,
    },

    #[error("transformation '{0}' is singular")]
    SingularTransform(String),

    /// Plane interval with min >= max
    #[error("plane #{id} has an empty {name} interval [{min}, {max}]")]
    EmptyInterval {
        id: usize,
        name: &'static str,
        min: Float,
        max: Float,
    },

    #[error("box #{0} is degenerate")]
    DegenerateBox(usize),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;
