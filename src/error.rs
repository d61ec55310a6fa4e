//! Errors raised while running a snap session

use thiserror::Error;

/// Errors that end a snap session.
///
/// None of these touch the scene: the session is closed and the message is
/// shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapError {
    /// Nothing under the selection has a collider
    #[error("No colliders found on the selection")]
    NoCollidableGeometry,

    /// The direction dropdown produced an index outside the six axes
    #[error("Unrecognized snap direction (index {index})")]
    InvalidDirectionIndex {
        /// The rejected index
        index: usize,
    },

    /// The session already snapped or was cancelled
    #[error("Snap session is already closed")]
    SessionClosed,
}
