use crate::Orientation;

/// Configuration errors. These are contract violations between the pager and its host and are
/// not recoverable; transient conditions (no items, over-scroll, zero flings) never produce one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The host attached a page that cannot draw itself without the flip transform.
    #[error("page {index} cannot draw itself raw; flipped pages must support raw drawing")]
    UnsupportedPage { index: usize },
    /// The host cannot scroll along the pager's axis.
    #[error("host cannot scroll {orientation:?}")]
    IncompatibleHost { orientation: Orientation },
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        name: &'static str,
        reason: &'static str,
    },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
