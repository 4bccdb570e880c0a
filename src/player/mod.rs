//! Playback selection and transport state shared by the player UI.
//!
//! Nothing in here touches audio. The `<audio>` element reads the current
//! episode and `is_playing` from the store and reports back through
//! [`MediaEvent`].

mod error;
mod state;
mod store;

pub use error::PlayerError;
pub(crate) use state::PlayerAction;
pub use state::PlayerState;
pub use store::{MediaEvent, PlayerStore, Subscription, SubscriptionId};
