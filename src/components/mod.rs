//! The components module contains all shared components for our app.

mod app;
mod audio_manager;
mod episode_list;
mod icons;
mod player;

pub use app::*;
pub use audio_manager::*;
pub use episode_list::*;
pub use icons::*;
pub use player::*;
