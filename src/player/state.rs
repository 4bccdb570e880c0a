use crate::api::Episode;
use rand::RngCore;

/// A single mutation of the player state.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlayerAction {
    Play(Episode),
    PlayList { list: Vec<Episode>, index: usize },
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    SetPlayingState(bool),
    PlayNext,
    PlayPrevious,
    Clear,
}

impl PlayerAction {
    /// Short name for log lines; the payload can be a whole queue.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            PlayerAction::Play(_) => "play",
            PlayerAction::PlayList { .. } => "play_list",
            PlayerAction::TogglePlay => "toggle_play",
            PlayerAction::ToggleLoop => "toggle_loop",
            PlayerAction::ToggleShuffle => "toggle_shuffle",
            PlayerAction::SetPlayingState(_) => "set_playing_state",
            PlayerAction::PlayNext => "play_next",
            PlayerAction::PlayPrevious => "play_previous",
            PlayerAction::Clear => "clear",
        }
    }
}

/// Everything the player UI needs to render the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    pub(crate) episode_list: Vec<Episode>,
    pub(crate) current_episode_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) is_looping: bool,
    pub(crate) is_shuffling: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    pub fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_episode_index + 1 < self.episode_list.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    /// Applies `action` in place and reports whether any field changed.
    ///
    /// `rng` is only drawn from by `PlayNext` while shuffling. A `PlayList`
    /// whose index is outside its list changes nothing.
    pub(crate) fn apply(&mut self, action: PlayerAction, rng: &mut dyn RngCore) -> bool {
        match action {
            PlayerAction::Play(episode) => {
                self.episode_list = vec![episode];
                self.current_episode_index = 0;
                self.is_playing = true;
                true
            }
            PlayerAction::PlayList { list, index } => {
                if index >= list.len() {
                    return false;
                }
                self.episode_list = list;
                self.current_episode_index = index;
                self.is_playing = true;
                true
            }
            PlayerAction::TogglePlay => {
                self.is_playing = !self.is_playing;
                true
            }
            PlayerAction::ToggleLoop => {
                self.is_looping = !self.is_looping;
                true
            }
            PlayerAction::ToggleShuffle => {
                self.is_shuffling = !self.is_shuffling;
                true
            }
            PlayerAction::SetPlayingState(state) => {
                let changed = self.is_playing != state;
                self.is_playing = state;
                changed
            }
            PlayerAction::PlayNext => {
                if self.is_shuffling {
                    if self.episode_list.is_empty() {
                        return false;
                    }
                    let next = random_index(rng, self.episode_list.len());
                    let changed = next != self.current_episode_index;
                    self.current_episode_index = next;
                    changed
                } else if self.has_next() {
                    self.current_episode_index += 1;
                    true
                } else {
                    false
                }
            }
            PlayerAction::PlayPrevious => {
                if self.has_previous() {
                    self.current_episode_index -= 1;
                    true
                } else {
                    false
                }
            }
            PlayerAction::Clear => {
                let changed = !self.episode_list.is_empty() || self.current_episode_index != 0;
                self.episode_list.clear();
                self.current_episode_index = 0;
                changed
            }
        }
    }
}

fn random_index(mut rng: &mut dyn RngCore, len: usize) -> usize {
    rand::Rng::gen_range(&mut rng, 0..len)
}
