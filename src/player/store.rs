use super::{PlayerAction, PlayerError, PlayerState};
use crate::api::Episode;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

type Listener = Rc<dyn Fn(&PlayerState)>;

/// Playback signals reported by the `<audio>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Started,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct ListenerEntry {
    id: SubscriptionId,
    /// Cleared by the owning [`Subscription`] even when the store is borrowed.
    active: Rc<Cell<bool>>,
    listener: Listener,
}

struct StoreInner {
    state: PlayerState,
    rng: Box<dyn RngCore>,
    listeners: Vec<ListenerEntry>,
    next_id: u64,
}

/// Shared handle to the single player state of a session.
///
/// Clones point at the same state. The handle is `!Send`, so the store stays on
/// the UI thread that created it.
#[derive(Clone)]
pub struct PlayerStore(Rc<RefCell<StoreInner>>);

impl fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => f
                .debug_struct("PlayerStore")
                .field("state", &inner.state)
                .field("listeners", &inner.listeners.len())
                .finish(),
            Err(_) => write!(f, "PlayerStore"),
        }
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        PlayerStore::new()
    }
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a store whose shuffle draws from `rng`.
    pub fn with_rng(rng: impl RngCore + 'static) -> Self {
        PlayerStore(Rc::new(RefCell::new(StoreInner {
            state: PlayerState::new(),
            rng: Box::new(rng),
            listeners: Vec::new(),
            next_id: 0,
        })))
    }

    pub fn snapshot(&self) -> PlayerState {
        self.0.borrow().state.clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&PlayerState) -> R) -> R {
        f(&self.0.borrow().state)
    }

    /// Registers `listener` to run after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or passed to [`PlayerStore::unsubscribe`].
    pub fn subscribe(&self, listener: impl Fn(&PlayerState) + 'static) -> Subscription {
        let mut inner = self.0.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        let active = Rc::new(Cell::new(true));
        inner.listeners.push(ListenerEntry {
            id,
            active: Rc::clone(&active),
            listener: Rc::new(listener),
        });

        Subscription {
            id,
            active,
            store: Rc::downgrade(&self.0),
        }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.0.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|entry| {
            if entry.id == id {
                entry.active.set(false);
            }
            entry.active.get()
        });
        inner.listeners.len() != before
    }

    /// Replaces the queue with `episode` alone and starts playing it.
    pub fn play(&self, episode: Episode) {
        info!(episode = episode.id(), "playing single episode");
        self.dispatch(PlayerAction::Play(episode));
    }

    /// Replaces the queue with `list` and starts playing `list[index]`.
    ///
    /// An index outside the list is rejected and the store is left untouched.
    pub fn play_list(&self, list: Vec<Episode>, index: usize) -> Result<(), PlayerError> {
        if index >= list.len() {
            let err = PlayerError::IndexOutOfRange {
                index,
                len: list.len(),
            };
            warn!("rejected queue: {err}");
            return Err(err);
        }

        info!(len = list.len(), index, "replacing queue");
        self.dispatch(PlayerAction::PlayList { list, index });
        Ok(())
    }

    pub fn toggle_play(&self) {
        self.dispatch(PlayerAction::TogglePlay);
    }

    pub fn toggle_loop(&self) {
        self.dispatch(PlayerAction::ToggleLoop);
    }

    pub fn toggle_shuffle(&self) {
        self.dispatch(PlayerAction::ToggleShuffle);
    }

    pub fn set_playing_state(&self, state: bool) {
        self.dispatch(PlayerAction::SetPlayingState(state));
    }

    /// Moves to a random episode while shuffling, otherwise to the next one.
    ///
    /// Looping is left to the media element.
    pub fn play_next(&self) {
        self.dispatch(PlayerAction::PlayNext);
    }

    pub fn play_previous(&self) {
        self.dispatch(PlayerAction::PlayPrevious);
    }

    pub fn clear_player_state(&self) {
        self.dispatch(PlayerAction::Clear);
    }

    pub fn handle_media_event(&self, event: MediaEvent) {
        match event {
            MediaEvent::Started => self.set_playing_state(true),
            MediaEvent::Paused => self.set_playing_state(false),
            MediaEvent::Ended => {
                if self.with_state(PlayerState::has_next) {
                    self.play_next();
                } else {
                    self.clear_player_state();
                }
            }
        }
    }

    /// Applies `action` and publishes the new state if anything changed.
    fn dispatch(&self, action: PlayerAction) -> bool {
        let label = action.label();
        let (snapshot, listeners) = {
            let mut guard = self.0.borrow_mut();
            let inner = &mut *guard;
            if !inner.state.apply(action, inner.rng.as_mut()) {
                debug!(action = label, "no change");
                return false;
            }
            // Subscriptions dropped while the store was borrowed are swept here.
            inner.listeners.retain(|entry| entry.active.get());
            let listeners: Vec<(Rc<Cell<bool>>, Listener)> = inner
                .listeners
                .iter()
                .map(|entry| (Rc::clone(&entry.active), Rc::clone(&entry.listener)))
                .collect();
            (inner.state.clone(), listeners)
        };

        debug!(
            action = label,
            index = snapshot.current_episode_index(),
            playing = snapshot.is_playing(),
            "state changed"
        );
        // The borrow is released so listeners can read or mutate the store.
        for (active, listener) in listeners {
            if active.get() {
                listener(&snapshot);
            }
        }
        true
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.active.get())
            .count()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
pub struct Subscription {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    store: Weak<RefCell<StoreInner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription").field(&self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
        if let Some(store) = self.store.upgrade() {
            match store.try_borrow_mut() {
                Ok(mut inner) => inner.listeners.retain(|entry| entry.id != self.id),
                Err(_) => debug!(id = self.id.0, "store busy, listener removed on next change"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(i: usize) -> Episode {
        Episode::new(
            format!("ep-{i}"),
            format!("Episode {i}"),
            "Diego e Richard".to_string(),
            format!("https://cdn.example.com/{i}.jpg"),
            3600 + i as u32,
            format!("https://cdn.example.com/{i}.mp3"),
        )
    }

    fn episodes(count: usize) -> Vec<Episode> {
        (0..count).map(episode).collect()
    }

    fn store() -> PlayerStore {
        PlayerStore::with_rng(StdRng::seed_from_u64(42))
    }

    fn counter(store: &PlayerStore) -> (Rc<Cell<usize>>, Subscription) {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let sub = store.subscribe(move |_| seen.set(seen.get() + 1));
        (calls, sub)
    }

    #[test]
    fn toggles_track_parity() {
        let store = store();
        let mut plays = 0;
        let mut loops = 0;
        let mut shuffles = 0;

        for step in 0..37usize {
            match step % 5 {
                0 | 3 => {
                    store.toggle_play();
                    plays += 1;
                }
                1 => {
                    store.toggle_loop();
                    loops += 1;
                }
                _ => {
                    store.toggle_shuffle();
                    shuffles += 1;
                }
            }
            let state = store.snapshot();
            assert_eq!(state.is_playing(), plays % 2 == 1);
            assert_eq!(state.is_looping(), loops % 2 == 1);
            assert_eq!(state.is_shuffling(), shuffles % 2 == 1);
        }
    }

    #[test]
    fn play_replaces_queue_with_single_episode() {
        let store = store();
        store.play_list(episodes(4), 3).unwrap();
        store.toggle_play();
        store.toggle_shuffle();

        store.play(episode(9));

        let state = store.snapshot();
        assert_eq!(state.episode_list(), &[episode(9)]);
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
        assert!(state.is_shuffling());
    }

    #[test]
    fn play_list_from_the_middle() {
        let store = store();
        store.play_list(episodes(3), 1).unwrap();

        let state = store.snapshot();
        assert_eq!(state.current_episode_index(), 1);
        assert!(state.is_playing());
        assert!(state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn play_list_rejects_out_of_range_index() {
        let store = store();
        store.play_list(episodes(2), 1).unwrap();
        let (calls, _sub) = counter(&store);
        let before = store.snapshot();

        assert_eq!(
            store.play_list(episodes(3), 3),
            Err(PlayerError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            store.play_list(Vec::new(), 0),
            Err(PlayerError::IndexOutOfRange { index: 0, len: 0 })
        );

        assert_eq!(store.snapshot(), before);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn previous_at_start_is_a_noop() {
        let store = store();
        store.play_list(episodes(3), 0).unwrap();
        assert!(!store.snapshot().has_previous());

        store.play_previous();
        assert_eq!(store.snapshot().current_episode_index(), 0);
    }

    #[test]
    fn next_at_end_is_a_noop() {
        let store = store();
        store.play_list(episodes(3), 2).unwrap();
        assert!(!store.snapshot().has_next());

        store.play_next();
        assert_eq!(store.snapshot().current_episode_index(), 2);
    }

    #[test]
    fn sequential_navigation_walks_the_queue() {
        let store = store();
        store.play_list(episodes(3), 0).unwrap();

        store.play_next();
        store.play_next();
        assert_eq!(store.snapshot().current_episode_index(), 2);

        store.play_previous();
        assert_eq!(store.snapshot().current_episode_index(), 1);
    }

    #[test]
    fn looping_does_not_change_next() {
        let store = store();
        store.play_list(episodes(3), 0).unwrap();
        store.toggle_loop();

        store.play_next();
        assert_eq!(store.snapshot().current_episode_index(), 1);
    }

    #[test]
    fn shuffle_stays_in_bounds() {
        for len in 1..8 {
            let store = store();
            store.play_list(episodes(len), len - 1).unwrap();
            store.toggle_shuffle();

            for _ in 0..200 {
                store.play_next();
                let state = store.snapshot();
                assert!(state.current_episode_index() < len);
                assert!(state.has_next());
            }
        }
    }

    #[test]
    fn shuffle_visits_more_than_one_episode() {
        let store = store();
        store.play_list(episodes(5), 0).unwrap();
        store.toggle_shuffle();

        let mut seen = [false; 5];
        for _ in 0..200 {
            store.play_next();
            seen[store.snapshot().current_episode_index()] = true;
        }
        assert!(seen.iter().filter(|visited| **visited).count() > 1);
    }

    #[test]
    fn clear_keeps_flags() {
        let store = store();
        store.play_list(episodes(3), 2).unwrap();
        store.toggle_loop();
        store.toggle_shuffle();

        store.clear_player_state();

        let state = store.snapshot();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
        assert!(state.is_looping());
        assert!(state.is_shuffling());
    }

    #[test]
    fn set_playing_state_is_idempotent() {
        let store = store();
        let (calls, _sub) = counter(&store);

        store.set_playing_state(true);
        store.set_playing_state(true);

        assert!(store.snapshot().is_playing());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listeners_see_new_state_once_per_change() {
        let store = store();
        let last_index = Rc::new(Cell::new(usize::MAX));
        let seen = Rc::clone(&last_index);
        let _sub = store.subscribe(move |state| seen.set(state.current_episode_index()));
        let (calls, _count) = counter(&store);

        store.play_list(episodes(3), 1).unwrap();
        assert_eq!(last_index.get(), 1);
        store.play_next();
        assert_eq!(last_index.get(), 2);
        store.play_next();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let store = store();
        let (calls, sub) = counter(&store);
        assert_eq!(store.listener_count(), 1);

        store.toggle_loop();
        drop(sub);
        store.toggle_loop();

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn unsubscribe_by_id() {
        let store = store();
        let (calls, sub) = counter(&store);

        assert!(store.unsubscribe(sub.id()));
        assert!(!store.unsubscribe(sub.id()));
        store.toggle_play();

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn subscription_dropped_while_reading_state_is_silenced() {
        let store = store();
        let (calls, sub) = counter(&store);

        store.with_state(move |_| drop(sub));
        store.toggle_play();

        assert_eq!(calls.get(), 0);
        assert_eq!(store.listener_count(), 0);
        assert_eq!(store.0.borrow().listeners.len(), 0);
    }

    #[test]
    fn listener_dropping_another_subscription_silences_it() {
        let store = store();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let holder = Rc::clone(&slot);
        let _dropper = store.subscribe(move |_| {
            holder.borrow_mut().take();
        });
        let (calls, victim) = counter(&store);
        *slot.borrow_mut() = Some(victim);

        store.toggle_play();

        assert_eq!(calls.get(), 0);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn public_operations_keep_index_in_bounds() {
        let store = store();
        let check = |store: &PlayerStore| {
            let state = store.snapshot();
            let len = state.episode_list().len();
            if len == 0 {
                assert_eq!(state.current_episode_index(), 0);
                assert!(!state.has_previous());
            } else {
                assert!(state.current_episode_index() < len);
            }
        };

        assert!(store.play_list(Vec::new(), 5).is_err());
        check(&store);
        store.play_list(episodes(4), 3).unwrap();
        check(&store);
        assert!(store.play_list(episodes(3), 3).is_err());
        check(&store);
        assert_eq!(store.snapshot().episode_list().len(), 4);

        for step in 0..60usize {
            match step % 7 {
                0 => store.play_next(),
                1 => store.play_previous(),
                2 => store.toggle_shuffle(),
                3 => store.handle_media_event(MediaEvent::Ended),
                4 => {
                    let _ = store.play_list(episodes(step % 4), step % 5);
                }
                5 => store.play(episode(step)),
                _ => store.clear_player_state(),
            }
            check(&store);
        }
    }

    #[test]
    fn listener_may_call_back_into_store() {
        let store = store();
        let handle = store.clone();
        let _sub = store.subscribe(move |state| {
            if state.is_playing() && !state.is_looping() {
                handle.toggle_loop();
            }
        });

        store.play(episode(0));

        let state = store.snapshot();
        assert!(state.is_playing());
        assert!(state.is_looping());
    }

    #[test]
    fn media_events_map_to_operations() {
        let store = store();
        store.play_list(episodes(2), 0).unwrap();

        store.handle_media_event(MediaEvent::Paused);
        assert!(!store.snapshot().is_playing());
        store.handle_media_event(MediaEvent::Started);
        store.handle_media_event(MediaEvent::Started);
        assert!(store.snapshot().is_playing());

        store.handle_media_event(MediaEvent::Ended);
        assert_eq!(store.snapshot().current_episode_index(), 1);

        store.handle_media_event(MediaEvent::Ended);
        let state = store.snapshot();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
    }

    #[test]
    fn ended_while_shuffling_keeps_queue() {
        let store = store();
        store.play_list(episodes(3), 2).unwrap();
        store.toggle_shuffle();

        store.handle_media_event(MediaEvent::Ended);

        let state = store.snapshot();
        assert_eq!(state.episode_list().len(), 3);
        assert!(state.current_episode_index() < 3);
    }

    #[test]
    fn clones_share_state() {
        let store = store();
        let other = store.clone();

        other.play(episode(1));

        assert_eq!(store.snapshot().current_episode().map(Episode::id), Some("ep-1"));
    }
}
