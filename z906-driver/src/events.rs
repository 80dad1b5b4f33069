//! Change-event detection for the satellite channels.
//!
//! The dispatcher diffs successive confirmed volume snapshots and fires
//! the per-channel hooks for the three externally observable channels
//! (rear, center, sub). Optimistic values never reach the diff: only
//! levels carried by authoritative status frames are compared, so a
//! confirmed-but-unchanged command fires nothing.

use z906_protocol::{Channel, Status, CHANNELS};

use crate::traits::VolumeHooks;

/// Immutable copy of the four channel levels from one status frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSnapshot {
    levels: [u8; 4],
}

impl ChannelSnapshot {
    /// Capture the levels of a status frame
    pub fn from_status(status: &Status) -> Self {
        let mut levels = [0u8; 4];
        for (slot, channel) in CHANNELS.iter().enumerate() {
            levels[slot] = status.level(*channel);
        }
        Self { levels }
    }

    /// Level of a channel in this snapshot
    pub fn level(&self, channel: Channel) -> u8 {
        let slot = match channel {
            Channel::Main => 0,
            Channel::Rear => 1,
            Channel::Center => 2,
            Channel::Sub => 3,
        };
        self.levels[slot]
    }
}

/// Fires volume hooks when a satellite channel's confirmed level changes
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    prev: Option<ChannelSnapshot>,
}

impl Dispatcher {
    /// Dispatcher with no prior snapshot; the first frame only primes it
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a first snapshot exists to diff against
    pub fn primed(&self) -> bool {
        self.prev.is_some()
    }

    /// Diff a new status against the previous snapshot and fire hooks.
    ///
    /// Each differing satellite channel fires exactly once with its new
    /// level. The very first frame fires nothing. Callbacks run
    /// synchronously in the caller's tick.
    pub fn dispatch<H: VolumeHooks>(&mut self, status: &Status, hooks: &mut H) {
        let next = ChannelSnapshot::from_status(status);

        if let Some(prev) = self.prev {
            if prev.level(Channel::Rear) != next.level(Channel::Rear) {
                hooks.on_rear_changed(next.level(Channel::Rear));
            }
            if prev.level(Channel::Center) != next.level(Channel::Center) {
                hooks.on_center_changed(next.level(Channel::Center));
            }
            if prev.level(Channel::Sub) != next.level(Channel::Sub) {
                hooks.on_sub_changed(next.level(Channel::Sub));
            }
        }

        self.prev = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use z906_protocol::{Effect, Input};

    #[derive(Default)]
    struct CountingHooks {
        rear: heapless::Vec<u8, 8>,
        center: heapless::Vec<u8, 8>,
        sub: heapless::Vec<u8, 8>,
    }

    impl VolumeHooks for CountingHooks {
        fn on_rear_changed(&mut self, level: u8) {
            self.rear.push(level).unwrap();
        }
        fn on_center_changed(&mut self, level: u8) {
            self.center.push(level).unwrap();
        }
        fn on_sub_changed(&mut self, level: u8) {
            self.sub.push(level).unwrap();
        }
    }

    fn status(rear: u8, center: u8, sub: u8) -> Status {
        Status {
            main: 20,
            rear,
            center,
            sub,
            input: Input::Rca,
            effect: Effect::None,
            muted: false,
            power_on: true,
            version: [0, 0, 0],
        }
    }

    #[test]
    fn test_first_frame_fires_nothing() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        assert!(!dispatcher.primed());
        dispatcher.dispatch(&status(10, 10, 10), &mut hooks);

        assert!(dispatcher.primed());
        assert!(hooks.rear.is_empty());
        assert!(hooks.center.is_empty());
        assert!(hooks.sub.is_empty());
    }

    #[test]
    fn test_single_channel_change_fires_once() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        dispatcher.dispatch(&status(10, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(12, 10, 10), &mut hooks);

        assert_eq!(hooks.rear.as_slice(), &[12]);
        assert!(hooks.center.is_empty());
        assert!(hooks.sub.is_empty());
    }

    #[test]
    fn test_identical_frame_fires_nothing() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        dispatcher.dispatch(&status(10, 11, 12), &mut hooks);
        dispatcher.dispatch(&status(10, 11, 12), &mut hooks);
        dispatcher.dispatch(&status(10, 11, 12), &mut hooks);

        assert!(hooks.rear.is_empty());
        assert!(hooks.center.is_empty());
        assert!(hooks.sub.is_empty());
    }

    #[test]
    fn test_multiple_channels_fire_together() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        dispatcher.dispatch(&status(10, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(11, 12, 13), &mut hooks);

        assert_eq!(hooks.rear.as_slice(), &[11]);
        assert_eq!(hooks.center.as_slice(), &[12]);
        assert_eq!(hooks.sub.as_slice(), &[13]);
    }

    #[test]
    fn test_main_level_changes_are_not_dispatched() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        let mut a = status(10, 10, 10);
        dispatcher.dispatch(&a, &mut hooks);
        a.main = 30;
        dispatcher.dispatch(&a, &mut hooks);

        assert!(hooks.rear.is_empty());
        assert!(hooks.center.is_empty());
        assert!(hooks.sub.is_empty());
    }

    #[test]
    fn test_each_transition_fires() {
        let mut dispatcher = Dispatcher::new();
        let mut hooks = CountingHooks::default();

        dispatcher.dispatch(&status(10, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(11, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(12, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(12, 10, 10), &mut hooks);
        dispatcher.dispatch(&status(10, 10, 10), &mut hooks);

        assert_eq!(hooks.rear.as_slice(), &[11, 12, 10]);
    }
}
