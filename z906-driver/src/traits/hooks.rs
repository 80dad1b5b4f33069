//! Volume-change callback sink
//!
//! The host registers interest in the three satellite channels by
//! injecting an implementation at driver construction; there is no
//! runtime registration mechanism.

/// Callbacks fired when a satellite channel's confirmed level changes.
///
/// Invoked synchronously from [`crate::Z906Driver::poll`], in the same
/// tick that processed the status frame; implementations must not block.
pub trait VolumeHooks {
    /// Rear pair level changed
    fn on_rear_changed(&mut self, level: u8);
    /// Center level changed
    fn on_center_changed(&mut self, level: u8);
    /// Subwoofer level changed
    fn on_sub_changed(&mut self, level: u8);
}

/// Hook sink that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHooks;

impl VolumeHooks for NullHooks {
    fn on_rear_changed(&mut self, _level: u8) {}
    fn on_center_changed(&mut self, _level: u8) {}
    fn on_sub_changed(&mut self, _level: u8) {}
}

/// Adapter building a [`VolumeHooks`] from three closures
pub struct FnHooks<R, C, S> {
    /// Rear callback
    pub rear: R,
    /// Center callback
    pub center: C,
    /// Subwoofer callback
    pub sub: S,
}

impl<R, C, S> VolumeHooks for FnHooks<R, C, S>
where
    R: FnMut(u8),
    C: FnMut(u8),
    S: FnMut(u8),
{
    fn on_rear_changed(&mut self, level: u8) {
        (self.rear)(level)
    }

    fn on_center_changed(&mut self, level: u8) {
        (self.center)(level)
    }

    fn on_sub_changed(&mut self, level: u8) {
        (self.sub)(level)
    }
}
