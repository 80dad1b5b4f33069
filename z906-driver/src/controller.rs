//! Command sequencer and public driver surface.
//!
//! One command is in flight at a time: the protocol has no message IDs,
//! so overlapping requests could not be matched to responses. Each
//! command is written together with a GET_STATUS solicit; the next status
//! frame echoing the requested value acts as the acknowledgement. On
//! timeout the command is resent up to a fixed bound, then reported as
//! failed and the sequencer returns to idle.

use heapless::Vec;
use z906_protocol::{table, Channel, Command, Effect, Input, InvalidCommand, MAX_COMMAND_LEN};

use crate::events::Dispatcher;
use crate::link::{Link, LinkConfig, LinkStats};
use crate::state::DeviceState;
use crate::traits::{Clock, SerialPort, VolumeHooks};

/// Driver tunables
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// How long to wait for a confirming status frame before resending
    pub ack_timeout_ms: u64,
    /// Resend attempts after the initial send
    pub max_retries: u8,
    /// Idle interval between unsolicited status polls. External changes
    /// (front panel, IR remote) surface at this cadence.
    pub status_interval_ms: u64,
    /// Link-layer tunables
    pub link: LinkConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ack_timeout_ms: 1000,
            max_retries: 3,
            status_interval_ms: 1000,
            link: LinkConfig::default(),
        }
    }
}

/// Sequencer phase, as observed between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandPhase {
    /// No command in flight
    Idle,
    /// First send, waiting for the confirming status
    AwaitingAck,
    /// At least one resend happened
    Retrying,
}

/// Synchronous rejection of a submitted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubmitError<E> {
    /// Argument outside the device's valid range; nothing was sent
    InvalidCommand,
    /// A command is already in flight; the pending request is untouched
    Busy,
    /// Port I/O failed while writing
    Link(E),
}

impl<E> From<InvalidCommand> for SubmitError<E> {
    fn from(_: InvalidCommand) -> Self {
        SubmitError::InvalidCommand
    }
}

/// Notable outcome of one poll tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverEvent {
    /// An authoritative status frame was applied
    StatusUpdated,
    /// The in-flight command was confirmed by a status frame
    CommandConfirmed(Command),
    /// Retries exhausted; the command is dropped and the sequencer is
    /// idle again. State keeps its last confirmed values.
    CommandFailed(Command),
}

/// An in-flight command awaiting its confirming status frame
#[derive(Debug, Clone)]
struct Pending {
    command: Command,
    bytes: Vec<u8, MAX_COMMAND_LEN>,
    deadline_ms: u64,
    retries_remaining: u8,
}

/// Media-player driver for the Z906 console link.
///
/// Single-threaded and cooperative: call [`Z906Driver::poll`] every
/// scheduler tick; every method returns in bounded time.
pub struct Z906Driver<S: SerialPort, C: Clock, H: VolumeHooks> {
    link: Link<S>,
    clock: C,
    hooks: H,
    cfg: DriverConfig,
    state: DeviceState,
    dispatcher: Dispatcher,
    pending: Option<Pending>,
    next_status_poll_ms: u64,
}

impl<S: SerialPort, C: Clock, H: VolumeHooks> Z906Driver<S, C, H> {
    /// Build a driver over a serial port and clock, with the volume
    /// hooks injected up front.
    pub fn new(port: S, clock: C, hooks: H, cfg: DriverConfig) -> Self {
        Self {
            link: Link::new(port, cfg.link),
            clock,
            hooks,
            cfg,
            state: DeviceState::new(),
            dispatcher: Dispatcher::new(),
            pending: None,
            // First poll solicits a status immediately
            next_status_poll_ms: 0,
        }
    }

    /// Copy of the mirrored device state
    pub fn current(&self) -> DeviceState {
        self.state
    }

    /// Link diagnostic counters
    pub fn stats(&self) -> &LinkStats {
        self.link.stats()
    }

    /// Current sequencer phase
    pub fn phase(&self) -> CommandPhase {
        match &self.pending {
            None => CommandPhase::Idle,
            Some(p) if p.retries_remaining == self.cfg.max_retries => CommandPhase::AwaitingAck,
            Some(_) => CommandPhase::Retrying,
        }
    }

    /// Set a channel to an absolute level (0..=43)
    pub fn set_volume(&mut self, channel: Channel, level: u8) -> Result<(), SubmitError<S::Error>> {
        self.submit(Command::SetVolume(channel, level))
    }

    /// Mute or unmute the output
    pub fn set_mute(&mut self, muted: bool) -> Result<(), SubmitError<S::Error>> {
        self.submit(Command::SetMute(muted))
    }

    /// Power the amplifier on or off
    pub fn set_power(&mut self, on: bool) -> Result<(), SubmitError<S::Error>> {
        self.submit(Command::SetPower(on))
    }

    /// Switch the active input
    pub fn select_input(&mut self, input: Input) -> Result<(), SubmitError<S::Error>> {
        self.submit(Command::SelectInput(input))
    }

    /// Apply a sound effect to the active input
    pub fn select_effect(&mut self, effect: Effect) -> Result<(), SubmitError<S::Error>> {
        self.submit(Command::SelectEffect(effect))
    }

    /// Submit a command for transmission.
    ///
    /// Rejected with [`SubmitError::Busy`] while another command is in
    /// flight and with [`SubmitError::InvalidCommand`] before anything is
    /// sent if an argument is out of range. On success the expected
    /// result is pre-applied optimistically.
    pub fn submit(&mut self, command: Command) -> Result<(), SubmitError<S::Error>> {
        if self.pending.is_some() {
            return Err(SubmitError::Busy);
        }

        // Validates before any request state is constructed
        let bytes = command.encode()?;

        let now_ms = self.clock.now_ms();
        self.link.send(&bytes).map_err(SubmitError::Link)?;
        self.solicit_status(now_ms).map_err(SubmitError::Link)?;

        self.state.predict(&command);
        self.pending = Some(Pending {
            command,
            bytes,
            deadline_ms: now_ms + self.cfg.ack_timeout_ms,
            retries_remaining: self.cfg.max_retries,
        });
        Ok(())
    }

    /// One cooperative tick: drain the link, reconcile the in-flight
    /// command, fire change events, and keep the status poll going.
    ///
    /// Returns the most significant event of the tick, if any. A
    /// [`DriverEvent::CommandFailed`] is always surfaced.
    pub fn poll(&mut self) -> Result<Option<DriverEvent>, S::Error> {
        let now_ms = self.clock.now_ms();
        let mut event = None;

        if let Some(status) = self.link.poll(now_ms)? {
            self.state.apply(&status, now_ms);
            self.dispatcher.dispatch(&status, &mut self.hooks);

            if let Some(p) = self.pending.as_ref() {
                if p.command.confirmed_by(&status) {
                    let command = p.command;
                    self.pending = None;
                    event = Some(DriverEvent::CommandConfirmed(command));
                }
            }
            if event.is_none() {
                event = Some(DriverEvent::StatusUpdated);
            }
        }

        // Ack timeout: resend while retries remain, then give up
        let mut resend: Option<Vec<u8, MAX_COMMAND_LEN>> = None;
        let mut failed: Option<Command> = None;
        if let Some(p) = self.pending.as_mut() {
            if now_ms >= p.deadline_ms {
                if p.retries_remaining > 0 {
                    p.retries_remaining -= 1;
                    p.deadline_ms = now_ms + self.cfg.ack_timeout_ms;
                    resend = Some(p.bytes.clone());
                } else {
                    failed = Some(p.command);
                }
            }
        }
        if let Some(bytes) = resend {
            self.link.send(&bytes)?;
            self.solicit_status(now_ms)?;
        }
        if let Some(command) = failed {
            self.pending = None;
            event = Some(DriverEvent::CommandFailed(command));
        }

        // Periodic status poll while idle
        if self.pending.is_none() && now_ms >= self.next_status_poll_ms {
            self.solicit_status(now_ms)?;
        }

        Ok(event)
    }

    fn solicit_status(&mut self, now_ms: u64) -> Result<(), S::Error> {
        self.link.send(&[table::cmd::GET_STATUS])?;
        self.next_status_poll_ms = now_ms + self.cfg.status_interval_ms;
        Ok(())
    }
}
