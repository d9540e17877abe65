//! Interrupt routing, handler registration and edge dispatch.
//!
//! Handlers live in two table entries. Data-class kinds (data ready, FIFO watermark, FIFO
//! full) share one handler and one token; the five motion-like kinds share a second handler
//! but keep one token each, so every motion event is reported with the trigger spec it was
//! registered under.
//!
//! The MCU edge ISR must not touch the bus. It records the edge (see
//! [`EdgeSignal`](crate::interface::pin::EdgeSignal)) and a worker later calls
//! [`Adxl34x::handle_interrupt`].

use crate::device::Adxl34x;
use crate::error::{Error, Result};
use crate::interface::pin::InterruptPin;
use crate::interface::Adxl34xInterface;
use crate::registers::{IntEnable, IntMap, IntSource, MAX_FIFO_SIZE};
use crate::sensor::{TriggerKind, TriggerSpec};

/// Callback invoked from [`Adxl34x::handle_interrupt`] with the trigger spec it was registered under.
pub type TriggerHandler<IFACE, PIN> = fn(&mut Adxl34x<IFACE, PIN>, TriggerSpec);

/// Motion-like kinds in token-slot order.
pub const MOTION_KINDS: [TriggerKind; 5] = [
    TriggerKind::Tap,
    TriggerKind::DoubleTap,
    TriggerKind::FreeFall,
    TriggerKind::Motion,
    TriggerKind::Stationary,
];

/// Whether interrupt generation is currently armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerState {
    /// MCU pin disarmed and device sources disabled.
    Suspended,
    /// Device measuring with the registered sources enabled and the pin armed.
    Active,
}

/// One handler shared by `N` trigger tokens.
struct HandlerEntry<IFACE, PIN, const N: usize> {
    handler: Option<TriggerHandler<IFACE, PIN>>,
    tokens: [Option<TriggerSpec>; N],
}

impl<IFACE, PIN, const N: usize> HandlerEntry<IFACE, PIN, N> {
    const fn new() -> Self {
        Self {
            handler: None,
            tokens: [None; N],
        }
    }

    fn set(&mut self, slot: usize, spec: TriggerSpec, handler: Option<TriggerHandler<IFACE, PIN>>) {
        match handler {
            Some(handler) => {
                self.handler = Some(handler);
                self.tokens[slot] = Some(spec);
            }
            None => {
                self.tokens[slot] = None;
                if self.tokens.iter().all(Option::is_none) {
                    self.handler = None;
                }
            }
        }
    }

    fn get(&self, slot: usize) -> Option<(TriggerHandler<IFACE, PIN>, TriggerSpec)> {
        Some((self.handler?, self.tokens[slot]?))
    }
}

/// Registered trigger handlers of one device instance.
pub struct TriggerTable<IFACE, PIN> {
    data: HandlerEntry<IFACE, PIN, 1>,
    motion: HandlerEntry<IFACE, PIN, 5>,
    streaming: bool,
}

impl<IFACE, PIN> TriggerTable<IFACE, PIN> {
    pub(crate) const fn new() -> Self {
        Self {
            data: HandlerEntry::new(),
            motion: HandlerEntry::new(),
            streaming: false,
        }
    }

    pub(crate) fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }

    /// `true` when a handler is registered for `kind`.
    pub fn is_registered(&self, kind: TriggerKind) -> bool {
        if is_data_kind(kind) {
            return self.data.get(0).is_some_and(|(_, spec)| spec.kind == kind);
        }
        motion_slot(kind).is_some_and(|slot| self.motion.get(slot).is_some())
    }

    /// `INT_ENABLE` image covering every registered kind, plus the FIFO sources while a
    /// streaming request is in flight.
    pub fn enabled_sources(&self) -> IntEnable {
        let mut enable = IntEnable::new();
        if let Some((_, spec)) = self.data.get(0) {
            enable = with_source(enable, spec.kind);
        }
        for (slot, kind) in MOTION_KINDS.into_iter().enumerate() {
            if self.motion.get(slot).is_some() {
                enable = with_source(enable, kind);
            }
        }
        if self.streaming {
            enable = enable.with_watermark(true).with_overrun(true);
        }
        enable
    }
}

impl<IFACE, PIN> Default for TriggerTable<IFACE, PIN> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const fn is_data_kind(kind: TriggerKind) -> bool {
    matches!(
        kind,
        TriggerKind::DataReady | TriggerKind::FifoWatermark | TriggerKind::FifoFull
    )
}

fn motion_slot(kind: TriggerKind) -> Option<usize> {
    MOTION_KINDS.iter().position(|motion| *motion == kind)
}

fn with_source(enable: IntEnable, kind: TriggerKind) -> IntEnable {
    match kind {
        TriggerKind::DataReady => enable.with_data_ready(true),
        TriggerKind::FifoWatermark => enable.with_watermark(true),
        TriggerKind::FifoFull => enable.with_overrun(true),
        TriggerKind::Tap => enable.with_single_tap(true),
        TriggerKind::DoubleTap => enable.with_double_tap(true),
        TriggerKind::FreeFall => enable.with_free_fall(true),
        TriggerKind::Motion => enable.with_activity(true),
        TriggerKind::Stationary => enable.with_inactivity(true),
        TriggerKind::Threshold => enable,
    }
}

/// Whether `source` reports an event of class `kind`.
///
/// Data-class kinds match any of data ready, watermark or overrun.
pub fn source_matches(source: IntSource, kind: TriggerKind) -> bool {
    match kind {
        TriggerKind::DataReady | TriggerKind::FifoWatermark | TriggerKind::FifoFull => {
            source.any_data()
        }
        TriggerKind::Tap => source.single_tap(),
        TriggerKind::DoubleTap => source.double_tap(),
        TriggerKind::FreeFall => source.free_fall(),
        TriggerKind::Motion => source.activity(),
        TriggerKind::Stationary => source.inactivity(),
        TriggerKind::Threshold => false,
    }
}

impl<IFACE, PIN, CommE> Adxl34x<IFACE, PIN>
where
    IFACE: Adxl34xInterface<Error = CommE>,
    PIN: InterruptPin,
{
    // ==================================================================
    // == Trigger Registration ==========================================
    // ==================================================================
    /// Registers (`Some`) or removes (`None`) the handler for `spec.kind`.
    ///
    /// Interrupts are always suspended while the routing is rewritten and resumed
    /// afterwards, even when only a second handler is added. Fails with `NotReady` while
    /// the device is suspended.
    pub fn trigger_set(
        &mut self,
        spec: TriggerSpec,
        handler: Option<TriggerHandler<IFACE, PIN>>,
    ) -> Result<(), CommE> {
        self.ensure_active()?;
        if !spec.channel.is_accel() {
            return Err(Error::NotSupported);
        }
        if !is_data_kind(spec.kind) && motion_slot(spec.kind).is_none() {
            return Err(Error::NotSupported);
        }

        self.suspend_interrupts()?;

        if is_data_kind(spec.kind) {
            self.triggers.data.set(0, spec, handler);
        } else if let Some(slot) = motion_slot(spec.kind) {
            self.triggers.motion.set(slot, spec, handler);
        }
        debug!("trigger {} registered: {}", spec.kind, handler.is_some());

        self.resume_interrupts()
    }

    /// Restarts interrupt generation from a clean FIFO.
    ///
    /// Flushes the FIFO, rewrites routing and enables, and sets `POWER_CTL.MEASURE`.
    /// Calling it again with nothing changed only costs the flush and one `INT_SOURCE` read.
    pub fn trigger_reset(&mut self) -> Result<(), CommE> {
        self.ensure_active()?;
        self.flush_fifo()?;
        self.resume_interrupts()
    }

    /// Current interrupt-generation state.
    pub fn trigger_state(&self) -> TriggerState {
        self.trigger_state
    }

    /// Registered handlers.
    pub fn triggers(&self) -> &TriggerTable<IFACE, PIN> {
        &self.triggers
    }

    /// Clears the streaming FIFO sources once no streaming request is outstanding.
    ///
    /// While interrupts are suspended only the table changes; the next resume writes
    /// `INT_ENABLE`.
    pub(crate) fn stop_streaming(&mut self) -> Result<(), CommE> {
        self.triggers.set_streaming(false);
        if self.trigger_state == TriggerState::Suspended {
            return Ok(());
        }
        let enable = self.triggers.enabled_sources();
        self.set_int_enable(enable)
    }

    fn suspend_interrupts(&mut self) -> Result<(), CommE> {
        self.int_pin.disable_interrupt().map_err(|_| Error::Pin)?;
        self.trigger_state = TriggerState::Suspended;
        self.set_int_enable(IntEnable::new())
    }

    fn resume_interrupts(&mut self) -> Result<(), CommE> {
        let line = self.init_config.int_line;
        self.set_int_map(IntMap::all_to(line))?;
        let enable = self.triggers.enabled_sources();
        self.set_int_enable(enable)?;
        let power = self.cfg.power_ctl.with_measure(true);
        self.set_power_ctl(power)?;

        // Drop whatever latched while the sources were being rewritten.
        self.get_int_source()?;

        self.int_pin.enable_interrupt().map_err(|_| Error::Pin)?;
        self.trigger_state = TriggerState::Active;
        Ok(())
    }

    // ==================================================================
    // == Edge Dispatch =================================================
    // ==================================================================
    /// Services one interrupt edge.
    ///
    /// Call from the worker context after the edge ISR fired. Bus or pin errors abort this
    /// edge only; they are logged and never reported, as there is no caller to report them to.
    pub fn handle_interrupt(&mut self) {
        if let Err(_err) = self.process_interrupt() {
            warn!("interrupt handling aborted");
        }
    }

    fn process_interrupt(&mut self) -> Result<(), CommE> {
        let source = self.get_int_source()?;
        trace!("INT_SOURCE {=u8:#x}", u8::from(source));

        if source.overrun() {
            warn!("fifo overrun");
        }

        // Reading INT_SOURCE acknowledged the motion bits, so they are dispatched even
        // when polling the line fails.
        let drained = match self.triggers.data.get(0) {
            Some((handler, spec)) if source.any_data() => self.drain_data_handler(handler, spec),
            _ => Ok(()),
        };

        self.dispatch_motion(source);
        drained
    }

    // Some hosts see a single edge for a whole backlog, so the handler is re-run while the
    // line stays asserted. Each run is expected to pop at least one sample; the FIFO depth
    // bounds the loop when it does not.
    fn drain_data_handler(
        &mut self,
        handler: TriggerHandler<IFACE, PIN>,
        spec: TriggerSpec,
    ) -> Result<(), CommE> {
        for _ in 0..MAX_FIFO_SIZE {
            handler(self, spec);
            if !self.int_pin.is_asserted().map_err(|_| Error::Pin)? {
                return Ok(());
            }
        }
        warn!("interrupt line stuck asserted");
        Ok(())
    }

    /// Invokes the motion handler once per motion bit set in `source`, each with its own
    /// token.
    pub(crate) fn dispatch_motion(&mut self, source: IntSource) {
        for (slot, kind) in MOTION_KINDS.into_iter().enumerate() {
            if !source_matches(source, kind) {
                continue;
            }
            if let Some((handler, spec)) = self.triggers.motion.get(slot) {
                handler(self, spec);
            }
        }
    }
}
