//! Interrupt line plumbing between the MCU pin and the driver worker.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::InputPin;

/// MCU-side view of the pin wired to `INT1` or `INT2`.
///
/// The driver disarms the edge while it rewrites interrupt routing and re-arms it afterwards.
/// An implementation that cannot mask the edge may make both calls no-ops; edges raised
/// during a rewrite then reach the worker and are handled as spurious.
pub trait InterruptPin {
    /// Error type produced by the pin implementation.
    type Error;

    /// Returns `true` while the line is at its active level.
    fn is_asserted(&mut self) -> core::result::Result<bool, Self::Error>;

    /// Arms the edge interrupt on the MCU side.
    fn enable_interrupt(&mut self) -> core::result::Result<(), Self::Error>;

    /// Disarms the edge interrupt on the MCU side.
    fn disable_interrupt(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Placeholder for installations without an interrupt line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoPin;

impl InterruptPin for NoPin {
    type Error = core::convert::Infallible;

    fn is_asserted(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(false)
    }

    fn enable_interrupt(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn disable_interrupt(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Adapts a plain [`InputPin`] to [`InterruptPin`].
///
/// The level is sampled through the pin. Arming and disarming call the hooks installed
/// with [`PolledPin::with_edge_control`] and do nothing without them.
pub struct PolledPin<P> {
    pin: P,
    active_low: bool,
    arm: Option<fn()>,
    disarm: Option<fn()>,
}

impl<P> PolledPin<P> {
    /// Wraps an active-high line (`DATA_FORMAT.INT_INVERT = 0`).
    pub const fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            arm: None,
            disarm: None,
        }
    }

    /// Wraps an active-low line (`DATA_FORMAT.INT_INVERT = 1`).
    pub const fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            arm: None,
            disarm: None,
        }
    }

    /// Installs the functions that unmask (`arm`) and mask (`disarm`) the MCU edge
    /// interrupt, typically the EXTI line of the pin.
    pub fn with_edge_control(self, arm: fn(), disarm: fn()) -> Self {
        Self {
            arm: Some(arm),
            disarm: Some(disarm),
            ..self
        }
    }

    /// Consumes the adapter and returns the owned pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> InterruptPin for PolledPin<P> {
    type Error = P::Error;

    fn is_asserted(&mut self) -> core::result::Result<bool, Self::Error> {
        if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        }
    }

    fn enable_interrupt(&mut self) -> core::result::Result<(), Self::Error> {
        if let Some(arm) = self.arm {
            arm();
        }
        Ok(())
    }

    fn disable_interrupt(&mut self) -> core::result::Result<(), Self::Error> {
        if let Some(disarm) = self.disarm {
            disarm();
        }
        Ok(())
    }
}

/// Edge counter shared between the pin ISR and the worker context.
///
/// The ISR calls [`EdgeSignal::notify`]; the worker calls [`EdgeSignal::take`] and, when
/// it returns `true`, runs the driver's interrupt handling. No bus traffic ever happens
/// in the ISR itself.
#[derive(Debug, Default)]
pub struct EdgeSignal {
    pending: AtomicU32,
}

impl EdgeSignal {
    /// Creates an idle signal.
    pub const fn new() -> Self {
        Self {
            pending: AtomicU32::new(0),
        }
    }

    /// Records one edge. Safe to call from interrupt context.
    pub fn notify(&self) {
        self.pending.fetch_add(1, Ordering::Release);
    }

    /// Consumes all recorded edges, returning whether any were pending.
    pub fn take(&self) -> bool {
        self.pending.swap(0, Ordering::Acquire) != 0
    }
}
