//! Asynchronous read requests and the FIFO streaming producer.
//!
//! A [`Streamer`] holds at most one outstanding streaming request. The host feeds it every
//! interrupt edge through [`Streamer::handle_interrupt`]; each qualifying edge either drops
//! the FIFO contents, reports that not enough samples are buffered yet, or fills one encoded
//! buffer (see [`crate::fifo`]) and completes the request.

use crate::device::Adxl34x;
use crate::error::{Error, Result};
use crate::fifo::{encoded_size, EncodedHeader, HEADER_LEN};
use crate::interface::pin::InterruptPin;
use crate::interface::Adxl34xInterface;
use crate::registers::{IntSource, FRAME_LEN, REG_DATAX0};
use crate::sensor::{ChannelSpec, PmState, SensorChannel};

/// What to do with FIFO contents when a FIFO event fires during streaming.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamDataOpt {
    /// Deliver the samples.
    #[default]
    Include,
    /// Deliver nothing and leave the samples alone.
    Nop,
    /// Discard the samples.
    Drop,
}

impl StreamDataOpt {
    const fn skips_delivery(self) -> bool {
        matches!(self, Self::Nop | Self::Drop)
    }
}

/// Per-request handling of the FIFO events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamOptions {
    /// Policy when `INT_SOURCE.OVERRUN` fired.
    pub fifo_full: StreamDataOpt,
    /// Policy when `INT_SOURCE.WATERMARK` fired.
    pub fifo_watermark: StreamDataOpt,
}

/// A read request owned by the host's asynchronous I/O layer.
///
/// The driver completes every request it does not drop exactly once, consuming it.
pub trait Request<E>: Sized {
    /// `true` for streaming requests, `false` for one-shot reads.
    fn is_streaming(&self) -> bool;

    /// Channels the caller wants.
    fn channels(&self) -> &[ChannelSpec];

    /// FIFO event policies; only consulted for streaming requests.
    fn stream_options(&self) -> StreamOptions {
        StreamOptions::default()
    }

    /// Lends a buffer of at least `min_len` and at most `max_len` bytes.
    fn acquire_buffer(&mut self, min_len: usize, max_len: usize) -> Option<&mut [u8]>;

    /// Completes the request with the number of frames produced.
    fn complete_ok(self, frames: u32);

    /// Completes the request with an error.
    fn complete_err(self, err: Error<E>);
}

/// Outstanding-request slot of one device.
pub struct Streamer<R> {
    pending: Option<R>,
}

impl<R> Streamer<R> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// `true` while a streaming request waits for data.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<R> Default for Streamer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Streamer<R> {
    /// Disarms the slot and hands back the pending request without completing it.
    ///
    /// The FIFO sources the stream enabled are cleared from `INT_ENABLE`. On a bus failure
    /// the request stays armed and the error is returned.
    pub fn cancel<IFACE, PIN, CommE>(
        &mut self,
        dev: &mut Adxl34x<IFACE, PIN>,
    ) -> Result<Option<R>, CommE>
    where
        IFACE: Adxl34xInterface<Error = CommE>,
        PIN: InterruptPin,
    {
        let Some(req) = self.pending.take() else {
            return Ok(None);
        };
        if let Err(err) = dev.stop_streaming() {
            dev.triggers.set_streaming(true);
            self.pending = Some(req);
            return Err(err);
        }
        Ok(Some(req))
    }

    /// Accepts a request.
    ///
    /// On a suspended or powered-off device the request is dropped without completion.
    /// One-shot requests are served immediately with a single frame. A streaming request
    /// arms the slot and enables interrupts; if a streaming request was already armed, the
    /// new one takes its place without restarting the interrupt path and the superseded
    /// request is returned.
    pub fn submit<IFACE, PIN, CommE>(
        &mut self,
        dev: &mut Adxl34x<IFACE, PIN>,
        mut req: R,
        timestamp_ns: u64,
    ) -> Option<R>
    where
        IFACE: Adxl34xInterface<Error = CommE>,
        PIN: InterruptPin,
        R: Request<CommE>,
    {
        if matches!(dev.pm_state(), PmState::Suspended | PmState::Off) {
            debug!("request dropped while suspended");
            return None;
        }

        if !req.is_streaming() {
            let accel_only = req
                .channels()
                .iter()
                .all(|spec| spec.channel.is_accel() || spec.channel == SensorChannel::All);
            if !accel_only {
                req.complete_err(Error::NotSupported);
                return None;
            }

            let header = EncodedHeader {
                timestamp_ns,
                range: dev.range(),
                entries: 1,
                trigger: 0,
            };
            finish(dev, req, header);
            return None;
        }

        if self.pending.is_some() {
            return self.pending.replace(req);
        }

        dev.triggers.set_streaming(true);
        match dev.trigger_reset() {
            Ok(()) => self.pending = Some(req),
            Err(err) => {
                // The request reports the first failure.
                let _ = dev.stop_streaming();
                req.complete_err(err);
            }
        }
        None
    }

    /// Services one interrupt edge observed at `timestamp_ns`.
    ///
    /// Without an armed request this is plain trigger dispatch. With one, motion bits are
    /// dispatched first, then the request is dropped, filled, or left armed. `Err(NoData)`
    /// means the edge was spurious: the FIFO holds fewer samples than one burst and the
    /// request stays armed. Every other failure completes the request with the error.
    ///
    /// Once the request is completed the FIFO sources are disabled again; a bus failure
    /// while doing so is returned.
    pub fn handle_interrupt<IFACE, PIN, CommE>(
        &mut self,
        dev: &mut Adxl34x<IFACE, PIN>,
        timestamp_ns: u64,
    ) -> Result<(), CommE>
    where
        IFACE: Adxl34xInterface<Error = CommE>,
        PIN: InterruptPin,
        R: Request<CommE>,
    {
        let Some(req) = self.pending.take() else {
            dev.handle_interrupt();
            return Ok(());
        };

        let serviced = self.service(dev, req, timestamp_ns);
        if self.pending.is_none() {
            dev.stop_streaming()?;
        }
        serviced
    }

    fn service<IFACE, PIN, CommE>(
        &mut self,
        dev: &mut Adxl34x<IFACE, PIN>,
        req: R,
        timestamp_ns: u64,
    ) -> Result<(), CommE>
    where
        IFACE: Adxl34xInterface<Error = CommE>,
        PIN: InterruptPin,
        R: Request<CommE>,
    {
        let source = match dev.get_int_source() {
            Ok(source) => source,
            Err(err) => {
                req.complete_err(err);
                return Ok(());
            }
        };
        dev.dispatch_motion(source);

        if should_drop(source, req.stream_options()) {
            debug!("dropping fifo contents, INT_SOURCE {=u8:#x}", u8::from(source));
            match dev.flush_fifo() {
                Ok(()) => req.complete_ok(0),
                Err(err) => req.complete_err(err),
            }
            return Ok(());
        }

        let samples = dev.cfg.fifo_ctl.samples().max(1);
        let entries = match dev.get_fifo_status() {
            Ok(status) => status.entries(),
            Err(err) => {
                req.complete_err(err);
                return Ok(());
            }
        };
        if entries < samples {
            trace!("spurious edge: {=u8} of {=u8} samples", entries, samples);
            self.pending = Some(req);
            return Err(Error::NoData);
        }

        if source.overrun() {
            warn!("fifo overrun while streaming");
        }

        let header = EncodedHeader {
            timestamp_ns,
            range: dev.range(),
            entries: samples,
            trigger: u8::from(source),
        };
        finish(dev, req, header);
        Ok(())
    }
}

fn should_drop(source: IntSource, options: StreamOptions) -> bool {
    (source.overrun() && options.fifo_full.skips_delivery())
        || (source.watermark() && options.fifo_watermark.skips_delivery())
}

// Acquires a buffer for `header.entries` frames, fills it and completes the request.
fn finish<IFACE, PIN, CommE, R>(dev: &mut Adxl34x<IFACE, PIN>, mut req: R, header: EncodedHeader)
where
    IFACE: Adxl34xInterface<Error = CommE>,
    R: Request<CommE>,
{
    let size = encoded_size(usize::from(header.entries));
    let filled = match req.acquire_buffer(size, size) {
        Some(buf) if buf.len() >= size => fill(dev, &mut buf[..size], &header),
        _ => Err(Error::BufferUnavailable),
    };

    match filled {
        Ok(()) => req.complete_ok(u32::from(header.entries)),
        Err(err) => req.complete_err(err),
    }
}

fn fill<IFACE, PIN, CommE>(
    dev: &mut Adxl34x<IFACE, PIN>,
    buf: &mut [u8],
    header: &EncodedHeader,
) -> Result<(), CommE>
where
    IFACE: Adxl34xInterface<Error = CommE>,
{
    header.write_to(buf).ok_or(Error::BufferUnavailable)?;
    for frame in buf[HEADER_LEN..].chunks_exact_mut(FRAME_LEN) {
        dev.interface.read_many(REG_DATAX0, frame)?;
    }
    Ok(())
}
