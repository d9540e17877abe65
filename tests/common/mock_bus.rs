//! Call-counting register bus, scripted interrupt pin and recording I/O request

use adxl34x::interface::pin::InterruptPin;
use adxl34x::interface::Adxl34xInterface;
use adxl34x::registers::{FRAME_LEN, REG_BW_RATE, REG_DATAX0};
use adxl34x::rtio::{Request, StreamOptions};
use adxl34x::sensor::ChannelSpec;
use adxl34x::Error;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// Error returned by every injected bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Records operations performed on the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Single register read
    Read { address: u8, value: u8 },
    /// Single register write
    Write { address: u8, value: u8 },
    /// Multi-byte read
    Burst { address: u8, len: usize },
}

#[derive(Debug)]
struct MockState {
    registers: HashMap<u8, u8>,
    operations: Vec<Operation>,
    failing_writes: HashSet<u8>,
    fail_next_read: bool,
    fail_burst_after: Option<usize>,
    fifo: VecDeque<[i16; 3]>,
}

/// Register-file simulation shared between the driver and the test body
#[derive(Debug, Clone)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    /// A device answering `devid`, every other register at its reset value
    pub fn new(devid: u8) -> Self {
        let mut registers = HashMap::new();
        registers.insert(0x00, devid);
        registers.insert(REG_BW_RATE, 0x0A);

        Self {
            state: Rc::new(RefCell::new(MockState {
                registers,
                operations: Vec::new(),
                failing_writes: HashSet::new(),
                fail_next_read: false,
                fail_burst_after: None,
                fifo: VecDeque::new(),
            })),
        }
    }

    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    pub fn register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Queues frames returned by subsequent `DATAX0` bursts
    pub fn push_frames(&self, frames: &[[i16; 3]]) {
        self.state.borrow_mut().fifo.extend(frames.iter().copied());
    }

    pub fn fail_writes_to(&self, address: u8) {
        self.state.borrow_mut().failing_writes.insert(address);
    }

    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Lets `count` more bursts succeed, then fails every following one
    pub fn fail_bursts_after(&self, count: usize) {
        self.state.borrow_mut().fail_burst_after = Some(count);
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    pub fn write_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::Write { .. }))
            .count()
    }

    pub fn read_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::Read { .. }))
            .count()
    }

    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.operations()
            .iter()
            .filter_map(|op| match *op {
                Operation::Write { address: a, value } if a == address => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn reads_of(&self, address: u8) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, Operation::Read { address: a, .. } if *a == address))
            .count()
    }

    /// Number of six-byte FIFO pops
    pub fn fifo_reads(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| {
                matches!(op, Operation::Burst { address, len } if *address == REG_DATAX0 && *len == FRAME_LEN)
            })
            .count()
    }
}

impl Adxl34xInterface for MockBus {
    type Error = MockError;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if state.failing_writes.contains(&register) {
            return Err(MockError);
        }
        state.operations.push(Operation::Write {
            address: register,
            value,
        });
        state.registers.insert(register, value);
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u8, MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError);
        }
        let value = state.registers.get(&register).copied().unwrap_or(0);
        state.operations.push(Operation::Read {
            address: register,
            value,
        });
        Ok(value)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if let Some(remaining) = state.fail_burst_after.as_mut() {
            if *remaining == 0 {
                return Err(MockError);
            }
            *remaining -= 1;
        }
        state.operations.push(Operation::Burst {
            address: register,
            len: buf.len(),
        });

        if register == REG_DATAX0 && buf.len() == FRAME_LEN {
            let frame = state.fifo.pop_front().unwrap_or([0; 3]);
            for (chunk, value) in buf.chunks_exact_mut(2).zip(frame) {
                chunk.copy_from_slice(&value.to_le_bytes());
            }
        } else {
            for (offset, byte) in buf.iter_mut().enumerate() {
                let address = register.wrapping_add(offset as u8);
                *byte = state.registers.get(&address).copied().unwrap_or(0);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PinState {
    levels: VecDeque<bool>,
    stuck: bool,
    fail_next_poll: bool,
    armed: bool,
    polls: usize,
}

/// Interrupt pin whose level follows a script
#[derive(Debug, Clone, Default)]
pub struct ScriptedPin {
    state: Rc<RefCell<PinState>>,
}

impl ScriptedPin {
    /// Levels returned by the next polls; deasserted once exhausted
    pub fn script(&self, levels: &[bool]) {
        self.state.borrow_mut().levels.extend(levels.iter().copied());
    }

    /// Keeps the line asserted forever
    pub fn stick(&self) {
        self.state.borrow_mut().stuck = true;
    }

    /// Makes the next level poll fail
    pub fn fail_next_poll(&self) {
        self.state.borrow_mut().fail_next_poll = true;
    }

    pub fn is_armed(&self) -> bool {
        self.state.borrow().armed
    }

    pub fn polls(&self) -> usize {
        self.state.borrow().polls
    }
}

impl InterruptPin for ScriptedPin {
    type Error = MockError;

    fn is_asserted(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.polls += 1;
        if std::mem::take(&mut state.fail_next_poll) {
            return Err(MockError);
        }
        let stuck = state.stuck;
        Ok(state.levels.pop_front().unwrap_or(stuck))
    }

    fn enable_interrupt(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().armed = true;
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().armed = false;
        Ok(())
    }
}

/// How a [`MockRequest`] was completed
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok { frames: u32, data: Vec<u8> },
    Err(Error<MockError>),
}

#[derive(Debug, Default)]
struct CompletionState {
    outcome: Option<Outcome>,
    acquired: Vec<(usize, usize)>,
}

/// Observer handle kept by the test after the request moved into the driver
#[derive(Debug, Clone, Default)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

impl Completion {
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.borrow().outcome.clone()
    }

    /// `(min, max)` of every buffer request
    pub fn acquired(&self) -> Vec<(usize, usize)> {
        self.state.borrow().acquired.clone()
    }
}

/// Read request recording its completion
#[derive(Debug)]
pub struct MockRequest {
    streaming: bool,
    channels: Vec<ChannelSpec>,
    options: StreamOptions,
    buffer: Vec<u8>,
    buffer_available: bool,
    completion: Completion,
}

impl MockRequest {
    pub fn one_shot(channels: &[ChannelSpec]) -> (Self, Completion) {
        Self::build(false, channels, StreamOptions::default())
    }

    pub fn streaming(channels: &[ChannelSpec], options: StreamOptions) -> (Self, Completion) {
        Self::build(true, channels, options)
    }

    fn build(streaming: bool, channels: &[ChannelSpec], options: StreamOptions) -> (Self, Completion) {
        let completion = Completion::default();
        let request = Self {
            streaming,
            channels: channels.to_vec(),
            options,
            buffer: Vec::new(),
            buffer_available: true,
            completion: completion.clone(),
        };
        (request, completion)
    }

    /// Refuses every buffer request
    pub fn without_buffer(mut self) -> Self {
        self.buffer_available = false;
        self
    }
}

impl Request<MockError> for MockRequest {
    fn is_streaming(&self) -> bool {
        self.streaming
    }

    fn channels(&self) -> &[ChannelSpec] {
        &self.channels
    }

    fn stream_options(&self) -> StreamOptions {
        self.options
    }

    fn acquire_buffer(&mut self, min_len: usize, max_len: usize) -> Option<&mut [u8]> {
        self.completion
            .state
            .borrow_mut()
            .acquired
            .push((min_len, max_len));
        if !self.buffer_available {
            return None;
        }
        self.buffer = vec![0; min_len];
        Some(&mut self.buffer)
    }

    fn complete_ok(self, frames: u32) {
        self.completion.state.borrow_mut().outcome = Some(Outcome::Ok {
            frames,
            data: self.buffer,
        });
    }

    fn complete_err(self, err: Error<MockError>) {
        self.completion.state.borrow_mut().outcome = Some(Outcome::Err(err));
    }
}
