//! A scripted machine state for exercising the instruction framework without
//! a CPU behind it.

#![allow(dead_code)]

use lib65816::operator::{
    AccessOperator, ImmediateOperator, ImpliedOperator, JumpOperator, Operator,
};
use lib65816::{ExecutionError, Long, MachineState, MemoryAccess};

/// What a [`Recorder`] was invoked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Implied,
    Immediate(u16),
    Access(MemoryAccess),
    Jump(Long),
}

/// Program bytes plus a log of everything the framework asked for.
///
/// Offset 0 is the opcode; the cursor starts at 1 as if the decoder had
/// already consumed it.
#[derive(Debug, Default)]
pub struct MockState {
    pub program: Vec<u8>,
    pub cursor: usize,
    pub data_bank: u8,
    /// Program offset whose fetch fails with a decode fault.
    pub fault_at: Option<usize>,
    /// Bank whose accesses fail with a memory fault.
    pub unmapped_bank: Option<u8>,
    pub fetches: Vec<usize>,
    pub breakpoints: Vec<usize>,
    pub invocations: Vec<Invocation>,
}

impl MockState {
    pub fn new(program: &[u8]) -> Self {
        Self {
            program: program.to_vec(),
            cursor: 1,
            ..Self::default()
        }
    }

    fn check_bank(&self, address: Long) -> Result<MemoryAccess, ExecutionError> {
        if self.unmapped_bank == Some(address.bank()) {
            Err(ExecutionError::MemoryFault { address })
        } else {
            Ok(MemoryAccess::new(address))
        }
    }
}

impl MachineState for MockState {
    fn apply_program_byte(&mut self) -> Result<u8, ExecutionError> {
        let offset = self.cursor;
        let address = Long::new(offset as u32);
        if self.fault_at == Some(offset) {
            return Err(ExecutionError::DecodeFault { address });
        }
        let byte = *self
            .program
            .get(offset)
            .ok_or(ExecutionError::DecodeFault { address })?;
        self.fetches.push(offset);
        self.cursor += 1;
        Ok(byte)
    }

    fn memory_access(&self, low: u8, high: u8) -> Result<MemoryAccess, ExecutionError> {
        self.check_bank(Long::from_bytes(low, high, self.data_bank))
    }

    fn memory_access_long(
        &self,
        low: u8,
        high: u8,
        bank: u8,
    ) -> Result<MemoryAccess, ExecutionError> {
        self.check_bank(Long::from_bytes(low, high, bank))
    }

    fn apply_breakpoint(&mut self, offset: usize) {
        self.breakpoints.push(offset);
    }

    fn has_breakpoint(&self, offset: usize) -> bool {
        self.breakpoints.contains(&offset)
    }

    fn print_program_byte(&self, offset: usize, out: &mut String) {
        match self.program.get(offset) {
            Some(byte) => out.push_str(&format!("{:02X}", byte)),
            None => out.push_str("??"),
        }
    }
}

/// Operator that only records its invocations.
///
/// Each capability reports a different cycle count so tests can see it pass
/// through the addressing mode.
pub struct Recorder;

impl Operator for Recorder {
    const MNEMONIC: &'static str = "LDA";
}

impl ImpliedOperator<MockState> for Recorder {
    fn invoke(state: &mut MockState) -> Result<u32, ExecutionError> {
        state.invocations.push(Invocation::Implied);
        Ok(7)
    }
}

impl ImmediateOperator<MockState> for Recorder {
    fn invoke(state: &mut MockState, value: u16) -> Result<u32, ExecutionError> {
        state.invocations.push(Invocation::Immediate(value));
        Ok(0)
    }
}

impl AccessOperator<MockState> for Recorder {
    fn invoke(state: &mut MockState, access: MemoryAccess) -> Result<u32, ExecutionError> {
        state.invocations.push(Invocation::Access(access));
        Ok(1)
    }
}

impl JumpOperator<MockState> for Recorder {
    fn invoke(state: &mut MockState, target: Long) -> Result<u32, ExecutionError> {
        state.invocations.push(Invocation::Jump(target));
        Ok(0)
    }
}
