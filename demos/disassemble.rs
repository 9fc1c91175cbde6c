//! Steps through a short program, printing each instruction before it runs

use std::error::Error;

use lib65816::{Cpu, FlatMemory, Long, MemoryBus, StepOutcome};

fn main() -> Result<(), Box<dyn Error>> {
    let program = &[
        0x18, // CLC
        0xFB, // XCE
        0xC2, 0x20, // REP #$20
        0xA9, 0x34, 0x12, // LDA #$1234
        0x8D, 0x00, 0x20, // STA $2000
        0x1A, // INC A
        0x8F, 0x00, 0x00, 0x7E, // STA $7E0000
        0x4C, 0x00, 0x80, // JMP $8000
    ];

    let mut memory = FlatMemory::new();
    memory.write(Long::new(0xFFFC), 0x00)?;
    memory.write(Long::new(0xFFFD), 0x80)?;
    memory.load(Long::new(0x8000), program)?;

    let mut cpu = Cpu::new(memory);

    for _ in 0..8 {
        let line = cpu.disassemble_next()?;
        match cpu.step()? {
            StepOutcome::Executed { cycles, .. } => println!("{}  ; {} cycles", line, cycles),
            StepOutcome::Breakpoint { address } => {
                println!("breakpoint at {}", address);
                break;
            }
        }
    }

    println!("total: {} cycles", cpu.cycles());
    Ok(())
}
