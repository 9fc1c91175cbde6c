//! # 65816 Operators
//!
//! Operator types for the instructions the decoder knows, organized by
//! category. Each is a zero-sized type implementing one capability trait from
//! [`crate::operator`] per kind of addressing mode it pairs with.
//!
//! ## Categories
//!
//! - **load_store**: Loads and stores (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Memory and accumulator increment/decrement (INC, DEC)
//! - **flags**: Status register manipulation (CLC, SEC, REP, SEP, XCE)
//! - **control**: Jumps, subroutines and no-ops (JMP, JML, JSR, RTS, NOP, WDM)
//! - **branches**: Relative branches (BRA, BRL, BEQ, BNE)
//! - **block**: Block moves (MVN, MVP)

pub mod block;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
