//! Built-in word library for threadcell.
//!
//! This crate provides:
//! - [`LIBRARY`] - Native words installed after the kernel: arithmetic over
//!   the numeric tower, comparisons, bitwise logic, stack shuffling, `+!`,
//!   and number output
//! - [`PRELUDE`] - Forth source for the control-flow words (`IF`, `BEGIN`,
//!   ...) and radix switches, built from kernel words
//!
//! ```text
//! let mut machine = Machine::new(EngineConfig::default());
//! Bootstrap::new().with_library(LIBRARY).install(&mut machine)?;
//! machine.run_source(PRELUDE)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arithmetic;
mod compare;
mod logic;
mod output;
mod shuffle;

use threadcell_engine::Primitive;

pub use output::MAX_SPACES;

/// The library word table, in installation order.
pub static LIBRARY: &[Primitive] = &[
    // Arithmetic
    Primitive::new("+", arithmetic::add),
    Primitive::new("-", arithmetic::sub),
    Primitive::new("*", arithmetic::mul),
    Primitive::new("/", arithmetic::div),
    Primitive::new("MOD", arithmetic::rem),
    Primitive::new("/MOD", arithmetic::div_mod),
    Primitive::new("NEGATE", arithmetic::negate),
    Primitive::new("ABS", arithmetic::abs),
    Primitive::new("MIN", arithmetic::min),
    Primitive::new("MAX", arithmetic::max),
    Primitive::new("1+", arithmetic::one_plus),
    Primitive::new("1-", arithmetic::one_minus),
    Primitive::new("+!", arithmetic::plus_store),
    // Comparison
    Primitive::new("=", compare::eq),
    Primitive::new("<>", compare::ne),
    Primitive::new("<", compare::lt),
    Primitive::new(">", compare::gt),
    Primitive::new("<=", compare::le),
    Primitive::new(">=", compare::ge),
    Primitive::new("0=", compare::zero_eq),
    Primitive::new("0<", compare::zero_lt),
    Primitive::new("0>", compare::zero_gt),
    // Logic
    Primitive::new("AND", logic::and),
    Primitive::new("OR", logic::or),
    Primitive::new("XOR", logic::xor),
    Primitive::new("INVERT", logic::invert),
    Primitive::new("TRUE", logic::true_),
    Primitive::new("FALSE", logic::false_),
    // Stack
    Primitive::new("DROP", shuffle::drop),
    Primitive::new("DUP", shuffle::dup),
    Primitive::new("SWAP", shuffle::swap),
    Primitive::new("OVER", shuffle::over),
    Primitive::new("ROT", shuffle::rot),
    Primitive::new("-ROT", shuffle::minus_rot),
    Primitive::new("NIP", shuffle::nip),
    Primitive::new("TUCK", shuffle::tuck),
    Primitive::new("2DUP", shuffle::two_dup),
    Primitive::new("2DROP", shuffle::two_drop),
    Primitive::new("2SWAP", shuffle::two_swap),
    Primitive::new("?DUP", shuffle::question_dup),
    Primitive::new("PICK", shuffle::pick),
    Primitive::new("DEPTH", shuffle::depth),
    // Output
    Primitive::new(".", output::dot),
    Primitive::new(".S", output::dot_s),
    Primitive::new("CR", output::cr),
    Primitive::new("SPACE", output::space),
    Primitive::new("SPACES", output::spaces),
    Primitive::new("BL", output::bl),
];

/// Control-flow and radix words, written in terms of kernel words.
///
/// Branch offsets are relative to the offset cell that follows `BRANCH` or
/// `0BRANCH`. The forward-reference words leave the address of that cell on
/// the stack until it is resolved.
pub const PRELUDE: &str = r"
\ Conditionals
: IF IMMEDIATE ['] 0BRANCH COMPILE, HERE @ 0 , ;
: THEN IMMEDIATE DUP HERE @ SWAP - SWAP ! ;
: ELSE IMMEDIATE ['] BRANCH COMPILE, HERE @ 0 , SWAP DUP HERE @ SWAP - SWAP ! ;

\ Loops
: BEGIN IMMEDIATE HERE @ ;
: UNTIL IMMEDIATE ['] 0BRANCH COMPILE, HERE @ - , ;
: AGAIN IMMEDIATE ['] BRANCH COMPILE, HERE @ - , ;
: WHILE IMMEDIATE ['] 0BRANCH COMPILE, HERE @ 0 , ;
: REPEAT IMMEDIATE ['] BRANCH COMPILE, SWAP HERE @ - , DUP HERE @ SWAP - SWAP ! ;

\ Radix
: DECIMAL 10 BASE ! ;
: HEX 16 BASE ! ;
";
