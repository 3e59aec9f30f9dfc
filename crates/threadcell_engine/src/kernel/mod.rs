//! Kernel words installed by every bootstrap.
//!
//! The engine itself depends on several of these by name (`DOCOL`, `LIT`,
//! `EXIT`, `BRANCH`, `INTERPRET`, `QUIT`, ...); bootstrap records their
//! addresses in [`KernelAddresses`](crate::KernelAddresses).

mod control;
mod defining;
mod introspect;
mod memory;
mod stacks;
mod text;

pub use introspect::decompile;
pub use memory::MAX_ALLOT;

use crate::interpreter;
use crate::primitive::Primitive;

/// Name of the trampoline appended after every primitive.
pub const NEXT: &str = "(NEXT)";

/// The kernel word table, in installation order.
pub static KERNEL: &[Primitive] = &[
    // Control
    Primitive::owning(NEXT, control::next).hidden(),
    Primitive::new("DOCOL", control::docol),
    Primitive::owning("EXIT", control::exit),
    Primitive::new("LIT", control::lit),
    Primitive::owning("BRANCH", control::branch),
    Primitive::owning("0BRANCH", control::zero_branch),
    Primitive::owning("EXECUTE", control::execute),
    Primitive::owning("INTERPRET", interpreter::interpret),
    Primitive::owning("QUIT", control::quit),
    Primitive::new("BYE", control::bye),
    // Variables
    Primitive::new("HERE", control::here),
    Primitive::new("STATE", control::state),
    Primitive::new("BASE", control::base),
    Primitive::new("LATEST", control::latest),
    // Memory
    Primitive::new("@", memory::fetch),
    Primitive::new("!", memory::store),
    Primitive::new(",", memory::comma),
    Primitive::new("COMPILE,", memory::compile_comma),
    Primitive::new("ALLOT", memory::allot),
    // Defining and compiling
    Primitive::new(":", defining::colon),
    Primitive::new(";", defining::semicolon).immediate(),
    Primitive::new("[", defining::left_bracket).immediate(),
    Primitive::new("]", defining::right_bracket),
    Primitive::new("IMMEDIATE", defining::immediate).immediate(),
    Primitive::new("HIDDEN", defining::hidden),
    Primitive::new("HIDE", defining::hide),
    Primitive::new("CREATE", defining::create),
    Primitive::new("VARIABLE", defining::variable),
    Primitive::new("CONSTANT", defining::constant),
    Primitive::owning("(DOVAR)", defining::dovar).hidden(),
    Primitive::owning("(DOCON)", defining::docon).hidden(),
    Primitive::new("LITERAL", defining::literal).immediate(),
    Primitive::new("RECURSE", defining::recurse).immediate(),
    Primitive::new("'", defining::tick),
    Primitive::new("[']", defining::bracket_tick).immediate(),
    Primitive::new("FORGET", defining::forget),
    // Stacks
    Primitive::new("DSP@", stacks::dsp_fetch),
    Primitive::new("DSP!", stacks::dsp_store),
    Primitive::new("RSP@", stacks::rsp_fetch),
    Primitive::new("RSP!", stacks::rsp_store),
    Primitive::new("DS-ITEM", stacks::ds_item),
    Primitive::new("RS-ITEM", stacks::rs_item),
    Primitive::new(">R", stacks::to_r),
    Primitive::new("R>", stacks::r_from),
    Primitive::new("R@", stacks::r_fetch),
    Primitive::new("RDROP", stacks::rdrop),
    // Input and output
    Primitive::new("KEY", text::key),
    Primitive::new("WORD", text::word),
    Primitive::new("CHAR", text::char),
    Primitive::new("[CHAR]", text::bracket_char).immediate(),
    Primitive::new("EMIT", text::emit),
    Primitive::new("TYPE", text::type_),
    Primitive::new(".\"", text::dot_quote).immediate(),
    Primitive::new("S\"", text::s_quote).immediate(),
    Primitive::new("(", text::paren).immediate(),
    Primitive::new("\\", text::backslash).immediate(),
    // Introspection
    Primitive::new("WORDS", introspect::words),
    Primitive::new("SEE", introspect::see),
];
