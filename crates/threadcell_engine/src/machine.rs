//! The execution engine.
//!
//! A [`Machine`] owns every piece of interpreter state: the registers IP and
//! NIP, the threaded-code depth, the address space, the dictionary, both
//! stacks, and the I/O collaborators. There are no globals; primitives receive
//! the machine by mutable reference.
//!
//! # Dispatch
//!
//! [`Machine::step`] classifies the cell at IP:
//!
//! - `Empty` fails with `UnknownCell`.
//! - `NativeOp` calls the bound primitive. IP then advances by one unless the
//!   primitive declared [`ControlFlow::Owned`].
//! - `ThreadRef(x)` jumps to `x`. Inside a called body (depth > 0) it also sets
//!   NIP to the cell after itself, which is where the callee returns to.
//! - `Literal` is inert and IP advances by one.
//!
//! Every installed primitive is followed by a `NEXT` cell (`IP := NIP`), which
//! is how a primitive reached through a `ThreadRef` returns to its caller.
//! Colon definitions begin with a `DOCOL` codeword that pushes NIP on the
//! return stack; `EXIT` pops it back.

use std::fmt;

use threadcell_foundation::number::{MAX_BASE, MIN_BASE};
use threadcell_foundation::{
    Address, Error, ErrorContext, ErrorKind, Result, StackKind, Type, Value,
};
use threadcell_storage::{AddressSpace, Cell, Dictionary, PrimitiveId, Stack};

use crate::config::EngineConfig;
use crate::io::{Console, InputSource, OutputSink, StringInput};
use crate::primitive::{ControlFlow, PrimitiveTable};
use crate::variables::{Mode, Variable};

/// Why [`Machine::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shutdown {
    /// `BYE` was executed.
    Bye,
    /// The outer interpreter found no more input.
    EndOfInput,
    /// The configured step limit was reached.
    StepLimit,
}

impl fmt::Display for Shutdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bye => f.write_str("bye"),
            Self::EndOfInput => f.write_str("end of input"),
            Self::StepLimit => f.write_str("step limit"),
        }
    }
}

/// Outcome of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Execution may continue.
    Running,
    /// A shutdown was requested during this step.
    Halted(Shutdown),
}

/// Kernel handles and addresses the engine relies on, discovered at bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KernelAddresses {
    /// Codeword behavior of colon definitions.
    pub docol: PrimitiveId,
    /// Codeword behavior of `CREATE`d words.
    pub dovar: PrimitiveId,
    /// Codeword behavior of constants.
    pub docon: PrimitiveId,
    /// `LIT`: push the following literal cell.
    pub lit: Address,
    /// `EXIT`: return from a colon definition.
    pub exit: Address,
    /// `BRANCH`: unconditional relative jump.
    pub branch: Address,
    /// `0BRANCH`: jump if the popped flag is false.
    pub zero_branch: Address,
    /// `TYPE`: print the popped value.
    pub type_word: Address,
    /// `INTERPRET`: handle one input token.
    pub interpret: Address,
    /// `QUIT`: the reset entry point.
    pub quit: Address,
    /// First cell of the three-cell outer interpreter thread.
    pub outer_loop: Address,
}

/// A snapshot of memory and dictionary.
///
/// Taking one is O(1); both halves share structure with the live machine.
#[derive(Clone, Debug)]
pub struct Image {
    memory: AddressSpace,
    dictionary: Dictionary,
}

impl Image {
    /// The captured address space.
    #[must_use]
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// The captured dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

type ShutdownHook = Box<dyn FnOnce(Shutdown)>;

/// The interpreter: registers, memory, dictionary, stacks, and I/O.
pub struct Machine {
    ip: Address,
    nip: Address,
    depth: usize,
    memory: AddressSpace,
    dictionary: Dictionary,
    params: Stack<Value>,
    returns: Stack<Value>,
    primitives: PrimitiveTable,
    input: Box<dyn InputSource>,
    output: Box<dyn OutputSink>,
    kernel: Option<KernelAddresses>,
    shutdown: Option<Shutdown>,
    on_shutdown: Option<ShutdownHook>,
    recovered: Vec<Error>,
    config: EngineConfig,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("ip", &self.ip)
            .field("nip", &self.nip)
            .field("depth", &self.depth)
            .field("params", &self.params.as_slice())
            .field("returns", &self.returns.as_slice())
            .field("cells", &self.memory.len())
            .field("words", &self.dictionary.len())
            .finish_non_exhaustive()
    }
}

impl Machine {
    /// Creates an empty, unbootstrapped machine reading from an empty string
    /// and writing to standard output.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ip: 0,
            nip: 0,
            depth: 0,
            memory: AddressSpace::new(),
            dictionary: Dictionary::new(),
            params: Stack::new(StackKind::Parameter),
            returns: Stack::new(StackKind::Return),
            primitives: PrimitiveTable::new(),
            input: Box::new(StringInput::default()),
            output: Box::new(Console),
            kernel: None,
            shutdown: None,
            on_shutdown: None,
            recovered: Vec::new(),
            config,
        }
    }

    // =========================================================================
    // Configuration and collaborators
    // =========================================================================

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable access to the engine configuration.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Replaces the input source.
    pub fn set_input(&mut self, input: impl InputSource + 'static) {
        self.input = Box::new(input);
    }

    /// Replaces the output sink.
    pub fn set_output(&mut self, output: impl OutputSink + 'static) {
        self.output = Box::new(output);
    }

    /// The input source.
    pub fn input_mut(&mut self) -> &mut dyn InputSource {
        self.input.as_mut()
    }

    /// Installs an action to run the first time [`run`](Self::run) returns.
    pub fn set_shutdown_hook(&mut self, hook: impl FnOnce(Shutdown) + 'static) {
        self.on_shutdown = Some(Box::new(hook));
    }

    // =========================================================================
    // Registers and owned state
    // =========================================================================

    /// Instruction pointer.
    #[must_use]
    pub fn ip(&self) -> Address {
        self.ip
    }

    /// Sets the instruction pointer.
    pub fn set_ip(&mut self, ip: Address) {
        self.ip = ip;
    }

    /// Next-instruction pointer.
    #[must_use]
    pub fn nip(&self) -> Address {
        self.nip
    }

    /// Sets the next-instruction pointer.
    pub fn set_nip(&mut self, nip: Address) {
        self.nip = nip;
    }

    /// Threaded-code depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sets the threaded-code depth.
    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// The address space.
    #[must_use]
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// Mutable access to the address space.
    pub fn memory_mut(&mut self) -> &mut AddressSpace {
        &mut self.memory
    }

    /// The dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Mutable access to the dictionary.
    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// The parameter stack.
    #[must_use]
    pub fn params(&self) -> &Stack<Value> {
        &self.params
    }

    /// Mutable access to the parameter stack.
    pub fn params_mut(&mut self) -> &mut Stack<Value> {
        &mut self.params
    }

    /// The return stack.
    #[must_use]
    pub fn returns(&self) -> &Stack<Value> {
        &self.returns
    }

    /// Mutable access to the return stack.
    pub fn returns_mut(&mut self) -> &mut Stack<Value> {
        &mut self.returns
    }

    /// The primitive table.
    #[must_use]
    pub fn primitives(&self) -> &PrimitiveTable {
        &self.primitives
    }

    pub(crate) fn primitives_mut(&mut self) -> &mut PrimitiveTable {
        &mut self.primitives
    }

    /// Kernel addresses recorded by bootstrap.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the machine was never bootstrapped.
    pub fn kernel(&self) -> Result<KernelAddresses> {
        self.kernel
            .ok_or_else(|| Error::internal("machine is not bootstrapped"))
    }

    pub(crate) fn set_kernel(&mut self, kernel: KernelAddresses) {
        self.kernel = Some(kernel);
    }

    /// Returns true once bootstrap has completed.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.kernel.is_some()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Executes the cell at IP.
    ///
    /// Errors propagate to the caller with IP left on the faulting cell.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCell` for an empty cell, or whatever the primitive
    /// raised.
    pub fn step(&mut self) -> Result<Status> {
        let at = self.ip;
        let cell = self.memory.get(at).clone();
        if self.config.trace_steps {
            tracing::trace!(ip = at, nip = self.nip, depth = self.depth, %cell, "step");
        }

        match cell {
            Cell::Empty => return Err(self.annotate(Error::unknown_cell(at), at)),
            Cell::NativeOp(id) => {
                let primitive = match self.primitives.get(id) {
                    Ok(p) => *p,
                    Err(err) => return Err(self.annotate(err, at)),
                };
                if let Err(err) = (primitive.func)(self) {
                    self.ip = at;
                    return Err(self.annotate(err, at));
                }
                if primitive.control == ControlFlow::Advance {
                    self.ip = at.wrapping_add(1);
                }
            }
            Cell::ThreadRef(target) => {
                if self.depth > 0 {
                    self.nip = at.wrapping_add(1);
                }
                self.ip = target;
            }
            Cell::Literal(_) => self.ip = at.wrapping_add(1),
        }

        Ok(match self.shutdown.take() {
            Some(reason) => Status::Halted(reason),
            None => Status::Running,
        })
    }

    /// Executes exactly `n` steps.
    ///
    /// Shutdown requests do not stop the count; the most recent one is
    /// reported as `Halted`.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`step`](Self::step).
    pub fn step_n(&mut self, n: usize) -> Result<Status> {
        let mut status = Status::Running;
        for _ in 0..n {
            if let Status::Halted(reason) = self.step()? {
                status = Status::Halted(reason);
            }
        }
        Ok(status)
    }

    /// Steps until shutdown, recovering from every error.
    ///
    /// A recovered error is reported to the output sink (unless disabled),
    /// logged, and recorded; the rest of the current input line is discarded
    /// and execution resumes at `QUIT`. The parameter stack is kept.
    ///
    /// Shutdown leaves IP at a resumable position, so `run` may be called
    /// again after new input is supplied.
    ///
    /// # Errors
    ///
    /// Returns an internal error only if the machine was never bootstrapped.
    pub fn run(&mut self) -> Result<Shutdown> {
        let kernel = self.kernel()?;
        self.shutdown = None;

        let mut steps: u64 = 0;
        let reason = loop {
            if self.config.step_limit.is_some_and(|limit| steps >= limit) {
                break Shutdown::StepLimit;
            }
            steps += 1;
            match self.step() {
                Ok(Status::Running) => {}
                Ok(Status::Halted(reason)) => break reason,
                Err(err) => self.recover(err, kernel.quit),
            }
        };

        tracing::info!(%reason, steps, "machine halted");
        if let Some(hook) = self.on_shutdown.take() {
            hook(reason);
        }
        if let Err(err) = self.output.flush() {
            tracing::error!(error = %err, "failed to flush output");
        }
        Ok(reason)
    }

    /// Runs `source` to completion through the outer interpreter.
    ///
    /// # Errors
    ///
    /// Returns an internal error only if the machine was never bootstrapped.
    pub fn run_source(&mut self, source: &str) -> Result<Shutdown> {
        self.set_input(StringInput::new(source));
        self.run()
    }

    /// Signals that `run` should return after the current step.
    pub fn request_shutdown(&mut self, reason: Shutdown) {
        self.shutdown = Some(reason);
    }

    /// Errors recovered by `run`, oldest first.
    #[must_use]
    pub fn recovered_errors(&self) -> &[Error] {
        &self.recovered
    }

    /// Takes the recovered-error log.
    pub fn take_recovered_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.recovered)
    }

    fn recover(&mut self, err: Error, quit: Address) {
        tracing::warn!(error = %err, ip = self.ip, "recovered from error");
        if self.config.report_errors {
            let report = render_report(&err);
            if let Err(io) = self.output.write_str(&report) {
                tracing::error!(error = %io, "failed to report error");
            }
        }
        self.input.discard_line();
        self.recovered.push(err);
        self.ip = quit;
    }

    fn annotate(&self, err: Error, at: Address) -> Error {
        if err.context.is_some() {
            return err;
        }
        let mut context = ErrorContext::new().with_address(at);
        if let Some((_, word)) = self.dictionary.containing(at) {
            context = context.with_word(word);
        }
        for frame in self.backtrace() {
            context = context.with_frame(frame);
        }
        err.with_context(context)
    }

    /// Names of the calling words, innermost first, rebuilt from NIP and the
    /// return stack.
    #[must_use]
    pub fn backtrace(&self) -> Vec<String> {
        let links = self.returns.iter().rev().filter_map(Value::as_int);
        std::iter::once(self.nip)
            .filter(|_| self.depth > 0)
            .chain(links)
            .filter(|addr| !self.in_outer_loop(*addr))
            .filter_map(|addr| self.dictionary.containing(addr).map(|(_, w)| w.to_string()))
            .collect()
    }

    fn in_outer_loop(&self, addr: Address) -> bool {
        self.kernel
            .is_some_and(|k| (k.outer_loop..k.outer_loop + 3).contains(&addr))
    }

    // =========================================================================
    // Subroutine linkage
    // =========================================================================

    /// Enters a called body: saves NIP on the return stack and deepens.
    pub fn enter(&mut self) {
        self.returns.push(Value::Int(self.nip));
        self.depth += 1;
    }

    /// Leaves a called body: restores NIP from the return stack and jumps
    /// there.
    ///
    /// # Errors
    ///
    /// Returns `UnbalancedReturn` if the return stack is empty, `InvalidDepth`
    /// if depth is already zero, or `TypeMismatch` if the saved link is not an
    /// address. State is unchanged on failure.
    pub fn exit(&mut self) -> Result<()> {
        let link = match self.returns.peek() {
            Err(_) => return Err(Error::new(ErrorKind::UnbalancedReturn)),
            Ok(link) => link,
        };
        if self.depth == 0 {
            return Err(Error::new(ErrorKind::InvalidDepth));
        }
        let target = link
            .as_int()
            .ok_or_else(|| Error::type_mismatch(Type::Int, link.value_type()))?;
        self.returns.pop()?;
        self.depth -= 1;
        self.nip = target;
        self.ip = target;
        Ok(())
    }

    /// `QUIT`: clears the return stack, enters interpret mode, and resumes the
    /// outer interpreter thread.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the machine was never bootstrapped.
    pub fn reset_to_outer_loop(&mut self) -> Result<()> {
        let kernel = self.kernel()?;
        self.returns.clear();
        self.depth = 1;
        self.set_mode(Mode::Interpret);
        self.ip = kernel.outer_loop;
        Ok(())
    }

    // =========================================================================
    // Parameter stack helpers
    // =========================================================================

    /// Pushes onto the parameter stack.
    pub fn push(&mut self, value: Value) {
        self.params.push(value);
    }

    /// Pops the parameter stack.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<Value> {
        self.params.pop()
    }

    /// Top of the parameter stack.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek(&self) -> Result<&Value> {
        self.params.peek()
    }

    /// The value `n` below the top (0 is the top).
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack holds `n` or fewer values.
    pub fn pick(&self, n: usize) -> Result<&Value> {
        self.require(n + 1)?;
        self.params.item(self.params.len() - 1 - n)
    }

    /// Fails unless at least `n` values are on the parameter stack.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow`.
    pub fn require(&self, n: usize) -> Result<()> {
        if self.params.len() < n {
            Err(Error::stack_underflow(StackKind::Parameter))
        } else {
            Ok(())
        }
    }

    /// Top of the parameter stack as an integer.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` or `TypeMismatch`.
    pub fn peek_int(&self) -> Result<i64> {
        let value = self.params.peek()?;
        value
            .as_int()
            .ok_or_else(|| Error::type_mismatch(Type::Int, value.value_type()))
    }

    /// Pops an integer. The stack is unchanged if the top is not one.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` or `TypeMismatch`.
    pub fn pop_int(&mut self) -> Result<i64> {
        let n = self.peek_int()?;
        self.params.pop()?;
        Ok(n)
    }

    // =========================================================================
    // Memory helpers
    // =========================================================================

    /// Reads a cell as data: a literal's payload or a thread reference's
    /// target.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCell` for empty and native cells.
    pub fn fetch(&self, address: Address) -> Result<Value> {
        self.memory
            .get(address)
            .to_value()
            .ok_or_else(|| Error::unknown_cell(address))
    }

    /// Writes a literal cell.
    pub fn store(&mut self, address: Address, value: Value) {
        self.memory.set(address, Cell::Literal(value));
    }

    /// Appends a cell at `HERE` and advances `HERE`. Returns the address
    /// written.
    ///
    /// # Errors
    ///
    /// Fails if `HERE` does not hold an integer.
    pub fn compile(&mut self, cell: Cell) -> Result<Address> {
        let here = self.here()?;
        let next = here
            .checked_add(1)
            .ok_or_else(|| Error::internal("address space exhausted"))?;
        self.memory.set(here, cell);
        self.set_variable(Variable::Here, next);
        Ok(here)
    }

    /// The literal payload of an inline operand cell.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedLiteral` if the cell is not a literal.
    pub fn inline_literal(&self, address: Address) -> Result<Value> {
        self.memory
            .get(address)
            .as_literal()
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::ExpectedLiteral(address)))
    }

    /// An inline branch offset.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedLiteral` or `TypeMismatch`.
    pub fn inline_offset(&self, address: Address) -> Result<i64> {
        let value = self.inline_literal(address)?;
        value
            .as_int()
            .ok_or_else(|| Error::type_mismatch(Type::Int, value.value_type()))
    }

    // =========================================================================
    // Fixed variables
    // =========================================================================

    /// Reads a fixed variable.
    ///
    /// # Errors
    ///
    /// Fails if the slot was overwritten with a non-integer.
    pub fn variable(&self, variable: Variable) -> Result<i64> {
        let address = variable.address();
        match self.memory.get(address) {
            Cell::Literal(Value::Int(n)) => Ok(*n),
            Cell::Literal(other) => Err(Error::type_mismatch(Type::Int, other.value_type())),
            _ => Err(Error::unknown_cell(address)),
        }
    }

    /// Writes a fixed variable.
    pub fn set_variable(&mut self, variable: Variable, value: i64) {
        self.memory
            .set(variable.address(), Cell::Literal(Value::Int(value)));
    }

    /// `HERE`.
    ///
    /// # Errors
    ///
    /// See [`variable`](Self::variable).
    pub fn here(&self) -> Result<Address> {
        self.variable(Variable::Here)
    }

    /// `LATEST`.
    ///
    /// # Errors
    ///
    /// See [`variable`](Self::variable).
    pub fn latest(&self) -> Result<Address> {
        self.variable(Variable::Latest)
    }

    /// Interpreter mode decoded from `STATE`.
    ///
    /// # Errors
    ///
    /// See [`variable`](Self::variable).
    pub fn mode(&self) -> Result<Mode> {
        self.variable(Variable::State).map(Mode::from_state)
    }

    /// Writes `STATE`.
    pub fn set_mode(&mut self, mode: Mode) {
        self.set_variable(Variable::State, mode.to_state());
    }

    /// `BASE` as a radix.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBase` if `BASE` is outside `2..=36`.
    pub fn base(&self) -> Result<u32> {
        let base = self.variable(Variable::Base)?;
        u32::try_from(base)
            .ok()
            .filter(|b| (MIN_BASE..=MAX_BASE).contains(b))
            .ok_or_else(|| Error::new(ErrorKind::InvalidBase(base)))
    }

    // =========================================================================
    // Input and output
    // =========================================================================

    /// Reads the next input token.
    ///
    /// # Errors
    ///
    /// Returns `EndOfInput` if the input is exhausted.
    pub fn read_token(&mut self) -> Result<String> {
        self.input
            .next_token()
            .ok_or_else(|| Error::new(ErrorKind::EndOfInput))
    }

    /// Writes text to the output sink.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the sink fails.
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_str(text)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Captures memory and dictionary.
    #[must_use]
    pub fn snapshot(&self) -> Image {
        Image {
            memory: self.memory.clone(),
            dictionary: self.dictionary.clone(),
        }
    }

    /// Reinstates a snapshot, clears both stacks and positions IP at `QUIT`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the machine was never bootstrapped.
    pub fn restore(&mut self, image: &Image) -> Result<()> {
        let kernel = self.kernel()?;
        self.memory = image.memory.clone();
        self.dictionary = image.dictionary.clone();
        self.params.clear();
        self.returns.clear();
        self.depth = 0;
        self.nip = 0;
        self.ip = kernel.quit;
        self.shutdown = None;
        tracing::debug!(cells = self.memory.len(), "restored image");
        Ok(())
    }
}

fn render_report(err: &Error) -> String {
    let mut report = format!("error: {err}\n");
    if let Some(context) = err.context.as_ref().filter(|c| !c.frames.is_empty()) {
        report.push_str(&format!("  {context}\n"));
    }
    report
}
