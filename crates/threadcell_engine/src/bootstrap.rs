//! One-shot seeding of variables and primitives.
//!
//! Layout after bootstrap:
//!
//! ```text
//! 0..4          HERE STATE BASE LATEST
//! 4, 6, 8, ...  [NativeOp(p), NativeOp(NEXT)] per primitive
//! L, L+1, L+2   ThreadRef(INTERPRET) ThreadRef(BRANCH) Literal(-2)
//! L+3           HERE
//! ```
//!
//! IP is left at `QUIT`, which enters the outer loop at `L`.

use threadcell_foundation::{Address, Error, Result, Value};
use threadcell_storage::{Cell, PrimitiveId};

use crate::kernel::{KERNEL, NEXT};
use crate::machine::{KernelAddresses, Machine};
use crate::primitive::Primitive;
use crate::variables::{FIRST_PRIMITIVE, Variable};

/// Builder for the bootstrap step.
#[derive(Clone, Debug, Default)]
pub struct Bootstrap {
    libraries: Vec<&'static [Primitive]>,
}

impl Bootstrap {
    /// A bootstrap that installs only the kernel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primitive table, installed after the kernel and any earlier
    /// libraries.
    #[must_use]
    pub fn with_library(mut self, library: &'static [Primitive]) -> Self {
        self.libraries.push(library);
        self
    }

    /// Installs everything into `machine`.
    ///
    /// # Errors
    ///
    /// Fails if `machine` was already bootstrapped, or if the kernel is
    /// missing a word the engine depends on.
    pub fn install(self, machine: &mut Machine) -> Result<()> {
        if machine.is_bootstrapped() {
            return Err(Error::internal("machine is already bootstrapped"));
        }

        for variable in Variable::ALL {
            machine.store(variable.address(), Value::Int(variable.initial()));
        }

        let mut installer = Installer::new(machine)?;
        installer.install(KERNEL)?;
        let mut kernel = installer.kernel_addresses()?;
        for library in &self.libraries {
            installer.install(library)?;
        }

        let Installer {
            machine,
            next: mut here,
            latest,
            ..
        } = installer;

        kernel.outer_loop = here;
        machine.memory_mut().set(here, Cell::ThreadRef(kernel.interpret));
        machine.memory_mut().set(here + 1, Cell::ThreadRef(kernel.branch));
        machine.memory_mut().set(here + 2, Cell::Literal(Value::Int(-2)));
        here += 3;

        machine.set_variable(Variable::Here, here);
        machine.set_variable(Variable::Latest, latest);
        machine.set_kernel(kernel);
        machine.set_ip(kernel.quit);
        machine.set_nip(0);
        machine.set_depth(0);

        tracing::debug!(
            primitives = machine.primitives().len(),
            here,
            latest,
            "bootstrap complete"
        );
        Ok(())
    }
}

struct Installer<'m> {
    machine: &'m mut Machine,
    trampoline: PrimitiveId,
    next: Address,
    latest: Address,
}

impl<'m> Installer<'m> {
    fn new(machine: &'m mut Machine) -> Result<Self> {
        let trampoline = KERNEL
            .iter()
            .find(|p| p.name == NEXT)
            .copied()
            .ok_or_else(|| Error::lookup_failure(NEXT))?;
        let trampoline = machine.primitives_mut().register(trampoline)?;
        Ok(Self {
            machine,
            trampoline,
            next: FIRST_PRIMITIVE,
            latest: FIRST_PRIMITIVE,
        })
    }

    fn install(&mut self, table: &[Primitive]) -> Result<()> {
        for primitive in table {
            let id = if primitive.name == NEXT {
                self.trampoline
            } else {
                self.machine.primitives_mut().register(*primitive)?
            };
            let address = self.next;
            let memory = self.machine.memory_mut();
            memory.set(address, Cell::NativeOp(id));
            memory.set(address + 1, Cell::NativeOp(self.trampoline));
            self.machine.dictionary_mut().define(
                primitive.name,
                address,
                primitive.immediate,
                primitive.hidden,
            );
            self.latest = address;
            self.next = address + 2;
        }
        Ok(())
    }

    fn address_of(&self, name: &str) -> Result<Address> {
        self.machine
            .dictionary()
            .resolve_by_name(name)
            .map(|e| e.address)
            .ok_or_else(|| Error::lookup_failure(name))
    }

    fn primitive_of(&self, name: &str) -> Result<PrimitiveId> {
        self.machine
            .primitives()
            .find(name)
            .ok_or_else(|| Error::lookup_failure(name))
    }

    fn kernel_addresses(&self) -> Result<KernelAddresses> {
        Ok(KernelAddresses {
            docol: self.primitive_of("DOCOL")?,
            dovar: self.primitive_of("(DOVAR)")?,
            docon: self.primitive_of("(DOCON)")?,
            lit: self.address_of("LIT")?,
            exit: self.address_of("EXIT")?,
            branch: self.address_of("BRANCH")?,
            zero_branch: self.address_of("0BRANCH")?,
            type_word: self.address_of("TYPE")?,
            interpret: self.address_of("INTERPRET")?,
            quit: self.address_of("QUIT")?,
            outer_loop: 0,
        })
    }
}
