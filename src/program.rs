//! Programs for the stackvm machine.
//!
//! A program is a fixed list of already-decoded [`Instruction`]s plus a
//! [`LabelTable`] mapping jump targets to instruction indices. Nothing here
//! parses text; an external loader builds these values.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// All instructions the machine understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Push a literal.
    /// Stack: ( -- v )
    Push(i64),

    /// Pop and discard the top of stack.
    /// Stack: ( a -- )
    Pop,

    /// Pop the top of stack and emit it.
    /// Stack: ( a -- )
    Print,

    /// Stack: ( x y -- x+y )
    Add,

    /// Stack: ( x y -- x-y )
    Sub,

    /// Stack: ( x y -- x*y )
    Mul,

    /// Floor division. Fails on a zero divisor.
    /// Stack: ( x y -- x/y )
    Div,

    /// Modulo matching floor division. Fails on a zero divisor.
    /// Stack: ( x y -- x%y )
    Mod,

    /// Transfer control to a named label.
    /// Stack: ( -- )
    Jump(String),

    /// Stop the run.
    /// Stack: ( -- )
    Halt,

    /// Duplicate the top of stack.
    /// Stack: ( a -- a a )
    Dup,
}

impl Instruction {
    /// Get the mnemonic for this instruction.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Push(_) => "PUSH",
            Instruction::Pop => "POP",
            Instruction::Print => "PRINT",
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Mul => "MUL",
            Instruction::Div => "DIV",
            Instruction::Mod => "MOD",
            Instruction::Jump(_) => "JUMP",
            Instruction::Halt => "HALT",
            Instruction::Dup => "DUP",
        }
    }

    /// Whether this instruction sets the instruction pointer itself instead of
    /// falling through to the next one.
    pub fn transfers_control(&self) -> bool {
        matches!(self, Instruction::Jump(_) | Instruction::Halt)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(v) => write!(f, "PUSH {}", v),
            Instruction::Jump(label) => write!(f, "JUMP {}", label),
            other => f.write_str(other.name()),
        }
    }
}

/// Mapping from label names to instruction indices.
///
/// Targets are not validated against any program; a target past the end is
/// only detected when the machine tries to fetch from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    targets: HashMap<String, usize>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `target`, returning the previous target if any.
    pub fn insert(&mut self, name: impl Into<String>, target: usize) -> Option<usize> {
        self.targets.insert(name.into(), target)
    }

    /// Look up the instruction index bound to `name`.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.targets.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            targets: iter
                .into_iter()
                .map(|(name, target)| (name.into(), target))
                .collect(),
        }
    }
}

impl From<HashMap<String, usize>> for LabelTable {
    fn from(targets: HashMap<String, usize>) -> Self {
        Self { targets }
    }
}

/// A decoded program: instructions plus the label table they jump through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub labels: LabelTable,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, labels: LabelTable) -> Self {
        Self {
            instructions,
            labels,
        }
    }

    /// A program with an empty label table.
    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions, LabelTable::new())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "{:4}  {}", index, instruction)?;
        }
        Ok(())
    }
}
