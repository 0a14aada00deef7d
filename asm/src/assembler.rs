use crate::error::Error;
use crate::image::Image;
use crate::label::{Pendings, Symbols};
use crate::parser::{Item, Line, Operand};
use arch::op::OpKind;

/// Assembly session: every counter and table the classifier and
/// backpatcher touch, threaded explicitly through each line.
#[derive(Debug)]
pub struct Assembler {
    image: Image,
    symbols: Symbols,
    pendings: Pendings,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            image: Image::new(),
            symbols: Symbols::new(),
            pendings: Pendings::new(),
        }
    }

    /// Apply one parsed line to the session, in token order.
    pub fn assemble(&mut self, line: &Line) -> Result<(), Error> {
        for item in &line.items {
            self.apply(item, line.num)?;
        }
        Ok(())
    }

    fn apply(&mut self, item: &Item, line: usize) -> Result<(), Error> {
        match item {
            Item::Def(label) => {
                if self.symbols.contains(label) {
                    return Err(Error::DuplicateLabel {
                        label: label.clone(),
                        line,
                    });
                }
                self.symbols.insert(label.clone(), self.image.address());
                Ok(())
            }
            Item::Op(op) => match op {
                // SPACE holds a zero placeholder; CONST's literal emits on
                // its own
                OpKind::SPACE => self.image.emit(0, line),
                OpKind::CONST => Ok(()),
                _ => self.image.emit(op.code() as i32, line),
            },
            Item::Operand(Operand::Direct(label)) => self.operand(label, 0, line),
            Item::Operand(Operand::Offset(label, offset)) => self.operand(label, *offset, line),
            Item::Operand(Operand::Immediate(value)) => self.image.emit(*value, line),
            Item::Operand(Operand::Reserve(count)) => self.image.reserve(*count, line),
        }
    }

    /// Emit an address operand: resolved immediately when the label is
    /// already bound, otherwise recorded as a pending reference at the
    /// cursor with a zero placeholder in the cell.
    fn operand(&mut self, label: &str, offset: i32, line: usize) -> Result<(), Error> {
        match self.symbols.get(label) {
            Some(address) => self.image.emit(address as i32 + offset, line),
            None => {
                self.pendings.add(label, self.image.position(), offset);
                self.image.emit(0, line)
            }
        }
    }

    /// Backpatch every pending reference. Runs exactly once, after the
    /// whole source has been assembled, so late definitions are known.
    pub fn resolve(&mut self) -> Result<(), Error> {
        for (label, slots) in self.pendings.take() {
            let base = match self.symbols.get(&label) {
                Some(address) => address as i32,
                None => return Err(Error::UndefinedLabel { label }),
            };
            for slot in slots {
                self.image.patch(slot.position, base + slot.offset);
            }
        }
        Ok(())
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn pendings(&self) -> &Pendings {
        &self.pendings
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Unresolved diagnostic view: each pending label's slots rendered as a
    /// chain linking back to the previous use, `-1` at the chain head.
    pub fn raw_view(&self) -> Vec<i32> {
        let mut cells = self.image.cells().to_vec();
        for (_, slots) in self.pendings.iter() {
            let mut previous = -1;
            for slot in slots {
                cells[slot.position] = previous;
                previous = slot.position as i32;
            }
        }
        cells.truncate(self.image.words());
        cells
    }

    /// The final memory image; meaningful after `resolve`.
    pub fn words(&self) -> &[i32] {
        self.image.emitted()
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
