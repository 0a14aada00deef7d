use crate::error::Error;
use arch::MEM_SIZE;

/// The fixed-capacity output image plus its counters: the write cursor,
/// the logical address counter, and the emitted-word counter. Cursor and
/// address diverge only across `SPACE n` reservations.
#[derive(Debug)]
pub struct Image {
    cells: Vec<i32>,
    position: usize,
    address: usize,
    words: usize,
}

impl Image {
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEM_SIZE],
            position: 0,
            address: 0,
            words: 0,
        }
    }

    /// Next free cell.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current logical memory address.
    pub fn address(&self) -> usize {
        self.address
    }

    /// Cells semantically emitted so far.
    pub fn words(&self) -> usize {
        self.words
    }

    /// Write one word at the cursor, advancing cursor, address counter and
    /// word count together.
    pub fn emit(&mut self, value: i32, line: usize) -> Result<(), Error> {
        if self.position >= MEM_SIZE || self.address >= MEM_SIZE {
            return Err(Error::AddressSpaceExhausted { line });
        }
        self.cells[self.position] = value;
        self.position += 1;
        self.address += 1;
        self.words += 1;
        Ok(())
    }

    /// Advance the address counter without writing a cell or counting a
    /// word: the `SPACE n` reservation.
    pub fn reserve(&mut self, count: i32, line: usize) -> Result<(), Error> {
        let count = count as usize;
        if self.address + count > MEM_SIZE {
            return Err(Error::AddressSpaceExhausted { line });
        }
        self.address += count;
        Ok(())
    }

    /// Backpatch a previously emitted slot.
    pub fn patch(&mut self, position: usize, value: i32) {
        self.cells[position] = value;
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// The emitted prefix of the image.
    pub fn emitted(&self) -> &[i32] {
        &self.cells[..self.words]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_advance_together_on_emit() {
        let mut image = Image::new();
        image.emit(14, 1).unwrap();
        image.emit(7, 2).unwrap();
        assert_eq!(image.position(), 2);
        assert_eq!(image.address(), 2);
        assert_eq!(image.words(), 2);
        assert_eq!(image.emitted(), &[14, 7]);
    }

    #[test]
    fn reserve_diverges_address_only() {
        let mut image = Image::new();
        image.emit(0, 1).unwrap();
        image.reserve(5, 1).unwrap();
        assert_eq!(image.position(), 1);
        assert_eq!(image.address(), 6);
        assert_eq!(image.words(), 1);
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut image = Image::new();
        image.reserve(MEM_SIZE as i32, 1).unwrap();
        assert!(matches!(
            image.emit(1, 2),
            Err(Error::AddressSpaceExhausted { line: 2 })
        ));
        assert!(matches!(
            image.reserve(1, 3),
            Err(Error::AddressSpaceExhausted { line: 3 })
        ));
    }
}
