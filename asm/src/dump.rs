use crate::assembler::Assembler;
use color_print::cprintln;

/// `label (&address)` per entry, in definition order.
pub fn print_symbols(asm: &Assembler) {
    println!("====================");
    println!("=   Symbol Table   =");
    println!("====================");
    for (label, address) in asm.symbols().iter() {
        cprintln!("<green>{}</> (&{})", label, address);
    }
    println!();
}

/// `label [ pos[+offset] ... ]` per entry, before resolution.
pub fn print_pending(asm: &Assembler) {
    println!("====================");
    println!("=   Pending List   =");
    println!("====================");
    for (label, slots) in asm.pendings().iter() {
        let list = slots
            .iter()
            .map(|slot| {
                if slot.offset > 0 {
                    format!("{}+{}", slot.position, slot.offset)
                } else {
                    format!("{}", slot.position)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        cprintln!("<red>{}</> [ {} ]", label, list);
    }
    println!();
}

/// Unresolved image: pending slots shown as linked chains of prior
/// positions.
pub fn print_raw(asm: &Assembler) {
    println!("====================");
    println!("=    Unresolved    =");
    println!("====================");
    println!("{}", join(&asm.raw_view()));
    println!();
}

/// The resolved memory image, one integer per emitted word.
pub fn print_final(asm: &Assembler) {
    println!("====================");
    println!("=      Final       =");
    println!("====================");
    println!("{}", join(asm.words()));
}

fn join(cells: &[i32]) -> String {
    cells
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
