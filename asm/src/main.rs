use clap::Parser;
use samasm::{
    pre_path, print_final, print_pending, print_raw, print_symbols, Assembler, Error, Line,
    Preprocessor,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.sam")]
    input: PathBuf,

    /// Output view
    #[clap(short, long, value_enum, default_value = "final")]
    show: Show,

    /// Dump the expanded source
    #[clap(short, long)]
    dump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
enum Show {
    All,
    Symbols,
    Pending,
    Raw,
    Final,
}

fn main() {
    let args = Args::parse();
    println!("SAM Assembler");

    println!("1. Preprocess: expand macros");
    println!("  < {}", args.input.display());
    let raw = match read_lines(&args.input) {
        Ok(lines) => lines,
        Err(e) => fail(&e, &args.input, &[]),
    };
    let mut pre = Preprocessor::new();
    let expanded = match pre.process(&raw) {
        Ok(lines) => lines,
        Err(e) => fail(&e, &args.input, &raw),
    };
    let pre_file = pre_path(&args.input);
    if let Err(e) = write_lines(&pre_file, &expanded) {
        fail(&e, &pre_file, &[]);
    }
    println!("  > {}", pre_file.display());
    if args.dump {
        for line in &expanded {
            println!("  | {}", line);
        }
    }

    println!("2. Assemble: classify and emit");
    let mut asm = Assembler::new();
    for (idx, raw_line) in expanded.iter().enumerate() {
        match Line::parse(idx + 1, raw_line) {
            Ok(Some(line)) => {
                if let Err(e) = asm.assemble(&line) {
                    fail(&e, &pre_file, &expanded);
                }
            }
            Ok(None) => {}
            Err(e) => fail(&e, &pre_file, &expanded),
        }
    }

    if matches!(args.show, Show::All | Show::Symbols) {
        print_symbols(&asm);
    }
    if matches!(args.show, Show::All | Show::Pending) {
        print_pending(&asm);
    }
    if matches!(args.show, Show::All | Show::Raw) {
        print_raw(&asm);
    }

    println!("3. Resolve pending references");
    if let Err(e) = asm.resolve() {
        fail(&e, &pre_file, &expanded);
    }

    if matches!(args.show, Show::All | Show::Final) {
        print_final(&asm);
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    let file = File::open(path).map_err(|e| Error::FileOpen(path.display().to_string(), e))?;
    BufReader::new(file)
        .lines()
        .map(|line| line.map_err(Error::FileRead))
        .collect()
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
    let mut file =
        File::create(path).map_err(|e| Error::FileCreate(path.display().to_string(), e))?;
    for line in lines {
        writeln!(file, "{}", line).map_err(|e| Error::FileWrite(path.display().to_string(), e))?;
    }
    Ok(())
}

fn fail(err: &Error, path: &Path, lines: &[String]) -> ! {
    err.diag(&path.display().to_string(), lines);
    std::process::exit(1);
}
