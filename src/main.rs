use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use commandline::{Destination, Operation, Options};
use cpq::{diagnostics::describe_error, il::QuadProgram};

mod commandline;

const SOURCE_EXTENSION: &str = "ou";

fn main() -> Result<()> {
    let options = Options::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(options.verbose)
        .init()?;

    match options.operation {
        Operation::Check { file } => {
            compile_file(&file)?;
            info!("{} is a valid program", file.display());
        }
        Operation::Compile { file, output } => {
            if file.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
                bail!(
                    "expected a source file with the '.{}' extension, got {}",
                    SOURCE_EXTENSION,
                    file.display()
                );
            }

            let program = compile_file(&file)?;
            match output.destination(&file) {
                Destination::Stdout => io::stdout().write_all(program.to_string().as_bytes())?,
                Destination::File(path) => {
                    fs::write(&path, program.to_string())
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
            }
        }
    }

    Ok(())
}

/// Reads and compiles a source file, printing any errors found.
fn compile_file(file: &Path) -> Result<QuadProgram> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    match cpq::compile(&content) {
        Ok(program) => Ok(program),
        Err(errors) => {
            for err in &errors {
                eprintln!("{}", describe_error(err, &content));
            }
            bail!(
                "{} failed to compile due to {} error(s)",
                file.display(),
                errors.len()
            );
        }
    }
}
