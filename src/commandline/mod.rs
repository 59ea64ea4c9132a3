use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "A compiler from CPL to quad code", version)]
pub struct Options {
    #[command(subcommand)]
    pub operation: Operation,
    /// Log verbosity: 0 shows errors only, each step up adds a level of detail
    #[arg(short, long, default_value_t = 1)]
    pub verbose: usize,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Check a program for errors
    Check { file: PathBuf },
    /// Compile a program to quad code
    Compile {
        /// The source file, which must have the `.ou` extension
        file: PathBuf,
        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Write the quad code here instead of next to the source file
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,
    /// Write the quad code to standard output
    #[arg(long)]
    stdout: bool,
}

/// Where the compiled program should go.
#[derive(Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl OutputOptions {
    /// Resolves the destination for a given source file. By default, the output is written
    /// next to the source, with the `.qud` extension.
    pub fn destination(&self, source: &std::path::Path) -> Destination {
        if self.stdout {
            Destination::Stdout
        } else {
            Destination::File(
                self.output
                    .clone()
                    .unwrap_or_else(|| source.with_extension("qud")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn parse_args(args: &[&str]) -> Options {
        Options::try_parse_from(args).unwrap()
    }

    #[test]
    fn output_defaults_to_qud_next_to_source() {
        let options = parse_args(&["cpq", "compile", "dir/prog.ou"]);
        let Operation::Compile { file, output } = options.operation else {
            panic!("expected compile");
        };

        assert_eq!(
            Destination::File(PathBuf::from("dir/prog.qud")),
            output.destination(&file)
        );
        assert_eq!(1, options.verbose);
    }

    #[test]
    fn output_can_be_redirected() {
        let options = parse_args(&["cpq", "-v", "3", "compile", "prog.ou", "-o", "out.txt"]);
        let Operation::Compile { output, .. } = options.operation else {
            panic!("expected compile");
        };

        assert_eq!(
            Destination::File(PathBuf::from("out.txt")),
            output.destination(Path::new("prog.ou"))
        );
        assert_eq!(3, options.verbose);
    }

    #[test]
    fn stdout_and_output_conflict() {
        assert!(Options::try_parse_from(["cpq", "compile", "a.ou", "--stdout", "-o", "b"]).is_err());

        let options = parse_args(&["cpq", "compile", "a.ou", "--stdout"]);
        let Operation::Compile { output, .. } = options.operation else {
            panic!("expected compile");
        };
        assert_eq!(Destination::Stdout, output.destination(Path::new("a.ou")));
    }

    #[test]
    fn check_takes_a_file() {
        let options = parse_args(&["cpq", "check", "prog.ou"]);
        assert!(matches!(options.operation, Operation::Check { file } if file == Path::new("prog.ou")));
    }
}
