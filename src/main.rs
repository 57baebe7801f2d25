use clap::Parser;
use vccl::{interpreter::Interpreter, Error, ErrorKind};

/// Runs a VCCL program.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Print the compiled statements before running them.
    #[arg(long)]
    dump: bool,

    /// Path to the source file. Multiple words are joined with spaces.
    #[arg(required = true)]
    file: Vec<String>,
}

fn main() {
    let args = Cli::parse();
    init_tracing();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Error> {
    let path = args.file.join(" ");
    let source = std::fs::read_to_string(&path).map_err(ErrorKind::IO)?;
    let program = vccl::parser::program(&source)?;

    if args.dump {
        print!("{program}");
    }

    Interpreter::default().interpret(&program)
}

/// Logging is only enabled when `RUST_LOG` is set, so program output stays
/// untouched by default.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
