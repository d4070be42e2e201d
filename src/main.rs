use stackc::ast::printer::program_to_string;
use stackc::vm::Vm;
use stackc::{CompileError, DEFAULT_ENTRY, DEFAULT_MODULE_NAME, lexer, parser};

use anyhow::Context;
use ariadne::Source;
use clap::Parser;
use tracing::{Level, info};
use yansi::Paint;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Compiler from the minimal imperative language to stack machine listings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to compile
    input: PathBuf,

    /// Where to write the compiled listing
    #[arg(short, long, default_value = "Main.sasm")]
    output: PathBuf,

    /// Run the entry function after compiling
    #[arg(long)]
    run: bool,

    /// Function to run with --run
    #[arg(long, default_value = DEFAULT_ENTRY)]
    entry: String,

    /// Print the parsed program instead of compiling it
    #[arg(long)]
    emit_ast: bool,

    /// Log every compilation stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let file = args.input.display().to_string();
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", file))?;

    if args.emit_ast {
        return match parser::parse(lexer::tokenize(&source)) {
            Ok(program) => {
                println!("{}", program_to_string(&program));
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => fail(error.into(), &file, &source),
        };
    }

    let module = match stackc::compile(&source, DEFAULT_MODULE_NAME) {
        Ok(module) => module,
        Err(error) => return fail(error, &file, &source),
    };

    module
        .write_to_file(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "wrote module");
    println!(
        "{} {} -> {}",
        "Compiled".green().bold(),
        file,
        args.output.display()
    );

    if args.run {
        let mut vm = Vm::new(&module);
        if let Some(value) = vm.run(&args.entry)? {
            println!("{} {}", "Returned".green().bold(), value);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn fail(error: CompileError, file: &str, source: &str) -> anyhow::Result<ExitCode> {
    error
        .report(file, source)
        .eprint((file.to_string(), Source::from(source)))?;
    Ok(ExitCode::FAILURE)
}
