use brewin_diagnostics::format_diagnostic;
use brewin_interpreter::{Error, StdConsole};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "brewin", version, about = "Tree-walking interpreter for the Brewin language")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Execute a Brewin program; it must define a zero-argument `main`.
    Run {
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Parse a program and dump its AST.
    Ast {
        #[arg(required = true)]
        path: PathBuf,
        /// Emit the AST as JSON instead of the debug form.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = Args::parse();
    match args.command {
        Commands::Run { path } => run_file(&path),
        Commands::Ast { path, json } => dump_ast(&path, json),
    }
}

fn read_source(path: &PathBuf) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error reading {}: {}", path.display(), e);
            process::exit(74);
        }
    }
}

fn run_file(path: &PathBuf) {
    let source = read_source(path);
    match brewin_interpreter::run(&source, Box::new(StdConsole)) {
        Ok(()) => {}
        Err(Error::Compile(diagnostics)) => {
            for d in &diagnostics {
                eprint!("{}", format_diagnostic(&source, d));
            }
            process::exit(65);
        }
        Err(Error::Runtime(e)) => {
            eprintln!("{} error: {}", e.kind().label(), e);
            process::exit(70);
        }
    }
}

fn dump_ast(path: &PathBuf, json: bool) {
    let source = read_source(path);
    match brewin_interpreter::parse(&source) {
        Ok(program) => {
            if json {
                match serde_json::to_string_pretty(&program) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("error serializing AST: {}", e);
                        process::exit(70);
                    }
                }
            } else {
                println!("{:#?}", program);
            }
        }
        Err(diagnostics) => {
            for d in &diagnostics {
                eprint!("{}", format_diagnostic(&source, d));
            }
            process::exit(65);
        }
    }
}
