use clap::{Arg, Command};
use lox::{print, Chunk, CompileError, InterpretError, RuntimeError, VM};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::fs;
use std::process::ExitCode;

const COMPILE_ERROR: u8 = 65;
const RUNTIME_ERROR: u8 = 70;
const IO_ERROR: u8 = 74;

fn print_compile_errors(filename: &str, source: &str, errors: &[CompileError]) {
  for error in errors {
    print::compile_error(filename, source, error);
  }
}

fn print_runtime_error(filename: &str, source: &str, error: &RuntimeError) {
  print::runtime_error(filename, source, error);
}

fn repl() {
  let mut rl = Editor::<()>::new();
  let mut vm = VM::new();

  loop {
    let readline = rl.readline("> ");
    match readline {
      Ok(line) => {
        rl.add_history_entry(&line);

        match vm.interpret(&line) {
          Ok(_) => {}
          Err(InterpretError::Compile(errors)) => print_compile_errors("REPL", &line, &errors),
          Err(InterpretError::Runtime(error)) => print_runtime_error("REPL", &line, &error),
        }
      }
      Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
        break;
      }
      Err(err) => {
        print::error_message(&format!("{:?}", err));
        break;
      }
    }
  }
}

fn compile(vm: &mut VM, filename: &str, source: &str) -> Result<Chunk, ExitCode> {
  vm.compile(source).map_err(|errors| {
    print_compile_errors(filename, source, &errors);
    ExitCode::from(COMPILE_ERROR)
  })
}

fn main() -> ExitCode {
  let version = env!("CARGO_PKG_VERSION");
  let app = Command::new("lox")
    .version(version)
    .about("A bytecode interpreter for Lox")
    .subcommand(
      Command::new("run")
        .about("Execute a Lox program")
        .arg(Arg::new("file").help("The file to run").required(true)),
    )
    .subcommand(
      Command::new("tokens")
        .about("Display the tokens scanned from a file")
        .arg(Arg::new("file").help("The file to scan").required(true)),
    )
    .subcommand(
      Command::new("bytecode")
        .about("Display the bytecode compiled from a file")
        .arg(Arg::new("file").help("The file to compile").required(true)),
    )
    .get_matches();

  let Some((command, subcommand)) = app.subcommand() else {
    println!("Lox (v{})", version);
    repl();
    return ExitCode::SUCCESS;
  };

  let Some(filename) = subcommand.get_one::<String>("file") else {
    print::error_message("No file given");
    return ExitCode::from(IO_ERROR);
  };

  let source = match fs::read_to_string(filename) {
    Ok(source) => source,
    Err(error) => {
      print::error_message(&format!("Problem reading file '{}': {}", filename, error));
      return ExitCode::from(IO_ERROR);
    }
  };

  let mut vm = VM::new();
  match command {
    "run" => {
      let chunk = match compile(&mut vm, filename, &source) {
        Ok(chunk) => chunk,
        Err(code) => return code,
      };

      if let Err(error) = vm.run(&chunk) {
        print_runtime_error(filename, &source, &error);
        return ExitCode::from(RUNTIME_ERROR);
      }
    }
    "tokens" => print::tokens(&source),
    "bytecode" => match compile(&mut vm, filename, &source) {
      Ok(chunk) => print::chunk(&chunk, vm.heap(), filename),
      Err(code) => return code,
    },
    _ => unreachable!(),
  }

  ExitCode::SUCCESS
}
