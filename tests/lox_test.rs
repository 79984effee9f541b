pub use lox;
pub use lox::{InterpretError, Value, VM};

#[derive(Debug, PartialEq)]
pub enum RunResult {
  Success,
  RuntimeError,
  CompileError,
}

pub fn interpret(source: &str) -> (Result<(), InterpretError>, VM<Vec<u8>>) {
  let mut vm = VM::with_output(Vec::new());
  let result = vm.interpret(source);

  (result, vm)
}

pub fn run(source: &str) -> (RunResult, VM<Vec<u8>>) {
  let (result, vm) = interpret(source);

  let result = match result {
    Ok(()) => RunResult::Success,
    Err(InterpretError::Runtime(_)) => RunResult::RuntimeError,
    Err(InterpretError::Compile(_)) => RunResult::CompileError,
  };

  (result, vm)
}

pub fn output(vm: &VM<Vec<u8>>) -> String {
  String::from_utf8_lossy(vm.output()).into_owned()
}

pub fn global(vm: &VM<Vec<u8>>, name: &str) -> Option<String> {
  vm.get_global(name)
    .map(|value| value.display(vm.heap()).to_string())
}

#[macro_export]
macro_rules! lox_test {
  ($name:ident $code:literal $( $var:ident == $expected:literal)*) => {
    #[test]
    fn $name(){
      let (result, _vm) = run($code);
      assert_eq!(result, RunResult::Success);

      $(
        {
          let variable = global(&_vm, stringify!($var));
          let expected = ($expected).to_string();
          assert_eq!(
            variable.as_ref(),
            Some(&expected),
            "Expected Variable {} to equal {} but recieved {:?}",
            stringify!($var),
            expected,
            variable
          );
        };
      )*
    }
  };

  ($name:ident $code:literal prints [ $( $line:literal ),* $(,)? ]) => {
    #[test]
    fn $name(){
      let (result, vm) = run($code);
      assert_eq!(result, RunResult::Success);

      let expected: Vec<String> = vec![$( $line.to_string() ),*];
      let printed: Vec<String> = output(&vm).lines().map(String::from).collect();
      assert_eq!(printed, expected);
    }
  };

  ($name:ident $code:literal RuntimeError) => {
    #[test]
    fn $name(){
      let (result, _vm) = run($code);
      assert_eq!(result, RunResult::RuntimeError);
    }
  };

  ($name:ident $code:literal RuntimeError $message:literal) => {
    #[test]
    fn $name(){
      match interpret($code).0 {
        Err(InterpretError::Runtime(error)) => assert_eq!(error.to_string(), $message),
        other => panic!("Expected Runtime Error, recieved {:?}", other),
      }
    }
  };

  ($name:ident $code:literal CompileError) => {
    #[test]
    fn $name(){
      let (result, _vm) = run($code);
      assert_eq!(result, RunResult::CompileError);
    }
  };

  ($name:ident $code:literal CompileError $( $message:literal )+) => {
    #[test]
    fn $name(){
      match interpret($code).0 {
        Err(InterpretError::Compile(errors)) => {
          let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
          assert_eq!(messages, vec![$( $message.to_string() ),+]);
        }
        other => panic!("Expected Compile Error, recieved {:?}", other),
      }
    }
  };
}
