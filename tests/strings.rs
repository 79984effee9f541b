mod lox_test;
use lox_test::*;

lox_test!(concatenation
"
var a = \"hello\" + \" \" + \"world\";
var b = \"\" + \"\";
"
  a == "hello world"
  b == ""
);

lox_test!(string_equality
"
var a = \"foo\" == \"foo\";
var b = \"fo\" + \"o\" == \"foo\";
var c = \"foo\" == \"bar\";
var d = \"\" == \"\";
"
  a == true
  b == true
  c == false
  d == true
);

lox_test!(strings_are_truthy
"
var a = !\"\";
var b;
if (\"\") b = 1; else b = 2;
"
  a == false
  b == 1.0
);

lox_test!(multiline_strings
"
var a = \"one
two\";
print a;
print nil + a;
"
  RuntimeError "Operands must be two numbers or two strings.\n[line 5] in script"
);

lox_test!(add_string_and_number
"
print \"a\" + 1;
"
  RuntimeError "Operands must be two numbers or two strings.\n[line 2] in script"
);

lox_test!(unterminated_string
"
print \"never closed;
"
  CompileError "[line 3] Error: Unterminated string."
);

#[test]
fn equal_strings_share_one_object() {
  let (result, vm) = run("var a = \"foo\"; var b = \"foo\"; var c = \"fo\" + \"o\";");
  assert_eq!(result, RunResult::Success);

  let a = vm.get_global("a");
  assert!(a.is_some());
  assert_eq!(a, vm.get_global("b"));
  assert_eq!(a, vm.get_global("c"));

  // "foo", "fo", "o" and the three variable names
  assert_eq!(vm.heap().len(), 6);
}

#[test]
fn print_renders_strings_raw() {
  let (result, vm) = run("print \"quote\"; print \"a\" + \"b\";");
  assert_eq!(result, RunResult::Success);
  assert_eq!(output(&vm), "quote\nab\n");
}
