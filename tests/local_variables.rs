mod lox_test;
use lox_test::*;

lox_test!(can_assign_local_variables
"
var global;
{
  var local = 7;
  global = local;
}
"
  global == 7.0
);

lox_test!(can_use_local_variables
"
var global;
{
  var a = 2;
  var b = 3;
  var c = a + b;
  global = c / 2;
}
"
  global == 2.5
);

lox_test!(shadows_higher_scopes
"
{
  var a = 1;
  {
    var a = 2;
    print a;
  }
  print a;
}
"
  prints ["2", "1"]
);

lox_test!(shadows_globals
"
var a = \"global\";
{
  var a = \"local\";
  print a;
}
print a;
"
  prints ["local", "global"]
);

lox_test!(define_variables_twice
"
{
  var hello = 0;
  var hello = 1;
}
"
  CompileError "[line 4] Error at 'hello': Already a variable with this name in this scope."
);

lox_test!(redeclare_global
"
var a = 1;
var a = 2;
"
  a == 2.0
);

lox_test!(read_in_own_initializer
"
var a = 1;
{
  var a = a;
}
"
  CompileError "[line 4] Error at 'a': Can't read local variable in its own initializer."
);

lox_test!(initialised_to_nil
"
var global = 1;
{
  var local;
  global = local;
}
"
  global == "nil"
);

lox_test!(locals_are_gone_after_block
"
{
  var inner = 1;
}
print inner;
"
  RuntimeError "Undefined variable 'inner'.\n[line 5] in script"
);

lox_test!(assignment_is_right_associative
"
var a;
var b;
{
  var c;
  a = b = c = 3;
}
"
  a == 3.0
  b == 3.0
);

lox_test!(invalid_assignment_target
"
var a = 1;
var b = 2;
a + b = 3;
"
  CompileError "[line 4] Error at '=': Invalid assignment target."
);
