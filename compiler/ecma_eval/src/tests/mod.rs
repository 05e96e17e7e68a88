mod interop_tests;
mod operators_tests;
