mod health_check;
mod helpers;

/// Each file in tests/ folder gets compiled as its own crate. `cargo` compiles each test executable
/// in isolation and warns us if, for a specific test file, one or more public functions in `helpers`
/// have never been invoked. Keeping every API test in a single executable, with `helpers` as one
/// of its sub-modules, avoids that.
#[allow(dead_code)]
struct Dummy;
