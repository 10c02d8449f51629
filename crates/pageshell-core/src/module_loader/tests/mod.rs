// Module loader test module
#[cfg(test)]
mod loader_tests;
