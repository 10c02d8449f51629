// Crate-level test module: shared doubles and end-to-end bootstrap scenarios
#[cfg(test)]
pub(crate) mod common;
