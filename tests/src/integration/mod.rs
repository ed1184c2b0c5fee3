//! Cross-subsystem integration scenarios.

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod custody_flow;
#[cfg(test)]
mod fixtures;
