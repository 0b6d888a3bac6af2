pub mod cache;
pub mod pipeline;
pub mod snapshot;
pub mod trajectory;
pub mod web;

#[cfg(test)]
mod test_support;
