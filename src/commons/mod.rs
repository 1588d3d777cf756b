pub mod error;
pub mod post_record;
pub mod run_record;
pub mod run_store;
pub mod search_feed;

#[cfg(test)]
pub mod testing;
