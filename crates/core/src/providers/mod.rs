pub mod google;

pub use google::GoogleCustomSearchProvider;
