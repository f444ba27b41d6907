pub mod cultures;
pub mod edit_session;
pub mod encoding;
pub mod exchange;
pub mod filter;
pub mod lookup;
pub mod manager;
pub mod qa;
pub mod selection;
pub mod store;
pub mod view;
