pub mod config;
pub mod domain;
pub mod errors;
pub mod fulfillment;

pub use domain::request::{Context, FulfillmentRequest, Parameters};
pub use domain::response::{FulfillmentMessage, FulfillmentResponse, MessagePayload, Platform};
pub use domain::watchlist::{
    WatchlistEntry, WatchlistEntryId, WatchlistRecord, DEFAULT_WATCHLIST_COLLECTION,
};
pub use errors::{FulfillmentError, InterfaceError};
pub use fulfillment::{ActionHandler, Fulfillment, FulfillmentEngine};
