//! Resilient JSON fetch client.
//!
//! # Data Flow
//! ```text
//! caller (base_url, endpoint, credential)
//!     → url.rs (normalize)
//!     → cache.rs (freshness window lookup)
//!     → fetch.rs (ladder loop over relay.rs strategies)
//!     → transport.rs (HTTP GET)
//!     → error.rs (classify) → messages.rs (present)
//! ```
//!
//! # Design Decisions
//! - Non-2xx responses are terminal; only transport failures move the ladder
//! - Cache, clock, ladder and sender are all injected
//! - Cache is owned by the client instance, shared between its clones

pub mod cache;
pub mod clock;
pub mod error;
pub mod fetch;
pub mod messages;
pub mod relay;
pub mod transport;
pub mod url;

pub use cache::ResponseCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{FetchError, FetchResult};
pub use fetch::{FetchClient, RetryPolicy};
pub use relay::{Direct, Relay, TransportStrategy};
pub use transport::{HttpReply, HttpSend, ReqwestSender};
