pub mod compactor;
pub mod endpoint;
pub mod packet;
pub mod request;
pub mod transport;

pub use compactor::{BatchCompactor, BatchSink, BATCH_SIZE};
pub use packet::Packet;
pub use request::{form_encode, HttpMethod, Request};
pub use transport::{LogTransport, Transport};
