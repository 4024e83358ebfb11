//! WebSocket Update Stream
//!
//! Pushes "content updated" notices to open dashboards so they can offer a
//! reload when the served payloads change.
//!
//! ## Usage
//!
//! Clients connect to `/api/v1/updates` and receive:
//! - `connected` with the connection id and current snapshot version
//! - `content_updated` whenever a refresh changes the payloads
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:8082/api/v1/updates');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'content_updated') {
//!     window.dispatchEvent(new Event('contentUpdated'));
//!   }
//! };
//! ```

mod handler;
mod messages;

pub use handler::updates_handler;
pub use messages::{ClientMessage, ServerMessage};
