//! Core of a single-user drawing surface with simulated presence.
//!
//! The crate owns everything with real logic behind a whiteboard page:
//! turning pointer input into pixels under tool-dependent blending, and a
//! cosmetic presence simulator that animates the "who's online" indicators.
//! Popovers, buttons, toasts, and the download link belong to the host UI,
//! which reads [`session::SessionSnapshot`], drains [`notice::Notice`]s, and
//! forwards DOM-style events into a [`session::Session`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Session owner: mount, event routing, clear/export, teardown |
//! | [`engine`] | Pure stroke state machine and [`engine::EngineCore`] |
//! | [`input`] | Host event types and gesture states |
//! | [`surface`] | Raster buffer, stroke rasterizer, PNG export |
//! | [`style`] | Active tool, color, and brush size |
//! | [`color`] | Color parsing and canonical hex formatting |
//! | [`presence`] | Simulated connection status and user count |
//! | [`notice`] | Fire-and-forget notice channel |
//! | [`config`] | Session defaults from environment variables |
//! | [`geom`] | Points, sizes, damage rectangles |
//! | [`telemetry`] | Tracing subscriber setup |
//! | [`consts`] | Shared constants (brush limits, palette, intervals) |

pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod input;
pub mod notice;
pub mod presence;
pub mod session;
pub mod style;
pub mod surface;
pub mod telemetry;

pub use config::SessionConfig;
pub use session::{Export, Session, SessionError, SessionSnapshot};
