//! # floem-radial
//!
//! A radial HSB color picker for [Floem](https://github.com/lapce/floem).
//!
//! Three concentric rings control hue, saturation and brightness; each is
//! turned by dragging and read off at 12 o'clock. A swatch in the middle
//! shows the result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_radial::{hsb_wheel, Hsb, ShadowMode, WheelConfig};
//!
//! let color = RwSignal::new(Hsb::new(210.0, 1.0, 1.0));
//! let config = WheelConfig::new(190.0, 50.0, 0.0).with_shadows(ShadowMode::Inner);
//! // Use `hsb_wheel(color, config)` in your Floem view tree.
//! ```
//!
//! The interaction core ([`ColorWheel`]) has no Floem dependency in its
//! behavior and can be driven directly with pointer events.

mod color;
mod config;
mod constants;
mod error;
pub mod geometry;
pub mod math;
pub mod render;
mod ring;
pub mod surface;
mod swatch;
mod view;
mod wheel;

pub use color::{Hsb, Rgb};
pub use config::{RingBand, RingLayout, ShadowMode, ShadowSpec, WheelConfig};
pub use error::WheelError;
pub use ring::{RingControl, RingKind, RingState};
pub use swatch::ColorSwatch;
pub use view::{hsb_wheel, HsbWheelView};
pub use wheel::{ColorWheel, PointerEvent};
