//! Pointer, keyboard and wheel interaction.
//!
//! ## States
//!
//! `none`, `drawing`, `moving`, `panning` and `resizing-{n,s,e,w,nw,ne,sw,se}`.
//! A gesture starts on pointer-down over one of three targets (background,
//! selection body, resize handle) and always ends in `none` on pointer-up or
//! cancel. The pan tool forces every gesture into `panning`.

mod hit;
mod keyboard;
mod machine;
mod mode;
mod wheel;

pub use hit::{hit_test, HandleTolerance};
pub use keyboard::{key_command, KeyCommand, KeyModifiers};
pub use machine::{InteractionMachine, PointerCapture, PointerEffect, PointerSample};
pub use mode::{HitTarget, InteractionMode, Tool};
pub use wheel::{ScrollExtent, WheelAction, WheelInput, WheelNavigator};
