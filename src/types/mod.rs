// Mind map shared type definitions
// Each submodule defines types used across the shell, the bridge and the UI.

pub mod dialog;
pub mod errors;
pub mod menu;
pub mod message;
