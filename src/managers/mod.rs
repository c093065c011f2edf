// Mind map state managers
// Managers own the stateful parts of the shell: the single window and the menu.

pub mod menu_manager;
pub mod window_manager;
