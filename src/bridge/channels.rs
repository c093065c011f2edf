// Fixed channel names shared with the UI-side bridge script.

pub const MENU_NEW: &str = "menu-new";
pub const MENU_OPEN: &str = "menu-open";
pub const MENU_SAVE: &str = "menu-save";
pub const MENU_UNDO: &str = "menu-undo";
pub const MENU_REDO: &str = "menu-redo";
pub const MENU_DELETE: &str = "menu-delete";
pub const MENU_ZOOM_IN: &str = "menu-zoom-in";
pub const MENU_ZOOM_OUT: &str = "menu-zoom-out";
pub const MENU_ZOOM_RESET: &str = "menu-zoom-reset";

pub const SHOW_SAVE_DIALOG: &str = "show-save-dialog";
pub const SHOW_OPEN_DIALOG: &str = "show-open-dialog";
pub const GET_APP_VERSION: &str = "get-app-version";
pub const LOG_ERROR: &str = "log-error";

pub const READ_FILE: &str = "read-file";
pub const WRITE_FILE: &str = "write-file";
pub const FILE_EXISTS: &str = "file-exists";

pub const MENU_CHANNELS: [&str; 9] = [
    MENU_NEW,
    MENU_OPEN,
    MENU_SAVE,
    MENU_UNDO,
    MENU_REDO,
    MENU_DELETE,
    MENU_ZOOM_IN,
    MENU_ZOOM_OUT,
    MENU_ZOOM_RESET,
];
