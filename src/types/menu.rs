use std::fmt;
use std::path::PathBuf;

use crate::bridge::channels;

/// Every activatable item in the application menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    New,
    Open,
    Save,
    Quit,
    Undo,
    Redo,
    Delete,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::New,
        MenuAction::Open,
        MenuAction::Save,
        MenuAction::Quit,
        MenuAction::Undo,
        MenuAction::Redo,
        MenuAction::Delete,
        MenuAction::ZoomIn,
        MenuAction::ZoomOut,
        MenuAction::ZoomReset,
    ];

    /// Stable native menu item id.
    pub fn id(&self) -> &'static str {
        match self {
            MenuAction::New => "file.new",
            MenuAction::Open => "file.open",
            MenuAction::Save => "file.save",
            MenuAction::Quit => "file.exit",
            MenuAction::Undo => "edit.undo",
            MenuAction::Redo => "edit.redo",
            MenuAction::Delete => "edit.delete",
            MenuAction::ZoomIn => "view.zoom_in",
            MenuAction::ZoomOut => "view.zoom_out",
            MenuAction::ZoomReset => "view.zoom_reset",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

/// Named, argument-optional event delivered to the UI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    New,
    Open(PathBuf),
    Save,
    Undo,
    Redo,
    Delete,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl MenuCommand {
    /// Channel name the command travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            MenuCommand::New => channels::MENU_NEW,
            MenuCommand::Open(_) => channels::MENU_OPEN,
            MenuCommand::Save => channels::MENU_SAVE,
            MenuCommand::Undo => channels::MENU_UNDO,
            MenuCommand::Redo => channels::MENU_REDO,
            MenuCommand::Delete => channels::MENU_DELETE,
            MenuCommand::ZoomIn => channels::MENU_ZOOM_IN,
            MenuCommand::ZoomOut => channels::MENU_ZOOM_OUT,
            MenuCommand::ZoomReset => channels::MENU_ZOOM_RESET,
        }
    }

    /// Action name handed to the UI's menu callback.
    pub fn action(&self) -> &'static str {
        self.channel().trim_start_matches("menu-")
    }

    pub fn payload(&self) -> Option<String> {
        match self {
            MenuCommand::Open(path) => Some(path.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

/// Modifier part of an accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Cmd on macOS, Ctrl everywhere else.
    CmdOrCtrl,
}

/// Key part of an accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    N,
    O,
    S,
    Z,
    Y,
    Delete,
    Plus,
    Minus,
    Digit0,
}

impl Key {
    fn label(&self) -> &'static str {
        match self {
            Key::N => "N",
            Key::O => "O",
            Key::S => "S",
            Key::Z => "Z",
            Key::Y => "Y",
            Key::Delete => "Delete",
            Key::Plus => "Plus",
            Key::Minus => "-",
            Key::Digit0 => "0",
        }
    }
}

/// Keyboard shortcut bound to a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub modifier: Option<Modifier>,
    pub key: Key,
}

impl Accelerator {
    pub const fn cmd_or_ctrl(key: Key) -> Self {
        Self {
            modifier: Some(Modifier::CmdOrCtrl),
            key,
        }
    }

    pub const fn bare(key: Key) -> Self {
        Self {
            modifier: None,
            key,
        }
    }

    /// Human-readable form with the modifier resolved for the current platform.
    pub fn for_platform(&self) -> String {
        match self.modifier {
            Some(Modifier::CmdOrCtrl) if cfg!(target_os = "macos") => {
                format!("Cmd+{}", self.key.label())
            }
            Some(Modifier::CmdOrCtrl) => format!("Ctrl+{}", self.key.label()),
            None => self.key.label().to_string(),
        }
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Some(Modifier::CmdOrCtrl) => write!(f, "CmdOrCtrl+{}", self.key.label()),
            None => write!(f, "{}", self.key.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemSpec {
    pub action: MenuAction,
    pub label: String,
    pub accelerator: Option<Accelerator>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItemSpec),
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    pub label: String,
    pub entries: Vec<MenuEntry>,
}

/// Static menu tree installed as the application menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTemplate {
    pub submenus: Vec<Submenu>,
}

fn item(action: MenuAction, label: &str, accelerator: Option<Accelerator>) -> MenuEntry {
    MenuEntry::Item(MenuItemSpec {
        action,
        label: label.to_string(),
        accelerator,
    })
}

impl Default for MenuTemplate {
    fn default() -> Self {
        use Accelerator as A;
        Self {
            submenus: vec![
                Submenu {
                    label: "File".to_string(),
                    entries: vec![
                        item(MenuAction::New, "New", Some(A::cmd_or_ctrl(Key::N))),
                        item(MenuAction::Open, "Open", Some(A::cmd_or_ctrl(Key::O))),
                        item(MenuAction::Save, "Save", Some(A::cmd_or_ctrl(Key::S))),
                        MenuEntry::Separator,
                        item(MenuAction::Quit, "Exit", None),
                    ],
                },
                Submenu {
                    label: "Edit".to_string(),
                    entries: vec![
                        item(MenuAction::Undo, "Undo", Some(A::cmd_or_ctrl(Key::Z))),
                        item(MenuAction::Redo, "Redo", Some(A::cmd_or_ctrl(Key::Y))),
                        MenuEntry::Separator,
                        item(MenuAction::Delete, "Delete", Some(A::bare(Key::Delete))),
                    ],
                },
                Submenu {
                    label: "View".to_string(),
                    entries: vec![
                        item(MenuAction::ZoomIn, "Zoom In", Some(A::cmd_or_ctrl(Key::Plus))),
                        item(MenuAction::ZoomOut, "Zoom Out", Some(A::cmd_or_ctrl(Key::Minus))),
                        item(
                            MenuAction::ZoomReset,
                            "Reset Zoom",
                            Some(A::cmd_or_ctrl(Key::Digit0)),
                        ),
                    ],
                },
            ],
        }
    }
}

impl MenuTemplate {
    /// All activatable items in display order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItemSpec> {
        self.submenus.iter().flat_map(|s| {
            s.entries.iter().filter_map(|e| match e {
                MenuEntry::Item(item) => Some(item),
                MenuEntry::Separator => None,
            })
        })
    }
}
