//! Menu Manager for the mind map shell.
//!
//! Owns the static menu template, resolves native item ids and keyboard
//! accelerators back to menu actions, and rejects accelerator conflicts.

use std::collections::HashMap;

use crate::types::errors::MenuError;
use crate::types::menu::{Accelerator, MenuAction, MenuCommand, MenuTemplate};

/// What the caller must do after a menu action was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Forward this command to the UI surface.
    Send(MenuCommand),
    /// Ask for a file first, then forward `menu-open` with the chosen path.
    PickFileThenOpen,
    /// Leave the application.
    Quit,
}

/// Trait defining menu lookup operations.
pub trait MenuManagerTrait {
    fn template(&self) -> &MenuTemplate;
    fn action_for_id(&self, id: &str) -> Result<MenuAction, MenuError>;
    fn action_for_accelerator(&self, accelerator: &Accelerator) -> Option<MenuAction>;
    fn accelerator_for(&self, action: MenuAction) -> Option<Accelerator>;
    fn has_conflict(&self, accelerator: &Accelerator, exclude: Option<MenuAction>)
        -> Option<MenuAction>;
}

pub struct MenuManager {
    template: MenuTemplate,
    accelerators: HashMap<Accelerator, MenuAction>,
}

impl MenuManager {
    /// Builds a manager over `template`, failing if two items share an accelerator.
    pub fn new(template: MenuTemplate) -> Result<Self, MenuError> {
        let mut accelerators = HashMap::new();
        for item in template.items() {
            if let Some(acc) = item.accelerator {
                if let Some(existing) = accelerators.insert(acc, item.action) {
                    return Err(MenuError::Build(format!(
                        "'{}' is bound to both {:?} and {:?}",
                        acc, existing, item.action
                    )));
                }
            }
        }
        Ok(Self {
            template,
            accelerators,
        })
    }

    /// Maps an action to what has to happen when it fires.
    pub fn resolve(action: MenuAction) -> Resolved {
        match action {
            MenuAction::New => Resolved::Send(MenuCommand::New),
            MenuAction::Open => Resolved::PickFileThenOpen,
            MenuAction::Save => Resolved::Send(MenuCommand::Save),
            MenuAction::Quit => Resolved::Quit,
            MenuAction::Undo => Resolved::Send(MenuCommand::Undo),
            MenuAction::Redo => Resolved::Send(MenuCommand::Redo),
            MenuAction::Delete => Resolved::Send(MenuCommand::Delete),
            MenuAction::ZoomIn => Resolved::Send(MenuCommand::ZoomIn),
            MenuAction::ZoomOut => Resolved::Send(MenuCommand::ZoomOut),
            MenuAction::ZoomReset => Resolved::Send(MenuCommand::ZoomReset),
        }
    }
}

impl Default for MenuManager {
    fn default() -> Self {
        let template = MenuTemplate::default();
        let accelerators = template
            .items()
            .filter_map(|item| item.accelerator.map(|acc| (acc, item.action)))
            .collect();
        Self {
            template,
            accelerators,
        }
    }
}

impl MenuManagerTrait for MenuManager {
    fn template(&self) -> &MenuTemplate {
        &self.template
    }

    fn action_for_id(&self, id: &str) -> Result<MenuAction, MenuError> {
        MenuAction::from_id(id)
            .filter(|action| self.template.items().any(|item| item.action == *action))
            .ok_or_else(|| MenuError::UnknownItem(id.to_string()))
    }

    fn action_for_accelerator(&self, accelerator: &Accelerator) -> Option<MenuAction> {
        self.accelerators.get(accelerator).copied()
    }

    fn accelerator_for(&self, action: MenuAction) -> Option<Accelerator> {
        self.template
            .items()
            .find(|item| item.action == action)
            .and_then(|item| item.accelerator)
    }

    fn has_conflict(
        &self,
        accelerator: &Accelerator,
        exclude: Option<MenuAction>,
    ) -> Option<MenuAction> {
        self.accelerators
            .get(accelerator)
            .copied()
            .filter(|action| Some(*action) != exclude)
    }
}
