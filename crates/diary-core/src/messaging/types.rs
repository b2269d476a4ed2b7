use crate::domain::UserId;

/// Transport-neutral inbound interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub user_id: UserId,
    pub kind: InteractionKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionKind {
    /// A menu button press; the payload is the button id.
    MenuSelect(String),
    /// A free-text message.
    Text(String),
}

/// Outbound reply: text plus an optional menu rendered under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: Some(Menu::main()),
        }
    }
}

/// The four fixed menu actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Show,
    Edit,
    Delete,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Add,
        MenuChoice::Show,
        MenuChoice::Edit,
        MenuChoice::Delete,
    ];

    pub fn id(self) -> &'static str {
        match self {
            MenuChoice::Add => "add",
            MenuChoice::Show => "show",
            MenuChoice::Edit => "edit",
            MenuChoice::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Добавить запись",
            MenuChoice::Show => "Показать записи",
            MenuChoice::Edit => "Редактировать запись",
            MenuChoice::Delete => "Удалить запись",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Inline menu (buttons), rendered one button per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub id: String,
}

impl Menu {
    /// The main menu: add, show, edit, delete.
    pub fn main() -> Self {
        let items = MenuChoice::ALL
            .into_iter()
            .map(|c| MenuItem {
                label: c.label().to_string(),
                id: c.id().to_string(),
            })
            .collect();
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_menu_has_fixed_order() {
        let ids: Vec<_> = Menu::main().items.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["add", "show", "edit", "delete"]);
    }

    #[test]
    fn choice_ids_round_trip() {
        for c in MenuChoice::ALL {
            assert_eq!(MenuChoice::from_id(c.id()), Some(c));
        }
        assert_eq!(MenuChoice::from_id("askuser:1:0"), None);
    }
}
