pub mod category_menu;
pub mod main_menu;

/// What the enclosing loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Back,
    Exit,
}
