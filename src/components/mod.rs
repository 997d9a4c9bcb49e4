pub mod app;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod game_view;
pub mod name_form;

use std::cell::RefCell;
use std::rc::Rc;

/// Shared mutable state handed to child components. Equality is identity so
/// passing it as a prop never forces a re-render.
pub struct Shared<T>(pub Rc<RefCell<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(self.0.clone())
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
