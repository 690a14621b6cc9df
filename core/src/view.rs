#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Generator,
    Revisit,
    Print,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Generator => "generator",
            View::Revisit => "revisit",
            View::Print => "print",
        }
    }
}

/// The result of a granted view change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransition {
    pub from: View,
    pub to: View,
}

impl ViewTransition {
    /// Entering the revisit view always redraws the saved-pack list.
    pub fn refreshes_history(&self) -> bool {
        self.to == View::Revisit
    }

    pub fn hides_print_region(&self) -> bool {
        self.from == View::Print && self.to != View::Print
    }
}

/// Tracks the single active view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    current: View,
}

impl ViewState {
    pub fn current(&self) -> View {
        self.current
    }

    /// Switches to `target`. The print view needs a pack to show; without one
    /// the request is refused and nothing changes.
    pub fn request(&mut self, target: View, has_pack: bool) -> Option<ViewTransition> {
        if target == View::Print && !has_pack {
            return None;
        }
        let transition = ViewTransition {
            from: self.current,
            to: target,
        };
        self.current = target;
        Some(transition)
    }
}
