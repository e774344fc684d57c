use crate::core::{PropertyKey, PropertyStore, PropertyValue, State, StateRegistry};

/// Mutable view of a freshly constructed node handed to themes.
pub struct ThemeTarget<'a> {
    kind: &'a str,
    props: &'a mut PropertyStore,
    states: &'a mut StateRegistry,
}

impl<'a> ThemeTarget<'a> {
    pub(super) fn new(
        kind: &'a str,
        props: &'a mut PropertyStore,
        states: &'a mut StateRegistry,
    ) -> Self {
        Self {
            kind,
            props,
            states,
        }
    }

    /// Node kind name, such as `Rectangle` or a factory-registered name.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind
    }

    pub fn set(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> &mut Self {
        self.props.set(key, value.into());
        self
    }

    #[must_use]
    pub fn props(&self) -> &PropertyStore {
        self.props
    }

    /// Named state to preconfigure (e.g. a `hover` look).
    pub fn state(&mut self, name: &str) -> &mut State {
        self.states.create(name)
    }
}

/// Style rule applied to every node at construction, before the caller's own
/// assignments. Themes run in registration order.
pub trait Theme {
    fn apply(&self, target: &mut ThemeTarget<'_>);
}

impl<F> Theme for F
where
    F: Fn(&mut ThemeTarget<'_>),
{
    fn apply(&self, target: &mut ThemeTarget<'_>) {
        self(target);
    }
}

impl super::SceneGraph {
    /// Appends a theme; only nodes created afterwards are affected.
    pub fn add_theme<T>(&mut self, theme: T)
    where
        T: Theme + 'static,
    {
        self.themes.push(Box::new(theme));
    }

    pub fn clear_themes(&mut self) {
        self.themes.clear();
    }

    #[must_use]
    pub fn theme_count(&self) -> usize {
        self.themes.len()
    }
}
